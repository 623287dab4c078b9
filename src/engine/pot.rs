use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;

/// Банк: фишки, уже выведенные из торговли текущей улицы.
/// Разбивка на слои делается только при расчёте (см. `settlement`).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pot {
    pub total: Chips,
}

impl Pot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, amount: Chips) {
        self.total += amount;
    }

    /// Забрать всё содержимое банка (при расчёте).
    pub fn take(&mut self) -> Chips {
        std::mem::take(&mut self.total)
    }
}
