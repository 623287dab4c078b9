use serde::{Deserialize, Serialize};

use crate::domain::{Chips, SeatIndex};

/// Тип действия игрока.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerActionKind {
    Fold,
    Check,
    /// Уравнять наибольшую ставку раунда.
    Call,
    /// Бет или рейз: сколько фишек игрок ДОБАВЛЯЕТ к своей текущей ставке.
    Bet(Chips),
    /// Поставить весь оставшийся стек.
    AllIn,
}

/// Действие, адресованное конкретному месту.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAction {
    pub seat: SeatIndex,
    pub kind: PlayerActionKind,
}

impl PlayerAction {
    pub fn new(seat: SeatIndex, kind: PlayerActionKind) -> Self {
        Self { seat, kind }
    }
}

/// Проверенное действие: что именно движок применит к состоянию.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    /// Сколько фишек доплатить (0 – пустой call).
    Call(Chips),
    /// Полноценный бет/рейз: добавляемые фишки и размер повышения над max bet.
    Bet { amount: Chips, raise_size: Chips },
    /// Олл-ин. `full_raise` – размер повышения, если он тянет на полноценный рейз.
    AllIn { amount: Chips, full_raise: Option<Chips> },
}

impl ValidatedAction {
    /// Сколько фишек уходит из стека.
    pub fn committed(&self) -> Chips {
        match *self {
            ValidatedAction::Fold | ValidatedAction::Check => Chips::ZERO,
            ValidatedAction::Call(x) => x,
            ValidatedAction::Bet { amount, .. } | ValidatedAction::AllIn { amount, .. } => amount,
        }
    }
}
