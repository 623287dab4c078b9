use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::player::PlayerStatus;
use crate::domain::table::Table;
use crate::domain::SeatIndex;

/// Состояние раунда ставок (на конкретной улице).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingState {
    pub street: Street,
    /// Размер минимального следующего повышения (`lastRaise`).
    /// В начале каждой улицы равен большому блайнду.
    pub last_raise: Chips,
    /// Seat последнего полноценного бета/рейза.
    pub last_aggressor: Option<SeatIndex>,
    /// Кто уже уравнял или повысил после последнего полноценного бета/рейза.
    /// Этим местам неполный олл-ин торговлю не открывает. Check сюда не попадает.
    pub matched_since_full_raise: Vec<SeatIndex>,
}

impl BettingState {
    pub fn new(street: Street, big_blind: Chips) -> Self {
        Self {
            street,
            last_raise: big_blind,
            last_aggressor: None,
            matched_since_full_raise: Vec::new(),
        }
    }

    /// Место вложило фишки, не повысив ставку по-полной (call или неполный олл-ин).
    pub fn mark_matched(&mut self, seat: SeatIndex) {
        if !self.matched_since_full_raise.contains(&seat) {
            self.matched_since_full_raise.push(seat);
        }
    }

    /// Полноценный бет/рейз: новый шаг повышения, торговля открыта для всех остальных.
    pub fn on_full_raise(&mut self, seat: SeatIndex, raise_size: Chips) {
        self.last_raise = raise_size;
        self.last_aggressor = Some(seat);
        self.matched_since_full_raise = vec![seat];
    }

    /// Может ли место повышать (открыта ли для него торговля).
    pub fn can_raise(&self, seat: SeatIndex) -> bool {
        !self.matched_since_full_raise.contains(&seat)
    }
}

/// Завершён ли раунд ставок.
///
/// Каждое место в раздаче (не сфолдившее и не ожидающее) либо в олл-ине,
/// либо уже действовало и уравняло наибольшую ставку.
pub fn is_round_complete(table: &Table) -> bool {
    let max_bet = table.max_bet();
    table
        .occupied()
        .filter(|(_, p)| !matches!(p.status, PlayerStatus::Folded | PlayerStatus::Waiting))
        .all(|(_, p)| p.status == PlayerStatus::AllIn || (p.has_acted && p.current_bet == max_bet))
}
