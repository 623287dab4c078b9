use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::{HandId, PlayerId, SeatIndex};
use crate::engine::side_pots::SidePot;

/// Раунд ставок (улица) раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Street {
    /// Префлоп: карманные карты розданы, блайнды поставлены.
    Deal,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Street {
    /// Следующая улица. После Showdown переходов нет.
    pub fn next(self) -> Option<Street> {
        match self {
            Street::Deal => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => Some(Street::Showdown),
            Street::Showdown => None,
        }
    }

    /// Сколько карт борда открывается при переходе НА эту улицу.
    pub fn cards_revealed(self) -> usize {
        match self {
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
            Street::Deal | Street::Showdown => 0,
        }
    }
}

/// Числовой ранг руки. Больше – сильнее, равные ранги делят банк.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandRank(pub u32);

/// Ответ оракула оценки рук: ранг и человекочитаемое название.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandStrength {
    pub rank: HandRank,
    pub label: String,
}

/// Результат конкретного места в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerHandResult {
    pub seat: SeatIndex,
    pub player_id: PlayerId,
    /// Сила руки, если игрок дошёл до шоудауна.
    pub strength: Option<HandStrength>,
    /// Сколько фишек внёс в банк за раздачу.
    pub contributed: Chips,
    /// Сколько фишек получил из банка (включая возврат неуравненной ставки).
    pub won: Chips,
    pub is_winner: bool,
}

/// Краткое описание завершённой раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandSummary {
    pub hand_id: HandId,
    pub street_reached: Street,
    pub board: Vec<Card>,
    pub total_pot: Chips,
    /// Слои банка в порядке их разыгрывания.
    pub pots: Vec<SidePot>,
    /// По одному результату на каждое место, участвовавшее в раздаче.
    pub results: Vec<PlayerHandResult>,
}

impl HandSummary {
    pub fn winners(&self) -> impl Iterator<Item = &PlayerHandResult> {
        self.results.iter().filter(|r| r.is_winner)
    }

    pub fn result_for(&self, seat: SeatIndex) -> Option<&PlayerHandResult> {
        self.results.iter().find(|r| r.seat == seat)
    }
}
