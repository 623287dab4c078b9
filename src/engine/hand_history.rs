use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::{HandId, PlayerId, SeatIndex};
use crate::engine::actions::PlayerActionKind;

/// Тип события в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandEventKind {
    /// Новая раздача началась.
    HandStarted {
        hand_id: HandId,
        dealer: SeatIndex,
        seats: Vec<(SeatIndex, PlayerId, Chips)>,
    },

    /// Блайнды. Короткий стек ставит сколько есть.
    BlindsPosted {
        small_blind: (SeatIndex, Chips),
        big_blind: (SeatIndex, Chips),
    },

    /// Игрок получил карманные карты.
    HoleCardsDealt {
        seat: SeatIndex,
        cards: Vec<Card>,
    },

    /// Действие игрока.
    PlayerActed {
        seat: SeatIndex,
        player_id: PlayerId,
        action: PlayerActionKind,
        /// Сколько фишек ушло из стека этим действием.
        amount: Chips,
        new_stack: Chips,
        pot_after: Chips,
    },

    /// Игрок встал из-за стола посреди раздачи (фолд вне очереди).
    PlayerLeft {
        seat: SeatIndex,
        player_id: PlayerId,
    },

    /// Переход на новую улицу.
    StreetChanged {
        street: Street,
    },

    /// Открыты общие карты на борде.
    BoardDealt {
        street: Street,
        cards: Vec<Card>,
    },

    /// Шоудаун – открытие карт.
    ShowdownReveal {
        seat: SeatIndex,
        player_id: PlayerId,
        hole_cards: Vec<Card>,
        rank: u32,
        label: String,
    },

    /// Выплата из банка.
    PotAwarded {
        seat: SeatIndex,
        player_id: PlayerId,
        amount: Chips,
    },

    /// Игрок вылетел с нулевым стеком.
    PlayerEliminated {
        seat: SeatIndex,
        player_id: PlayerId,
    },

    /// Раздача завершена.
    HandFinished {
        hand_id: HandId,
        total_pot: Chips,
    },
}

/// Событие в раздаче с порядковым номером и временем (мс от эпохи, UTC).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandEvent {
    pub index: u32,
    pub timestamp_ms: i64,
    pub kind: HandEventKind,
}

/// Полная история раздачи.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandHistory {
    pub events: Vec<HandEvent>,
}

impl HandHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: HandEventKind) {
        let index = self.events.len() as u32;
        self.events.push(HandEvent {
            index,
            timestamp_ms: Utc::now().timestamp_millis(),
            kind,
        });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn last(&self) -> Option<&HandEvent> {
        self.events.last()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
