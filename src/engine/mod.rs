//! Покерный движок: ставки, переход улиц, сайд-поты, шоудаун.
//!
//! Высокоуровневый объект: `CashTable` (стол + текущая раздача `HandEngine`).
//! Основные операции:
//!   - `start_hand` – запустить новую раздачу
//!   - `apply_action` – проверить и применить действие игрока
//!   - `remove_player` – игрок встаёт из-за стола посреди раздачи

pub mod actions;
pub mod betting;
pub mod cash_table;
pub mod errors;
pub mod game_loop;
pub mod hand_history;
pub mod positions;
pub mod pot;
pub mod settlement;
pub mod side_pots;
pub mod validation;

use crate::domain::card::Card;
use crate::domain::hand::HandStrength;

pub use actions::{PlayerAction, PlayerActionKind, ValidatedAction};
pub use betting::BettingState;
pub use cash_table::CashTable;
pub use errors::{ActionError, EngineError};
pub use game_loop::{apply_action, remove_player, start_hand, HandEngine, HandStatus};
pub use hand_history::{HandEvent, HandEventKind, HandHistory};
pub use pot::Pot;
pub use settlement::{settle, Settlement, SettlementEntry};
pub use side_pots::{compute_side_pots, Contribution, SidePot};
pub use validation::{legal_actions, validate_action, BetBounds, LegalActions};

/// RNG интерфейс для engine.
/// Реализации – в `infra::rng`.
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}

/// Оракул силы руки: карманные карты + борд -> ранг и название.
///
/// Больший ранг всегда сильнее, равные ранги делят банк.
pub trait HandEvaluator {
    fn evaluate(&self, hole: &[Card], board: &[Card]) -> HandStrength;
}

impl<E: HandEvaluator + ?Sized> HandEvaluator for &E {
    fn evaluate(&self, hole: &[Card], board: &[Card]) -> HandStrength {
        (**self).evaluate(hole, board)
    }
}
