use thiserror::Error;

use crate::domain::chips::Chips;
use crate::domain::table::ConfigError;
use crate::domain::{PlayerId, SeatIndex};

/// Недопустимое действие игрока.
///
/// Всегда восстановимо: состояние раздачи не меняется, тот же игрок
/// может повторить ход с исправленным действием.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("сейчас не ход места {actual} (ходит {expected:?})")]
    NotPlayersTurn {
        expected: Option<SeatIndex>,
        actual: SeatIndex,
    },

    #[error("место {0} не может действовать в этой раздаче")]
    SeatCannotAct(SeatIndex),

    #[error("check невозможен – нужно доплатить {to_call}")]
    CannotCheck { to_call: Chips },

    #[error("недостаточно фишек: нужно {needed}, есть {available}")]
    NotEnoughChips { needed: Chips, available: Chips },

    #[error("ставка {amount} меньше большого блайнда {big_blind}")]
    BetBelowBigBlind { amount: Chips, big_blind: Chips },

    #[error("ставка только уравнивает – используйте call")]
    BetIsCall,

    #[error("рейз слишком мал: нужно добавить минимум {minimum}")]
    RaiseTooSmall { minimum: Chips },

    #[error("неполный олл-ин не открывает торговлю заново: доступны только call или fold")]
    RaiseNotReopened,
}

/// Ошибки движка покера.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    InvalidAction(#[from] ActionError),

    #[error("место {0} не существует за столом")]
    InvalidSeat(SeatIndex),

    #[error("место {0} пустое")]
    EmptySeat(SeatIndex),

    #[error("игрок {0} уже сидит за столом")]
    PlayerAlreadySeated(PlayerId),

    #[error("свободных мест нет")]
    TableFull,

    #[error("бай-ин {amount} вне диапазона [{min}, {max}]")]
    BuyInOutOfRange { amount: Chips, min: Chips, max: Chips },

    #[error("недостаточно игроков для раздачи: {seated} из {required}")]
    NotEnoughPlayers { seated: usize, required: usize },

    #[error("раздача уже идёт")]
    HandAlreadyInProgress,

    #[error("раздача не активна")]
    NoActiveHand,

    #[error("внутренняя ошибка: {0}")]
    Internal(&'static str),
}

impl EngineError {
    /// Можно ли повторить ход тем же игроком (ошибка самого действия).
    pub fn is_invalid_action(&self) -> bool {
        matches!(self, EngineError::InvalidAction(_))
    }
}
