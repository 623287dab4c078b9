//! Движок правил кеш-стола Texas Hold'em.
//!
//! Ведёт раунды ставок, проверяет действия игроков, открывает борд и
//! разыгрывает банк (включая сайд-поты от олл-инов). Встраивается во
//! внешнее приложение, которое подаёт действия по одному и читает
//! состояние/события.
//!
//! Слои:
//! - `domain` – карты, фишки, колода, игроки, стол;
//! - `engine` – состояние раздачи, валидатор, переход улиц, расчёт банка;
//! - `eval` – оценка силы рук по умолчанию;
//! - `infra` – реализации RNG;
//! - `api` – команды/запросы/DTO для транспортного слоя.

pub mod api;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;

pub use domain::{Chips, PlayerId, SeatIndex, TableConfig};
pub use engine::{CashTable, EngineError, HandEvaluator, HandStatus, PlayerActionKind, RandomSource};
pub use eval::StandardEvaluator;
pub use infra::{DeterministicRng, SystemRng};
