use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::chips::Chips;
use crate::domain::player::{PlayerAtTable, PlayerStatus};
use crate::domain::{HandId, PlayerId};

/// Индекс места за столом (0..max_players-1). Стабилен на всё время раздачи.
pub type SeatIndex = u8;

/// Жёсткий предел мест за одним столом.
pub const MAX_SEATS: u8 = 10;

/// Ошибки конфигурации стола. Фатальны для попытки создать стол.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("min_players должен быть не меньше 2, получено {0}")]
    MinPlayersTooLow(u8),

    #[error("max_players не может превышать 10, получено {0}")]
    MaxPlayersTooHigh(u8),

    #[error("min_players ({min}) больше max_players ({max})")]
    MinAboveMax { min: u8, max: u8 },

    #[error("некорректные блайнды: SB={small_blind}, BB={big_blind}")]
    InvalidBlinds { small_blind: Chips, big_blind: Chips },

    #[error("некорректный бай-ин: min={min}, max={max}")]
    InvalidBuyIn { min: Chips, max: Chips },

    #[error("не удалось разобрать конфиг стола: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Конфиг кеш-стола: блайнды, границы числа мест и бай-ина.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableConfig {
    pub small_blind: Chips,
    pub big_blind: Chips,
    /// Сколько игроков нужно, чтобы начать раздачу.
    pub min_players: u8,
    /// Сколько мест за столом.
    pub max_players: u8,
    pub min_buy_in: Chips,
    pub max_buy_in: Chips,
}

impl TableConfig {
    pub fn new(
        small_blind: Chips,
        big_blind: Chips,
        min_players: u8,
        max_players: u8,
        min_buy_in: Chips,
        max_buy_in: Chips,
    ) -> Self {
        Self {
            small_blind,
            big_blind,
            min_players,
            max_players,
            min_buy_in,
            max_buy_in,
        }
    }

    /// Разобрать конфиг из JSON и сразу проверить.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: TableConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_players < 2 {
            return Err(ConfigError::MinPlayersTooLow(self.min_players));
        }
        if self.max_players > MAX_SEATS {
            return Err(ConfigError::MaxPlayersTooHigh(self.max_players));
        }
        if self.min_players > self.max_players {
            return Err(ConfigError::MinAboveMax {
                min: self.min_players,
                max: self.max_players,
            });
        }
        if self.big_blind.is_zero() || self.small_blind > self.big_blind {
            return Err(ConfigError::InvalidBlinds {
                small_blind: self.small_blind,
                big_blind: self.big_blind,
            });
        }
        if self.min_buy_in > self.max_buy_in {
            return Err(ConfigError::InvalidBuyIn {
                min: self.min_buy_in,
                max: self.max_buy_in,
            });
        }
        Ok(())
    }

    pub fn buy_in_allowed(&self, amount: Chips) -> bool {
        amount >= self.min_buy_in && amount <= self.max_buy_in
    }
}

/// Игрок, выбывший со стола после расчёта банка.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EliminatedPlayer {
    pub player_id: PlayerId,
    pub name: String,
    pub seat: SeatIndex,
    pub hand_id: HandId,
}

/// Долгоживущее состояние стола. Состояние конкретной раздачи живёт в `HandEngine`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub config: TableConfig,

    /// Места: индекс вектора = SeatIndex, None – место пустое.
    pub seats: Vec<Option<PlayerAtTable>>,

    /// Место дилерской кнопки в последней раздаче.
    pub dealer_button: Option<SeatIndex>,

    /// Идёт ли сейчас раздача.
    pub hand_in_progress: bool,

    /// Сколько раздач сыграно (он же id следующей раздачи минус один).
    pub hands_played: u64,

    /// Все, кто вылетел с нулевым стеком, в порядке вылета.
    pub eliminated: Vec<EliminatedPlayer>,
}

impl Table {
    /// Создать пустой стол. Некорректный конфиг – ошибка.
    pub fn new(config: TableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seats = vec![None; config.max_players as usize];
        Ok(Self {
            config,
            seats,
            dealer_button: None,
            hand_in_progress: false,
            hands_played: 0,
            eliminated: Vec::new(),
        })
    }

    pub fn max_seats(&self) -> u8 {
        self.config.max_players
    }

    pub fn seated_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_some()).count()
    }

    pub fn player(&self, seat: SeatIndex) -> Option<&PlayerAtTable> {
        self.seats.get(seat as usize).and_then(|s| s.as_ref())
    }

    pub fn player_mut(&mut self, seat: SeatIndex) -> Option<&mut PlayerAtTable> {
        self.seats.get_mut(seat as usize).and_then(|s| s.as_mut())
    }

    pub fn seat_of(&self, player_id: PlayerId) -> Option<SeatIndex> {
        self.occupied().find(|(_, p)| p.player_id == player_id).map(|(s, _)| s)
    }

    pub fn first_empty_seat(&self) -> Option<SeatIndex> {
        self.seats.iter().position(|s| s.is_none()).map(|i| i as SeatIndex)
    }

    /// Все занятые места по возрастанию индекса.
    pub fn occupied(&self) -> impl Iterator<Item = (SeatIndex, &PlayerAtTable)> {
        self.seats
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|p| (i as SeatIndex, p)))
    }

    /// Наибольшая ставка текущего раунда (`max(bets[])`).
    pub fn max_bet(&self) -> Chips {
        self.occupied()
            .map(|(_, p)| p.current_bet)
            .max()
            .unwrap_or(Chips::ZERO)
    }

    /// Сумма стеков всех сидящих игроков.
    pub fn total_stacks(&self) -> Chips {
        self.occupied().map(|(_, p)| p.stack).sum()
    }

    /// Сумма ставок текущего раунда.
    pub fn total_current_bets(&self) -> Chips {
        self.occupied().map(|(_, p)| p.current_bet).sum()
    }

    /// Сколько мест претендует на банк (не сфолдили и не ждут).
    pub fn count_in_hand(&self) -> usize {
        self.occupied().filter(|(_, p)| p.is_in_hand()).count()
    }

    /// Сколько мест ещё может действовать.
    pub fn count_can_act(&self) -> usize {
        self.occupied().filter(|(_, p)| p.can_act()).count()
    }

    /// Места, которые войдут в следующую раздачу (все, кроме уходящих и пустых стеков).
    pub fn count_ready_for_hand(&self) -> usize {
        self.occupied()
            .filter(|(_, p)| !p.leaving && !p.stack.is_zero())
            .count()
    }

    /// Есть ли место, которое ещё не в раздаче (ожидает).
    pub fn has_waiting(&self) -> bool {
        self.occupied().any(|(_, p)| p.status == PlayerStatus::Waiting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TableConfig {
        TableConfig::new(Chips(50), Chips(100), 2, 6, Chips(1_000), Chips(10_000))
    }

    #[test]
    fn valid_config_passes() {
        assert!(config().validate().is_ok());
        assert!(Table::new(config()).is_ok());
    }

    #[test]
    fn seat_bounds_are_enforced() {
        let mut c = config();
        c.min_players = 1;
        assert!(matches!(c.validate(), Err(ConfigError::MinPlayersTooLow(1))));

        let mut c = config();
        c.max_players = 11;
        assert!(matches!(c.validate(), Err(ConfigError::MaxPlayersTooHigh(11))));

        let mut c = config();
        c.min_players = 5;
        c.max_players = 4;
        assert!(matches!(c.validate(), Err(ConfigError::MinAboveMax { min: 5, max: 4 })));
    }

    #[test]
    fn blinds_and_buy_in_are_checked() {
        let mut c = config();
        c.small_blind = Chips(200);
        assert!(matches!(c.validate(), Err(ConfigError::InvalidBlinds { .. })));

        let mut c = config();
        c.min_buy_in = Chips(20_000);
        assert!(matches!(c.validate(), Err(ConfigError::InvalidBuyIn { .. })));
    }

    #[test]
    fn from_json_parses_and_validates() {
        let json = r#"{
            "small_blind": 5, "big_blind": 10,
            "min_players": 2, "max_players": 9,
            "min_buy_in": 200, "max_buy_in": 1000
        }"#;
        let c = TableConfig::from_json(json).unwrap();
        assert_eq!(c.big_blind, Chips(10));
        assert_eq!(c.max_players, 9);

        let bad = json.replace("\"max_players\": 9", "\"max_players\": 12");
        assert!(matches!(
            TableConfig::from_json(&bad),
            Err(ConfigError::MaxPlayersTooHigh(12))
        ));
        assert!(matches!(TableConfig::from_json("{"), Err(ConfigError::Parse(_))));
    }
}
