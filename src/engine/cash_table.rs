use log::info;

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{HandSummary, Street};
use crate::domain::player::{PlayerAtTable, PlayerStatus};
use crate::domain::table::{ConfigError, EliminatedPlayer, Table, TableConfig};
use crate::domain::{PlayerId, SeatIndex};
use crate::engine::actions::{PlayerAction, PlayerActionKind};
use crate::engine::errors::EngineError;
use crate::engine::game_loop::{self, HandEngine, HandStatus};
use crate::engine::hand_history::HandHistory;
use crate::engine::side_pots::{compute_side_pots, table_contributions, SidePot};
use crate::engine::validation::{legal_actions, LegalActions};
use crate::engine::{HandEvaluator, RandomSource};

/// Кеш-стол: долгоживущий `Table` + текущая (или последняя) раздача.
///
/// Владеет источником случайности и оракулом силы рук, так что все
/// операции – синхронные вызовы без внешнего контекста. Доступ к столу
/// сериализует вызывающий код.
#[derive(Clone, Debug)]
pub struct CashTable<R, E> {
    table: Table,
    /// Последняя раздача. После завершения остаётся для чтения истории/итогов.
    hand: Option<HandEngine>,
    rng: R,
    evaluator: E,
}

impl<R: RandomSource, E: HandEvaluator> CashTable<R, E> {
    /// Создать стол. Некорректный конфиг – ошибка.
    pub fn new(config: TableConfig, rng: R, evaluator: E) -> Result<Self, ConfigError> {
        Ok(Self {
            table: Table::new(config)?,
            hand: None,
            rng,
            evaluator,
        })
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn config(&self) -> &TableConfig {
        &self.table.config
    }

    /// Текущая или последняя раздача.
    pub fn hand(&self) -> Option<&HandEngine> {
        self.hand.as_ref()
    }

    pub fn hand_in_progress(&self) -> bool {
        self.table.hand_in_progress
    }

    /// Посадить игрока на первое свободное место.
    ///
    /// Во время раздачи игрок ждёт следующей.
    pub fn sit_down(
        &mut self,
        player_id: PlayerId,
        name: impl Into<String>,
        buy_in: Chips,
    ) -> Result<SeatIndex, EngineError> {
        if self.table.seat_of(player_id).is_some() {
            return Err(EngineError::PlayerAlreadySeated(player_id));
        }
        let config = &self.table.config;
        if buy_in.is_zero() || !config.buy_in_allowed(buy_in) {
            return Err(EngineError::BuyInOutOfRange {
                amount: buy_in,
                min: config.min_buy_in,
                max: config.max_buy_in,
            });
        }
        let seat = self.table.first_empty_seat().ok_or(EngineError::TableFull)?;

        let mut player = PlayerAtTable::new(player_id, name, buy_in);
        if self.table.hand_in_progress {
            player.status = PlayerStatus::Waiting;
        }
        info!("игрок {} садится на место {} с {}", player_id, seat, buy_in);
        self.table.seats[seat as usize] = Some(player);
        Ok(seat)
    }

    /// Освободить место. Посреди раздачи – фолд вне очереди, место
    /// освобождается после её завершения.
    pub fn stand_up(&mut self, seat: SeatIndex) -> Result<HandStatus, EngineError> {
        if self.table.player(seat).is_none() {
            return Err(if (seat as usize) < self.table.seats.len() {
                EngineError::EmptySeat(seat)
            } else {
                EngineError::InvalidSeat(seat)
            });
        }

        match self.hand.as_mut() {
            Some(hand) if self.table.hand_in_progress => {
                game_loop::remove_player(&mut self.table, hand, seat, &self.evaluator)
            }
            _ => {
                info!("место {} освобождено", seat);
                self.table.seats[seat as usize] = None;
                Ok(HandStatus::Ongoing)
            }
        }
    }

    /// Запустить следующую раздачу. Кнопка сдвигается на следующее место.
    pub fn start_hand(&mut self) -> Result<HandStatus, EngineError> {
        let hand = game_loop::start_hand(&mut self.table, &mut self.rng, &self.evaluator)?;
        let status = hand.status();
        self.hand = Some(hand);
        Ok(status)
    }

    /// Применить действие места, чей сейчас ход.
    pub fn act(&mut self, seat: SeatIndex, kind: PlayerActionKind) -> Result<HandStatus, EngineError> {
        let hand = self.hand.as_mut().ok_or(EngineError::NoActiveHand)?;
        game_loop::apply_action(
            &mut self.table,
            hand,
            PlayerAction::new(seat, kind),
            &self.evaluator,
        )
    }

    pub fn fold(&mut self, seat: SeatIndex) -> Result<HandStatus, EngineError> {
        self.act(seat, PlayerActionKind::Fold)
    }

    pub fn check(&mut self, seat: SeatIndex) -> Result<HandStatus, EngineError> {
        self.act(seat, PlayerActionKind::Check)
    }

    pub fn call(&mut self, seat: SeatIndex) -> Result<HandStatus, EngineError> {
        self.act(seat, PlayerActionKind::Call)
    }

    /// Бет или рейз: `amount` – сколько фишек добавить к своей ставке.
    pub fn bet(&mut self, seat: SeatIndex, amount: Chips) -> Result<HandStatus, EngineError> {
        self.act(seat, PlayerActionKind::Bet(amount))
    }

    pub fn all_in(&mut self, seat: SeatIndex) -> Result<HandStatus, EngineError> {
        self.act(seat, PlayerActionKind::AllIn)
    }

    /// Чей сейчас ход.
    pub fn turn_seat(&self) -> Option<SeatIndex> {
        self.active_hand().and_then(|h| h.current_actor)
    }

    pub fn street(&self) -> Option<Street> {
        self.hand.as_ref().map(|h| h.street)
    }

    pub fn board(&self) -> &[Card] {
        self.hand.as_ref().map(|h| h.board.as_slice()).unwrap_or(&[])
    }

    /// Фишки прошлых улиц (без ставок текущей).
    pub fn pot(&self) -> Chips {
        self.active_hand().map(|h| h.pot.total).unwrap_or(Chips::ZERO)
    }

    /// Ставки текущей улицы по местам.
    pub fn bets(&self) -> Vec<(SeatIndex, Chips)> {
        self.table
            .occupied()
            .map(|(seat, p)| (seat, p.current_bet))
            .collect()
    }

    /// Слои банка, которые получились бы при текущих вкладах.
    /// Вне раздачи – пусто.
    pub fn side_pots(&self) -> Vec<SidePot> {
        if self.active_hand().is_none() {
            return Vec::new();
        }
        compute_side_pots(&table_contributions(&self.table))
    }

    pub fn legal_actions(&self) -> Option<LegalActions> {
        self.active_hand().and_then(|h| legal_actions(&self.table, h))
    }

    /// Итог последней завершённой раздачи.
    pub fn last_result(&self) -> Option<&HandSummary> {
        self.hand.as_ref().and_then(|h| h.summary.as_ref())
    }

    pub fn history(&self) -> Option<&HandHistory> {
        self.hand.as_ref().map(|h| &h.history)
    }

    pub fn eliminated(&self) -> &[EliminatedPlayer] {
        &self.table.eliminated
    }

    /// Стол закончен: для следующей раздачи не хватает игроков.
    pub fn is_over(&self) -> bool {
        !self.table.hand_in_progress
            && self.table.hands_played > 0
            && self.table.count_ready_for_hand() < self.table.config.min_players as usize
    }

    fn active_hand(&self) -> Option<&HandEngine> {
        self.hand.as_ref().filter(|h| !h.is_finished())
    }
}
