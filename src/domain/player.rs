use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::PlayerId;

/// Статус игрока в контексте текущей раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerStatus {
    /// Участвует в раздаче и может действовать.
    Active,
    /// Сфолдил и больше не претендует на банк.
    Folded,
    /// Поставил весь стек – действий больше нет, но претендует на банк.
    AllIn,
    /// Сел за стол посреди раздачи, вступит со следующей.
    Waiting,
}

/// Состояние игрока за конкретным местом.
///
/// Ставки хранятся прямо здесь, а не в параллельных массивах по индексу места.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAtTable {
    pub player_id: PlayerId,
    pub name: String,
    /// Текущий стек за столом.
    pub stack: Chips,
    /// Ставка в текущем раунде (`bets[seat]`). Обнуляется на каждой новой улице.
    pub current_bet: Chips,
    /// Сколько внесено в банк за всю раздачу (`roundBets[seat]`).
    /// Только растёт и читается только при расчёте банка.
    pub total_bet: Chips,
    pub status: PlayerStatus,
    /// Действовал ли игрок на текущей улице.
    pub has_acted: bool,
    /// Встал из-за стола посреди раздачи – место освободится после неё.
    pub leaving: bool,
    /// Карманные карты (0 или 2).
    pub hole_cards: Vec<Card>,
}

impl PlayerAtTable {
    pub fn new(player_id: PlayerId, name: impl Into<String>, stack: Chips) -> Self {
        Self {
            player_id,
            name: name.into(),
            stack,
            current_bet: Chips::ZERO,
            total_bet: Chips::ZERO,
            status: PlayerStatus::Active,
            has_acted: false,
            leaving: false,
            hole_cards: Vec::new(),
        }
    }

    /// Претендует ли на банк текущей раздачи.
    pub fn is_in_hand(&self) -> bool {
        matches!(self.status, PlayerStatus::Active | PlayerStatus::AllIn)
    }

    /// Может ли ещё принимать решения (не сфолдил, не в олл-ине, не ждёт).
    pub fn can_act(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    /// Сбросить флаги перед новой раздачей.
    pub fn reset_for_new_hand(&mut self) {
        self.status = PlayerStatus::Active;
        self.current_bet = Chips::ZERO;
        self.total_bet = Chips::ZERO;
        self.has_acted = false;
        self.hole_cards.clear();
    }

    /// Снять со стека до `amount` фишек в текущую ставку.
    /// Возвращает фактически поставленное; обнулившийся стек = олл-ин.
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let paid = amount.min(self.stack);
        self.stack -= paid;
        self.current_bet += paid;
        if self.stack.is_zero() && self.status == PlayerStatus::Active {
            self.status = PlayerStatus::AllIn;
        }
        paid
    }

    /// Перенести ставку текущего раунда в общий вклад за раздачу.
    pub fn sweep_bet(&mut self) -> Chips {
        let bet = self.current_bet;
        self.total_bet += bet;
        self.current_bet = Chips::ZERO;
        bet
    }
}
