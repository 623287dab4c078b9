use serde::{Deserialize, Serialize};

use crate::domain::table::EliminatedPlayer;
use crate::domain::PlayerId;
use crate::engine::{CashTable, HandEvaluator, LegalActions, RandomSource};

use super::dto::{HandResultDto, PlayerAtTableDto, TableViewDto};

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Query {
    /// Состояние стола. Карманные карты видны только `hero`.
    TableView { hero: Option<PlayerId> },

    /// Легальные действия для места, чей сейчас ход.
    LegalActions,

    /// Итог последней завершённой раздачи.
    LastHand,

    /// Все вылетевшие игроки.
    Eliminated,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum QueryResponse {
    Table(TableViewDto),
    LegalActions(Option<LegalActions>),
    LastHand(Option<HandResultDto>),
    Eliminated(Vec<EliminatedPlayer>),
}

pub fn handle_query<R, E>(table: &CashTable<R, E>, query: &Query) -> QueryResponse
where
    R: RandomSource,
    E: HandEvaluator,
{
    match query {
        Query::TableView { hero } => QueryResponse::Table(build_table_view(table, *hero)),
        Query::LegalActions => QueryResponse::LegalActions(table.legal_actions()),
        Query::LastHand => QueryResponse::LastHand(table.last_result().map(HandResultDto::from)),
        Query::Eliminated => QueryResponse::Eliminated(table.eliminated().to_vec()),
    }
}

/// Сформировать DTO стола. `hero` видит свои карманные карты.
pub fn build_table_view<R, E>(cash: &CashTable<R, E>, hero: Option<PlayerId>) -> TableViewDto
where
    R: RandomSource,
    E: HandEvaluator,
{
    let table = cash.table();
    let players = table
        .occupied()
        .map(|(seat, p)| PlayerAtTableDto {
            player_id: p.player_id,
            display_name: p.name.clone(),
            seat_index: seat,
            stack: p.stack,
            current_bet: p.current_bet,
            total_bet: p.total_bet,
            status: p.status,
            leaving: p.leaving,
            hole_cards: (hero == Some(p.player_id)).then(|| p.hole_cards.clone()),
        })
        .collect();

    TableViewDto {
        max_seats: table.max_seats(),
        small_blind: table.config.small_blind,
        big_blind: table.config.big_blind,
        hand_id: cash.hand().map(|h| h.hand_id),
        street: cash.street(),
        dealer_button: table.dealer_button,
        pot: cash.pot(),
        side_pots: cash.side_pots(),
        board: cash.board().to_vec(),
        players,
        hand_in_progress: cash.hand_in_progress(),
        current_actor_seat: cash.turn_seat(),
        is_over: cash.is_over(),
    }
}
