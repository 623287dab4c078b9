use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{HandRank, HandSummary, Street};
use crate::domain::player::PlayerStatus;
use crate::domain::{HandId, PlayerId, SeatIndex};
use crate::engine::{HandStatus, SidePot};

/// DTO игрока за столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAtTableDto {
    pub player_id: PlayerId,
    pub display_name: String,
    pub seat_index: SeatIndex,
    pub stack: Chips,
    pub current_bet: Chips,
    pub total_bet: Chips,
    pub status: PlayerStatus,
    pub leaving: bool,
    /// Карманные карты – только для "героя".
    pub hole_cards: Option<Vec<Card>>,
}

/// DTO стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableViewDto {
    pub max_seats: u8,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub hand_id: Option<HandId>,
    pub street: Option<Street>,
    pub dealer_button: Option<SeatIndex>,
    /// Фишки прошлых улиц.
    pub pot: Chips,
    /// Слои банка при текущих вкладах.
    pub side_pots: Vec<SidePot>,
    pub board: Vec<Card>,
    pub players: Vec<PlayerAtTableDto>,
    /// Есть ли активная раздача.
    pub hand_in_progress: bool,
    /// Текущий игрок, чей ход (если раздача идёт).
    pub current_actor_seat: Option<SeatIndex>,
    pub is_over: bool,
}

/// Результат одного игрока в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandPlayerResultDto {
    pub player_id: PlayerId,
    pub seat_index: SeatIndex,
    pub contributed: Chips,
    pub won: Chips,
    /// Выигрыш минус вклад.
    pub net_chips: i64,
    pub is_winner: bool,
    pub rank: Option<HandRank>,
    pub label: Option<String>,
}

/// DTO завершённой раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandResultDto {
    pub hand_id: HandId,
    pub street_reached: Street,
    pub board: Vec<Card>,
    pub total_pot: Chips,
    pub pots: Vec<SidePot>,
    pub players: Vec<HandPlayerResultDto>,
}

impl From<&HandSummary> for HandResultDto {
    fn from(summary: &HandSummary) -> Self {
        let players = summary
            .results
            .iter()
            .map(|r| HandPlayerResultDto {
                player_id: r.player_id,
                seat_index: r.seat,
                contributed: r.contributed,
                won: r.won,
                net_chips: r.won.0 as i64 - r.contributed.0 as i64,
                is_winner: r.is_winner,
                rank: r.strength.as_ref().map(|s| s.rank),
                label: r.strength.as_ref().map(|s| s.label.clone()),
            })
            .collect();

        HandResultDto {
            hand_id: summary.hand_id,
            street_reached: summary.street_reached,
            board: summary.board.clone(),
            total_pot: summary.total_pot,
            pots: summary.pots.clone(),
            players,
        }
    }
}

/// Ответ API на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandResponse {
    /// Игрок посажен на место.
    Seated {
        seat_index: SeatIndex,
        table: TableViewDto,
    },

    /// Вернуть обновлённое состояние стола.
    TableState(TableViewDto),

    /// Раздача завершилась этой командой.
    HandFinished {
        table: TableViewDto,
        result: HandResultDto,
    },
}

/// Помощник: преобразование HandStatus движка в ответ.
pub fn map_hand_status_to_response(status: HandStatus, table: TableViewDto) -> CommandResponse {
    match status {
        HandStatus::Ongoing => CommandResponse::TableState(table),
        HandStatus::Finished(summary) => CommandResponse::HandFinished {
            table,
            result: HandResultDto::from(&summary),
        },
    }
}
