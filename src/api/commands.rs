use log::debug;
use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::{PlayerId, SeatIndex};
use crate::engine::actions::PlayerAction;
use crate::engine::{CashTable, HandEvaluator, RandomSource};

use super::dto::{map_hand_status_to_response, CommandResponse};
use super::errors::ApiError;
use super::queries::build_table_view;

/// Команды, которые меняют состояние стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Command {
    /// Посадить игрока за стол.
    SeatPlayer(SeatPlayerCommand),

    /// Убрать игрока с места (посреди раздачи – фолд).
    RemovePlayer(RemovePlayerCommand),

    /// Запустить новую раздачу (если сейчас нет активной).
    StartHand,

    /// Действие игрока в раздаче.
    PlayerAction(PlayerActionCommand),
}

impl Command {
    pub fn from_json(json: &str) -> Result<Self, ApiError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Посадить игрока на первое свободное место.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatPlayerCommand {
    pub player_id: PlayerId,
    pub display_name: String,
    pub buy_in: Chips,
}

/// Убрать игрока с места.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemovePlayerCommand {
    pub seat_index: SeatIndex,
}

/// Действие игрока в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerActionCommand {
    pub action: PlayerAction,
}

/// Выполнить команду над столом.
pub fn handle_command<R, E>(table: &mut CashTable<R, E>, command: Command) -> Result<CommandResponse, ApiError>
where
    R: RandomSource,
    E: HandEvaluator,
{
    debug!("команда {:?}", command);
    let status = match command {
        Command::SeatPlayer(cmd) => {
            let seat_index = table.sit_down(cmd.player_id, cmd.display_name, cmd.buy_in)?;
            return Ok(CommandResponse::Seated {
                seat_index,
                table: build_table_view(table, Some(cmd.player_id)),
            });
        }
        Command::RemovePlayer(cmd) => table.stand_up(cmd.seat_index)?,
        Command::StartHand => table.start_hand()?,
        Command::PlayerAction(cmd) => table.act(cmd.action.seat, cmd.action.kind)?,
    };

    Ok(map_hand_status_to_response(status, build_table_view(table, None)))
}
