use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::player::PlayerAtTable;
use crate::domain::table::Table;
use crate::domain::SeatIndex;
use crate::engine::actions::{PlayerAction, PlayerActionKind, ValidatedAction};
use crate::engine::errors::ActionError;
use crate::engine::game_loop::HandEngine;

/// Проверка, может ли место выполнить это действие при текущем состоянии ставок.
///
/// Только читает состояние: при ошибке стол и раздача остаются как были.
pub fn validate_action(
    table: &Table,
    engine: &HandEngine,
    action: &PlayerAction,
) -> Result<ValidatedAction, ActionError> {
    let seat = action.seat;
    if engine.current_actor != Some(seat) {
        return Err(ActionError::NotPlayersTurn {
            expected: engine.current_actor,
            actual: seat,
        });
    }

    let player = match table.player(seat) {
        Some(p) if p.can_act() => p,
        _ => return Err(ActionError::SeatCannotAct(seat)),
    };

    let max_bet = table.max_bet();
    let stack = player.stack;
    let to_call = diff_to_call(player, max_bet);
    let big_blind = table.config.big_blind;
    let last_raise = engine.betting.last_raise;

    match action.kind {
        PlayerActionKind::Fold => Ok(ValidatedAction::Fold),

        PlayerActionKind::Check => {
            if can_check(engine, seat, max_bet, big_blind) {
                Ok(ValidatedAction::Check)
            } else {
                Err(ActionError::CannotCheck { to_call })
            }
        }

        PlayerActionKind::Call => {
            if stack < to_call {
                return Err(ActionError::NotEnoughChips {
                    needed: to_call,
                    available: stack,
                });
            }
            Ok(ValidatedAction::Call(to_call))
        }

        PlayerActionKind::Bet(amount) => {
            if amount > stack {
                return Err(ActionError::NotEnoughChips {
                    needed: amount,
                    available: stack,
                });
            }
            if amount < big_blind {
                return Err(ActionError::BetBelowBigBlind { amount, big_blind });
            }

            let new_bet = amount + player.current_bet;
            if new_bet <= max_bet {
                return Err(ActionError::BetIsCall);
            }
            if new_bet < last_raise + max_bet {
                return Err(ActionError::RaiseTooSmall {
                    minimum: (last_raise + max_bet).saturating_sub(player.current_bet),
                });
            }
            if !max_bet.is_zero() && !engine.betting.can_raise(seat) {
                return Err(ActionError::RaiseNotReopened);
            }

            Ok(ValidatedAction::Bet {
                amount,
                raise_size: new_bet - max_bet,
            })
        }

        PlayerActionKind::AllIn => {
            let new_bet = stack + player.current_bet;
            let increment = new_bet.saturating_sub(max_bet);

            if !increment.is_zero() && !max_bet.is_zero() && !engine.betting.can_raise(seat) {
                return Err(ActionError::RaiseNotReopened);
            }

            let full_raise = if increment >= last_raise && !increment.is_zero() {
                Some(increment)
            } else {
                None
            };
            Ok(ValidatedAction::AllIn {
                amount: stack,
                full_raise,
            })
        }
    }
}

/// Check легален без ставок на улице, а на префлопе – большому блайнду,
/// если никто не повышал сверх блайнда.
fn can_check(engine: &HandEngine, seat: SeatIndex, max_bet: Chips, big_blind: Chips) -> bool {
    max_bet.is_zero()
        || (engine.street == Street::Deal
            && engine.big_blind_seat == Some(seat)
            && max_bet <= big_blind)
}

/// Сколько фишек нужно добавить игроку, чтобы уравнять наибольшую ставку.
pub fn diff_to_call(player: &PlayerAtTable, max_bet: Chips) -> Chips {
    max_bet.saturating_sub(player.current_bet)
}

/// Границы суммы, которую можно добавить к ставке (включительно).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BetBounds {
    pub min: Chips,
    pub max: Chips,
}

/// Что может сделать место, чей сейчас ход.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LegalActions {
    pub seat: SeatIndex,
    pub to_call: Chips,
    pub can_check: bool,
    pub can_call: bool,
    /// Открывающий бет (на улице ещё нет ставок).
    pub bet: Option<BetBounds>,
    /// Рейз поверх существующей ставки.
    pub raise: Option<BetBounds>,
    /// Сколько уйдёт в олл-ин.
    pub all_in: Option<Chips>,
}

/// Набор легальных действий для места, чей сейчас ход. Fold легален всегда.
pub fn legal_actions(table: &Table, engine: &HandEngine) -> Option<LegalActions> {
    let seat = engine.current_actor?;
    let player = table.player(seat).filter(|p| p.can_act())?;

    let max_bet = table.max_bet();
    let big_blind = table.config.big_blind;
    let to_call = diff_to_call(player, max_bet);
    let can_check = can_check(engine, seat, max_bet, big_blind);

    let min_add = big_blind.max((max_bet + engine.betting.last_raise).saturating_sub(player.current_bet));
    let bounds = if player.stack >= min_add {
        Some(BetBounds {
            min: min_add,
            max: player.stack,
        })
    } else {
        None
    };
    let reopened = max_bet.is_zero() || engine.betting.can_raise(seat);

    let (bet, raise) = if !reopened {
        (None, None)
    } else if max_bet.is_zero() {
        (bounds, None)
    } else {
        (None, bounds)
    };

    let all_in_raises = player.stack > to_call;
    let all_in = if player.stack.is_zero() || (all_in_raises && !reopened) {
        None
    } else {
        Some(player.stack)
    };

    Some(LegalActions {
        seat,
        to_call,
        can_check,
        // нулевой call легален наравне с check
        can_call: player.stack >= to_call,
        bet,
        raise,
        all_in,
    })
}
