// tests/engine_stress_tests.rs
//
// Стресс-тесты: случайные легальные действия на столах от 2 до 6 игроков.
//
// 1) random_legal_play_conserves_chips (proptest)
//    - Случайные стеки, seed колоды и последовательность решений.
//    - Каждое действие выбирается из `legal_actions` и обязано приниматься.
//    - После каждого действия: банк + ставки + стеки постоянны.
//    - После каждой раздачи: вклады и выплаты равны банку.
//
// 2) long_session_until_table_is_over
//    - Один стол гоняем до тех пор, пока не останется один игрок.

mod common;

use common::{chips_in_play, config};
use holdem_engine::domain::Chips;
use holdem_engine::engine::{CashTable, HandStatus, LegalActions, PlayerActionKind};
use holdem_engine::eval::StandardEvaluator;
use holdem_engine::infra::DeterministicRng;
use proptest::prelude::*;

type StressTable = CashTable<DeterministicRng, StandardEvaluator>;

const MAX_ACTIONS_PER_HAND: usize = 200;

fn make_table(seed: u64, stacks: &[u64]) -> StressTable {
    let mut table = CashTable::new(config(50, 100), DeterministicRng::from_u64(seed), StandardEvaluator).unwrap();
    for (i, &stack) in stacks.iter().enumerate() {
        table
            .sit_down(i as u64 + 1, format!("bot{i}"), Chips(stack))
            .unwrap();
    }
    table
}

/// Выбрать легальное действие по "решению" бота.
fn pick_action(legal: &LegalActions, decision: u8, fraction: u8) -> PlayerActionKind {
    let sized = |min: Chips, max: Chips| {
        let span = max.0 - min.0;
        Chips(min.0 + span * u64::from(fraction) / 255)
    };
    match decision % 6 {
        0 if !legal.can_check => PlayerActionKind::Fold,
        1 | 0 => {
            if legal.can_check {
                PlayerActionKind::Check
            } else if legal.can_call {
                PlayerActionKind::Call
            } else {
                PlayerActionKind::Fold
            }
        }
        2 | 3 => match legal.bet.or(legal.raise) {
            Some(bounds) => PlayerActionKind::Bet(sized(bounds.min, bounds.max)),
            None if legal.can_call => PlayerActionKind::Call,
            None if legal.can_check => PlayerActionKind::Check,
            None => PlayerActionKind::Fold,
        },
        4 => match legal.all_in {
            Some(_) => PlayerActionKind::AllIn,
            None if legal.can_call => PlayerActionKind::Call,
            None => PlayerActionKind::Fold,
        },
        _ => {
            if legal.can_check {
                PlayerActionKind::Check
            } else {
                PlayerActionKind::Fold
            }
        }
    }
}

/// Сыграть одну раздачу до конца, проверяя сохранение фишек на каждом шаге.
fn play_hand(table: &mut StressTable, decisions: &mut impl Iterator<Item = (u8, u8)>) -> Result<(), TestCaseError> {
    let total = chips_in_play(table);
    let mut status = table.start_hand().map_err(|e| TestCaseError::fail(e.to_string()))?;

    for _ in 0..MAX_ACTIONS_PER_HAND {
        if let HandStatus::Finished(summary) = &status {
            let contributed: Chips = summary.results.iter().map(|r| r.contributed).sum();
            let won: Chips = summary.results.iter().map(|r| r.won).sum();
            prop_assert_eq!(contributed, summary.total_pot);
            prop_assert_eq!(won, summary.total_pot);
            prop_assert_eq!(table.table().total_stacks().0, total);
            prop_assert!(summary.winners().count() >= 1);
            return Ok(());
        }

        let legal = table
            .legal_actions()
            .ok_or_else(|| TestCaseError::fail("ongoing hand without a seat to act"))?;
        let (decision, fraction) = decisions.next().unwrap_or((0, 0));
        let kind = pick_action(&legal, decision, fraction);

        status = match table.act(legal.seat, kind) {
            Ok(s) => s,
            Err(e) => {
                return Err(TestCaseError::fail(format!(
                    "legal action {kind:?} rejected for seat {}: {e}",
                    legal.seat
                )))
            }
        };
        if table.hand_in_progress() {
            prop_assert_eq!(chips_in_play(table), total);
        }
    }
    Err(TestCaseError::fail("hand did not finish"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Случайные легальные действия никогда не отклоняются и не теряют фишек.
    #[test]
    fn random_legal_play_conserves_chips(
        seed in any::<u64>(),
        stacks in prop::collection::vec(60u64..5_000, 2..=6),
        decisions in prop::collection::vec((any::<u8>(), any::<u8>()), 50..400),
        hands in 1usize..6,
    ) {
        let mut table = make_table(seed, &stacks);
        let mut decisions = decisions.into_iter().cycle();

        for _ in 0..hands {
            if table.is_over() {
                break;
            }
            play_hand(&mut table, &mut decisions)?;
        }
        prop_assert_eq!(
            table.table().total_stacks().0,
            stacks.iter().sum::<u64>()
        );
    }
}

#[test]
fn long_session_until_table_is_over() {
    let mut table = make_table(2024, &[1_000, 1_500, 800, 2_000]);
    let mut decisions = (0u8..=255).flat_map(|d| [(d, d.wrapping_mul(7)), (4, 255)]).cycle();

    let mut hands = 0;
    while !table.is_over() && hands < 2_000 {
        play_hand(&mut table, &mut decisions).expect("hand must play out");
        hands += 1;
    }
    assert!(table.is_over(), "один из стеков должен собрать все фишки");
    assert_eq!(table.table().total_stacks(), Chips(5_300));
    assert_eq!(table.eliminated().len(), 3);
}
