//! Сайд-поты и расчёт банка через настоящий игровой цикл.
//!
//! Здесь мы проверяем:
//! - короткий олл-ин выигрывает только свой слой;
//! - деление слоёв при ничьей;
//! - возврат неуравненного излишка;
//! - предпросмотр слоёв по ходу раздачи (`side_pots`);
//! - мёртвые деньги сфолдивших.

mod common;

use common::{assign_ranks, chips_in_play, stack_of, table_with_stacks};
use holdem_engine::domain::{Chips, SeatIndex, Street};
use holdem_engine::engine::{compute_side_pots, Contribution, HandStatus, SidePot};

/// Утилита: (amount, eligible_seats) из SidePot.
fn pot_info(p: &SidePot) -> (u64, Vec<SeatIndex>) {
    (p.amount.0, p.eligible_seats.clone())
}

fn contribution(seat: SeatIndex, amount: u64, live: bool) -> Contribution {
    Contribution {
        seat,
        amount: Chips(amount),
        live,
    }
}

/// A=1000, B=1000, C=150 на местах 0/1/2. Дилер 0, SB – B, BB – C.
///
/// Префлоп: A рейз до 300, B колл, C олл-ин на 150.
/// Флоп: B бет 200, A колл. Тёрн: чек-чек. Ривер: B олл-ин 500, A колл.
/// Возвращает стол уже на шоудауне.
fn play_three_way_all_in(ranks: &[(SeatIndex, u32)]) -> (common::TestTable, HandStatus) {
    let (mut table, oracle) = table_with_stacks(&[1_000, 1_000, 150]);
    table.start_hand().unwrap();
    assign_ranks(&table, &oracle, ranks);
    let total = chips_in_play(&table);

    table.bet(0, Chips(300)).unwrap();
    table.call(1).unwrap();
    table.all_in(2).unwrap();
    assert_eq!(table.street(), Some(Street::Flop));
    assert_eq!(chips_in_play(&table), total);

    table.bet(1, Chips(200)).unwrap();
    table.call(0).unwrap();
    assert_eq!(table.street(), Some(Street::Turn));

    table.check(1).unwrap();
    table.check(0).unwrap();
    assert_eq!(table.street(), Some(Street::River));

    table.bet(1, Chips(500)).unwrap();
    let status = table.call(0).unwrap();
    (table, status)
}

/// ===============
/// TEST 1
/// ===============
/// C сильнее всех, A сильнее B: C берёт основной банк 450,
/// A – сайд-пот 1700, B вылетает.
#[test]
fn short_all_in_wins_main_pot_only() {
    let (table, status) = play_three_way_all_in(&[(0, 200), (1, 100), (2, 300)]);

    let HandStatus::Finished(summary) = status else {
        panic!("hand must be finished");
    };
    assert_eq!(summary.street_reached, Street::Showdown);
    assert_eq!(summary.total_pot, Chips(2_150));

    assert_eq!(summary.pots.len(), 2);
    assert_eq!(pot_info(&summary.pots[0]), (450, vec![0, 1, 2]));
    assert_eq!(summary.pots[0].winners, vec![2]);
    assert_eq!(pot_info(&summary.pots[1]), (1_700, vec![0, 1]));
    assert_eq!(summary.pots[1].winners, vec![0]);

    assert_eq!(stack_of(&table, 0), 1_700);
    assert_eq!(stack_of(&table, 2), 450);
    assert!(table.table().player(1).is_none(), "B вылетел с нулевым стеком");
    assert_eq!(table.eliminated().len(), 1);
    assert_eq!(table.eliminated()[0].player_id, 2);

    let b = summary.result_for(1).unwrap();
    assert_eq!(b.contributed, Chips(1_000));
    assert_eq!(b.won, Chips::ZERO);
    assert!(!b.is_winner);
}

/// ===============
/// TEST 2
/// ===============
/// Сильнейший – A: забирает оба слоя, C и B вылетают.
#[test]
fn best_hand_covering_everyone_takes_all_layers() {
    let (table, status) = play_three_way_all_in(&[(0, 300), (1, 100), (2, 200)]);
    assert!(matches!(status, HandStatus::Finished(_)));

    assert_eq!(stack_of(&table, 0), 2_150);
    assert_eq!(table.eliminated().len(), 2);
    assert!(table.is_over());
}

/// ===============
/// TEST 3
/// ===============
/// A и B делят оба слоя поровну, C проигрывает.
#[test]
fn tie_splits_every_layer() {
    let (table, status) = play_three_way_all_in(&[(0, 200), (1, 200), (2, 100)]);
    let HandStatus::Finished(summary) = status else {
        panic!("hand must be finished");
    };

    assert_eq!(summary.pots[0].winners, vec![0, 1]);
    assert_eq!(summary.pots[1].winners, vec![0, 1]);
    assert_eq!(stack_of(&table, 0), 1_075);
    assert_eq!(stack_of(&table, 1), 1_075);
    assert!(table.table().player(2).is_none());
}

/// ===============
/// TEST 4
/// ===============
/// Предпросмотр слоёв посреди раздачи: после префлопа C в олл-ине на 150.
#[test]
fn side_pots_preview_tracks_current_contributions() {
    let (mut table, _) = table_with_stacks(&[1_000, 1_000, 150]);
    table.start_hand().unwrap();
    assert_eq!(
        table.side_pots().iter().map(pot_info).collect::<Vec<_>>(),
        vec![(100, vec![1, 2]), (50, vec![2])]
    );

    table.bet(0, Chips(300)).unwrap();
    table.call(1).unwrap();
    table.all_in(2).unwrap();

    let pots = table.side_pots();
    assert_eq!(
        pots.iter().map(pot_info).collect::<Vec<_>>(),
        vec![(450, vec![0, 1, 2]), (300, vec![0, 1])]
    );
    let layered: Chips = pots.iter().map(|p| p.amount).sum();
    assert_eq!(layered, table.pot());
}

/// ===============
/// TEST 5
/// ===============
/// Неуравненный излишок возвращается: A ставит 1000, B может покрыть только 300.
#[test]
fn uncalled_excess_returns_to_bettor() {
    let (mut table, oracle) = table_with_stacks(&[1_000, 300]);
    table.start_hand().unwrap();
    assign_ranks(&table, &oracle, &[(0, 10), (1, 20)]);

    table.all_in(0).unwrap();
    let status = table.all_in(1).unwrap();
    let HandStatus::Finished(summary) = status else {
        panic!("both all-in: board runs out");
    };

    assert_eq!(summary.board.len(), 5);
    assert_eq!(pot_info(&summary.pots[0]), (600, vec![0, 1]));
    assert_eq!(summary.pots[0].winners, vec![1]);
    assert_eq!(pot_info(&summary.pots[1]), (700, vec![0]));
    assert_eq!(summary.pots[1].winners, vec![0]);

    assert_eq!(stack_of(&table, 0), 700);
    assert_eq!(stack_of(&table, 1), 600);
}

/// ===============
/// TEST 6
/// ===============
/// Слои по вкладам: фишки сфолдивших считаются, но прав не дают,
/// а всё выше живых уровней уходит в последний слой.
#[test]
fn compute_side_pots_with_folded_overbet() {
    let pots = compute_side_pots(&[
        contribution(0, 100, true),
        contribution(1, 300, false),
        contribution(2, 50, true),
    ]);

    assert_eq!(pots.len(), 2);
    assert_eq!(pot_info(&pots[0]), (150, vec![0, 2]));
    assert_eq!(pot_info(&pots[1]), (300, vec![0]));
    assert_eq!(pots[1].contributors, vec![0, 1]);
    assert!(pots.iter().all(|p| p.winners.is_empty()));
}

#[test]
fn compute_side_pots_four_way_all_in() {
    let pots = compute_side_pots(&[
        contribution(0, 50, true),
        contribution(1, 100, true),
        contribution(2, 200, true),
        contribution(3, 200, true),
    ]);

    assert_eq!(
        pots.iter().map(pot_info).collect::<Vec<_>>(),
        vec![
            (200, vec![0, 1, 2, 3]),
            (150, vec![1, 2, 3]),
            (200, vec![2, 3]),
        ]
    );
}

/// ===============
/// TEST 7
/// ===============
/// Игрок ставит и сбрасывает на рейз: его фишки остаются в банке победителя.
#[test]
fn folded_bet_stays_in_pot_for_winner() {
    let (mut table, _) = table_with_stacks(&[5_000, 5_000, 5_000]);
    table.start_hand().unwrap();

    table.bet(0, Chips(400)).unwrap();
    table.bet(1, Chips(1_150)).unwrap(); // до 1200
    table.fold(2).unwrap();
    let status = table.fold(0).unwrap();

    let HandStatus::Finished(summary) = status else {
        panic!("single player left");
    };
    assert_eq!(summary.street_reached, Street::Deal);
    assert_eq!(summary.total_pot, Chips(1_700));
    assert_eq!(stack_of(&table, 1), 5_500);
    assert_eq!(stack_of(&table, 0), 4_600);
    assert_eq!(stack_of(&table, 2), 4_900);
}
