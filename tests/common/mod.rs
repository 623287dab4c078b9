//! Общие помощники интеграционных тестов: конфиг стола, оракул с
//! заданными рангами и RNG без перемешивания.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use holdem_engine::domain::{Card, Chips, HandRank, HandStrength, SeatIndex, TableConfig};
use holdem_engine::engine::{CashTable, HandEvaluator, RandomSource};
use holdem_engine::infra::DeterministicRng;

/// RNG, который ничего не перемешивает: колода всегда в стандартном порядке.
#[derive(Clone, Debug, Default)]
pub struct NoShuffle;

impl RandomSource for NoShuffle {
    fn shuffle<T>(&mut self, _slice: &mut [T]) {}
}

/// Тестовый оракул: ранг руки задаётся по первой карманной карте игрока.
/// Незарегистрированная рука получает ранг 0.
#[derive(Clone, Debug, Default)]
pub struct FixedRanks {
    ranks: Rc<RefCell<HashMap<Card, u32>>>,
}

impl FixedRanks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, hole: &[Card], rank: u32) {
        if let Some(first) = hole.first() {
            self.ranks.borrow_mut().insert(*first, rank);
        }
    }
}

impl HandEvaluator for FixedRanks {
    fn evaluate(&self, hole: &[Card], _board: &[Card]) -> HandStrength {
        let rank = hole
            .first()
            .and_then(|c| self.ranks.borrow().get(c).copied())
            .unwrap_or(0);
        HandStrength {
            rank: HandRank(rank),
            label: format!("rank {rank}"),
        }
    }
}

pub type TestTable = CashTable<DeterministicRng, FixedRanks>;

pub fn config(small_blind: u64, big_blind: u64) -> TableConfig {
    TableConfig::new(
        Chips(small_blind),
        Chips(big_blind),
        2,
        6,
        Chips(1),
        Chips(100_000),
    )
}

/// Стол с блайндами 50/100 и игроками на местах 0..stacks.len().
/// PlayerId = seat + 1. Возвращает стол и общий с ним оракул.
pub fn table_with_stacks(stacks: &[u64]) -> (TestTable, FixedRanks) {
    table_with_blinds(50, 100, stacks)
}

pub fn table_with_blinds(small_blind: u64, big_blind: u64, stacks: &[u64]) -> (TestTable, FixedRanks) {
    let oracle = FixedRanks::new();
    let mut table = CashTable::new(
        config(small_blind, big_blind),
        DeterministicRng::from_u64(7),
        oracle.clone(),
    )
    .expect("valid config");
    for (i, &stack) in stacks.iter().enumerate() {
        let seat = table
            .sit_down(i as u64 + 1, format!("player{}", i + 1), Chips(stack))
            .expect("sit_down must succeed");
        assert_eq!(seat as usize, i);
    }
    (table, oracle)
}

/// Назначить ранги рукам, уже розданным в текущей раздаче.
pub fn assign_ranks<R: RandomSource>(table: &CashTable<R, FixedRanks>, oracle: &FixedRanks, ranks: &[(SeatIndex, u32)]) {
    for &(seat, rank) in ranks {
        let player = table.table().player(seat).expect("seat must be occupied");
        oracle.set(&player.hole_cards, rank);
    }
}

pub fn stack_of<R: RandomSource, E: HandEvaluator>(table: &CashTable<R, E>, seat: SeatIndex) -> u64 {
    table.table().player(seat).map(|p| p.stack.0).unwrap_or(0)
}

/// pot + Σ ставок + Σ стеков – должно быть постоянным на всю раздачу.
pub fn chips_in_play<R: RandomSource, E: HandEvaluator>(table: &CashTable<R, E>) -> u64 {
    let pot = table
        .hand()
        .filter(|h| !h.is_finished())
        .map(|h| h.pot.total.0)
        .unwrap_or(0);
    pot + table.table().total_current_bets().0 + table.table().total_stacks().0
}
