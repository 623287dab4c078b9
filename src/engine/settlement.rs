//! Расчёт банка по слоям.
//!
//! Работает только на суммарных вкладах за раздачу и рангах рук.
//! Каждая итерация снимает один слой, ограниченный наименьшим вкладом
//! среди победителей-олл-инов, и делит его между победителями слоя.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::domain::chips::Chips;
use crate::domain::hand::HandRank;
use crate::domain::SeatIndex;
use crate::engine::side_pots::SidePot;

/// Вход расчёта для одного места.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettlementEntry {
    pub seat: SeatIndex,
    /// Сколько место внесло в банк за раздачу.
    pub contributed: Chips,
    /// Претендует ли на банк (не сфолдил).
    pub contending: bool,
    pub all_in: bool,
    /// Ранг руки. `None` – раздача кончилась без шоудауна.
    pub rank: Option<HandRank>,
}

/// Результат расчёта: слои в порядке розыгрыша и выплаты по местам.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Settlement {
    pub pots: Vec<SidePot>,
    pub awards: BTreeMap<SeatIndex, Chips>,
}

impl Settlement {
    pub fn total_awarded(&self) -> Chips {
        self.awards.values().sum()
    }

    pub fn award_for(&self, seat: SeatIndex) -> Chips {
        self.awards.get(&seat).copied().unwrap_or(Chips::ZERO)
    }
}

/// Разыграть банк.
///
/// Нечётные фишки при делении слоя достаются победителям по одной,
/// начиная с меньшего индекса места.
pub fn settle(entries: &[SettlementEntry]) -> Settlement {
    let mut entries: Vec<&SettlementEntry> = entries.iter().collect();
    entries.sort_by_key(|e| e.seat);

    let mut remaining: Vec<Chips> = entries.iter().map(|e| e.contributed).collect();
    let mut settled: BTreeSet<SeatIndex> = BTreeSet::new();
    let mut result = Settlement::default();

    loop {
        if remaining.iter().all(|r| r.is_zero()) {
            break;
        }

        for (i, e) in entries.iter().enumerate() {
            if e.contending && remaining[i].is_zero() {
                settled.insert(e.seat);
            }
        }

        let candidates: Vec<usize> = (0..entries.len())
            .filter(|&i| entries[i].contending && !settled.contains(&entries[i].seat))
            .collect();

        if candidates.is_empty() {
            award_dead_money(&entries, &mut remaining, &mut result);
            break;
        }

        let best = candidates.iter().map(|&i| entries[i].rank).max().flatten();
        let winners: Vec<usize> = candidates
            .iter()
            .copied()
            .filter(|&i| entries[i].rank == best)
            .collect();

        let capped = winners
            .iter()
            .filter(|&&i| entries[i].all_in)
            .map(|&i| remaining[i])
            .min();
        let layer = match capped {
            Some(cap) => cap,
            None => winners
                .iter()
                .map(|&i| remaining[i])
                .min()
                .unwrap_or(Chips::ZERO),
        };

        let mut amount = Chips::ZERO;
        let mut contributors = Vec::new();
        for (i, e) in entries.iter().enumerate() {
            let part = remaining[i].min(layer);
            if !part.is_zero() {
                remaining[i] -= part;
                amount += part;
                contributors.push(e.seat);
            }
        }

        let (share, odd) = amount.split(winners.len());
        for (n, &i) in winners.iter().enumerate() {
            let mut won = share;
            if (n as u64) < odd.0 {
                won += Chips(1);
            }
            *result.awards.entry(entries[i].seat).or_default() += won;
        }

        let winner_seats: Vec<SeatIndex> = winners.iter().map(|&i| entries[i].seat).collect();
        debug!(
            "слой банка {}: участники {:?}, победители {:?}",
            amount, contributors, winner_seats
        );

        result.pots.push(SidePot {
            amount,
            eligible_seats: candidates.iter().map(|&i| entries[i].seat).collect(),
            contributors,
            winners: winner_seats,
        });
    }

    result
}

/// Фишки сфолдивших выше уровня всех претендентов – мёртвые деньги:
/// они достаются победителям последнего слоя. Если слоёв нет (претенденты
/// ничего не внесли), деньги забирают лучшие из претендентов.
fn award_dead_money(
    entries: &[&SettlementEntry],
    remaining: &mut [Chips],
    result: &mut Settlement,
) {
    let leftovers: Vec<(SeatIndex, Chips)> = entries
        .iter()
        .zip(remaining.iter_mut())
        .map(|(e, r)| (e.seat, std::mem::take(r)))
        .filter(|(_, left)| !left.is_zero())
        .collect();

    if result.pots.is_empty() {
        match contenders_pot(entries) {
            Some(pot) => result.pots.push(pot),
            None => {
                // Претендентов нет вовсе: возвращаем владельцам.
                for (seat, left) in leftovers {
                    *result.awards.entry(seat).or_default() += left;
                }
                return;
            }
        }
    }
    let Some(last) = result.pots.last_mut() else {
        return;
    };

    let dead: Chips = leftovers.iter().map(|(_, left)| *left).sum();
    debug!("мёртвые деньги {} уходят местам {:?}", dead, last.winners);

    let (share, odd) = dead.split(last.winners.len());
    for (n, &seat) in last.winners.iter().enumerate() {
        let mut won = share;
        if (n as u64) < odd.0 {
            won += Chips(1);
        }
        *result.awards.entry(seat).or_default() += won;
    }
    last.amount += dead;
    for (seat, _) in leftovers {
        if !last.contributors.contains(&seat) {
            last.contributors.push(seat);
        }
    }
    last.contributors.sort_unstable();
}

/// Пустой слой для претендентов с нулевым вкладом: побеждает лучший ранг.
fn contenders_pot(entries: &[&SettlementEntry]) -> Option<SidePot> {
    let contenders: Vec<&SettlementEntry> = entries.iter().copied().filter(|e| e.contending).collect();
    let best = contenders.iter().map(|e| e.rank).max()?;
    Some(SidePot {
        amount: Chips::ZERO,
        contributors: Vec::new(),
        eligible_seats: contenders.iter().map(|e| e.seat).collect(),
        winners: contenders
            .iter()
            .filter(|e| e.rank == best)
            .map(|e| e.seat)
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(seat: SeatIndex, contributed: u64, rank: Option<u32>, all_in: bool) -> SettlementEntry {
        SettlementEntry {
            seat,
            contributed: Chips(contributed),
            contending: true,
            all_in,
            rank: rank.map(HandRank),
        }
    }

    fn folded(seat: SeatIndex, contributed: u64) -> SettlementEntry {
        SettlementEntry {
            seat,
            contributed: Chips(contributed),
            contending: false,
            all_in: false,
            rank: None,
        }
    }

    #[test]
    fn single_winner_takes_everything() {
        let s = settle(&[entry(0, 100, Some(5), false), entry(1, 100, Some(3), false), folded(2, 40)]);
        assert_eq!(s.award_for(0), Chips(240));
        assert_eq!(s.award_for(1), Chips::ZERO);
        assert_eq!(s.pots.len(), 1);
        assert_eq!(s.pots[0].contributors, vec![0, 1, 2]);
    }

    #[test]
    fn short_all_in_wins_only_capped_layer() {
        // C (место 2) сильнее всех, но внёс только 150
        let s = settle(&[
            entry(0, 600, Some(7), false),
            entry(1, 600, Some(4), false),
            entry(2, 150, Some(9), true),
        ]);
        assert_eq!(s.award_for(2), Chips(450));
        assert_eq!(s.award_for(0), Chips(900));
        assert_eq!(s.award_for(1), Chips::ZERO);
        assert_eq!(s.total_awarded(), Chips(1_350));
        assert_eq!(s.pots.len(), 2);
        assert_eq!(s.pots[0].winners, vec![2]);
        assert_eq!(s.pots[1].winners, vec![0]);
    }

    #[test]
    fn odd_chip_goes_to_lowest_seat() {
        let s = settle(&[entry(3, 50, Some(8), false), entry(1, 50, Some(8), false), folded(5, 1)]);
        assert_eq!(s.award_for(1), Chips(51));
        assert_eq!(s.award_for(3), Chips(50));
        assert_eq!(s.total_awarded(), Chips(101));
    }

    #[test]
    fn tie_with_odd_total_keeps_every_chip() {
        let s = settle(&[entry(0, 50, Some(2), false), entry(1, 50, Some(2), false), folded(2, 5)]);
        assert_eq!(s.award_for(0), Chips(53));
        assert_eq!(s.award_for(1), Chips(52));
        assert_eq!(s.total_awarded(), Chips(105));
    }

    #[test]
    fn fold_out_without_ranks_pays_last_player() {
        let s = settle(&[entry(4, 30, None, false), folded(0, 10), folded(1, 20)]);
        assert_eq!(s.award_for(4), Chips(60));
        assert_eq!(s.total_awarded(), Chips(60));
    }

    #[test]
    fn contender_without_chips_still_collects_folded_blinds() {
        let s = settle(&[entry(0, 0, None, false), folded(1, 50), folded(2, 100)]);
        assert_eq!(s.award_for(0), Chips(150));
        assert_eq!(s.award_for(1), Chips::ZERO);
        assert_eq!(s.award_for(2), Chips::ZERO);
        assert_eq!(s.pots.len(), 1);
        assert_eq!(s.pots[0].winners, vec![0]);
        assert_eq!(s.pots[0].contributors, vec![1, 2]);
    }

    #[test]
    fn folded_surplus_is_dead_money_for_last_winner() {
        let s = settle(&[entry(0, 100, Some(1), true), folded(1, 300)]);
        assert_eq!(s.award_for(0), Chips(400));
        assert_eq!(s.award_for(1), Chips::ZERO);
        assert_eq!(s.pots.len(), 1);
        assert_eq!(s.pots[0].amount, Chips(400));
    }

    #[test]
    fn tied_all_ins_at_different_levels() {
        let s = settle(&[
            entry(0, 100, Some(6), true),
            entry(1, 300, Some(6), true),
            entry(2, 500, Some(2), false),
        ]);
        // слой 100x3 делят 0 и 1; слой 200x2 – место 1; остаток 200 – место 2
        assert_eq!(s.award_for(0), Chips(150));
        assert_eq!(s.award_for(1), Chips(550));
        assert_eq!(s.award_for(2), Chips(200));
        assert_eq!(s.total_awarded(), Chips(900));
    }
}
