use serde::{Deserialize, Serialize};

use crate::domain::table::Table;
use crate::domain::{chips::Chips, SeatIndex};

/// Слой банка: часть фишек, которую могут выиграть только некоторые игроки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SidePot {
    pub amount: Chips,
    /// Кто внёс фишки в этот слой (включая сфолдивших).
    pub contributors: Vec<SeatIndex>,
    /// Кто претендует на слой.
    pub eligible_seats: Vec<SeatIndex>,
    /// Кто забрал слой. Пусто, пока банк не разыгран.
    pub winners: Vec<SeatIndex>,
}

/// Вклад одного места в банк за раздачу.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contribution {
    pub seat: SeatIndex,
    pub amount: Chips,
    /// Не сфолдил – претендует на банк.
    pub live: bool,
}

/// Посчитать слои банка по суммарным вкладам игроков.
///
/// Уровни задают вклады живых мест; фишки сфолдивших попадают в слои
/// наравне со всеми, но права на них не дают. Всё, что выше максимального
/// живого вклада, уходит в последний слой.
/// Выход: слои в порядке "от младших" к "старшим".
pub fn compute_side_pots(contributions: &[Contribution]) -> Vec<SidePot> {
    let mut levels: Vec<Chips> = contributions
        .iter()
        .filter(|c| c.live && !c.amount.is_zero())
        .map(|c| c.amount)
        .collect();
    levels.sort();
    levels.dedup();

    let mut pots = Vec::new();
    let mut prev_level = Chips::ZERO;
    let last = levels.len().saturating_sub(1);

    for (i, &level) in levels.iter().enumerate() {
        let mut amount = Chips::ZERO;
        let mut contributors = Vec::new();
        for c in contributions {
            // верхний слой забирает и излишек сфолдивших
            let cap = if i == last { c.amount } else { c.amount.min(level) };
            let part = cap.saturating_sub(c.amount.min(prev_level));
            if !part.is_zero() {
                amount += part;
                contributors.push(c.seat);
            }
        }

        let eligible_seats = contributions
            .iter()
            .filter(|c| c.live && c.amount >= level)
            .map(|c| c.seat)
            .collect();

        if !amount.is_zero() {
            pots.push(SidePot {
                amount,
                contributors,
                eligible_seats,
                winners: Vec::new(),
            });
        }
        prev_level = level;
    }

    pots
}

/// Вклады мест стола: уже внесённое за раздачу плюс ставка текущей улицы.
pub fn table_contributions(table: &Table) -> Vec<Contribution> {
    table
        .occupied()
        .map(|(seat, p)| Contribution {
            seat,
            amount: p.total_bet + p.current_bet,
            live: p.is_in_hand(),
        })
        .filter(|c| !c.amount.is_zero())
        .collect()
}
