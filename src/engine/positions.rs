use crate::domain::chips::Chips;
use crate::domain::player::PlayerAtTable;
use crate::domain::{SeatIndex, Table};

/// Следующее по кругу место, игрок на котором удовлетворяет `pred`.
pub fn next_seat_where(
    table: &Table,
    start: SeatIndex,
    include_start: bool,
    pred: impl Fn(&PlayerAtTable) -> bool,
) -> Option<SeatIndex> {
    let max = table.seats.len();
    if max == 0 {
        return None;
    }

    let mut idx = start as usize % max;
    if !include_start {
        idx = (idx + 1) % max;
    }

    for _ in 0..max {
        if let Some(p) = table.seats[idx].as_ref() {
            if pred(p) {
                return Some(idx as SeatIndex);
            }
        }
        idx = (idx + 1) % max;
    }

    None
}

/// Все места, удовлетворяющие `pred`, по кругу начиная с start (включительно).
pub fn collect_seats_from(
    table: &Table,
    start: SeatIndex,
    pred: impl Fn(&PlayerAtTable) -> bool,
) -> Vec<SeatIndex> {
    let max = table.seats.len();
    let mut seats = Vec::new();
    if max == 0 {
        return seats;
    }

    let mut idx = start as usize % max;
    for _ in 0..max {
        if let Some(p) = table.seats[idx].as_ref() {
            if pred(p) {
                seats.push(idx as SeatIndex);
            }
        }
        idx = (idx + 1) % max;
    }
    seats
}

/// Предложить следующую позицию дилера среди мест, участвующих в раздаче:
/// - если есть текущая кнопка – следующее такое место;
/// - если нет – первое по индексу.
pub fn next_dealer(table: &Table) -> Option<SeatIndex> {
    match table.dealer_button {
        Some(button) => next_seat_where(table, button, false, PlayerAtTable::is_in_hand),
        None => next_seat_where(table, 0, true, PlayerAtTable::is_in_hand),
    }
}

/// Места малого и большого блайндов для раздачи с кнопкой на `dealer`.
///
/// Хедз-ап: дилер ставит малый блайнд, соперник – большой.
pub fn blind_seats(table: &Table, dealer: SeatIndex) -> Option<(SeatIndex, SeatIndex)> {
    let order = collect_seats_from(table, dealer, PlayerAtTable::is_in_hand);
    match order.len() {
        0 | 1 => None,
        2 => Some((order[0], order[1])),
        _ => Some((order[1], order[2])),
    }
}

/// Следующее место после `after`, которому ещё нужно принять решение на этой улице.
///
/// Пропускает сфолдивших, олл-ин, ожидающих и тех, кто уже походил и уравнял ставку.
/// Если таких нет – `None`, раунд закончит детектор конца улицы.
pub fn next_to_act(table: &Table, after: SeatIndex) -> Option<SeatIndex> {
    let max_bet = table.max_bet();
    next_seat_where(table, after, false, |p| needs_action(p, max_bet))
}

/// Месту ещё нужно решение: оно может действовать и либо не ходило,
/// либо не уравняло наибольшую ставку.
pub fn needs_action(player: &PlayerAtTable, max_bet: Chips) -> bool {
    player.can_act() && (!player.has_acted || player.current_bet < max_bet)
}
