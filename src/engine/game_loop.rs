use std::collections::BTreeMap;

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::hand::{HandStrength, HandSummary, PlayerHandResult, Street};
use crate::domain::player::{PlayerAtTable, PlayerStatus};
use crate::domain::table::{EliminatedPlayer, Table};
use crate::domain::{HandId, SeatIndex};
use crate::engine::actions::{PlayerAction, ValidatedAction};
use crate::engine::betting::{is_round_complete, BettingState};
use crate::engine::errors::EngineError;
use crate::engine::hand_history::{HandEventKind, HandHistory};
use crate::engine::positions::{blind_seats, collect_seats_from, needs_action, next_dealer, next_to_act};
use crate::engine::pot::Pot;
use crate::engine::settlement::{settle, SettlementEntry};
use crate::engine::validation::validate_action;
use crate::engine::{HandEvaluator, RandomSource};

/// Статус раздачи для внешнего кода.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandStatus {
    Ongoing,
    Finished(HandSummary),
}

/// Внутреннее состояние раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandEngine {
    pub hand_id: HandId,
    pub deck: Deck,
    /// Текущая улица (`roundName`).
    pub street: Street,
    pub board: Vec<Card>,
    /// Фишки прошлых улиц и сфолдивших мест.
    pub pot: Pot,
    pub betting: BettingState,
    pub dealer_seat: SeatIndex,
    pub small_blind_seat: Option<SeatIndex>,
    pub big_blind_seat: Option<SeatIndex>,
    /// Чей сейчас ход (seat).
    pub current_actor: Option<SeatIndex>,
    /// История раздачи.
    pub history: HandHistory,
    /// Итог раздачи, когда она завершена.
    pub summary: Option<HandSummary>,
}

impl HandEngine {
    fn new(hand_id: HandId, deck: Deck, dealer_seat: SeatIndex, big_blind: Chips) -> Self {
        Self {
            hand_id,
            deck,
            street: Street::Deal,
            board: Vec::new(),
            pot: Pot::new(),
            betting: BettingState::new(Street::Deal, big_blind),
            dealer_seat,
            small_blind_seat: None,
            big_blind_seat: None,
            current_actor: None,
            history: HandHistory::new(),
            summary: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.summary.is_some()
    }

    /// Статус раздачи на текущий момент.
    pub fn status(&self) -> HandStatus {
        match &self.summary {
            Some(summary) => HandStatus::Finished(summary.clone()),
            None => HandStatus::Ongoing,
        }
    }
}

/// Старт новой раздачи:
/// - выбирает дилера;
/// - постит блайнды;
/// - раздаёт карманные карты;
/// - настраивает BettingState и current_actor.
pub fn start_hand<R, E>(table: &mut Table, rng: &mut R, evaluator: &E) -> Result<HandEngine, EngineError>
where
    R: RandomSource,
    E: HandEvaluator + ?Sized,
{
    if table.hand_in_progress {
        return Err(EngineError::HandAlreadyInProgress);
    }

    let ready = table.count_ready_for_hand();
    let required = table.config.min_players as usize;
    if ready < required {
        return Err(EngineError::NotEnoughPlayers {
            seated: ready,
            required,
        });
    }

    // Сброс флагов: ожидавшие вступают в игру.
    for p in table.seats.iter_mut().flatten() {
        p.reset_for_new_hand();
        if p.stack.is_zero() || p.leaving {
            p.status = PlayerStatus::Waiting;
        }
    }

    let dealer = next_dealer(table).ok_or(EngineError::Internal("не найден дилер"))?;
    let (sb_seat, bb_seat) =
        blind_seats(table, dealer).ok_or(EngineError::Internal("не найдены места блайндов"))?;

    table.hands_played += 1;
    table.dealer_button = Some(dealer);
    table.hand_in_progress = true;

    let hand_id = table.hands_played;
    let mut engine = HandEngine::new(hand_id, Deck::shuffled(rng), dealer, table.config.big_blind);

    engine.history.push(HandEventKind::HandStarted {
        hand_id,
        dealer,
        seats: table
            .occupied()
            .filter(|(_, p)| p.is_in_hand())
            .map(|(s, p)| (s, p.player_id, p.stack))
            .collect(),
    });
    info!("раздача #{hand_id}: дилер {dealer}, SB {sb_seat}, BB {bb_seat}");

    post_blinds(table, &mut engine, sb_seat, bb_seat)?;
    deal_hole_cards(table, &mut engine)?;

    progress(table, &mut engine, bb_seat, evaluator)?;
    Ok(engine)
}

/// Постинг блайндов. Короткий стек ставит сколько есть и уходит в олл-ин.
fn post_blinds(
    table: &mut Table,
    engine: &mut HandEngine,
    sb_seat: SeatIndex,
    bb_seat: SeatIndex,
) -> Result<(), EngineError> {
    let small_blind = table.config.small_blind;
    let big_blind = table.config.big_blind;

    let sb_paid = table
        .player_mut(sb_seat)
        .ok_or(EngineError::EmptySeat(sb_seat))?
        .commit(small_blind);
    let bb_paid = table
        .player_mut(bb_seat)
        .ok_or(EngineError::EmptySeat(bb_seat))?
        .commit(big_blind);

    engine.small_blind_seat = Some(sb_seat);
    engine.big_blind_seat = Some(bb_seat);
    engine.history.push(HandEventKind::BlindsPosted {
        small_blind: (sb_seat, sb_paid),
        big_blind: (bb_seat, bb_paid),
    });
    Ok(())
}

/// Раздача карманных карт – по 2 карты, по кругу, начиная слева от дилера.
fn deal_hole_cards(table: &mut Table, engine: &mut HandEngine) -> Result<(), EngineError> {
    let start = ((engine.dealer_seat as usize + 1) % table.seats.len()) as SeatIndex;
    let order = collect_seats_from(table, start, PlayerAtTable::is_in_hand);

    for _round in 0..2 {
        for &seat in &order {
            let card = engine
                .deck
                .draw_one()
                .ok_or(EngineError::Internal("колода закончилась"))?;
            if let Some(p) = table.player_mut(seat) {
                p.hole_cards.push(card);
            }
        }
    }

    for &seat in &order {
        if let Some(p) = table.player(seat) {
            engine.history.push(HandEventKind::HoleCardsDealt {
                seat,
                cards: p.hole_cards.clone(),
            });
        }
    }
    Ok(())
}

/// Применить действие игрока. Возвращает статус раздачи (идёт / закончилась).
///
/// Недопустимое действие отклоняется без изменения состояния.
pub fn apply_action<E>(
    table: &mut Table,
    engine: &mut HandEngine,
    action: PlayerAction,
    evaluator: &E,
) -> Result<HandStatus, EngineError>
where
    E: HandEvaluator + ?Sized,
{
    if !table.hand_in_progress || engine.is_finished() {
        return Err(EngineError::NoActiveHand);
    }
    if action.seat as usize >= table.seats.len() {
        return Err(EngineError::InvalidSeat(action.seat));
    }

    let validated = match validate_action(table, engine, &action) {
        Ok(v) => v,
        Err(e) => {
            warn!("раздача #{}: отклонено {:?}: {}", engine.hand_id, action, e);
            return Err(e.into());
        }
    };

    let seat = action.seat;
    let player = table.player_mut(seat).ok_or(EngineError::EmptySeat(seat))?;
    let player_id = player.player_id;
    player.has_acted = true;

    match validated {
        ValidatedAction::Fold => {
            let bet = player.sweep_bet();
            player.status = PlayerStatus::Folded;
            engine.pot.add(bet);
        }
        ValidatedAction::Check => {}
        ValidatedAction::Call(amount) => {
            player.commit(amount);
            // нулевой call ничего не уравнивает
            if !amount.is_zero() {
                engine.betting.mark_matched(seat);
            }
        }
        ValidatedAction::Bet { amount, raise_size } => {
            player.commit(amount);
            engine.betting.on_full_raise(seat, raise_size);
        }
        ValidatedAction::AllIn { amount, full_raise } => {
            player.commit(amount);
            player.status = PlayerStatus::AllIn;
            match full_raise {
                Some(raise_size) => engine.betting.on_full_raise(seat, raise_size),
                None => engine.betting.mark_matched(seat),
            }
        }
    }

    let new_stack = player.stack;
    let pot_after = engine.pot.total + table.total_current_bets();
    debug!(
        "раздача #{}: место {} {:?} (+{}), стек {}, в банке {}",
        engine.hand_id,
        seat,
        action.kind,
        validated.committed(),
        new_stack,
        pot_after
    );
    engine.history.push(HandEventKind::PlayerActed {
        seat,
        player_id,
        action: action.kind,
        amount: validated.committed(),
        new_stack,
        pot_after,
    });

    progress(table, engine, seat, evaluator)
}

/// Игрок встаёт из-за стола посреди раздачи.
///
/// Место сразу сбрасывает карты (даже не в свою очередь) и освобождается
/// после завершения раздачи. Ожидавшее место освобождается немедленно.
pub fn remove_player<E>(
    table: &mut Table,
    engine: &mut HandEngine,
    seat: SeatIndex,
    evaluator: &E,
) -> Result<HandStatus, EngineError>
where
    E: HandEvaluator + ?Sized,
{
    if !table.hand_in_progress || engine.is_finished() {
        return Err(EngineError::NoActiveHand);
    }
    let slot = table
        .seats
        .get_mut(seat as usize)
        .ok_or(EngineError::InvalidSeat(seat))?;
    let player = slot.as_mut().ok_or(EngineError::EmptySeat(seat))?;
    let player_id = player.player_id;

    if player.status == PlayerStatus::Waiting {
        *slot = None;
        return Ok(HandStatus::Ongoing);
    }

    player.leaving = true;
    let mut swept = Chips::ZERO;
    if player.is_in_hand() {
        swept = player.sweep_bet();
        player.status = PlayerStatus::Folded;
        player.has_acted = true;
        engine.pot.add(swept);
    }
    engine.history.push(HandEventKind::PlayerLeft { seat, player_id });
    info!("раздача #{}: место {} встаёт из-за стола", engine.hand_id, seat);

    if engine.current_actor == Some(seat) || table.count_in_hand() <= 1 {
        return progress(table, engine, seat, evaluator);
    }

    // Ушла наибольшая ставка: текущему месту уравнивать может быть уже нечего.
    let max_bet = table.max_bet();
    match engine.current_actor {
        Some(actor) if swept > max_bet => {
            let waiting_for_actor = table.player(actor).is_some_and(|p| needs_action(p, max_bet));
            if waiting_for_actor {
                Ok(HandStatus::Ongoing)
            } else {
                progress(table, engine, actor, evaluator)
            }
        }
        _ => Ok(HandStatus::Ongoing),
    }
}

/// Продвинуть раздачу после действия места `after`:
/// передать ход, закрыть улицу или завершить раздачу.
fn progress<E>(
    table: &mut Table,
    engine: &mut HandEngine,
    after: SeatIndex,
    evaluator: &E,
) -> Result<HandStatus, EngineError>
where
    E: HandEvaluator + ?Sized,
{
    if table.count_in_hand() <= 1 {
        return finish_hand(table, engine, &BTreeMap::new());
    }

    if !is_round_complete(table) {
        engine.current_actor = next_to_act(table, after);
        return Ok(HandStatus::Ongoing);
    }

    loop {
        for p in table.seats.iter_mut().flatten() {
            let bet = p.sweep_bet();
            engine.pot.add(bet);
        }

        let next = engine
            .street
            .next()
            .ok_or(EngineError::Internal("переход после шоудауна"))?;
        engine.street = next;
        engine.history.push(HandEventKind::StreetChanged { street: next });
        info!("раздача #{}: улица {:?}, в банке {}", engine.hand_id, next, engine.pot.total);

        if next == Street::Showdown {
            engine.current_actor = None;
            let strengths = showdown(table, engine, evaluator);
            return finish_hand(table, engine, &strengths);
        }

        deal_board(engine, next)?;

        for p in table.seats.iter_mut().flatten() {
            p.has_acted = false;
        }
        engine.betting = BettingState::new(next, table.config.big_blind);

        if table.count_can_act() >= 2 {
            engine.current_actor = next_to_act(table, engine.dealer_seat);
            return Ok(HandStatus::Ongoing);
        }
        // Торговаться некому: докладываем борд до конца.
        engine.current_actor = None;
    }
}

/// Сжечь карту и открыть карты борда для улицы.
fn deal_board(engine: &mut HandEngine, street: Street) -> Result<(), EngineError> {
    let count = street.cards_revealed();
    if count == 0 {
        return Ok(());
    }
    engine
        .deck
        .burn()
        .ok_or(EngineError::Internal("колода закончилась"))?;
    let cards = engine
        .deck
        .draw_n(count)
        .ok_or(EngineError::Internal("колода закончилась"))?;
    engine.board.extend_from_slice(&cards);
    engine.history.push(HandEventKind::BoardDealt { street, cards });
    Ok(())
}

/// Оценить руки всех, кто дошёл до шоудауна.
fn showdown<E>(table: &Table, engine: &mut HandEngine, evaluator: &E) -> BTreeMap<SeatIndex, HandStrength>
where
    E: HandEvaluator + ?Sized,
{
    let mut strengths = BTreeMap::new();
    for (seat, p) in table.occupied().filter(|(_, p)| p.is_in_hand()) {
        let strength = evaluator.evaluate(&p.hole_cards, &engine.board);
        engine.history.push(HandEventKind::ShowdownReveal {
            seat,
            player_id: p.player_id,
            hole_cards: p.hole_cards.clone(),
            rank: strength.rank.0,
            label: strength.label.clone(),
        });
        strengths.insert(seat, strength);
    }
    strengths
}

/// Завершение раздачи: расчёт банка, выплаты, вылеты.
fn finish_hand(
    table: &mut Table,
    engine: &mut HandEngine,
    strengths: &BTreeMap<SeatIndex, HandStrength>,
) -> Result<HandStatus, EngineError> {
    for p in table.seats.iter_mut().flatten() {
        let bet = p.sweep_bet();
        engine.pot.add(bet);
    }
    engine.current_actor = None;

    let total_pot = engine.pot.take();
    let contributed: Chips = table.occupied().map(|(_, p)| p.total_bet).sum();
    if contributed != total_pot {
        error!(
            "раздача #{}: банк {} не совпадает с вкладами {}",
            engine.hand_id, total_pot, contributed
        );
        return Err(EngineError::Internal("банк не совпадает с вкладами"));
    }

    let entries: Vec<SettlementEntry> = table
        .occupied()
        .filter(|(_, p)| p.status != PlayerStatus::Waiting)
        .map(|(seat, p)| SettlementEntry {
            seat,
            contributed: p.total_bet,
            contending: p.is_in_hand(),
            all_in: p.status == PlayerStatus::AllIn,
            rank: strengths.get(&seat).map(|s| s.rank),
        })
        .collect();

    let settlement = settle(&entries);
    if settlement.total_awarded() != total_pot {
        error!(
            "раздача #{}: выплачено {} из банка {}",
            engine.hand_id,
            settlement.total_awarded(),
            total_pot
        );
        return Err(EngineError::Internal("выплаты не совпадают с банком"));
    }

    let mut results = Vec::with_capacity(entries.len());
    for entry in &entries {
        let won = settlement.award_for(entry.seat);
        let is_winner = entry.contending
            && settlement.pots.iter().any(|pot| pot.winners.contains(&entry.seat));
        let player = table
            .player_mut(entry.seat)
            .ok_or(EngineError::EmptySeat(entry.seat))?;
        player.stack += won;
        if !won.is_zero() {
            engine.history.push(HandEventKind::PotAwarded {
                seat: entry.seat,
                player_id: player.player_id,
                amount: won,
            });
        }
        results.push(PlayerHandResult {
            seat: entry.seat,
            player_id: player.player_id,
            strength: strengths.get(&entry.seat).cloned(),
            contributed: entry.contributed,
            won,
            is_winner,
        });
    }

    let summary = HandSummary {
        hand_id: engine.hand_id,
        street_reached: engine.street,
        board: engine.board.clone(),
        total_pot,
        pots: settlement.pots,
        results,
    };

    remove_busted_and_leaving(table, engine);

    table.hand_in_progress = false;
    engine.history.push(HandEventKind::HandFinished {
        hand_id: engine.hand_id,
        total_pot,
    });
    info!(
        "раздача #{} завершена: банк {}, победители {:?}",
        engine.hand_id,
        total_pot,
        summary.winners().map(|r| r.seat).collect::<Vec<_>>()
    );
    if table.count_ready_for_hand() < table.config.min_players as usize {
        info!(
            "за столом осталось {} игроков из {} необходимых – игра окончена",
            table.count_ready_for_hand(),
            table.config.min_players
        );
    }

    engine.summary = Some(summary.clone());
    Ok(HandStatus::Finished(summary))
}

/// Освободить места с нулевым стеком (вылет) и места ушедших игроков.
fn remove_busted_and_leaving(table: &mut Table, engine: &mut HandEngine) {
    for (idx, slot) in table.seats.iter_mut().enumerate() {
        let Some(p) = slot.as_ref() else { continue };
        let seat = idx as SeatIndex;

        if p.stack.is_zero() && p.status != PlayerStatus::Waiting {
            info!("место {} ({}) выбывает с нулевым стеком", seat, p.name);
            engine.history.push(HandEventKind::PlayerEliminated {
                seat,
                player_id: p.player_id,
            });
            table.eliminated.push(EliminatedPlayer {
                player_id: p.player_id,
                name: p.name.clone(),
                seat,
                hand_id: engine.hand_id,
            });
            *slot = None;
        } else if p.leaving {
            *slot = None;
        }
    }
}
