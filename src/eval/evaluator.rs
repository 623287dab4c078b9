use crate::domain::card::{Card, Rank};
use crate::domain::hand::{HandRank, HandStrength};
use crate::engine::HandEvaluator;

use super::hand_rank::{describe_hand, HandCategory};
use super::lookup_tables::{detect_straight, rank_to_bit, RankMask};

/// Вычислить лучшую 5-карточную руку из hole + board.
///
/// Работает для любых 5–7 карт; при другом количестве – `None`.
pub fn evaluate_best_hand(hole: &[Card], board: &[Card]) -> Option<HandRank> {
    let mut all_cards = Vec::with_capacity(hole.len() + board.len());
    all_cards.extend_from_slice(hole);
    all_cards.extend_from_slice(board);

    if !(5..=7).contains(&all_cards.len()) {
        return None;
    }
    best_of_all_5card_combinations(&all_cards)
}

/// Перебираем все комбинации 5 карт из N (N=5–7) и выбираем лучшую.
fn best_of_all_5card_combinations(cards: &[Card]) -> Option<HandRank> {
    let n = cards.len();
    let mut best: Option<HandRank> = None;

    for a in 0..n {
        for b in (a + 1)..n {
            for c in (b + 1)..n {
                for d in (c + 1)..n {
                    for e in (d + 1)..n {
                        let r = evaluate_5card_hand(&[cards[a], cards[b], cards[c], cards[d], cards[e]]);
                        if best.map_or(true, |best_r| r > best_r) {
                            best = Some(r);
                        }
                    }
                }
            }
        }
    }

    best
}

/// Оценка строго 5-карточной комбинации.
fn evaluate_5card_hand(cards: &[Card; 5]) -> HandRank {
    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);

    let mut rank_counts = [0u8; 15];
    let mut rank_mask: RankMask = 0;
    for card in cards {
        rank_counts[card.rank as usize] += 1;
        rank_mask |= rank_to_bit(card.rank);
    }

    // (количество, ранг) по убыванию: сначала каре/сеты/пары, потом кикеры.
    let mut groups: Vec<(u8, Rank)> = Rank::ALL
        .iter()
        .filter(|&&r| rank_counts[r as usize] > 0)
        .map(|&r| (rank_counts[r as usize], r))
        .collect();
    groups.sort_by(|a, b| b.cmp(a));

    let pattern: Vec<u8> = groups.iter().map(|g| g.0).collect();
    let ranks: Vec<Rank> = groups.iter().map(|g| g.1).collect();
    let straight_high = detect_straight(rank_mask);

    let category = match (is_flush, straight_high, pattern.as_slice()) {
        (true, Some(high), _) => {
            return HandRank::from_category_and_ranks(HandCategory::StraightFlush, &[high]);
        }
        (_, _, [4, 1]) => HandCategory::FourOfAKind,
        (_, _, [3, 2]) => HandCategory::FullHouse,
        (true, None, _) => HandCategory::Flush,
        (false, Some(high), _) => {
            return HandRank::from_category_and_ranks(HandCategory::Straight, &[high]);
        }
        (_, _, [3, 1, 1]) => HandCategory::ThreeOfAKind,
        (_, _, [2, 2, 1]) => HandCategory::TwoPair,
        (_, _, [2, 1, 1, 1]) => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    };

    HandRank::from_category_and_ranks(category, &ranks)
}

/// Оракул по умолчанию: лучшая 5-карточная рука из карманных и борда.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardEvaluator;

impl HandEvaluator for StandardEvaluator {
    fn evaluate(&self, hole: &[Card], board: &[Card]) -> HandStrength {
        match evaluate_best_hand(hole, board) {
            Some(rank) => HandStrength {
                rank,
                label: describe_hand(rank),
            },
            None => HandStrength {
                rank: HandRank(0),
                label: "Incomplete hand".to_string(),
            },
        }
    }
}
