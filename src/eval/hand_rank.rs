use crate::domain::card::Rank;
use crate::domain::hand::HandRank;

/// Категория покерной руки по силе.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl HandCategory {
    fn from_id(id: u8) -> HandCategory {
        match id {
            1 => HandCategory::OnePair,
            2 => HandCategory::TwoPair,
            3 => HandCategory::ThreeOfAKind,
            4 => HandCategory::Straight,
            5 => HandCategory::Flush,
            6 => HandCategory::FullHouse,
            7 => HandCategory::FourOfAKind,
            8 => HandCategory::StraightFlush,
            _ => HandCategory::HighCard,
        }
    }
}

impl HandRank {
    /// Собрать HandRank из категории и до 5 значимых рангов (от старшего к младшему).
    ///
    /// Схема кодирования (u32):
    ///   [категория:4 бита][r0:4][r1:4][r2:4][r3:4][r4:4]
    /// Незаполненные позиции – нули. Rank 2..14 влазит в 4 бита.
    pub fn from_category_and_ranks(category: HandCategory, ranks: &[Rank]) -> Self {
        let mut value = (category as u32) << 20;
        for (i, rank) in ranks.iter().take(5).enumerate() {
            value |= (*rank as u32) << (16 - 4 * i);
        }
        HandRank(value)
    }

    /// Вытащить категорию из HandRank.
    pub fn category(&self) -> HandCategory {
        HandCategory::from_id(((self.0 >> 20) & 0x0F) as u8)
    }

    /// Достать значимые ранги (от старшего к младшему).
    pub fn ranks(&self) -> Vec<Rank> {
        (0..5)
            .filter_map(|i| Rank::from_value(((self.0 >> (16 - 4 * i)) & 0x0F) as u8))
            .collect()
    }
}

fn rank_name(rank: Rank) -> &'static str {
    match rank {
        Rank::Two => "Two",
        Rank::Three => "Three",
        Rank::Four => "Four",
        Rank::Five => "Five",
        Rank::Six => "Six",
        Rank::Seven => "Seven",
        Rank::Eight => "Eight",
        Rank::Nine => "Nine",
        Rank::Ten => "Ten",
        Rank::Jack => "Jack",
        Rank::Queen => "Queen",
        Rank::King => "King",
        Rank::Ace => "Ace",
    }
}

fn plural(rank: Rank) -> String {
    match rank {
        Rank::Six => "Sixes".to_string(),
        r => format!("{}s", rank_name(r)),
    }
}

/// Человеческое описание руки: категория и старшие ранги.
pub fn describe_hand(rank: HandRank) -> String {
    let ranks = rank.ranks();
    let (Some(&r0), r1) = (ranks.first(), ranks.get(1).copied()) else {
        return "High card".to_string();
    };
    match (rank.category(), r1) {
        (HandCategory::HighCard, _) => format!("High card, {}", rank_name(r0)),
        (HandCategory::OnePair, _) => format!("Pair of {}", plural(r0)),
        (HandCategory::TwoPair, Some(r1)) => format!("Two pair, {} and {}", plural(r0), plural(r1)),
        (HandCategory::ThreeOfAKind, _) => format!("Three of a kind, {}", plural(r0)),
        (HandCategory::Straight, _) => format!("Straight, {} high", rank_name(r0)),
        (HandCategory::Flush, _) => format!("Flush, {} high", rank_name(r0)),
        (HandCategory::FullHouse, Some(r1)) => {
            format!("Full house, {} full of {}", plural(r0), plural(r1))
        }
        (HandCategory::FourOfAKind, _) => format!("Four of a kind, {}", plural(r0)),
        (HandCategory::StraightFlush, _) if r0 == Rank::Ace => "Royal flush".to_string(),
        (HandCategory::StraightFlush, _) => format!("Straight flush, {} high", rank_name(r0)),
        (HandCategory::TwoPair, None) => "Two pair".to_string(),
        (HandCategory::FullHouse, None) => "Full house".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packing_orders_category_first() {
        let pair = HandRank::from_category_and_ranks(
            HandCategory::OnePair,
            &[Rank::Ace, Rank::King, Rank::Queen, Rank::Jack],
        );
        let two_pair =
            HandRank::from_category_and_ranks(HandCategory::TwoPair, &[Rank::Three, Rank::Two, Rank::Four]);
        assert!(two_pair > pair);
        assert_eq!(pair.category(), HandCategory::OnePair);
        assert_eq!(pair.ranks(), vec![Rank::Ace, Rank::King, Rank::Queen, Rank::Jack]);
    }

    #[test]
    fn labels() {
        let fh = HandRank::from_category_and_ranks(HandCategory::FullHouse, &[Rank::Six, Rank::Ten]);
        assert_eq!(describe_hand(fh), "Full house, Sixes full of Tens");
        let royal = HandRank::from_category_and_ranks(HandCategory::StraightFlush, &[Rank::Ace]);
        assert_eq!(describe_hand(royal), "Royal flush");
    }
}
