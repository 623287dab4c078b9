use crate::domain::card::Rank;

/// Битовая маска рангов: бит 0 = двойка, бит 12 = туз.
pub type RankMask = u16;

/// Все стриты от сильнейшего к слабейшему: (старшая карта, маска).
/// Колесо A2345 считается стритом до пятёрки.
pub const STRAIGHTS: [(Rank, RankMask); 10] = [
    (Rank::Ace, run_mask(Rank::Ace)),
    (Rank::King, run_mask(Rank::King)),
    (Rank::Queen, run_mask(Rank::Queen)),
    (Rank::Jack, run_mask(Rank::Jack)),
    (Rank::Ten, run_mask(Rank::Ten)),
    (Rank::Nine, run_mask(Rank::Nine)),
    (Rank::Eight, run_mask(Rank::Eight)),
    (Rank::Seven, run_mask(Rank::Seven)),
    (Rank::Six, run_mask(Rank::Six)),
    (Rank::Five, WHEEL_MASK),
];

const WHEEL_MASK: RankMask = mask_from_ranks(&[Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five]);

/// Пять рангов подряд, заканчивая `high` (high >= Six).
const fn run_mask(high: Rank) -> RankMask {
    0b1_1111 << (high as u8 - 6)
}

/// Получить битовую маску для одного ранга.
pub const fn rank_to_bit(rank: Rank) -> RankMask {
    1 << (rank as u8 - 2)
}

/// Построить маску из списка рангов.
pub const fn mask_from_ranks(ranks: &[Rank]) -> RankMask {
    let mut mask: RankMask = 0;
    let mut i = 0;
    while i < ranks.len() {
        mask |= rank_to_bit(ranks[i]);
        i += 1;
    }
    mask
}

/// Найти сильнейший стрит в маске рангов. Возвращает его старшую карту.
pub fn detect_straight(rank_mask: RankMask) -> Option<Rank> {
    STRAIGHTS
        .iter()
        .find(|(_, mask)| rank_mask & mask == *mask)
        .map(|&(high, _)| high)
}
