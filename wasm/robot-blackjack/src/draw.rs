use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::card::{Card, RANKS, SUITS};

/// Where the table gets its cards from.
///
/// Every draw is independent: there is no shoe to run out of, and the same
/// card can come up any number of times in a row.
pub trait CardSource {
    fn draw(&mut self) -> Card;
}

/// Uniform draw over 13 ranks and 4 suits, with replacement.
pub struct RandomDraw {
    rng: SmallRng,
}

impl RandomDraw {
    pub fn new(seed: u64) -> Self {
        RandomDraw {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        RandomDraw {
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => RandomDraw::new(seed),
            None => RandomDraw::from_entropy(),
        }
    }
}

impl CardSource for RandomDraw {
    fn draw(&mut self) -> Card {
        let suit = SUITS[self.rng.gen_range(0..SUITS.len())];
        let rank = RANKS[self.rng.gen_range(0..RANKS.len())];
        Card::new(rank, suit)
    }
}

/// Replays a fixed list of cards, starting over once it runs out.
#[derive(Clone, Debug)]
pub struct Scripted {
    cards: Vec<Card>,
    next: usize,
}

impl Scripted {
    /// # Panics
    /// Panics if `cards` is empty.
    pub fn new(cards: Vec<Card>) -> Self {
        assert!(!cards.is_empty(), "scripted source needs at least one card");
        Scripted { cards, next: 0 }
    }

    pub fn drawn(&self) -> usize {
        self.next
    }
}

impl CardSource for Scripted {
    fn draw(&mut self) -> Card {
        let card = self.cards[self.next % self.cards.len()];
        self.next += 1;
        card
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};
    use std::collections::HashSet;

    #[test]
    fn same_seed_same_cards() {
        let mut a = RandomDraw::new(7);
        let mut b = RandomDraw::new(7);
        for _ in 0..50 {
            assert_eq!(a.draw(), b.draw());
        }
    }

    #[test]
    fn random_draw_covers_every_rank_and_suit() {
        let mut source = RandomDraw::new(42);
        let mut ranks = HashSet::new();
        let mut suits = HashSet::new();
        for _ in 0..2_000 {
            let card = source.draw();
            ranks.insert(card.rank);
            suits.insert(card.suit);
        }
        assert_eq!(ranks.len(), 13);
        assert_eq!(suits.len(), 4);
    }

    #[test]
    fn scripted_cycles() {
        let ace = Card::new(Rank::Ace, Suit::Spades);
        let two = Card::new(Rank::Two, Suit::Clubs);
        let mut source = Scripted::new(vec![ace, two]);
        assert_eq!(source.draw(), ace);
        assert_eq!(source.draw(), two);
        assert_eq!(source.draw(), ace);
        assert_eq!(source.drawn(), 3);
    }
}
