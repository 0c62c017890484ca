use crate::card::Card;

pub const BLACKJACK: u32 = 21;

pub fn hand_value(cards: &[Card]) -> u32 {
    reduced(cards).0
}

/// Total after the Ace rule, plus how many Aces still count 11.
fn reduced(cards: &[Card]) -> (u32, u32) {
    let mut total = 0;
    let mut aces = 0;

    for card in cards {
        total += u32::from(card.value());
        if card.is_ace() { aces += 1; }
    }

    while total > BLACKJACK && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    (total, aces)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Hand::default()
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn value(&self) -> u32 {
        hand_value(&self.cards)
    }

    pub fn is_soft(&self) -> bool {
        reduced(&self.cards).1 > 0
    }

    pub fn is_bust(&self) -> bool {
        self.value() > BLACKJACK
    }

    /// Value of everything but the first card, which is the dealer's hole
    /// card while the player is still acting.
    pub fn visible_value(&self) -> u32 {
        hand_value(self.cards.get(1..).unwrap_or(&[]))
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Hand { cards }
    }
}
