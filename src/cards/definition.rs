//! Card definitions - suits, ranks and the fixed value tables.
//!
//! A `CardId` is derived from suit and rank, so it is unique within a
//! single 52-card deck. Rank values drive run adjacency; the two value
//! tables drive scoring:
//!
//! | Rank   | Hand value | Last-card value |
//! |--------|-----------:|----------------:|
//! | 2..10  | 5          | 50              |
//! | J Q K  | 10         | 100             |
//! | A      | 15         | 150             |
//! | joker  | (adjusted) | 250             |

use serde::{Deserialize, Serialize};

/// Last-card value of any joker, regardless of its underlying rank.
pub const JOKER_LAST_CARD_VALUE: i32 = 250;

/// Card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    /// All suits in deck-construction order.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// Position of this suit in `Suit::ALL`.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Suit::Hearts => 0,
            Suit::Diamonds => 1,
            Suit::Clubs => 2,
            Suit::Spades => 3,
        }
    }

    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Suit::Hearts),
            1 => Some(Suit::Diamonds),
            2 => Some(Suit::Clubs),
            3 => Some(Suit::Spades),
            _ => None,
        }
    }

    /// Single-letter code used in card labels.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
            Suit::Spades => 'S',
        }
    }
}

/// Card rank. Ace is listed first because its sequence value is 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    /// All ranks in ascending sequence order (Ace low).
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Position of this rank in `Rank::ALL`.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Sequence value: A=1, 2..10 face value, J=11, Q=12, K=13.
    ///
    /// Runs may also treat the Ace as 14 (after the King); see
    /// `melds::validator`.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8 + 1
    }

    /// Hand-scoring value used when the deck runs out.
    #[must_use]
    pub const fn hand_value(self) -> i32 {
        match self {
            Rank::Ace => 15,
            Rank::Jack | Rank::Queen | Rank::King => 10,
            _ => 5,
        }
    }

    /// Value paid to a Memukul winner whose final card has this rank.
    #[must_use]
    pub const fn last_card_value(self) -> i32 {
        match self {
            Rank::Ace => 150,
            Rank::Jack | Rank::Queen | Rank::King => 100,
            _ => 50,
        }
    }

    /// Display label ("A", "2" .. "10", "J", "Q", "K").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Card identifier, derived from suit and rank.
///
/// Layout: `suit.index() * 13 + rank.index()`, so ids run 0..52.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl CardId {
    /// Number of distinct ids in a standard deck.
    pub const COUNT: usize = 52;

    /// Derive the id for a suit/rank pair.
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self(suit.index() * 13 + rank.index())
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Suit encoded in this id, `None` for out-of-range ids.
    #[must_use]
    pub const fn suit(self) -> Option<Suit> {
        Suit::from_index(self.0 / 13)
    }

    /// Rank encoded in this id, `None` for out-of-range ids.
    #[must_use]
    pub fn rank(self) -> Option<Rank> {
        if (self.0 as usize) < Self::COUNT {
            Rank::from_index(self.0 % 13)
        } else {
            None
        }
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.rank(), self.suit()) {
            (Some(rank), Some(suit)) => write!(f, "{}{}", rank.label(), suit.code()),
            _ => write!(f, "Card({})", self.0),
        }
    }
}
