//! Rules configuration.
//!
//! The table is fixed at four seats; everything else that varies between
//! house rules lives in `RulesConfig`.

use serde::{Deserialize, Serialize};

use super::error::GameError;
use crate::game::CARDS_IN_CIRCULATION;

/// Number of seats at the table.
pub const PLAYER_COUNT: usize = 4;

/// Most discards that may ever be taken in one draw.
pub const MAX_DISCARD_PICKUP: usize = 3;

/// How the compulsory meld after a multi-card discard pickup must use
/// the picked-up cards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickupMeldPolicy {
    /// The meld must contain every picked-up card (hand cards may fill
    /// the remaining slots).
    #[default]
    RequireAll,
    /// The meld must contain at least one picked-up card.
    RequireAny,
}

/// Rules configuration for a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Cards dealt to every seat except the starting one (which gets one more).
    pub hand_size: usize,

    /// Most cards that may be taken from the discard pile in one draw.
    pub max_discard_pickup: usize,

    /// Meld obligation after taking two or more discards.
    pub pickup_policy: PickupMeldPolicy,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            hand_size: 7,
            max_discard_pickup: 3,
            pickup_policy: PickupMeldPolicy::RequireAll,
        }
    }
}

impl RulesConfig {
    /// Set the pickup meld policy.
    #[must_use]
    pub fn with_pickup_policy(mut self, policy: PickupMeldPolicy) -> Self {
        self.pickup_policy = policy;
        self
    }

    /// Set the dealt hand size.
    ///
    /// Sizes that would leave no cards in the deck are rejected by
    /// `RulesConfig::validate`.
    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    /// Set the maximum discard pickup.
    #[must_use]
    pub fn with_max_discard_pickup(mut self, max: usize) -> Self {
        self.max_discard_pickup = max;
        self
    }

    /// Total cards dealt at round start (one extra for the starting seat),
    /// or `None` if the count does not fit in a `usize`.
    #[must_use]
    pub fn cards_dealt(&self) -> Option<usize> {
        self.hand_size
            .checked_mul(PLAYER_COUNT)
            .and_then(|n| n.checked_add(1))
    }

    /// Check that a round can be dealt and pickups can be melded.
    pub fn validate(&self) -> Result<(), GameError> {
        let deals = self
            .cards_dealt()
            .is_some_and(|dealt| dealt < CARDS_IN_CIRCULATION);
        if self.hand_size == 0 || !deals {
            return Err(GameError::InvalidConfig(format!(
                "hand size {} leaves no cards to draw",
                self.hand_size
            )));
        }
        if !(1..=MAX_DISCARD_PICKUP).contains(&self.max_discard_pickup) {
            return Err(GameError::InvalidConfig(format!(
                "discard pickup limit {} is not allowed",
                self.max_discard_pickup
            )));
        }
        Ok(())
    }
}
