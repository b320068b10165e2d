//! Core engine types: players, seats, actions, RNG, configuration, errors.
//!
//! These are the building blocks shared by every other module.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use action::{now_millis, Action, ActionRecord, DrawPile};
pub use config::{PickupMeldPolicy, RulesConfig, MAX_DISCARD_PICKUP, PLAYER_COUNT};
pub use error::GameError;
pub use player::{Player, PlayerId, Seat};
pub use rng::{GameRng, GameRngState};
