//! Turn order and the per-turn phase machine.
//!
//! ## Key Types
//!
//! - `TurnManager`: Current seat, phase, cross-turn flags and action history
//! - `TurnPhase`: Draw, Meld or Discard
//! - `DrawSource`: Where this turn's draw came from

pub mod manager;

pub use manager::{DrawSource, TurnDirection, TurnManager, TurnPhase, TurnRecord};
