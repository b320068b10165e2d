//! Rummy rules: action validation and round scoring.
//!
//! `GameValidator` decides whether an action is legal given the current
//! turn state; `ScoreManager` computes round results once a round ends.
//! Neither owns game state: `Game` lends them what they need.

pub mod scoring;
pub mod validator;

pub use scoring::{
    FinishReason, JokerPrivilegeHook, NoJokerPrivilege, RoundSummary, ScoreManager,
};
pub use validator::{DrawPlan, GameValidator, MeldPlan};
