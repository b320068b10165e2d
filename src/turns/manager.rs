//! Turn sequencing.
//!
//! ## Phases
//!
//! Every turn runs `Draw -> Meld -> Discard`, then play passes to the next
//! seat. After a deck draw any number of melds may be declared before
//! `skip_meld` ends the phase; after a multi-card discard pickup the
//! compulsory meld ends it.
//!
//! The round's first player starts in `Discard` holding the extra card and
//! does not draw on that turn. `first_player_discarded` flips once that
//! discard happens and stays set for the rest of the round.
//!
//! ## History
//!
//! Accepted actions are stamped into the current turn's log. When a turn
//! ends the log is sealed into a `TurnRecord` and appended to the history;
//! turn and cycle counters are derived from the history length.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardId;
use crate::core::{ActionRecord, Seat};

/// Micro-state within one player's turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    Draw,
    Meld,
    Discard,
}

/// Direction play passes around the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnDirection {
    #[default]
    Clockwise,
    CounterClockwise,
}

/// Where the current turn's draw came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawSource {
    Deck,
    /// Ids of the cards taken, in pile order.
    DiscardPile { taken: SmallVec<[CardId; 3]> },
}

/// A completed turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub seat: Seat,
    pub actions: Vec<ActionRecord>,
}

/// Whose turn it is and where they are within it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnManager {
    player_count: usize,
    starting_seat: Seat,
    current: Seat,
    direction: TurnDirection,
    phase: TurnPhase,
    first_player_discarded: bool,
    draw_source: Option<DrawSource>,
    current_actions: Vec<ActionRecord>,
    history: Vector<TurnRecord>,
    last_action_at: Option<i64>,
}

impl TurnManager {
    /// Create a manager for `player_count` seats, positioned at seat 0.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        let mut turns = Self {
            player_count,
            starting_seat: Seat::new(0),
            current: Seat::new(0),
            direction: TurnDirection::Clockwise,
            phase: TurnPhase::Draw,
            first_player_discarded: false,
            draw_source: None,
            current_actions: Vec::new(),
            history: Vector::new(),
            last_action_at: None,
        };
        turns.reset(Seat::new(0));
        turns
    }

    /// Start a round with `start` holding the extra card.
    pub fn reset(&mut self, start: Seat) {
        self.starting_seat = start;
        self.current = start;
        self.phase = TurnPhase::Discard;
        self.first_player_discarded = false;
        self.draw_source = None;
        self.current_actions.clear();
        self.history = Vector::new();
        self.last_action_at = None;
    }

    // === Queries ===

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    #[must_use]
    pub fn current(&self) -> Seat {
        self.current
    }

    #[must_use]
    pub fn starting_seat(&self) -> Seat {
        self.starting_seat
    }

    #[must_use]
    pub fn direction(&self) -> TurnDirection {
        self.direction
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    #[must_use]
    pub fn first_player_discarded(&self) -> bool {
        self.first_player_discarded
    }

    /// True while the round's opening discard is still owed.
    #[must_use]
    pub fn awaiting_opening_discard(&self) -> bool {
        !self.first_player_discarded
    }

    #[must_use]
    pub fn draw_source(&self) -> Option<&DrawSource> {
        self.draw_source.as_ref()
    }

    /// Whether this turn's draw came from the discard pile.
    #[must_use]
    pub fn last_draw_from_discard(&self) -> bool {
        matches!(self.draw_source, Some(DrawSource::DiscardPile { .. }))
    }

    /// Cards still owed to a compulsory meld: set during the meld phase
    /// after taking two or more discards.
    #[must_use]
    pub fn mandatory_pickup(&self) -> Option<&[CardId]> {
        match (&self.draw_source, self.phase) {
            (Some(DrawSource::DiscardPile { taken }), TurnPhase::Meld) if taken.len() > 1 => {
                Some(taken)
            }
            _ => None,
        }
    }

    /// Actions recorded so far in the current turn.
    #[must_use]
    pub fn current_actions(&self) -> &[ActionRecord] {
        &self.current_actions
    }

    #[must_use]
    pub fn history(&self) -> &Vector<TurnRecord> {
        &self.history
    }

    /// Most recent accepted action of the round.
    #[must_use]
    pub fn last_action(&self) -> Option<&ActionRecord> {
        self.current_actions
            .last()
            .or_else(|| self.history.last().and_then(|t| t.actions.last()))
    }

    /// 1-based number of the turn in progress.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.history.len() as u32 + 1
    }

    /// Completed trips around the table this round.
    #[must_use]
    pub fn cycle(&self) -> u32 {
        (self.history.len() / self.player_count.max(1)) as u32
    }

    /// Sequence number for the next action within this turn.
    #[must_use]
    pub fn next_sequence(&self) -> u32 {
        self.current_actions.len() as u32
    }

    /// Milliseconds since the last accepted action, if any. Advisory only.
    #[must_use]
    pub fn idle_millis(&self, now_ms: i64) -> Option<i64> {
        self.last_action_at.map(|at| (now_ms - at).max(0))
    }

    /// Seat that plays after the current one.
    #[must_use]
    pub fn next_seat(&self) -> Seat {
        let steps = match self.direction {
            TurnDirection::Clockwise => 1,
            TurnDirection::CounterClockwise => self.player_count - 1,
        };
        self.current.offset(steps, self.player_count)
    }

    // === Transitions ===

    /// Append an accepted action to the current turn's log.
    pub fn record(&mut self, record: ActionRecord) {
        self.last_action_at = Some(record.timestamp_ms);
        self.current_actions.push(record);
    }

    /// `Draw -> Meld`.
    pub fn complete_draw(&mut self, source: DrawSource) {
        self.draw_source = Some(source);
        self.phase = TurnPhase::Meld;
    }

    /// A meld was declared. Settling a compulsory pickup meld moves to
    /// `Discard`; an optional meld stays in `Meld` so more can follow.
    pub fn complete_meld(&mut self) {
        if self.mandatory_pickup().is_some() {
            self.phase = TurnPhase::Discard;
        }
    }

    /// `Meld -> Discard` without melding.
    pub fn skip_meld(&mut self) {
        self.phase = TurnPhase::Discard;
    }

    /// Seal the current turn and pass play to the next seat.
    pub fn advance(&mut self) {
        let actions = std::mem::take(&mut self.current_actions);
        self.history.push_back(TurnRecord {
            seat: self.current,
            actions,
        });
        self.current = self.next_seat();
        self.phase = TurnPhase::Draw;
        self.draw_source = None;
        self.first_player_discarded = true;
    }
}
