//! Round-end scoring.
//!
//! ## Memukul
//!
//! The winner alone scores the last-card value of the single card left in
//! hand: 50 for 2-10, 100 for J/Q/K, 150 for an Ace, 250 for any joker.
//!
//! ## Deck exhausted
//!
//! Every player scores individually:
//! - hand cards at 5/10/15 each (jokers excluded)
//! - -25 per joker still in hand
//! - +10 per joker inside a declared meld
//! - +10 per declared meld, +5 more for a 4-card meld
//!
//! Round scores are added to the running totals.

use serde::{Deserialize, Serialize};

use crate::cards::JokerDesignation;
use crate::core::{Player, PlayerId, Seat};

/// Penalty per joker left in hand when the deck runs out.
pub const UNMELDED_JOKER_PENALTY: i32 = -25;
/// Bonus per joker inside a declared meld when the deck runs out.
pub const MELDED_JOKER_BONUS: i32 = 10;
/// Bonus per declared meld.
pub const MELD_BONUS: i32 = 10;
/// Extra bonus for a 4-card meld.
pub const FULL_MELD_BONUS: i32 = 5;

/// Why a round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// A player went down to one card with a Run declared.
    Memukul,
    /// The draw deck ran out with no winner.
    DeckEmpty,
}

/// Outcome of a finished round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round: u32,
    pub reason: FinishReason,
    pub winner: Option<PlayerId>,
    /// Points earned this round, in seat order.
    pub round_scores: Vec<(PlayerId, i32)>,
    /// Unique top scorer of the round, if any.
    pub joker_privilege: Option<PlayerId>,
}

impl RoundSummary {
    /// Points a player earned this round.
    #[must_use]
    pub fn score_of(&self, player: &PlayerId) -> Option<i32> {
        self.round_scores
            .iter()
            .find(|(id, _)| id == player)
            .map(|(_, score)| *score)
    }
}

/// Stateless round scorer.
pub struct ScoreManager;

impl ScoreManager {
    /// Memukul payout: last-card value of the winner's final card.
    ///
    /// Zero if the hand does not hold exactly one card.
    #[must_use]
    pub fn memukul_score(winner: &Player) -> i32 {
        match winner.hand() {
            [last] => last.last_card_value(),
            _ => 0,
        }
    }

    /// Hand component of a deck-exhausted score.
    #[must_use]
    pub fn hand_score(player: &Player) -> i32 {
        player
            .hand()
            .iter()
            .map(|card| {
                if card.is_joker() {
                    UNMELDED_JOKER_PENALTY
                } else {
                    card.base_value()
                }
            })
            .sum()
    }

    /// Meld component of a deck-exhausted score.
    #[must_use]
    pub fn meld_bonus(player: &Player) -> i32 {
        player
            .melds()
            .iter()
            .map(|meld| {
                let size_bonus = if meld.len() == 4 { FULL_MELD_BONUS } else { 0 };
                MELD_BONUS + size_bonus + MELDED_JOKER_BONUS * meld.joker_count() as i32
            })
            .sum()
    }

    /// Full deck-exhausted score for one player.
    #[must_use]
    pub fn deck_empty_score(player: &Player) -> i32 {
        Self::hand_score(player) + Self::meld_bonus(player)
    }

    /// Score a finished round, add the results to the running totals and
    /// summarise it.
    pub fn score_round(
        players: &mut [Player],
        round: u32,
        reason: FinishReason,
        winner: Option<Seat>,
    ) -> RoundSummary {
        let round_scores: Vec<(PlayerId, i32)> = players
            .iter()
            .enumerate()
            .map(|(seat, player)| {
                let score = match reason {
                    FinishReason::Memukul if winner.map(Seat::index) == Some(seat) => {
                        Self::memukul_score(player)
                    }
                    FinishReason::Memukul => 0,
                    FinishReason::DeckEmpty => Self::deck_empty_score(player),
                };
                (player.id().clone(), score)
            })
            .collect();

        for (player, (_, score)) in players.iter_mut().zip(&round_scores) {
            player.add_score(*score);
        }

        RoundSummary {
            round,
            reason,
            winner: winner.and_then(|seat| players.get(seat.index())).map(|p| p.id().clone()),
            joker_privilege: Self::joker_privilege(&round_scores),
            round_scores,
        }
    }

    /// The single highest round scorer; ties grant nothing.
    #[must_use]
    pub fn joker_privilege(round_scores: &[(PlayerId, i32)]) -> Option<PlayerId> {
        let best = round_scores.iter().map(|(_, s)| *s).max()?;
        let mut top = round_scores.iter().filter(|(_, s)| *s == best);
        let (leader, _) = top.next()?;
        if top.next().is_some() {
            None
        } else {
            Some(leader.clone())
        }
    }
}

/// Called when the next round is dealt, with the previous round's joker
/// privilege grantee.
///
/// What the privilege grants is left to the implementor. The hook only
/// observes; it cannot move cards.
pub trait JokerPrivilegeHook {
    fn on_round_start(&mut self, grantee: &PlayerId, round: u32, jokers: &JokerDesignation);
}

/// Hook that grants nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoJokerPrivilege;

impl JokerPrivilegeHook for NoJokerPrivilege {
    fn on_round_start(&mut self, _grantee: &PlayerId, _round: u32, _jokers: &JokerDesignation) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Rank, Suit};
    use crate::melds::{Meld, MeldId, MeldType};

    fn run_meld(owner: &str, with_joker: bool) -> Meld {
        let middle = if with_joker {
            Card::new(Suit::Hearts, Rank::Two).as_joker()
        } else {
            Card::new(Suit::Spades, Rank::Six)
        };
        Meld::new(
            MeldId(0),
            MeldType::Run,
            vec![
                Card::new(Suit::Spades, Rank::Five),
                middle,
                Card::new(Suit::Spades, Rank::Seven),
            ],
            PlayerId::new(owner),
        )
    }

    #[test]
    fn test_memukul_score() {
        let mut player = Player::new("p1", "Alice");
        player.receive([Card::new(Suit::Clubs, Rank::Nine)]);
        assert_eq!(ScoreManager::memukul_score(&player), 50);

        let mut player = Player::new("p2", "Bob");
        player.receive([Card::new(Suit::Clubs, Rank::Nine).as_joker()]);
        assert_eq!(ScoreManager::memukul_score(&player), 250);

        let mut player = Player::new("p3", "Cara");
        player.receive([Card::new(Suit::Clubs, Rank::Ace)]);
        assert_eq!(ScoreManager::memukul_score(&player), 150);
    }

    #[test]
    fn test_hand_score_with_jokers() {
        let mut player = Player::new("p1", "Alice");
        player.receive([
            Card::new(Suit::Clubs, Rank::Ace),
            Card::new(Suit::Clubs, Rank::King),
            Card::new(Suit::Hearts, Rank::Four),
            Card::new(Suit::Hearts, Rank::Eight).as_joker(),
        ]);
        assert_eq!(ScoreManager::hand_score(&player), 15 + 10 + 5 - 25);
    }

    #[test]
    fn test_meld_bonus() {
        let mut player = Player::new("p1", "Alice");
        player.declare_meld(run_meld("p1", true));
        player.declare_meld(Meld::new(
            MeldId(1),
            MeldType::Set,
            vec![
                Card::new(Suit::Spades, Rank::Nine),
                Card::new(Suit::Hearts, Rank::Nine),
                Card::new(Suit::Clubs, Rank::Nine),
                Card::new(Suit::Diamonds, Rank::Nine),
            ],
            PlayerId::new("p1"),
        ));
        // run: 10 + joker 10; four-card set: 10 + 5
        assert_eq!(ScoreManager::meld_bonus(&player), 35);
    }

    #[test]
    fn test_score_round_memukul() {
        let mut players: Vec<Player> = ["a", "b", "c", "d"]
            .iter()
            .map(|id| Player::new(*id, id.to_uppercase()))
            .collect();
        players[2].receive([Card::new(Suit::Hearts, Rank::Queen)]);
        players[2].declare_meld(run_meld("c", false));
        players[0].receive([Card::new(Suit::Hearts, Rank::Two)]);

        let summary =
            ScoreManager::score_round(&mut players, 1, FinishReason::Memukul, Some(Seat::new(2)));

        assert_eq!(summary.winner, Some(PlayerId::new("c")));
        assert_eq!(summary.score_of(&PlayerId::new("c")), Some(100));
        assert_eq!(summary.score_of(&PlayerId::new("a")), Some(0));
        assert_eq!(players[2].score(), 100);
        assert_eq!(summary.joker_privilege, Some(PlayerId::new("c")));
    }

    #[test]
    fn test_score_round_deck_empty() {
        let mut players: Vec<Player> = ["a", "b", "c", "d"]
            .iter()
            .map(|id| Player::new(*id, id.to_uppercase()))
            .collect();
        players[0].receive([Card::new(Suit::Hearts, Rank::King)]);
        players[1].receive([Card::new(Suit::Hearts, Rank::Three).as_joker()]);
        players[3].declare_meld(run_meld("d", true));

        let summary = ScoreManager::score_round(&mut players, 2, FinishReason::DeckEmpty, None);

        assert_eq!(summary.winner, None);
        assert_eq!(summary.reason, FinishReason::DeckEmpty);
        assert_eq!(
            summary.round_scores.iter().map(|(_, s)| *s).collect::<Vec<_>>(),
            vec![10, -25, 0, 20]
        );
        assert_eq!(players[1].score(), -25);
        assert_eq!(summary.joker_privilege, Some(PlayerId::new("d")));
    }

    #[test]
    fn test_joker_privilege_tie() {
        let scores = vec![
            (PlayerId::new("a"), 10),
            (PlayerId::new("b"), 10),
            (PlayerId::new("c"), 5),
        ];
        assert_eq!(ScoreManager::joker_privilege(&scores), None);
        assert_eq!(ScoreManager::joker_privilege(&[]), None);
    }

    #[test]
    fn test_finish_reason_serde() {
        assert_eq!(serde_json::to_string(&FinishReason::Memukul).unwrap(), "\"memukul\"");
        assert_eq!(serde_json::to_string(&FinishReason::DeckEmpty).unwrap(), "\"deck_empty\"");
    }
}
