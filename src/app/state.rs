//! In-match state
//!
//! Drives one match: starts rounds, forwards guesses to the round engine,
//! defers the end of a round so the last move stays on screen, then hands
//! the outcome to the match controller.

use crate::game::controller::{Advance, MatchController, RoundReport, Team};
use crate::game::dictionary::{PickError, WordStore};
use crate::game::round::{GuessError, GuessOutcome, RoundEngine, RoundOutcome};
use crate::sound::Cue;
use crate::tui::HangmanStyle;
use rand::Rng;
use std::time::{Duration, Instant};

/// Pause after the winning letter before the result appears.
pub const ANNOUNCE_DELAY: Duration = Duration::from_millis(500);
/// Extra pause after the losing letter so the full drawing is seen.
pub const LOSS_REVEAL_DELAY: Duration = Duration::from_secs(1);

/// What the playing screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    /// Round in progress, including the pause after its last move
    Guessing,
    /// Round result, waiting for the next round
    Announcing(RoundReport),
    /// Final round result and the match winner
    Champion { report: RoundReport, winner: Team },
}

/// One line of feedback under the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    None,
    Hit(char),
    Miss(char),
    Repeat(char),
}

impl Feedback {
    pub fn text(&self) -> String {
        match self {
            Feedback::None => String::new(),
            Feedback::Hit(c) => format!("Yes! {} is in the word", c),
            Feedback::Miss(c) => format!("No {} here", c),
            Feedback::Repeat(c) => format!("{} was already tried", c),
        }
    }
}

pub struct App {
    pub controller: MatchController,
    pub round: RoundEngine,
    pub style: HangmanStyle,
    pub stage: Stage,
    pub feedback: Feedback,
    finish_at: Option<Instant>,
    cues: Vec<Cue>,
}

impl App {
    pub fn new(controller: MatchController, style: HangmanStyle) -> Self {
        Self {
            controller,
            round: RoundEngine::new(),
            style,
            stage: Stage::Guessing,
            feedback: Feedback::None,
            finish_at: None,
            cues: Vec::new(),
        }
    }

    /// Draw the next word and open a round.
    pub fn start_round<R: Rng + ?Sized>(
        &mut self,
        store: &WordStore,
        rng: &mut R,
    ) -> Result<(), PickError> {
        let word = self.controller.next_word(store, rng)?;
        tracing::info!(
            round = self.controller.current_round(),
            team = self.controller.current_team().map(|t| t.name.as_str()),
            "round started"
        );
        self.round.start(word, self.controller.max_attempts());
        self.stage = Stage::Guessing;
        self.feedback = Feedback::None;
        self.finish_at = None;
        Ok(())
    }

    /// Guess a typed letter.
    pub fn on_letter(&mut self, c: char, now: Instant) {
        if self.stage != Stage::Guessing {
            return;
        }
        let result = self.round.guess(c);
        self.apply(result, now);
    }

    /// Reveal a random hidden letter after the hint was confirmed.
    pub fn on_hint<R: Rng + ?Sized>(&mut self, rng: &mut R, now: Instant) {
        if self.stage != Stage::Guessing {
            return;
        }
        let result = self.round.hint(rng);
        self.apply(result, now);
    }

    /// Whether a hint would be accepted right now.
    pub fn can_hint(&self) -> bool {
        self.stage == Stage::Guessing && self.round.is_active()
    }

    /// Hint text of the current word.
    pub fn clue(&self) -> &str {
        self.round.entry().map(|e| e.hint.as_str()).unwrap_or("")
    }

    fn apply(&mut self, result: Result<GuessOutcome, GuessError>, now: Instant) {
        match result {
            Ok(outcome) if outcome.is_hit() => {
                self.feedback = Feedback::Hit(outcome.letter());
                self.cues.push(Cue::Correct);
            }
            Ok(outcome) => {
                self.feedback = Feedback::Miss(outcome.letter());
                self.cues.push(Cue::Wrong);
            }
            Err(GuessError::AlreadyGuessed(letter)) => {
                self.feedback = Feedback::Repeat(letter);
                return;
            }
            Err(e) => {
                tracing::debug!(error = %e, "guess ignored");
                return;
            }
        }

        match self.round.outcome() {
            Some(RoundOutcome::Won) => self.finish_at = Some(now + ANNOUNCE_DELAY),
            Some(RoundOutcome::Lost) => {
                self.finish_at = Some(now + LOSS_REVEAL_DELAY + ANNOUNCE_DELAY)
            }
            None => {}
        }
    }

    /// Whether the round has ended and its result is pending.
    #[cfg(test)]
    pub fn is_finishing(&self) -> bool {
        self.finish_at.is_some()
    }

    /// Advance timers. Returns true when the screen changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.finish_at {
            Some(deadline) if now >= deadline => {
                self.finish_at = None;
                self.finish_round();
                true
            }
            _ => false,
        }
    }

    fn finish_round(&mut self) {
        let Some(outcome) = self.round.outcome() else {
            return;
        };
        let report = self.controller.report(outcome, self.round.word());
        tracing::info!(
            outcome = ?outcome,
            word = %report.word,
            round = report.round,
            "round finished"
        );

        self.cues.push(match outcome {
            RoundOutcome::Won => Cue::Victory,
            RoundOutcome::Lost => Cue::Defeat,
        });

        self.stage = match self.controller.advance_after_round(outcome) {
            Ok(Advance::Continue) => Stage::Announcing(report),
            Ok(Advance::MatchOver { winner }) => {
                tracing::info!(winner = %winner.name, score = winner.score, "match over");
                Stage::Champion { report, winner }
            }
            Err(e) => {
                tracing::warn!(error = %e, "round finished after match end");
                Stage::Announcing(report)
            }
        };
    }

    /// Move from the result screen into the next round.
    pub fn next_round<R: Rng + ?Sized>(
        &mut self,
        store: &WordStore,
        rng: &mut R,
    ) -> Result<(), PickError> {
        match self.stage {
            Stage::Announcing(_) => self.start_round(store, rng),
            Stage::Guessing | Stage::Champion { .. } => Ok(()),
        }
    }

    /// Cues raised since the last call.
    pub fn take_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }
}
