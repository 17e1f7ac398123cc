//! Match controller
//!
//! Owns the team roster, turn order, round counter and scores across rounds.
//! The round engine decides each round; the controller decides what that
//! means for the match and whether another round follows.

use super::dictionary::{PickError, WordStore};
use super::round::RoundOutcome;
use super::validation::{validate_setup, MatchSetup, ModeSetup, ValidationError};
use super::{Difficulty, WordEntry, WordSource};
use rand::Rng;

/// Opaque team identifier, unique within a wizard session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TeamId(pub u64);

/// A competing team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Hex colour tag, "#RRGGBB"
    pub color: String,
    pub score: u32,
}

impl Team {
    pub fn new(id: TeamId, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
            score: 0,
        }
    }
}

/// Match mode with the state each mode needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchMode {
    Single,
    Teams { teams: Vec<Team>, rounds_to_win: u32 },
    Test { word: WordEntry },
}

impl MatchMode {
    pub fn label(&self) -> &'static str {
        match self {
            MatchMode::Single => "single",
            MatchMode::Teams { .. } => "teams",
            MatchMode::Test { .. } => "test",
        }
    }
}

/// What happens after a round has been recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Another round follows
    Continue,
    /// A team reached the target; carries the winner
    MatchOver { winner: Team },
}

/// Snapshot of a finished round for the result screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    pub outcome: RoundOutcome,
    /// Normalized word that was played
    pub word: String,
    /// Team that played the round (teams mode)
    pub team: Option<Team>,
    /// Team whose turn comes next, if the match goes on
    pub next_team: Option<Team>,
    pub round: u32,
}

/// Errors from driving the match after it has ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("match is already over")]
pub struct MatchOverError;

/// Match-level state machine.
#[derive(Debug, Clone)]
pub struct MatchController {
    mode: MatchMode,
    difficulty: Difficulty,
    words: WordSource,
    current_team_index: usize,
    current_round: u32,
    over: bool,
}

impl MatchController {
    /// Validate a setup and start a match at round 1 with zeroed scores.
    pub fn configure(setup: MatchSetup) -> Result<Self, ValidationError> {
        validate_setup(&setup)?;

        let mode = match setup.mode {
            ModeSetup::Single => MatchMode::Single,
            ModeSetup::Teams {
                teams,
                rounds_to_win,
            } => MatchMode::Teams {
                teams: teams
                    .into_iter()
                    .map(|team| Team { score: 0, ..team })
                    .collect(),
                rounds_to_win,
            },
            ModeSetup::Test { word } => MatchMode::Test {
                word: word.ok_or(ValidationError::NoTestWord)?,
            },
        };

        tracing::info!(
            mode = mode.label(),
            difficulty = %setup.difficulty,
            words = setup.words.label(),
            "match configured"
        );

        Ok(Self {
            mode,
            difficulty: setup.difficulty,
            words: setup.words,
            current_team_index: 0,
            current_round: 1,
            over: false,
        })
    }

    /// The word for the next round.
    pub fn next_word<R: Rng + ?Sized>(
        &self,
        store: &WordStore,
        rng: &mut R,
    ) -> Result<WordEntry, PickError> {
        match &self.mode {
            MatchMode::Test { word } => Ok(word.clone()),
            MatchMode::Single | MatchMode::Teams { .. } => store
                .pick(self.difficulty, self.words, rng)
                .cloned(),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.difficulty.max_attempts()
    }

    /// Record a finished round: score it, check for a winner, pass the turn.
    pub fn advance_after_round(&mut self, outcome: RoundOutcome) -> Result<Advance, MatchOverError> {
        if self.over {
            return Err(MatchOverError);
        }

        let team_count = match &mut self.mode {
            MatchMode::Teams { teams, .. } => {
                if outcome == RoundOutcome::Won {
                    teams[self.current_team_index].score += 1;
                }
                Some(teams.len())
            }
            MatchMode::Single | MatchMode::Test { .. } => None,
        };

        match (team_count, self.rounds_to_win()) {
            (Some(count), Some(target)) => {
                if self.teams().iter().any(|t| t.score >= target) {
                    self.over = true;
                    let winner = self.winner().cloned().ok_or(MatchOverError)?;
                    tracing::info!(winner = %winner.name, score = winner.score, "match over");
                    return Ok(Advance::MatchOver { winner });
                }
                self.current_team_index = (self.current_team_index + 1) % count;
                if self.current_team_index == 0 {
                    self.current_round += 1;
                }
            }
            _ => self.current_round += 1,
        }

        tracing::debug!(
            round = self.current_round,
            team_index = self.current_team_index,
            "turn advanced"
        );
        Ok(Advance::Continue)
    }

    /// Team with the strictly highest score; the earliest in roster order on ties.
    pub fn winner(&self) -> Option<&Team> {
        let teams = self.teams();
        let mut best = teams.first()?;
        for team in &teams[1..] {
            if team.score > best.score {
                best = team;
            }
        }
        Some(best)
    }

    /// Teams ordered by score, highest first; equal scores keep roster order.
    pub fn standings(&self) -> Vec<&Team> {
        let mut ranked: Vec<&Team> = self.teams().iter().collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
    }

    pub fn teams(&self) -> &[Team] {
        match &self.mode {
            MatchMode::Teams { teams, .. } => teams,
            MatchMode::Single | MatchMode::Test { .. } => &[],
        }
    }

    /// Team whose turn it is (teams mode).
    pub fn current_team(&self) -> Option<&Team> {
        self.teams().get(self.current_team_index)
    }

    /// Team that plays after the current one.
    pub fn next_team(&self) -> Option<&Team> {
        let teams = self.teams();
        if teams.is_empty() {
            return None;
        }
        teams.get((self.current_team_index + 1) % teams.len())
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn rounds_to_win(&self) -> Option<u32> {
        match &self.mode {
            MatchMode::Teams { rounds_to_win, .. } => Some(*rounds_to_win),
            MatchMode::Single | MatchMode::Test { .. } => None,
        }
    }

    /// "3/5" in teams mode, "3" otherwise.
    pub fn round_label(&self) -> String {
        match self.rounds_to_win() {
            Some(target) => format!("{}/{}", self.current_round, target),
            None => self.current_round.to_string(),
        }
    }

    pub fn mode(&self) -> &MatchMode {
        &self.mode
    }

    pub fn is_teams(&self) -> bool {
        matches!(self.mode, MatchMode::Teams { .. })
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Snapshot the round just played, before the turn moves on.
    pub fn report(&self, outcome: RoundOutcome, word: String) -> RoundReport {
        RoundReport {
            outcome,
            word,
            team: self.current_team().cloned(),
            next_team: self.next_team().cloned(),
            round: self.current_round,
        }
    }
}
