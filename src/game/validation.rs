//! Match setup validation
//!
//! Checks a wizard-built setup before a match is created:
//! - Team count between 2 and 4 (teams mode)
//! - Every team named, names at most 20 characters
//! - A positive number of rounds to win
//! - A chosen word (test mode)

use super::controller::Team;
use super::{Difficulty, WordEntry, WordSource};

pub const MIN_TEAMS: usize = 2;
pub const MAX_TEAMS: usize = 4;
pub const MAX_TEAM_NAME_LEN: usize = 20;

/// Mode-specific part of a setup. Each mode carries only its own fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeSetup {
    Single,
    Teams { teams: Vec<Team>, rounds_to_win: u32 },
    Test { word: Option<WordEntry> },
}

/// Everything needed to start a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSetup {
    pub mode: ModeSetup,
    pub difficulty: Difficulty,
    pub words: WordSource,
}

/// Why a setup cannot start a match.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("at least {} teams are required (have {})", MIN_TEAMS, .0)]
    TooFewTeams(usize),
    #[error("at most {} teams are allowed (have {})", MAX_TEAMS, .0)]
    TooManyTeams(usize),
    #[error("team {} needs a name", .0 + 1)]
    EmptyTeamName(usize),
    #[error("team {} name is longer than {} characters", .0 + 1, MAX_TEAM_NAME_LEN)]
    TeamNameTooLong(usize),
    #[error("rounds to win must be at least 1")]
    NoRoundsToWin,
    #[error("test mode needs a word to be selected")]
    NoTestWord,
}

impl ValidationError {
    /// Short title for the alert dialog.
    pub fn title(&self) -> &'static str {
        match self {
            ValidationError::TooFewTeams(_) | ValidationError::TooManyTeams(_) => "TEAM LIMIT",
            ValidationError::EmptyTeamName(_) | ValidationError::TeamNameTooLong(_) => {
                "NAMES REQUIRED"
            }
            ValidationError::NoRoundsToWin => "ROUNDS REQUIRED",
            ValidationError::NoTestWord => "WORD REQUIRED",
        }
    }
}

/// Validate a setup, returning the first problem found.
///
/// Checks in order: team count, team names, rounds, test word.
pub fn validate_setup(setup: &MatchSetup) -> Result<(), ValidationError> {
    match &setup.mode {
        ModeSetup::Single => Ok(()),
        ModeSetup::Teams {
            teams,
            rounds_to_win,
        } => {
            if teams.len() < MIN_TEAMS {
                return Err(ValidationError::TooFewTeams(teams.len()));
            }
            if teams.len() > MAX_TEAMS {
                return Err(ValidationError::TooManyTeams(teams.len()));
            }
            for (index, team) in teams.iter().enumerate() {
                if team.name.trim().is_empty() {
                    return Err(ValidationError::EmptyTeamName(index));
                }
                if team.name.chars().count() > MAX_TEAM_NAME_LEN {
                    return Err(ValidationError::TeamNameTooLong(index));
                }
            }
            if *rounds_to_win == 0 {
                return Err(ValidationError::NoRoundsToWin);
            }
            Ok(())
        }
        ModeSetup::Test { word } => match word {
            Some(_) => Ok(()),
            None => Err(ValidationError::NoTestWord),
        },
    }
}
