//! Process options
//!
//! Read once at startup from environment variables. Unknown values are
//! logged and replaced by the default rather than aborting.

use crate::game::dictionary::DictionarySource;
use crate::game::{Difficulty, ParseSettingError};
use crate::tui::Theme;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Where the game opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartMode {
    /// Theme selection, then the wizard
    #[default]
    Wizard,
    /// Skip the wizard and play a single-player match
    Single,
    /// Open the wizard in teams mode
    Teams,
    /// Open the wizard in test mode
    Test,
}

impl FromStr for StartMode {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wizard" => Ok(StartMode::Wizard),
            "single" | "individual" => Ok(StartMode::Single),
            "teams" | "equipos" => Ok(StartMode::Teams),
            "test" => Ok(StartMode::Test),
            _ => Err(ParseSettingError::new("mode", s)),
        }
    }
}

impl fmt::Display for StartMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StartMode::Wizard => "wizard",
            StartMode::Single => "single",
            StartMode::Teams => "teams",
            StartMode::Test => "test",
        };
        f.write_str(name)
    }
}

/// Startup options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub theme: Theme,
    pub sound_enabled: bool,
    pub difficulty: Difficulty,
    pub mode: StartMode,
    pub dictionary: DictionarySource,
    /// Directory holding hangman drawing files
    pub asset_dir: PathBuf,
    /// Overrides the platform log directory
    pub log_dir: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            sound_enabled: true,
            difficulty: Difficulty::default(),
            mode: StartMode::default(),
            dictionary: DictionarySource::Embedded,
            asset_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/assets")),
            log_dir: None,
        }
    }
}

impl Options {
    /// Construct options from environment variables.
    ///
    /// Environment variables:
    /// - `HANGMAN_THEME` - UI skin (default: neon)
    /// - `HANGMAN_SOUND` - on/off (default: on)
    /// - `HANGMAN_DIFFICULTY` - very_easy, easy, normal, hard, extreme (default: normal)
    /// - `HANGMAN_MODE` - wizard, single, teams, test (default: wizard)
    /// - `HANGMAN_DICTIONARY` - path to a dictionary JSON file (default: embedded)
    /// - `HANGMAN_ASSETS` - directory of hangman drawings
    /// - `HANGMAN_LOG_DIR` - log directory (default: platform cache dir)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, reading through `lookup` instead of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = Self::default();

        if let Some(theme) = read_env(&lookup, "HANGMAN_THEME") {
            options.theme = theme;
        }
        if let Some(raw) = lookup("HANGMAN_SOUND") {
            match parse_switch(&raw) {
                Some(enabled) => options.sound_enabled = enabled,
                None => tracing::warn!(value = %raw, "ignoring HANGMAN_SOUND"),
            }
        }
        if let Some(difficulty) = read_env(&lookup, "HANGMAN_DIFFICULTY") {
            options.difficulty = difficulty;
        }
        if let Some(mode) = read_env(&lookup, "HANGMAN_MODE") {
            options.mode = mode;
        }
        if let Some(path) = lookup("HANGMAN_DICTIONARY").filter(|p| !p.trim().is_empty()) {
            options.dictionary = DictionarySource::File(PathBuf::from(path));
        }
        if let Some(dir) = lookup("HANGMAN_ASSETS").filter(|p| !p.trim().is_empty()) {
            options.asset_dir = PathBuf::from(dir);
        }
        options.log_dir = lookup("HANGMAN_LOG_DIR")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        options
    }
}

fn read_env<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "ignoring invalid setting");
            None
        }
    }
}

fn parse_switch(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Some(true),
        "off" | "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
