//! Match configuration wizard
//!
//! Holds the selections made before a match and turns them into a
//! `MatchSetup`. Navigation is field based: Up/Down move between fields,
//! Left/Right change the focused value, typing edits team names.

use crate::game::controller::{Team, TeamId};
use crate::game::dictionary::WordStore;
use crate::game::validation::{
    MatchSetup, ModeSetup, ValidationError, MAX_TEAMS, MAX_TEAM_NAME_LEN, MIN_TEAMS,
};
use crate::game::{Difficulty, WordSource};
use crate::tui::HangmanStyle;

pub const DEFAULT_ROUNDS_TO_WIN: u32 = 5;
pub const MIN_ROUNDS_TO_WIN: u32 = 1;
pub const MAX_ROUNDS_TO_WIN: u32 = 20;

/// Team colours, handed out in order and cycled per team.
pub const TEAM_COLORS: [&str; 6] = [
    "#9D00FF", "#00F5FF", "#FF1493", "#39FF14", "#FF6B00", "#FFD700",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardMode {
    Single,
    Teams,
    Test,
}

impl WizardMode {
    pub const ALL: [WizardMode; 3] = [WizardMode::Single, WizardMode::Teams, WizardMode::Test];

    pub fn label(self) -> &'static str {
        match self {
            WizardMode::Single => "Single Player",
            WizardMode::Teams => "Teams",
            WizardMode::Test => "Test",
        }
    }
}

/// One focusable row in the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Mode,
    Difficulty,
    Words,
    Rounds,
    TestWord,
    Style,
    Sound,
    Team(usize),
    AddTeam,
    Start,
}

/// Values `reset()` goes back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardDefaults {
    pub mode: WizardMode,
    pub difficulty: Difficulty,
    pub sound: bool,
}

impl Default for WizardDefaults {
    fn default() -> Self {
        Self {
            mode: WizardMode::Teams,
            difficulty: Difficulty::Normal,
            sound: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Wizard {
    pub mode: WizardMode,
    pub difficulty: Difficulty,
    pub words: WordSource,
    pub rounds_to_win: u32,
    pub style: HangmanStyle,
    pub sound: bool,
    /// Catalogue index of the word used in test mode
    pub test_word: usize,
    teams: Vec<Team>,
    next_team_id: u64,
    focus: usize,
    defaults: WizardDefaults,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new(WizardDefaults::default())
    }
}

impl Wizard {
    pub fn new(defaults: WizardDefaults) -> Self {
        let mut wizard = Self {
            mode: defaults.mode,
            difficulty: defaults.difficulty,
            words: WordSource::Mixed,
            rounds_to_win: DEFAULT_ROUNDS_TO_WIN,
            style: HangmanStyle::Emoji,
            sound: defaults.sound,
            test_word: 0,
            teams: Vec::new(),
            next_team_id: 1,
            focus: 0,
            defaults,
        };
        wizard.seed_teams();
        wizard
    }

    /// Restore every selection to its default. Team ids keep counting up.
    pub fn reset(&mut self) {
        let next_team_id = self.next_team_id;
        *self = Self::new(self.defaults);
        self.next_team_id = next_team_id;
        self.teams.clear();
        self.seed_teams();
        tracing::debug!("wizard reset");
    }

    fn seed_teams(&mut self) {
        for _ in 0..MIN_TEAMS {
            self.push_team();
        }
    }

    fn push_team(&mut self) -> TeamId {
        let id = TeamId(self.next_team_id);
        self.next_team_id += 1;
        let color = TEAM_COLORS[self.teams.len() % TEAM_COLORS.len()];
        let name = format!("Team {}", self.teams.len() + 1);
        self.teams.push(Team::new(id, name, color));
        id
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Add a default-named team; refused at the team limit.
    pub fn add_team(&mut self) -> Result<TeamId, ValidationError> {
        if self.teams.len() >= MAX_TEAMS {
            return Err(ValidationError::TooManyTeams(self.teams.len() + 1));
        }
        // Rows below the team list shift down by one
        let below = matches!(self.focused(), Field::AddTeam | Field::Start);
        let id = self.push_team();
        if below {
            self.focus += 1;
        }
        Ok(id)
    }

    /// Remove a team; refused when only the minimum remains.
    pub fn remove_team(&mut self, index: usize) -> Result<Team, ValidationError> {
        if self.teams.len() <= MIN_TEAMS {
            return Err(ValidationError::TooFewTeams(self.teams.len() - 1));
        }
        let removed = self.teams.remove(index.min(self.teams.len() - 1));
        self.clamp_focus();
        Ok(removed)
    }

    /// Append a character to a team name, up to the length cap.
    pub fn push_name_char(&mut self, index: usize, c: char) {
        if c.is_control() {
            return;
        }
        if let Some(team) = self.teams.get_mut(index) {
            if team.name.chars().count() < MAX_TEAM_NAME_LEN {
                team.name.push(c);
            }
        }
    }

    pub fn pop_name_char(&mut self, index: usize) {
        if let Some(team) = self.teams.get_mut(index) {
            team.name.pop();
        }
    }

    pub fn cycle_team_color(&mut self, index: usize, step: isize) {
        if let Some(team) = self.teams.get_mut(index) {
            let pos = TEAM_COLORS
                .iter()
                .position(|c| *c == team.color)
                .unwrap_or(0) as isize;
            let len = TEAM_COLORS.len() as isize;
            team.color = TEAM_COLORS[(pos + step).rem_euclid(len) as usize].to_string();
        }
    }

    /// Focusable rows for the current mode, top to bottom.
    pub fn fields(&self) -> Vec<Field> {
        let mut fields = vec![Field::Mode];
        match self.mode {
            WizardMode::Single => {
                fields.extend([Field::Difficulty, Field::Words]);
            }
            WizardMode::Teams => {
                fields.extend([Field::Difficulty, Field::Words, Field::Rounds]);
            }
            WizardMode::Test => {
                fields.extend([Field::Difficulty, Field::TestWord]);
            }
        }
        fields.extend([Field::Style, Field::Sound]);
        if self.mode == WizardMode::Teams {
            fields.extend((0..self.teams.len()).map(Field::Team));
            fields.push(Field::AddTeam);
        }
        fields.push(Field::Start);
        fields
    }

    pub fn focused(&self) -> Field {
        let fields = self.fields();
        fields[self.focus.min(fields.len() - 1)]
    }

    pub fn focus_up(&mut self) {
        self.focus = self.focus.saturating_sub(1);
    }

    pub fn focus_down(&mut self) {
        let last = self.fields().len() - 1;
        self.focus = (self.focus + 1).min(last);
    }

    fn clamp_focus(&mut self) {
        let last = self.fields().len() - 1;
        self.focus = self.focus.min(last);
    }

    /// Change the focused value by one step.
    ///
    /// `catalogue_len` bounds the test word index.
    pub fn adjust(&mut self, step: isize, catalogue_len: usize) {
        match self.focused() {
            Field::Mode => {
                self.mode = crate::game::cycle(&WizardMode::ALL, self.mode, step);
                self.clamp_focus();
            }
            Field::Difficulty => {
                self.difficulty = if step > 0 {
                    self.difficulty.next()
                } else {
                    self.difficulty.prev()
                };
            }
            Field::Words => {
                self.words = if step > 0 {
                    self.words.next()
                } else {
                    self.words.prev()
                };
            }
            Field::Rounds => {
                let target = self.rounds_to_win as i64 + step as i64;
                self.rounds_to_win =
                    target.clamp(MIN_ROUNDS_TO_WIN as i64, MAX_ROUNDS_TO_WIN as i64) as u32;
            }
            Field::TestWord => {
                if catalogue_len > 0 {
                    let len = catalogue_len as isize;
                    let pos = self.test_word.min(catalogue_len - 1) as isize;
                    self.test_word = (pos + step).rem_euclid(len) as usize;
                }
            }
            Field::Style => {
                self.style = if step > 0 {
                    self.style.next()
                } else {
                    self.style.prev()
                };
            }
            Field::Sound => self.sound = !self.sound,
            Field::Team(index) => self.cycle_team_color(index, step),
            Field::AddTeam | Field::Start => {}
        }
    }

    /// Build the setup for the current selections.
    pub fn setup(&self, store: Option<&WordStore>) -> MatchSetup {
        let mode = match self.mode {
            WizardMode::Single => ModeSetup::Single,
            WizardMode::Teams => ModeSetup::Teams {
                teams: self
                    .teams
                    .iter()
                    .map(|team| Team {
                        name: team.name.trim().to_string(),
                        ..team.clone()
                    })
                    .collect(),
                rounds_to_win: self.rounds_to_win,
            },
            WizardMode::Test => ModeSetup::Test {
                word: store.and_then(|s| s.lookup(self.test_word)).cloned(),
            },
        };
        MatchSetup {
            mode,
            difficulty: self.difficulty,
            words: self.words,
        }
    }
}
