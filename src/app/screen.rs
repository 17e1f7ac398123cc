//! Application screen state management
//!
//! Handles transitions between the application screens:
//! - Theme selection
//! - Match wizard
//! - Playing (board, round result, champion)
//!
//! plus the modal confirm and alert dialogs drawn over them.

use crate::config::{Options, StartMode};
use crate::game::controller::MatchController;
use crate::game::dictionary::{DictionarySource, WordStore};
use crate::sound::{Cue, SoundBoard};
use crate::tui::{ArtCache, Theme};
use crossterm::event::{KeyCode, KeyModifiers};
use rand::rngs::StdRng;
use std::time::Instant;

use super::state::{App, Stage};
use super::wizard::{Field, Wizard, WizardDefaults, WizardMode};

/// Action waiting on a yes/no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    /// Abandon the current match and go back to the wizard
    ExitMatch,
    /// Spend a hint on the current word
    RevealHint,
}

/// Modal overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    /// Two buttons: Enter/y confirms, Esc/n cancels
    Confirm {
        title: String,
        message: String,
        action: PendingAction,
    },
    /// One button: Enter or Esc dismisses
    Alert { title: String, message: String },
}

/// The current application screen
pub enum Screen {
    ThemeSelect,
    Wizard,
    Playing(App),
}

/// Main application coordinator
pub struct AppCoordinator {
    pub screen: Screen,
    pub dialog: Option<Dialog>,
    pub theme: Theme,
    pub wizard: Wizard,
    pub art: ArtCache,
    store: Option<WordStore>,
    dictionary: DictionarySource,
    sound: SoundBoard,
    rng: StdRng,
    /// Whether the application should quit
    pub should_quit: bool,
}

impl AppCoordinator {
    /// Build the coordinator and load the dictionary.
    ///
    /// A failed load leaves the wizard usable and shows an alert.
    pub fn new(options: &Options, sound: SoundBoard, rng: StdRng) -> Self {
        let mode = match options.mode {
            StartMode::Single => WizardMode::Single,
            StartMode::Test => WizardMode::Test,
            StartMode::Wizard | StartMode::Teams => WizardMode::Teams,
        };
        let wizard = Wizard::new(WizardDefaults {
            mode,
            difficulty: options.difficulty,
            sound: options.sound_enabled,
        });
        let screen = match options.mode {
            StartMode::Wizard => Screen::ThemeSelect,
            StartMode::Single | StartMode::Teams | StartMode::Test => Screen::Wizard,
        };

        let mut coordinator = Self {
            screen,
            dialog: None,
            theme: options.theme,
            wizard,
            art: ArtCache::new(&options.asset_dir),
            store: None,
            dictionary: options.dictionary.clone(),
            sound,
            rng,
            should_quit: false,
        };
        coordinator.sound.set_enabled(options.sound_enabled);
        coordinator.load_dictionary();

        if options.mode == StartMode::Single && coordinator.store.is_some() {
            coordinator.start_match();
        }
        coordinator
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn store(&self) -> Option<&WordStore> {
        self.store.as_ref()
    }

    /// (Re)load the dictionary. Returns whether a store is available.
    pub fn load_dictionary(&mut self) -> bool {
        match WordStore::load(&self.dictionary) {
            Ok(store) => {
                self.store = Some(store);
                true
            }
            Err(e) => {
                tracing::error!(error = %e, source = %self.dictionary, "dictionary load failed");
                self.alert(
                    "DICTIONARY ERROR",
                    format!("{}\n\nPress F5 in the wizard to retry.", e),
                );
                false
            }
        }
    }

    fn alert(&mut self, title: &str, message: impl Into<String>) {
        self.dialog = Some(Dialog::Alert {
            title: title.to_string(),
            message: message.into(),
        });
    }

    fn confirm(&mut self, title: &str, message: impl Into<String>, action: PendingAction) {
        self.dialog = Some(Dialog::Confirm {
            title: title.to_string(),
            message: message.into(),
            action,
        });
    }

    /// Route a key press to the dialog or the active screen.
    pub fn on_key(&mut self, code: KeyCode, modifiers: KeyModifiers, now: Instant) {
        if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
            self.quit();
            return;
        }

        if self.dialog.is_some() {
            self.on_dialog_key(code, now);
        } else {
            match self.screen {
                Screen::ThemeSelect => self.on_theme_key(code),
                Screen::Wizard => self.on_wizard_key(code, modifiers),
                Screen::Playing(_) => self.on_playing_key(code, now),
            }
        }
        self.flush_cues();
    }

    fn on_dialog_key(&mut self, code: KeyCode, now: Instant) {
        let Some(dialog) = self.dialog.take() else {
            return;
        };
        match dialog {
            Dialog::Alert { .. } => match code {
                KeyCode::Enter | KeyCode::Esc => {}
                _ => self.dialog = Some(dialog),
            },
            Dialog::Confirm { action, .. } => match code {
                KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.resolve(action, now)
                }
                KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {}
                _ => self.dialog = Some(dialog),
            },
        }
    }

    fn resolve(&mut self, action: PendingAction, now: Instant) {
        match action {
            PendingAction::ExitMatch => {
                if let Screen::Playing(app) = &self.screen {
                    tracing::info!(round = app.controller.current_round(), "match abandoned");
                }
                self.screen = Screen::Wizard;
            }
            PendingAction::RevealHint => {
                if let Screen::Playing(app) = &mut self.screen {
                    app.on_hint(&mut self.rng, now);
                }
            }
        }
    }

    fn on_theme_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Left => self.theme = self.theme.prev(),
            KeyCode::Down | KeyCode::Right => self.theme = self.theme.next(),
            KeyCode::Enter => {
                self.sound.play(Cue::Click);
                tracing::debug!(theme = %self.theme, "theme chosen");
                self.screen = Screen::Wizard;
            }
            KeyCode::Esc => self.quit(),
            _ => {}
        }
    }

    fn on_wizard_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        let focused = self.wizard.focused();
        match code {
            KeyCode::Esc => self.quit(),
            KeyCode::Up => self.wizard.focus_up(),
            KeyCode::Down | KeyCode::Tab => self.wizard.focus_down(),
            KeyCode::Left | KeyCode::Right => {
                let step = if code == KeyCode::Left { -1 } else { 1 };
                let catalogue = self.store.as_ref().map_or(0, WordStore::len);
                self.wizard.adjust(step, catalogue);
                self.sound.set_enabled(self.wizard.sound);
            }
            KeyCode::F(5) => {
                if self.load_dictionary() {
                    self.alert("DICTIONARY", "Dictionary loaded.");
                }
            }
            KeyCode::Char('r') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.wizard.reset();
                self.sound.set_enabled(self.wizard.sound);
            }
            KeyCode::Enter => match focused {
                Field::AddTeam => {
                    self.sound.play(Cue::Click);
                    if let Err(e) = self.wizard.add_team() {
                        self.alert(e.title(), e.to_string());
                    }
                }
                Field::Start => self.start_match(),
                _ => self.wizard.focus_down(),
            },
            KeyCode::Delete => {
                if let Field::Team(index) = focused {
                    self.sound.play(Cue::Click);
                    if let Err(e) = self.wizard.remove_team(index) {
                        self.alert(e.title(), e.to_string());
                    }
                }
            }
            KeyCode::Backspace => {
                if let Field::Team(index) = focused {
                    self.wizard.pop_name_char(index);
                }
            }
            KeyCode::Char(c) => {
                if let Field::Team(index) = focused {
                    self.wizard.push_name_char(index, c);
                }
            }
            _ => {}
        }
    }

    /// Validate the wizard selections and open the first round.
    pub fn start_match(&mut self) {
        let Some(store) = self.store.as_ref() else {
            self.alert(
                "DICTIONARY ERROR",
                "No words are loaded. Press F5 to retry.",
            );
            return;
        };

        let controller = match MatchController::configure(self.wizard.setup(Some(store))) {
            Ok(controller) => controller,
            Err(e) => {
                tracing::debug!(error = %e, "setup rejected");
                self.alert(e.title(), e.to_string());
                return;
            }
        };

        self.sound.set_enabled(self.wizard.sound);
        self.art.prepare(self.wizard.style);

        let mut app = App::new(controller, self.wizard.style);
        if let Err(e) = app.start_round(store, &mut self.rng) {
            tracing::warn!(error = %e, "no word to start the match");
            self.alert("NO WORDS", e.to_string());
            return;
        }
        self.sound.play(Cue::Click);
        self.screen = Screen::Playing(app);
    }

    fn on_playing_key(&mut self, code: KeyCode, now: Instant) {
        let Screen::Playing(app) = &mut self.screen else {
            return;
        };

        match (&app.stage, code) {
            (_, KeyCode::Esc | KeyCode::Enter) if app.controller.is_over() => {
                self.sound.play(Cue::Click);
                self.screen = Screen::Wizard;
            }
            (stage, KeyCode::Esc) => {
                let message = match stage {
                    Stage::Guessing => "Leave this match? The current round is lost.",
                    Stage::Announcing(_) | Stage::Champion { .. } => {
                        "Leave this match? The scores are discarded."
                    }
                };
                self.sound.play(Cue::Click);
                self.confirm("EXIT GAME", message, PendingAction::ExitMatch);
            }
            (Stage::Guessing, KeyCode::Char('?')) => {
                if app.can_hint() {
                    let clue = app.clue().to_string();
                    self.sound.play(Cue::Click);
                    self.confirm(
                        "HINT",
                        format!("{}\n\nReveal a letter?", clue),
                        PendingAction::RevealHint,
                    );
                }
            }
            (Stage::Guessing, KeyCode::Char(c)) if c.is_alphabetic() => {
                self.sound.play(Cue::Click);
                app.on_letter(c, now);
            }
            (Stage::Announcing(_), KeyCode::Enter | KeyCode::Char(' ')) => {
                let Some(store) = self.store.as_ref() else {
                    return;
                };
                if let Err(e) = app.next_round(store, &mut self.rng) {
                    tracing::warn!(error = %e, "no word for the next round");
                    self.screen = Screen::Wizard;
                    self.alert("NO WORDS", e.to_string());
                }
            }
            _ => {}
        }
    }

    /// Advance timers; call on every tick.
    pub fn tick(&mut self, now: Instant) {
        if self.dialog.is_none() {
            if let Screen::Playing(app) = &mut self.screen {
                app.tick(now);
            }
        }
        self.flush_cues();
    }

    fn flush_cues(&mut self) {
        if let Screen::Playing(app) = &mut self.screen {
            for cue in app.take_cues() {
                self.sound.play(cue);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::round::RoundPhase;
    use crate::sound::RecordingPlayer;
    use rand::SeedableRng;
    use std::path::PathBuf;
    use std::time::Duration;

    fn coordinator_with(options: Options) -> (AppCoordinator, RecordingPlayer) {
        let recorder = RecordingPlayer::default();
        let sound = SoundBoard::new(true, Box::new(recorder.clone()));
        let coordinator = AppCoordinator::new(&options, sound, StdRng::seed_from_u64(11));
        (coordinator, recorder)
    }

    fn coordinator() -> (AppCoordinator, RecordingPlayer) {
        coordinator_with(Options::default())
    }

    fn press(c: &mut AppCoordinator, code: KeyCode) {
        c.on_key(code, KeyModifiers::NONE, Instant::now());
    }

    fn focus(c: &mut AppCoordinator, field: Field) {
        while c.wizard.focused() != field {
            press(c, KeyCode::Down);
        }
    }

    fn app(c: &AppCoordinator) -> &App {
        match &c.screen {
            Screen::Playing(app) => app,
            _ => panic!("not playing"),
        }
    }

    #[test]
    fn test_theme_select_then_wizard() {
        let (mut c, _) = coordinator();
        assert!(matches!(c.screen, Screen::ThemeSelect));
        assert_eq!(c.theme, Theme::Neon);

        press(&mut c, KeyCode::Down);
        assert_eq!(c.theme, Theme::Cyberpunk);
        press(&mut c, KeyCode::Enter);
        assert!(matches!(c.screen, Screen::Wizard));
        assert!(c.dialog.is_none());
    }

    #[test]
    fn test_start_teams_match() {
        let (mut c, _) = coordinator();
        press(&mut c, KeyCode::Enter);
        focus(&mut c, Field::Start);
        press(&mut c, KeyCode::Enter);

        let app = app(&c);
        assert!(app.round.is_active());
        assert_eq!(app.controller.round_label(), "1/5");
        assert_eq!(app.controller.current_team().unwrap().name, "Team 1");
    }

    #[test]
    fn test_blank_team_name_alerts() {
        let (mut c, _) = coordinator();
        press(&mut c, KeyCode::Enter);
        focus(&mut c, Field::Team(0));
        for _ in 0..10 {
            press(&mut c, KeyCode::Backspace);
        }
        focus(&mut c, Field::Start);
        press(&mut c, KeyCode::Enter);

        assert!(matches!(c.screen, Screen::Wizard));
        assert_eq!(
            c.dialog,
            Some(Dialog::Alert {
                title: "NAMES REQUIRED".into(),
                message: "team 1 needs a name".into(),
            })
        );
        press(&mut c, KeyCode::Esc);
        assert!(c.dialog.is_none());
    }

    #[test]
    fn test_fifth_team_alerts() {
        let (mut c, _) = coordinator();
        press(&mut c, KeyCode::Enter);
        focus(&mut c, Field::AddTeam);
        press(&mut c, KeyCode::Enter);
        press(&mut c, KeyCode::Enter);
        assert_eq!(c.wizard.teams().len(), 4);
        assert!(c.dialog.is_none());

        press(&mut c, KeyCode::Enter);
        assert_eq!(c.wizard.teams().len(), 4);
        assert!(matches!(
            &c.dialog,
            Some(Dialog::Alert { title, .. }) if title == "TEAM LIMIT"
        ));
    }

    #[test]
    fn test_removing_below_two_alerts() {
        let (mut c, _) = coordinator();
        press(&mut c, KeyCode::Enter);
        focus(&mut c, Field::Team(1));
        press(&mut c, KeyCode::Delete);
        assert_eq!(c.wizard.teams().len(), 2);
        assert!(matches!(c.dialog, Some(Dialog::Alert { .. })));
    }

    #[test]
    fn test_exit_requires_confirmation() {
        let (mut c, _) = coordinator();
        press(&mut c, KeyCode::Enter);
        focus(&mut c, Field::Start);
        press(&mut c, KeyCode::Enter);

        press(&mut c, KeyCode::Esc);
        assert!(matches!(
            c.dialog,
            Some(Dialog::Confirm { action: PendingAction::ExitMatch, .. })
        ));

        // Declining keeps the round going
        press(&mut c, KeyCode::Char('n'));
        assert!(c.dialog.is_none());
        assert!(app(&c).round.is_active());

        press(&mut c, KeyCode::Esc);
        press(&mut c, KeyCode::Enter);
        assert!(matches!(c.screen, Screen::Wizard));
        // Wizard selections survive the match
        assert_eq!(c.wizard.focused(), Field::Start);
    }

    #[test]
    fn test_letters_blocked_while_dialog_open() {
        let (mut c, _) = coordinator();
        press(&mut c, KeyCode::Enter);
        focus(&mut c, Field::Start);
        press(&mut c, KeyCode::Enter);

        press(&mut c, KeyCode::Esc);
        press(&mut c, KeyCode::Char('q'));
        assert!(app(&c).round.guessed_letters().is_empty());
    }

    #[test]
    fn test_hint_confirm_reveals_letter() {
        let (mut c, recorder) = coordinator();
        press(&mut c, KeyCode::Enter);
        focus(&mut c, Field::Start);
        press(&mut c, KeyCode::Enter);
        recorder.cues.borrow_mut().clear();

        press(&mut c, KeyCode::Char('?'));
        match &c.dialog {
            Some(Dialog::Confirm { message, action, .. }) => {
                assert_eq!(*action, PendingAction::RevealHint);
                assert!(message.starts_with(app(&c).clue()));
            }
            other => panic!("unexpected dialog {:?}", other),
        }

        press(&mut c, KeyCode::Char('y'));
        assert_eq!(app(&c).round.guessed_letters().len(), 1);
        assert_eq!(*recorder.cues.borrow(), vec![Cue::Click, Cue::Correct]);
    }

    #[test]
    fn test_non_letters_are_not_guesses() {
        let (mut c, _) = coordinator();
        press(&mut c, KeyCode::Enter);
        focus(&mut c, Field::Start);
        press(&mut c, KeyCode::Enter);

        press(&mut c, KeyCode::Char('7'));
        press(&mut c, KeyCode::Char(' '));
        assert!(app(&c).round.guessed_letters().is_empty());
        assert_eq!(app(&c).round.wrong_attempts(), 0);
    }

    #[test]
    fn test_lost_round_cue_fires_on_announcement() {
        let (mut c, recorder) = coordinator_with(Options {
            mode: StartMode::Single,
            difficulty: crate::game::Difficulty::Extreme,
            ..Options::default()
        });
        let word = app(&c).round.word();
        let misses: Vec<char> = ('A'..='Z').filter(|l| !word.contains(*l)).take(3).collect();

        let start = Instant::now();
        for letter in misses {
            c.on_key(KeyCode::Char(letter), KeyModifiers::NONE, start);
        }
        assert_eq!(app(&c).round.phase(), RoundPhase::Lost);
        assert!(!recorder.cues.borrow().contains(&Cue::Defeat));

        c.tick(start + Duration::from_millis(1000));
        assert!(matches!(app(&c).stage, Stage::Guessing));

        c.tick(start + Duration::from_millis(1500));
        assert!(matches!(app(&c).stage, Stage::Announcing(_)));
        assert_eq!(recorder.cues.borrow().last(), Some(&Cue::Defeat));

        press(&mut c, KeyCode::Enter);
        assert!(app(&c).round.is_active());
        assert_eq!(app(&c).controller.current_round(), 2);
    }

    #[test]
    fn test_letter_guess_clicks() {
        let (mut c, recorder) = coordinator_with(Options {
            mode: StartMode::Single,
            ..Options::default()
        });
        let word = app(&c).round.word();
        let miss = ('A'..='Z').find(|l| !word.contains(*l)).unwrap();

        press(&mut c, KeyCode::Char(miss));
        assert_eq!(*recorder.cues.borrow(), vec![Cue::Click, Cue::Wrong]);
    }

    #[test]
    fn test_champion_leaves_without_confirmation() {
        let (mut c, _) = coordinator_with(Options {
            mode: StartMode::Teams,
            ..Options::default()
        });
        focus(&mut c, Field::Rounds);
        for _ in 0..10 {
            press(&mut c, KeyCode::Left);
        }
        assert_eq!(c.wizard.rounds_to_win, 1);
        focus(&mut c, Field::Start);
        press(&mut c, KeyCode::Enter);

        let letters: Vec<char> = app(&c).round.word().chars().filter(|l| *l != ' ').collect();
        let start = Instant::now();
        for letter in letters {
            c.on_key(KeyCode::Char(letter), KeyModifiers::NONE, start);
        }
        c.tick(start + Duration::from_millis(500));
        assert!(matches!(app(&c).stage, Stage::Champion { .. }));

        press(&mut c, KeyCode::Esc);
        assert!(c.dialog.is_none());
        assert!(matches!(c.screen, Screen::Wizard));
    }

    #[test]
    fn test_exit_from_result_mentions_scores() {
        let (mut c, _) = coordinator_with(Options {
            mode: StartMode::Single,
            difficulty: crate::game::Difficulty::Extreme,
            ..Options::default()
        });
        let word = app(&c).round.word();
        let start = Instant::now();
        for letter in ('A'..='Z').filter(|l| !word.contains(*l)).take(3) {
            c.on_key(KeyCode::Char(letter), KeyModifiers::NONE, start);
        }
        c.tick(start + Duration::from_millis(1500));
        assert!(matches!(app(&c).stage, Stage::Announcing(_)));

        press(&mut c, KeyCode::Esc);
        match &c.dialog {
            Some(Dialog::Confirm { message, action, .. }) => {
                assert_eq!(*action, PendingAction::ExitMatch);
                assert!(!message.contains("round is lost"));
            }
            other => panic!("unexpected dialog {:?}", other),
        }
    }

    #[test]
    fn test_single_mode_skips_wizard() {
        let (c, _) = coordinator_with(Options {
            mode: StartMode::Single,
            ..Options::default()
        });
        let app = app(&c);
        assert!(!app.controller.is_teams());
        assert_eq!(app.controller.round_label(), "1");
    }

    #[test]
    fn test_preselected_test_mode() {
        let (c, _) = coordinator_with(Options {
            mode: StartMode::Test,
            ..Options::default()
        });
        assert!(matches!(c.screen, Screen::Wizard));
        assert_eq!(c.wizard.mode, WizardMode::Test);
    }

    #[test]
    fn test_dictionary_failure_alerts_and_retry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("palabras.json");
        let (mut c, _) = coordinator_with(Options {
            mode: StartMode::Teams,
            dictionary: DictionarySource::File(path.clone()),
            ..Options::default()
        });
        assert!(c.store().is_none());
        assert!(matches!(
            &c.dialog,
            Some(Dialog::Alert { title, .. }) if title == "DICTIONARY ERROR"
        ));
        press(&mut c, KeyCode::Enter);

        focus(&mut c, Field::Start);
        press(&mut c, KeyCode::Enter);
        assert!(matches!(c.screen, Screen::Wizard));
        assert!(c.dialog.is_some());
        press(&mut c, KeyCode::Enter);

        std::fs::write(
            &path,
            r#"{"normal": {"personas": [{"palabra": "Noé", "pista": "Arca"}]}}"#,
        )
        .unwrap();
        press(&mut c, KeyCode::F(5));
        assert_eq!(c.store().map(WordStore::len), Some(1));
        press(&mut c, KeyCode::Enter);

        press(&mut c, KeyCode::Enter);
        assert_eq!(app(&c).round.word(), "NOE");
    }

    #[test]
    fn test_missing_art_does_not_block_start() {
        let (mut c, _) = coordinator_with(Options {
            mode: StartMode::Teams,
            asset_dir: PathBuf::from("/nonexistent/art"),
            ..Options::default()
        });
        focus(&mut c, Field::Style);
        press(&mut c, KeyCode::Right);
        focus(&mut c, Field::Start);
        press(&mut c, KeyCode::Enter);

        assert!(matches!(c.screen, Screen::Playing(_)));
        assert!(c.art.is_missing(c.wizard.style));
    }

    #[test]
    fn test_sound_toggle_mutes_cues() {
        let (mut c, recorder) = coordinator_with(Options {
            mode: StartMode::Teams,
            ..Options::default()
        });
        focus(&mut c, Field::Sound);
        press(&mut c, KeyCode::Right);
        assert!(!c.wizard.sound);

        focus(&mut c, Field::Start);
        press(&mut c, KeyCode::Enter);
        press(&mut c, KeyCode::Char('a'));
        assert!(recorder.cues.borrow().is_empty());
    }
}
