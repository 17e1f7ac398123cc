//! Audio cues
//!
//! Game code fires cues and moves on. Players never report failure back.

use std::io::Write;

/// Something worth an audible cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Click,
    Correct,
    Wrong,
    Victory,
    Defeat,
}

/// Plays cues. Implementations must not block and must swallow errors.
pub trait CuePlayer {
    fn play(&self, cue: Cue);
}

/// Rings the terminal bell. Clicks stay silent.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl TerminalBell {
    fn bells(cue: Cue) -> usize {
        match cue {
            Cue::Click => 0,
            Cue::Correct | Cue::Wrong => 1,
            Cue::Victory | Cue::Defeat => 2,
        }
    }
}

impl CuePlayer for TerminalBell {
    fn play(&self, cue: Cue) {
        let count = Self::bells(cue);
        if count == 0 {
            return;
        }
        let mut out = std::io::stdout();
        let _ = out.write_all(&vec![0x07; count]);
        let _ = out.flush();
    }
}

/// Gate in front of a player, toggled from the wizard.
pub struct SoundBoard {
    enabled: bool,
    player: Box<dyn CuePlayer>,
}

impl SoundBoard {
    pub fn new(enabled: bool, player: Box<dyn CuePlayer>) -> Self {
        Self { enabled, player }
    }

    pub fn play(&self, cue: Cue) {
        tracing::trace!(?cue, enabled = self.enabled, "cue");
        if self.enabled {
            self.player.play(cue);
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

/// Records cues for assertions.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct RecordingPlayer {
    pub cues: std::rc::Rc<std::cell::RefCell<Vec<Cue>>>,
}

#[cfg(test)]
impl CuePlayer for RecordingPlayer {
    fn play(&self, cue: Cue) {
        self.cues.borrow_mut().push(cue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enabled_board_forwards() {
        let recorder = RecordingPlayer::default();
        let board = SoundBoard::new(true, Box::new(recorder.clone()));
        board.play(Cue::Correct);
        board.play(Cue::Victory);
        assert_eq!(*recorder.cues.borrow(), vec![Cue::Correct, Cue::Victory]);
    }

    #[test]
    fn test_disabled_board_is_silent() {
        let recorder = RecordingPlayer::default();
        let mut board = SoundBoard::new(false, Box::new(recorder.clone()));
        board.play(Cue::Wrong);
        assert!(recorder.cues.borrow().is_empty());

        board.set_enabled(true);
        board.play(Cue::Click);
        assert_eq!(*recorder.cues.borrow(), vec![Cue::Click]);
    }

    #[test]
    fn test_bell_counts() {
        assert_eq!(TerminalBell::bells(Cue::Click), 0);
        assert_eq!(TerminalBell::bells(Cue::Wrong), 1);
        assert_eq!(TerminalBell::bells(Cue::Defeat), 2);
    }
}
