//! Round engine: one word, a guessed-letter set and an attempt budget.
//!
//! ```text
//! Idle --start--> Active --guess(hit, all revealed)--> Won
//!                   |  \--guess(miss, budget spent)--> Lost
//!                   \--guess/hint--> Active
//! ```
//!
//! `Won` and `Lost` are terminal until the next `start`.

use super::{normalize_letter, WordEntry};
use rand::Rng;
use std::collections::BTreeSet;

/// Round lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Idle,
    Active,
    Won,
    Lost,
}

/// Terminal result of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Won,
    Lost,
}

/// Result of an accepted guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Letter is in the word; `revealed` positions were uncovered
    Hit { letter: char, revealed: usize },
    /// Letter is not in the word
    Miss { letter: char, remaining: u32 },
}

impl GuessOutcome {
    pub fn letter(&self) -> char {
        match self {
            GuessOutcome::Hit { letter, .. } | GuessOutcome::Miss { letter, .. } => *letter,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, GuessOutcome::Hit { .. })
    }
}

/// Rejected guess or hint. None of these change the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GuessError {
    #[error("round is not active ({0:?})")]
    NotActive(RoundPhase),
    #[error("'{0}' was already guessed")]
    AlreadyGuessed(char),
    #[error("'{0}' is not a letter")]
    NotALetter(char),
    #[error("no letters left to reveal")]
    NothingToReveal,
}

/// One cell of the board as the player sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// Word separator, always visible
    Gap,
    Hidden,
    Shown(char),
}

/// The round state machine.
#[derive(Debug, Clone)]
pub struct RoundEngine {
    entry: Option<WordEntry>,
    /// Normalized target, one char per board position
    target: Vec<char>,
    guessed: BTreeSet<char>,
    wrong_attempts: u32,
    max_attempts: u32,
    phase: RoundPhase,
}

impl Default for RoundEngine {
    fn default() -> Self {
        Self {
            entry: None,
            target: Vec::new(),
            guessed: BTreeSet::new(),
            wrong_attempts: 0,
            max_attempts: 0,
            phase: RoundPhase::Idle,
        }
    }
}

impl RoundEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a round with a fresh word. Allowed from any phase.
    pub fn start(&mut self, entry: WordEntry, max_attempts: u32) {
        debug_assert!(max_attempts > 0, "attempt budget must be positive");
        self.target = entry.normalized().chars().collect();
        self.entry = Some(entry);
        self.guessed.clear();
        self.wrong_attempts = 0;
        self.max_attempts = max_attempts.max(1);
        self.phase = RoundPhase::Active;
        tracing::debug!(
            letters = self.target.len(),
            max_attempts = self.max_attempts,
            "round started"
        );
    }

    /// Guess one letter.
    pub fn guess(&mut self, letter: char) -> Result<GuessOutcome, GuessError> {
        if self.phase != RoundPhase::Active {
            return Err(GuessError::NotActive(self.phase));
        }
        let letter = normalize_letter(letter).ok_or(GuessError::NotALetter(letter))?;
        if !self.guessed.insert(letter) {
            return Err(GuessError::AlreadyGuessed(letter));
        }

        let revealed = self.target.iter().filter(|c| **c == letter).count();
        if revealed > 0 {
            if self.is_fully_revealed() {
                self.phase = RoundPhase::Won;
            }
            Ok(GuessOutcome::Hit { letter, revealed })
        } else {
            self.wrong_attempts += 1;
            if self.wrong_attempts >= self.max_attempts {
                self.phase = RoundPhase::Lost;
            }
            Ok(GuessOutcome::Miss {
                letter,
                remaining: self.remaining_attempts(),
            })
        }
    }

    /// Reveal one random hidden letter, going through the same path as a guess.
    pub fn hint<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<GuessOutcome, GuessError> {
        if self.phase != RoundPhase::Active {
            return Err(GuessError::NotActive(self.phase));
        }
        let hidden: Vec<char> = self
            .target
            .iter()
            .copied()
            .filter(|c| *c != ' ' && !self.guessed.contains(c))
            .collect();
        if hidden.is_empty() {
            return Err(GuessError::NothingToReveal);
        }
        let letter = hidden[rng.random_range(0..hidden.len())];
        self.guess(letter)
    }

    fn is_fully_revealed(&self) -> bool {
        self.target
            .iter()
            .all(|c| *c == ' ' || self.guessed.contains(c))
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == RoundPhase::Active
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, RoundPhase::Won | RoundPhase::Lost)
    }

    /// The outcome, once the round has ended.
    pub fn outcome(&self) -> Option<RoundOutcome> {
        match self.phase {
            RoundPhase::Won => Some(RoundOutcome::Won),
            RoundPhase::Lost => Some(RoundOutcome::Lost),
            RoundPhase::Idle | RoundPhase::Active => None,
        }
    }

    pub fn entry(&self) -> Option<&WordEntry> {
        self.entry.as_ref()
    }

    /// The normalized word.
    pub fn word(&self) -> String {
        self.target.iter().collect()
    }

    pub fn board(&self) -> Vec<Cell> {
        self.target
            .iter()
            .map(|c| {
                if *c == ' ' {
                    Cell::Gap
                } else if self.guessed.contains(c) {
                    Cell::Shown(*c)
                } else {
                    Cell::Hidden
                }
            })
            .collect()
    }

    pub fn guessed_letters(&self) -> &BTreeSet<char> {
        &self.guessed
    }

    /// Whether a letter has been tried, hit or miss.
    pub fn was_guessed(&self, letter: char) -> bool {
        normalize_letter(letter).is_some_and(|l| self.guessed.contains(&l))
    }

    /// Whether a tried letter turned out to be in the word.
    pub fn is_in_word(&self, letter: char) -> bool {
        normalize_letter(letter).is_some_and(|l| self.target.contains(&l))
    }

    pub fn wrong_attempts(&self) -> u32 {
        self.wrong_attempts
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn remaining_attempts(&self) -> u32 {
        self.max_attempts.saturating_sub(self.wrong_attempts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Category, Difficulty};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn entry(word: &str) -> WordEntry {
        WordEntry::new(word, "hint", Category::Person, Difficulty::Normal)
    }

    fn active(word: &str, max_attempts: u32) -> RoundEngine {
        let mut round = RoundEngine::new();
        round.start(entry(word), max_attempts);
        round
    }

    #[test]
    fn test_new_round_is_idle() {
        let mut round = RoundEngine::new();
        assert_eq!(round.phase(), RoundPhase::Idle);
        assert_eq!(round.guess('A'), Err(GuessError::NotActive(RoundPhase::Idle)));
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            round.hint(&mut rng),
            Err(GuessError::NotActive(RoundPhase::Idle))
        );
    }

    #[test]
    fn test_jesus_all_hits_wins() {
        let mut round = active("JESUS", 5);
        for letter in ['J', 'E', 'S'] {
            assert!(round.guess(letter).unwrap().is_hit());
            assert_eq!(round.phase(), RoundPhase::Active);
        }
        assert_eq!(
            round.guess('U'),
            Ok(GuessOutcome::Hit {
                letter: 'U',
                revealed: 1
            })
        );
        assert_eq!(round.phase(), RoundPhase::Won);
        assert_eq!(round.outcome(), Some(RoundOutcome::Won));
        assert_eq!(round.wrong_attempts(), 0);
    }

    #[test]
    fn test_jesus_three_misses_loses() {
        let mut round = active("JESUS", 3);
        assert_eq!(
            round.guess('A'),
            Ok(GuessOutcome::Miss {
                letter: 'A',
                remaining: 2
            })
        );
        round.guess('B').unwrap();
        assert_eq!(round.phase(), RoundPhase::Active);
        round.guess('C').unwrap();
        assert_eq!(round.phase(), RoundPhase::Lost);
        assert_eq!(round.wrong_attempts(), 3);

        // Fourth guess rejected, nothing changes
        assert_eq!(round.guess('D'), Err(GuessError::NotActive(RoundPhase::Lost)));
        assert_eq!(round.wrong_attempts(), 3);
        assert_eq!(round.guessed_letters().len(), 3);
    }

    #[test]
    fn test_repeated_guess_is_noop() {
        let mut round = active("JESUS", 5);
        round.guess('X').unwrap();
        round.guess('S').unwrap();

        assert_eq!(round.guess('X'), Err(GuessError::AlreadyGuessed('X')));
        assert_eq!(round.guess('s'), Err(GuessError::AlreadyGuessed('S')));
        assert_eq!(round.wrong_attempts(), 1);
        assert_eq!(round.guessed_letters().len(), 2);
    }

    #[test]
    fn test_accented_word_matches_plain_guess() {
        let mut round = active("Jesús", 5);
        assert_eq!(round.word(), "JESUS");
        assert_eq!(
            round.guess('u'),
            Ok(GuessOutcome::Hit {
                letter: 'U',
                revealed: 1
            })
        );
    }

    #[test]
    fn test_accented_guess_matches_plain_word() {
        let mut round = active("GENESIS", 5);
        assert!(round.guess('É').unwrap().is_hit());
        assert!(round.was_guessed('e'));
        // Both spellings refer to the same letter
        assert_eq!(round.guess('E'), Err(GuessError::AlreadyGuessed('E')));
    }

    #[test]
    fn test_spaces_are_revealed_and_free() {
        let mut round = active("Espíritu Santo", 5);
        let board = round.board();
        assert_eq!(board[8], Cell::Gap);
        assert_eq!(board.iter().filter(|c| **c == Cell::Hidden).count(), 13);

        for letter in "ESPIRITUANTO".chars() {
            let _ = round.guess(letter);
        }
        assert_eq!(round.phase(), RoundPhase::Won);
        assert_eq!(round.wrong_attempts(), 0);
        assert_eq!(round.guess(' '), Err(GuessError::NotActive(RoundPhase::Won)));
    }

    #[test]
    fn test_space_guess_rejected_while_active() {
        let mut round = active("CANTAR DE LOS CANTARES", 5);
        assert_eq!(round.guess(' '), Err(GuessError::NotALetter(' ')));
        assert_eq!(round.wrong_attempts(), 0);
        assert!(round.guessed_letters().is_empty());
    }

    #[test]
    fn test_board_reveals_all_positions_of_letter() {
        let mut round = active("JESUS", 5);
        assert_eq!(
            round.guess('S'),
            Ok(GuessOutcome::Hit {
                letter: 'S',
                revealed: 2
            })
        );
        assert_eq!(
            round.board(),
            vec![
                Cell::Hidden,
                Cell::Hidden,
                Cell::Shown('S'),
                Cell::Hidden,
                Cell::Shown('S')
            ]
        );
    }

    #[test]
    fn test_hint_reveals_hidden_letter() {
        let mut round = active("PEDRO", 5);
        round.guess('P').unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        let outcome = round.hint(&mut rng).unwrap();
        assert!(outcome.is_hit());
        assert!("EDRO".contains(outcome.letter()));
        assert_eq!(round.wrong_attempts(), 0);
        assert_eq!(round.guessed_letters().len(), 2);
    }

    #[test]
    fn test_hints_can_finish_the_round() {
        let mut round = active("FE", 3);
        let mut rng = StdRng::seed_from_u64(9);
        round.hint(&mut rng).unwrap();
        round.hint(&mut rng).unwrap();
        assert_eq!(round.phase(), RoundPhase::Won);
        assert!(round.is_terminal());
        assert_eq!(
            round.hint(&mut rng),
            Err(GuessError::NotActive(RoundPhase::Won))
        );
    }

    #[test]
    fn test_start_resets_after_terminal() {
        let mut round = active("FE", 1);
        round.guess('Z').unwrap();
        assert_eq!(round.phase(), RoundPhase::Lost);

        round.start(entry("LUZ"), 4);
        assert_eq!(round.phase(), RoundPhase::Active);
        assert_eq!(round.wrong_attempts(), 0);
        assert_eq!(round.remaining_attempts(), 4);
        assert!(round.guessed_letters().is_empty());
        assert_eq!(round.word(), "LUZ");
    }

    #[test]
    fn test_is_in_word() {
        let mut round = active("NOÉ", 5);
        round.guess('X').unwrap();
        assert!(round.is_in_word('e'));
        assert!(!round.is_in_word('X'));
    }

    fn word_strategy() -> impl Strategy<Value = String> {
        "[A-Z]{1,8}( [A-Z]{1,8}){0,2}"
    }

    proptest! {
        #[test]
        fn prop_guessing_every_letter_wins(word in word_strategy(), max in 1u32..8) {
            let mut round = active(&word, max);
            for letter in word.chars().filter(|c| *c != ' ') {
                let _ = round.guess(letter);
            }
            prop_assert_eq!(round.phase(), RoundPhase::Won);
            prop_assert_eq!(round.wrong_attempts(), 0);
        }

        #[test]
        fn prop_lost_exactly_at_budget(idx in 0usize..5) {
            let difficulty = Difficulty::ALL[idx];
            let max = difficulty.max_attempts();
            // Digits never appear in the word
            let mut round = active("QWERTY", max);
            for (i, miss) in "0123456789".chars().take(max as usize).enumerate() {
                prop_assert_eq!(round.phase(), RoundPhase::Active);
                round.guess(miss).unwrap();
                prop_assert_eq!(round.wrong_attempts(), i as u32 + 1);
            }
            prop_assert_eq!(round.phase(), RoundPhase::Lost);
            prop_assert_eq!(round.wrong_attempts(), max);
            prop_assert!(round.guess('Q').is_err());
        }

        #[test]
        fn prop_repeat_guess_changes_nothing(word in word_strategy(), letter in "[A-Z]") {
            let mut round = active(&word, 7);
            let letter = letter.chars().next().unwrap();
            let _ = round.guess(letter);
            let wrong = round.wrong_attempts();
            let size = round.guessed_letters().len();
            let phase = round.phase();
            let again = round.guess(letter);
            prop_assert!(again.is_err());
            prop_assert_eq!(round.wrong_attempts(), wrong);
            prop_assert_eq!(round.guessed_letters().len(), size);
            prop_assert_eq!(round.phase(), phase);
        }
    }
}
