//! Game logic: word catalogue, rounds, matches, setup validation

pub mod controller;
pub mod dictionary;
pub mod round;
pub mod validation;

use std::fmt;
use std::str::FromStr;

use unicode_normalization::UnicodeNormalization;

/// Combining diacritical marks block stripped during normalization.
const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036F}';

/// Error returned when a setting string does not name a known value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseSettingError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseSettingError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Difficulty tier. Decides which words are drawn and how many misses a round allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Difficulty {
    VeryEasy,
    Easy,
    #[default]
    Normal,
    Hard,
    Extreme,
}

impl Difficulty {
    /// All tiers, easiest first. This is also the catalogue order.
    pub const ALL: [Difficulty; 5] = [
        Difficulty::VeryEasy,
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Extreme,
    ];

    /// Wrong guesses allowed before the round is lost.
    pub fn max_attempts(self) -> u32 {
        match self {
            Difficulty::VeryEasy => 7,
            Difficulty::Easy => 6,
            Difficulty::Normal => 5,
            Difficulty::Hard => 4,
            Difficulty::Extreme => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::VeryEasy => "Very Easy",
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
            Difficulty::Extreme => "Extreme",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = ParseSettingError;

    /// Accepts the English names and the dictionary's own tier keys.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "very_easy" | "very-easy" | "muy_facil" => Ok(Difficulty::VeryEasy),
            "easy" | "facil" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" | "dificil" => Ok(Difficulty::Hard),
            "extreme" | "extremo" => Ok(Difficulty::Extreme),
            _ => Err(ParseSettingError::new("difficulty", s)),
        }
    }
}

/// Word category within a difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Person,
    Book,
    Concept,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Person, Category::Book, Category::Concept];

    pub fn label(self) -> &'static str {
        match self {
            Category::Person => "People",
            Category::Book => "Books",
            Category::Concept => "Concepts",
        }
    }
}

/// Where random words are drawn from: one category, or all three pooled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WordSource {
    #[default]
    Mixed,
    Only(Category),
}

impl WordSource {
    pub const ALL: [WordSource; 4] = [
        WordSource::Mixed,
        WordSource::Only(Category::Person),
        WordSource::Only(Category::Book),
        WordSource::Only(Category::Concept),
    ];

    /// Categories contributing to the pool.
    pub fn categories(self) -> &'static [Category] {
        match self {
            WordSource::Mixed => &Category::ALL,
            WordSource::Only(Category::Person) => &[Category::Person],
            WordSource::Only(Category::Book) => &[Category::Book],
            WordSource::Only(Category::Concept) => &[Category::Concept],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WordSource::Mixed => "Mixed",
            WordSource::Only(category) => category.label(),
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

/// A catalogue word with its hint. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    pub word: String,
    pub hint: String,
    pub category: Category,
    pub difficulty: Difficulty,
}

impl WordEntry {
    pub fn new(
        word: impl Into<String>,
        hint: impl Into<String>,
        category: Category,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            word: word.into(),
            hint: hint.into(),
            category,
            difficulty,
        }
    }

    /// The comparison form of the word.
    pub fn normalized(&self) -> String {
        normalize(&self.word)
    }
}

/// Strip diacritics and uppercase: "Moisés" becomes "MOISES".
///
/// Applying it twice gives the same result as applying it once.
pub fn normalize(text: &str) -> String {
    text.nfd()
        .filter(|c| !COMBINING_MARKS.contains(c))
        .flat_map(char::to_uppercase)
        .collect()
}

/// Normalize a single guessed character.
///
/// Returns `None` when the character does not fold to exactly one letter.
pub fn normalize_letter(c: char) -> Option<char> {
    let mut buf = [0u8; 4];
    let folded = normalize(c.encode_utf8(&mut buf));
    let mut chars = folded.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) if !letter.is_whitespace() && !letter.is_control() => Some(letter),
        _ => None,
    }
}

/// Step through a fixed option list, wrapping at both ends.
pub(crate) fn cycle<T: Copy + PartialEq>(all: &[T], current: T, step: isize) -> T {
    let len = all.len() as isize;
    let pos = all.iter().position(|v| *v == current).unwrap_or(0) as isize;
    all[(pos + step).rem_euclid(len) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempts_table() {
        assert_eq!(Difficulty::VeryEasy.max_attempts(), 7);
        assert_eq!(Difficulty::Easy.max_attempts(), 6);
        assert_eq!(Difficulty::Normal.max_attempts(), 5);
        assert_eq!(Difficulty::Hard.max_attempts(), 4);
        assert_eq!(Difficulty::Extreme.max_attempts(), 3);
    }

    #[test]
    fn test_normalize_strips_accents() {
        assert_eq!(normalize("Moisés"), "MOISES");
        assert_eq!(normalize("génesis"), "GENESIS");
        assert_eq!(normalize("Éxodo"), "EXODO");
        assert_eq!(normalize("ESPÍRITU SANTO"), "ESPIRITU SANTO");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for word in ["JESÚS", "Ñandú", "PEDRO", "über", "Cantar de los Cantares"] {
            let once = normalize(word);
            assert_eq!(normalize(&once), once, "not a fixed point: {}", word);
        }
    }

    #[test]
    fn test_enye_folds_to_n() {
        assert_eq!(normalize("Ñ"), "N");
        assert_eq!(normalize_letter('ñ'), Some('N'));
    }

    #[test]
    fn test_normalize_letter() {
        assert_eq!(normalize_letter('e'), Some('E'));
        assert_eq!(normalize_letter('É'), Some('E'));
        assert_eq!(normalize_letter('z'), Some('Z'));
        assert_eq!(normalize_letter(' '), None);
        assert_eq!(normalize_letter('\n'), None);
        // Uppercases to two letters
        assert_eq!(normalize_letter('ß'), None);
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!("very_easy".parse::<Difficulty>(), Ok(Difficulty::VeryEasy));
        assert_eq!("muy_facil".parse::<Difficulty>(), Ok(Difficulty::VeryEasy));
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(" extremo ".parse::<Difficulty>(), Ok(Difficulty::Extreme));
        let err = "impossible".parse::<Difficulty>().unwrap_err();
        assert_eq!(err.to_string(), "unknown difficulty 'impossible'");
    }

    #[test]
    fn test_difficulty_cycles() {
        assert_eq!(Difficulty::Extreme.next(), Difficulty::VeryEasy);
        assert_eq!(Difficulty::VeryEasy.prev(), Difficulty::Extreme);
        assert_eq!(Difficulty::Normal.next(), Difficulty::Hard);
    }

    #[test]
    fn test_word_source_categories() {
        assert_eq!(WordSource::Mixed.categories().len(), 3);
        assert_eq!(
            WordSource::Only(Category::Book).categories(),
            &[Category::Book]
        );
        assert_eq!(WordSource::Only(Category::Concept).next(), WordSource::Mixed);
    }
}
