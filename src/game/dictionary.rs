//! Word catalogue
//!
//! Loads the categorized dictionary (embedded at build time, or a JSON file
//! chosen at runtime) and serves random picks per difficulty and category.
//! The catalogue order (difficulty, then people, books, concepts) is what
//! test mode indexes into.

use super::{normalize, Category, Difficulty, WordEntry, WordSource};
use rand::Rng;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// Embedded default dictionary.
static EMBEDDED_DATA: &str = include_str!("../../data/palabras.json");

/// Errors raised while loading a dictionary.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read dictionary {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed dictionary: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("blank word in {difficulty} / {} at position {index}", .category.label())]
    BlankWord {
        difficulty: Difficulty,
        category: Category,
        index: usize,
    },
    #[error("'{word}' contains '{character}', only letters and spaces can be guessed")]
    UnguessableWord { word: String, character: char },
    #[error("dictionary contains no words")]
    Empty,
}

/// No candidate words for the requested difficulty and source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no {} words available at {difficulty} difficulty", .words.label())]
pub struct PickError {
    pub difficulty: Difficulty,
    pub words: WordSource,
}

/// Where the dictionary comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DictionarySource {
    #[default]
    Embedded,
    File(PathBuf),
}

impl fmt::Display for DictionarySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictionarySource::Embedded => f.write_str("embedded dictionary"),
            DictionarySource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

// Wire format. Tier and list names are the keys the dictionary files use.

#[derive(Debug, Deserialize)]
struct RawDictionary {
    #[serde(default)]
    muy_facil: RawTier,
    #[serde(default)]
    facil: RawTier,
    #[serde(default)]
    normal: RawTier,
    #[serde(default)]
    dificil: RawTier,
    #[serde(default)]
    extremo: RawTier,
}

impl RawDictionary {
    fn tier(&self, difficulty: Difficulty) -> &RawTier {
        match difficulty {
            Difficulty::VeryEasy => &self.muy_facil,
            Difficulty::Easy => &self.facil,
            Difficulty::Normal => &self.normal,
            Difficulty::Hard => &self.dificil,
            Difficulty::Extreme => &self.extremo,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawTier {
    #[serde(default)]
    personas: Vec<RawWord>,
    #[serde(default)]
    libros: Vec<RawWord>,
    #[serde(default)]
    conceptos: Vec<RawWord>,
}

impl RawTier {
    fn list(&self, category: Category) -> &[RawWord] {
        match category {
            Category::Person => &self.personas,
            Category::Book => &self.libros,
            Category::Concept => &self.conceptos,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawWord {
    palabra: String,
    #[serde(default)]
    pista: String,
}

/// Loaded, immutable word catalogue.
#[derive(Debug, Clone)]
pub struct WordStore {
    entries: Vec<WordEntry>,
    /// Catalogue indices per (difficulty, category)
    pools: HashMap<(Difficulty, Category), Vec<usize>>,
}

impl WordStore {
    /// Load from the given source.
    pub fn load(source: &DictionarySource) -> Result<Self, LoadError> {
        let store = match source {
            DictionarySource::Embedded => Self::from_json(EMBEDDED_DATA)?,
            DictionarySource::File(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
                    path: path.clone(),
                    source,
                })?;
                Self::from_json(&text)?
            }
        };
        tracing::info!(%source, words = store.len(), "dictionary loaded");
        Ok(store)
    }

    /// Parse a dictionary document.
    pub fn from_json(text: &str) -> Result<Self, LoadError> {
        let raw: RawDictionary = serde_json::from_str(text)?;

        let mut entries = Vec::new();
        let mut pools: HashMap<(Difficulty, Category), Vec<usize>> = HashMap::new();

        for difficulty in Difficulty::ALL {
            let tier = raw.tier(difficulty);
            for category in Category::ALL {
                for (index, item) in tier.list(category).iter().enumerate() {
                    let word = item.palabra.trim();
                    if word.is_empty() {
                        return Err(LoadError::BlankWord {
                            difficulty,
                            category,
                            index,
                        });
                    }
                    if let Some(character) = normalize(word)
                        .chars()
                        .find(|c| *c != ' ' && !c.is_alphabetic())
                    {
                        return Err(LoadError::UnguessableWord {
                            word: word.to_string(),
                            character,
                        });
                    }
                    pools
                        .entry((difficulty, category))
                        .or_default()
                        .push(entries.len());
                    entries.push(WordEntry::new(
                        word,
                        item.pista.trim(),
                        category,
                        difficulty,
                    ));
                }
            }
        }

        if entries.is_empty() {
            return Err(LoadError::Empty);
        }

        Ok(Self { entries, pools })
    }

    /// Pick a uniformly random word from the pooled categories.
    pub fn pick<R: Rng + ?Sized>(
        &self,
        difficulty: Difficulty,
        words: WordSource,
        rng: &mut R,
    ) -> Result<&WordEntry, PickError> {
        let pool: Vec<usize> = words
            .categories()
            .iter()
            .filter_map(|category| self.pools.get(&(difficulty, *category)))
            .flatten()
            .copied()
            .collect();

        if pool.is_empty() {
            return Err(PickError { difficulty, words });
        }

        let chosen = pool[rng.random_range(0..pool.len())];
        Ok(&self.entries[chosen])
    }

    /// Number of candidates a pick would choose from.
    pub fn pool_size(&self, difficulty: Difficulty, words: WordSource) -> usize {
        words
            .categories()
            .iter()
            .filter_map(|category| self.pools.get(&(difficulty, *category)))
            .map(Vec::len)
            .sum()
    }

    /// Explicit selection by catalogue position.
    pub fn lookup(&self, index: usize) -> Option<&WordEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
