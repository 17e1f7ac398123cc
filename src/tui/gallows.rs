//! Hangman drawings
//!
//! The emoji style is built in. The ASCII styles are read from text files in
//! the asset directory, one frame per stage, frames separated by a line
//! holding only `%%`.

use crate::game::ParseSettingError;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Drawn in place of a drawing that could not be loaded.
pub const PLACEHOLDER: &str = "❌";

/// Stages in a file-backed drawing.
pub const FILE_STAGES: usize = 8;

const FRAME_SEPARATOR: &str = "%%";

const FACES: [(&str, &str); 7] = [
    ("😊", "all good"),
    ("😐", "hmm"),
    ("😟", "getting worried"),
    ("😨", "in trouble"),
    ("😰", "one foot on the trapdoor"),
    ("😱", "last chance"),
    ("💀", "hanged"),
];

static EMOJI_FRAMES: Lazy<Vec<String>> = Lazy::new(|| {
    FACES
        .iter()
        .map(|(face, mood)| format!("{}\n\n{}", face, mood))
        .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HangmanStyle {
    #[default]
    Emoji,
    Classic,
    Neon,
    Minimal,
}

impl HangmanStyle {
    pub const ALL: [HangmanStyle; 4] = [
        HangmanStyle::Emoji,
        HangmanStyle::Classic,
        HangmanStyle::Neon,
        HangmanStyle::Minimal,
    ];

    pub fn label(self) -> &'static str {
        match self {
            HangmanStyle::Emoji => "Emoji",
            HangmanStyle::Classic => "Classic",
            HangmanStyle::Neon => "Neon",
            HangmanStyle::Minimal => "Minimal",
        }
    }

    /// Asset file for the file-backed styles.
    pub fn file_name(self) -> Option<&'static str> {
        match self {
            HangmanStyle::Emoji => None,
            HangmanStyle::Classic => Some("hangman-classic.txt"),
            HangmanStyle::Neon => Some("hangman-neon.txt"),
            HangmanStyle::Minimal => Some("hangman-minimal.txt"),
        }
    }

    pub fn next(self) -> Self {
        crate::game::cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        crate::game::cycle(&Self::ALL, self, -1)
    }
}

impl fmt::Display for HangmanStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for HangmanStyle {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|style| style.label().to_ascii_lowercase() == wanted)
            .ok_or_else(|| ParseSettingError::new("hangman style", s))
    }
}

/// A drawing asset that could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} has {found} frames, expected {expected}")]
    FrameCount {
        path: PathBuf,
        found: usize,
        expected: usize,
    },
}

/// Frame to show for an emoji drawing: spreads the attempts over all faces.
pub fn emoji_stage(wrong: u32, max: u32) -> usize {
    if max == 0 {
        return 0;
    }
    let last = FACES.len() - 1;
    let stage = (wrong.min(max) as usize * last) / max as usize;
    stage.min(last)
}

/// Stage (1-based) to show for a file-backed drawing. The gallows always
/// shows at least its first stage.
pub fn file_stage(wrong: u32, max: u32) -> usize {
    if max == 0 {
        return 1;
    }
    let wrong = wrong.min(max) as usize;
    let stage = (wrong * FILE_STAGES).div_ceil(max as usize);
    stage.clamp(1, FILE_STAGES)
}

/// Split a drawing file into frames.
pub fn parse_frames(text: &str) -> Vec<String> {
    let mut frames = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim_end() == FRAME_SEPARATOR {
            frames.push(current.join("\n"));
            current.clear();
        } else {
            current.push(line);
        }
    }
    if current.iter().any(|l| !l.trim().is_empty()) {
        frames.push(current.join("\n"));
    }
    frames
}

/// Loaded drawings, keyed by style. A failed load is cached as well so it
/// is reported once.
#[derive(Debug)]
pub struct ArtCache {
    asset_dir: PathBuf,
    frames: HashMap<HangmanStyle, Option<Vec<String>>>,
}

impl ArtCache {
    pub fn new(asset_dir: impl Into<PathBuf>) -> Self {
        Self {
            asset_dir: asset_dir.into(),
            frames: HashMap::new(),
        }
    }

    /// Load a style's frames if not already attempted.
    pub fn prepare(&mut self, style: HangmanStyle) {
        let Some(file_name) = style.file_name() else {
            return;
        };
        if self.frames.contains_key(&style) {
            return;
        }
        let path = self.asset_dir.join(file_name);
        let loaded = match load_frames(&path) {
            Ok(frames) => {
                tracing::debug!(path = %path.display(), "hangman drawing loaded");
                Some(frames)
            }
            Err(e) => {
                tracing::warn!(error = %e, "hangman drawing unavailable, using placeholder");
                None
            }
        };
        self.frames.insert(style, loaded);
    }

    /// Whether a style has been attempted and failed.
    pub fn is_missing(&self, style: HangmanStyle) -> bool {
        matches!(self.frames.get(&style), Some(None))
    }

    /// Drawing for the given attempt count.
    pub fn frame(&self, style: HangmanStyle, wrong: u32, max: u32) -> &str {
        match style {
            HangmanStyle::Emoji => EMOJI_FRAMES[emoji_stage(wrong, max)].as_str(),
            _ => match self.frames.get(&style) {
                Some(Some(frames)) => frames[file_stage(wrong, max) - 1].as_str(),
                Some(None) | None => PLACEHOLDER,
            },
        }
    }
}

fn load_frames(path: &Path) -> Result<Vec<String>, ResourceError> {
    let text = std::fs::read_to_string(path).map_err(|source| ResourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let frames = parse_frames(&text);
    if frames.len() != FILE_STAGES {
        return Err(ResourceError::FrameCount {
            path: path.to_path_buf(),
            found: frames.len(),
            expected: FILE_STAGES,
        });
    }
    Ok(frames)
}
