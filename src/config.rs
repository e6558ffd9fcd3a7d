use std::path::{Path, PathBuf};
use std::time::Duration;
use serde::Deserialize;
use crate::core::{GameError, MergeRule, DEFAULT_HEIGHT, DEFAULT_WIDTH};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeRuleKind {
    #[default]
    Capped,
    Unbounded,
}

impl From<MergeRuleKind> for MergeRule {
    fn from(kind: MergeRuleKind) -> Self {
        match kind {
            MergeRuleKind::Capped => MergeRule::default(),
            MergeRuleKind::Unbounded => MergeRule::Unbounded,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    pub merge_rule: MergeRuleKind,
    /// Length of the slide animation after each move.
    pub animation_ms: u64,
    /// Fixed RNG seed; a fresh one is drawn when absent.
    pub seed: Option<u64>,
    pub log_file: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            merge_rule: MergeRuleKind::default(),
            animation_ms: 120,
            seed: None,
            log_file: PathBuf::from("twenty48.log"),
        }
    }
}

impl GameConfig {
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self, GameError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, GameError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }
}
