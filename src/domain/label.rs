use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    /// Six hex digits, no `#` prefix.
    pub color: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Label {
    /// Label for a top-level directory, with a random color.
    pub fn for_directory(directory: &str) -> Self {
        Self {
            name: directory.to_string(),
            color: LabelColor::random().to_string(),
            description: Some(directory_description(directory)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelColor(u32);

impl LabelColor {
    const MAX: u32 = 0xFF_FFFF;

    pub fn new(rgb: u32) -> Self {
        Self(rgb & Self::MAX)
    }

    pub fn random() -> Self {
        Self::new(rand::thread_rng().gen_range(0..=Self::MAX))
    }
}

impl fmt::Display for LabelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06x}", self.0)
    }
}

pub fn directory_description(directory: &str) -> String {
    format!("Changes in {directory}/ directory")
}
