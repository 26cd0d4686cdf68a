use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const CATEGORY_MAX_LEN: usize = 64;

pub const KNOWN_CATEGORIES: [&str; 5] = ["transport", "energy", "waste", "diet", "water"];

/// Activity classification.
///
/// The set is open: any string is accepted and kept verbatim in `Other`, so a
/// category the multiplier table does not know still logs and resolves to the
/// global default multiplier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
#[non_exhaustive]
pub enum ActivityCategory {
    Transport,
    Energy,
    Waste,
    Diet,
    Water,
    Other(String),
}

impl ActivityCategory {
    #[must_use]
    pub fn parse(input: &str) -> Self {
        match input {
            "transport" => Self::Transport,
            "energy" => Self::Energy,
            "waste" => Self::Waste,
            "diet" => Self::Diet,
            "water" => Self::Water,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Transport => "transport",
            Self::Energy => "energy",
            Self::Waste => "waste",
            Self::Diet => "diet",
            Self::Water => "water",
            Self::Other(raw) => raw,
        }
    }

    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for ActivityCategory {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for ActivityCategory {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<ActivityCategory> for String {
    fn from(value: ActivityCategory) -> Self {
        match value {
            ActivityCategory::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl Display for ActivityCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
