use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Angry,
    Sad,
    Meh,
    Calm,
    Happy,
    Cool,
}

impl Mood {
    pub const ALL: [Mood; 6] = [
        Mood::Angry,
        Mood::Sad,
        Mood::Meh,
        Mood::Calm,
        Mood::Happy,
        Mood::Cool,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Angry => "angry",
            Self::Sad => "sad",
            Self::Meh => "meh",
            Self::Calm => "calm",
            Self::Happy => "happy",
            Self::Cool => "cool",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let lowered = raw.trim().to_ascii_lowercase();
        Mood::ALL
            .into_iter()
            .find(|mood| mood.as_str() == lowered)
            .ok_or_else(|| format!("unknown mood '{}'", raw.trim()))
    }
}

/// Client-side state that is not tied to a single item collection.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    /// Keyed by `YYYY-MM-DD`.
    #[serde(default)]
    pub moods: BTreeMap<String, Mood>,
}
