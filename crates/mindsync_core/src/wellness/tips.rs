use crate::error::AppError;
use serde::Deserialize;
use std::path::Path;

const BUILTIN_TIPS: &[&str] = &[
    "Drink a full glass of water",
    "Take a ten minute walk outside",
    "Stretch your neck and shoulders for five minutes",
    "Do five minutes of box breathing",
    "Write down three things you are grateful for",
    "Step away from screens for fifteen minutes",
    "Eat a serving of fresh fruit",
    "Call or message a friend",
    "Tidy one small area of your space",
    "Spend ten minutes reading for pleasure",
    "Go to bed thirty minutes earlier",
    "Take the stairs instead of the elevator",
    "Listen to a favourite song without multitasking",
    "Do a two minute body scan",
    "Write a short journal entry about your day",
    "Open a window and get some fresh air",
    "Practise a new word in a language you are learning",
    "Eat one meal without looking at a screen",
    "Do ten squats or push-ups",
    "Spend five minutes in sunlight",
    "Unfollow one account that drains your energy",
    "Plan tomorrow's top three priorities",
    "Try a short guided meditation",
    "Compliment someone sincerely",
    "Replace one sugary drink with water or tea",
    "Stand up and move every hour",
    "Spend ten minutes on a hobby you enjoy",
    "Notice five things you can see, hear and feel",
    "Clear your email inbox of one task",
    "Smile at a stranger or a colleague",
];

/// Candidate wellness tips in a stable order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipPool {
    tips: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TipFile {
    #[serde(rename = "wellnessTips")]
    wellness_tips: Vec<TipEntry>,
}

#[derive(Debug, Deserialize)]
struct TipEntry {
    tip: String,
}

impl TipPool {
    pub fn builtin() -> Self {
        Self {
            tips: BUILTIN_TIPS.iter().map(|tip| tip.to_string()).collect(),
        }
    }

    pub fn new<I, S>(tips: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tips: tips.into_iter().map(Into::into).collect(),
        }
    }

    /// Reads `{ "wellnessTips": [ { "tip": "..." } ] }`. Tips are kept exactly
    /// as written since they double as completion keys.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)
            .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
        let parsed: TipFile = serde_json::from_str(&content).map_err(|err| {
            AppError::invalid_data(format!("invalid tip pool in {}: {}", path.display(), err))
        })?;

        let tips: Vec<String> = parsed
            .wellness_tips
            .into_iter()
            .map(|entry| entry.tip)
            .collect();
        tracing::debug!(path = %path.display(), count = tips.len(), "loaded wellness tip pool");

        Ok(Self { tips })
    }

    pub fn tips(&self) -> &[String] {
        &self.tips
    }

    pub fn len(&self) -> usize {
        self.tips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tips.is_empty()
    }
}

impl Default for TipPool {
    fn default() -> Self {
        Self::builtin()
    }
}
