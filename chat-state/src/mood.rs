//! Bot personas. Each mood carries a tone line appended to the system prompt.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Comma-separated list of mood keys shown to users.
pub const MOOD_OPTIONS_TEXT: &str = "vui, lem_linh, cau_gat";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodKey {
    #[default]
    Vui,
    LemLinh,
    CauGat,
}

impl MoodKey {
    pub const ALL: [MoodKey; 3] = [MoodKey::Vui, MoodKey::LemLinh, MoodKey::CauGat];

    pub fn key(&self) -> &'static str {
        match self {
            MoodKey::Vui => "vui",
            MoodKey::LemLinh => "lem_linh",
            MoodKey::CauGat => "cau_gat",
        }
    }

    /// Tone description used in the system prompt and in the /mood confirmation.
    pub fn tone(&self) -> &'static str {
        match self {
            MoodKey::Vui => "Luôn vui vẻ, thân thiện, dùng nhiều emoji dễ thương.",
            MoodKey::LemLinh => "Lém lỉnh, cà khịa nhẹ, tung hứng dí dỏm nhưng không xúc phạm.",
            MoodKey::CauGat => {
                "Giả vờ cáu gắt, càm ràm nhưng vẫn hài hước và không quá khó chịu."
            }
        }
    }

    /// Parses user input: trimmed, lowercased, inner spaces become `_` ("Lem Linh" → `lem_linh`).
    pub fn parse(input: &str) -> Option<MoodKey> {
        let normalized = input.trim().to_lowercase().replace(' ', "_");
        Self::ALL.into_iter().find(|m| m.key() == normalized)
    }
}

impl fmt::Display for MoodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_case_and_spaces() {
        assert_eq!(MoodKey::parse("vui"), Some(MoodKey::Vui));
        assert_eq!(MoodKey::parse("  Lem Linh "), Some(MoodKey::LemLinh));
        assert_eq!(MoodKey::parse("CAU_GAT"), Some(MoodKey::CauGat));
        assert_eq!(MoodKey::parse("buon"), None);
        assert_eq!(MoodKey::parse(""), None);
    }

    #[test]
    fn test_options_text_lists_every_mood() {
        let keys: Vec<&str> = MoodKey::ALL.iter().map(|m| m.key()).collect();
        assert_eq!(keys.join(", "), MOOD_OPTIONS_TEXT);
    }

    #[test]
    fn test_default_is_vui() {
        assert_eq!(MoodKey::default(), MoodKey::Vui);
        assert_eq!(MoodKey::default().to_string(), "vui");
    }
}
