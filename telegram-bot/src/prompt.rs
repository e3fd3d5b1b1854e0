//! Persona text: the base system prompt and the canned fallback replies.

use chat_state::MoodKey;
use rand::seq::IndexedRandom;

pub const SYSTEM_PROMPT: &str = "Bạn là bot chat vui vẻ trong group. Trả lời ngắn gọn, vui nhộn, và thân thiện. Không vượt quá 2 câu.";

/// Used when the remote model gives no reply.
pub const FALLBACK_MESSAGES: &[&str] = &[
    "Haha nghe vui à nha 😆",
    "Ủa gì zợ? 😂 kể nghe coi",
    "Bot xỉu ngang 🤣",
    "Ghê zợ ông bạn 😜",
    "Cái này coi bộ căng à nha 😆",
    "Cười chết mệ 😂",
    "Đó là một trò đùa tuyệt vời!",
    "Hahahaha, bạn làm tôi cười 🤣",
    "Quá hài hước rồi!",
    "Đừng làm tôi cười nữa, bụng đau rồi 😆",
    "Ơi hay quá, hay quá!",
    "Bạn thật là một người hài hước 😄",
    "Mình thích điều đó! 👍",
    "Hehe, bạn biết cách làm vui lòng người ta 😉",
];

/// Base persona followed by the chat's mood tone.
pub fn build_system_prompt(mood: MoodKey) -> String {
    format!("{}\nMood hiện tại: {}", SYSTEM_PROMPT, mood.tone())
}

/// Uniform pick from [`FALLBACK_MESSAGES`].
pub fn random_fallback() -> &'static str {
    FALLBACK_MESSAGES
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(FALLBACK_MESSAGES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_carries_mood_tone() {
        let prompt = build_system_prompt(MoodKey::CauGat);
        assert!(prompt.starts_with(SYSTEM_PROMPT));
        assert!(prompt.ends_with(&format!("\nMood hiện tại: {}", MoodKey::CauGat.tone())));
    }

    #[test]
    fn test_random_fallback_is_from_set() {
        for _ in 0..50 {
            assert!(FALLBACK_MESSAGES.contains(&random_fallback()));
        }
    }
}
