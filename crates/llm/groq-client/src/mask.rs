/// Masks an API key/token for safe logging: first 7 chars + "***" + last 4 chars.
/// If the key has 11 chars or fewer, returns "***" so no part of it leaks.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let len = chars.len();
    if len <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[len - 4..].iter().collect();
    format!("{}***{}", head, tail)
}
