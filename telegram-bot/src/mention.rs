//! @-mention detection and removal for the configured bot username.

/// Strips `@<username>` from message text, case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct MentionExtractor {
    /// `@username`; `None` when no username is configured.
    token: Option<String>,
}

impl MentionExtractor {
    /// `username` may carry a leading `@`. `None` or empty disables detection.
    pub fn new(username: Option<&str>) -> Self {
        let token = username
            .map(|u| u.trim().trim_start_matches('@'))
            .filter(|u| !u.is_empty())
            .map(|u| format!("@{}", u));
        Self { token }
    }

    /// The mention token (`@username`), if configured.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns the text with every mention removed and whitespace collapsed, and whether any
    /// mention was found. Without a configured token: trimmed text, `false`.
    pub fn extract(&self, text: &str) -> (String, bool) {
        let Some(token) = self.token.as_deref() else {
            return (text.trim().to_string(), false);
        };

        let (stripped, found) = remove_ignore_ascii_case(text, token);
        if !found {
            return (text.trim().to_string(), false);
        }
        let cleaned = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
        (cleaned, true)
    }

    pub fn is_mentioned(&self, text: &str) -> bool {
        self.extract(text).1
    }
}

/// Replaces each occurrence of `needle` with a space. Usernames are ASCII, so matching byte
/// windows with `eq_ignore_ascii_case` never splits a UTF-8 sequence.
fn remove_ignore_ascii_case(haystack: &str, needle: &str) -> (String, bool) {
    let hay = haystack.as_bytes();
    let pat = needle.as_bytes();
    if pat.is_empty() || !needle.is_ascii() || hay.len() < pat.len() {
        return (haystack.to_string(), false);
    }

    let mut out = String::with_capacity(haystack.len());
    let mut found = false;
    let mut copied_up_to = 0;
    let mut i = 0;
    while i + pat.len() <= hay.len() {
        if hay[i..i + pat.len()].eq_ignore_ascii_case(pat) {
            out.push_str(&haystack[copied_up_to..i]);
            out.push(' ');
            i += pat.len();
            copied_up_to = i;
            found = true;
        } else {
            i += 1;
        }
    }
    out.push_str(&haystack[copied_up_to..]);
    (out, found)
}
