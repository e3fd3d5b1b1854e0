//! Local answers for time and date questions. No remote call, no state.

use chrono::{DateTime, Datelike, NaiveDateTime, Utc};
use chrono_tz::Tz;

const TIME_KEYWORDS: &[&str] = &[
    "mấy giờ",
    "giờ mấy",
    "bây giờ là mấy giờ",
    "hiện tại mấy giờ",
    "giờ hiện tại",
];

const DAY_KEYWORDS: &[&str] = &[
    "thứ mấy",
    "hôm nay là thứ",
    "nay là thứ",
    "hôm nay ngày",
    "ngày mấy",
    "ngày bao nhiêu",
];

/// Indexed by days from Monday.
const VI_DAY_NAMES: [&str; 7] = [
    "Thứ Hai",
    "Thứ Ba",
    "Thứ Tư",
    "Thứ Năm",
    "Thứ Sáu",
    "Thứ Bảy",
    "Chủ Nhật",
];

/// Answers time/date questions against a local wall-clock time. Time questions win when both match.
pub fn resolve_intent(text: &str, now: NaiveDateTime) -> Option<String> {
    if text.is_empty() {
        return None;
    }
    let normalized = text.to_lowercase();
    let date = now.format("%d/%m/%Y");

    if TIME_KEYWORDS.iter().any(|k| normalized.contains(k)) {
        return Some(format!("Bây giờ là {} (ngày {}).", now.format("%H:%M"), date));
    }
    if DAY_KEYWORDS.iter().any(|k| normalized.contains(k)) {
        let day_name = VI_DAY_NAMES[now.weekday().num_days_from_monday() as usize];
        return Some(format!("Hôm nay {}, ngày {}", day_name, date));
    }
    None
}

/// [`resolve_intent`] in a fixed timezone.
#[derive(Debug, Clone, Copy)]
pub struct IntentResolver {
    timezone: Tz,
}

impl IntentResolver {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    pub fn resolve(&self, text: &str, now: DateTime<Utc>) -> Option<String> {
        resolve_intent(text, now.with_timezone(&self.timezone).naive_local())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_time_question() {
        assert_eq!(
            resolve_intent("mấy giờ rồi", at(2024, 5, 1, 9, 5)),
            Some("Bây giờ là 09:05 (ngày 01/05/2024).".to_string())
        );
        assert_eq!(
            resolve_intent("GIỜ HIỆN TẠI là bao nhiêu?", at(2024, 12, 31, 23, 59)),
            Some("Bây giờ là 23:59 (ngày 31/12/2024).".to_string())
        );
    }

    #[test]
    fn test_day_question_uses_weekday_table() {
        // 2024-05-01 is a Wednesday, 2024-05-05 a Sunday.
        assert_eq!(
            resolve_intent("hôm nay thứ mấy", at(2024, 5, 1, 9, 0)),
            Some("Hôm nay Thứ Tư, ngày 01/05/2024".to_string())
        );
        assert_eq!(
            resolve_intent("Ngày bao nhiêu vậy", at(2024, 5, 5, 9, 0)),
            Some("Hôm nay Chủ Nhật, ngày 05/05/2024".to_string())
        );
    }

    #[test]
    fn test_time_wins_over_day() {
        let reply = resolve_intent("thứ mấy, mấy giờ", at(2024, 5, 1, 9, 0)).unwrap();
        assert!(reply.starts_with("Bây giờ là"));
    }

    #[test]
    fn test_no_intent() {
        assert_eq!(resolve_intent("kể chuyện cười đi", at(2024, 5, 1, 9, 0)), None);
        assert_eq!(resolve_intent("", at(2024, 5, 1, 9, 0)), None);
    }

    #[test]
    fn test_resolver_converts_to_local_time() {
        let resolver = IntentResolver::new(chrono_tz::Asia::Ho_Chi_Minh);
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 20, 30, 0).unwrap();
        assert_eq!(
            resolver.resolve("mấy giờ", now),
            Some("Bây giờ là 03:30 (ngày 02/05/2024).".to_string())
        );
    }
}
