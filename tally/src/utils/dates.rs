use chrono::NaiveDate;

/// Shape of a complete date as typed into a form.
const ISO_TEMPLATE: &[u8; 10] = b"0000-00-00";

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Parse a `YYYY-MM-DD` date.
pub fn parse_iso(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}

/// Parse either `YYYY-MM-DD` or the display form (`Apr 1, 2025`).
pub fn parse_flexible(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    parse_iso(input)
        .or_else(|| NaiveDate::parse_from_str(input, "%b %d, %Y").ok())
        .or_else(|| NaiveDate::parse_from_str(input, "%B %d, %Y").ok())
}

/// `Apr 1, 2025`
pub fn format_display(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

pub fn format_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn is_valid_date_prefix(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() > ISO_TEMPLATE.len() {
        return false;
    }

    let shape_ok = bytes.iter().zip(ISO_TEMPLATE.iter()).all(|(&b, &t)| {
        if t == b'-' {
            b == b'-'
        } else {
            b.is_ascii_digit()
        }
    });
    if !shape_ok {
        return false;
    }

    let digit = |i: usize| bytes.get(i).map(|b| u32::from(b - b'0'));

    if let Some(m1) = digit(5) {
        if m1 > 1 {
            return false;
        }
        if let Some(m2) = digit(6) {
            if !(1..=12).contains(&(m1 * 10 + m2)) {
                return false;
            }
        }
    }

    if let Some(d1) = digit(8) {
        if d1 > 3 {
            return false;
        }
        if digit(9).is_some() {
            return parse_iso(s).is_some();
        }
    }

    true
}

/// Append a character to a partially typed `YYYY-MM-DD` date, inserting the
/// `-` separator automatically. Returns `None` when the result could never
/// become a valid date.
///
/// - `"2025"` + `'0'` -> `"2025-0"`
/// - `"2025-0"` + `'1'` -> `"2025-01"`
pub fn append_date_char(current: &str, c: char) -> Option<String> {
    let direct = format!("{}{}", current, c);
    if is_valid_date_prefix(&direct) {
        return Some(direct);
    }

    let with_separator = format!("{}-{}", current, c);
    if is_valid_date_prefix(&with_separator) {
        return Some(with_separator);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn valid_date_prefixes() {
        for prefix in ["2", "2026", "2026-", "2026-0", "2026-01", "2026-01-", "2026-01-3"] {
            assert!(is_valid_date_prefix(prefix), "{prefix} should be accepted");
        }
        assert!(is_valid_date_prefix("2024-02-29"));
        assert!(!is_valid_date_prefix("2025-02-29"));
        assert!(!is_valid_date_prefix("2025-2"));
        assert!(!is_valid_date_prefix("2025-13"));
        assert!(!is_valid_date_prefix("2025-01-4"));
        assert!(!is_valid_date_prefix("2025/01"));
    }

    #[test]
    fn append_inserts_separator() {
        assert_eq!(append_date_char("2025", '0'), Some("2025-0".to_string()));
        assert_eq!(append_date_char("2025-0", '1'), Some("2025-01".to_string()));
        assert_eq!(append_date_char("2025-01", '1'), Some("2025-01-1".to_string()));
        assert_eq!(append_date_char("2025", '-'), Some("2025-".to_string()));
    }

    #[test]
    fn append_rejects_impossible_dates() {
        assert_eq!(append_date_char("2025-01-15", '0'), None);
        assert_eq!(append_date_char("2025-1", '9'), None);
        assert_eq!(append_date_char("2025", 'x'), None);
    }

    #[test]
    fn display_round_trip() {
        assert_eq!(format_display(date(2025, 4, 1)), "Apr 1, 2025");
        assert_eq!(parse_flexible("Apr 1, 2025"), Some(date(2025, 4, 1)));
        assert_eq!(parse_flexible("April 30, 2025"), Some(date(2025, 4, 30)));
        assert_eq!(parse_flexible(" 2025-04-15 "), Some(date(2025, 4, 15)));
        assert_eq!(parse_flexible("someday"), None);
    }
}
