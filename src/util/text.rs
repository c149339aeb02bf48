//! Text formatting helpers for the card and chrome.

use chrono::{DateTime, Utc};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in terminal columns (wide chars count as 2).
pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Truncate a string to fit `max_width` terminal columns, appending an
/// ellipsis when anything was cut. Never splits a wide character.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width.saturating_sub(1); // Room for the ellipsis
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Format a monthly price with thousands separators and an optional
/// currency prefix: `format_price(4500, Some("AED"))` → `"AED 4,500"`.
pub fn format_price(price: u64, currency: Option<&str>) -> String {
    let digits = price.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    match currency {
        Some(cur) => format!("{} {}", cur, grouped),
        None => grouped,
    }
}

/// Compact count display: 950 → "950", 1_200 → "1.2K", 1_000_000 → "1.0M".
pub fn format_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Relative age of a listing for the card footer: "today", "3d ago",
/// "2w ago". Future or missing timestamps render as "new".
pub fn posted_ago(posted_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(posted) = posted_at else {
        return "new".to_string();
    };
    let days = (now - posted).num_days();
    match days {
        d if d < 0 => "new".to_string(),
        0 => "today".to_string(),
        1..=13 => format!("{}d ago", days),
        14..=60 => format!("{}w ago", days / 7),
        _ => format!("{}mo ago", days / 30),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate_to_width("Marina View", 20), "Marina View");
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate_to_width("Marina View 2BR", 8), "Marina …");
    }

    #[test]
    fn test_truncate_respects_wide_chars() {
        // Each CJK char is 2 columns; budget of 4 fits one char + ellipsis
        let t = truncate_to_width("公寓出租", 4);
        assert!(display_width(&t) <= 4);
        assert!(t.ends_with('…'));
    }

    #[test]
    fn test_truncate_zero_width() {
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn test_format_price_groups_thousands() {
        assert_eq!(format_price(950, None), "950");
        assert_eq!(format_price(4500, Some("AED")), "AED 4,500");
        assert_eq!(format_price(1_250_000, None), "1,250,000");
    }

    #[test]
    fn test_format_count_compacts() {
        assert_eq!(format_count(950), "950");
        assert_eq!(format_count(1_200), "1.2K");
        assert_eq!(format_count(2_500_000), "2.5M");
    }

    #[test]
    fn test_posted_ago_buckets() {
        let now = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
        let days = |d: i64| Some(now - chrono::Duration::days(d));
        assert_eq!(posted_ago(None, now), "new");
        assert_eq!(posted_ago(days(0), now), "today");
        assert_eq!(posted_ago(days(3), now), "3d ago");
        assert_eq!(posted_ago(days(21), now), "3w ago");
        assert_eq!(posted_ago(days(90), now), "3mo ago");
    }
}
