//! Backend timestamps arrive as RFC 3339 strings (`2024-03-05T10:00:00.000Z`)
//! or plain dates (`2024-03-05`).

use chrono::{DateTime, NaiveDate, Utc};

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    raw.get(..10)
        .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
}

/// `05 Mar 2024`, or `-` when absent or unreadable.
pub fn format_date(raw: Option<&str>) -> String {
    raw.and_then(parse_date)
        .map(|d| d.format("%d %b %Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// `05 Mar 2024 10:00` (UTC), falls back to the date alone.
pub fn format_datetime(raw: Option<&str>) -> String {
    match raw.map(str::trim).map(DateTime::parse_from_rfc3339) {
        Some(Ok(dt)) => dt.with_timezone(&Utc).format("%d %b %Y %H:%M").to_string(),
        _ => format_date(raw),
    }
}

/// Delivery due within `days` from `today`, today included.
pub fn is_upcoming(delivery_date: Option<&str>, today: NaiveDate, days: i64) -> bool {
    match delivery_date.and_then(parse_date) {
        Some(date) => {
            let diff = (date - today).num_days();
            (0..=days).contains(&diff)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats() {
        assert_eq!(format_date(Some("2024-03-05T10:00:00.000Z")), "05 Mar 2024");
        assert_eq!(format_date(Some("2024-03-05")), "05 Mar 2024");
        assert_eq!(format_date(Some("soon")), "-");
        assert_eq!(format_date(None), "-");
        assert_eq!(format_datetime(Some("2024-03-05T10:07:00Z")), "05 Mar 2024 10:07");
        assert_eq!(format_datetime(Some("2024-03-05")), "05 Mar 2024");
    }

    #[test]
    fn test_upcoming_window() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert!(is_upcoming(Some("2024-03-05"), today, 7));
        assert!(is_upcoming(Some("2024-03-12T00:00:00Z"), today, 7));
        assert!(!is_upcoming(Some("2024-03-13"), today, 7));
        assert!(!is_upcoming(Some("2024-03-04"), today, 7));
        assert!(!is_upcoming(None, today, 7));
    }
}
