//! Thai-locale date formatting.
//!
//! Dates shown to users (document bodies, CSV exports) use Thai month names
//! and the Buddhist era year (Gregorian + 543); dates on the wire stay ISO
//! `YYYY-MM-DD`.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};

const THAI_MONTHS: [&str; 12] = [
    "มกราคม",
    "กุมภาพันธ์",
    "มีนาคม",
    "เมษายน",
    "พฤษภาคม",
    "มิถุนายน",
    "กรกฎาคม",
    "สิงหาคม",
    "กันยายน",
    "ตุลาคม",
    "พฤศจิกายน",
    "ธันวาคม",
];

/// Format a date as `"<day> <month> <buddhist year>"`.
pub fn format_thai_date(date: NaiveDate) -> String {
    format!("{} {} {}", date.day(), thai_month(date.month()), buddhist_year(date.year()))
}

/// Format a timestamp as `"<day> <month> <buddhist year> HH:MM น."`.
pub fn format_thai_datetime(datetime: DateTime<Utc>) -> String {
    format!(
        "{} {:02}:{:02} น.",
        format_thai_date(datetime.date_naive()),
        datetime.hour(),
        datetime.minute()
    )
}

fn thai_month(month: u32) -> &'static str {
    THAI_MONTHS.get((month as usize).wrapping_sub(1)).copied().unwrap_or_default()
}

const fn buddhist_year(year: i32) -> i32 {
    year + 543
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn date_uses_buddhist_era_year() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        assert_eq!(format_thai_date(date), "7 สิงหาคม 2569");
    }

    #[test]
    fn january_and_december_map_to_boundary_months() {
        assert_eq!(
            format_thai_date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()),
            "1 มกราคม 2568"
        );
        assert_eq!(
            format_thai_date(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()),
            "31 ธันวาคม 2568"
        );
    }

    #[test]
    fn datetime_pads_hours_and_minutes() {
        let datetime = Utc.with_ymd_and_hms(2026, 8, 7, 9, 5, 0).unwrap();
        assert_eq!(format_thai_datetime(datetime), "7 สิงหาคม 2569 09:05 น.");
    }
}
