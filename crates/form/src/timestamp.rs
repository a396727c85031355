//! Submission timestamp formatting

use chrono::{DateTime, Datelike, TimeZone, Timelike};
use readsign_config::BUDDHIST_ERA_OFFSET;

/// `dd/mm/yyyy HH:MM:SS`, optionally with the year in the Buddhist era
pub fn format_timestamp<Tz: TimeZone>(at: &DateTime<Tz>, buddhist_era: bool) -> String {
    let year = if buddhist_era {
        at.year() + BUDDHIST_ERA_OFFSET
    } else {
        at.year()
    };
    format!(
        "{:02}/{:02}/{} {:02}:{:02}:{:02}",
        at.day(),
        at.month(),
        year,
        at.hour(),
        at.minute(),
        at.second()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_buddhist_era_year() {
        let at = Utc.with_ymd_and_hms(2026, 3, 7, 9, 5, 1).unwrap();
        assert_eq!(format_timestamp(&at, true), "07/03/2569 09:05:01");
        assert_eq!(format_timestamp(&at, false), "07/03/2026 09:05:01");
    }

    #[test]
    fn test_uses_local_wall_clock() {
        let bangkok = FixedOffset::east_opt(7 * 3600).unwrap();
        let at = bangkok.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(format_timestamp(&at, true), "31/12/2568 23:59:59");
    }
}
