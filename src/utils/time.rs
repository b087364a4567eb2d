//! Duration helpers shared by the engine and the replies

use std::time::Duration;

const MILLIS_PER_MINUTE: u64 = 60 * 1000;

/// Convert whole minutes to milliseconds, `None` on overflow
pub fn minutes_to_millis(minutes: u64) -> Option<u64> {
    minutes.checked_mul(MILLIS_PER_MINUTE)
}

/// Render milliseconds as "M minutes S seconds", truncating sub-second parts
pub fn format_millis(millis: u64) -> String {
    let total_seconds = millis / 1000;
    format!("{} minutes {} seconds", total_seconds / 60, total_seconds % 60)
}

/// Saturating milliseconds of a std duration
pub fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_minutes() {
        assert_eq!(minutes_to_millis(0), Some(0));
        assert_eq!(minutes_to_millis(25), Some(1_500_000));
        assert_eq!(minutes_to_millis(u64::MAX), None);
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_millis(0), "0 minutes 0 seconds");
        assert_eq!(format_millis(1_500_000), "25 minutes 0 seconds");
        assert_eq!(format_millis(61_999), "1 minutes 1 seconds");
        assert_eq!(format_millis(7_200_000), "120 minutes 0 seconds");
    }

    #[test]
    fn saturates_huge_durations() {
        assert_eq!(duration_millis(Duration::from_millis(1_234)), 1_234);
        assert_eq!(duration_millis(Duration::MAX), u64::MAX);
    }
}
