use chrono::DateTime;

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const MS_IN_MIN: i64 = Self::MS_IN_S * 60;
    pub const MS_IN_H: i64 = Self::MS_IN_MIN * 60;
    pub const MS_IN_D: i64 = Self::MS_IN_H * 24;
    pub const MS_IN_W: i64 = Self::MS_IN_D * 7;
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
}

/// Used for display purposes. Out of range timestamps render as "?".
pub fn epoch_ms_to_utc(epoch_ms: i64) -> String {
    match DateTime::from_timestamp_millis(epoch_ms) {
        Some(dt) => dt.format(TimeUtils::STANDARD_TIME_FORMAT).to_string(),
        None => "?".to_string(),
    }
}

pub fn format_duration(ms: i64) -> String {
    let secs = ms / 1000;
    if secs < 60 {
        return format!("{}s", secs);
    }
    let mins = secs / 60;
    if mins < 60 {
        return format!("{}m", mins);
    }
    let hours = mins / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }
    let days = hours / 24;
    if days < 30 {
        return format!("{}d", days);
    }
    let months = days / 30;
    if months < 12 {
        return format!("{}M", months);
    }
    let years = months / 12;
    let rem_months = months % 12;
    format!("{}Y {}M", years, rem_months)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_pick_largest_unit() {
        assert_eq!(format_duration(45 * TimeUtils::MS_IN_S), "45s");
        assert_eq!(format_duration(3 * TimeUtils::MS_IN_H), "3h");
        assert_eq!(format_duration(2 * TimeUtils::MS_IN_W), "14d");
        assert_eq!(format_duration(400 * TimeUtils::MS_IN_D), "1Y 1M");
    }

    #[test]
    fn epoch_formats_as_utc() {
        assert_eq!(epoch_ms_to_utc(0), "1970-01-01 00:00");
    }
}
