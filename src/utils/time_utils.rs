use chrono::TimeDelta;

pub struct TimeUtils;

impl TimeUtils {
    pub const S_IN_MIN: i64 = 60;
}

/// Parses an elapsed match clock such as `2:05:31`, `45:10` or `37`.
/// Blank or unparseable input gives `None`.
pub fn parse_elapsed_secs(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let mut total: i64 = 0;
    let mut fields = 0;
    for part in raw.split(':') {
        let value: i64 = part.trim().parse().ok()?;
        if value < 0 {
            return None;
        }
        total = total * 60 + value;
        fields += 1;
    }
    if fields > 3 {
        return None;
    }
    u32::try_from(total).ok()
}

/// Minutes as a float, for time-based plot axes.
pub fn secs_to_minutes(secs: u32) -> f64 {
    secs as f64 / TimeUtils::S_IN_MIN as f64
}

/// Readable match length, e.g. `3h 12m`.
pub fn describe_duration(secs: u32) -> String {
    let delta = TimeDelta::seconds(secs as i64);
    let hours = delta.num_hours();
    let minutes = delta.num_minutes() - hours * 60;
    if hours > 0 {
        format!("{}h {:02}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}
