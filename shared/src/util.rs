use chrono::NaiveDate;

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a Snowflake-style i64 for use as resource ID.
///
/// Layout (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: random
pub fn snowflake_id() -> i64 {
    use rand::Rng;
    const EPOCH_MS: i64 = 1_704_067_200_000;
    let now = now_millis();
    let ts = (now - EPOCH_MS) & 0x1FF_FFFF_FFFF;
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000);
    (ts << 12) | rand_bits
}

/// Parse a calendar date in `YYYY-MM-DD` form
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Parse a wall-clock time in `HH:MM` (or `HH:MM:SS`) form into minutes since midnight
pub fn parse_clock_minutes(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    let time = chrono::NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| chrono::NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()?;
    use chrono::Timelike;
    Some(time.hour() * 60 + time.minute())
}

/// Local part of an email address, used as the default username
pub fn email_local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snowflake_id_is_positive_and_js_safe() {
        let id = snowflake_id();
        assert!(id > 0);
        assert!(id < (1i64 << 53));
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2025-03-14").is_some());
        assert!(parse_date("14.03.2025").is_none());
        assert!(parse_date("2025-02-30").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn test_parse_clock_minutes() {
        assert_eq!(parse_clock_minutes("08:30"), Some(510));
        assert_eq!(parse_clock_minutes("17:00:00"), Some(1020));
        assert_eq!(parse_clock_minutes("25:00"), None);
    }

    #[test]
    fn test_email_local_part() {
        assert_eq!(email_local_part("anna@coffeebloom.de"), "anna");
        assert_eq!(email_local_part("no-at-sign"), "no-at-sign");
    }
}
