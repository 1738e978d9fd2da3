// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use chrono::{DateTime, Utc};

/// `[YYYYMMDD-HHMMSS]`, always in UTC.
pub const DATE_STAMP_FORMAT: &str = "[%Y%m%d-%H%M%S]";

#[must_use]
pub fn format_date_stamp(now: DateTime<Utc>) -> String {
    now.format(DATE_STAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_date_stamp() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 1).unwrap();
        assert_eq!(format_date_stamp(instant), "[20240307-090501]");
    }

    #[test]
    fn test_end_of_year() {
        let instant = Utc.with_ymd_and_hms(1999, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(format_date_stamp(instant), "[19991231-235959]");
    }
}
