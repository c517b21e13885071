pub mod user;
pub mod event;
pub mod announcement;
pub mod checkin;

pub use user::*;
pub use event::*;
pub use announcement::*;
pub use checkin::*;

/// Timestamp rendering shared by every response body.
///
/// Values are stored as naive UTC and rendered without an offset, with
/// microseconds only when the value has a sub-second part, so
/// `2024-03-01T18:30:00` and `2024-03-01T18:30:00.250000` are both valid
/// outputs.
pub mod iso8601 {
    use chrono::{DateTime, Timelike, Utc};
    use serde::Serializer;

    pub fn format(value: &DateTime<Utc>) -> String {
        let naive = value.naive_utc();
        if naive.nanosecond() / 1_000 == 0 {
            naive.format("%Y-%m-%dT%H:%M:%S").to_string()
        } else {
            naive.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
        }
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(value))
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::{NaiveDate, TimeZone};

        #[test]
        fn whole_seconds_have_no_fraction() {
            let dt = Utc.with_ymd_and_hms(2024, 3, 1, 18, 30, 0).unwrap();
            assert_eq!(format(&dt), "2024-03-01T18:30:00");
        }

        #[test]
        fn sub_seconds_render_as_microseconds() {
            let naive = NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_milli_opt(18, 30, 0, 250)
                .unwrap();
            let dt = DateTime::from_naive_utc_and_offset(naive, Utc);
            assert_eq!(format(&dt), "2024-03-01T18:30:00.250000");
        }
    }
}
