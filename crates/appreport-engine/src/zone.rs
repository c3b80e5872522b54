use chrono::{DateTime, FixedOffset, Local, LocalResult, NaiveDate, NaiveDateTime, Utc};

/// Zone in which datetimes written without an offset are read.
///
/// `Local` follows the machine's zone rules for each date, so a winter and
/// a summer datetime can land on different offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zone {
    #[default]
    Utc,
    Local,
    Fixed(FixedOffset),
}

impl Zone {
    /// Calendar date of `now` in this zone
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        match self {
            Zone::Utc => now.date_naive(),
            Zone::Local => now.with_timezone(&Local).date_naive(),
            Zone::Fixed(offset) => now.with_timezone(offset).date_naive(),
        }
    }

    /// Attach this zone to a wall-clock datetime
    pub fn localize(&self, naive: NaiveDateTime) -> LocalResult<DateTime<FixedOffset>> {
        match self {
            Zone::Utc => naive.and_local_timezone(Utc).map(|dt| dt.fixed_offset()),
            Zone::Local => naive.and_local_timezone(Local).map(|dt| dt.fixed_offset()),
            Zone::Fixed(offset) => naive.and_local_timezone(*offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, TimeZone};

    fn naive(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(h, 0, 0).unwrap())
    }

    #[test]
    fn test_utc_is_the_default() {
        let dt = Zone::default().localize(naive(2017, 1, 15, 10)).single().unwrap();
        assert_eq!(
            dt.timestamp(),
            Utc.with_ymd_and_hms(2017, 1, 15, 10, 0, 0).unwrap().timestamp()
        );
    }

    #[test]
    fn test_fixed_offset_shifts_wall_clock() {
        let cet = Zone::Fixed(FixedOffset::east_opt(3600).unwrap());
        let dt = cet.localize(naive(2017, 6, 5, 17)).single().unwrap();
        assert_eq!(
            dt.timestamp(),
            Utc.with_ymd_and_hms(2017, 6, 5, 16, 0, 0).unwrap().timestamp()
        );
    }

    #[test]
    fn test_local_uses_the_offset_of_each_date() {
        for value in [naive(2017, 1, 15, 10), naive(2017, 7, 15, 10)] {
            let expected = Local
                .from_local_datetime(&value)
                .single()
                .map(|dt| dt.timestamp());
            let actual = Zone::Local.localize(value).single().map(|dt| dt.timestamp());
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn test_today_follows_zone() {
        let now = Utc.with_ymd_and_hms(2017, 6, 5, 23, 30, 0).unwrap();
        let tokyo = Zone::Fixed(FixedOffset::east_opt(9 * 3600).unwrap());
        assert_eq!(tokyo.today(now), NaiveDate::from_ymd_opt(2017, 6, 6).unwrap());
        assert_eq!(Zone::Utc.today(now), NaiveDate::from_ymd_opt(2017, 6, 5).unwrap());
    }
}
