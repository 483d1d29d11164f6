//! Clock and calendar helpers
//!
//! All day/week classification goes through a [`Calendar`] so that "today"
//! means the same thing everywhere, and all reads of "now" go through a
//! [`Clock`] so rollovers can be simulated.

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    TimeZone, Utc, Weekday,
};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Date-only string format used for the streak cursor
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Source of the current instant
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        ManualClock {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        self.now.set(instant);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// Time zone a calendar classifies in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// The system time zone, with its daylight-saving rules
    Local,
    Fixed(FixedOffset),
}

/// Calendar used to classify instants into days and weeks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    zone: Zone,
    week_start: Weekday,
}

impl Default for Calendar {
    fn default() -> Self {
        Calendar::utc()
    }
}

impl Calendar {
    pub fn new(offset: FixedOffset, week_start: Weekday) -> Self {
        Calendar {
            zone: Zone::Fixed(offset),
            week_start,
        }
    }

    /// Calendar in the system time zone, weeks starting Sunday
    pub fn local() -> Self {
        Calendar {
            zone: Zone::Local,
            week_start: Weekday::Sun,
        }
    }

    /// Calendar in UTC, weeks starting Sunday
    pub fn utc() -> Self {
        Calendar::new(Utc.fix(), Weekday::Sun)
    }

    pub fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    pub fn week_start_day(&self) -> Weekday {
        self.week_start
    }

    /// The calendar date an instant falls on
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.localize(instant).date_naive()
    }

    /// An instant as wall-clock time, with the offset in force at that instant
    pub fn localize(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self.zone {
            Zone::Local => {
                let local = instant.with_timezone(&Local);
                local.with_timezone(&local.offset().fix())
            }
            Zone::Fixed(offset) => instant.with_timezone(&offset),
        }
    }

    /// The calendar date of the day before `now`
    pub fn yesterday(&self, now: DateTime<Utc>) -> NaiveDate {
        self.date_of(now) - Duration::days(1)
    }

    pub fn is_today(&self, instant: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        self.date_of(instant) == self.date_of(now)
    }

    /// Midnight of the most recent week-start day, as an instant
    pub fn week_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let today = self.date_of(now);
        let back = (today.weekday().num_days_from_sunday() + 7
            - self.week_start.num_days_from_sunday())
            % 7;
        let first_day = today - Duration::days(i64::from(back));
        self.midnight(first_day)
    }

    /// True for instants on or after the start of the current week
    pub fn is_this_week(&self, instant: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        instant >= self.week_start(now)
    }

    /// Hour of day in this calendar's zone
    pub fn hour_of(&self, instant: DateTime<Utc>) -> u32 {
        use chrono::Timelike;
        self.localize(instant).hour()
    }

    fn midnight(&self, date: NaiveDate) -> DateTime<Utc> {
        let start = date.and_time(NaiveTime::MIN);
        match self.zone {
            Zone::Local => first_instant(&Local, start),
            Zone::Fixed(offset) => first_instant(&offset, start),
        }
    }
}

/// First instant whose wall-clock time in `tz` is at or after `start`.
///
/// Ambiguous times take the earlier instant. When `start` falls in a
/// forward transition the day begins where the gap ends.
fn first_instant<Tz: TimeZone>(tz: &Tz, start: NaiveDateTime) -> DateTime<Utc> {
    (0..=96)
        .map(|step| start + Duration::minutes(15 * step))
        .find_map(|wall| tz.from_local_datetime(&wall).earliest())
        .map(|instant| instant.with_timezone(&Utc))
        .unwrap_or_else(|| start.and_utc())
}

/// Format a date as a date-only key (`YYYY-MM-DD`)
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Time-of-day greeting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Greeting {
    Morning,
    Afternoon,
    Evening,
}

impl Greeting {
    pub fn for_hour(hour: u32) -> Self {
        if hour < 12 {
            Greeting::Morning
        } else if hour < 18 {
            Greeting::Afternoon
        } else {
            Greeting::Evening
        }
    }
}

impl fmt::Display for Greeting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Greeting::Morning => write!(f, "Good morning"),
            Greeting::Afternoon => write!(f, "Good afternoon"),
            Greeting::Evening => write!(f, "Good evening"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_date_key() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(date_key(date), "2024-03-07");
    }

    #[test]
    fn test_yesterday_crosses_month() {
        let cal = Calendar::utc();
        let yesterday = cal.yesterday(at(2024, 3, 1, 8, 0));
        assert_eq!(yesterday, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_is_today_uses_offset() {
        // 2024-03-07 23:30 UTC is already 2024-03-08 in UTC+2
        let plus_two = Calendar::new(FixedOffset::east_opt(2 * 3600).unwrap(), Weekday::Sun);
        let instant = at(2024, 3, 7, 23, 30);
        let now = at(2024, 3, 8, 10, 0);

        assert!(plus_two.is_today(instant, now));
        assert!(!Calendar::utc().is_today(instant, now));
    }

    #[test]
    fn test_week_start_sunday() {
        let cal = Calendar::utc();
        // 2024-03-07 is a Thursday
        let start = cal.week_start(at(2024, 3, 7, 15, 0));
        assert_eq!(start, at(2024, 3, 3, 0, 0));
    }

    #[test]
    fn test_week_start_on_start_day() {
        let cal = Calendar::utc();
        let start = cal.week_start(at(2024, 3, 3, 0, 0));
        assert_eq!(start, at(2024, 3, 3, 0, 0));
    }

    #[test]
    fn test_week_start_monday() {
        let cal = Calendar::utc().with_week_start(Weekday::Mon);
        let start = cal.week_start(at(2024, 3, 3, 12, 0));
        assert_eq!(start, at(2024, 2, 26, 0, 0));
    }

    #[test]
    fn test_week_start_with_offset() {
        let minus_three = Calendar::new(FixedOffset::west_opt(3 * 3600).unwrap(), Weekday::Sun);
        // Local Sunday 2024-03-03 00:00 at UTC-3 is 03:00 UTC
        let start = minus_three.week_start(at(2024, 3, 7, 15, 0));
        assert_eq!(start, at(2024, 3, 3, 3, 0));
    }

    #[test]
    fn test_local_week_starts_at_local_midnight() {
        let cal = Calendar::local();
        // Weeks containing the 2024 daylight-saving changes in the US and EU
        for now in [
            at(2024, 3, 13, 12, 0),
            at(2024, 4, 3, 12, 0),
            at(2024, 10, 30, 12, 0),
            at(2024, 11, 6, 12, 0),
        ] {
            let start = cal.week_start(now);
            assert_eq!(cal.date_of(start).weekday(), Weekday::Sun);
            assert!(cal.date_of(start - Duration::seconds(1)) < cal.date_of(start));
            assert!(cal.is_this_week(start, now));
        }
    }

    #[test]
    fn test_local_yesterday_is_previous_date() {
        let cal = Calendar::local();
        // Just after local midnight following the 2024 spring-forward days
        for day in [11, 31] {
            let now = cal.midnight(NaiveDate::from_ymd_opt(2024, 3, day).unwrap())
                + Duration::minutes(30);
            assert_eq!(cal.yesterday(now), cal.date_of(now) - Duration::days(1));
        }
    }

    #[test]
    fn test_first_instant_fixed_offset() {
        let minus_five = FixedOffset::west_opt(5 * 3600).unwrap();
        let midnight = NaiveDate::from_ymd_opt(2024, 11, 3)
            .unwrap()
            .and_time(NaiveTime::MIN);
        assert_eq!(first_instant(&minus_five, midnight), at(2024, 11, 3, 5, 0));
    }

    #[test]
    fn test_localize_keeps_instant() {
        let plus_two = Calendar::new(FixedOffset::east_opt(2 * 3600).unwrap(), Weekday::Sun);
        let instant = at(2024, 3, 7, 23, 30);
        let local = plus_two.localize(instant);
        assert_eq!(local.to_string(), "2024-03-08 01:30:00 +02:00");
        assert_eq!(local, instant);
        assert_eq!(plus_two.hour_of(instant), 1);
    }

    #[test]
    fn test_is_this_week() {
        let cal = Calendar::utc();
        let now = at(2024, 3, 7, 15, 0);
        assert!(cal.is_this_week(at(2024, 3, 3, 0, 0), now));
        assert!(!cal.is_this_week(at(2024, 3, 2, 23, 59), now));
    }

    #[test]
    fn test_manual_clock_shared() {
        let clock = ManualClock::new(at(2024, 3, 7, 9, 0));
        let other = clock.clone();
        other.advance(Duration::hours(25));
        assert_eq!(clock.now(), at(2024, 3, 8, 10, 0));
    }

    #[test]
    fn test_greeting() {
        assert_eq!(Greeting::for_hour(0), Greeting::Morning);
        assert_eq!(Greeting::for_hour(11), Greeting::Morning);
        assert_eq!(Greeting::for_hour(12), Greeting::Afternoon);
        assert_eq!(Greeting::for_hour(17), Greeting::Afternoon);
        assert_eq!(Greeting::for_hour(18), Greeting::Evening);
        assert_eq!(Greeting::Evening.to_string(), "Good evening");
    }
}
