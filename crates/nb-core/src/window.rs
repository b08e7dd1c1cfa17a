//! Daily block window evaluation
//!
//! The window is a pair of `HH:MM` bounds. Both bounds are inclusive, a
//! window whose start is after its end wraps past midnight, and a window with
//! an unset bound or equal bounds is active all day.

use std::fmt;

use chrono::Timelike;

pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Error type for `HH:MM` parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeParseError {
    #[error("empty time")]
    Empty,
    #[error("expected HH:MM, got {0:?}")]
    Malformed(String),
    #[error("hour out of range: {0}")]
    HourOutOfRange(u16),
    #[error("minute out of range: {0}")]
    MinuteOutOfRange(u16),
}

/// Minutes since midnight, `0..=1439`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: Self = Self(0);

    /// Build from minutes since midnight. Returns `None` past 23:59.
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(Self(minutes))
    }

    pub fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self(hour * 60 + minute))
    }

    /// Time of day of a chrono time or datetime, truncated to the minute.
    pub fn from_time<T: Timelike>(time: &T) -> Self {
        Self((time.hour() * 60 + time.minute()) as u16)
    }

    /// Parse strict `H:MM` / `HH:MM`.
    pub fn parse(text: &str) -> Result<Self, TimeParseError> {
        if text.is_empty() {
            return Err(TimeParseError::Empty);
        }
        let malformed = || TimeParseError::Malformed(text.to_string());

        let (hour_text, minute_text) = text.split_once(':').ok_or_else(malformed)?;
        if !(1..=2).contains(&hour_text.len()) || minute_text.len() != 2 {
            return Err(malformed());
        }
        let hour = parse_digits(hour_text).ok_or_else(malformed)?;
        let minute = parse_digits(minute_text).ok_or_else(malformed)?;

        if hour > 23 {
            return Err(TimeParseError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(TimeParseError::MinuteOutOfRange(minute));
        }
        Ok(Self(hour * 60 + minute))
    }

    #[inline]
    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// ASCII digits only; `str::parse` would also accept a leading `+`.
fn parse_digits(text: &str) -> Option<u16> {
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Parse a window bound, treating anything invalid as unset.
pub fn parse_time_of_day(text: &str) -> Option<TimeOfDay> {
    TimeOfDay::parse(text).ok()
}

/// Check if `now` falls inside the `start..=end` window.
pub fn is_within_window(start: Option<TimeOfDay>, end: Option<TimeOfDay>, now: TimeOfDay) -> bool {
    let (Some(start), Some(end)) = (start, end) else {
        return true;
    };
    if start == end {
        return true;
    }
    if start < end {
        start <= now && now <= end
    } else {
        now >= start || now <= end
    }
}

// =============================================================================
// Block Window
// =============================================================================

/// Parsed daily block window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockWindow {
    pub start: Option<TimeOfDay>,
    pub end: Option<TimeOfDay>,
}

impl BlockWindow {
    /// Window active all day.
    pub const ALWAYS: Self = Self { start: None, end: None };

    pub fn new(start: Option<TimeOfDay>, end: Option<TimeOfDay>) -> Self {
        Self { start, end }
    }

    /// Parse from the raw `HH:MM` strings of a configuration.
    pub fn parse(start: &str, end: &str) -> Self {
        Self::new(parse_time_of_day(start), parse_time_of_day(end))
    }

    #[inline]
    pub fn contains(&self, now: TimeOfDay) -> bool {
        is_within_window(self.start, self.end, now)
    }

    /// True if the window restricts blocking to part of the day.
    pub fn is_restricted(&self) -> bool {
        matches!((self.start, self.end), (Some(start), Some(end)) if start != end)
    }

    /// True if the active range crosses midnight.
    pub fn wraps_midnight(&self) -> bool {
        matches!((self.start, self.end), (Some(start), Some(end)) if start > end)
    }
}

impl fmt::Display for BlockWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start != end => write!(f, "{start}-{end}"),
            _ => f.write_str("all day"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn t(text: &str) -> TimeOfDay {
        TimeOfDay::parse(text).unwrap()
    }

    fn m(minutes: u16) -> TimeOfDay {
        TimeOfDay::from_minutes(minutes).unwrap()
    }

    #[test]
    fn test_parse_valid() {
        assert_eq!(t("00:00").minutes(), 0);
        assert_eq!(t("9:05").minutes(), 545);
        assert_eq!(t("09:05").minutes(), 545);
        assert_eq!(t("23:59").minutes(), 1439);
        assert_eq!(t("22:00").minutes(), 1320);
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(TimeOfDay::parse(""), Err(TimeParseError::Empty));
        assert_eq!(TimeOfDay::parse("24:00"), Err(TimeParseError::HourOutOfRange(24)));
        assert_eq!(TimeOfDay::parse("12:60"), Err(TimeParseError::MinuteOutOfRange(60)));
        for text in ["9", "9:5", "009:00", "09:000", "ab:cd", "+9:00", "09-00", " 09:00", "09:00 ", "9:00pm", ":00"] {
            assert!(matches!(TimeOfDay::parse(text), Err(TimeParseError::Malformed(_))), "{text}");
            assert_eq!(parse_time_of_day(text), None);
        }
    }

    #[test]
    fn test_from_time() {
        let time = NaiveTime::from_hms_opt(23, 20, 59).unwrap();
        assert_eq!(TimeOfDay::from_time(&time).minutes(), 1400);
        assert_eq!(TimeOfDay::from_hm(8, 30), Some(m(510)));
        assert_eq!(TimeOfDay::from_hm(24, 0), None);
        assert_eq!(TimeOfDay::from_minutes(1440), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(m(545).to_string(), "09:05");
        assert_eq!(BlockWindow::parse("22:00", "6:00").to_string(), "22:00-06:00");
        assert_eq!(BlockWindow::parse("", "6:00").to_string(), "all day");
    }

    #[test]
    fn test_unset_bound_is_always_active() {
        for now in [0, 600, 1439] {
            assert!(is_within_window(None, Some(m(600)), m(now)));
            assert!(is_within_window(Some(m(600)), None, m(now)));
            assert!(is_within_window(None, None, m(now)));
        }
    }

    #[test]
    fn test_equal_bounds_is_full_day() {
        for now in 0..MINUTES_PER_DAY {
            assert!(is_within_window(Some(m(540)), Some(m(540)), m(now)));
        }
    }

    #[test]
    fn test_plain_window() {
        let (start, end) = (Some(t("08:00")), Some(t("17:00")));
        assert!(is_within_window(start, end, t("08:00")));
        assert!(is_within_window(start, end, t("12:30")));
        assert!(is_within_window(start, end, t("17:00")));
        assert!(!is_within_window(start, end, t("07:59")));
        assert!(!is_within_window(start, end, t("17:01")));
        assert!(!is_within_window(start, end, t("20:00")));
    }

    #[test]
    fn test_wrapping_window() {
        let (start, end) = (Some(m(1320)), Some(m(360)));
        assert!(is_within_window(start, end, m(1400)));
        assert!(is_within_window(start, end, m(1320)));
        assert!(is_within_window(start, end, m(0)));
        assert!(is_within_window(start, end, m(360)));
        assert!(!is_within_window(start, end, m(361)));
        assert!(!is_within_window(start, end, m(720)));
        assert!(!is_within_window(start, end, m(1319)));
    }

    #[test]
    fn test_block_window() {
        let window = BlockWindow::parse("22:00", "06:00");
        assert!(window.is_restricted());
        assert!(window.wraps_midnight());
        assert!(window.contains(t("23:20")));
        assert!(!window.contains(t("12:00")));

        let invalid = BlockWindow::parse("25:00", "06:00");
        assert!(!invalid.is_restricted());
        assert!(invalid.contains(t("12:00")));
        assert_eq!(BlockWindow::default(), BlockWindow::ALWAYS);
    }
}
