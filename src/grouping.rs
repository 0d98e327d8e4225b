//! Presentation rules for the message list.
//!
//! Consecutive messages from the same author that arrive close together form a
//! burst. Within a burst the sender header and the timestamp are shown only at
//! the edges; a date separator is inserted whenever the calendar day changes.
//! Everything here is pure: plain data in, plain booleans and labels out.

use chrono::{DateTime, Datelike, TimeDelta, TimeZone};
use serde::{Deserialize, Serialize};

use crate::common::ChatMessage;

/// Default maximum gap between two messages of the same burst.
pub const DEFAULT_THRESHOLD_MS: i64 = 5 * 60 * 1000;

pub fn default_threshold() -> TimeDelta {
    TimeDelta::milliseconds(DEFAULT_THRESHOLD_MS)
}

/// Language of the relative date labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "en")]
    English,
}

/// Whether the message at `index` displays its timestamp.
///
/// The newest message always does. Otherwise a timestamp marks a burst edge:
/// the author changes with the next message, the next message comes more than
/// `threshold` later, or this message itself came more than `threshold` after
/// the previous one.
///
/// # Panics
///
/// Panics if `index` is out of bounds.
pub fn should_show_timestamp(messages: &[ChatMessage], index: usize, threshold: TimeDelta) -> bool {
    assert!(
        index < messages.len(),
        "message index {index} out of bounds for {} messages",
        messages.len()
    );

    if index == messages.len() - 1 {
        return true;
    }

    let current = &messages[index];
    let next = &messages[index + 1];

    if next.author != current.author {
        return true;
    }

    if next.timestamp - current.timestamp > threshold {
        return true;
    }

    // A message that opened a new burst keeps its timestamp even when the
    // following one is close.
    if index > 0 {
        let previous = &messages[index - 1];
        if current.timestamp - previous.timestamp > threshold {
            return true;
        }
    }

    false
}

/// Whether a date separator goes above the message at `index`.
///
/// Calendar days are taken in `tz`.
///
/// # Panics
///
/// Panics if `index` is out of bounds.
pub fn should_show_date_header<Tz: TimeZone>(messages: &[ChatMessage], index: usize, tz: &Tz) -> bool {
    assert!(
        index < messages.len(),
        "message index {index} out of bounds for {} messages",
        messages.len()
    );

    if index == 0 {
        return true;
    }

    let current = messages[index].timestamp.with_timezone(tz).date_naive();
    let previous = messages[index - 1].timestamp.with_timezone(tz).date_naive();
    current != previous
}

/// Whether the sender header (avatar and name) goes above the message at `index`.
///
/// True for the first message of every burst.
///
/// # Panics
///
/// Panics if `index` is out of bounds.
pub fn should_show_header<Tz: TimeZone>(
    messages: &[ChatMessage],
    index: usize,
    threshold: TimeDelta,
    tz: &Tz,
) -> bool {
    if should_show_date_header(messages, index, tz) {
        return true;
    }

    let current = &messages[index];
    let previous = &messages[index - 1];
    previous.author != current.author || current.timestamp - previous.timestamp > threshold
}

/// Label for a date separator, relative to `now`.
///
/// Days are compared at calendar boundaries in the time zone both values carry.
/// Dates after `now`'s day are labelled as today.
pub fn format_relative_date<Tz: TimeZone>(
    timestamp: &DateTime<Tz>,
    now: &DateTime<Tz>,
    locale: Locale,
) -> String {
    let day = timestamp.date_naive();
    let days_ago = now.date_naive().signed_duration_since(day).num_days();

    let labels = locale.labels();
    match days_ago {
        ..=0 => labels.today.to_string(),
        1 => labels.yesterday.to_string(),
        2 => labels.day_before_yesterday.to_string(),
        _ => {
            let weekday = labels.weekdays[day.weekday().num_days_from_monday() as usize];
            let month = labels.months[day.month0() as usize];
            match locale {
                Locale::French => format!("{weekday} {} {month} {}", day.day(), day.year()),
                Locale::English => format!("{weekday}, {month} {}, {}", day.day(), day.year()),
            }
        }
    }
}

struct Labels {
    today: &'static str,
    yesterday: &'static str,
    day_before_yesterday: &'static str,
    weekdays: [&'static str; 7],
    months: [&'static str; 12],
}

static FRENCH: Labels = Labels {
    today: "Aujourd'hui",
    yesterday: "Hier",
    day_before_yesterday: "Avant-hier",
    weekdays: ["lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche"],
    months: [
        "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre",
        "octobre", "novembre", "décembre",
    ],
};

static ENGLISH: Labels = Labels {
    today: "Today",
    yesterday: "Yesterday",
    day_before_yesterday: "Day before yesterday",
    weekdays: [
        "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
    ],
    months: [
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December",
    ],
};

impl Locale {
    fn labels(self) -> &'static Labels {
        match self {
            Locale::French => &FRENCH,
            Locale::English => &ENGLISH,
        }
    }
}

/// Rendering decisions for one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageLayout {
    pub show_header: bool,
    pub show_timestamp: bool,
    /// Separator label, present when the calendar day starts with this message.
    pub date_label: Option<String>,
}

/// Compute the layout of every message for one render pass.
pub fn layout<Tz: TimeZone>(
    messages: &[ChatMessage],
    now: &DateTime<Tz>,
    threshold: TimeDelta,
    locale: Locale,
) -> Vec<MessageLayout> {
    let tz = now.timezone();
    (0..messages.len())
        .map(|index| {
            let date_label = should_show_date_header(messages, index, &tz).then(|| {
                let local = messages[index].timestamp.with_timezone(&tz);
                format_relative_date(&local, now, locale)
            });

            MessageLayout {
                show_header: should_show_header(messages, index, threshold, &tz),
                show_timestamp: should_show_timestamp(messages, index, threshold),
                date_label,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn message(author: &str, hour: u32, minute: u32) -> ChatMessage {
        message_on(author, 10, hour, minute)
    }

    fn message_on(author: &str, day: u32, hour: u32, minute: u32) -> ChatMessage {
        ChatMessage {
            author: author.to_string(),
            content: format!("{author} at {hour}:{minute}"),
            avatar: String::new(),
            timestamp: Utc.with_ymd_and_hms(2025, 3, day, hour, minute, 0).unwrap(),
            is_own_message: false,
        }
    }

    fn timestamps(messages: &[ChatMessage]) -> Vec<bool> {
        (0..messages.len())
            .map(|index| should_show_timestamp(messages, index, default_threshold()))
            .collect()
    }

    #[test]
    fn single_message_always_shows_timestamp_and_date() {
        let messages = vec![message("alice", 10, 0)];
        assert!(should_show_timestamp(&messages, 0, default_threshold()));
        assert!(should_show_date_header(&messages, 0, &Utc));
        assert!(should_show_header(&messages, 0, default_threshold(), &Utc));
    }

    #[test]
    fn gap_to_next_message_marks_burst_end() {
        let messages = vec![
            message("alice", 10, 0),
            message("alice", 10, 1),
            message("alice", 10, 10),
        ];
        assert_eq!(timestamps(&messages), vec![false, true, true]);
    }

    #[test]
    fn author_change_marks_burst_end() {
        let messages = vec![
            message("alice", 10, 0),
            message("alice", 10, 1),
            message("bob", 10, 2),
        ];
        assert_eq!(timestamps(&messages), vec![false, true, true]);
    }

    #[test]
    fn tight_burst_hides_middle_timestamps() {
        let messages = vec![
            message("alice", 10, 0),
            message("alice", 10, 2),
            message("alice", 10, 4),
            message("alice", 10, 6),
        ];
        assert_eq!(timestamps(&messages), vec![false, false, false, true]);
    }

    #[test]
    fn gap_before_message_keeps_its_timestamp() {
        let messages = vec![
            message("alice", 10, 0),
            message("alice", 10, 20),
            message("alice", 10, 21),
        ];
        assert_eq!(timestamps(&messages), vec![true, true, true]);
    }

    #[test]
    fn gap_equal_to_threshold_stays_in_burst() {
        let messages = vec![
            message("alice", 10, 0),
            message("alice", 10, 5),
            message("alice", 10, 10),
        ];
        assert_eq!(timestamps(&messages), vec![false, false, true]);
    }

    #[test]
    fn custom_threshold_is_respected() {
        let messages = vec![message("alice", 10, 0), message("alice", 10, 2)];
        assert!(should_show_timestamp(&messages, 0, TimeDelta::minutes(1)));
        assert!(!should_show_timestamp(&messages, 0, TimeDelta::minutes(3)));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn timestamp_index_past_end_panics() {
        let messages = vec![message("alice", 10, 0)];
        should_show_timestamp(&messages, 1, default_threshold());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn date_header_on_empty_sequence_panics() {
        should_show_date_header(&[], 0, &Utc);
    }

    #[test]
    fn date_header_on_day_change() {
        let messages = vec![
            message_on("alice", 10, 23, 58),
            message_on("alice", 11, 0, 1),
            message_on("bob", 11, 9, 0),
        ];
        assert!(should_show_date_header(&messages, 0, &Utc));
        assert!(should_show_date_header(&messages, 1, &Utc));
        assert!(!should_show_date_header(&messages, 2, &Utc));
    }

    #[test]
    fn date_header_follows_the_time_zone() {
        let messages = vec![message_on("alice", 10, 22, 0), message_on("alice", 10, 23, 30)];
        let paris = FixedOffset::east_opt(3600).unwrap();

        assert!(!should_show_date_header(&messages, 1, &Utc));
        // 23:30 UTC is already the next day at UTC+1.
        assert!(should_show_date_header(&messages, 1, &paris));
    }

    #[test]
    fn header_marks_first_message_of_each_burst() {
        let messages = vec![
            message("alice", 10, 0),
            message("alice", 10, 1),
            message("bob", 10, 2),
            message("bob", 10, 30),
        ];
        let headers: Vec<bool> = (0..messages.len())
            .map(|index| should_show_header(&messages, index, default_threshold(), &Utc))
            .collect();
        assert_eq!(headers, vec![true, false, true, true]);
    }

    #[test]
    fn relative_labels_follow_calendar_days() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 0, 1, 0).unwrap();
        let at = |day, hour, minute| Utc.with_ymd_and_hms(2025, 3, day, hour, minute, 0).unwrap();

        assert_eq!(format_relative_date(&at(10, 23, 59), &now, Locale::English), "Today");
        assert_eq!(format_relative_date(&at(9, 23, 59), &now, Locale::English), "Yesterday");
        assert_eq!(
            format_relative_date(&at(8, 0, 0), &now, Locale::English),
            "Day before yesterday"
        );
        assert_eq!(
            format_relative_date(&at(7, 23, 59), &now, Locale::English),
            "Friday, March 7, 2025"
        );
    }

    #[test]
    fn relative_labels_in_french() {
        let now = Utc.with_ymd_and_hms(2026, 10, 20, 12, 0, 0).unwrap();
        let at = |day| Utc.with_ymd_and_hms(2026, 10, day, 8, 0, 0).unwrap();

        assert_eq!(format_relative_date(&at(20), &now, Locale::French), "Aujourd'hui");
        assert_eq!(format_relative_date(&at(19), &now, Locale::French), "Hier");
        assert_eq!(format_relative_date(&at(18), &now, Locale::French), "Avant-hier");
        assert_eq!(
            format_relative_date(&at(17), &now, Locale::French),
            "samedi 17 octobre 2026"
        );
    }

    #[test]
    fn future_dates_are_labelled_today() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        let tomorrow = Utc.with_ymd_and_hms(2025, 3, 11, 9, 0, 0).unwrap();
        assert_eq!(format_relative_date(&tomorrow, &now, Locale::English), "Today");
    }

    #[test]
    fn relative_date_is_stable_across_calls() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        let timestamp = Utc.with_ymd_and_hms(2025, 1, 2, 9, 0, 0).unwrap();
        let first = format_relative_date(&timestamp, &now, Locale::French);
        let second = format_relative_date(&timestamp, &now, Locale::French);
        assert_eq!(first, second);
        assert_eq!(first, "jeudi 2 janvier 2025");
    }

    #[test]
    fn layout_combines_all_rules() {
        let messages = vec![
            message_on("alice", 9, 18, 0),
            message_on("alice", 10, 10, 0),
            message_on("alice", 10, 10, 1),
            message_on("bob", 10, 10, 2),
        ];
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();

        let rows = layout(&messages, &now, default_threshold(), Locale::English);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].date_label.as_deref(), Some("Yesterday"));
        assert_eq!(rows[1].date_label.as_deref(), Some("Today"));
        assert_eq!(rows[2].date_label, None);
        assert_eq!(rows[3].date_label, None);
        assert_eq!(
            rows.iter().map(|row| row.show_header).collect::<Vec<_>>(),
            vec![true, true, false, true]
        );
        assert_eq!(
            rows.iter().map(|row| row.show_timestamp).collect::<Vec<_>>(),
            vec![true, true, true, true]
        );
    }

    #[test]
    fn layout_of_empty_sequence_is_empty() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        assert!(layout(&[], &now, default_threshold(), Locale::French).is_empty());
    }
}
