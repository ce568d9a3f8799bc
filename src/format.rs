//! Read-only views derived from notes: category groups, relative time labels
//! and list previews.
use std::fmt::{Display, Write};

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::Note;

/// Absolute date layout used once a note is a week old (`2024/1/15`).
pub const DEFAULT_DATE_FORMAT: &str = "%Y/%-m/%-d";

/// Characters shown in a note list entry before it is cut off.
pub const DEFAULT_PREVIEW_LENGTH: usize = 100;

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// All notes of one category, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    pub notes: Vec<&'a Note>,
}

/// Groups notes by category.
///
/// Groups appear in the order their category is first met while scanning
/// `notes`. Inside a group notes are ordered by date, newest first; notes
/// with equal dates keep their relative order.
pub fn group_by_category(notes: &[Note]) -> Vec<CategoryGroup<'_>> {
    let mut groups: Vec<CategoryGroup<'_>> = Vec::new();

    for note in notes {
        match groups.iter_mut().find(|g| g.category == note.category) {
            Some(group) => group.notes.push(note),
            None => groups.push(CategoryGroup {
                category: &note.category,
                notes: vec![note],
            }),
        }
    }

    for group in &mut groups {
        // sort_by is stable
        group.notes.sort_by(|a, b| b.date.cmp(&a.date));
    }

    groups
}

/// Relative label for `date` as seen at `now`, falling back to a local
/// calendar date after a week.
pub fn format_relative_time(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format_relative_time_in(date, now, &Local, DEFAULT_DATE_FORMAT)
}

/// Like [`format_relative_time`], with an explicit time zone and strftime
/// layout for the absolute date.
pub fn format_relative_time_in<Tz>(
    date: DateTime<Utc>,
    now: DateTime<Utc>,
    tz: &Tz,
    date_format: &str,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let elapsed = now.signed_duration_since(date).num_milliseconds();
    // Clock skew can put a note in the future.
    if elapsed < MINUTE_MS {
        return "just now".to_string();
    }
    if elapsed < HOUR_MS {
        return format!("{} minutes ago", elapsed / MINUTE_MS);
    }
    if elapsed < DAY_MS {
        return format!("{} hours ago", elapsed / HOUR_MS);
    }
    if elapsed < 7 * DAY_MS {
        return format!("{} days ago", elapsed / DAY_MS);
    }

    let local = date.with_timezone(tz);
    let mut out = String::new();
    if write!(out, "{}", local.format(date_format)).is_err() {
        out.clear();
        let _ = write!(out, "{}", local.format(DEFAULT_DATE_FORMAT));
    }
    out
}

/// First `max_chars` characters of `content`, with `...` appended when
/// anything was cut.
pub fn preview_content(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}
