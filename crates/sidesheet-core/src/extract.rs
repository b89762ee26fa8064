//! Row classification and event extraction for the side-event sheet.
//!
//! The source is a human-edited table: a title row, a header row, then an
//! interleaving of date-header rows ("17 February, Tuesday"), multi-day
//! range rows ("Feb 12-26"), per-event rows keyed by a start time
//! ("6:00 pm"), and assorted noise. The extractor folds over the rows in
//! order, carrying the most recent date header as context, and emits one
//! [`ParsedEvent`] per event row.
//!
//! Parsing is deliberately lenient: rows that fit no class are dropped,
//! never surfaced as errors. The sheet is edited by hand and a strict
//! importer would reject the whole file over one stray cell. Dropped rows
//! are still accounted for in [`Extraction::skipped_rows`].

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use tracing::debug;

use crate::event::ParsedEvent;

/// The event season's year, applied to every date parsed from the sheet.
///
/// The sheet itself only names days and months; the year is implicit in
/// which season's sheet is being imported and must be bumped per season.
pub const SEASON_YEAR: i32 = 2026;

/// Number of leading rows (title + column header) skipped before
/// classification starts.
pub const DATA_START_ROW: usize = 2;

/// Full month names in calendar order, used for date-header rows.
const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Date-header row, e.g. `"17 February, Tuesday"`.
static DATE_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(\d{1,2})\s+(January|February|March|April|May|June|July|August|September|October|November|December),?\s+\w+",
    )
    .expect("valid date header regex")
});

/// Multi-day range row, e.g. `"Feb 12-26"` or `"Feb 13-15 2026"`.
static DATE_RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]+)\s+(\d{1,2})-(\d{1,2})(?:\s+\d{4})?\s*$").expect("valid date range regex"));

/// Clock-time cell, e.g. `"6:00 pm"`, `"18:30"`, or `"6 pm"`.
static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:\d{1,2}:\d{2}\s*(?:am|pm)?|\d{1,2}\s*(?:am|pm))$").expect("valid time regex")
});

/// The result of one extraction pass over a row sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Extracted events, in source row order.
    pub events: Vec<ParsedEvent>,
    /// Data rows that neither produced an event nor updated the carried
    /// date: empty first cells, unclassifiable rows, malformed dates,
    /// event rows with no name, and time rows seen before any date header.
    pub skipped_rows: usize,
}

/// What a single classified row contributes to the fold.
enum RowAction {
    /// A date-header row: update the carried date, emit nothing.
    SetCurrentDate(NaiveDate),
    /// An event or range row: emit one event, carried date untouched.
    Emit(ParsedEvent),
    /// Noise, or a row whose date/name preconditions failed.
    Skip,
}

/// Extracts events from an ordered sequence of sheet rows.
///
/// The first [`DATA_START_ROW`] rows are skipped unconditionally. Each
/// remaining row is classified by its first cell, in fixed priority order:
/// date header, date range, clock time; the first match wins. Range rows
/// are self-contained (dated from the range's start day); time rows depend
/// on the carried date from the most recent header row.
///
/// The extractor is a pure single pass: no I/O, no state outside the
/// local fold accumulator, and the same input always yields the same
/// output. Duplicate source rows yield duplicate events; deduplication is
/// the store's concern.
pub fn extract_events(rows: &[Vec<String>]) -> Extraction {
    let mut events = Vec::new();
    let mut skipped_rows = 0usize;
    let mut current_date: Option<NaiveDate> = None;

    for row in rows.iter().skip(DATA_START_ROW) {
        match classify_row(row, current_date) {
            RowAction::SetCurrentDate(date) => current_date = Some(date),
            RowAction::Emit(event) => events.push(event),
            RowAction::Skip => skipped_rows += 1,
        }
    }

    debug!(
        events = events.len(),
        skipped = skipped_rows,
        "extracted side events"
    );

    Extraction {
        events,
        skipped_rows,
    }
}

/// Classifies one row against the carried date context.
fn classify_row(row: &[String], current_date: Option<NaiveDate>) -> RowAction {
    let col0 = cell(row, 0);
    if col0.is_empty() {
        return RowAction::Skip;
    }

    if let Some(caps) = DATE_HEADER_RE.captures(col0) {
        return match header_date(&caps) {
            Some(date) => RowAction::SetCurrentDate(date),
            None => RowAction::Skip,
        };
    }

    if DATE_RANGE_RE.is_match(col0) {
        if cell(row, 2).is_empty() {
            return RowAction::Skip;
        }
        return match range_start_date(col0) {
            // The whole range string is the start time; readers see the
            // span verbatim even though only the start day is dated.
            Some(date) => RowAction::Emit(build_event(date, col0, None, row)),
            None => RowAction::Skip,
        };
    }

    if TIME_RE.is_match(col0) {
        return match current_date {
            Some(date) if !cell(row, 2).is_empty() => {
                let end_time = non_empty(cell(row, 1));
                RowAction::Emit(build_event(date, col0, end_time, row))
            }
            // A time cell with no event name, or before any date header
            // row has established context.
            _ => RowAction::Skip,
        };
    }

    RowAction::Skip
}

/// Parses a captured date-header row into a season date.
///
/// Returns `None` for days outside the calendar (0, 32, or a day the
/// month does not have), leaving the carried date unchanged.
fn header_date(caps: &regex::Captures<'_>) -> Option<NaiveDate> {
    let day: u32 = caps[1].parse().ok()?;
    let month = MONTH_NAMES
        .iter()
        .position(|name| name.eq_ignore_ascii_case(&caps[2]))?
        as u32
        + 1;
    season_date(month, day)
}

/// Parses a range cell (`"Feb 12-26"`) into the date of its first day.
///
/// The month matches by three-letter abbreviation prefix or full name.
/// The trailing day and any explicit year were already consumed by the
/// range pattern and are not represented in the result.
fn range_start_date(col0: &str) -> Option<NaiveDate> {
    let caps = DATE_RANGE_RE.captures(col0)?;
    let month = month_from_prefix(&caps[1])?;
    let day: u32 = caps[2].parse().ok()?;
    season_date(month, day)
}

/// Resolves a month word by its three-letter abbreviation prefix
/// (covering full names as well, since each starts with its abbreviation).
fn month_from_prefix(word: &str) -> Option<u32> {
    let lower = word.to_ascii_lowercase();
    MONTH_NAMES
        .iter()
        .position(|name| lower.starts_with(&name[..3].to_ascii_lowercase()))
        .map(|idx| idx as u32 + 1)
}

/// Builds a season-year date, rejecting out-of-calendar day numbers.
fn season_date(month: u32, day: u32) -> Option<NaiveDate> {
    if !(1..=31).contains(&day) {
        return None;
    }
    NaiveDate::from_ymd_opt(SEASON_YEAR, month, day)
}

/// Extracts the shared event fields from columns 2-6.
fn build_event(
    event_date: NaiveDate,
    start_time: &str,
    end_time: Option<String>,
    row: &[String],
) -> ParsedEvent {
    let reg5 = cell(row, 5);
    let reg6 = cell(row, 6);

    // Column 5 wins when URL-shaped, then column 6; a non-URL column 5
    // is still kept verbatim as a registration hint.
    let registration_url = if looks_like_url(reg5) {
        Some(reg5.to_string())
    } else if looks_like_url(reg6) {
        Some(reg6.to_string())
    } else {
        non_empty(reg5)
    };

    // Column 6 doubles as a URL overflow column; only non-URL text
    // survives as notes.
    let notes = (!reg6.is_empty() && !looks_like_url(reg6)).then(|| reg6.to_string());

    ParsedEvent {
        event_date,
        start_time: start_time.to_string(),
        end_time,
        event_name: cell(row, 2).to_string(),
        organizer: non_empty(cell(row, 3)),
        venue: non_empty(cell(row, 4)),
        registration_url,
        notes,
    }
}

/// Returns the trimmed cell at `idx`, treating missing trailing cells in
/// ragged rows as empty.
fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(|s| s.trim()).unwrap_or("")
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

/// Returns true when the cell holds an absolute HTTP(S) URL.
fn looks_like_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(SEASON_YEAR, m, d).unwrap()
    }

    /// Builds an owned row table from string literals, prepending the
    /// title and header rows every real sheet carries.
    fn sheet(data_rows: &[&[&str]]) -> Vec<Vec<String>> {
        let mut rows = vec![
            vec!["Side Events".to_string()],
            vec![
                "Start".to_string(),
                "End".to_string(),
                "Event".to_string(),
                "Organizer".to_string(),
                "Venue".to_string(),
                "Registration".to_string(),
                "Notes".to_string(),
            ],
        ];
        rows.extend(
            data_rows
                .iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect()),
        );
        rows
    }

    fn events(data_rows: &[&[&str]]) -> Vec<ParsedEvent> {
        extract_events(&sheet(data_rows)).events
    }

    mod date_headers {
        use super::*;

        #[test]
        fn header_establishes_date_for_following_events() {
            let events = events(&[
                &["17 February, Tuesday"],
                &["6:00 pm", "", "Mixer"],
            ]);
            assert_eq!(events.len(), 1);
            assert_eq!(events[0].event_date, date(2, 17));
        }

        #[test]
        fn every_month_name_resolves() {
            for (idx, month) in MONTH_NAMES.iter().enumerate() {
                let header = format!("5 {month}, Someday");
                let events = events(&[&[header.as_str()], &["9:00 am", "", "Breakfast"]]);
                assert_eq!(events.len(), 1, "month {month}");
                assert_eq!(events[0].event_date, date(idx as u32 + 1, 5));
            }
        }

        #[test]
        fn header_is_case_insensitive_and_comma_optional() {
            let events = events(&[
                &["17 FEBRUARY Tuesday"],
                &["6:00 pm", "", "Mixer"],
            ]);
            assert_eq!(events[0].event_date, date(2, 17));
        }

        #[test]
        fn later_header_supersedes_earlier() {
            let events = events(&[
                &["17 February, Tuesday"],
                &["6:00 pm", "", "Mixer"],
                &["18 February, Wednesday"],
                &["9:00 am", "", "Breakfast"],
            ]);
            assert_eq!(events[0].event_date, date(2, 17));
            assert_eq!(events[1].event_date, date(2, 18));
        }

        #[test]
        fn date_survives_intervening_noise() {
            let events = events(&[
                &["17 February, Tuesday"],
                &["", "", "orphaned text"],
                &["random note in column 0"],
                &["6:00 pm", "", "Mixer"],
            ]);
            assert_eq!(events.len(), 1);
            assert_eq!(events[0].event_date, date(2, 17));
        }

        #[test]
        fn out_of_range_day_leaves_state_unchanged() {
            let events = events(&[
                &["17 February, Tuesday"],
                &["32 February, Nonday"],
                &["0 March, Nonday"],
                &["6:00 pm", "", "Mixer"],
            ]);
            assert_eq!(events.len(), 1);
            assert_eq!(events[0].event_date, date(2, 17));
        }

        #[test]
        fn nonexistent_calendar_day_is_ignored() {
            // 30 February passes the 1-31 bound but is not a real date.
            let events = events(&[
                &["17 February, Tuesday"],
                &["30 February, Nonday"],
                &["6:00 pm", "", "Mixer"],
            ]);
            assert_eq!(events[0].event_date, date(2, 17));
        }

        #[test]
        fn header_without_trailing_word_is_not_a_header() {
            // "17 February" alone does not match the header shape.
            let events = events(&[&["17 February"], &["6:00 pm", "", "Mixer"]]);
            assert!(events.is_empty());
        }
    }

    mod date_ranges {
        use super::*;

        #[test]
        fn range_emits_one_event_dated_at_range_start() {
            let events = events(&[&["Feb 12-26", "", "Hacker House"]]);
            assert_eq!(events.len(), 1);
            assert_eq!(events[0].event_date, date(2, 12));
            assert_eq!(events[0].start_time, "Feb 12-26");
            assert!(events[0].end_time.is_none());
        }

        #[test]
        fn range_works_without_any_prior_header() {
            let events = events(&[&["Feb 13-15", "", "Retreat"]]);
            assert_eq!(events.len(), 1);
            assert_eq!(events[0].event_date, date(2, 13));
        }

        #[test]
        fn range_accepts_full_month_name_and_explicit_year() {
            let events = events(&[
                &["February 12-26", "", "Hacker House"],
                &["Feb 13-15 2026", "", "Retreat"],
            ]);
            assert_eq!(events[0].event_date, date(2, 12));
            assert_eq!(events[0].start_time, "February 12-26");
            assert_eq!(events[1].event_date, date(2, 13));
            assert_eq!(events[1].start_time, "Feb 13-15 2026");
        }

        #[test]
        fn range_does_not_update_carried_date() {
            let events = events(&[
                &["17 February, Tuesday"],
                &["Feb 12-26", "", "Hacker House"],
                &["6:00 pm", "", "Mixer"],
            ]);
            assert_eq!(events.len(), 2);
            assert_eq!(events[1].event_date, date(2, 17));
        }

        #[test]
        fn range_without_event_name_is_dropped() {
            let events = events(&[&["Feb 12-26", "", ""]]);
            assert!(events.is_empty());
        }

        #[test]
        fn range_with_unknown_month_is_dropped() {
            let events = events(&[&["Xyz 12-26", "", "Mystery"]]);
            assert!(events.is_empty());
        }
    }

    mod event_rows {
        use super::*;

        #[test]
        fn time_row_before_any_header_is_dropped() {
            let events = events(&[&["6:00 pm", "", "Mixer"]]);
            assert!(events.is_empty());
        }

        #[test]
        fn time_row_without_name_is_dropped() {
            let events = events(&[
                &["17 February, Tuesday"],
                &["6:00 pm", "8:00 pm", ""],
            ]);
            assert!(events.is_empty());
        }

        #[test]
        fn end_time_is_optional() {
            let events = events(&[
                &["17 February, Tuesday"],
                &["6:00 pm", "", "Mixer"],
                &["7:00 pm", "9:00 pm", "Dinner"],
            ]);
            assert_eq!(events[0].end_time, None);
            assert_eq!(events[1].end_time, Some("9:00 pm".to_string()));
        }

        #[test]
        fn accepted_time_shapes() {
            let events = events(&[
                &["17 February, Tuesday"],
                &["6:00 pm", "", "A"],
                &["18:30", "", "B"],
                &["6 pm", "", "C"],
                &["6:00 PM", "", "D"],
                &["10am", "", "E"],
            ]);
            assert_eq!(events.len(), 5);
            assert_eq!(events[1].start_time, "18:30");
            assert_eq!(events[2].start_time, "6 pm");
        }

        #[test]
        fn non_time_first_cell_is_dropped() {
            let events = events(&[
                &["17 February, Tuesday"],
                &["6:00 pm-ish", "", "Mixer"],
                &["evening", "", "Mixer"],
            ]);
            assert!(events.is_empty());
        }

        #[test]
        fn ragged_short_rows_read_as_empty_cells() {
            let events = events(&[
                &["17 February, Tuesday"],
                &["6:00 pm", "", "Mixer"],
            ]);
            assert_eq!(events.len(), 1);
            assert!(events[0].organizer.is_none());
            assert!(events[0].venue.is_none());
            assert!(events[0].registration_url.is_none());
        }

        #[test]
        fn columns_beyond_six_are_ignored() {
            let events = events(&[
                &["17 February, Tuesday"],
                &["6:00 pm", "", "Mixer", "", "", "", "", "extra", "more"],
            ]);
            assert_eq!(events.len(), 1);
            assert!(events[0].notes.is_none());
        }

        #[test]
        fn cells_are_trimmed() {
            let events = events(&[
                &["  17 February, Tuesday  "],
                &[" 6:00 pm ", " 8:00 pm ", "  Mixer  ", " Acme "],
            ]);
            assert_eq!(events[0].start_time, "6:00 pm");
            assert_eq!(events[0].event_name, "Mixer");
            assert_eq!(events[0].organizer, Some("Acme".to_string()));
        }
    }

    mod registration_and_notes {
        use super::*;

        fn event_with_cols(col5: &str, col6: &str) -> ParsedEvent {
            let events = events(&[
                &["17 February, Tuesday"],
                &["6:00 pm", "", "Mixer", "", "", col5, col6],
            ]);
            events.into_iter().next().expect("one event")
        }

        #[test]
        fn url_in_column_five_wins() {
            let event = event_with_cols("https://a.example", "https://b.example");
            assert_eq!(event.registration_url, Some("https://a.example".to_string()));
        }

        #[test]
        fn url_in_column_six_beats_non_url_five() {
            let event = event_with_cols("not a url", "https://x.example/y");
            assert_eq!(event.registration_url, Some("https://x.example/y".to_string()));
        }

        #[test]
        fn non_url_column_five_is_kept_verbatim() {
            let event = event_with_cols("DM @acme to register", "");
            assert_eq!(
                event.registration_url,
                Some("DM @acme to register".to_string())
            );
        }

        #[test]
        fn both_empty_means_no_registration() {
            let event = event_with_cols("", "");
            assert!(event.registration_url.is_none());
        }

        #[test]
        fn url_shaped_column_six_never_becomes_notes() {
            let event = event_with_cols("", "https://x.example");
            assert_eq!(event.registration_url, Some("https://x.example".to_string()));
            assert!(event.notes.is_none());
        }

        #[test]
        fn plain_text_column_six_becomes_notes() {
            let event = event_with_cols("https://a.example", "Bring your badge");
            assert_eq!(event.notes, Some("Bring your badge".to_string()));
        }
    }

    mod lenient_skipping {
        use super::*;

        #[test]
        fn skipped_rows_are_counted() {
            let extraction = extract_events(&sheet(&[
                &["17 February, Tuesday"],       // state update, not skipped
                &[""],                           // empty col0
                &["whatever prose"],             // unclassifiable
                &["32 February, Nonday"],        // bad header day
                &["6:00 pm", "8:00 pm", ""],     // no event name
                &["6:00 pm", "", "Mixer"],       // emits
            ]));
            assert_eq!(extraction.events.len(), 1);
            assert_eq!(extraction.skipped_rows, 4);
        }

        #[test]
        fn extraction_never_errors_on_garbage() {
            let extraction = extract_events(&sheet(&[
                &["!!!", "???", "///"],
                &["12-26 Feb", "", "Backwards"],
                &["6:00", "pm"],
            ]));
            assert!(extraction.events.is_empty());
            assert_eq!(extraction.skipped_rows, 3);
        }
    }

    mod whole_sheet {
        use super::*;

        #[test]
        fn leading_title_and_header_rows_are_skipped() {
            // The title cell would otherwise look like prose noise and the
            // header row has a non-time first cell; neither is counted.
            let extraction = extract_events(&sheet(&[]));
            assert!(extraction.events.is_empty());
            assert_eq!(extraction.skipped_rows, 0);
        }

        #[test]
        fn end_to_end_scenario() {
            let events = events(&[
                &["17 February, Tuesday"],
                &["6:00 pm", "8:00 pm", "Mixer", "Acme", "Hall A", "", "https://acme.example"],
            ]);
            assert_eq!(
                events,
                vec![
                    ParsedEvent::new(date(2, 17), "6:00 pm", "Mixer")
                        .with_end_time("8:00 pm")
                        .with_organizer("Acme")
                        .with_venue("Hall A")
                        .with_registration_url("https://acme.example")
                ]
            );
        }

        #[test]
        fn extraction_is_idempotent() {
            let rows = sheet(&[
                &["17 February, Tuesday"],
                &["6:00 pm", "8:00 pm", "Mixer", "Acme"],
                &["Feb 12-26", "", "Hacker House"],
                &["junk row"],
            ]);
            let first = extract_events(&rows);
            let second = extract_events(&rows);
            assert_eq!(first, second);
        }

        #[test]
        fn output_preserves_row_order() {
            let events = events(&[
                &["17 February, Tuesday"],
                &["9:00 am", "", "Breakfast"],
                &["Feb 12-26", "", "Hacker House"],
                &["6:00 pm", "", "Mixer"],
            ]);
            let names: Vec<&str> = events.iter().map(|e| e.event_name.as_str()).collect();
            assert_eq!(names, ["Breakfast", "Hacker House", "Mixer"]);
        }

        #[test]
        fn duplicate_rows_emit_duplicate_events() {
            let events = events(&[
                &["17 February, Tuesday"],
                &["6:00 pm", "", "Mixer"],
                &["6:00 pm", "", "Mixer"],
            ]);
            assert_eq!(events.len(), 2);
            assert_eq!(events[0], events[1]);
        }
    }
}
