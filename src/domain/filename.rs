//! Export file naming

use crate::domain::{FilenameFormat, NoteMetadata};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Timestamp layout used in exported file names and backups
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M";

/// Longest file stem we generate, leaving room for the extension
const MAX_STEM_CHARS: usize = 245;

pub fn format_timestamp(date: DateTime<Utc>) -> String {
    date.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string()
}

/// Read a `yyyy-MM-dd-HH-mm` local timestamp back into UTC
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

fn filename_timestamp_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d{4}-\d{2}-\d{2}-\d{2}-\d{2}").unwrap())
}

/// Date embedded in a file name by a timestamped export, if there is one
pub fn date_from_filename(path: &Path) -> Option<DateTime<Utc>> {
    let name = path.file_name()?.to_string_lossy();
    let found = filename_timestamp_regex().find(&name)?;
    parse_timestamp(found.as_str())
}

/// Build the `.txt` file name for a note according to `format`
pub fn generate_filename(metadata: &NoteMetadata, format: FilenameFormat) -> String {
    let timestamp = format_timestamp(metadata.date);
    let title = sanitize(&metadata.title);
    let title_budget = MAX_STEM_CHARS - (timestamp.chars().count() + 1);

    let stem = match format {
        FilenameFormat::TitleOnly => truncate(&title, MAX_STEM_CHARS),
        FilenameFormat::TitleAndTimestamp => {
            format!("{}_{}", truncate(&title, title_budget), timestamp)
        }
        FilenameFormat::TimestampAndTitle => {
            format!("{}_{}", timestamp, truncate(&title, title_budget))
        }
    };

    format!("{}.txt", stem)
}

/// File name for a full JSON backup taken at `now`
pub fn backup_filename(now: DateTime<Utc>) -> String {
    format!("notepad_backup_{}.json", format_timestamp(now))
}

// Titles come from user text; path separators and NUL would escape the target directory.
fn sanitize(title: &str) -> String {
    title
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect()
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn metadata(title: &str) -> NoteMetadata {
        NoteMetadata {
            metadata_id: 1,
            title: title.to_string(),
            date: Utc.timestamp_millis_opt(1_625_000_000_000).unwrap(),
            has_draft: false,
        }
    }

    #[test]
    fn test_title_only() {
        let name = generate_filename(&metadata("Shopping"), FilenameFormat::TitleOnly);
        assert_eq!(name, "Shopping.txt");
    }

    #[test]
    fn test_timestamp_variants_differ_only_in_order() {
        let meta = metadata("Shopping");
        let ts = format_timestamp(meta.date);

        let title_first = generate_filename(&meta, FilenameFormat::TitleAndTimestamp);
        let stamp_first = generate_filename(&meta, FilenameFormat::TimestampAndTitle);

        assert_eq!(title_first, format!("Shopping_{}.txt", ts));
        assert_eq!(stamp_first, format!("{}_Shopping.txt", ts));
    }

    #[test]
    fn test_generate_is_pure() {
        let meta = metadata("Repeat");
        for format in [
            FilenameFormat::TitleOnly,
            FilenameFormat::TitleAndTimestamp,
            FilenameFormat::TimestampAndTitle,
        ] {
            assert_eq!(
                generate_filename(&meta, format),
                generate_filename(&meta, format)
            );
        }
    }

    #[test]
    fn test_timestamp_layout() {
        let ts = format_timestamp(metadata("x").date);
        // yyyy-MM-dd-HH-mm
        assert_eq!(ts.len(), 16);
        assert_eq!(ts.matches('-').count(), 4);
    }

    #[test]
    fn test_long_titles_are_truncated() {
        let long = "a".repeat(400);
        let name = generate_filename(&metadata(&long), FilenameFormat::TitleOnly);
        assert_eq!(name.chars().count(), 245 + ".txt".len());

        let name = generate_filename(&metadata(&long), FilenameFormat::TimestampAndTitle);
        assert_eq!(name.chars().count(), 245 + ".txt".len());
    }

    #[test]
    fn test_path_separators_replaced() {
        let name = generate_filename(&metadata("a/b\\c"), FilenameFormat::TitleOnly);
        assert_eq!(name, "a_b_c.txt");
    }

    #[test]
    fn test_date_from_exported_filename() {
        let meta = metadata("Shopping");
        for format in [
            FilenameFormat::TitleAndTimestamp,
            FilenameFormat::TimestampAndTitle,
        ] {
            let name = generate_filename(&meta, format);
            let date = date_from_filename(Path::new("/tmp/out").join(&name).as_path()).unwrap();
            assert_eq!(date.timestamp() / 60, meta.date.timestamp() / 60);
        }
    }

    #[test]
    fn test_date_from_filename_without_timestamp() {
        assert_eq!(date_from_filename(Path::new("Shopping.txt")), None);
        assert_eq!(date_from_filename(Path::new("2021-13-45-99-99_bad.txt")), None);
        // Only the file name is searched, not parent directories
        assert_eq!(
            date_from_filename(Path::new("2021-06-30-12-00/notes.txt")),
            None
        );
    }

    #[test]
    fn test_backup_filename() {
        let name = backup_filename(metadata("x").date);
        assert!(name.starts_with("notepad_backup_"));
        assert!(name.ends_with(".json"));
    }
}
