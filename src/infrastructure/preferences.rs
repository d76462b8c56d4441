//! Persisted user preferences (`settings.toml`)

use crate::domain::{ColorScheme, FilenameFormat, FontSize, FontType, SortOrder};
use crate::error::{NotepadError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Keys accepted by `get`/`set`, in display order
pub const KEYS: &[&str] = &[
    "color_scheme",
    "font_type",
    "font_size",
    "sort_by",
    "export_filename",
    "show_dialogs",
    "show_date",
    "direct_edit",
    "markdown",
    "rtl_layout",
    "show_double_tap_message",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub color_scheme: ColorScheme,
    pub font_type: FontType,
    pub font_size: FontSize,
    pub sort_by: SortOrder,
    pub export_filename: FilenameFormat,
    pub show_dialogs: bool,
    pub show_date: bool,
    pub direct_edit: bool,
    pub markdown: bool,
    pub rtl_layout: bool,
    pub show_double_tap_message: bool,
    #[serde(rename = "first-run")]
    pub first_run: i32,
    #[serde(rename = "first-load")]
    pub first_load: i32,

    /// Combined `<colorscheme>-<fonttype>` value written by old versions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(rename = "draft-contents", skip_serializing_if = "Option::is_none")]
    pub draft_contents: Option<String>,
    #[serde(rename = "is-saved-note", skip_serializing_if = "Option::is_none")]
    pub is_saved_note: Option<bool>,
    #[serde(rename = "draft-name", skip_serializing_if = "Option::is_none")]
    pub draft_name: Option<i64>,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            color_scheme: ColorScheme::default(),
            font_type: FontType::default(),
            font_size: FontSize::default(),
            sort_by: SortOrder::default(),
            export_filename: FilenameFormat::default(),
            show_dialogs: false,
            show_date: false,
            direct_edit: false,
            markdown: false,
            rtl_layout: false,
            show_double_tap_message: true,
            first_run: 0,
            first_load: 0,
            theme: None,
            draft_contents: None,
            is_saved_note: None,
            draft_name: None,
        }
    }
}

/// Draft left behind by the old app: text plus the legacy note it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyDraft {
    pub text: String,
    /// Timestamp file name of the saved note being edited, if any
    pub note_name: Option<i64>,
}

impl Preferences {
    /// Load preferences from `path`; a missing file yields defaults
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).map_err(|e| {
                NotepadError::Config(format!("Failed to parse {}: {}", path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Preferences::default()),
            Err(e) => Err(NotepadError::Io(e)),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Remove and return the draft stored by the old app
    pub fn take_legacy_draft(&mut self) -> Option<LegacyDraft> {
        let text = self.draft_contents.take();
        let is_saved_note = self.is_saved_note.take().unwrap_or(false);
        let name = self.draft_name.take();

        text.map(|text| LegacyDraft {
            text,
            note_name: if is_saved_note { name } else { None },
        })
    }

    /// Put back a draft whose note could not be migrated yet
    pub fn keep_legacy_draft(&mut self, draft: LegacyDraft) {
        self.is_saved_note = Some(draft.note_name.is_some());
        self.draft_name = draft.note_name;
        self.draft_contents = Some(draft.text);
    }

    /// Split the legacy `theme` value into color scheme and font type.
    ///
    /// Returns false when there was nothing to migrate.
    pub fn migrate_theme(&mut self) -> bool {
        let Some(theme) = self.theme.take() else {
            return false;
        };

        let (color, font) = theme.split_once('-').unwrap_or((theme.as_str(), ""));

        match ColorScheme::from_str(color) {
            Ok(scheme) => self.color_scheme = scheme,
            Err(e) => tracing::warn!("keeping default color scheme: {e}"),
        }
        match FontType::from_str(font) {
            Ok(font_type) => self.font_type = font_type,
            Err(e) => tracing::warn!("keeping default font type: {e}"),
        }

        tracing::info!(
            theme = %theme,
            color_scheme = %self.color_scheme,
            font_type = %self.font_type,
            "migrated legacy theme preference"
        );
        true
    }

    /// Read a single preference as a display string
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "color_scheme" => self.color_scheme.to_string(),
            "font_type" => self.font_type.to_string(),
            "font_size" => self.font_size.to_string(),
            "sort_by" => self.sort_by.to_string(),
            "export_filename" => self.export_filename.to_string(),
            "show_dialogs" => self.show_dialogs.to_string(),
            "show_date" => self.show_date.to_string(),
            "direct_edit" => self.direct_edit.to_string(),
            "markdown" => self.markdown.to_string(),
            "rtl_layout" => self.rtl_layout.to_string(),
            "show_double_tap_message" => self.show_double_tap_message.to_string(),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }

    /// Parse and assign a single preference
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "color_scheme" => self.color_scheme = parse_value(value)?,
            "font_type" => self.font_type = parse_value(value)?,
            "font_size" => self.font_size = parse_value(value)?,
            "sort_by" => self.sort_by = parse_value(value)?,
            "export_filename" => self.export_filename = parse_value(value)?,
            "show_dialogs" => self.show_dialogs = parse_bool(value)?,
            "show_date" => self.show_date = parse_bool(value)?,
            "direct_edit" => self.direct_edit = parse_bool(value)?,
            "markdown" => self.markdown = parse_bool(value)?,
            "rtl_layout" => self.rtl_layout = parse_bool(value)?,
            "show_double_tap_message" => self.show_double_tap_message = parse_bool(value)?,
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn parse_value<T: FromStr<Err = String>>(value: &str) -> Result<T> {
    T::from_str(value).map_err(NotepadError::InvalidPreference)
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(NotepadError::InvalidPreference(format!(
            "expected true or false, got '{}'",
            value
        ))),
    }
}

fn unknown_key(key: &str) -> NotepadError {
    NotepadError::InvalidPreference(format!(
        "unknown key '{}'. Valid keys are: {}",
        key,
        KEYS.join(", ")
    ))
}
