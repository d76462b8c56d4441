//! Preference value types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order of the note list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SortOrder {
    /// Newest first
    #[default]
    #[serde(rename = "date")]
    DateDescending,
    #[serde(rename = "date-reversed")]
    DateAscending,
    #[serde(rename = "name-reversed")]
    TitleDescending,
    #[serde(rename = "name")]
    TitleAscending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::DateDescending => "date",
            SortOrder::DateAscending => "date-reversed",
            SortOrder::TitleDescending => "name-reversed",
            SortOrder::TitleAscending => "name",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "date" => Ok(SortOrder::DateDescending),
            "date-reversed" => Ok(SortOrder::DateAscending),
            "name-reversed" => Ok(SortOrder::TitleDescending),
            "name" => Ok(SortOrder::TitleAscending),
            _ => Err(format!(
                "Invalid sort order: '{}'. Valid orders are: date, date-reversed, name, name-reversed",
                s
            )),
        }
    }
}

/// How exported files are named
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FilenameFormat {
    #[default]
    #[serde(rename = "text-only")]
    TitleOnly,
    #[serde(rename = "text-timestamp")]
    TitleAndTimestamp,
    #[serde(rename = "timestamp-text")]
    TimestampAndTitle,
}

impl FilenameFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilenameFormat::TitleOnly => "text-only",
            FilenameFormat::TitleAndTimestamp => "text-timestamp",
            FilenameFormat::TimestampAndTitle => "timestamp-text",
        }
    }
}

impl FromStr for FilenameFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text-only" => Ok(FilenameFormat::TitleOnly),
            "text-timestamp" => Ok(FilenameFormat::TitleAndTimestamp),
            "timestamp-text" => Ok(FilenameFormat::TimestampAndTitle),
            _ => Err(format!(
                "Invalid filename format: '{}'. Valid formats are: text-only, text-timestamp, timestamp-text",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    System,
    Light,
    Dark,
}

impl ColorScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorScheme::System => "system",
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(ColorScheme::System),
            "light" => Ok(ColorScheme::Light),
            "dark" => Ok(ColorScheme::Dark),
            _ => Err(format!(
                "Invalid color scheme: '{}'. Valid schemes are: system, light, dark",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontType {
    #[default]
    Sans,
    Serif,
    Monospace,
}

impl FontType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontType::Sans => "sans",
            FontType::Serif => "serif",
            FontType::Monospace => "monospace",
        }
    }
}

impl FromStr for FontType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sans" => Ok(FontType::Sans),
            "serif" => Ok(FontType::Serif),
            "monospace" => Ok(FontType::Monospace),
            _ => Err(format!(
                "Invalid font type: '{}'. Valid types are: sans, serif, monospace",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Smallest,
    Small,
    #[default]
    Normal,
    Large,
    Largest,
}

impl FontSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontSize::Smallest => "smallest",
            FontSize::Small => "small",
            FontSize::Normal => "normal",
            FontSize::Large => "large",
            FontSize::Largest => "largest",
        }
    }
}

impl FromStr for FontSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "smallest" => Ok(FontSize::Smallest),
            "small" => Ok(FontSize::Small),
            "normal" => Ok(FontSize::Normal),
            "large" => Ok(FontSize::Large),
            "largest" => Ok(FontSize::Largest),
            _ => Err(format!(
                "Invalid font size: '{}'. Valid sizes are: smallest, small, normal, large, largest",
                s
            )),
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(SortOrder, FilenameFormat, ColorScheme, FontType, FontSize);
