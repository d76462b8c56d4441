//! CLI command definitions

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "notepad")]
#[command(about = "Plain-text notes kept in a local database", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory (default: $NOTEPAD_HOME or the platform data directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List notes in the configured sort order
    List {
        /// Override the sort order (date, date-reversed, name, name-reversed)
        #[arg(short, long)]
        sort: Option<String>,

        /// Only list notes whose text contains this, ignoring case
        #[arg(long, value_name = "TERM")]
        search: Option<String>,
    },

    /// Print a note's text
    Show {
        id: i64,

        /// Print the last saved text even when a draft exists
        #[arg(long)]
        saved: bool,
    },

    /// Create a note, from --text or in $EDITOR
    New {
        #[arg(short, long)]
        text: Option<String>,
    },

    /// Edit a note, from --text or in $EDITOR
    Edit {
        id: i64,

        #[arg(short, long)]
        text: Option<String>,

        /// Keep the edit as a draft instead of saving
        #[arg(long)]
        draft: bool,
    },

    /// Reopen the note left with a draft and save it
    Resume {
        #[arg(short, long)]
        text: Option<String>,
    },

    /// Throw away a note's draft
    DiscardDraft { id: i64 },

    /// Delete one or more notes
    Delete {
        #[arg(required = true)]
        ids: Vec<i64>,
    },

    /// Import text files (directories are read recursively)
    Import {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Export notes to a directory, one file per note
    Export {
        /// Notes to export
        ids: Vec<i64>,

        /// Export every note
        #[arg(short, long, conflicts_with = "ids")]
        all: bool,

        /// Target directory
        #[arg(long, value_name = "DIR", default_value = ".")]
        to: PathBuf,

        /// File naming (text-only, text-timestamp, timestamp-text)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Export a single note to a file or directory
    ExportNote {
        id: i64,

        /// Target file, or a directory to place it in
        #[arg(long, value_name = "PATH", default_value = ".")]
        to: PathBuf,

        #[arg(short, long)]
        format: Option<String>,
    },

    /// Write all notes to a JSON backup in a directory
    Backup {
        #[arg(long, value_name = "DIR", default_value = ".")]
        to: PathBuf,
    },

    /// Add the notes from JSON backup files
    Restore {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Convert notes from the old flat-file layout
    Migrate,

    /// View or modify preferences
    Config {
        /// Preference key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all preferences
        #[arg(short, long)]
        list: bool,
    },
}
