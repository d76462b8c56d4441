//! Application layer - Use cases and orchestration

pub mod import_export;
pub mod migrate_legacy;
pub mod note_service;
pub mod notice;

pub use import_export::{BackupNote, ExportOutcome, ImportExporter, ImportOutcome};
pub use migrate_legacy::{LegacyMigrator, MigrationReport};
pub use note_service::NoteService;
pub use notice::Notice;
