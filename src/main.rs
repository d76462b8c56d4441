use clap::Parser;
use notepad::application::{LegacyMigrator, MigrationReport, NoteService, Notice};
use notepad::cli::{format_note_list, format_preferences, Cli, Commands};
use notepad::domain::{FilenameFormat, SortOrder};
use notepad::error::NotepadError;
use notepad::infrastructure::{
    preferences, AppPaths, EditorSession, NoteStore, PathPicker, Preferences,
};
use notepad::logging;
use std::collections::{BTreeSet, HashSet};
use std::str::FromStr;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = run(cli);

    match result {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<(), NotepadError> {
    let Some(command) = cli.command else {
        println!("notepad - Plain-text notes kept in a local database");
        println!("Use --help for usage information");
        return Ok(());
    };

    let paths = AppPaths::resolve(cli.data_dir)?;
    let mut store = NoteStore::open(&paths.database())?;
    let report = LegacyMigrator::new(&mut store, &paths).migrate()?;

    if let Commands::Migrate = command {
        print_migration(&report);
        return Ok(());
    }
    if report.notes_migrated > 0 {
        eprintln!("{}", Notice::MigrationComplete(report.notes_migrated));
    }

    let mut prefs = Preferences::load(&paths.preferences())?;
    let mut service = NoteService::new(store, prefs.sort_by);

    match command {
        Commands::List { sort, search } => {
            if let Some(sort) = sort {
                service.set_sort_order(parse_pref::<SortOrder>(&sort)?);
            }
            let mut notes = service.note_metadata();
            if let Some(term) = search {
                notes = service.search(&notes, &term);
            }
            println!("{}", format_note_list(&notes).trim_end());
            Ok(())
        }
        Commands::Show { id, saved } => {
            let note = service.load_note(Some(id))?;
            let text = if saved { note.saved_text() } else { note.text() };
            println!("{}", text);
            Ok(())
        }
        Commands::New { text } => {
            service.load_note(None)?;
            service.begin_edit();
            let text = match text {
                Some(text) => text,
                None => EditorSession::from_env().edit(paths.root(), "")?,
            };
            emit(service.save_note(&text), "save note")
        }
        Commands::Edit { id, text, draft } => {
            service.load_note(Some(id))?;
            service.begin_edit();
            let text = match text {
                Some(text) => text,
                None => EditorSession::from_env().edit(paths.root(), service.draft_text())?,
            };

            if draft && !text.is_empty() {
                service.set_draft_text(text);
                emit(service.save_draft(), "save draft")
            } else {
                emit(service.save_note(&text), "save note")
            }
        }
        Commands::Resume { text } => {
            let Some(restored) = service.restore_draft() else {
                println!("No draft to resume");
                return Ok(());
            };
            emit(Some(restored), "restore draft")?;

            let text = match text {
                Some(text) => text,
                None => EditorSession::from_env().edit(paths.root(), service.draft_text())?,
            };
            emit(service.save_note(&text), "save note")
        }
        Commands::DiscardDraft { id } => {
            service.load_note(Some(id))?;
            emit(service.discard_draft(), "discard draft")
        }
        Commands::Delete { ids } => {
            let ids = existing_ids(&service, &ids)?;
            if let [id] = ids.as_slice() {
                emit(service.delete_note(*id), "delete note")
            } else {
                for id in ids {
                    service.toggle_selected(id);
                }
                emit(service.delete_selected(), "delete notes")
            }
        }
        Commands::Import { paths: files } => {
            let mut picker = PathPicker::new(files);
            emit(service.import_notes(&mut picker), "import notes")
        }
        Commands::Export {
            ids,
            all,
            to,
            format,
        } => {
            let format = export_format(format.as_deref(), &prefs)?;
            if all {
                let everything = service.note_metadata();
                service.select_all(&everything);
            } else {
                for id in existing_ids(&service, &ids)? {
                    service.toggle_selected(id);
                }
            }
            // A single note is saved into `--to` by name, so it must already be a directory
            std::fs::create_dir_all(&to)?;
            let mut picker = PathPicker::new(vec![to]);
            emit(service.export_selected(&mut picker, format), "export notes")
        }
        Commands::ExportNote { id, to, format } => {
            let format = export_format(format.as_deref(), &prefs)?;
            service.load_note(Some(id))?;
            let mut picker = PathPicker::new(vec![to]);
            emit(service.export_current(&mut picker, format), "export note")
        }
        Commands::Backup { to } => {
            let mut picker = PathPicker::new(vec![to]);
            emit(service.backup(&mut picker), "write backup")
        }
        Commands::Restore { files } => {
            let mut picker = PathPicker::new(files);
            emit(service.restore(&mut picker), "restore backup")
        }
        Commands::Config { key, value, list } => {
            if list {
                let pairs: Vec<(&str, String)> = preferences::KEYS
                    .iter()
                    .map(|key| prefs.get(key).map(|value| (*key, value)))
                    .collect::<Result<_, _>>()?;
                print!("{}", format_preferences(&pairs));
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    prefs.set(&k, &v)?;
                    prefs.save(&paths.preferences())?;
                    println!("Set {} = {}", k, v);
                    Ok(())
                } else {
                    println!("{}", prefs.get(&k)?);
                    Ok(())
                }
            } else {
                println!("Usage: notepad config [--list | <key> [<value>]]");
                println!("Valid keys: {}", preferences::KEYS.join(", "));
                Ok(())
            }
        }
        Commands::Migrate => Ok(()),
    }
}

/// Print an action's notice, turning refusals and failures into errors
fn emit(notice: Option<Notice>, action: &'static str) -> Result<(), NotepadError> {
    match notice {
        Some(Notice::EmptyNote) => Err(NotepadError::EmptyNote),
        Some(notice) => {
            match notice.note_id() {
                Some(id) => println!("{} (id {})", notice, id),
                None => println!("{}", notice),
            }
            Ok(())
        }
        None => Err(NotepadError::ActionFailed(action)),
    }
}

/// Deduplicate `ids`, failing on the first one that does not exist
fn existing_ids(service: &NoteService, ids: &[i64]) -> Result<Vec<i64>, NotepadError> {
    let known: HashSet<i64> = service
        .note_metadata()
        .iter()
        .map(|m| m.metadata_id)
        .collect();

    let unique: BTreeSet<i64> = ids.iter().copied().collect();
    match unique.iter().find(|id| !known.contains(*id)) {
        Some(missing) => Err(NotepadError::NoteNotFound(*missing)),
        None => Ok(unique.into_iter().collect()),
    }
}

fn export_format(flag: Option<&str>, prefs: &Preferences) -> Result<FilenameFormat, NotepadError> {
    match flag {
        Some(value) => parse_pref(value),
        None => Ok(prefs.export_filename),
    }
}

fn parse_pref<T: FromStr<Err = String>>(value: &str) -> Result<T, NotepadError> {
    T::from_str(value).map_err(NotepadError::InvalidPreference)
}

fn print_migration(report: &MigrationReport) {
    if report.already_complete {
        println!("Migration already complete");
    } else {
        println!("{}", Notice::MigrationComplete(report.notes_migrated));
    }
    if report.preferences_migrated {
        println!("Preferences migrated");
    }
    if report.files_skipped > 0 {
        println!(
            "{} legacy files could not be migrated and were left in place",
            report.files_skipped
        );
    }
}
