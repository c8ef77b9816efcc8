//! Command execution against the app shell.

use crate::cli::{Command, NotesCommand};
use log::warn;
use quicknote_core::{
    core_version, display_order, logging_status, ping, AppConfig, AppShell, ImageFile,
    LocalStorage, LoginForm, Route, SignupForm,
};
use std::path::Path;

pub fn run<S: LocalStorage + Clone>(
    app: &mut AppShell<S>,
    config: &AppConfig,
    command: Command,
) -> Result<(), String> {
    match command {
        Command::Ping => {
            println!("quicknote_core ping={}", ping());
            println!("quicknote_core version={}", core_version());
        }
        Command::Login { email, password } => {
            let navigation = app
                .submit_login(&LoginForm::new(email, password))
                .map_err(|err| format!("login failed: {err}"))?;
            println!("Logged in. Now at {}", navigation.landed);
        }
        Command::Signup {
            name,
            email,
            password,
            profession,
        } => {
            app.open(Route::Signup.path())
                .map_err(|err| err.to_string())?;
            let outcome = app
                .submit_signup(&SignupForm {
                    name,
                    email,
                    password,
                    profession,
                })
                .map_err(|err| format!("signup failed: {err}"))?;
            println!("{} Now at {}", outcome.message, outcome.next);
        }
        Command::Logout => {
            enter_notes(app)?;
            let navigation = app
                .logout()
                .map_err(|err| format!("logout failed: {err}"))?;
            println!("Logged out. Now at {}", navigation.landed);
        }
        Command::Status => {
            println!("logged_in={}", app.session_state().is_logged_in());
            println!("route_guard={:?}", app.guard_policy());
            println!("storage_path={}", config.storage_path.display());
            match logging_status() {
                Some((level, dir)) => println!("logging={level} log_dir={}", dir.display()),
                None => println!("logging=off"),
            }
        }
        Command::Open { path } => {
            let navigation = app.open(&path).map_err(|err| err.to_string())?;
            if navigation.redirected() {
                println!("{} requires login; now at {}", navigation.requested, navigation.landed);
            } else {
                println!("Now at {}", navigation.landed);
            }
        }
        Command::Notes(notes_command) => run_notes(app, notes_command)?,
    }
    Ok(())
}

fn run_notes<S: LocalStorage + Clone>(
    app: &mut AppShell<S>,
    command: NotesCommand,
) -> Result<(), String> {
    enter_notes(app)?;
    let screen = app
        .notes_mut()
        .ok_or_else(|| "notes screen not mounted".to_string())?;
    if let Some(load_error) = screen.load_error() {
        eprintln!("warning: stored notes could not be read: {load_error}");
    }

    match command {
        NotesCommand::List => {
            let notes = display_order(screen.notes());
            if notes.is_empty() {
                println!("No notes.");
            }
            for note in notes {
                let marker = if note.pinned { "*" } else { " " };
                println!("{marker} {} {}", note.id, note.title);
                if !note.content.is_empty() {
                    println!("    {}", note.content);
                }
                if let Some(image) = note.image.as_ref() {
                    println!(
                        "    [image {} {} bytes]",
                        image.media_type,
                        image.bytes.len()
                    );
                }
            }
        }
        NotesCommand::Add {
            title,
            content,
            image,
        } => {
            screen.set_draft_title(title);
            screen.set_draft_content(content);
            if let Some(path) = image {
                let file = read_image_file(&path)?;
                if screen.attach_image(Some(file)).is_err() {
                    let warning = screen.take_warning().unwrap_or_default();
                    eprintln!("warning: {warning}; adding the note without an image");
                }
            }
            let id = screen.add_note().map_err(|err| err.to_string())?;
            println!("Added note {id}");
        }
        NotesCommand::Pin { id } => {
            if !screen.toggle_pin(id).map_err(|err| err.to_string())? {
                return Err(format!("note not found: {id}"));
            }
            let pinned = screen.note(id).is_some_and(|note| note.pinned);
            println!("Note {id} {}", if pinned { "pinned" } else { "unpinned" });
        }
        NotesCommand::Delete { id } => {
            if !screen.delete_note(id).map_err(|err| err.to_string())? {
                return Err(format!("note not found: {id}"));
            }
            println!("Deleted note {id}");
        }
    }
    Ok(())
}

fn enter_notes<S: LocalStorage + Clone>(app: &mut AppShell<S>) -> Result<(), String> {
    let navigation = app
        .open(Route::Notes.path())
        .map_err(|err| err.to_string())?;
    if navigation.redirected() {
        warn!("event=cli_notes module=cli status=redirected");
        return Err("login required: run `quicknote login` first".to_string());
    }
    Ok(())
}

/// Reads a file and guesses its media type from the extension.
pub fn read_image_file(path: &Path) -> Result<ImageFile, String> {
    let bytes = std::fs::read(path)
        .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
    let media_type = mime_guess::from_path(path).first_raw().unwrap_or_default();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(ImageFile::new(file_name, media_type, bytes))
}

#[cfg(test)]
mod tests {
    use super::{read_image_file, run};
    use crate::cli::{Command, NotesCommand};
    use quicknote_core::{AppConfig, AppShell, MemoryLocalStorage, Route, RouteGuardPolicy};

    #[test]
    fn read_image_file_guesses_media_type() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("pixel.png");
        std::fs::write(&png, [0x89, 0x50]).unwrap();
        let text = dir.path().join("notes.txt");
        std::fs::write(&text, "hi").unwrap();

        let image = read_image_file(&png).unwrap();
        assert_eq!(image.file_name, "pixel.png");
        assert_eq!(image.media_type, "image/png");
        assert!(image.is_valid_image());
        assert!(!read_image_file(&text).unwrap().is_valid_image());
    }

    #[test]
    fn guarded_notes_commands_require_login() {
        let mut app =
            AppShell::start(MemoryLocalStorage::new(), RouteGuardPolicy::Guarded).unwrap();
        let config = AppConfig::default();

        let err = run(&mut app, &config, Command::Notes(NotesCommand::List)).unwrap_err();
        assert!(err.contains("login required"));

        run(
            &mut app,
            &config,
            Command::Login {
                email: "a@b.c".to_string(),
                password: "pw".to_string(),
            },
        )
        .unwrap();
        run(
            &mut app,
            &config,
            Command::Notes(NotesCommand::Add {
                title: "from cli".to_string(),
                content: String::new(),
                image: None,
            }),
        )
        .unwrap();
        assert_eq!(app.current_route(), Route::Notes);
        assert_eq!(app.notes().unwrap().notes().len(), 1);
    }

    #[test]
    fn pin_of_unknown_note_fails() {
        let mut app =
            AppShell::start(MemoryLocalStorage::new(), RouteGuardPolicy::Unguarded).unwrap();
        let err = run(
            &mut app,
            &AppConfig::default(),
            Command::Notes(NotesCommand::Pin { id: 42 }),
        )
        .unwrap_err();
        assert_eq!(err, "note not found: 42");
    }
}
