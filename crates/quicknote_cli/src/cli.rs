use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Clone, Debug, Eq, Parser, PartialEq)]
#[command(version, about = "Local notes behind a demo login screen")]
pub struct CliConfig {
    /// TOML configuration file; `QUICKNOTE_*` variables override it.
    #[arg(long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Debug, Eq, PartialEq, Subcommand)]
pub enum Command {
    /// Print core linkage info.
    Ping,
    /// Log in with any non-empty email and password.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign up. Nothing is stored; you are sent back to login.
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        profession: String,
    },
    /// Log out. Notes are kept.
    Logout,
    /// Show session state and settings.
    Status,
    /// Navigate to a path (`/`, `/signup`, `/notes`).
    Open { path: String },
    /// Notes screen actions.
    #[command(subcommand)]
    Notes(NotesCommand),
}

#[derive(Clone, Debug, Eq, PartialEq, Subcommand)]
pub enum NotesCommand {
    /// List notes, pinned first.
    List,
    /// Add a note.
    Add {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        content: String,
        /// Image file to attach; its type is guessed from the extension.
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Pin or unpin a note.
    Pin { id: i64 },
    /// Delete a note.
    Delete { id: i64 },
}

#[cfg(test)]
mod tests {
    use super::{CliConfig, Command, NotesCommand};
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    #[test]
    fn cli_definition_is_consistent() {
        CliConfig::command().debug_assert();
    }

    #[test]
    fn parses_notes_add_with_image() {
        let cli = CliConfig::try_parse_from([
            "quicknote",
            "--config",
            "quicknote.toml",
            "notes",
            "add",
            "--title",
            "Trip",
            "--image",
            "map.png",
        ])
        .unwrap();
        assert_eq!(cli.config_file, Some(PathBuf::from("quicknote.toml")));
        assert_eq!(
            cli.command,
            Command::Notes(NotesCommand::Add {
                title: "Trip".to_string(),
                content: String::new(),
                image: Some(PathBuf::from("map.png")),
            })
        );
    }

    #[test]
    fn old_config_file_flag_is_not_accepted() {
        assert!(
            CliConfig::try_parse_from(["quicknote", "--config-file", "q.toml", "ping"]).is_err()
        );
    }

    #[test]
    fn login_requires_both_fields() {
        assert!(CliConfig::try_parse_from(["quicknote", "login", "--email", "a@b.c"]).is_err());
    }
}
