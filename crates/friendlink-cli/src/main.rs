mod render;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use friendlink_core::{
    add_user, build_reports, load_or_empty, load_snapshot, save_snapshot, MatchThresholds,
    NewUser, Snapshot,
};
use rustyline::DefaultEditor;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "friendlink", version, about = "FriendLink friend suggestions", long_about = None)]
struct Cli {
    /// JSON file holding the user graph
    #[arg(short, long, env = "FRIENDLINK_DATA", default_value = "data.json")]
    data: PathBuf,

    /// Minimum interest similarity (Jaccard) for a match
    #[arg(long, env = "FRIENDLINK_MIN_SIMILARITY", default_value_t = 0.3)]
    min_similarity: f64,

    /// Minimum number of mutual friends for a match
    #[arg(long, env = "FRIENDLINK_MIN_MUTUAL", default_value_t = 1)]
    min_mutual: usize,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a user to the data file
    AddUser {
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = 0)]
        age: u32,
        #[arg(long, default_value = "")]
        location: String,
        /// Comma separated interests
        #[arg(long, default_value = "")]
        interests: String,
        /// Comma separated ids of existing users
        #[arg(long, default_value = "")]
        friends: String,
    },
    /// Suggest friends for one or more users
    Suggest {
        user_ids: Vec<String>,
        /// Run for every user in the data file
        #[arg(long)]
        all: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List users
    List,
    /// Interactive menu
    Menu,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let thresholds = MatchThresholds {
        min_similarity: cli.min_similarity,
        min_mutual_friends: cli.min_mutual,
    };

    match cli.command {
        Some(Commands::AddUser {
            name,
            age,
            location,
            interests,
            friends,
        }) => {
            let input = NewUser {
                name,
                age,
                location,
                interests: NewUser::split_list(&interests),
                friends: NewUser::split_list(&friends),
            };
            let (id, name) = insert_user(&cli.data, input)?;
            println!("New user '{name}' added as {id}!");
        }
        Some(Commands::Suggest {
            user_ids,
            all,
            json,
        }) => {
            let Some(snapshot) = open_existing(&cli.data)? else {
                return Ok(());
            };
            let ids: Vec<String> = if all {
                snapshot.ids().cloned().collect()
            } else {
                user_ids
            };
            if ids.is_empty() {
                bail!("no user ids given (pass ids or --all)");
            }
            print_reports(&snapshot, &ids, thresholds, json)?;
        }
        Some(Commands::List) => {
            let Some(snapshot) = open_existing(&cli.data)? else {
                return Ok(());
            };
            for user in snapshot.users() {
                println!("{}\t{}\t{}", user.id, user.name, user.location);
            }
        }
        Some(Commands::Menu) | None => run_menu(&cli.data, thresholds)?,
    }

    Ok(())
}

/// Load the data file, printing the original hint when it does not exist.
fn open_existing(path: &Path) -> Result<Option<Snapshot>> {
    if !path.exists() {
        println!("\nNo data available. Please add users first.");
        return Ok(None);
    }
    let snapshot =
        load_snapshot(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(Some(snapshot))
}

fn insert_user(path: &Path, input: NewUser) -> Result<(String, String)> {
    let mut snapshot =
        load_or_empty(path).with_context(|| format!("reading {}", path.display()))?;
    let id = add_user(&mut snapshot, input)?;
    save_snapshot(path, &snapshot).with_context(|| format!("writing {}", path.display()))?;
    let name = snapshot.display_name(&id).to_string();
    Ok((id, name))
}

fn print_reports(
    snapshot: &Snapshot,
    ids: &[String],
    thresholds: MatchThresholds,
    json: bool,
) -> Result<()> {
    let reports = build_reports(snapshot, ids, thresholds);
    if json {
        let values: Vec<_> = ids
            .iter()
            .zip(&reports)
            .map(|(id, r)| render::report_json(id, r))
            .collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
        return Ok(());
    }
    for report in &reports {
        print!("{}", render::report_text(snapshot, report));
    }
    Ok(())
}

/// Line reader for the menu; falls back to plain stdin when no terminal
/// editor is available.
struct Prompt {
    editor: Option<DefaultEditor>,
}

impl Prompt {
    fn new() -> Self {
        Self {
            editor: DefaultEditor::new().ok(),
        }
    }

    /// `None` on end of input.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        if let Some(ref mut editor) = self.editor {
            return match editor.readline(prompt) {
                Ok(line) => Ok(Some(line.trim().to_string())),
                Err(_) => Ok(None),
            };
        }
        print!("{prompt}");
        io::stdout().flush()?;
        let mut buf = String::new();
        if io::stdin().read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim().to_string()))
    }

    fn require(&mut self, prompt: &str) -> Result<String> {
        self.ask(prompt)?.context("input closed")
    }
}

fn run_menu(path: &Path, thresholds: MatchThresholds) -> Result<()> {
    let mut prompt = Prompt::new();
    println!("\n--- FriendLink Menu ---");
    println!("1. Add New User");
    println!("2. Suggest Friends (Mutual + Jaccard)");
    let Some(choice) = prompt.ask("Enter choice (1/2): ")? else {
        return Ok(());
    };

    match choice.as_str() {
        "1" => {
            let existing =
                load_or_empty(path).with_context(|| format!("reading {}", path.display()))?;
            let name = prompt.require("Enter name: ")?;
            let age: u32 = prompt
                .require("Enter age: ")?
                .parse()
                .context("age must be a whole number")?;
            let location = prompt.require("Enter location: ")?;
            let interests = prompt.require("Enter interests (comma-separated): ")?;
            let ids: Vec<&str> = existing.ids().map(String::as_str).collect();
            println!("Existing users: {:?}", ids);
            let friends = prompt.require("Enter friend user IDs (comma-separated): ")?;

            let input = NewUser {
                name,
                age,
                location,
                interests: NewUser::split_list(&interests),
                friends: NewUser::split_list(&friends),
            };
            let (id, name) = insert_user(path, input)?;
            println!("New user '{name}' added as {id}!");
        }
        "2" => {
            let Some(snapshot) = open_existing(path)? else {
                return Ok(());
            };
            let user_id = prompt.require("Enter user ID (e.g., u1): ")?;
            print_reports(&snapshot, &[user_id], thresholds, false)?;
        }
        _ => println!("Invalid choice."),
    }
    Ok(())
}
