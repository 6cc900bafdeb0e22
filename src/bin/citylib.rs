//! CityLib CLI
//!
//! One-shot catalog commands, or the interactive menu when no subcommand
//! is given.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use citylib::command::{Command, Outcome};
use citylib::config::{LoadMode, SyncStrategy};
use citylib::shell::Shell;
use citylib::{Catalog, Config};
use tracing_subscriber::{fmt, EnvFilter};

/// CityLib CLI
#[derive(Parser, Debug)]
#[command(name = "citylib")]
#[command(about = "Library catalog manager backed by flat text files")]
#[command(version)]
struct Args {
    /// Directory holding books.txt and members.txt
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,

    /// Fail on malformed record lines instead of skipping them
    #[arg(long)]
    strict: bool,

    /// fsync the record files after every save
    #[arg(long)]
    sync: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add or replace a book
    AddBook {
        id: i32,
        title: String,
        author: String,
        category: String,
    },

    /// Add or replace a member
    AddMember {
        id: i32,
        name: String,
        email: String,
    },

    /// Issue a book to a member
    Issue {
        book_id: i32,
        member_id: i32,
    },

    /// Return a book from a member
    Return {
        book_id: i32,
        member_id: i32,
    },

    /// Search books by title, author or category
    Search {
        keyword: String,
    },

    /// List all books ordered by title
    Sort,

    /// List all members
    Members,

    /// Interactive numbered menu (default)
    Shell,
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,citylib=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    tracing::debug!("CityLib v{}", citylib::VERSION);
    tracing::debug!("Data directory: {}", args.data_dir.display());

    // Build config from args
    let config = Config::builder()
        .data_dir(&args.data_dir)
        .load_mode(if args.strict {
            LoadMode::Strict
        } else {
            LoadMode::Permissive
        })
        .sync_strategy(if args.sync {
            SyncStrategy::EverySave
        } else {
            SyncStrategy::Never
        })
        .build();

    // Open catalog
    let mut catalog = match Catalog::open(config) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to open catalog: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let command = match args.command.unwrap_or(Commands::Shell) {
        Commands::AddBook {
            id,
            title,
            author,
            category,
        } => Command::AddBook {
            id,
            title,
            author,
            category,
        },
        Commands::AddMember { id, name, email } => Command::AddMember { id, name, email },
        Commands::Issue { book_id, member_id } => Command::IssueBook { book_id, member_id },
        Commands::Return { book_id, member_id } => Command::ReturnBook { book_id, member_id },
        Commands::Search { keyword } => Command::SearchBooks { keyword },
        Commands::Sort => Command::SortBooks,
        Commands::Members => {
            for member in catalog.members() {
                println!("{} | Issued: {:?}", member, member.issued_books);
            }
            return ExitCode::SUCCESS;
        }
        Commands::Shell => {
            let stdin = io::stdin();
            let mut shell = Shell::new(stdin.lock(), io::stdout());
            return match shell.run(&mut catalog) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    tracing::error!("Shell error: {}", e);
                    ExitCode::FAILURE
                }
            };
        }
    };

    match catalog.execute(command) {
        Ok(Outcome::Books(books)) if books.is_empty() => {
            println!("No books found.");
            ExitCode::SUCCESS
        }
        Ok(outcome) => {
            println!("{}", outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
