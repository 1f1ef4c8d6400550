use anyhow::Result;
use clap::{Parser, Subcommand};
use crossterm::style::Stylize;
use major_core::commands::{render_explain, render_lookup, render_test, Command, Outcome};
use major_core::config::{Config, DEFAULT_DICTIONARY_PATH, DEFAULT_MAX_RESULTS, DICTIONARY_ENV};
use major_core::{IndexOrigin, LoadReport, MajorEngine, PhoneticEncoder};
use rustyline::error::ReadlineError;
use rustyline::{Config as EditorConfig, DefaultEditor};
use serde::Serialize;
use std::path::PathBuf;
use std::process;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "major")]
#[command(about = "Italian Major System: turn words into numbers and numbers back into words")]
#[command(version)]
struct Cli {
    /// Word list, one word per line
    #[arg(short, long, global = true, env = DICTIONARY_ENV, default_value = DEFAULT_DICTIONARY_PATH)]
    dictionary: PathBuf,

    /// Cache snapshot path (default: <dictionary>.cache)
    #[arg(long, global = true)]
    cache: Option<PathBuf>,

    /// Words shown per lookup
    #[arg(short = 'n', long, global = true, default_value_t = DEFAULT_MAX_RESULTS)]
    max_results: usize,

    /// Do not read or write the REPL history file
    #[arg(long, global = true)]
    no_history: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session (the default)
    Repl,

    /// Print the number for each word; no dictionary needed
    Encode {
        #[arg(required = true)]
        words: Vec<String>,

        /// Show how each part of the word was read
        #[arg(short, long)]
        explain: bool,
    },

    /// List the dictionary words for a number
    Lookup {
        #[arg(value_parser = parse_digits)]
        digits: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Overrides --max-results for this lookup
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Rebuild the cache from the dictionary, ignoring any existing snapshot
    Rebuild,
}

#[derive(Serialize)]
struct LookupJson<'a> {
    digits: &'a str,
    total: usize,
    words: &'a [String],
}

fn parse_digits(s: &str) -> Result<String, String> {
    if major_core::core::types::is_digit_string(s) {
        Ok(s.to_string())
    } else {
        Err(format!("'{}' is not a sequence of digits", s))
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        dictionary,
        cache,
        max_results,
        no_history,
        command,
    } = cli;

    let mut config = Config::new(dictionary).with_max_results(max_results);
    if let Some(cache) = cache {
        config = config.with_cache_path(cache);
    }
    if no_history {
        config = config.without_history();
    }

    match command.unwrap_or(Commands::Repl) {
        Commands::Repl => run_repl(config),
        Commands::Encode { words, explain } => {
            let encoder = PhoneticEncoder::new();
            for word in &words {
                if explain {
                    println!("{}", render_explain(word, &encoder.segments(word)));
                } else {
                    let encoding = encoder.encode(word);
                    println!("{}", render_test(word, encoding.as_ref().map(|e| e.as_str())));
                }
            }
            Ok(())
        }
        Commands::Lookup { digits, json, limit } => {
            let mut engine = MajorEngine::new(config);
            let report = engine.load()?;
            print_notes(&report);

            let words = engine.lookup(&digits);
            if json {
                let limit = limit.unwrap_or(words.len()).min(words.len());
                let out = LookupJson {
                    digits: &digits,
                    total: words.len(),
                    words: &words[..limit],
                };
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                let limit = limit.unwrap_or(engine.config().max_results);
                println!("{}", render_lookup(&digits, &words, limit));
            }
            Ok(())
        }
        Commands::Rebuild => {
            let mut engine = MajorEngine::new(config);
            let report = engine.rebuild()?;
            print_report(&report);
            Ok(())
        }
    }
}

fn run_repl(config: Config) -> Result<()> {
    print_banner();

    let mut engine = MajorEngine::new(config);
    match engine.load() {
        Ok(report) => print_report(&report),
        // Keep going: `test` still works without a dictionary.
        Err(e) => eprintln!("{}: {}", "Error".red().bold(), e),
    }

    let editor_config = EditorConfig::builder()
        .auto_add_history(true)
        .history_ignore_dups(true)?
        .history_ignore_space(true)
        .build();
    let mut editor = DefaultEditor::with_config(editor_config)?;

    let history = engine.config().history_file.clone();
    if let Some(path) = &history {
        if path.exists() {
            if let Err(e) = editor.load_history(path) {
                warn!(error = %e, path = %path.display(), "could not load history");
            }
        }
    }

    let prompt = format!("\n{} ", ">".cyan().bold());
    loop {
        match editor.readline(&prompt) {
            Ok(line) => match Command::parse(&line) {
                Ok(None) => {}
                Ok(Some(command)) => match command.execute(&engine) {
                    Outcome::Print(text) => println!("{}", text),
                    Outcome::Quit => {
                        println!("Goodbye!");
                        break;
                    }
                },
                Err(e) => println!("{}", e.to_string().yellow()),
            },
            Err(ReadlineError::Interrupted) => {
                println!("\nInterrupted. Goodbye!");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    if let Some(path) = history {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(e) = editor.save_history(&path) {
            warn!(error = %e, path = %path.display(), "could not save history");
        }
    }
    Ok(())
}

fn print_banner() {
    println!("{}", "=".repeat(60));
    println!("{}", "ITALIAN MAJOR SYSTEM - Phonetic Conversion".bold());
    println!("{}", "=".repeat(60));
    println!("\nCommands:");
    println!("  - Enter a number to find the matching words");
    println!("  - 'test <word>' to see the number for a word, even an invented one");
    println!("  - 'help' for everything else, 'q' or 'quit' to leave");
    println!();
}

fn print_notes(report: &LoadReport) {
    for note in &report.notes {
        eprintln!("{}", note.as_str().yellow());
    }
}

fn print_report(report: &LoadReport) {
    print_notes(report);
    let source = match report.origin {
        IndexOrigin::Cache => "cache",
        IndexOrigin::Dictionary => "dictionary",
    };
    println!(
        "Loaded {} number sequences ({} words) from the {}.",
        report.sequences.to_string().green().bold(),
        report.words,
        source
    );
}
