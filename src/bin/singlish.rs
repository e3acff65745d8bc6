use std::fs;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use singlish_engine::dict::Lexicon;
use singlish_engine::explain;
use singlish_engine::{init_tracing, phonetic, settings, Engine, TraceGuard};

/// Unwrap a Result or print the error and exit.
macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

#[derive(Parser)]
#[command(name = "singlish", about = "Singlish to Sinhala transliteration")]
struct Cli {
    /// Settings TOML replacing the built-in defaults
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Phonetic table TOML replacing the built-in table
    #[arg(long, global = true)]
    phonetic: Option<PathBuf>,

    /// Write a JSON trace to this directory (needs the `trace` feature)
    #[arg(long, global = true)]
    trace_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Translate text given as arguments, or stdin line by line
    Translate {
        /// Lexicon file (.toml source or compiled binary)
        #[arg(long)]
        lexicon: Option<PathBuf>,

        /// Text to translate; reads stdin when omitted
        text: Vec<String>,
    },
    /// Show how each token was split, mapped and resolved
    Explain {
        #[arg(long)]
        lexicon: Option<PathBuf>,

        text: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compile a TOML lexicon into the binary format
    Compile {
        input: PathBuf,
        output: PathBuf,
    },
    /// Print lexicon statistics
    Stats {
        /// Lexicon file; the built-in lexicon when omitted
        lexicon: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },
    /// Run a TOML corpus of input/expected pairs
    Accuracy {
        corpus: PathBuf,

        #[arg(long)]
        lexicon: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },
}

#[derive(Deserialize)]
struct Corpus {
    #[serde(rename = "case")]
    cases: Vec<CorpusCase>,
}

#[derive(Deserialize)]
struct CorpusCase {
    name: String,
    input: String,
    expected: String,
    /// Set for cases the engine is known not to handle yet.
    #[serde(default)]
    known_issue: Option<String>,
}

#[derive(Serialize)]
struct CaseReport {
    name: String,
    input: String,
    expected: String,
    actual: String,
    passed: bool,
    known_issue: Option<String>,
}

#[derive(Serialize)]
struct AccuracyReport {
    total: usize,
    passed: usize,
    known_failures: usize,
    regressions: usize,
    cases: Vec<CaseReport>,
}

fn open_engine(lexicon: &Option<PathBuf>) -> Engine {
    match lexicon {
        Some(path) => die!(Engine::from_path(path), "Error loading lexicon: {}"),
        None => Engine::default(),
    }
}

fn load_lexicon(path: &Path) -> Lexicon {
    die!(Lexicon::load(path), "Error loading lexicon: {}")
}

fn apply_overrides(cli: &Cli) -> Option<TraceGuard> {
    if let Some(ref path) = cli.settings {
        let content = die!(fs::read_to_string(path), "Error reading settings: {}");
        die!(settings::init_custom(content), "Invalid settings: {}");
    }
    if let Some(ref path) = cli.phonetic {
        let content = die!(fs::read_to_string(path), "Error reading phonetic table: {}");
        die!(
            phonetic::PhoneticTrie::init_custom(content),
            "Invalid phonetic table: {}"
        );
    }
    cli.trace_dir.as_deref().map(init_tracing)
}

fn run_translate(engine: &Engine, text: Vec<String>) {
    if !text.is_empty() {
        println!("{}", engine.translate(&text.join(" ")));
        return;
    }
    let stdin = io::stdin();
    let mut out = BufWriter::new(io::stdout().lock());
    for line in stdin.lock().lines() {
        let line = die!(line, "Error reading stdin: {}");
        die!(
            writeln!(out, "{}", engine.translate(&line)),
            "Failed to write: {}"
        );
    }
    die!(out.flush(), "Failed to write: {}");
}

/// Returns true when any case without a known issue failed.
fn run_accuracy(engine: &Engine, corpus_path: &Path, json: bool) -> bool {
    let content = die!(fs::read_to_string(corpus_path), "Error reading corpus: {}");
    let corpus: Corpus = die!(toml::from_str(&content), "Error parsing corpus: {}");

    let cases: Vec<CaseReport> = corpus
        .cases
        .into_iter()
        .map(|c| {
            let actual = engine.translate(&c.input);
            CaseReport {
                passed: actual == c.expected,
                name: c.name,
                input: c.input,
                expected: c.expected,
                actual,
                known_issue: c.known_issue,
            }
        })
        .collect();

    let passed = cases.iter().filter(|c| c.passed).count();
    let known_failures = cases
        .iter()
        .filter(|c| !c.passed && c.known_issue.is_some())
        .count();
    let report = AccuracyReport {
        total: cases.len(),
        passed,
        known_failures,
        regressions: cases.len() - passed - known_failures,
        cases,
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).expect("JSON serialization failed")
        );
    } else {
        for c in report.cases.iter().filter(|c| !c.passed) {
            let label = if c.known_issue.is_some() {
                "KNOWN"
            } else {
                "FAIL"
            };
            println!("  {label:<5} {}", c.name);
            println!("        input:    {}", c.input);
            println!("        expected: {}", c.expected);
            println!("        actual:   {}", c.actual);
            if let Some(ref issue) = c.known_issue {
                println!("        note:     {issue}");
            }
        }
        println!();
        println!("=== Summary ===");
        println!("  Total:        {}", report.total);
        println!("  Passed:       {}", report.passed);
        println!("  Known issues: {}", report.known_failures);
        println!("  Regressions:  {}", report.regressions);
    }

    report.regressions > 0
}

fn main() {
    let cli = Cli::parse();
    let trace = apply_overrides(&cli);

    match cli.command {
        Command::Translate { lexicon, text } => {
            let engine = open_engine(&lexicon);
            run_translate(&engine, text);
        }

        Command::Explain {
            lexicon,
            text,
            json,
        } => {
            let engine = open_engine(&lexicon);
            let result = explain::explain(&engine, &text);
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&result).expect("JSON serialization failed")
                );
            } else {
                print!("{}", explain::format_text(&result));
            }
        }

        Command::Compile { input, output } => {
            let source = die!(fs::read_to_string(&input), "Error reading source: {}");
            let lexicon = die!(Lexicon::from_toml(&source), "Error parsing lexicon: {}");
            die!(lexicon.save(&output), "Error writing lexicon: {}");
            let stats = lexicon.stats();
            eprintln!(
                "Compiled {} keys, {} entries, {} idioms, {} foreign words -> {}",
                stats.keys,
                stats.entries,
                stats.idioms,
                stats.foreign,
                output.display()
            );
        }

        Command::Stats { lexicon, json } => {
            let lexicon = match lexicon {
                Some(path) => Arc::new(load_lexicon(&path)),
                None => Lexicon::default_shared(),
            };
            let stats = lexicon.stats();
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&stats).expect("JSON serialization failed")
                );
            } else {
                println!("Lexicon version {}", lexicon.version());
                println!("  keys:          {}", stats.keys);
                println!("  entries:       {}", stats.entries);
                println!("  idioms:        {}", stats.idioms);
                println!("  foreign words: {}", stats.foreign);
                println!("  longest key:   {}", lexicon.max_key_len());
            }
        }

        Command::Accuracy {
            corpus,
            lexicon,
            json,
        } => {
            let engine = open_engine(&lexicon);
            if run_accuracy(&engine, &corpus, json) {
                drop(trace);
                process::exit(1);
            }
        }
    }
}
