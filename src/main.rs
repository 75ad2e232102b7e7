use tonemark::annotations;
use tonemark::config;
use tonemark::json;
use tonemark::pinyin;

use clap::{Parser, Subcommand};
use std::borrow::Cow;
use std::ffi::OsStr;
use std::fs;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow, bail};
use itertools::Itertools;
use serde::Serialize;
use tracing::Level;

#[derive(Parser)]
#[command(name = "tonemark")]
#[command(version = "0.1.0")]
#[command(about = "Convert numbered pinyin (ma3) to pinyin with tone marks (mǎ)", long_about = None)]
struct Cli {
    /// Print debug information to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert words in numbered pinyin, e.g. ni3hao3
    Mark {
        #[arg(required = true)]
        words: Vec<String>,

        /// Convert single syllables with tone marks back to numbered pinyin
        #[arg(short, long)]
        reverse: bool,
    },
    /// Rewrite annotations like [ma3] in a text file, line by line
    Rewrite {
        /// Input file, stdin if not provided
        input: Option<PathBuf>,

        /// Output file, stdout if not provided
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Rewrite annotations like [ma3] in every string of a .json file
    Json {
        /// Input file (.json)
        input: PathBuf,

        /// Output file, stdout if not provided
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List annotations with a tone but without a vowel which could carry the tone mark
    Check {
        /// Input file, stdin if not provided
        input: Option<PathBuf>,

        /// Output the findings as json
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize, Debug, PartialEq)]
struct CheckFinding {
    line: usize,
    column: usize,
    annotation: String,
}

fn open_input(path: Option<&Path>) -> anyhow::Result<Box<dyn BufRead>> {
    Ok(match path {
        Some(path) => {
            let file = File::open(path)
                .context(format!("Could not open input file {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    })
}

fn create_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => {
            let file = File::create(path)
                .context(format!("Could not create output file {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn ensure_different(input: Option<&Path>, output: Option<&Path>) -> anyhow::Result<()> {
    if input.is_some() && input == output {
        bail!("Input file and output file must be different");
    }
    Ok(())
}

fn mark_words(words: &[String], reverse: bool) -> String {
    words
        .iter()
        .map(|word| {
            if reverse {
                pinyin::pinyin_syllable_num_from_mark(word)
            } else {
                pinyin::pinyin_mark_from_num(word)
            }
        })
        .join("\n")
}

/// Returns the number of lines which contained annotations
fn rewrite_lines(mut reader: impl BufRead, mut writer: impl Write) -> anyhow::Result<usize> {
    let mut line = String::with_capacity(config::APPROX_LINE_LEN);
    let mut num_changed = 0;
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let rewritten = annotations::rewrite_annotations(&line);
        if matches!(rewritten, Cow::Owned(_)) {
            num_changed += 1;
        }
        writer.write_all(rewritten.as_bytes())?;
    }
    writer.flush()?;
    Ok(num_changed)
}

fn rewrite_json_file(input: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    if input.extension().and_then(OsStr::to_str) != Some("json") {
        bail!("Invalid input file {}", input.display());
    }
    let s = fs::read_to_string(input)
        .context(format!("Could not open json file {}", input.display()))?;
    let mut value: serde_json::Value =
        serde_json::from_str(&s).context(format!("Invalid json in {}", input.display()))?;
    let num_changed = json::rewrite_json_strings(&mut value);
    tracing::debug!("{num_changed} strings rewritten in {}", input.display());

    let mut writer = create_output(output)?;
    serde_json::to_writer_pretty(&mut writer, &value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn find_missing_tone_marks(reader: impl BufRead) -> anyhow::Result<Vec<CheckFinding>> {
    let mut findings = vec![];
    for (line_idx, line) in reader.lines().enumerate() {
        let line = line?;
        for annotation in annotations::annotations(&line).filter(|a| a.is_missing_tone_mark()) {
            findings.push(CheckFinding {
                line: line_idx + 1,
                column: line[..annotation.range.start].chars().count() + 1,
                annotation: line[annotation.range].to_owned(),
            });
        }
    }
    Ok(findings)
}

fn check(input: Option<&Path>, as_json: bool) -> anyhow::Result<()> {
    let findings = find_missing_tone_marks(open_input(input)?)?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&findings)?);
    } else {
        for finding in &findings {
            println!(
                "{}:{}: {} has no vowel for the tone mark",
                finding.line, finding.column, finding.annotation
            );
        }
    }
    if findings.is_empty() {
        Ok(())
    } else {
        Err(anyhow!(
            "{} annotations without a vowel for the tone mark",
            findings.len()
        ))
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let max_level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(max_level)
        .init();

    match cli.command {
        Command::Mark { words, reverse } => {
            println!("{}", mark_words(&words, reverse));
        }
        Command::Rewrite { input, output } => {
            ensure_different(input.as_deref(), output.as_deref())?;
            let reader = open_input(input.as_deref())?;
            let writer = create_output(output.as_deref())?;
            let num_changed = rewrite_lines(reader, writer)?;
            tracing::debug!("{num_changed} lines rewritten");
        }
        Command::Json { input, output } => {
            ensure_different(Some(input.as_path()), output.as_deref())?;
            rewrite_json_file(&input, output.as_deref())?;
        }
        Command::Check { input, json } => {
            check(input.as_deref(), json)?;
        }
    }
    Ok(())
}
