//! Append-only log of finished games.
//!
//! Each line is `<local timestamp>  ---  <score>`, for example
//! `2025-06-01 21:04:17.532911  ---  1300`.

use std::{
    fmt,
    fs::{self, OpenOptions},
    io::{self, Write as _},
    num::ParseIntError,
    path::Path,
    str::FromStr,
};

use anyhow::Context;
use chrono::{Local, NaiveDateTime};

const SEPARATOR: &str = "  ---  ";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";
// `%.f` also accepts timestamps without a fractional part.
const TIMESTAMP_PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// One finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    pub recorded_at: NaiveDateTime,
    pub score: usize,
}

impl ScoreEntry {
    pub fn now(score: usize) -> Self {
        Self {
            recorded_at: Local::now().naive_local(),
            score,
        }
    }
}

impl fmt::Display for ScoreEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}",
            self.recorded_at.format(TIMESTAMP_FORMAT),
            self.score
        )
    }
}

/// Reason a single log line could not be read.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseScoreEntryError {
    #[display("missing `  ---  ` separator")]
    MissingSeparator,
    #[display("invalid timestamp: {_0}")]
    InvalidTimestamp(chrono::ParseError),
    #[display("invalid score: {_0}")]
    InvalidScore(ParseIntError),
}

impl FromStr for ScoreEntry {
    type Err = ParseScoreEntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (timestamp, score) = s
            .split_once(SEPARATOR)
            .ok_or(ParseScoreEntryError::MissingSeparator)?;
        let recorded_at = NaiveDateTime::parse_from_str(timestamp.trim(), TIMESTAMP_PARSE_FORMAT)
            .map_err(ParseScoreEntryError::InvalidTimestamp)?;
        let score = score
            .trim()
            .parse()
            .map_err(ParseScoreEntryError::InvalidScore)?;
        Ok(Self { recorded_at, score })
    }
}

/// A malformed line in a score log, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("line {line}: {source}")]
pub struct ScoreLogError {
    pub line: usize,
    pub source: ParseScoreEntryError,
}

/// Parses the whole contents of a score log. Blank lines are skipped.
pub fn parse_log(text: &str) -> Result<Vec<ScoreEntry>, ScoreLogError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            line.parse()
                .map_err(|source| ScoreLogError { line: i + 1, source })
        })
        .collect()
}

/// Reads a score log. A log that does not exist yet reads as empty.
pub fn read(path: &Path) -> anyhow::Result<Vec<ScoreEntry>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(vec![]),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", path.display()));
        }
    };
    let entries =
        parse_log(&text).with_context(|| format!("Malformed score log {}", path.display()))?;
    Ok(entries)
}

/// Appends one entry, creating the file if needed.
pub fn append(path: &Path, entry: &ScoreEntry) -> anyhow::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    writeln!(file, "{entry}").with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
