// Input driver: data-set count, then 24 match rows per data set.
//
// A data set is fully read and tabulated before anything is written for it,
// so a malformed data set produces no output at all. Output of earlier data
// sets has already been written by then.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::{debug, info};

use crate::config::OutputConfig;
use crate::parser::{LineParser, ParseError};
use crate::record::MATCHES_PER_SERIES;
use crate::round::{Pairing, RoundError, TournamentRound};
use crate::standings::StandingsError;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum InputError {
    #[error("missing or invalid data set count: `{found}`")]
    InvalidCount { found: String },

    #[error(
        "input ended at line {line}: data set {data_set} has {found} of {expected} match rows"
    )]
    UnexpectedEof {
        data_set: usize,
        line: usize,
        found: usize,
        expected: usize,
    },

    #[error("line {line}: {source}")]
    Syntax { line: usize, source: ParseError },

    #[error("line {line}: {source}")]
    Group { line: usize, source: StandingsError },

    #[error("data set {data_set}: {source}")]
    Round { data_set: usize, source: RoundError },

    #[error("failed to read line {line}: {source}")]
    Read { line: usize, source: io::Error },

    #[error("failed to write output: {0}")]
    Write(io::Error),
}

impl InputError {
    /// Whether the failure lies in the content of the input rather than in
    /// reading or writing it.
    pub fn is_syntax(&self) -> bool {
        match self {
            InputError::Read { source, .. } => source.kind() == io::ErrorKind::InvalidData,
            InputError::Write(_) => false,
            InputError::Round {
                source: RoundError::Io(_),
                ..
            } => false,
            _ => true,
        }
    }
}

/// Knockout draws produced by a run, one entry per data set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub data_sets: Vec<Vec<Pairing>>,
}

impl RunSummary {
    pub fn data_sets_processed(&self) -> usize {
        self.data_sets.len()
    }
}

// ---------------------------------------------------------------------------
// Line source
// ---------------------------------------------------------------------------

/// Lines of the input with their 1-based line numbers.
struct NumberedLines<R> {
    lines: io::Lines<R>,
    line_no: usize,
}

impl<R: BufRead> NumberedLines<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }

    fn next_line(&mut self) -> Result<Option<(usize, String)>, InputError> {
        let Some(line) = self.lines.next() else {
            return Ok(None);
        };
        self.line_no += 1;
        let line = line.map_err(|source| InputError::Read {
            line: self.line_no,
            source,
        })?;
        Ok(Some((self.line_no, line)))
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Process a whole input file, writing standings and pairings to `out`.
pub fn run<R: BufRead, W: Write>(
    reader: R,
    out: &mut W,
    config: &OutputConfig,
) -> Result<RunSummary, InputError> {
    let mut lines = NumberedLines::new(reader);
    let count = read_count(&mut lines)?;
    info!("Processing {} data set(s)", count);

    let mut summary = RunSummary::default();
    for data_set in 1..=count {
        let mut round = read_round(&mut lines, data_set)?;
        let pairings = round
            .pairings(out, config.standings)
            .map_err(|source| InputError::Round { data_set, source })?;
        info!("Data set {} drawn: {} pairing(s)", data_set, pairings.len());
        summary.data_sets.push(pairings);
    }

    out.flush().map_err(InputError::Write)?;
    Ok(summary)
}

/// Read the data-set count: the first non-blank line, which must hold a
/// single unsigned integer.
fn read_count<R: BufRead>(lines: &mut NumberedLines<R>) -> Result<usize, InputError> {
    while let Some((_, line)) = lines.next_line()? {
        let mut tokens = line.split_whitespace();
        let Some(token) = tokens.next() else {
            continue;
        };
        if tokens.next().is_some() {
            return Err(InputError::InvalidCount {
                found: line.trim().to_string(),
            });
        }
        return token.parse().map_err(|_| InputError::InvalidCount {
            found: token.to_string(),
        });
    }
    Err(InputError::InvalidCount {
        found: String::new(),
    })
}

/// Read and tabulate the match rows of one data set.
fn read_round<R: BufRead>(
    lines: &mut NumberedLines<R>,
    data_set: usize,
) -> Result<TournamentRound, InputError> {
    let mut parser = LineParser::new();
    let mut round = TournamentRound::new();

    while round.matches_consumed() < MATCHES_PER_SERIES {
        let Some((line_no, line)) = lines.next_line()? else {
            return Err(InputError::UnexpectedEof {
                data_set,
                line: lines.line_no,
                found: round.matches_consumed(),
                expected: MATCHES_PER_SERIES,
            });
        };

        let record = parser
            .parse(&line)
            .map_err(|source| InputError::Syntax {
                line: line_no,
                source,
            })?;
        debug!("Data set {} line {}: group {} {}", data_set, line_no, record.group, record);

        round
            .consume(&record)
            .map_err(|source| InputError::Group {
                line: line_no,
                source,
            })?;
    }

    Ok(round)
}
