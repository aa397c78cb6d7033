// One data set: four group tables and the knockout draw between them.

use std::fmt;
use std::io::{self, Write};

use thiserror::Error;
use tracing::debug;

use crate::record::{Group, MatchRecord, GROUPS_PER_SERIES};
use crate::standings::{write_standings, StandingsError, StandingsTable};

/// Groups whose winners and runners-up are crossed in the knockout draw.
pub const GROUP_PAIRS: [(Group, Group); 2] = [(Group::A, Group::B), (Group::C, Group::D)];

#[derive(Debug, Error)]
pub enum RoundError {
    #[error("group {group}: {source}")]
    Standings {
        group: Group,
        source: StandingsError,
    },

    #[error("failed to write round output: {0}")]
    Io(#[from] io::Error),
}

/// A knockout match-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing {
    pub home: String,
    pub away: String,
}

impl Pairing {
    pub fn new(home: impl Into<String>, away: impl Into<String>) -> Self {
        Self {
            home: home.into(),
            away: away.into(),
        }
    }
}

impl fmt::Display for Pairing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.home, self.away)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TournamentRound {
    tables: [StandingsTable; GROUPS_PER_SERIES],
    consumed: usize,
}

impl TournamentRound {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route a record to the table of its group.
    pub fn consume(&mut self, record: &MatchRecord) -> Result<(), StandingsError> {
        self.tables[record.group.index()].record_match(record)?;
        self.consumed += 1;
        Ok(())
    }

    pub fn matches_consumed(&self) -> usize {
        self.consumed
    }

    pub fn table(&self, group: Group) -> &StandingsTable {
        &self.tables[group.index()]
    }

    pub fn table_mut(&mut self, group: Group) -> &mut StandingsTable {
        &mut self.tables[group.index()]
    }

    /// Write the knockout draw to `out` and return it.
    ///
    /// For each group pair, the standings of both groups are written first
    /// (only when `show_standings` is set and the ranking is freshly
    /// computed), then the two cross match-ups: winner of the first group
    /// against the runner-up of the second, and the reverse.
    pub fn pairings<W: Write>(
        &mut self,
        out: &mut W,
        show_standings: bool,
    ) -> Result<Vec<Pairing>, RoundError> {
        let mut pairings = Vec::with_capacity(GROUP_PAIRS.len() * 2);

        for (first, second) in GROUP_PAIRS {
            let best_first = self.group_top_two(first, out, show_standings)?;
            let best_second = self.group_top_two(second, out, show_standings)?;

            let drawn = [
                Pairing::new(best_first.0, best_second.1),
                Pairing::new(best_second.0, best_first.1),
            ];
            for pairing in drawn {
                writeln!(out, "{pairing}")?;
                debug!("Group {first}/{second} pairing: {pairing}");
                pairings.push(pairing);
            }
        }

        Ok(pairings)
    }

    fn group_top_two<W: Write>(
        &mut self,
        group: Group,
        out: &mut W,
        show_standings: bool,
    ) -> Result<(String, String), RoundError> {
        let table = &mut self.tables[group.index()];
        if show_standings && table.needs_ranking() {
            write_standings(out, table.standings())?;
        }
        table
            .top_two()
            .map_err(|source| RoundError::Standings { group, source })
    }
}
