// Group standings: per-team aggregates and the tie-break ladder.
//
// Teams are ordered by points. Inside a run of teams level on points:
// - exactly two teams: their direct match decides first;
// - then goal difference, goals scored, and finally the name in reverse
//   lexicographic order (the greater name ranks higher).
// A run of three or more teams never looks at direct matches.

use std::cmp::Ordering;
use std::fmt;
use std::io::{self, Write};

use thiserror::Error;
use tracing::debug;

use crate::record::{MatchRecord, TEAMS_PER_GROUP};

const POINTS_FOR_WIN: u32 = 3;
const POINTS_FOR_DRAW: u32 = 1;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StandingsError {
    #[error("team `{team}` would be the fifth team of a four-team group")]
    GroupFull { team: String },

    #[error("team `{0}` cannot play against itself")]
    SelfMatch(String),

    #[error("group has {found} team(s), at least two are needed for a ranking")]
    NotEnoughTeams { found: usize },
}

// ---------------------------------------------------------------------------
// TeamStats
// ---------------------------------------------------------------------------

/// Aggregated results of one team within its group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamStats {
    pub name: String,
    /// Index of first appearance within the group (0-based).
    pub id: usize,
    pub points: u32,
    pub scored: u32,
    pub conceded: u32,
}

impl TeamStats {
    fn new(name: &str, id: usize) -> Self {
        Self {
            name: name.to_string(),
            id,
            points: 0,
            scored: 0,
            conceded: 0,
        }
    }

    pub fn goal_difference(&self) -> i32 {
        self.scored as i32 - self.conceded as i32
    }

    fn add_result(&mut self, scored: u8, conceded: u8) {
        self.scored += u32::from(scored);
        self.conceded += u32::from(conceded);
        self.points += match scored.cmp(&conceded) {
            Ordering::Greater => POINTS_FOR_WIN,
            Ordering::Equal => POINTS_FOR_DRAW,
            Ordering::Less => 0,
        };
    }
}

/// Renders one row of the standings listing:
/// `name points goal_difference scored conceded`.
impl fmt::Display for TeamStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.name,
            self.points,
            self.goal_difference(),
            self.scored,
            self.conceded
        )
    }
}

// ---------------------------------------------------------------------------
// StandingsTable
// ---------------------------------------------------------------------------

/// Standings of a single group of at most four teams.
#[derive(Debug, Clone, Default)]
pub struct StandingsTable {
    /// Teams in order of first appearance; `teams[i].id == i`.
    teams: Vec<TeamStats>,
    /// Goal difference of the direct match, from the row team's side.
    head_to_head: [[i32; TEAMS_PER_GROUP]; TEAMS_PER_GROUP],
    matches: usize,
    /// Cached result of `compute_ranking`, dropped on every new match.
    ranking: Option<Vec<TeamStats>>,
}

impl StandingsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a match result to the group.
    ///
    /// Unknown team names are registered in order of appearance. A rejected
    /// record leaves the table untouched.
    pub fn record_match(&mut self, record: &MatchRecord) -> Result<(), StandingsError> {
        if record.team1 == record.team2 {
            return Err(StandingsError::SelfMatch(record.team1.clone()));
        }

        let unknown: Vec<&String> = [&record.team1, &record.team2]
            .into_iter()
            .filter(|name| self.team_id(name).is_none())
            .collect();
        if let Some(first_unknown) = unknown.first() {
            if self.teams.len() + unknown.len() > TEAMS_PER_GROUP {
                return Err(StandingsError::GroupFull {
                    team: (*first_unknown).clone(),
                });
            }
        }

        let id1 = self.team_id_or_insert(&record.team1);
        let id2 = self.team_id_or_insert(&record.team2);

        self.teams[id1].add_result(record.team1_score, record.team2_score);
        self.teams[id2].add_result(record.team2_score, record.team1_score);

        let diff = record.goal_difference();
        self.head_to_head[id1][id2] = diff;
        self.head_to_head[id2][id1] = -diff;

        self.matches += 1;
        self.ranking = None;
        Ok(())
    }

    /// Teams in order of first appearance.
    pub fn teams(&self) -> &[TeamStats] {
        &self.teams
    }

    pub fn team(&self, name: &str) -> Option<&TeamStats> {
        self.teams.iter().find(|t| t.name == name)
    }

    /// Number of matches recorded so far.
    pub fn matches_recorded(&self) -> usize {
        self.matches
    }

    /// Goal difference of the direct match between `a` and `b`, seen from `a`.
    ///
    /// Zero when the teams have not met. None if either team is unknown.
    pub fn head_to_head(&self, a: &str, b: &str) -> Option<i32> {
        let a = self.team_id(a)?;
        let b = self.team_id(b)?;
        Some(self.head_to_head[a][b])
    }

    /// True when the next call to `standings` will compute a fresh ranking.
    pub fn needs_ranking(&self) -> bool {
        self.ranking.is_none()
    }

    /// The ranked team list, computed on first use after a change.
    pub fn standings(&mut self) -> &[TeamStats] {
        if self.ranking.is_none() {
            let ranked = self.compute_ranking();
            debug!(
                "Ranked {} team(s) after {} match(es): {}",
                ranked.len(),
                self.matches,
                ranked
                    .iter()
                    .map(|t| t.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            self.ranking = Some(ranked);
        }
        self.ranking.as_deref().unwrap_or(&[])
    }

    /// Names of the group winner and runner-up.
    pub fn top_two(&mut self) -> Result<(String, String), StandingsError> {
        match self.standings() {
            [first, second, ..] => Ok((first.name.clone(), second.name.clone())),
            ranked => Err(StandingsError::NotEnoughTeams {
                found: ranked.len(),
            }),
        }
    }

    /// Rank the group without touching the cache.
    pub fn compute_ranking(&self) -> Vec<TeamStats> {
        let mut ranked = self.teams.clone();
        ranked.sort_by(|a, b| b.points.cmp(&a.points));

        for tied in ranked.chunk_by_mut(|a, b| a.points == b.points) {
            if tied.len() > 1 {
                let use_direct = tied.len() == 2;
                tied.sort_by(|a, b| self.compare_tied(a, b, use_direct));
            }
        }

        ranked
    }

    /// Order two teams level on points. `Less` means `a` ranks higher.
    fn compare_tied(&self, a: &TeamStats, b: &TeamStats, use_direct: bool) -> Ordering {
        let direct = if use_direct {
            0.cmp(&self.head_to_head[a.id][b.id])
        } else {
            Ordering::Equal
        };

        direct
            .then_with(|| b.goal_difference().cmp(&a.goal_difference()))
            .then_with(|| b.scored.cmp(&a.scored))
            .then_with(|| b.name.cmp(&a.name))
    }

    fn team_id(&self, name: &str) -> Option<usize> {
        self.teams.iter().position(|t| t.name == name)
    }

    fn team_id_or_insert(&mut self, name: &str) -> usize {
        self.team_id(name).unwrap_or_else(|| {
            let id = self.teams.len();
            self.teams.push(TeamStats::new(name, id));
            id
        })
    }
}

/// Write a standings listing: a blank line, one row per team, a blank line.
pub fn write_standings<W: Write>(out: &mut W, ranked: &[TeamStats]) -> io::Result<()> {
    writeln!(out)?;
    for team in ranked {
        writeln!(out, "{team}")?;
    }
    writeln!(out)
}
