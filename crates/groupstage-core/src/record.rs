// Match records and the fixed tournament geometry.

use std::fmt;

// ---------------------------------------------------------------------------
// Tournament geometry
// ---------------------------------------------------------------------------

pub const GROUPS_PER_SERIES: usize = 4;
pub const TEAMS_PER_GROUP: usize = 4;
pub const MATCHES_PER_GROUP: usize = TEAMS_PER_GROUP * (TEAMS_PER_GROUP - 1) / 2;
pub const MATCHES_PER_SERIES: usize = GROUPS_PER_SERIES * MATCHES_PER_GROUP;

/// Group tag of a match. Groups are paired A/B and C/D for the knockout draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Group {
    A,
    B,
    C,
    D,
}

impl Group {
    pub const ALL: [Group; GROUPS_PER_SERIES] = [Group::A, Group::B, Group::C, Group::D];

    /// Map a 0-based index to its group. Returns None past the last group.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            Group::A => 0,
            Group::B => 1,
            Group::C => 2,
            Group::D => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Group::A => "A",
            Group::B => "B",
            Group::C => "C",
            Group::D => "D",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// MatchRecord
// ---------------------------------------------------------------------------

/// One played match as read from the input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub team1: String,
    pub team2: String,
    pub team1_score: u8,
    pub team2_score: u8,
    pub group: Group,
}

impl MatchRecord {
    /// Goal difference from team 1's point of view.
    pub fn goal_difference(&self) -> i32 {
        i32::from(self.team1_score) - i32::from(self.team2_score)
    }
}

impl fmt::Display for MatchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} : {} {}",
            self.team1, self.team1_score, self.team2_score, self.team2
        )
    }
}
