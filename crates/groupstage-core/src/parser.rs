// Line parser for `TEAM1 S : S TEAM2` match rows.
//
// The group of a row is not part of the row itself: the input lists the
// matches of a data set interleaved in pairs (A, A, B, B, C, C, D, D, A, ...),
// so the group is derived from how many rows of the data set were parsed
// before it.

use crate::record::{Group, MatchRecord, GROUPS_PER_SERIES, TEAMS_PER_GROUP};
use thiserror::Error;

const SCORE_SEPARATOR: &str = " : ";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no space after the first team name")]
    MissingSpace,

    #[error("empty team name")]
    EmptyTeamName,

    #[error("score separator ` : ` missing or not after a single-character score")]
    MissingSeparator,

    #[error("second score is not a single character followed by a space")]
    MalformedSecondScore,

    #[error("score `{0}` is not a decimal digit")]
    InvalidScore(char),

    #[error("team name `{0}` contains whitespace")]
    InvalidTeamName(String),
}

// ---------------------------------------------------------------------------
// Group assignment
// ---------------------------------------------------------------------------

/// Group of the match at `index` (0-based) within a data set.
///
/// Two consecutive rows belong to the same group, then the next group takes
/// over: `(2 * index / 4) mod 4`.
pub fn group_for_index(index: usize) -> Group {
    Group::ALL[(2 * index / TEAMS_PER_GROUP) % GROUPS_PER_SERIES]
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a single row and tag it with `group`.
///
/// Trailing whitespace (including the `\r` of CRLF files) is ignored. Scores
/// must be single ASCII digits.
pub fn parse_line(line: &str, group: Group) -> Result<MatchRecord, ParseError> {
    let line = line.trim_end();
    let bytes = line.as_bytes();

    let space = line.find(' ').ok_or(ParseError::MissingSpace)?;
    let team1 = &line[..space];
    if team1.is_empty() {
        return Err(ParseError::EmptyTeamName);
    }
    if team1.contains(char::is_whitespace) {
        return Err(ParseError::InvalidTeamName(team1.to_string()));
    }

    let score1_at = space + 1;
    let separator = match line[score1_at..].find(SCORE_SEPARATOR) {
        Some(1) => score1_at + 1,
        _ => return Err(ParseError::MissingSeparator),
    };
    let team1_score = score_digit(bytes[score1_at])?;

    let score2_at = separator + SCORE_SEPARATOR.len();
    let team2_at = match line[score2_at..].find(' ') {
        Some(1) => score2_at + 2,
        _ => return Err(ParseError::MalformedSecondScore),
    };
    let team2_score = score_digit(bytes[score2_at])?;

    let team2 = &line[team2_at..];
    if team2.is_empty() {
        return Err(ParseError::EmptyTeamName);
    }
    if team2.contains(char::is_whitespace) {
        return Err(ParseError::InvalidTeamName(team2.to_string()));
    }

    Ok(MatchRecord {
        team1: team1.to_string(),
        team2: team2.to_string(),
        team1_score,
        team2_score,
        group,
    })
}

fn score_digit(byte: u8) -> Result<u8, ParseError> {
    if byte.is_ascii_digit() {
        Ok(byte - b'0')
    } else {
        Err(ParseError::InvalidScore(char::from(byte)))
    }
}

/// Stateful parser for the rows of one data set.
///
/// Only successfully parsed rows advance the group cursor. Create a new
/// parser for every data set.
#[derive(Debug, Default)]
pub struct LineParser {
    parsed: usize,
}

impl LineParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows parsed so far in this data set.
    pub fn parsed(&self) -> usize {
        self.parsed
    }

    pub fn parse(&mut self, line: &str) -> Result<MatchRecord, ParseError> {
        let record = parse_line(line, group_for_index(self.parsed))?;
        self.parsed += 1;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_row() {
        let record = parse_line("AUT 2 : 1 BEL", Group::C).unwrap();
        assert_eq!(record.team1, "AUT");
        assert_eq!(record.team2, "BEL");
        assert_eq!(record.team1_score, 2);
        assert_eq!(record.team2_score, 1);
        assert_eq!(record.group, Group::C);
    }

    #[test]
    fn strips_carriage_return_and_trailing_spaces() {
        let record = parse_line("AUT 0 : 0 BEL \r", Group::A).unwrap();
        assert_eq!(record.team2, "BEL");
    }

    #[test]
    fn long_team_names_are_accepted() {
        let record = parse_line("Netherlands 9 : 0 San_Marino", Group::A).unwrap();
        assert_eq!(record.team1, "Netherlands");
        assert_eq!(record.team2, "San_Marino");
        assert_eq!(record.team1_score, 9);
    }

    #[test]
    fn rejects_line_without_space() {
        assert_eq!(parse_line("AUT2:1BEL", Group::A), Err(ParseError::MissingSpace));
        assert_eq!(parse_line("", Group::A), Err(ParseError::MissingSpace));
    }

    #[test]
    fn rejects_leading_space() {
        assert_eq!(parse_line(" AUT 2 : 1 BEL", Group::A), Err(ParseError::EmptyTeamName));
    }

    #[test]
    fn rejects_missing_separator() {
        assert_eq!(parse_line("AUT 2 - 1 BEL", Group::A), Err(ParseError::MissingSeparator));
        assert_eq!(parse_line("AUT 2:1 BEL", Group::A), Err(ParseError::MissingSeparator));
    }

    #[test]
    fn rejects_multi_character_scores() {
        assert_eq!(parse_line("AUT 10 : 1 BEL", Group::A), Err(ParseError::MissingSeparator));
        assert_eq!(
            parse_line("AUT 1 : 10 BEL", Group::A),
            Err(ParseError::MalformedSecondScore)
        );
        assert_eq!(parse_line("AUT 1 : 1", Group::A), Err(ParseError::MalformedSecondScore));
    }

    #[test]
    fn rejects_non_digit_scores() {
        assert_eq!(parse_line("AUT x : 1 BEL", Group::A), Err(ParseError::InvalidScore('x')));
        assert_eq!(parse_line("AUT 1 : ? BEL", Group::A), Err(ParseError::InvalidScore('?')));
    }

    #[test]
    fn rejects_empty_or_spaced_team_names() {
        assert_eq!(parse_line("AUT 1 : 1 ", Group::A), Err(ParseError::MalformedSecondScore));
        assert_eq!(
            parse_line("AUT 1 : 1 BEL X", Group::A),
            Err(ParseError::InvalidTeamName("BEL X".into()))
        );
        assert_eq!(
            parse_line("AU\tT 1 : 0 BEL", Group::A),
            Err(ParseError::InvalidTeamName("AU\tT".into()))
        );
        assert_eq!(
            parse_line("AUT 1 : 0 BE\tL", Group::A),
            Err(ParseError::InvalidTeamName("BE\tL".into()))
        );
    }

    #[test]
    fn groups_follow_interleaved_pairs() {
        let groups: Vec<Group> = (0..10).map(group_for_index).collect();
        assert_eq!(
            groups,
            vec![
                Group::A,
                Group::A,
                Group::B,
                Group::B,
                Group::C,
                Group::C,
                Group::D,
                Group::D,
                Group::A,
                Group::A,
            ]
        );
    }

    #[test]
    fn every_group_gets_six_of_twenty_four() {
        let mut counts = [0usize; 4];
        for i in 0..24 {
            counts[group_for_index(i).index()] += 1;
        }
        assert_eq!(counts, [6, 6, 6, 6]);
    }

    #[test]
    fn parser_cursor_advances_only_on_success() {
        let mut parser = LineParser::new();
        assert_eq!(parser.parse("A 1 : 0 B").unwrap().group, Group::A);
        assert!(parser.parse("garbage").is_err());
        assert_eq!(parser.parsed(), 1);
        assert_eq!(parser.parse("C 1 : 0 D").unwrap().group, Group::A);
        assert_eq!(parser.parse("E 1 : 0 F").unwrap().group, Group::B);
        assert_eq!(parser.parsed(), 3);
    }
}
