// Library root: group standings, tie-breaks and knockout pairings for
// four-group round-robin tournaments. The `groupstage` binary and the
// integration tests use the public modules below.

pub mod config;
pub mod parser;
pub mod record;
pub mod round;
pub mod standings;
pub mod tournament;
