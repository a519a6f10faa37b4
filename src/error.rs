use thiserror::Error;

/// The only fatal failures of an extraction. Every signal-level problem is
/// recovered locally with that signal's default instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("fixture {0} not found")]
    FixtureNotFound(u32),
    #[error("team {0} not found")]
    TeamNotFound(u32),
}
