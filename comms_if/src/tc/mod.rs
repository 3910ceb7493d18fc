//! # Telecommand module
//!
//! Telecommands reach the arm as short text tokens, one token per message. Each action accepts a
//! short form and a `BTN_` form matching the button naming of the input device. Matching is exact
//! and case-sensitive after surrounding whitespace is trimmed.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use thiserror::Error;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Maximum length of a command message in bytes.
pub const MAX_CMD_LEN: usize = 20;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// An arm telecommand.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ArmTc {
    /// Run the Approach sequence (`BTN_A` / `A`)
    Approach,

    /// Run the Grab sequence (`BTN_B` / `B`)
    Grab,

    /// Run the Drop sequence (`BTN_X` / `X`)
    Drop,

    /// Run the Release sequence (`BTN_Y` / `Y`)
    Release,

    /// Return the arm to its home pose (`BTN_START` / `RESET`)
    Reset,

    /// Report the current angle of every joint
    Status,

    /// Report the joint to port mapping
    Map,
}

/// Possible parsing errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TcParseError {
    #[error("unrecognised command: {0}")]
    Unrecognised(String),
}

/// Reasons a raw message can't carry a command at all.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TcFrameError {
    #[error("command longer than {} bytes", MAX_CMD_LEN)]
    TooLong(usize),

    #[error("command is not valid UTF-8")]
    NotUtf8,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Check a raw message is short enough and is text before it's parsed.
pub fn validate(raw: &[u8]) -> Result<&str, TcFrameError> {
    if raw.len() > MAX_CMD_LEN {
        return Err(TcFrameError::TooLong(raw.len()));
    }

    std::str::from_utf8(raw).map_err(|_| TcFrameError::NotUtf8)
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ArmTc {
    /// Every telecommand, in the order they're listed to the user.
    pub const ALL: [ArmTc; 7] = [
        ArmTc::Approach,
        ArmTc::Grab,
        ArmTc::Drop,
        ArmTc::Release,
        ArmTc::Reset,
        ArmTc::Status,
        ArmTc::Map,
    ];

    /// Parse a raw message into a telecommand.
    ///
    /// Returns `Ok(None)` for an empty (or whitespace only) message, which is not an error and
    /// must be silently ignored by the caller.
    pub fn parse(raw: &str) -> Result<Option<Self>, TcParseError> {
        let token = raw.trim();

        if token.is_empty() {
            return Ok(None)
        }

        Self::ALL
            .iter()
            .find(|tc| tc.aliases().contains(&token))
            .copied()
            .map(Some)
            .ok_or_else(|| TcParseError::Unrecognised(token.to_string()))
    }

    /// The tokens which select this telecommand.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            ArmTc::Approach => &["BTN_A", "A"],
            ArmTc::Grab => &["BTN_B", "B"],
            ArmTc::Drop => &["BTN_X", "X"],
            ArmTc::Release => &["BTN_Y", "Y"],
            ArmTc::Reset => &["BTN_START", "RESET"],
            ArmTc::Status => &["STATUS"],
            ArmTc::Map => &["MAP"],
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!(ArmTc::parse("BTN_A"), Ok(Some(ArmTc::Approach)));
        assert_eq!(ArmTc::parse("A"), Ok(Some(ArmTc::Approach)));
        assert_eq!(ArmTc::parse("B"), Ok(Some(ArmTc::Grab)));
        assert_eq!(ArmTc::parse("BTN_X"), Ok(Some(ArmTc::Drop)));
        assert_eq!(ArmTc::parse("Y"), Ok(Some(ArmTc::Release)));
        assert_eq!(ArmTc::parse("BTN_START"), Ok(Some(ArmTc::Reset)));
        assert_eq!(ArmTc::parse("RESET"), Ok(Some(ArmTc::Reset)));
        assert_eq!(ArmTc::parse("STATUS"), Ok(Some(ArmTc::Status)));
        assert_eq!(ArmTc::parse("MAP"), Ok(Some(ArmTc::Map)));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(ArmTc::parse("  BTN_B\r\n"), Ok(Some(ArmTc::Grab)));
        assert_eq!(ArmTc::parse(""), Ok(None));
        assert_eq!(ArmTc::parse(" \t\n"), Ok(None));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(
            ArmTc::parse("btn_a"),
            Err(TcParseError::Unrecognised("btn_a".into()))
        );
        assert_eq!(
            ArmTc::parse("status"),
            Err(TcParseError::Unrecognised("status".into()))
        );
        assert_eq!(
            ArmTc::parse(" FOO "),
            Err(TcParseError::Unrecognised("FOO".into()))
        );
    }

    #[test]
    fn test_validate_length_limit() {
        let longest = "BTN_START           ";
        assert_eq!(longest.len(), MAX_CMD_LEN);
        assert_eq!(validate(longest.as_bytes()), Ok(longest));

        let too_long = "BTN_START            ";
        assert_eq!(validate(too_long.as_bytes()), Err(TcFrameError::TooLong(21)));

        assert_eq!(validate(b""), Ok(""));
    }

    #[test]
    fn test_validate_rejects_non_utf8() {
        assert_eq!(validate(b"BTN_\xff"), Err(TcFrameError::NotUtf8));
        assert_eq!(validate(&[0xc3]), Err(TcFrameError::NotUtf8));

        // Length is checked first
        assert_eq!(validate(&[0xff; 30]), Err(TcFrameError::TooLong(30)));
    }

    #[test]
    fn test_aliases_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for tc in ArmTc::ALL.iter() {
            for alias in tc.aliases() {
                assert!(alias.len() <= MAX_CMD_LEN);
                assert!(seen.insert(*alias), "Duplicate alias {}", alias);
            }
        }
    }
}
