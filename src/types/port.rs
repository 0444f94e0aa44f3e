//! Port type with validation and lenient list parsing.
//!
//! The `Port` newtype ensures values are always valid TCP port numbers
//! (1-65535). `parse_port_list` handles the comma-separated request
//! format, silently dropping invalid entries rather than erroring.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated network port number (1-65535).
///
/// Using a newtype prevents accidental misuse of raw u16 values
/// and ensures port numbers are always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Port(u16);

impl Port {
    /// Minimum valid port number.
    pub const MIN: u16 = 1;
    /// Maximum valid port number.
    pub const MAX: u16 = 65535;

    /// Create a new Port from a u16, returning None if invalid.
    #[inline]
    pub const fn new(port: u16) -> Option<Self> {
        if port >= Self::MIN {
            Some(Self(port))
        } else {
            None
        }
    }

    /// Create a Port without validation. Use only when the value is known valid.
    #[inline]
    pub const fn new_unchecked(port: u16) -> Self {
        Self(port)
    }

    /// Get the raw port number.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for Port {
    type Error = PortError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(PortError::OutOfRange(value as u32))
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.0
    }
}

/// Error type for port validation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PortError {
    #[error("port {0} is out of valid range (1-65535)")]
    OutOfRange(u32),
}

/// Parse a comma-separated port list, dropping invalid entries.
///
/// Values that fail to parse as integers or fall outside [1, 65535]
/// are skipped silently. An empty or all-invalid input yields an
/// empty vector, which callers treat as "use the default port set".
/// Input order and duplicates are preserved.
pub fn parse_port_list(input: &str) -> Vec<Port> {
    input
        .split(',')
        .filter_map(|part| {
            let value: u32 = part.trim().parse().ok()?;
            if value >= Port::MIN as u32 && value <= Port::MAX as u32 {
                Some(Port::new_unchecked(value as u16))
            } else {
                None
            }
        })
        .collect()
}
