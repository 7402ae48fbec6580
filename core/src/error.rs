//! Diagnostic outcomes.
//!
//! Every procedure returns `Ok(Report)` or the first [`IctError`] it hit.
//! Errors carry a short code for narrow displays and a description with any
//! measured value formatted in hex.

use crate::core::bus::InterruptLine;

/// Result type shared by every diagnostic step.
pub type IctResult<T = Report> = Result<T, IctError>;

/// Successful outcome of a diagnostic step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub description: String,
}

impl Report {
    /// Plain pass.
    pub fn ok() -> Self {
        Self {
            description: "OK:".to_string(),
        }
    }

    /// Pass that reports a raw byte read from the board.
    pub fn value(data: u8) -> Self {
        Self {
            description: format!("OK:{data:02X}"),
        }
    }

    /// Pass with a free-form note appended.
    pub fn note(note: &str) -> Self {
        Self {
            description: format!("OK:{note}"),
        }
    }
}

/// Opaque failure raised by a bus or peripheral port.
///
/// The core never interprets these; they are handed back to the caller as-is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortFault {
    pub address: Option<u16>,
    pub description: String,
}

impl PortFault {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            address: None,
            description: description.into(),
        }
    }

    pub fn at(address: u16, description: impl Into<String>) -> Self {
        Self {
            address: Some(address),
            description: description.into(),
        }
    }
}

impl std::fmt::Display for PortFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.address {
            Some(address) => write!(f, "{} @{address:04X}", self.description),
            None => f.write_str(&self.description),
        }
    }
}

/// Errors produced by diagnostic steps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IctError {
    /// A waited-for interrupt never appeared. `elapsed_ms` is the time
    /// measured since the last reference point of the protocol.
    Timeout { line: InterruptLine, elapsed_ms: u32 },

    /// An interrupt appeared while it was expected to be absent.
    UnexpectedSignal {
        line: InterruptLine,
        phase: &'static str,
    },

    /// A measured interval fell outside its accepted window.
    OutOfTolerance {
        measured_ms: u32,
        min_ms: u32,
        max_ms: u32,
    },

    /// Data read back did not match what was expected.
    Mismatch {
        address: u16,
        expected: u8,
        actual: u8,
    },

    /// A region table entry breaks the descriptor invariants.
    Region {
        label: &'static str,
        reason: &'static str,
    },

    /// Failure from the bus or peripheral port, propagated unchanged.
    Bus(PortFault),
}

impl IctError {
    /// Short code suitable for a narrow status display.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "TMO",
            Self::UnexpectedSignal { .. } => "SIG",
            Self::OutOfTolerance { .. } => "TOL",
            Self::Mismatch { .. } => "DAT",
            Self::Region { .. } => "REG",
            Self::Bus(_) => "BUS",
        }
    }
}

impl std::fmt::Display for IctError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout { line, elapsed_ms } => {
                write!(f, "E:No {line} after {elapsed_ms:02X} ms")
            }
            Self::UnexpectedSignal { line, phase } => {
                write!(f, "E:Unexpected {line} ({phase})")
            }
            Self::OutOfTolerance {
                measured_ms,
                min_ms,
                max_ms,
            } => write!(
                f,
                "E:Bad period {measured_ms:02X} ms, want {min_ms:02X}-{max_ms:02X}"
            ),
            Self::Mismatch {
                address,
                expected,
                actual,
            } => write!(f, "E:{address:04X} exp {expected:02X} got {actual:02X}"),
            Self::Region { label, reason } => write!(f, "E:Region {label}: {reason}"),
            Self::Bus(fault) => write!(f, "E:{fault}"),
        }
    }
}

impl std::error::Error for IctError {}

impl From<PortFault> for IctError {
    fn from(fault: PortFault) -> Self {
        Self::Bus(fault)
    }
}
