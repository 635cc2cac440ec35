//! Error types for frame verification and decoding.
//!
//! The builders themselves never fail. This module defines the [`Error`] enum
//! returned by the checking side of the crate: verifying a received frame,
//! decoding it back into its fields, or comparing the encoder's layouts
//! against a DBC file.
//!
//! # Example
//!
//! ```
//! use tesla_can::{Error, Message, SteeringControl};
//!
//! let mut frame = tesla_can::build_steering_control(true, 120, 3);
//! frame.payload_mut()[3] ^= 0xFF;
//!
//! match SteeringControl::decode(&frame) {
//!     Err(Error::ChecksumMismatch { expected, actual, .. }) => {
//!         assert_ne!(expected, actual);
//!     }
//!     other => panic!("unexpected result: {other:?}"),
//! }
//! ```

use core::fmt;

#[cfg(feature = "dbc")]
use alloc::string::String;

/// Errors reported when checking or decoding frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The payload length does not match what the message type requires.
    ///
    /// Also returned when a raw frame is built with more than 8 data bytes.
    PayloadLength {
        /// Number of bytes that were supplied
        actual: usize,
        /// Number of bytes the message type requires
        expected: usize,
    },

    /// The arbitration id does not fit in 29 bits.
    InvalidId(u32),

    /// The address qualifier is not the one every frame carries.
    InvalidQualifier(u8),

    /// The frame carries a different arbitration id than the decoder handles.
    UnexpectedId {
        /// The id found in the frame
        actual: u32,
        /// The id the decoder expected
        expected: u32,
    },

    /// The trailing checksum byte disagrees with the computed checksum.
    ChecksumMismatch {
        /// Arbitration id of the frame
        id: u32,
        /// Checksum computed over the preceding bytes
        expected: u8,
        /// Checksum byte carried by the frame
        actual: u8,
    },

    /// A fixed field holds a value this encoder never produces.
    InvalidField {
        /// Arbitration id of the frame
        id: u32,
        /// Byte offset of the field
        offset: usize,
        /// Value the encoder writes there
        expected: u8,
        /// Value found in the frame
        actual: u8,
    },

    /// A raw value that is not part of the `SpdCtrlLvr_Stat` value table.
    UnknownStalkState(u8),

    /// The DBC text could not be parsed.
    #[cfg(feature = "dbc")]
    Dbc(String),

    /// The DBC has no message with this id.
    #[cfg(feature = "dbc")]
    MissingMessage(u32),

    /// The DBC message has no signal with this name.
    #[cfg(feature = "dbc")]
    MissingSignal {
        /// Message id that was searched
        message: u32,
        /// Signal name that was not found
        signal: String,
    },

    /// The DBC describes a message differently from how it is encoded here.
    #[cfg(feature = "dbc")]
    LayoutMismatch {
        /// Message id with the disagreement
        message: u32,
        /// What disagrees
        detail: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::PayloadLength { actual, expected } => write!(
                f,
                "Invalid payload length: expected {expected} bytes, got {actual}"
            ),
            Error::InvalidId(id) => write!(f, "Arbitration id {id:#x} exceeds 29 bits"),
            Error::InvalidQualifier(value) => {
                write!(f, "Invalid address qualifier: expected 0, got {value}")
            }
            Error::UnexpectedId { actual, expected } => write!(
                f,
                "Unexpected message id: expected {expected:#x}, got {actual:#x}"
            ),
            Error::ChecksumMismatch {
                id,
                expected,
                actual,
            } => write!(
                f,
                "Checksum mismatch for {id:#x}: computed {expected:#04x}, frame carries {actual:#04x}"
            ),
            Error::InvalidField {
                id,
                offset,
                expected,
                actual,
            } => write!(
                f,
                "Unexpected value in {id:#x} byte {offset}: expected {expected:#04x}, got {actual:#04x}"
            ),
            Error::UnknownStalkState(value) => {
                write!(f, "Unknown cruise stalk state: {value}")
            }
            #[cfg(feature = "dbc")]
            Error::Dbc(msg) => write!(f, "DBC parse error: {msg}"),
            #[cfg(feature = "dbc")]
            Error::MissingMessage(id) => write!(f, "DBC has no message {id:#x}"),
            #[cfg(feature = "dbc")]
            Error::MissingSignal { message, signal } => {
                write!(f, "DBC message {message:#x} has no signal {signal:?}")
            }
            #[cfg(feature = "dbc")]
            Error::LayoutMismatch { message, detail } => {
                write!(f, "DBC layout mismatch for {message:#x}: {detail}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// A specialized Result type for frame checks.
///
/// This is defined as `core::result::Result<T, Error>` for convenience.
pub type Result<T> = core::result::Result<T, Error>;
