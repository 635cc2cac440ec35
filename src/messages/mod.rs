//! Message layouts.
//!
//! Each message type knows its arbitration id, payload length and bus index,
//! and can encode itself into a [`Frame`] or be decoded back from one. The
//! free functions [`build_steering_control`], [`build_epb_enable`] and
//! [`build_cruise_stalk`] are thin wrappers for callers that only need frames.
//!
//! | Message | id | length | bus | counter |
//! |---|---|---|---|---|
//! | [`SteeringControl`] | `0x488` | 4 | 2 | byte 2, low 6 bits |
//! | [`EpbEnable`] | `0x214` | 3 | 2 | byte 1 |
//! | [`CruiseStalk`] | `0x45` | 8 | 0 | byte 6 |

mod cruise_stalk;
mod epb;
mod steering;

pub use cruise_stalk::{CruiseStalk, build_cruise_stalk};
pub use epb::{EpbEnable, build_epb_enable};
pub use steering::{SteeringControl, build_steering_control};

use crate::checksum::verify;
use crate::frame::Frame;
use crate::{Error, Result};

/// A fixed-layout message with a trailing checksum byte.
pub trait Message: Sized {
    /// Arbitration id.
    const ID: u16;
    /// Payload length in bytes, checksum included.
    const LEN: usize;
    /// Bus index the frame is sent on.
    const BUS: u8;
    /// Message name in the vehicle DBC.
    const NAME: &'static str;

    /// Encode into a frame.
    fn encode(&self) -> Frame;

    /// Decode a frame, checking id, length, checksum and fixed fields.
    fn decode(frame: &Frame) -> Result<Self>;

    /// Returns true if `frame` carries this message's id.
    fn matches(frame: &Frame) -> bool {
        frame.id() == u32::from(Self::ID)
    }
}

/// Check id, length and checksum, and return the payload.
pub(crate) fn checked_payload<M: Message>(frame: &Frame) -> Result<&[u8]> {
    if !M::matches(frame) {
        return Err(Error::UnexpectedId {
            actual: frame.id(),
            expected: u32::from(M::ID),
        });
    }
    let payload = frame.payload();
    if payload.len() != M::LEN {
        return Err(Error::PayloadLength {
            actual: payload.len(),
            expected: M::LEN,
        });
    }
    verify(M::ID, payload)?;
    Ok(payload)
}

/// Check that a fixed field holds the value the encoder writes.
pub(crate) fn expect_byte<M: Message>(payload: &[u8], offset: usize, expected: u8) -> Result<()> {
    let actual = payload[offset];
    if actual == expected {
        Ok(())
    } else {
        Err(Error::InvalidField {
            id: u32::from(M::ID),
            offset,
            expected,
            actual,
        })
    }
}
