//! Additive message checksum.
//!
//! Every message produced by this crate ends in a one-byte checksum. The sum
//! is seeded with both bytes of the arbitration id and folds in each data byte
//! modulo 256.

use crate::{Error, Result};

/// Compute the checksum of `bytes` for the message with the given id.
///
/// `bytes` are the payload bytes that precede the checksum byte. Any length,
/// including empty, is valid.
///
/// ```
/// assert_eq!(tesla_can::checksum(0x214, &[1, 5]), 28);
/// ```
#[inline]
pub const fn checksum(message_id: u16, bytes: &[u8]) -> u8 {
    let [hi, lo] = message_id.to_be_bytes();
    let mut sum = lo.wrapping_add(hi);
    let mut i = 0;
    while i < bytes.len() {
        sum = sum.wrapping_add(bytes[i]);
        i += 1;
    }
    sum
}

/// Check that the last byte of `payload` is the checksum of the bytes before it.
///
/// An empty payload has no checksum byte and is reported as a length error.
pub fn verify(message_id: u16, payload: &[u8]) -> Result<()> {
    let Some((&actual, body)) = payload.split_last() else {
        return Err(Error::PayloadLength {
            actual: 0,
            expected: 1,
        });
    };

    let expected = checksum(message_id, body);
    if actual == expected {
        Ok(())
    } else {
        tracing::debug!(
            id = message_id,
            expected,
            actual,
            "checksum verification failed"
        );
        Err(Error::ChecksumMismatch {
            id: u32::from(message_id),
            expected,
            actual,
        })
    }
}
