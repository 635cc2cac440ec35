//! Encoded CAN frames.
//!
//! A [`Frame`] is what every builder hands to the transport: an arbitration
//! id, an address qualifier (always 0 here), the payload bytes and the index
//! of the bus to send on. Payloads live inline in an 8-byte buffer, so
//! building a frame never allocates.
//!
//! Payloads are assembled with [`PayloadWriter`], which knows the message
//! length at compile time and rejects out-of-range field offsets during
//! compilation rather than at runtime.

use core::fmt;
use core::ops::{Deref, DerefMut};

use crate::checksum::{checksum, verify};
use crate::{Error, Result};

/// Maximum classic CAN data length in bytes.
pub const MAX_DATA_LEN: usize = 8;

/// Largest 29-bit (extended) arbitration id.
pub const MAX_EXTENDED_ID: u32 = 0x1FFF_FFFF;

/// Largest 11-bit (standard) arbitration id.
pub const MAX_STANDARD_ID: u32 = 0x7FF;

/// Address qualifier passed to the transport alongside every frame.
pub const BUS_QUALIFIER: u8 = 0;

/// Fixed-capacity payload of a classic CAN frame.
///
/// Dereferences to a slice of exactly the used length.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Payload {
    data: [u8; MAX_DATA_LEN],
    len: u8,
}

impl Payload {
    /// Copy `bytes` into a new payload.
    ///
    /// Fails with [`Error::PayloadLength`] if `bytes` is longer than 8.
    pub fn new(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > MAX_DATA_LEN {
            return Err(Error::PayloadLength {
                actual: bytes.len(),
                expected: MAX_DATA_LEN,
            });
        }
        let mut data = [0u8; MAX_DATA_LEN];
        data[..bytes.len()].copy_from_slice(bytes);
        Ok(Self {
            data,
            len: bytes.len() as u8,
        })
    }

    const fn from_array<const N: usize>(bytes: [u8; N]) -> Self {
        const { assert!(N <= MAX_DATA_LEN, "payload longer than a classic CAN frame") };
        let mut data = [0u8; MAX_DATA_LEN];
        let mut i = 0;
        while i < N {
            data[i] = bytes[i];
            i += 1;
        }
        Self { data, len: N as u8 }
    }

    /// The payload bytes.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.len as usize]
    }
}

impl Deref for Payload {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl DerefMut for Payload {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.data[..self.len as usize]
    }
}

impl AsRef<[u8]> for Payload {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X?}", self.as_slice())
    }
}

/// An encoded frame ready for the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawFrame")
)]
pub struct Frame {
    id: u32,
    bus_qualifier: u8,
    payload: Payload,
    bus: u8,
}

impl Frame {
    /// Create a frame from raw parts.
    ///
    /// The address qualifier is always [`BUS_QUALIFIER`]. Fails if `id` does
    /// not fit in 29 bits or `data` is longer than 8 bytes.
    pub fn new(id: u32, bus: u8, data: &[u8]) -> Result<Self> {
        if id > MAX_EXTENDED_ID {
            return Err(Error::InvalidId(id));
        }
        Ok(Self {
            id,
            bus_qualifier: BUS_QUALIFIER,
            payload: Payload::new(data)?,
            bus,
        })
    }

    /// Arbitration id.
    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Address qualifier for the transport.
    #[inline]
    pub fn bus_qualifier(&self) -> u8 {
        self.bus_qualifier
    }

    /// Index of the CAN bus this frame is meant for.
    #[inline]
    pub fn bus(&self) -> u8 {
        self.bus
    }

    /// Payload bytes, including the trailing checksum.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Mutable access to the payload bytes.
    #[inline]
    pub fn payload_mut(&mut self) -> &mut [u8] {
        &mut self.payload
    }

    /// Payload length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Returns true if the frame carries no data.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Check that the last payload byte is the checksum of the bytes before it.
    ///
    /// Only the low 16 bits of the id take part in the checksum.
    pub fn verify(&self) -> Result<()> {
        verify(self.id as u16, &self.payload)
    }

    /// Split the frame into `(id, address qualifier, payload, bus index)`.
    pub fn into_parts(self) -> (u32, u8, Payload, u8) {
        (self.id, self.bus_qualifier, self.payload, self.bus)
    }
}

impl From<Frame> for (u32, u8, Payload, u8) {
    fn from(frame: Frame) -> Self {
        frame.into_parts()
    }
}

/// Builder for a payload of exactly `N` bytes whose last byte is the checksum.
///
/// Field offsets are const parameters. Writing a field that would overlap the
/// checksum byte or run past the end of the payload fails to compile.
///
/// ```
/// use tesla_can::frame::PayloadWriter;
///
/// let frame = PayloadWriter::<3>::new()
///     .put_u8::<0>(1)
///     .put_u8::<1>(5)
///     .finish(0x214, 2);
/// assert_eq!(frame.payload(), &[1, 5, 28]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PayloadWriter<const N: usize> {
    buf: [u8; N],
}

impl<const N: usize> PayloadWriter<N> {
    /// Start a zero-filled payload.
    pub const fn new() -> Self {
        const {
            assert!(N >= 1, "payload needs room for the checksum byte");
            assert!(N <= MAX_DATA_LEN, "payload longer than a classic CAN frame");
        };
        Self { buf: [0u8; N] }
    }

    /// Write one byte at offset `AT`.
    #[inline]
    pub const fn put_u8<const AT: usize>(mut self, value: u8) -> Self {
        const { assert!(AT + 1 < N, "field overlaps the checksum byte") };
        self.buf[AT] = value;
        self
    }

    /// Write a big-endian signed 16-bit value at offsets `AT` and `AT + 1`.
    #[inline]
    pub const fn put_i16_be<const AT: usize>(mut self, value: i16) -> Self {
        const { assert!(AT + 2 < N, "field overlaps the checksum byte") };
        let [hi, lo] = value.to_be_bytes();
        self.buf[AT] = hi;
        self.buf[AT + 1] = lo;
        self
    }

    /// Bytes written so far, checksum slot included.
    pub const fn bytes(&self) -> &[u8; N] {
        &self.buf
    }

    /// Append the checksum and produce the frame.
    pub fn finish(mut self, id: u16, bus: u8) -> Frame {
        let (body, last) = self.buf.split_at_mut(N - 1);
        last[0] = checksum(id, body);

        tracing::trace!(
            id,
            bus,
            len = N,
            checksum = last[0],
            "encoded frame"
        );

        Frame {
            id: u32::from(id),
            bus_qualifier: BUS_QUALIFIER,
            payload: Payload::from_array(self.buf),
            bus,
        }
    }
}

impl<const N: usize> Default for PayloadWriter<N> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// serde support (requires `serde` feature)
// ============================================================================

/// Wire shape of a [`Frame`] before its invariants are checked.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawFrame {
    id: u32,
    bus_qualifier: u8,
    payload: Payload,
    bus: u8,
}

#[cfg(feature = "serde")]
impl TryFrom<RawFrame> for Frame {
    type Error = Error;

    fn try_from(raw: RawFrame) -> Result<Self> {
        if raw.bus_qualifier != BUS_QUALIFIER {
            return Err(Error::InvalidQualifier(raw.bus_qualifier));
        }
        Frame::new(raw.id, raw.bus, &raw.payload)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Payload {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.as_slice())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Payload {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        struct PayloadVisitor;

        impl<'de> serde::de::Visitor<'de> for PayloadVisitor {
            type Value = Payload;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("at most 8 payload bytes")
            }

            fn visit_seq<A: serde::de::SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> core::result::Result<Payload, A::Error> {
                let mut payload = Payload::default();
                while let Some(byte) = seq.next_element::<u8>()? {
                    if payload.len as usize == MAX_DATA_LEN {
                        return Err(serde::de::Error::invalid_length(MAX_DATA_LEN + 1, &self));
                    }
                    payload.data[payload.len as usize] = byte;
                    payload.len += 1;
                }
                Ok(payload)
            }
        }

        deserializer.deserialize_seq(PayloadVisitor)
    }
}

// ============================================================================
// embedded_can integration (requires `can` feature)
// ============================================================================

#[cfg(feature = "can")]
impl embedded_can::Frame for Frame {
    /// Creates a data frame for bus 0.
    fn new(id: impl Into<embedded_can::Id>, data: &[u8]) -> Option<Self> {
        let raw = match id.into() {
            embedded_can::Id::Standard(id) => u32::from(id.as_raw()),
            embedded_can::Id::Extended(id) => id.as_raw(),
        };
        Frame::new(raw, 0, data).ok()
    }

    /// Remote frames are never produced by this encoder.
    fn new_remote(_id: impl Into<embedded_can::Id>, _dlc: usize) -> Option<Self> {
        None
    }

    fn is_extended(&self) -> bool {
        self.id > MAX_STANDARD_ID
    }

    fn is_remote_frame(&self) -> bool {
        false
    }

    fn id(&self) -> embedded_can::Id {
        if let Some(id) = u16::try_from(self.id).ok().and_then(embedded_can::StandardId::new) {
            return embedded_can::Id::Standard(id);
        }
        match embedded_can::ExtendedId::new(self.id) {
            Some(id) => embedded_can::Id::Extended(id),
            // Every constructor rejects ids wider than 29 bits.
            None => unreachable!("frame id {:#x} exceeds 29 bits", self.id),
        }
    }

    fn dlc(&self) -> usize {
        self.payload.len()
    }

    fn data(&self) -> &[u8] {
        &self.payload
    }
}
