//! `DAS_steeringControl`: steering torque request.

use super::{Message, checked_payload};
use crate::frame::{Frame, PayloadWriter};
use crate::{Error, Result};

const LEN: usize = 4;

/// Steering torque request sent to the steering ECU.
///
/// Layout, big-endian:
/// - bytes 0-1: torque request, signed 16-bit
/// - byte 2: control type in bits 6-7, rolling counter in bits 0-5
/// - byte 3: checksum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SteeringControl {
    /// Whether the torque request is active.
    pub enabled: bool,
    /// Requested torque, raw units.
    pub torque: i16,
    /// Rolling counter. Only the low 6 bits are transmitted.
    pub counter: u8,
}

impl SteeringControl {
    /// Control type written when the request is active.
    pub const CONTROL_TYPE_ACTIVE: u8 = 1;
    /// Control type written when the request is passive.
    pub const CONTROL_TYPE_PASSIVE: u8 = 0;
    /// Bit position of the control type within byte 2.
    pub const CONTROL_TYPE_SHIFT: u8 = 6;
    /// Mask of the counter bits within byte 2.
    pub const COUNTER_MASK: u8 = 0x3F;
}

impl Message for SteeringControl {
    const ID: u16 = 0x488;
    const LEN: usize = LEN;
    const BUS: u8 = 2;
    const NAME: &'static str = "DAS_steeringControl";

    fn encode(&self) -> Frame {
        let control_type = if self.enabled {
            Self::CONTROL_TYPE_ACTIVE
        } else {
            Self::CONTROL_TYPE_PASSIVE
        };
        let type_counter = (control_type << Self::CONTROL_TYPE_SHIFT) | (self.counter & Self::COUNTER_MASK);

        PayloadWriter::<LEN>::new()
            .put_i16_be::<0>(self.torque)
            .put_u8::<2>(type_counter)
            .finish(Self::ID, Self::BUS)
    }

    fn decode(frame: &Frame) -> Result<Self> {
        let payload = checked_payload::<Self>(frame)?;

        let control_type = payload[2] >> Self::CONTROL_TYPE_SHIFT;
        if control_type > Self::CONTROL_TYPE_ACTIVE {
            return Err(Error::InvalidField {
                id: u32::from(Self::ID),
                offset: 2,
                expected: Self::CONTROL_TYPE_ACTIVE,
                actual: control_type,
            });
        }

        Ok(Self {
            enabled: control_type == Self::CONTROL_TYPE_ACTIVE,
            torque: i16::from_be_bytes([payload[0], payload[1]]),
            counter: payload[2] & Self::COUNTER_MASK,
        })
    }
}

/// Build a `DAS_steeringControl` frame.
///
/// `counter` is masked to 6 bits; wrapping it is up to the caller.
pub fn build_steering_control(enabled: bool, torque: i16, counter: u8) -> Frame {
    SteeringControl {
        enabled,
        torque,
        counter,
    }
    .encode()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::checksum;

    #[test]
    fn test_enabled_zero_torque() {
        let frame = build_steering_control(true, 0, 0);
        assert_eq!(frame.id(), 0x488);
        assert_eq!(frame.bus(), 2);
        assert_eq!(frame.bus_qualifier(), 0);
        assert_eq!(
            frame.payload(),
            &[0x00, 0x00, 0x40, checksum(0x488, &[0x00, 0x00, 0x40])]
        );
        assert_eq!(frame.payload()[3], 0xCC);
    }

    #[test]
    fn test_disabled_clears_type_bits() {
        let frame = build_steering_control(false, 0, 0);
        assert_eq!(frame.payload()[2], 0x00);
    }

    #[test]
    fn test_negative_torque_is_big_endian() {
        let frame = build_steering_control(true, -300, 5);
        assert_eq!(&frame.payload()[..2], &(-300i16).to_be_bytes());
        assert_eq!(frame.payload()[2], 0x45);
    }

    #[test]
    fn test_counter_masked_to_six_bits() {
        let frame = build_steering_control(false, 0, 0x7F);
        assert_eq!(frame.payload()[2], 0x3F);
        let frame = build_steering_control(true, 0, 0xC1);
        assert_eq!(frame.payload()[2], 0x41);
    }

    #[test]
    fn test_decode() {
        let frame = build_steering_control(true, 1234, 15);
        let decoded = SteeringControl::decode(&frame).unwrap();
        assert_eq!(
            decoded,
            SteeringControl {
                enabled: true,
                torque: 1234,
                counter: 15
            }
        );
    }

    #[test]
    fn test_decode_rejects_unknown_control_type() {
        // Control type 2, counter 5.
        let body = [0x00, 0x0A, 0x85];
        let data = [body[0], body[1], body[2], checksum(0x488, &body)];
        let frame = Frame::new(0x488, 2, &data).unwrap();
        assert!(frame.verify().is_ok());

        assert_eq!(
            SteeringControl::decode(&frame),
            Err(Error::InvalidField {
                id: 0x488,
                offset: 2,
                expected: SteeringControl::CONTROL_TYPE_ACTIVE,
                actual: 2,
            })
        );
    }

    #[test]
    fn test_decode_passive() {
        let frame = build_steering_control(false, -10, 63);
        let decoded = SteeringControl::decode(&frame).unwrap();
        assert!(!decoded.enabled);
        assert_eq!(decoded.encode(), frame);
    }
}
