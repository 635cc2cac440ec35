//! `STW_ACTN_RQ`: simulated cruise-control stalk press.
//!
//! The physical stalk sends this message periodically. Injected frames should
//! be sent sparingly so the real stalk keeps working; that policy belongs to
//! whatever schedules transmissions.

use super::{Message, checked_payload, expect_byte};
use crate::frame::{Frame, PayloadWriter};
use crate::stalk::StalkState;
use crate::{Error, Result};

const LEN: usize = 8;
const STATE_OFFSET: usize = 0;
const DISTANCE_OFFSET: usize = 1;
const COUNTER_OFFSET: usize = 6;

/// Cruise stalk action request.
///
/// Layout:
/// - byte 0: `SpdCtrlLvr_Stat << 2`, plus the `VSL_Enbl_Rq` bit
/// - byte 1: `DTR_Dist_Rq`, all ones
/// - bytes 2-5: zero
/// - byte 6: rolling counter
/// - byte 7: checksum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CruiseStalk {
    /// Raw `SpdCtrlLvr_Stat` value.
    pub stalk_state: u8,
    /// Rolling counter.
    pub counter: u8,
}

impl CruiseStalk {
    /// `VSL_Enbl_Rq` bit added to byte 0.
    pub const VSL_ENABLE_REQUEST: u8 = 2;
    /// `DTR_Dist_Rq` value meaning "not applicable".
    pub const DISTANCE_REQUEST_IGNORE: u8 = 255;
    /// Byte holding the stalk state.
    pub const STATE_OFFSET: usize = STATE_OFFSET;
    /// Bit position of the stalk state within byte 0.
    pub const STATE_SHIFT: u8 = 2;
    /// Byte holding the rolling counter.
    pub const COUNTER_OFFSET: usize = COUNTER_OFFSET;

    /// The stalk state as a typed value.
    pub fn state(&self) -> Result<StalkState> {
        StalkState::try_from(self.stalk_state)
    }
}

impl Message for CruiseStalk {
    const ID: u16 = 0x45;
    const LEN: usize = LEN;
    const BUS: u8 = 0;
    const NAME: &'static str = "STW_ACTN_RQ";

    fn encode(&self) -> Frame {
        if self.stalk_state > u8::MAX >> Self::STATE_SHIFT {
            tracing::trace!(
                stalk_state = self.stalk_state,
                "stalk state wider than 6 bits, high bits dropped"
            );
        }
        // Low two bits of the shifted state are clear, so the add cannot carry.
        let state_byte = (self.stalk_state << Self::STATE_SHIFT) + Self::VSL_ENABLE_REQUEST;

        PayloadWriter::<LEN>::new()
            .put_u8::<STATE_OFFSET>(state_byte)
            .put_u8::<DISTANCE_OFFSET>(Self::DISTANCE_REQUEST_IGNORE)
            .put_u8::<COUNTER_OFFSET>(self.counter)
            .finish(Self::ID, Self::BUS)
    }

    fn decode(frame: &Frame) -> Result<Self> {
        let payload = checked_payload::<Self>(frame)?;

        let state_byte = payload[STATE_OFFSET];
        let flag_bits = state_byte & ((1 << Self::STATE_SHIFT) - 1);
        if flag_bits != Self::VSL_ENABLE_REQUEST {
            return Err(Error::InvalidField {
                id: u32::from(Self::ID),
                offset: STATE_OFFSET,
                expected: Self::VSL_ENABLE_REQUEST,
                actual: flag_bits,
            });
        }
        expect_byte::<Self>(payload, DISTANCE_OFFSET, Self::DISTANCE_REQUEST_IGNORE)?;
        for offset in DISTANCE_OFFSET + 1..COUNTER_OFFSET {
            expect_byte::<Self>(payload, offset, 0)?;
        }

        Ok(Self {
            stalk_state: state_byte >> Self::STATE_SHIFT,
            counter: payload[COUNTER_OFFSET],
        })
    }
}

/// Build an `STW_ACTN_RQ` frame for a stalk state.
///
/// Accepts a [`StalkState`] or a raw signal value. The state field is 6 bits
/// wide, so bits 6 and 7 of a raw value are not transmitted.
///
/// ```
/// use tesla_can::{StalkState, build_cruise_stalk};
///
/// let frame = build_cruise_stalk(StalkState::Up2nd, 0);
/// assert_eq!(frame.payload()[..7], [18, 255, 0, 0, 0, 0, 0]);
/// ```
pub fn build_cruise_stalk(stalk_state: impl Into<u8>, counter: u8) -> Frame {
    CruiseStalk {
        stalk_state: stalk_state.into(),
        counter,
    }
    .encode()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::checksum;

    #[test]
    fn test_up_2nd_counter_zero() {
        let frame = build_cruise_stalk(4u8, 0);
        let p = frame.payload();
        assert_eq!(frame.id(), 0x45);
        assert_eq!(frame.bus(), 0);
        assert_eq!(p.len(), 8);
        assert_eq!(p[0], 18);
        assert_eq!(p[1], 255);
        assert_eq!(&p[2..6], &[0, 0, 0, 0]);
        assert_eq!(p[6], 0);
        assert_eq!(p[7], checksum(0x45, &p[..7]));
        assert_eq!(p[7], 86);
    }

    #[test]
    fn test_state_high_bits_dropped() {
        let wide = build_cruise_stalk(0x44u8, 3);
        let narrow = build_cruise_stalk(4u8, 3);
        assert_eq!(wide.payload()[0], 18);
        assert_eq!(wide, narrow);
    }

    #[test]
    fn test_typed_and_raw_state_agree() {
        for state in StalkState::ALL {
            assert_eq!(
                build_cruise_stalk(state, 9),
                build_cruise_stalk(state.raw(), 9)
            );
        }
    }

    #[test]
    fn test_dn_1st_state_byte() {
        let frame = build_cruise_stalk(StalkState::Dn1st, 3);
        assert_eq!(frame.payload()[0], 130);
        assert_eq!(frame.payload()[6], 3);
    }

    #[test]
    fn test_decode() {
        let frame = build_cruise_stalk(StalkState::Dn2nd, 11);
        let decoded = CruiseStalk::decode(&frame).unwrap();
        assert_eq!(decoded.stalk_state, 8);
        assert_eq!(decoded.counter, 11);
        assert_eq!(decoded.state().unwrap(), StalkState::Dn2nd);
    }

    #[test]
    fn test_decode_rejects_distance_request() {
        let mut bytes = [18, 0, 0, 0, 0, 0, 0, 0];
        bytes[7] = checksum(0x45, &bytes[..7]);
        let frame = Frame::new(0x45, 0, &bytes).unwrap();
        assert!(matches!(
            CruiseStalk::decode(&frame),
            Err(Error::InvalidField { offset: 1, .. })
        ));
    }
}
