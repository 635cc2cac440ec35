//! `EPB_epasControl`: simulated parking-brake enable.

use super::{Message, checked_payload, expect_byte};
use crate::frame::{Frame, PayloadWriter};
use crate::Result;

const LEN: usize = 3;

/// Parking-brake enable event. There is no disable form; repeated frames
/// re-assert enable with an advancing counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpbEnable {
    /// Rolling counter.
    pub counter: u8,
}

impl EpbEnable {
    /// Value of the enable flag in byte 0.
    pub const ENABLE: u8 = 1;
}

impl Message for EpbEnable {
    const ID: u16 = 0x214;
    const LEN: usize = LEN;
    const BUS: u8 = 2;
    const NAME: &'static str = "EPB_epasControl";

    fn encode(&self) -> Frame {
        PayloadWriter::<LEN>::new()
            .put_u8::<0>(Self::ENABLE)
            .put_u8::<1>(self.counter)
            .finish(Self::ID, Self::BUS)
    }

    fn decode(frame: &Frame) -> Result<Self> {
        let payload = checked_payload::<Self>(frame)?;
        expect_byte::<Self>(payload, 0, Self::ENABLE)?;
        Ok(Self {
            counter: payload[1],
        })
    }
}

/// Build an `EPB_epasControl` enable frame.
pub fn build_epb_enable(counter: u8) -> Frame {
    EpbEnable { counter }.encode()
}
