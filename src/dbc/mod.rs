//! DBC cross-checks for the encoded messages.
//!
//! The encoder does not read signal definitions; its layouts are fixed in
//! [`crate::messages`]. This module checks those layouts against a vehicle
//! DBC parsed with [`dbc-rs`](https://crates.io/crates/dbc-rs) and pulls
//! signal values out of encoded frames for inspection.
//!
//! # Example
//!
//! ```
//! use tesla_can::dbc::{self, DBC_FRAGMENT};
//!
//! let dbc = dbc::parse(DBC_FRAGMENT)?;
//! dbc::check_layout(&dbc)?;
//!
//! let frame = tesla_can::build_steering_control(true, -42, 7);
//! let torque = dbc::decode_signal(&dbc, &frame, "DAS_steeringTorqueRequest")?;
//! assert_eq!(torque, -42.0);
//! # Ok::<(), tesla_can::Error>(())
//! ```

mod extract;

pub use extract::{ByteOrder, SignalLayout, extract_raw, sign_extend};

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::frame::Frame;
use crate::messages::{CruiseStalk, EpbEnable, Message, SteeringControl};
use crate::{Error, Result};

/// DBC description of the three messages exactly as this crate encodes them.
pub const DBC_FRAGMENT: &str = r#"VERSION "1.0"

NS_ :

BS_:

BU_: DAS STW

BO_ 69 STW_ACTN_RQ: 8 STW
 SG_ VSL_Enbl_Rq : 1|1@1+ (1,0) [0|1] "" Vector__XXX
 SG_ SpdCtrlLvr_Stat : 2|6@1+ (1,0) [0|63] "" Vector__XXX
 SG_ DTR_Dist_Rq : 8|8@1+ (1,0) [0|255] "" Vector__XXX
 SG_ MC_STW_ACTN_RQ : 48|8@1+ (1,0) [0|255] "" Vector__XXX
 SG_ CRC_STW_ACTN_RQ : 56|8@1+ (1,0) [0|255] "" Vector__XXX

BO_ 532 EPB_epasControl: 3 DAS
 SG_ EPB_epasEnable : 0|8@1+ (1,0) [0|255] "" Vector__XXX
 SG_ EPB_epasControlCounter : 8|8@1+ (1,0) [0|255] "" Vector__XXX
 SG_ EPB_epasControlChecksum : 16|8@1+ (1,0) [0|255] "" Vector__XXX

BO_ 1160 DAS_steeringControl: 4 DAS
 SG_ DAS_steeringTorqueRequest : 7|16@0- (1,0) [-32768|32767] "" Vector__XXX
 SG_ DAS_steeringControlType : 23|2@0+ (1,0) [0|3] "" Vector__XXX
 SG_ DAS_steeringControlCounter : 21|6@0+ (1,0) [0|63] "" Vector__XXX
 SG_ DAS_steeringControlChecksum : 31|8@0+ (1,0) [0|255] "" Vector__XXX

VAL_ 69 SpdCtrlLvr_Stat 32 "DN_1ST" 16 "UP_1ST" 8 "DN_2ND" 4 "UP_2ND" 2 "RWD" 1 "FWD" 0 "IDLE" ;
"#;

/// `(id, name, payload length)` of every message this crate encodes.
pub const MESSAGES: [(u16, &str, usize); 3] = [
    (SteeringControl::ID, SteeringControl::NAME, SteeringControl::LEN),
    (EpbEnable::ID, EpbEnable::NAME, EpbEnable::LEN),
    (CruiseStalk::ID, CruiseStalk::NAME, CruiseStalk::LEN),
];

/// Parse DBC text, keeping the parser's message on failure.
pub fn parse(text: &str) -> Result<dbc_rs::Dbc> {
    dbc_rs::Dbc::parse(text).map_err(|e| Error::Dbc(format!("{e:?}")))
}

/// Check that `dbc` defines every encoded message with the encoded length.
///
/// Message names are not compared, since vehicle DBCs differ in naming.
pub fn check_layout(dbc: &dbc_rs::Dbc) -> Result<()> {
    for (id, name, len) in MESSAGES {
        let message = dbc
            .messages()
            .find_by_id(u32::from(id))
            .ok_or(Error::MissingMessage(u32::from(id)))?;

        if usize::from(message.dlc()) != len {
            tracing::debug!(id, name, dlc = message.dlc(), len, "DBC length differs");
            return Err(Error::LayoutMismatch {
                message: u32::from(id),
                detail: format!("{name}: DBC length {} but encoded length {len}", message.dlc()),
            });
        }
    }
    Ok(())
}

/// Physical value of signal `name` in an encoded frame.
pub fn decode_signal(dbc: &dbc_rs::Dbc, frame: &Frame, name: &str) -> Result<f64> {
    let message = dbc
        .messages()
        .find_by_id(frame.id())
        .ok_or(Error::MissingMessage(frame.id()))?;
    let signal = message
        .signals()
        .find(name)
        .ok_or_else(|| Error::MissingSignal {
            message: frame.id(),
            signal: String::from(name),
        })?;

    Ok(SignalLayout::from_dbc_signal(signal).physical(frame.payload()))
}

/// Physical values of every signal the DBC defines for the frame's message.
pub fn decode_frame(dbc: &dbc_rs::Dbc, frame: &Frame) -> Result<Vec<(String, f64)>> {
    let message = dbc
        .messages()
        .find_by_id(frame.id())
        .ok_or(Error::MissingMessage(frame.id()))?;

    Ok(message
        .signals()
        .iter()
        .map(|signal| {
            let value = SignalLayout::from_dbc_signal(signal).physical(frame.payload());
            (String::from(signal.name()), value)
        })
        .collect())
}
