#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

//! # tesla-can
//!
//! Encoders for the CAN frames used to drive a Tesla actuation interface:
//! steering torque requests, a simulated electronic parking brake (EPB)
//! enable, and simulated cruise-control stalk presses.
//!
//! Every message has a fixed payload layout, a rolling counter and a trailing
//! checksum byte. The builders are pure functions; they hold no state, never
//! allocate and never fail. Sending the frames, choosing when to send them and
//! what to put in them is left to the caller.
//!
//! ## Features
//!
//! - **Encoding**: one builder per message, returning a [`Frame`]
//! - **Verification**: checksum checks and decoding back into typed messages
//! - **Stalk checksum table**: checksums captured from a real stalk, for
//!   cross-checking encoded frames
//! - **embedded-can** (`can` feature): [`Frame`] implements
//!   `embedded_can::Frame`, so it can go straight to a CAN driver
//! - **DBC checks** (`dbc` feature): compare the encoder's layouts with a
//!   vehicle DBC and read signals out of encoded frames
//!
//! Without the `std` feature the crate is `no_std`.
//!
//! ## Quick Start
//!
//! ```
//! use tesla_can::{Counter4, StalkState, build_cruise_stalk, build_steering_control};
//!
//! let mut counter = Counter4::new();
//!
//! let frame = build_steering_control(true, -120, counter.next().unwrap());
//! let (id, qualifier, payload, bus) = frame.into_parts();
//! assert_eq!((id, qualifier, bus), (0x488, 0, 2));
//! assert_eq!(payload.len(), 4);
//!
//! let stalk = build_cruise_stalk(StalkState::Up1st, counter.next().unwrap());
//! assert!(stalk.verify().is_ok());
//! ```
//!
//! ## Message Overview
//!
//! | Message | id | length | bus | counter field |
//! |---------|----|--------|-----|---------------|
//! | Steering control | `0x488` | 4 | 2 | byte 2, low 6 bits |
//! | EPB enable | `0x214` | 3 | 2 | byte 1 |
//! | Cruise stalk | `0x45` | 8 | 0 | byte 6 |
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`checksum`] | The additive checksum shared by all messages |
//! | [`frame`] | [`Frame`] and the payload writer |
//! | [`messages`] | Message layouts, builders and decoders |
//! | [`stalk`] | Stalk states and the observed checksum table |
//! | [`counter`] | Wrapping rolling counters |
//! | `dbc` | DBC layout checks (`dbc` feature) |
//! | [`error`] | Error types and [`Result`] alias |

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod checksum;
pub mod counter;
pub mod error;
pub mod frame;
pub mod messages;
pub mod stalk;

#[cfg(feature = "dbc")]
pub mod dbc;

// Re-export commonly used types at the crate root
pub use checksum::checksum;
pub use counter::{Counter, Counter4, Counter8, SteeringCounter};
pub use error::{Error, Result};
pub use frame::{Frame, Payload};
pub use messages::{
    CruiseStalk, EpbEnable, Message, SteeringControl, build_cruise_stalk, build_epb_enable,
    build_steering_control,
};
pub use stalk::{ChecksumTable, CrossCheck, StalkState, cross_check, observed_checksum};
