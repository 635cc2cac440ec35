//! Cruise-control stalk states and the observed stalk checksum table.
//!
//! `STW_ACTN_RQ` frames captured from a real stalk carry a checksum that the
//! additive formula in [`crate::checksum`] does not reproduce. The captured
//! values are kept here as reference data. They are never written into an
//! encoded frame; [`cross_check`] compares an encoded frame against them.

use crate::frame::Frame;
use crate::messages::{CruiseStalk, Message};
use crate::{Error, Result};

/// Value of the `SpdCtrlLvr_Stat` signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[repr(u8)]
pub enum StalkState {
    /// Lever at rest.
    Idle = 0,
    /// Pulled towards the driver.
    Fwd = 1,
    /// Pushed away from the driver.
    Rwd = 2,
    /// Up, past the second detent.
    #[cfg_attr(feature = "serde", serde(rename = "UP_2ND"))]
    Up2nd = 4,
    /// Down, past the second detent.
    #[cfg_attr(feature = "serde", serde(rename = "DN_2ND"))]
    Dn2nd = 8,
    /// Up, first detent.
    #[cfg_attr(feature = "serde", serde(rename = "UP_1ST"))]
    Up1st = 16,
    /// Down, first detent.
    #[cfg_attr(feature = "serde", serde(rename = "DN_1ST"))]
    Dn1st = 32,
}

impl StalkState {
    /// All states in value-table order.
    pub const ALL: [StalkState; 7] = [
        StalkState::Idle,
        StalkState::Fwd,
        StalkState::Rwd,
        StalkState::Up2nd,
        StalkState::Dn2nd,
        StalkState::Up1st,
        StalkState::Dn1st,
    ];

    /// The label used for this state in the DBC value table.
    pub const fn name(self) -> &'static str {
        match self {
            StalkState::Idle => "IDLE",
            StalkState::Fwd => "FWD",
            StalkState::Rwd => "RWD",
            StalkState::Up2nd => "UP_2ND",
            StalkState::Dn2nd => "DN_2ND",
            StalkState::Up1st => "UP_1ST",
            StalkState::Dn1st => "DN_1ST",
        }
    }

    /// Raw signal value.
    #[inline]
    pub const fn raw(self) -> u8 {
        self as u8
    }

    const fn table_row(self) -> Option<usize> {
        match self {
            StalkState::Up2nd => Some(0),
            StalkState::Dn2nd => Some(1),
            StalkState::Up1st => Some(2),
            StalkState::Dn1st => Some(3),
            _ => None,
        }
    }
}

impl From<StalkState> for u8 {
    fn from(state: StalkState) -> u8 {
        state.raw()
    }
}

impl TryFrom<u8> for StalkState {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        StalkState::ALL
            .into_iter()
            .find(|state| state.raw() == value)
            .ok_or(Error::UnknownStalkState(value))
    }
}

impl core::fmt::Display for StalkState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Number of counter values covered by each table row.
pub const COUNTER_RANGE: usize = 16;

/// States that have a row in the table, in row order.
const TABLE_STATES: [StalkState; 4] = [
    StalkState::Up2nd,
    StalkState::Dn2nd,
    StalkState::Up1st,
    StalkState::Dn1st,
];

/// Checksums observed on the bus, indexed by table row then message counter.
/// `None` marks combinations that were never captured.
#[rustfmt::skip]
static OBSERVED: [[Option<u8>; COUNTER_RANGE]; 4] = [
    // UP_2ND
    [
        Some(180), Some(121), Some(51),  Some(254),
        Some(167), Some(106), Some(32),  Some(237),
        Some(146), Some(95),  Some(21),  Some(216),
        Some(129), Some(76),  Some(6),   Some(203),
    ],
    // DN_2ND
    [
        Some(15),  Some(194), Some(136), Some(69),
        Some(28),  Some(209), Some(155), Some(86),
        Some(41),  Some(228), Some(174), Some(99),
        Some(58),  Some(247), Some(189), Some(112),
    ],
    // UP_1ST
    [
        Some(100), Some(169), None,      Some(46),
        Some(119), None,      None,      Some(61),
        Some(66),  Some(143), Some(197), None,
        None,      Some(156), Some(214), Some(27),
    ],
    // DN_1ST
    [
        Some(178), Some(127), Some(53),  None,
        None,      Some(108), Some(38),  Some(235),
        Some(148), Some(89),  Some(19),  Some(222),
        Some(135), Some(74),  Some(0),   Some(205),
    ],
];

/// Read-only view of the observed stalk checksums.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChecksumTable;

impl ChecksumTable {
    /// Observed checksum for `state` at message counter `counter`.
    ///
    /// Returns `None` when the combination was never captured, including for
    /// states without a table row.
    pub fn get(state: StalkState, counter: u8) -> Option<u8> {
        let row = state.table_row()?;
        OBSERVED[row].get(usize::from(counter)).copied().flatten()
    }

    /// Every recorded `(state, counter, checksum)` entry.
    pub fn iter() -> impl Iterator<Item = (StalkState, u8, u8)> {
        TABLE_STATES
            .into_iter()
            .zip(OBSERVED.iter())
            .flat_map(|(state, row)| {
                row.iter()
                    .enumerate()
                    .filter_map(move |(counter, crc)| crc.map(|crc| (state, counter as u8, crc)))
            })
    }

    /// Number of recorded entries.
    pub fn len() -> usize {
        Self::iter().count()
    }
}

/// Observed checksum lookup with a sentinel for missing data.
///
/// Returns 0 when `stalk_state` is not one of the four tabulated states or
/// the counter has no recorded entry. A 0 result therefore means "no data"
/// unless [`ChecksumTable::get`] confirms it (DN_1ST at counter 14 really is
/// 0).
pub fn observed_checksum(stalk_state: u8, counter: u8) -> u8 {
    StalkState::try_from(stalk_state)
        .ok()
        .and_then(|state| ChecksumTable::get(state, counter))
        .unwrap_or(0)
}

/// Outcome of comparing an encoded stalk frame with the observed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossCheck {
    /// No observation exists for this state and counter.
    Unrecorded,
    /// The frame's checksum byte equals the observed one.
    Match,
    /// The frame's checksum byte differs from the observed one.
    Mismatch {
        /// Checksum captured on the bus
        observed: u8,
        /// Checksum carried by the frame
        transmitted: u8,
    },
}

/// Compare the checksum byte of a cruise stalk frame with the observed table.
///
/// Only the id and length are checked; the frame's own checksum byte is what
/// gets compared, whatever it holds.
pub fn cross_check(frame: &Frame) -> Result<CrossCheck> {
    if frame.id() != u32::from(CruiseStalk::ID) {
        return Err(Error::UnexpectedId {
            actual: frame.id(),
            expected: u32::from(CruiseStalk::ID),
        });
    }
    let payload = frame.payload();
    if payload.len() != CruiseStalk::LEN {
        return Err(Error::PayloadLength {
            actual: payload.len(),
            expected: CruiseStalk::LEN,
        });
    }

    let raw_state = payload[CruiseStalk::STATE_OFFSET] >> CruiseStalk::STATE_SHIFT;
    let counter = payload[CruiseStalk::COUNTER_OFFSET];
    let transmitted = payload[CruiseStalk::LEN - 1];

    let observed = StalkState::try_from(raw_state)
        .ok()
        .and_then(|state| ChecksumTable::get(state, counter));

    Ok(match observed {
        None => CrossCheck::Unrecorded,
        Some(observed) if observed == transmitted => CrossCheck::Match,
        Some(observed) => {
            tracing::debug!(
                state = raw_state,
                counter,
                observed,
                transmitted,
                "stalk checksum differs from bus observation"
            );
            CrossCheck::Mismatch {
                observed,
                transmitted,
            }
        }
    })
}
