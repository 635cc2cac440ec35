//! Encoded frames read back through the DBC fragment.

#![cfg(feature = "dbc")]

use tesla_can::dbc::{self, DBC_FRAGMENT};
use tesla_can::{Counter4, StalkState, build_cruise_stalk, build_epb_enable, build_steering_control};

#[test]
fn fragment_agrees_with_encoder() -> tesla_can::Result<()> {
    let dbc = dbc::parse(DBC_FRAGMENT)?;
    dbc::check_layout(&dbc)?;
    assert_eq!(dbc.messages().len(), 3);
    Ok(())
}

#[test]
fn counters_read_back_through_dbc() -> tesla_can::Result<()> {
    let dbc = dbc::parse(DBC_FRAGMENT)?;

    for counter in Counter4::new().take(16) {
        let steering = build_steering_control(counter % 2 == 0, i16::from(counter) * -100, counter);
        assert_eq!(
            dbc::decode_signal(&dbc, &steering, "DAS_steeringControlCounter")?,
            f64::from(counter)
        );
        assert_eq!(
            dbc::decode_signal(&dbc, &steering, "DAS_steeringTorqueRequest")?,
            f64::from(i16::from(counter) * -100)
        );

        let epb = build_epb_enable(counter);
        assert_eq!(
            dbc::decode_signal(&dbc, &epb, "EPB_epasControlCounter")?,
            f64::from(counter)
        );

        let stalk = build_cruise_stalk(StalkState::Dn2nd, counter);
        assert_eq!(
            dbc::decode_signal(&dbc, &stalk, "MC_STW_ACTN_RQ")?,
            f64::from(counter)
        );
    }
    Ok(())
}

#[test]
fn checksum_signal_is_last_byte() -> tesla_can::Result<()> {
    let dbc = dbc::parse(DBC_FRAGMENT)?;
    let frame = build_cruise_stalk(StalkState::Up2nd, 9);
    let values = dbc::decode_frame(&dbc, &frame)?;
    let crc = values
        .iter()
        .find(|(name, _)| name == "CRC_STW_ACTN_RQ")
        .map(|(_, value)| *value);
    assert_eq!(crc, Some(f64::from(frame.payload()[7])));
    Ok(())
}
