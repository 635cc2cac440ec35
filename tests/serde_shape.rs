//! JSON shape of frames and decoded messages.

#![cfg(feature = "serde")]

use tesla_can::{Frame, StalkState, SteeringControl, build_steering_control};

#[test]
fn frame_serializes_payload_as_bytes() {
    let frame = build_steering_control(true, 0, 0);
    let json = serde_json::to_string(&frame).unwrap();
    assert_eq!(
        json,
        r#"{"id":1160,"bus_qualifier":0,"payload":[0,0,64,204],"bus":2}"#
    );

    let back: Frame = serde_json::from_str(&json).unwrap();
    assert_eq!(back, frame);
    assert!(back.verify().is_ok());
}

#[test]
fn oversized_payload_is_rejected() {
    let json = r#"{"id":69,"bus_qualifier":0,"payload":[0,0,0,0,0,0,0,0,0],"bus":0}"#;
    assert!(serde_json::from_str::<Frame>(json).is_err());
}

#[test]
fn wide_id_is_rejected() {
    let json = r#"{"id":4294967295,"bus_qualifier":0,"payload":[1],"bus":0}"#;
    let err = serde_json::from_str::<Frame>(json).unwrap_err();
    assert!(err.to_string().contains("exceeds 29 bits"), "{err}");
}

#[test]
fn non_zero_qualifier_is_rejected() {
    let json = r#"{"id":69,"bus_qualifier":7,"payload":[1],"bus":0}"#;
    let err = serde_json::from_str::<Frame>(json).unwrap_err();
    assert!(err.to_string().contains("address qualifier"), "{err}");

    let json = r#"{"id":4294967295,"bus_qualifier":7,"payload":[1],"bus":0}"#;
    assert!(serde_json::from_str::<Frame>(json).is_err());
}

#[cfg(feature = "can")]
#[test]
fn deserialized_extended_id_reaches_driver() {
    use embedded_can::{ExtendedId, Frame as CanFrame, Id};

    let json = r#"{"id":536870911,"bus_qualifier":0,"payload":[1,2],"bus":1}"#;
    let frame: Frame = serde_json::from_str(json).unwrap();
    assert_eq!(
        CanFrame::id(&frame),
        Id::Extended(ExtendedId::new(0x1FFF_FFFF).unwrap())
    );
}

#[test]
fn stalk_state_uses_dbc_labels() {
    assert_eq!(serde_json::to_string(&StalkState::Up2nd).unwrap(), r#""UP_2ND""#);
    assert_eq!(serde_json::to_string(&StalkState::Idle).unwrap(), r#""IDLE""#);
    let state: StalkState = serde_json::from_str(r#""DN_1ST""#).unwrap();
    assert_eq!(state, StalkState::Dn1st);
}

#[test]
fn steering_control_fields() {
    let msg = SteeringControl {
        enabled: true,
        torque: -7,
        counter: 3,
    };
    assert_eq!(
        serde_json::to_value(msg).unwrap(),
        serde_json::json!({ "enabled": true, "torque": -7, "counter": 3 })
    );
}
