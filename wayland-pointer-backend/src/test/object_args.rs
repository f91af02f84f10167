use std::sync::Arc;

use super::*;
use crate::protocol::Argument;

#[test]
fn constructor_allocates_child_and_resolves_ids() {
    let fixture = Fixture::new();
    let child = fixture.create_child(Arc::new(RecordingData::default()));

    assert_eq!(child.interface().name, "test_child");
    assert_eq!(child.protocol_id(), 4);
    let info = fixture.backend.info(child.clone()).unwrap();
    assert_eq!(info.version, 1);

    let sent = fixture.transport.take();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].sender_id, fixture.global.protocol_id());
    assert_eq!(sent[0].opcode, 0);
    assert_eq!(
        &sent[0].args[..],
        &[
            Argument::NewId(4),
            Argument::Object(fixture.surface.protocol_id()),
            Argument::Object(0),
        ]
    );
}

#[test]
fn nullable_argument_accepts_live_object() {
    let fixture = Fixture::new();
    fixture
        .backend
        .send_request(
            message!(
                fixture.global.clone(),
                0,
                [
                    Argument::NewId(ObjectId::null()),
                    Argument::Object(fixture.surface.clone()),
                    Argument::Object(fixture.region.clone()),
                ],
            ),
            Some(Arc::new(RecordingData::default())),
            None,
        )
        .unwrap();

    let sent = fixture.transport.take();
    assert_eq!(sent[0].args[2], Argument::Object(fixture.region.protocol_id()));
}

#[test]
fn dead_argument_is_rejected_before_sending() {
    let fixture = Fixture::new();
    fixture.backend.forget(fixture.surface.clone()).unwrap();
    let ret = fixture.backend.send_request(
        message!(
            fixture.global.clone(),
            0,
            [
                Argument::NewId(ObjectId::null()),
                Argument::Object(fixture.surface.clone()),
                Argument::Object(ObjectId::null()),
            ],
        ),
        Some(Arc::new(RecordingData::default())),
        None,
    );

    assert!(ret.is_err());
    assert!(fixture.transport.take().is_empty());
}

#[test]
fn fixed_and_int_arguments_pass_through() {
    let fixture = Fixture::new();
    let child = fixture.create_child(Arc::new(RecordingData::default()));
    fixture.transport.take();

    fixture
        .backend
        .send_request(
            message!(child, 0, [Argument::Fixed(crate::fixed::fixed_from_f64(-2.5)), Argument::Int(7)]),
            None,
            None,
        )
        .unwrap();

    let sent = fixture.transport.take();
    assert_eq!(&sent[0].args[..], &[Argument::Fixed(-640), Argument::Int(7)]);
}

#[test]
#[should_panic]
fn wrong_interface_argument_panics() {
    let fixture = Fixture::new();
    // the region goes where a surface is expected
    let _ = fixture.backend.send_request(
        message!(
            fixture.global.clone(),
            0,
            [
                Argument::NewId(ObjectId::null()),
                Argument::Object(fixture.region.clone()),
                Argument::Object(ObjectId::null()),
            ],
        ),
        Some(Arc::new(RecordingData::default())),
        None,
    );
}

#[test]
#[should_panic]
fn null_for_non_nullable_argument_panics() {
    let fixture = Fixture::new();
    let _ = fixture.backend.send_request(
        message!(
            fixture.global.clone(),
            0,
            [
                Argument::NewId(ObjectId::null()),
                Argument::Object(ObjectId::null()),
                Argument::Object(ObjectId::null()),
            ],
        ),
        Some(Arc::new(RecordingData::default())),
        None,
    );
}

#[test]
#[should_panic]
fn request_above_object_version_panics() {
    let fixture = Fixture::new();
    let _ = fixture.backend.send_request(message!(fixture.global.clone(), 1, [Argument::Uint(1)]), None, None);
}

#[test]
#[should_panic]
fn adopting_unsupported_version_panics() {
    let fixture = Fixture::new();
    fixture.backend.adopt(&TEST_GLOBAL_INTERFACE, 3, Arc::new(RecordingData::default()));
}
