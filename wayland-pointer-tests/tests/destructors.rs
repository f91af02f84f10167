mod helpers;

use helpers::{record_events, wayc, TestClient, FIRST_CHILD_ID};
use wayc::{
    protocol::{confined_pointer, locked_pointer},
    session::{SessionState, Termination},
    Proxy,
};

#[test]
fn dead_surface_is_refused() {
    let client = TestClient::new();
    client.conn.forget(&client.surface).unwrap();

    let ret = client.pointer_lock.lock_pointer(&client.conn, &client.surface, &client.seat, None, ());

    assert!(ret.is_err());
    assert!(client.transport.take().is_empty());
}

#[test]
fn dead_region_is_refused() {
    let client = TestClient::new();
    client.conn.forget(&client.region).unwrap();

    let ret = client.pointer_lock.confine_pointer(
        &client.conn,
        &client.surface,
        &client.seat,
        Some(&client.region),
        (),
    );

    assert!(ret.is_err());
    assert!(client.transport.take().is_empty());
    // nothing was allocated for the refused request
    let relative = client
        .relative_pointer_manager
        .get_relative_pointer(&client.conn, &client.pointer, ())
        .unwrap();
    assert_eq!(relative.id().protocol_id(), FIRST_CHILD_ID);
}

#[test]
fn dead_pointer_is_refused() {
    let client = TestClient::new();
    client.conn.forget(&client.pointer).unwrap();

    assert!(client
        .relative_pointer_manager
        .get_relative_pointer(&client.conn, &client.pointer, ())
        .is_err());
    assert!(client.transport.take().is_empty());
}

#[test]
fn manager_destroy_is_local() {
    let client = TestClient::new();
    let locked = client
        .pointer_lock
        .lock_pointer(&client.conn, &client.surface, &client.seat, None, ())
        .unwrap();
    client.transport.take();

    client.pointer_lock.destroy(&client.conn);

    assert!(client.transport.take().is_empty());
    assert!(!client.pointer_lock.is_alive(&client.conn));
    assert!(client
        .pointer_lock
        .lock_pointer(&client.conn, &client.surface, &client.seat, None, ())
        .is_err());

    // sessions outlive the manager
    client.send_event(&locked, locked_pointer::EVT_LOCKED_OPCODE, vec![]).unwrap();
    assert_eq!(locked.state(), Some(SessionState::Active));
    locked.destroy(&client.conn);
    assert_eq!(client.transport.take().len(), 1);
}

#[test]
fn relative_pointer_manager_destroy_is_local() {
    let client = TestClient::new();
    client.relative_pointer_manager.destroy(&client.conn);

    assert!(client.transport.take().is_empty());
    assert!(client
        .relative_pointer_manager
        .get_relative_pointer(&client.conn, &client.pointer, ())
        .is_err());
}

#[test]
fn destroy_is_sent_once() {
    let client = TestClient::new();
    let confined = client
        .pointer_lock
        .confine_pointer(&client.conn, &client.surface, &client.seat, None, ())
        .unwrap();
    client.transport.take();

    confined.destroy(&client.conn);
    confined.destroy(&client.conn);

    let sent = client.transport.take();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].opcode, confined_pointer::REQ_DESTROY_OPCODE);
    assert_eq!(confined.state(), Some(SessionState::Terminated(Termination::Destroyed)));
}

#[test]
fn ids_are_reused_after_delete_id() {
    let client = TestClient::new();
    let first = client
        .relative_pointer_manager
        .get_relative_pointer(&client.conn, &client.pointer, ())
        .unwrap();
    let events = record_events(&first);
    first.release(&client.conn);

    // the id stays reserved until the server acknowledges the release
    let second = client
        .relative_pointer_manager
        .get_relative_pointer(&client.conn, &client.pointer, ())
        .unwrap();
    assert_eq!(second.id().protocol_id(), FIRST_CHILD_ID + 1);

    client.conn.delete_id(FIRST_CHILD_ID).unwrap();
    let third = client
        .relative_pointer_manager
        .get_relative_pointer(&client.conn, &client.pointer, ())
        .unwrap();
    assert_eq!(third.id().protocol_id(), FIRST_CHILD_ID);
    assert_ne!(third, first);
    assert!(!first.is_alive(&client.conn));
    assert!(third.is_alive(&client.conn));

    // events to the reused id reach the new object only
    let third_events = record_events(&third);
    client.send_motion(&third, 5, [(1, 0), (0, 0), (1, 0), (0, 0)]).unwrap();
    assert!(events.lock().unwrap().is_empty());
    assert_eq!(third_events.lock().unwrap().len(), 1);

    // a stale handle cannot send anything
    client.transport.take();
    first.release(&client.conn);
    assert!(client.transport.take().is_empty());
    assert!(third.is_alive(&client.conn));
}

#[test]
fn delete_id_before_destroy_keeps_the_object() {
    let client = TestClient::new();
    let locked = client
        .pointer_lock
        .lock_pointer(&client.conn, &client.surface, &client.seat, None, ())
        .unwrap();

    client.send_event(&locked, locked_pointer::EVT_UNLOCKED_OPCODE, vec![]).unwrap();
    client.conn.delete_id(FIRST_CHILD_ID).unwrap();
    // the client still holds the object until it destroys it
    assert!(locked.is_alive(&client.conn));

    locked.destroy(&client.conn);
    assert!(!locked.is_alive(&client.conn));
    let next = client
        .pointer_lock
        .lock_pointer(&client.conn, &client.surface, &client.seat, None, ())
        .unwrap();
    assert_eq!(next.id().protocol_id(), FIRST_CHILD_ID);
}
