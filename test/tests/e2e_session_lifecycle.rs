//! END-TO-END TESTS: full sessions over the in-memory transport
//!
//! Every test drives real `Session`s; nothing is mocked beyond the network.
use std::{cell::RefCell, rc::Rc};

use tether_client::{
    transport::ClientTransport, ConnectEvent, ConnectionFailedEvent, DespawnEvent,
    DisconnectEvent, TickEvent,
};
use tether_server::{transport::ServerTransport, JoinEvent, LeaveEvent, TimeoutEvent};
use tether_session::{Role, Session, SessionError};
use tether_shared::{ConnectionId, ControlMessage, JoinMessage, NetEntity};
use tether_test::{
    pending_session, pump, test_session, LocalHub, PendingClientTransport, TICK_INTERVAL,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn mirrored(session: &Session) -> Vec<ConnectionId> {
    session
        .peer_registry()
        .map(|registry| registry.connection_ids())
        .unwrap_or_default()
}

fn hosted(session: &Session) -> Vec<ConnectionId> {
    session
        .authority_registry()
        .map(|registry| registry.entities().map(|entity| entity.connection_id()).collect())
        .unwrap_or_default()
}

#[test]
fn peers_join_and_mirror_each_other() {
    init_logging();
    let hub = LocalHub::new();
    let mut host = test_session(&hub, "host", "Host", 1);
    let mut alice = test_session(&hub, "alice", "Alice", 111);
    let mut bob = test_session(&hub, "bob", "Bob", 222);

    host.start_hosting().unwrap();
    alice.connect("host").unwrap();
    pump(&mut [&mut host, &mut alice], 3);

    bob.connect("host").unwrap();
    let mut events = pump(&mut [&mut host, &mut alice, &mut bob], 3);

    let alice_id = ConnectionId::new(1);
    let bob_id = ConnectionId::new(2);
    assert!(alice.is_connected());
    assert!(bob.is_connected());
    assert_eq!(hosted(&host), vec![alice_id, bob_id]);

    // nobody mirrors themselves
    assert_eq!(mirrored(&alice), vec![bob_id]);
    assert_eq!(mirrored(&bob), vec![alice_id]);

    let alice_mirror = bob.peer_registry().unwrap().mirror(&alice_id).unwrap();
    assert_eq!(alice_mirror.display_name(), "Alice");
    assert_eq!(alice_mirror.account_id(), 111);

    let joined: Vec<ConnectionId> = events[0].host().read::<JoinEvent>().collect();
    assert_eq!(joined, vec![bob_id]);
}

#[test]
fn peer_leaving_despawns_everywhere() {
    init_logging();
    let hub = LocalHub::new();
    let mut host = test_session(&hub, "host", "Host", 1);
    let mut alice = test_session(&hub, "alice", "Alice", 111);
    let mut bob = test_session(&hub, "bob", "Bob", 222);

    host.start_hosting().unwrap();
    alice.connect("host").unwrap();
    bob.connect("host").unwrap();
    pump(&mut [&mut host, &mut alice, &mut bob], 4);
    assert_eq!(mirrored(&alice).len(), 1);

    assert_eq!(bob.disconnect(), 1);
    assert!(!bob.is_connected());
    assert!(bob.peer_registry().is_none());

    let mut events = pump(&mut [&mut host, &mut alice], 3);

    assert_eq!(hosted(&host), vec![ConnectionId::new(1)]);
    assert!(mirrored(&alice).is_empty());
    assert_eq!(events[0].host().read::<LeaveEvent>().count(), 1);
    let despawned: Vec<ConnectionId> = events[1]
        .peer()
        .read::<DespawnEvent>()
        .map(|mirror| mirror.connection_id())
        .collect();
    assert_eq!(despawned, vec![ConnectionId::new(2)]);
}

#[test]
fn vanished_peer_is_cleaned_up() {
    init_logging();
    let hub = LocalHub::new();
    let mut host = test_session(&hub, "host", "Host", 1);
    let mut alice = test_session(&hub, "alice", "Alice", 111);

    let mut vanishing = hub.client();
    host.start_hosting().unwrap();
    alice.connect("host").unwrap();
    vanishing.connect_to("host").unwrap();
    pump(&mut [&mut host, &mut alice], 2);

    let join = ControlMessage::Join(JoinMessage::new("Ghost", 9));
    vanishing.send(&join.encode(), join.delivery_mode()).unwrap();
    pump(&mut [&mut host, &mut alice], 3);
    assert_eq!(hosted(&host).len(), 2);
    assert_eq!(mirrored(&alice).len(), 1);

    vanishing.vanish();
    pump(&mut [&mut host, &mut alice], 3);

    assert_eq!(hosted(&host).len(), 1);
    assert!(mirrored(&alice).is_empty());
}

#[test]
fn stop_hosting_tears_everything_down() {
    init_logging();
    let hub = LocalHub::new();
    let mut host = test_session(&hub, "host", "Host", 1);
    let mut peers: Vec<Session> = (0..3)
        .map(|i| test_session(&hub, &format!("peer{}", i), "Peer", i))
        .collect();

    host.start_hosting().unwrap();
    for peer in peers.iter_mut() {
        peer.connect("host").unwrap();
    }
    {
        let mut sessions: Vec<&mut Session> = vec![&mut host];
        sessions.extend(peers.iter_mut());
        pump(&mut sessions, 4);
    }
    assert_eq!(hosted(&host).len(), 3);

    assert_eq!(host.stop_hosting(), 3);
    assert!(!host.is_hosting());
    assert!(host.authority_registry().is_none());
    assert!(!hub.server("host").is_listening());

    let mut sessions: Vec<&mut Session> = peers.iter_mut().collect();
    let mut events = pump(&mut sessions, 2);
    for (peer, events) in peers.iter().zip(events.iter_mut()) {
        assert!(!peer.is_connected());
        assert!(events.peer().has::<DisconnectEvent>());
    }
}

#[test]
fn hosting_twice_is_refused() {
    let hub = LocalHub::new();
    let mut host = test_session(&hub, "host", "Host", 1);
    let mut squatter = test_session(&hub, "host", "Squatter", 2);

    host.start_hosting().unwrap();
    assert_eq!(host.start_hosting(), Err(SessionError::AlreadyHosting));
    assert!(matches!(
        squatter.start_hosting(),
        Err(SessionError::Transport(_))
    ));
    assert!(!squatter.is_hosting());
}

#[test]
fn connection_failure_changes_nothing() {
    let hub = LocalHub::new();
    let mut alice = test_session(&hub, "alice", "Alice", 111);

    alice.connect("nowhere").unwrap();
    assert_eq!(alice.connect("nowhere"), Err(SessionError::AlreadyConnected));
    assert!(!alice.is_connected());

    let mut events = alice.update(TICK_INTERVAL);

    let failures: Vec<String> = events.peer().read::<ConnectionFailedEvent>().collect();
    assert_eq!(failures.len(), 1);
    assert!(matches!(alice.role(), Role::Inactive));
    assert!(alice.peer_registry().is_none());
}

#[test]
fn host_can_join_itself() {
    init_logging();
    let hub = LocalHub::new();
    let mut host = test_session(&hub, "host", "Host", 1);
    let mut alice = test_session(&hub, "alice", "Alice", 111);

    host.start_hosting().unwrap();
    host.connect("host").unwrap();
    alice.connect("host").unwrap();
    let mut events = pump(&mut [&mut host, &mut alice], 4);

    assert!(matches!(host.role(), Role::Both(_, _)));
    assert!(host.is_connected());
    assert_eq!(hosted(&host).len(), 2);

    let host_id = ConnectionId::new(1);
    let alice_id = ConnectionId::new(2);
    assert_eq!(mirrored(&host), vec![alice_id]);
    assert_eq!(mirrored(&alice), vec![host_id]);
    assert_eq!(
        events[0].peer().read::<ConnectEvent>().collect::<Vec<_>>(),
        vec![host_id]
    );

    // leaving the peer role keeps the host running
    host.disconnect();
    pump(&mut [&mut host, &mut alice], 3);
    assert!(matches!(host.role(), Role::Hosting(_)));
    assert_eq!(hosted(&host), vec![alice_id]);
    assert!(mirrored(&alice).is_empty());
}

#[test]
fn silent_connection_times_out() {
    init_logging();
    let hub = LocalHub::new();
    let mut host = test_session(&hub, "host", "Host", 1);
    let mut silent = hub.client();

    host.start_hosting().unwrap();
    silent.connect_to("host").unwrap();
    let mut events = pump(&mut [&mut host], 8);

    assert_eq!(hub.connection_count("host"), 0);
    assert_eq!(
        events[0].host().read::<TimeoutEvent>().collect::<Vec<_>>(),
        vec![ConnectionId::new(1)]
    );
    assert!(hosted(&host).is_empty());
}

#[test]
fn ticks_only_run_while_a_role_is_active() {
    let hub = LocalHub::new();
    let mut session = test_session(&hub, "host", "Host", 1);

    pump(&mut [&mut session], 5);
    assert_eq!(session.current_tick(), 0);

    session.start_hosting().unwrap();
    let events = pump(&mut [&mut session], 3);
    assert_eq!(session.current_tick(), 3);
    assert_eq!(events[0].ticks(), &[0, 1, 2]);

    session.stop_hosting();
    pump(&mut [&mut session], 5);
    assert_eq!(session.current_tick(), 3);
}

#[test]
fn subscribers_see_every_tick_until_unsubscribed() {
    let hub = LocalHub::new();
    let mut session = test_session(&hub, "host", "Host", 1);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let subscription = {
        let seen = seen.clone();
        session.subscribe(move |tick| seen.borrow_mut().push(tick))
    };

    session.start_hosting().unwrap();
    pump(&mut [&mut session], 2);
    assert!(session.unsubscribe(subscription));
    assert!(!session.unsubscribe(subscription));
    pump(&mut [&mut session], 2);

    assert_eq!(*seen.borrow(), vec![0, 1]);
    assert_eq!(session.subscription_count(), 0);
}

#[test]
fn ticks_wait_for_a_pending_connection() {
    let hub = LocalHub::new();
    let transport = PendingClientTransport::new();
    let mut session = pending_session(&hub, "pending", transport.clone());
    let seen = Rc::new(RefCell::new(Vec::new()));
    {
        let seen = seen.clone();
        session.subscribe(move |tick| seen.borrow_mut().push(tick));
    }

    session.connect("somewhere").unwrap();
    let mut events = pump(&mut [&mut session], 5);

    assert_eq!(transport.pending_address(), Some("somewhere".to_string()));
    assert!(!session.is_hosting());
    assert!(!session.is_connected());
    assert_eq!(session.current_tick(), 0);
    assert!(events[0].ticks().is_empty());
    assert!(!events[0].peer().has::<TickEvent>());
    assert!(seen.borrow().is_empty());

    transport.confirm(ConnectionId::new(7));
    let mut events = pump(&mut [&mut session], 3);

    assert!(session.is_connected());
    assert_eq!(session.current_tick(), 3);
    assert_eq!(events[0].ticks(), &[0, 1, 2]);
    assert_eq!(
        events[0].peer().read::<TickEvent>().collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
    assert_eq!(*seen.borrow(), vec![0, 1, 2]);
    // the Join went out as soon as the connection was confirmed
    assert_eq!(transport.sent().len(), 1);
}

#[test]
fn close_before_connecting_is_a_connection_failure() {
    let hub = LocalHub::new();
    let transport = PendingClientTransport::new();
    let mut session = pending_session(&hub, "pending", transport.clone());

    session.connect("somewhere").unwrap();
    pump(&mut [&mut session], 2);
    transport.close();
    let mut events = session.update(TICK_INTERVAL);

    let failures: Vec<String> = events.peer().read::<ConnectionFailedEvent>().collect();
    assert_eq!(failures.len(), 1);
    assert!(!events.peer().has::<DisconnectEvent>());
    assert!(matches!(session.role(), Role::Inactive));
    assert_eq!(session.current_tick(), 0);
}

#[test]
fn shutdown_leaves_every_role() {
    init_logging();
    let hub = LocalHub::new();
    let mut host = test_session(&hub, "host", "Host", 1);
    let mut alice = test_session(&hub, "alice", "Alice", 111);

    host.start_hosting().unwrap();
    host.connect("host").unwrap();
    alice.connect("host").unwrap();
    pump(&mut [&mut host, &mut alice], 4);
    assert!(matches!(host.role(), Role::Both(_, _)));

    // one mirror of alice, plus the hosted entities of both connections
    assert_eq!(host.shutdown(), 3);

    assert!(matches!(host.role(), Role::Inactive));
    assert!(!hub.server("host").is_listening());
    assert_eq!(host.shutdown(), 0);

    let tick = host.current_tick();
    let mut events = pump(&mut [&mut host, &mut alice], 2);
    assert_eq!(host.current_tick(), tick);
    assert!(!alice.is_connected());
    assert!(events[1].peer().has::<DisconnectEvent>());
}
