use tether_client::{Client, ClientConfig, ConnectionStatus};
use tether_server::{
    ConnectEvent, DisconnectEvent, MessageEvent, Server, ServerConfig, ServerEvents,
};
use tether_shared::{ConnectionHandle, RemoteIdentity, SendMode, UserSendMode};
use tether_test::{settle, tick, LoopbackNetwork};

const SERVER_IDENTITY: u64 = 1;

fn server_on(network: &LoopbackNetwork, max_clients: usize) -> Server {
    let config = ServerConfig {
        max_clients,
        ..Default::default()
    };
    let mut server = Server::new(config, network.endpoint(SERVER_IDENTITY));
    server.listen();
    server
}

fn client_on(network: &LoopbackNetwork, identity: u64) -> Client {
    let mut client = Client::new(ClientConfig::default(), network.endpoint(identity));
    client.connect(RemoteIdentity::from_u64(SERVER_IDENTITY));
    client
}

fn connected_handles(events: &mut ServerEvents) -> Vec<ConnectionHandle> {
    events
        .read::<ConnectEvent>()
        .map(|(handle, _)| handle)
        .collect()
}

#[test]
fn test_two_clients_connect_and_exchange_messages() {
    let _ = env_logger::builder().is_test(true).try_init();

    let network = LoopbackNetwork::new();
    let mut server = server_on(&network, 4);
    let mut clients = vec![client_on(&network, 100), client_on(&network, 101)];

    let mut handles = Vec::new();
    for _ in 0..4 {
        let (mut server_events, _) = tick(&mut server, &mut clients);
        handles.extend(connected_handles(&mut server_events));
    }
    assert_eq!(handles.len(), 2);
    assert_eq!(server.connection_count(), 2);
    for client in &clients {
        assert_eq!(client.connection_status(), ConnectionStatus::Connected);
    }

    // client -> server, interleaved across both connections
    for i in 0..3u8 {
        clients[0].send_user(&[10, i], UserSendMode::Reliable).unwrap();
        clients[1].send_user(&[20, i], UserSendMode::Unreliable).unwrap();
    }
    let (mut server_events, _) = tick(&mut server, &mut clients);
    let messages: Vec<_> = server_events.read::<MessageEvent>().collect();
    assert_eq!(messages.len(), 6);

    // each connection's stream arrives in send order
    for handle in &handles {
        let stream: Vec<u8> = messages
            .iter()
            .filter(|(from, _)| from == handle)
            .map(|(_, payload)| payload[1])
            .collect();
        assert_eq!(stream, vec![0, 1, 2]);
    }

    // server -> client on the control path
    server.send(handles[0], b"tick").unwrap();
    let (_, mut client_events) = tick(&mut server, &mut clients);
    let received: usize = client_events
        .iter_mut()
        .map(|events| events.read::<tether_client::MessageEvent>().count())
        .sum();
    assert_eq!(received, 1);
}

#[test]
fn test_third_client_is_rejected_at_capacity_two() {
    let network = LoopbackNetwork::new();
    let mut server = server_on(&network, 2);
    let mut clients = vec![client_on(&network, 100), client_on(&network, 101)];
    settle(&mut server, &mut clients, 4);
    assert_eq!(server.connection_count(), 2);

    // third attempt is declined before any record is allocated
    let mut third = client_on(&network, 102);
    settle(&mut server, &mut [], 1);
    let events = third.receive();
    assert!(events.is_empty());
    assert_eq!(third.connection_status(), ConnectionStatus::Disconnected);
    assert_eq!(server.connection_count(), 2);
    assert_eq!(server.free_record_count(), 0);

    // once a slot frees up, a new attempt is admitted
    clients[0].disconnect();
    settle(&mut server, &mut clients, 2);
    assert_eq!(server.connection_count(), 1);

    let mut fourth = client_on(&network, 103);
    for _ in 0..4 {
        let _ = server.receive();
        let _ = fourth.receive();
    }
    assert_eq!(fourth.connection_status(), ConnectionStatus::Connected);
    assert_eq!(server.connection_count(), 2);
}

#[test]
fn test_client_disconnect_surfaces_on_server() {
    let network = LoopbackNetwork::new();
    let mut server = server_on(&network, 2);
    let mut clients = vec![client_on(&network, 100)];
    settle(&mut server, &mut clients, 4);

    clients[0].disconnect();
    let mut disconnections = Vec::new();
    for _ in 0..2 {
        let (mut server_events, _) = tick(&mut server, &mut clients);
        disconnections.extend(server_events.read::<DisconnectEvent>());
    }

    assert_eq!(disconnections.len(), 1);
    assert_eq!(disconnections[0].1, RemoteIdentity::from_u64(100));
    assert_eq!(server.connection_count(), 0);
    assert_eq!(server.free_record_count(), 2);
}

#[test]
fn test_server_shutdown_disconnects_client() {
    let network = LoopbackNetwork::new();
    let mut server = server_on(&network, 2);
    let mut clients = vec![client_on(&network, 100)];
    settle(&mut server, &mut clients, 4);
    assert_eq!(clients[0].connection_status(), ConnectionStatus::Connected);

    server.shutdown();
    let mut disconnections = Vec::new();
    for _ in 0..2 {
        let mut events = clients[0].receive();
        disconnections.extend(events.read::<tether_client::DisconnectEvent>());
    }

    assert_eq!(disconnections.len(), 1);
    assert_eq!(clients[0].connection_status(), ConnectionStatus::Disconnected);
}

#[test]
fn test_disconnect_while_connecting_keeps_session_down() {
    let network = LoopbackNetwork::new();
    let mut server = server_on(&network, 2);
    let mut clients = vec![client_on(&network, 100)];

    // disconnect before the server has ticked; the attempt is in flight
    clients[0].disconnect();
    settle(&mut server, &mut clients, 4);

    assert_eq!(clients[0].connection_status(), ConnectionStatus::Disconnected);
    assert_eq!(server.connection_count(), 0);
    assert_eq!(server.free_record_count(), 2);
}

#[test]
fn test_deferred_startup_waits_for_relay_readiness() {
    let network = LoopbackNetwork::new();
    network.set_ready(false);

    let mut server = server_on(&network, 2);
    let mut clients = vec![client_on(&network, 100)];
    settle(&mut server, &mut clients, 3);
    assert!(!server.is_listening());
    assert_eq!(clients[0].connection_status(), ConnectionStatus::Connecting);

    network.set_ready(true);
    settle(&mut server, &mut clients, 4);
    assert!(server.is_listening());
    assert_eq!(clients[0].connection_status(), ConnectionStatus::Connected);
    assert_eq!(server.connection_count(), 1);
}

#[test]
fn test_send_modes_observed_at_the_relay() {
    let network = LoopbackNetwork::new();
    let mut server = server_on(&network, 2);
    let mut clients = vec![client_on(&network, 100)];
    settle(&mut server, &mut clients, 4);

    let handle = server.connection_handles()[0];
    let flushes_before = network.flush_count(SERVER_IDENTITY);
    server.send(handle, b"control").unwrap();
    server.send_user(handle, b"bulk", UserSendMode::Reliable).unwrap();

    let modes = network.send_modes(SERVER_IDENTITY);
    assert_eq!(modes, vec![SendMode::NoNagle, SendMode::Reliable]);
    // only the control path force-flushes
    assert_eq!(network.flush_count(SERVER_IDENTITY), flushes_before + 1);
}
