//! Plays a full round between bots in one process: a session controller,
//! one client mirror per seat, and in-memory queues instead of sockets.

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use uno_net::client::{ClientMirror, ClientStage};
use uno_net::config::ServerConfig;
use uno_net::game::Color;
use uno_net::protocol::Message;
use uno_net::server::SessionController;
use uno_net::telemetry::init_tracing;

fn main() -> anyhow::Result<()> {
    init_tracing("info");
    let config = ServerConfig {
        seed: Some(2024),
        ..ServerConfig::default()
    };
    let mut table = SessionController::from_config(&config);

    let names = ["Alice", "Bob", "Charlie"];
    let mut seats: Vec<(ClientMirror, UnboundedReceiver<Message>)> = Vec::new();
    for (conn, name) in names.iter().enumerate() {
        let (tx, rx) = unbounded_channel();
        table.connect(conn as u64, tx);
        let mut mirror = ClientMirror::new(name);
        table.handle(conn as u64, mirror.connected())?;
        seats.push((mirror, rx));
    }
    for conn in 0..names.len() {
        let start = seats[conn].0.start();
        table.handle(conn as u64, start)?;
    }

    for turn in 0.. {
        for (mirror, rx) in seats.iter_mut() {
            while let Ok(msg) = rx.try_recv() {
                mirror.apply(msg)?;
            }
        }
        if !table.game().is_started() {
            println!("Round over after {} turns", turn);
            break;
        }

        let Some(conn) = seats
            .iter()
            .position(|(m, _)| m.stage() == ClientStage::Active)
        else {
            anyhow::bail!("no mirror thinks it is its turn");
        };
        let mirror = &seats[conn].0;
        let request = match mirror.playable_cards().first() {
            Some(&idx) => mirror.play(idx, Some(Color::RED)),
            None => None,
        }
        .unwrap_or_else(|| mirror.draw());
        println!("{} -> {:?}", mirror.name(), request);
        table.handle(conn as u64, request)?;
    }
    Ok(())
}
