use std::io;
use std::net::SocketAddr;

use futures::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{debug, info, warn};

use crate::config::ServerConfig;
use crate::error::ProtocolError;
use crate::protocol::{Message, MessageCodec};
use crate::server::session::{ConnId, Outbox, SessionController};

enum SessionCmd {
    Connect { conn_id: ConnId, outbox: Outbox },
    Request { conn_id: ConnId, msg: Message },
    Undecodable { conn_id: ConnId, error: ProtocolError },
    Leave { conn_id: ConnId },
}

/// A bound listener that has not started accepting yet.
pub struct Server {
    listener: TcpListener,
    config: ServerConfig,
}

impl Server {
    pub async fn bind(config: ServerConfig) -> io::Result<Server> {
        let listener = TcpListener::bind(config.socket_addr()).await?;
        Ok(Server { listener, config })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections forever. One task owns the controller; every
    /// connection talks to it through a command channel.
    pub async fn run(self) -> io::Result<()> {
        let controller = SessionController::from_config(&self.config);
        let (session_tx, session_rx) = mpsc::channel(256);
        tokio::spawn(session_task(controller, session_rx));

        info!(addr = %self.local_addr()?, "uno server listening");
        let max_frame_len = self.config.max_frame_len;
        let mut next_conn: ConnId = 0;
        loop {
            let (stream, peer) = self.listener.accept().await?;
            next_conn += 1;
            let conn_id = next_conn;
            info!(conn_id, %peer, "accepted connection");
            tokio::spawn(handle_connection(
                stream,
                session_tx.clone(),
                conn_id,
                max_frame_len,
            ));
        }
    }
}

pub async fn serve(config: ServerConfig) -> io::Result<()> {
    Server::bind(config).await?.run().await
}

async fn session_task(mut controller: SessionController, mut rx: mpsc::Receiver<SessionCmd>) {
    while let Some(cmd) = rx.recv().await {
        match cmd {
            SessionCmd::Connect { conn_id, outbox } => controller.connect(conn_id, outbox),
            SessionCmd::Request { conn_id, msg } => {
                let kind = msg.payload_type();
                match controller.handle(conn_id, msg) {
                    Ok(()) => debug!(conn_id, kind = kind.as_str(), "request applied"),
                    Err(e) => debug!(conn_id, kind = kind.as_str(), error = %e, "request rejected"),
                }
            }
            SessionCmd::Undecodable { conn_id, error } => {
                warn!(conn_id, error = %error, "undecodable message");
                controller.reject(conn_id, &error);
            }
            SessionCmd::Leave { conn_id } => controller.disconnect(conn_id),
        }
    }
    debug!("session task ended");
}

async fn handle_connection(
    stream: TcpStream,
    session: mpsc::Sender<SessionCmd>,
    conn_id: ConnId,
    max_frame_len: usize,
) {
    if let Err(e) = stream.set_nodelay(true) {
        debug!(conn_id, error = %e, "could not disable nagle");
    }
    let (r, w) = stream.into_split();
    let (outbox, mut inbox) = mpsc::unbounded_channel::<Message>();
    if session
        .send(SessionCmd::Connect { conn_id, outbox })
        .await
        .is_err()
    {
        return;
    }

    // Drains the outbox in order; ends when the session drops the sender.
    let mut writer = tokio::spawn(async move {
        let mut sink = FramedWrite::new(w, MessageCodec::with_max_frame_len(max_frame_len));
        while let Some(msg) = inbox.recv().await {
            if let Err(e) = sink.send(msg).await {
                warn!(conn_id, error = %e, "write failed");
                break;
            }
        }
    });
    let mut writer_done = false;

    let mut frames = FramedRead::new(r, MessageCodec::with_max_frame_len(max_frame_len));
    loop {
        let cmd = tokio::select! {
            frame = frames.next() => match frame {
                Some(Ok(Ok(msg))) => SessionCmd::Request { conn_id, msg },
                Some(Ok(Err(error))) => SessionCmd::Undecodable { conn_id, error },
                Some(Err(e)) => {
                    warn!(conn_id, error = %e, "dropping connection");
                    break;
                }
                None => break,
            },
            _ = &mut writer => {
                writer_done = true;
                break;
            }
        };
        if session.send(cmd).await.is_err() {
            break;
        }
    }

    let _ = session.send(SessionCmd::Leave { conn_id }).await;
    if !writer_done {
        let _ = writer.await;
    }
    info!(conn_id, "connection closed");
}
