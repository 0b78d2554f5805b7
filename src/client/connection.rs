use futures::{SinkExt, StreamExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio_util::codec::{FramedRead, FramedWrite};

use crate::error::ProtocolError;
use crate::protocol::{Message, MessageCodec};

/// A framed TCP link to the server.
pub struct Connection {
    reader: FramedRead<OwnedReadHalf, MessageCodec>,
    writer: FramedWrite<OwnedWriteHalf, MessageCodec>,
}

impl Connection {
    pub async fn connect<A: ToSocketAddrs>(addr: A) -> Result<Connection, ProtocolError> {
        let stream = TcpStream::connect(addr).await?;
        stream.set_nodelay(true)?;
        let (r, w) = stream.into_split();
        Ok(Connection {
            reader: FramedRead::new(r, MessageCodec::new()),
            writer: FramedWrite::new(w, MessageCodec::new()),
        })
    }

    pub async fn send(&mut self, msg: Message) -> Result<(), ProtocolError> {
        self.writer.send(msg).await
    }

    /// The next message, `None` once the server hangs up. A message that
    /// fails to parse comes back as `Some(Err(_))` and the link stays up.
    pub async fn recv(&mut self) -> Option<Result<Message, ProtocolError>> {
        match self.reader.next().await? {
            Ok(decoded) => Some(decoded),
            Err(e) => Some(Err(e)),
        }
    }
}
