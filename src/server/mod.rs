pub mod net;
pub mod session;

pub use net::{serve, Server};
pub use session::{ConnId, Outbox, SessionController};
