pub mod connection;
pub mod mirror;

pub use connection::Connection;
pub use mirror::{ClientMirror, ClientStage};
