pub mod codec;
pub mod frame;
pub mod message;
pub use codec::{decode, encode};
pub use frame::{MessageCodec, MAX_FRAME_LEN};
pub use message::{DrawCard, InitGame, JoinGame, Message, PayloadType, PlayCard, Status};
