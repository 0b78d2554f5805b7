//! JSON envelope encoding.
//!
//! Every message is `{"status": .., "payload_type": .., "payload": ..}`.
//! `payload` must be present; it is `null` for the body-less types.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProtocolError;
use crate::protocol::message::{Message, PayloadType, Status};

#[derive(Serialize, Deserialize)]
struct Envelope {
    status: Status,
    payload_type: PayloadType,
    payload: Value,
}

pub fn encode(message: &Message) -> Result<String, ProtocolError> {
    let payload = match message {
        Message::JoinGame(body) => serde_json::to_value(body)?,
        Message::DrawCard(body) => serde_json::to_value(body)?,
        Message::PlayCard(body) => serde_json::to_value(body)?,
        Message::InitGame(body) => serde_json::to_value(body)?,
        Message::StartGame | Message::EndGame | Message::Empty => Value::Null,
    };
    let envelope = Envelope {
        status: message.status(),
        payload_type: message.payload_type(),
        payload,
    };
    Ok(serde_json::to_string(&envelope)?)
}

pub fn decode(data: &[u8]) -> Result<Message, ProtocolError> {
    let envelope: Envelope = serde_json::from_slice(data)?;
    let kind = envelope.payload_type;
    let message = match kind {
        PayloadType::JoinGame => Message::JoinGame(body(envelope.payload, kind)?),
        PayloadType::DrawCard => Message::DrawCard(body(envelope.payload, kind)?),
        PayloadType::PlayCard => Message::PlayCard(body(envelope.payload, kind)?),
        PayloadType::InitGame => Message::InitGame(body(envelope.payload, kind)?),
        PayloadType::StartGame => {
            expect_null(&envelope.payload, kind)?;
            Message::StartGame
        }
        PayloadType::EndGame => {
            expect_null(&envelope.payload, kind)?;
            Message::EndGame
        }
        PayloadType::Empty => {
            expect_null(&envelope.payload, kind)?;
            Message::Empty
        }
    };
    if message.status() != envelope.status {
        return Err(ProtocolError::decode(format!(
            "status {:?} does not go with payload type {}",
            envelope.status,
            kind.as_str()
        )));
    }
    Ok(message)
}

fn body<T: DeserializeOwned>(payload: Value, kind: PayloadType) -> Result<T, ProtocolError> {
    serde_json::from_value(payload)
        .map_err(|e| ProtocolError::decode(format!("{} payload: {}", kind.as_str(), e)))
}

fn expect_null(payload: &Value, kind: PayloadType) -> Result<(), ProtocolError> {
    if payload.is_null() {
        Ok(())
    } else {
        Err(ProtocolError::decode(format!(
            "{} payload must be null",
            kind.as_str()
        )))
    }
}
