//! Text framing for the Socket.IO feed (Engine.IO v4 transport, Socket.IO v5 packets).
//!
//! Only the websocket transport with text frames is supported; binary
//! attachments are rejected. A frame looks like `42/ns,7["event",{...}]`:
//! Engine.IO type `4` (message), Socket.IO type `2` (event), optional
//! namespace, optional ack id, JSON payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const DEFAULT_NAMESPACE: &str = "/";
pub const SOCKET_PATH: &str = "/socket.io/";

/// Query string for a websocket-only Engine.IO v4 connection.
pub const WEBSOCKET_QUERY: &str = "EIO=4&transport=websocket";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PacketError {
    #[error("empty packet")]
    Empty,
    #[error("unknown engine.io packet type '{0}'")]
    UnknownEngineType(char),
    #[error("unknown socket.io packet type '{0}'")]
    UnknownSocketType(char),
    #[error("binary packets are not supported")]
    Binary,
    #[error("invalid json payload: {0}")]
    Json(String),
    #[error("event packet without a name")]
    MissingEventName,
    #[error("ack packet without an id")]
    MissingAckId,
    #[error("unterminated namespace")]
    BadNamespace,
}

/// Payload of the Engine.IO `open` packet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    pub sid: String,
    #[serde(default)]
    pub upgrades: Vec<String>,
    pub ping_interval: u64,
    pub ping_timeout: u64,
    #[serde(default)]
    pub max_payload: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EnginePacket {
    Open(Handshake),
    Close,
    Ping(String),
    Pong(String),
    Message(String),
    Upgrade,
    Noop,
}

impl EnginePacket {
    pub fn decode(text: &str) -> Result<Self, PacketError> {
        let mut chars = text.chars();
        let kind = chars.next().ok_or(PacketError::Empty)?;
        let rest = chars.as_str();
        match kind {
            '0' => serde_json::from_str::<Handshake>(rest)
                .map(EnginePacket::Open)
                .map_err(|e| PacketError::Json(e.to_string())),
            '1' => Ok(EnginePacket::Close),
            '2' => Ok(EnginePacket::Ping(rest.to_string())),
            '3' => Ok(EnginePacket::Pong(rest.to_string())),
            '4' => Ok(EnginePacket::Message(rest.to_string())),
            '5' => Ok(EnginePacket::Upgrade),
            '6' => Ok(EnginePacket::Noop),
            'b' => Err(PacketError::Binary),
            other => Err(PacketError::UnknownEngineType(other)),
        }
    }

    pub fn encode(&self) -> String {
        match self {
            EnginePacket::Open(handshake) => format!(
                "0{}",
                serde_json::to_string(handshake).unwrap_or_else(|_| "{}".to_string())
            ),
            EnginePacket::Close => "1".to_string(),
            EnginePacket::Ping(data) => format!("2{}", data),
            EnginePacket::Pong(data) => format!("3{}", data),
            EnginePacket::Message(data) => format!("4{}", data),
            EnginePacket::Upgrade => "5".to_string(),
            EnginePacket::Noop => "6".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SocketPacket {
    Connect {
        namespace: String,
        data: Option<Value>,
    },
    Disconnect {
        namespace: String,
    },
    Event {
        namespace: String,
        id: Option<u64>,
        name: String,
        args: Vec<Value>,
    },
    Ack {
        namespace: String,
        id: u64,
        args: Vec<Value>,
    },
    ConnectError {
        namespace: String,
        data: Option<Value>,
    },
}

impl SocketPacket {
    /// Event on the default namespace with a single argument.
    pub fn event(name: &str, payload: Value) -> Self {
        SocketPacket::Event {
            namespace: DEFAULT_NAMESPACE.to_string(),
            id: None,
            name: name.to_string(),
            args: vec![payload],
        }
    }

    /// Event on the default namespace without arguments.
    pub fn bare_event(name: &str) -> Self {
        SocketPacket::Event {
            namespace: DEFAULT_NAMESPACE.to_string(),
            id: None,
            name: name.to_string(),
            args: Vec::new(),
        }
    }

    pub fn connect_default() -> Self {
        SocketPacket::Connect {
            namespace: DEFAULT_NAMESPACE.to_string(),
            data: None,
        }
    }

    /// Decodes the payload of an Engine.IO message (without the leading `4`).
    pub fn decode(payload: &str) -> Result<Self, PacketError> {
        let mut chars = payload.chars();
        let kind = chars.next().ok_or(PacketError::Empty)?;
        if kind == '5' || kind == '6' {
            return Err(PacketError::Binary);
        }
        if !('0'..='4').contains(&kind) {
            return Err(PacketError::UnknownSocketType(kind));
        }
        let mut rest = chars.as_str();

        let namespace = if rest.starts_with('/') {
            let end = rest.find(',').ok_or(PacketError::BadNamespace)?;
            let ns = rest[..end].to_string();
            rest = &rest[end + 1..];
            ns
        } else {
            DEFAULT_NAMESPACE.to_string()
        };

        let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
        let id = if digits > 0 {
            let parsed = rest[..digits].parse::<u64>().ok();
            rest = &rest[digits..];
            parsed
        } else {
            None
        };

        let json = if rest.trim().is_empty() {
            None
        } else {
            Some(serde_json::from_str::<Value>(rest).map_err(|e| PacketError::Json(e.to_string()))?)
        };

        match kind {
            '0' => Ok(SocketPacket::Connect { namespace, data: json }),
            '1' => Ok(SocketPacket::Disconnect { namespace }),
            '2' => {
                let mut items = match json {
                    Some(Value::Array(items)) => items,
                    _ => return Err(PacketError::MissingEventName),
                };
                if items.is_empty() {
                    return Err(PacketError::MissingEventName);
                }
                let name = match items.remove(0) {
                    Value::String(name) => name,
                    _ => return Err(PacketError::MissingEventName),
                };
                Ok(SocketPacket::Event {
                    namespace,
                    id,
                    name,
                    args: items,
                })
            }
            '3' => {
                let id = id.ok_or(PacketError::MissingAckId)?;
                let args = match json {
                    Some(Value::Array(items)) => items,
                    Some(other) => vec![other],
                    None => Vec::new(),
                };
                Ok(SocketPacket::Ack { namespace, id, args })
            }
            _ => Ok(SocketPacket::ConnectError { namespace, data: json }),
        }
    }

    /// Encodes the Socket.IO packet (without the Engine.IO `4` prefix).
    pub fn encode(&self) -> String {
        let (kind, namespace, id, json) = match self {
            SocketPacket::Connect { namespace, data } => ('0', namespace, None, data.clone()),
            SocketPacket::Disconnect { namespace } => ('1', namespace, None, None),
            SocketPacket::Event {
                namespace,
                id,
                name,
                args,
            } => {
                let mut items = Vec::with_capacity(args.len() + 1);
                items.push(Value::String(name.clone()));
                items.extend(args.iter().cloned());
                ('2', namespace, *id, Some(Value::Array(items)))
            }
            SocketPacket::Ack { namespace, id, args } => {
                ('3', namespace, Some(*id), Some(Value::Array(args.clone())))
            }
            SocketPacket::ConnectError { namespace, data } => ('4', namespace, None, data.clone()),
        };

        let mut out = String::new();
        out.push(kind);
        if namespace != DEFAULT_NAMESPACE {
            out.push_str(namespace);
            out.push(',');
        }
        if let Some(id) = id {
            out.push_str(&id.to_string());
        }
        if let Some(json) = json {
            out.push_str(&json.to_string());
        }
        out
    }

    /// Full websocket text frame, `4` prefix included.
    pub fn to_frame(&self) -> String {
        EnginePacket::Message(self.encode()).encode()
    }
}

/// A decoded websocket text frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Engine(EnginePacket),
    Socket(SocketPacket),
}

pub fn decode_frame(text: &str) -> Result<Frame, PacketError> {
    match EnginePacket::decode(text)? {
        EnginePacket::Message(payload) => SocketPacket::decode(&payload).map(Frame::Socket),
        other => Ok(Frame::Engine(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_open_handshake() {
        let frame = r#"0{"sid":"abc","upgrades":[],"pingInterval":25000,"pingTimeout":20000,"maxPayload":1000000}"#;
        match decode_frame(frame).unwrap() {
            Frame::Engine(EnginePacket::Open(h)) => {
                assert_eq!(h.sid, "abc");
                assert_eq!(h.ping_interval, 25000);
                assert_eq!(h.ping_timeout, 20000);
            }
            other => panic!("unexpected frame {:?}", other),
        }
    }

    #[test]
    fn test_ping_is_answered_with_matching_pong() {
        assert_eq!(decode_frame("2").unwrap(), Frame::Engine(EnginePacket::Ping(String::new())));
        assert_eq!(EnginePacket::Pong(String::new()).encode(), "3");
        assert_eq!(EnginePacket::Pong("probe".into()).encode(), "3probe");
    }

    #[test]
    fn test_decode_control_data_update_event() {
        let frame = r#"42["controlDataUpdate",{"temperature":31.5,"light":"ON"}]"#;
        match decode_frame(frame).unwrap() {
            Frame::Socket(SocketPacket::Event { namespace, id, name, args }) => {
                assert_eq!(namespace, "/");
                assert_eq!(id, None);
                assert_eq!(name, "controlDataUpdate");
                assert_eq!(args, vec![json!({"temperature": 31.5, "light": "ON"})]);
            }
            other => panic!("unexpected frame {:?}", other),
        }
    }

    #[test]
    fn test_event_with_namespace_and_ack_id() {
        let packet = SocketPacket::decode(r#"2/admin,12["joinDashboard"]"#).unwrap();
        assert_eq!(
            packet,
            SocketPacket::Event {
                namespace: "/admin".into(),
                id: Some(12),
                name: "joinDashboard".into(),
                args: vec![],
            }
        );
        assert_eq!(packet.encode(), r#"2/admin,12["joinDashboard"]"#);
    }

    #[test]
    fn test_encode_join_dashboard_frame() {
        assert_eq!(SocketPacket::bare_event("joinDashboard").to_frame(), r#"42["joinDashboard"]"#);
        assert_eq!(SocketPacket::connect_default().to_frame(), "40");
    }

    #[test]
    fn test_connect_ack_with_sid() {
        let packet = SocketPacket::decode(r#"0{"sid":"xyz"}"#).unwrap();
        assert_eq!(
            packet,
            SocketPacket::Connect {
                namespace: "/".into(),
                data: Some(json!({"sid": "xyz"})),
            }
        );
    }

    #[test]
    fn test_ack_requires_id() {
        assert_eq!(SocketPacket::decode("3[]"), Err(PacketError::MissingAckId));
        let ack = SocketPacket::decode(r#"35["ok"]"#).unwrap();
        assert_eq!(
            ack,
            SocketPacket::Ack {
                namespace: "/".into(),
                id: 5,
                args: vec![json!("ok")],
            }
        );
    }

    #[test]
    fn test_rejections() {
        assert_eq!(decode_frame(""), Err(PacketError::Empty));
        assert_eq!(decode_frame("9"), Err(PacketError::UnknownEngineType('9')));
        assert_eq!(decode_frame(r#"451-["x",{"_placeholder":true,"num":0}]"#), Err(PacketError::Binary));
        assert_eq!(SocketPacket::decode("2{}"), Err(PacketError::MissingEventName));
        assert_eq!(SocketPacket::decode("2[1]"), Err(PacketError::MissingEventName));
        assert_eq!(SocketPacket::decode("0/admin"), Err(PacketError::BadNamespace));
        assert!(matches!(SocketPacket::decode("2[oops"), Err(PacketError::Json(_))));
    }
}
