//! Per-connection Socket.IO state, kept free of I/O so it can be tested
//! frame by frame.

use contracts::dashboards::d400_sensors::{ControlDataUpdate, JOIN_EVENT, UPDATE_EVENT};
use contracts::shared::socket_io::{
    decode_frame, EnginePacket, Frame, Handshake, SocketPacket, DEFAULT_NAMESPACE,
};
use serde_json::json;

pub const PING_INTERVAL_MS: u64 = 25_000;
pub const PING_TIMEOUT_MS: u64 = 20_000;
pub const MAX_PAYLOAD: u64 = 1_000_000;

/// What the connection loop does after a client frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Reply(Vec<String>),
    Close,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub sid: String,
    connected: bool,
    joined: bool,
}

impl Session {
    pub fn new(sid: impl Into<String>) -> Self {
        Self {
            sid: sid.into(),
            connected: false,
            joined: false,
        }
    }

    /// Engine.IO `open` frame sent right after the upgrade.
    pub fn open_frame(&self) -> String {
        EnginePacket::Open(Handshake {
            sid: self.sid.clone(),
            upgrades: Vec::new(),
            ping_interval: PING_INTERVAL_MS,
            ping_timeout: PING_TIMEOUT_MS,
            max_payload: MAX_PAYLOAD,
        })
        .encode()
    }

    pub fn ping_frame() -> String {
        EnginePacket::Ping(String::new()).encode()
    }

    /// Live updates go only to sockets that emitted `joinDashboard`.
    pub fn is_joined(&self) -> bool {
        self.joined
    }

    pub fn update_frame(update: &ControlDataUpdate) -> Option<String> {
        match serde_json::to_value(update) {
            Ok(payload) => Some(SocketPacket::event(UPDATE_EVENT, payload).to_frame()),
            Err(e) => {
                tracing::warn!(error = %e, "telemetry not serializable");
                None
            }
        }
    }

    pub fn handle(&mut self, text: &str) -> Step {
        let frame = match decode_frame(text) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::debug!(sid = %self.sid, error = %e, "ignoring bad frame");
                return Step::Reply(Vec::new());
            }
        };

        match frame {
            Frame::Engine(EnginePacket::Ping(data)) => {
                Step::Reply(vec![EnginePacket::Pong(data).encode()])
            }
            Frame::Engine(EnginePacket::Close) => Step::Close,
            Frame::Engine(_) => Step::Reply(Vec::new()),
            Frame::Socket(SocketPacket::Connect { namespace, .. }) => {
                if namespace != DEFAULT_NAMESPACE {
                    let refusal = SocketPacket::ConnectError {
                        namespace,
                        data: Some(json!({"message": "Invalid namespace"})),
                    };
                    return Step::Reply(vec![refusal.to_frame()]);
                }
                self.connected = true;
                let ack = SocketPacket::Connect {
                    namespace,
                    data: Some(json!({"sid": self.sid})),
                };
                Step::Reply(vec![ack.to_frame()])
            }
            Frame::Socket(SocketPacket::Disconnect { .. }) => Step::Close,
            Frame::Socket(SocketPacket::Event { name, .. }) if name == JOIN_EVENT => {
                if self.connected && !self.joined {
                    self.joined = true;
                    tracing::info!(sid = %self.sid, "socket joined dashboard");
                }
                Step::Reply(Vec::new())
            }
            Frame::Socket(SocketPacket::Event { name, .. }) => {
                tracing::debug!(sid = %self.sid, event = %name, "unhandled event");
                Step::Reply(Vec::new())
            }
            Frame::Socket(_) => Step::Reply(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_frame_carries_timings() {
        let session = Session::new("abc");
        match decode_frame(&session.open_frame()).unwrap() {
            Frame::Engine(EnginePacket::Open(h)) => {
                assert_eq!(h.sid, "abc");
                assert_eq!(h.ping_interval, PING_INTERVAL_MS);
                assert_eq!(h.ping_timeout, PING_TIMEOUT_MS);
            }
            other => panic!("unexpected frame {:?}", other),
        }
    }

    #[test]
    fn test_connect_then_join() {
        let mut session = Session::new("abc");
        assert_eq!(session.handle(r#"42["joinDashboard"]"#), Step::Reply(Vec::new()));
        assert!(!session.is_joined(), "join before connect is ignored");

        assert_eq!(
            session.handle("40"),
            Step::Reply(vec![r#"40{"sid":"abc"}"#.to_string()])
        );
        session.handle(r#"42["joinDashboard"]"#);
        assert!(session.is_joined());
    }

    #[test]
    fn test_foreign_namespace_is_refused() {
        let mut session = Session::new("abc");
        match session.handle("40/admin,") {
            Step::Reply(frames) => assert_eq!(frames, vec![r#"44/admin,{"message":"Invalid namespace"}"#]),
            Step::Close => panic!("should not close"),
        }
        assert!(!session.is_joined());
    }

    #[test]
    fn test_ping_close_and_garbage() {
        let mut session = Session::new("abc");
        assert_eq!(session.handle("2probe"), Step::Reply(vec!["3probe".to_string()]));
        assert_eq!(session.handle("3"), Step::Reply(Vec::new()));
        assert_eq!(session.handle("x"), Step::Reply(Vec::new()));
        assert_eq!(session.handle("41"), Step::Close);
        assert_eq!(session.handle("1"), Step::Close);
    }

    #[test]
    fn test_update_frame() {
        let update = ControlDataUpdate {
            fan: Some(true),
            ..Default::default()
        };
        let frame = Session::update_frame(&update).unwrap();
        assert!(frame.starts_with(r#"42["controlDataUpdate",{"#));
        match decode_frame(&frame).unwrap() {
            Frame::Socket(SocketPacket::Event { name, args, .. }) => {
                assert_eq!(name, UPDATE_EVENT);
                let back: ControlDataUpdate = serde_json::from_value(args[0].clone()).unwrap();
                assert_eq!(back, update);
            }
            other => panic!("unexpected frame {:?}", other),
        }
    }
}
