//! Socket.IO client over a browser WebSocket.
//!
//! Speaks Engine.IO v4 text frames: waits for the open packet, connects the
//! default namespace, answers pings, emits the join events once connected and
//! hands every server event to `on_event`. Reconnects with exponential
//! backoff until closed.

use contracts::shared::socket_io::{
    decode_frame, EnginePacket, Frame, PacketError, SocketPacket, SOCKET_PATH, WEBSOCKET_QUERY,
};
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, MessageEvent, WebSocket};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketStatus {
    Connecting,
    Connected,
    Disconnected,
}

impl SocketStatus {
    pub fn label(self) -> &'static str {
        match self {
            SocketStatus::Connecting => "Connecting",
            SocketStatus::Connected => "Live",
            SocketStatus::Disconnected => "Disconnected",
        }
    }
}

/// What a received frame asks the client to do.
#[derive(Debug, Default, PartialEq)]
pub struct FrameOutcome {
    pub replies: Vec<String>,
    pub status: Option<SocketStatus>,
    pub event: Option<(String, Vec<Value>)>,
    pub close: bool,
}

pub fn handle_frame(text: &str, join_events: &[String]) -> Result<FrameOutcome, PacketError> {
    let mut out = FrameOutcome::default();
    match decode_frame(text)? {
        Frame::Engine(EnginePacket::Open(_)) => {
            out.replies.push(SocketPacket::connect_default().to_frame());
        }
        Frame::Engine(EnginePacket::Ping(data)) => {
            out.replies.push(EnginePacket::Pong(data).encode());
        }
        Frame::Engine(EnginePacket::Close) => {
            out.status = Some(SocketStatus::Disconnected);
            out.close = true;
        }
        Frame::Engine(_) => {}
        Frame::Socket(SocketPacket::Connect { .. }) => {
            out.status = Some(SocketStatus::Connected);
            out.replies.extend(
                join_events
                    .iter()
                    .map(|name| SocketPacket::bare_event(name).to_frame()),
            );
        }
        Frame::Socket(SocketPacket::Disconnect { .. }) => {
            out.status = Some(SocketStatus::Disconnected);
            out.close = true;
        }
        Frame::Socket(SocketPacket::Event { name, args, .. }) => {
            out.event = Some((name, args));
        }
        Frame::Socket(SocketPacket::ConnectError { data, .. }) => {
            log::warn!("socket.io connect error: {:?}", data);
            out.status = Some(SocketStatus::Disconnected);
        }
        Frame::Socket(SocketPacket::Ack { .. }) => {}
    }
    Ok(out)
}

/// `http://host:8085/api/` -> `ws://host:8085/socket.io/?EIO=4&transport=websocket`
pub fn socket_url(api_base: &str) -> String {
    let (scheme, rest) = match api_base.split_once("://") {
        Some(("https", rest)) => ("wss", rest),
        Some((_, rest)) => ("ws", rest),
        None => ("ws", api_base),
    };
    let authority = rest.split('/').next().unwrap_or(rest);
    format!("{}://{}{}?{}", scheme, authority, SOCKET_PATH, WEBSOCKET_QUERY)
}

type EventHandler = Rc<dyn Fn(&str, Vec<Value>)>;
type StatusHandler = Rc<dyn Fn(SocketStatus)>;

#[derive(Clone)]
pub struct SocketIoClient {
    ws: Rc<RefCell<Option<WebSocket>>>,
    url: String,
    join_events: Rc<Vec<String>>,
    reconnect_attempts: Rc<Cell<u32>>,
    closed: Rc<Cell<bool>>,
    on_event: EventHandler,
    on_status: StatusHandler,
}

impl SocketIoClient {
    pub fn new(
        url: &str,
        join_events: Vec<String>,
        on_event: impl Fn(&str, Vec<Value>) + 'static,
        on_status: impl Fn(SocketStatus) + 'static,
    ) -> Self {
        Self {
            ws: Rc::new(RefCell::new(None)),
            url: url.to_string(),
            join_events: Rc::new(join_events),
            reconnect_attempts: Rc::new(Cell::new(0)),
            closed: Rc::new(Cell::new(false)),
            on_event: Rc::new(on_event),
            on_status: Rc::new(on_status),
        }
    }

    pub fn connect(&self) {
        if self.closed.get() {
            return;
        }
        (self.on_status)(SocketStatus::Connecting);
        match WebSocket::new(&self.url) {
            Ok(ws) => {
                self.setup_handlers(&ws);
                *self.ws.borrow_mut() = Some(ws);
            }
            Err(e) => {
                log::error!("WebSocket connection failed: {:?}", e);
                self.schedule_reconnect();
            }
        }
    }

    fn setup_handlers(&self, ws: &WebSocket) {
        let client = self.clone();
        let on_message = Closure::wrap(Box::new(move |event: MessageEvent| {
            if let Ok(text) = event.data().dyn_into::<js_sys::JsString>() {
                let text: String = text.into();
                client.handle_text(&text);
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        ws.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
        on_message.forget();

        let client = self.clone();
        let on_close = Closure::wrap(Box::new(move |event: CloseEvent| {
            log::info!("WebSocket closed: code={}, reason={}", event.code(), event.reason());
            (client.on_status)(SocketStatus::Disconnected);
            client.schedule_reconnect();
        }) as Box<dyn FnMut(CloseEvent)>);
        ws.set_onclose(Some(on_close.as_ref().unchecked_ref()));
        on_close.forget();

        let on_error = Closure::wrap(Box::new(move |e: JsValue| {
            log::error!("WebSocket error: {:?}", e);
        }) as Box<dyn FnMut(JsValue)>);
        ws.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        on_error.forget();
    }

    fn handle_text(&self, text: &str) {
        let outcome = match handle_frame(text, &self.join_events) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::warn!("Dropping socket frame: {}", e);
                return;
            }
        };
        for reply in &outcome.replies {
            self.send_raw(reply);
        }
        if let Some(status) = outcome.status {
            if status == SocketStatus::Connected {
                log::info!("socket.io connected");
                self.reconnect_attempts.set(0);
            }
            (self.on_status)(status);
        }
        if let Some((name, args)) = outcome.event {
            (self.on_event)(&name, args);
        }
        if outcome.close {
            if let Some(ws) = self.ws.borrow().as_ref() {
                let _ = ws.close();
            }
        }
    }

    fn schedule_reconnect(&self) {
        if self.closed.get() {
            return;
        }
        let attempts = self.reconnect_attempts.get();
        if attempts >= MAX_RECONNECT_ATTEMPTS {
            log::error!("Max reconnect attempts reached");
            return;
        }
        let delay = (2_u32.pow(attempts) * 1000).min(30000);
        self.reconnect_attempts.set(attempts + 1);

        let client = self.clone();
        gloo_timers::callback::Timeout::new(delay, move || {
            log::info!("Attempting reconnect (attempt {})", client.reconnect_attempts.get());
            client.connect();
        })
        .forget();
    }

    fn send_raw(&self, frame: &str) {
        if let Some(ws) = self.ws.borrow().as_ref() {
            if let Err(e) = ws.send_with_str(frame) {
                log::warn!("WebSocket send failed: {:?}", e);
            }
        }
    }

    /// Close for good; no reconnects afterwards
    pub fn close(&self) {
        self.closed.set(true);
        if let Some(ws) = self.ws.borrow_mut().take() {
            ws.set_onclose(None);
            let _ = ws.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn joins() -> Vec<String> {
        vec!["joinDashboard".to_string()]
    }

    #[test]
    fn test_socket_url() {
        assert_eq!(
            socket_url("http://localhost:8085/api/"),
            "ws://localhost:8085/socket.io/?EIO=4&transport=websocket"
        );
        assert_eq!(
            socket_url("https://erp.example.com/api/"),
            "wss://erp.example.com/socket.io/?EIO=4&transport=websocket"
        );
    }

    #[test]
    fn test_handshake_then_join() {
        let open = r#"0{"sid":"s","upgrades":[],"pingInterval":25000,"pingTimeout":20000}"#;
        let out = handle_frame(open, &joins()).unwrap();
        assert_eq!(out.replies, vec!["40".to_string()]);

        let out = handle_frame(r#"40{"sid":"x"}"#, &joins()).unwrap();
        assert_eq!(out.status, Some(SocketStatus::Connected));
        assert_eq!(out.replies, vec![r#"42["joinDashboard"]"#.to_string()]);
    }

    #[test]
    fn test_ping_and_event() {
        let out = handle_frame("2", &joins()).unwrap();
        assert_eq!(out.replies, vec!["3".to_string()]);

        let out = handle_frame(r#"42["controlDataUpdate",{"temperature":31.5}]"#, &joins()).unwrap();
        assert_eq!(
            out.event,
            Some(("controlDataUpdate".to_string(), vec![json!({"temperature": 31.5})]))
        );
        assert!(out.replies.is_empty());
    }

    #[test]
    fn test_close_and_garbage() {
        let out = handle_frame("1", &joins()).unwrap();
        assert!(out.close);
        assert!(handle_frame("", &joins()).is_err());
    }
}
