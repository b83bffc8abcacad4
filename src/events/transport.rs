//! WebSocket transport feeding the event hub.
//!
//! The backend pushes text frames of the form
//! `{"event": "<channel>", "payload": <json>}`. Each frame is published on
//! the hub under its channel name. The connection is re-established with
//! exponential backoff when it drops.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, warn};

use super::hub::EventHub;
use crate::error::ChannelError;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Connection state of the event transport.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionState {
    Connecting,
    Connected,
    Reconnecting { attempt: u8 },
    Disconnected,
}

impl ConnectionState {
    pub fn label(&self) -> String {
        match self {
            ConnectionState::Connecting => "connecting".to_string(),
            ConnectionState::Connected => "live".to_string(),
            ConnectionState::Reconnecting { attempt } => format!("reconnecting ({})", attempt),
            ConnectionState::Disconnected => "offline".to_string(),
        }
    }
}

/// Configuration for the event transport.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub url: String,
    pub max_retries: u8,
    pub max_backoff_secs: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            url: "ws://127.0.0.1:4717/events".to_string(),
            max_retries: 5,
            max_backoff_secs: 30,
        }
    }
}

#[derive(Deserialize)]
struct Frame {
    event: String,
    #[serde(default)]
    payload: Value,
}

/// Decode one text frame into `(channel, payload)`.
pub fn parse_frame(text: &str) -> Result<(String, Value), ChannelError> {
    let frame: Frame =
        serde_json::from_str(text).map_err(|e| ChannelError::MalformedFrame(e.to_string()))?;
    if frame.event.is_empty() {
        return Err(ChannelError::MalformedFrame("empty event name".to_string()));
    }
    Ok((frame.event, frame.payload))
}

/// Backoff before reconnect attempt `attempt` (1-based): 1s, 2s, 4s, ...
/// capped at `max_backoff_secs`.
pub fn backoff_delay(attempt: u8, max_backoff_secs: u64) -> Duration {
    let exp = u32::from(attempt.saturating_sub(1)).min(63);
    Duration::from_secs((1u64 << exp).min(max_backoff_secs))
}

/// Handle to the background transport task.
pub struct EventTransport {
    state_rx: watch::Receiver<ConnectionState>,
    shutdown: Arc<AtomicBool>,
}

impl EventTransport {
    /// Start the transport. Connection happens in the background, so this
    /// returns immediately even when the backend is not up yet.
    pub fn spawn(config: TransportConfig, hub: EventHub) -> Self {
        let (state_tx, state_rx) = watch::channel(ConnectionState::Connecting);
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            run_transport(config, hub, state_tx, shutdown_clone).await;
        });

        Self { state_rx, shutdown }
    }

    pub fn is_connected(&self) -> bool {
        matches!(*self.state_rx.borrow(), ConnectionState::Connected)
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.state_rx.borrow().clone()
    }

    /// Subscribe to connection state changes.
    pub fn state_receiver(&self) -> watch::Receiver<ConnectionState> {
        self.state_rx.clone()
    }

    pub fn shutdown(&self) {
        if !self.shutdown.swap(true, Ordering::SeqCst) {
            info!("Shutting down event transport");
        }
    }
}

impl Drop for EventTransport {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn run_transport(
    config: TransportConfig,
    hub: EventHub,
    state_tx: watch::Sender<ConnectionState>,
    shutdown: Arc<AtomicBool>,
) {
    let mut stream = match connect_async(config.url.as_str()).await {
        Ok((stream, _)) => {
            info!("Connected to event stream at {}", config.url);
            stream
        }
        Err(e) => {
            warn!("Initial event stream connection failed: {}", e);
            match reconnect(&config, &state_tx, &shutdown).await {
                Some(stream) => stream,
                None => {
                    let _ = state_tx.send(ConnectionState::Disconnected);
                    return;
                }
            }
        }
    };
    let _ = state_tx.send(ConnectionState::Connected);

    loop {
        if shutdown.load(Ordering::SeqCst) {
            debug!("Shutdown signal received, closing event stream");
            let _ = stream.close(None).await;
            break;
        }

        // Wake periodically so a shutdown request is noticed on an idle socket.
        let next = tokio::time::timeout(Duration::from_millis(500), stream.next()).await;
        let msg = match next {
            Ok(msg) => msg,
            Err(_) => continue,
        };

        let dropped = match msg {
            Some(Ok(Message::Text(text))) => {
                dispatch_frame(&hub, &text);
                false
            }
            Some(Ok(Message::Ping(data))) => {
                let _ = stream.send(Message::Pong(data)).await;
                false
            }
            Some(Ok(Message::Close(_))) => {
                info!("Received close frame from event stream");
                true
            }
            Some(Ok(_)) => false,
            Some(Err(e)) => {
                error!("Event stream error: {}", e);
                true
            }
            None => {
                info!("Event stream ended");
                true
            }
        };

        if dropped {
            let _ = state_tx.send(ConnectionState::Disconnected);
            match reconnect(&config, &state_tx, &shutdown).await {
                Some(new_stream) => {
                    stream = new_stream;
                    let _ = state_tx.send(ConnectionState::Connected);
                }
                None => break,
            }
        }
    }

    info!("Event transport loop ended");
    let _ = state_tx.send(ConnectionState::Disconnected);
}

fn dispatch_frame(hub: &EventHub, text: &str) {
    match parse_frame(text) {
        Ok((channel, payload)) => {
            let delivered = hub.publish(&channel, &payload);
            debug!(channel = %channel, delivered, "event delivered");
        }
        Err(e) => warn!("Skipping event frame: {}", e),
    }
}

async fn reconnect(
    config: &TransportConfig,
    state_tx: &watch::Sender<ConnectionState>,
    shutdown: &Arc<AtomicBool>,
) -> Option<WsStream> {
    for attempt in 1..=config.max_retries {
        if shutdown.load(Ordering::SeqCst) {
            debug!("Shutdown requested during reconnection");
            return None;
        }

        let _ = state_tx.send(ConnectionState::Reconnecting { attempt });
        let delay = backoff_delay(attempt, config.max_backoff_secs);
        info!(
            "Reconnection attempt {} of {}, waiting {}s",
            attempt,
            config.max_retries,
            delay.as_secs()
        );
        tokio::time::sleep(delay).await;

        if shutdown.load(Ordering::SeqCst) {
            debug!("Shutdown requested during backoff");
            return None;
        }

        match connect_async(config.url.as_str()).await {
            Ok((stream, _)) => {
                info!("Reconnected to event stream on attempt {}", attempt);
                return Some(stream);
            }
            Err(e) => warn!("Reconnection attempt {} failed: {}", attempt, e),
        }
    }

    let err = ChannelError::Disconnected {
        attempts: config.max_retries,
    };
    error!(code = err.error_code(), "{}", err);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_frame() {
        let (channel, payload) =
            parse_frame(r#"{"event":"download-progress","payload":{"id":"a"}}"#).unwrap();
        assert_eq!(channel, "download-progress");
        assert_eq!(payload, json!({"id": "a"}));
    }

    #[test]
    fn test_parse_frame_without_payload() {
        let (_, payload) = parse_frame(r#"{"event":"ping"}"#).unwrap();
        assert_eq!(payload, Value::Null);
    }

    #[test]
    fn test_parse_frame_rejects_garbage() {
        assert!(matches!(
            parse_frame("not json"),
            Err(ChannelError::MalformedFrame(_))
        ));
        assert!(parse_frame(r#"{"event":""}"#).is_err());
        assert!(parse_frame(r#"{"payload":1}"#).is_err());
    }

    #[test]
    fn test_backoff_delay() {
        assert_eq!(backoff_delay(1, 30), Duration::from_secs(1));
        assert_eq!(backoff_delay(2, 30), Duration::from_secs(2));
        assert_eq!(backoff_delay(5, 30), Duration::from_secs(16));
        assert_eq!(backoff_delay(6, 30), Duration::from_secs(30));
        assert_eq!(backoff_delay(200, 30), Duration::from_secs(30));
    }

    #[test]
    fn test_dispatch_frame_publishes() {
        let hub = EventHub::new();
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let s = seen.clone();
        let _sub = hub.subscribe("instance-status", move |v| s.lock().unwrap().push(v.clone()));

        dispatch_frame(&hub, r#"{"event":"instance-status","payload":{"instance_id":"a"}}"#);
        dispatch_frame(&hub, "garbage");
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_connection_state_label() {
        assert_eq!(ConnectionState::Connected.label(), "live");
        assert_eq!(
            ConnectionState::Reconnecting { attempt: 2 }.label(),
            "reconnecting (2)"
        );
    }

    #[tokio::test]
    async fn test_spawn_against_closed_port_ends_disconnected() {
        let config = TransportConfig {
            url: "ws://127.0.0.1:1/events".to_string(),
            max_retries: 0,
            max_backoff_secs: 1,
        };
        let transport = EventTransport::spawn(config, EventHub::new());
        let mut rx = transport.state_receiver();
        while *rx.borrow() != ConnectionState::Disconnected {
            if rx.changed().await.is_err() {
                break;
            }
        }
        assert!(!transport.is_connected());
    }
}
