//! Backend push events.
//!
//! - [`EventHub`] - named channels with exactly-once disposers
//! - [`payloads`] - typed payloads per channel
//! - [`transport`] - WebSocket client publishing backend frames into the hub

pub mod hub;
pub mod payloads;
pub mod transport;

pub use hub::{EventHub, Subscription, SubscriptionSet};
pub use payloads::{
    Bottleneck, DownloadProgress, ExportProgress, ImportProgress, InstanceStatusEvent,
    OperationEvent, PerformanceEvent, PerformanceSnapshot, Severity,
};
pub use transport::{ConnectionState, EventTransport, TransportConfig};
