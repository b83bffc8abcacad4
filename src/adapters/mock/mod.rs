//! Mock implementations for testing.
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//! - [`MockGateway`] - command gateway with scripted and held replies
//! - [`InMemoryClipboard`] - clipboard backed by a string

pub mod clipboard;
pub mod gateway;
pub mod http;

pub use clipboard::InMemoryClipboard;
pub use gateway::{MockGateway, RecordedCall};
pub use http::{MockHttpClient, MockResponse, RecordedRequest};
