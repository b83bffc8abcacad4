//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`HttpGateway`] - command gateway speaking JSON over an [`HttpClient`](crate::traits::HttpClient)
//! - [`ArboardClipboard`] - system clipboard using arboard
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles for all adapters.

pub mod arboard_clipboard;
pub mod http_gateway;
pub mod mock;
pub mod reqwest_http;

pub use arboard_clipboard::ArboardClipboard;
pub use http_gateway::HttpGateway;
pub use mock::{InMemoryClipboard, MockGateway, MockHttpClient};
pub use reqwest_http::ReqwestHttpClient;
