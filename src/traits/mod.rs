//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP transport used by the command gateway
//! - [`CommandGateway`] - request/response bridge to the launcher backend
//! - [`ClipboardProvider`] - system clipboard text access

pub mod clipboard;
pub mod gateway;
pub mod http;

pub use clipboard::ClipboardProvider;
pub use gateway::{CommandGateway, CommandGatewayExt};
pub use http::{Headers, HttpClient, HttpError, Response};
