//! Unified error handling for packdeck.
//!
//! - **Error Categories**: coarse classification for display decisions
//! - **Domain-specific Errors**: command gateway, event channel, config, system
//! - **Unified Error Type**: `DeckError` consolidates all error types
//! - **Error Context**: operation / instance metadata attached to errors
//! - **Result Type Alias**: `DeckResult<T>`
//!
//! Feature stores never hold a `DeckError`. They keep the display string
//! produced by [`CommandError::user_message`], because the backend error is
//! opaque and the UI only ever shows it inline.
//!
//! | Category | Description | Retry hint |
//! |----------|-------------|-----------|
//! | Network | Backend unreachable, socket closed | Yes |
//! | Backend | Backend reported a failure | Yes |
//! | Client | Unexpected response shape | No |
//! | User | User action required | No |
//! | System | OS/filesystem/clipboard | No |
//! | Configuration | Config issues | No |

mod category;
mod channel;
mod command;
mod config;
mod context;
mod deck_error;
mod result;
mod system;

pub use category::ErrorCategory;
pub use channel::ChannelError;
pub use command::{extract_error_message, CommandError};
pub use config::ConfigError;
pub use context::ErrorContext;
pub use deck_error::DeckError;
pub use result::{DeckResult, ResultExt};
pub use system::{classify_io_error, SystemError};
