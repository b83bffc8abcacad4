//! Command gateway trait.
//!
//! One named backend operation, one JSON argument bag, one awaited result.
//! The gateway performs no retries, timeouts or backoff: callers catch the
//! error, store its message and decide what to do.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::CommandError;

/// Request/response bridge to the launcher backend.
///
/// # Example
///
/// ```ignore
/// use packdeck::traits::{CommandGateway, CommandGatewayExt};
///
/// async fn count<G: CommandGateway + ?Sized>(gateway: &G) -> Result<usize, CommandError> {
///     let ids: Vec<String> = gateway.invoke_typed("list_instance_ids", json!({})).await?;
///     Ok(ids.len())
/// }
/// ```
#[async_trait]
pub trait CommandGateway: Send + Sync {
    /// Invoke `command` with `args` and return the raw JSON result.
    async fn invoke(&self, command: &str, args: Value) -> Result<Value, CommandError>;
}

/// Typed decoding on top of [`CommandGateway::invoke`].
#[async_trait]
pub trait CommandGatewayExt: CommandGateway {
    /// Invoke and decode the result into `T`.
    async fn invoke_typed<T>(&self, command: &str, args: Value) -> Result<T, CommandError>
    where
        T: DeserializeOwned + Send,
    {
        let value = self.invoke(command, args).await?;
        serde_json::from_value(value).map_err(|e| CommandError::Decode {
            command: command.to_string(),
            message: e.to_string(),
        })
    }

    /// Invoke a command whose result carries no information.
    async fn invoke_unit(&self, command: &str, args: Value) -> Result<(), CommandError> {
        self.invoke(command, args).await.map(|_| ())
    }
}

impl<G: CommandGateway + ?Sized> CommandGatewayExt for G {}
