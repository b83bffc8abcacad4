//! Result type alias for packdeck operations.

use super::context::ErrorContext;
use super::deck_error::DeckError;

/// Type alias for Results using DeckError.
pub type DeckResult<T> = Result<T, DeckError>;

/// Extension trait for Result types to add context to errors.
pub trait ResultExt<T> {
    /// Add context to an error if the result is Err.
    ///
    /// ```ignore
    /// use packdeck::error::{ErrorContext, ResultExt};
    ///
    /// let instances = api.list_instances().await
    ///     .context(ErrorContext::new("list_instances"))?;
    /// ```
    fn context(self, ctx: ErrorContext) -> DeckResult<T>;

    /// Add context using a closure (only called on error).
    fn with_context<F>(self, f: F) -> DeckResult<T>
    where
        F: FnOnce() -> ErrorContext;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<DeckError>,
{
    fn context(self, ctx: ErrorContext) -> DeckResult<T> {
        self.map_err(|e| e.into().with_context(ctx))
    }

    fn with_context<F>(self, f: F) -> DeckResult<T>
    where
        F: FnOnce() -> ErrorContext,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CommandError;

    #[test]
    fn test_context_on_command_error() {
        let result: Result<(), CommandError> = Err(CommandError::Transport {
            command: "list_instances".to_string(),
            message: "refused".to_string(),
        });
        let err = result.context(ErrorContext::new("mount_instances")).unwrap_err();
        assert_eq!(err.context().unwrap().operation, "mount_instances");
    }

    #[test]
    fn test_with_context_is_lazy() {
        let result: Result<u8, CommandError> = Ok(1);
        let value = result
            .with_context(|| panic!("closure must not run on Ok"))
            .unwrap();
        assert_eq!(value, 1);
    }
}
