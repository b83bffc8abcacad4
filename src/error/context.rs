//! Error context for enriched error information.
//!
//! Context is attached where an error crosses a feature boundary so the log
//! line says which operation and instance it belonged to.

use chrono::{DateTime, Utc};

/// Context information attached to errors for debugging.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorContext {
    /// Human-readable description of the operation that failed.
    pub operation: String,

    /// Instance ID if the error occurred for a specific instance.
    pub instance_id: Option<String>,

    /// Operation ID of a long-running backend task, if any.
    pub operation_id: Option<String>,

    /// Timestamp when the error occurred.
    pub timestamp: DateTime<Utc>,

    /// Optional component/module where the error originated.
    pub component: Option<String>,
}

impl ErrorContext {
    /// Create a new ErrorContext for an operation.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            instance_id: None,
            operation_id: None,
            timestamp: Utc::now(),
            component: None,
        }
    }

    /// Set the instance ID for this context.
    pub fn with_instance_id(mut self, instance_id: impl Into<String>) -> Self {
        self.instance_id = Some(instance_id.into());
        self
    }

    /// Set the backend operation ID for this context.
    pub fn with_operation_id(mut self, operation_id: impl Into<String>) -> Self {
        self.operation_id = Some(operation_id.into());
        self
    }

    /// Set the component for this context.
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Get a formatted context string suitable for logging.
    pub fn to_log_string(&self) -> String {
        let mut parts = vec![format!("operation={}", self.operation)];

        if let Some(ref instance_id) = self.instance_id {
            parts.push(format!("instance_id={}", instance_id));
        }

        if let Some(ref operation_id) = self.operation_id {
            parts.push(format!("operation_id={}", operation_id));
        }

        if let Some(ref component) = self.component {
            parts.push(format!("component={}", component));
        }

        parts.push(format!("timestamp={}", self.timestamp.to_rfc3339()));

        parts.join(" ")
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.operation)?;

        if let Some(ref instance_id) = self.instance_id {
            write!(f, " instance={}", instance_id)?;
        }

        Ok(())
    }
}
