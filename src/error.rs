//! Error types for the dependency injection container.

use thiserror::Error;

use crate::token::Token;

/// Dependency injection errors
///
/// Represents the various error conditions that can occur during service
/// registration, resolution, or tree introspection. None of them are
/// recovered internally: every failure is returned to the immediate caller.
///
/// # Examples
///
/// ```rust
/// use ferrous_injector::{DiError, Injectable, Args, DiResult, Injector};
///
/// struct Clock;
///
/// impl Injectable for Clock {
///     fn construct(_: Args) -> DiResult<Self> {
///         Ok(Clock)
///     }
/// }
///
/// let injector = Injector::new();
/// injector.register::<Clock>().unwrap();
///
/// match injector.register::<Clock>() {
///     Err(DiError::AlreadyRegistered(name)) => assert!(name.ends_with("Clock")),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, Error)]
pub enum DiError {
    /// The same constructible was registered twice
    #[error("{0} already registered")]
    AlreadyRegistered(&'static str),
    /// The type was never registered as a service
    #[error("{0} is not registered as a service")]
    NotAService(&'static str),
    /// A resolution target is not a constructible
    #[error("{0} is not a constructor")]
    NotConstructible(&'static str),
    /// A declared parameter carries no type information
    #[error(
        "Dependency has type is unknown. It may be a circular dependency or a missing custom parameter \
         (parameter {position} of {service})"
    )]
    CircularOrUnresolved {
        service: &'static str,
        position: usize,
    },
    /// A declared, non-registered parameter has no explicit value (strict mode)
    #[error("Can not resolve dependency {dependency} at parameter {position} of {service}: no custom parameter provided and it is not a registered service")]
    Unresolvable {
        service: &'static str,
        position: usize,
        dependency: &'static str,
    },
    /// Circular dependency detected (includes path)
    #[error("Circular dependency: {}", .0.join(" -> "))]
    Circular(Vec<&'static str>),
    /// Maximum recursion depth exceeded
    #[error("Max depth {0} exceeded")]
    DepthExceeded(usize),
    /// An injected argument does not have the type the constructor asked for
    #[error("Type mismatch for parameter {position}: expected {expected}")]
    TypeMismatch {
        position: usize,
        expected: &'static str,
    },
    /// A constructor required an argument that resolved to nothing
    #[error("Missing argument for parameter {position}: expected {expected}")]
    MissingArgument {
        position: usize,
        expected: &'static str,
    },
    /// A resolved instance could not be downcast to the requested type
    #[error("Type mismatch for: {0}")]
    Downcast(&'static str),
    /// No service is registered under the token
    #[error("Unknown service token: {0}")]
    UnknownToken(Token),
    /// A constructor reported a failure of its own
    #[error("Failed to construct {service}: {message}")]
    Construction {
        service: &'static str,
        message: String,
    },
    /// Invalid injector options
    #[error("Invalid configuration: {0}")]
    Config(String),
    /// Dependency tree serialization failed
    #[error("Export failed: {0}")]
    Export(String),
}

impl DiError {
    /// Builds a [`DiError::Construction`] for the type `T`.
    ///
    /// Convenience for `Injectable::construct` implementations that need to
    /// surface their own validation failures.
    pub fn construction<T: 'static>(message: impl Into<String>) -> Self {
        DiError::Construction {
            service: std::any::type_name::<T>(),
            message: message.into(),
        }
    }
}

/// Result type for DI operations
pub type DiResult<T> = Result<T, DiError>;
