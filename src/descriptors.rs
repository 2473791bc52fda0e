//! Service descriptors for introspection and diagnostics.

use crate::key::TypeKey;
use crate::registration::Registration;
use crate::token::Token;
use crate::traits::ParamType;

/// Service descriptor for introspection and diagnostics
///
/// A read-only snapshot of one registration: the token it was assigned, the
/// type behind it, where it was registered and what its constructor
/// declares.
///
/// # Examples
///
/// ```rust
/// use ferrous_injector::{Args, DiResult, Injectable, Injector, ParamType};
///
/// struct Config;
/// impl Injectable for Config {
///     fn construct(_: Args) -> DiResult<Self> { Ok(Config) }
/// }
///
/// struct Server;
/// impl Injectable for Server {
///     fn dependencies() -> Vec<ParamType> { vec![ParamType::of::<Config>(), ParamType::of::<u16>()] }
///     fn construct(_: Args) -> DiResult<Self> { Ok(Server) }
/// }
///
/// let injector = Injector::new();
/// injector.register::<Config>().unwrap();
/// let token = injector.register::<Server>().unwrap();
///
/// let descriptors = injector.descriptors();
/// assert_eq!(descriptors.len(), 2);
///
/// let server = &descriptors[1];
/// assert_eq!(server.token, token);
/// assert_eq!(server.name(), "Server");
/// assert_eq!(server.dependencies.len(), 2);
/// assert!(server.source_location.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    /// Token assigned at registration
    pub token: Token,
    /// Identity of the registered type
    pub key: TypeKey,
    /// Where the service was registered, when known
    pub source_location: Option<String>,
    /// Declared constructor parameter types, in order
    pub dependencies: Vec<ParamType>,
}

impl ServiceDescriptor {
    pub(crate) fn from_registration(registration: &Registration) -> Self {
        Self {
            token: registration.token.clone(),
            key: *registration.constructor.key(),
            source_location: registration.declared_in.clone(),
            dependencies: registration.constructor.dependencies().to_vec(),
        }
    }

    /// Display name: the type name without module paths.
    pub fn name(&self) -> String {
        self.key.short_name()
    }

    /// Full type name.
    pub fn type_name(&self) -> &'static str {
        self.key.name()
    }
}
