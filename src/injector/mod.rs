//! The injector context: registry, instance cache and options.
//!
//! This module contains the [`Injector`] type and its registration surface.
//! Resolution lives in `resolve.rs`, dependency-tree introspection in
//! [`crate::tree`].

use std::any::{type_name, Any};
use std::panic::Location;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::cache::InstanceCache;
use crate::config::InjectorOptions;
use crate::descriptors::ServiceDescriptor;
use crate::error::{DiError, DiResult};
use crate::key::TypeKey;
use crate::registration::Registry;
use crate::token::Token;
use crate::traits::{Constructor, Injectable, Resolver};

mod resolve;

/// Dependency injection context.
///
/// Holds the service registry (token ↔ constructible), the singleton cache
/// (token → instance) and the options. The process-wide instance is
/// available through [`global()`](crate::global); tests build isolated ones
/// with [`Injector::new`].
///
/// # Thread Safety
///
/// The injector is `Send + Sync`. Registry and cache are each guarded by
/// their own lock, and no lock is held while a constructor runs, so
/// constructors may call back into the injector. Check-then-insert sequences
/// are not atomic: two threads resolving the same cold singleton can both
/// build it, and the last one to finish is the one that stays cached.
///
/// # Examples
///
/// ```
/// use ferrous_injector::{Args, DiResult, Injectable, Injector, ParamType, Resolver};
/// use std::sync::Arc;
///
/// struct Database { url: String }
/// impl Injectable for Database {
///     fn construct(_: Args) -> DiResult<Self> {
///         Ok(Database { url: "postgres://localhost".to_string() })
///     }
/// }
///
/// struct UserService { db: Arc<Database> }
/// impl Injectable for UserService {
///     fn dependencies() -> Vec<ParamType> { vec![ParamType::of::<Database>()] }
///     fn construct(args: Args) -> DiResult<Self> {
///         Ok(UserService { db: args.required(0)? })
///     }
/// }
///
/// let injector = Injector::new();
/// injector.register::<Database>().unwrap();
/// injector.register::<UserService>().unwrap();
///
/// let users = injector.resolve::<UserService>().unwrap();
/// assert_eq!(users.db.url, "postgres://localhost");
/// ```
pub struct Injector {
    pub(crate) registry: RwLock<Registry>,
    cache: Mutex<InstanceCache>,
    pub(crate) options: InjectorOptions,
}

impl Injector {
    /// Creates an empty injector with default options.
    pub fn new() -> Self {
        Self::with_options(InjectorOptions::default())
    }

    pub fn with_options(options: InjectorOptions) -> Self {
        Self {
            registry: RwLock::new(Registry::new()),
            cache: Mutex::new(InstanceCache::new()),
            options,
        }
    }

    pub fn options(&self) -> &InjectorOptions {
        &self.options
    }

    /// Registers `T` as a service and returns its token.
    ///
    /// The caller's source location is recorded for diagnostics. Fails with
    /// [`DiError::AlreadyRegistered`] when `T` is already registered.
    #[track_caller]
    pub fn register<T: Injectable>(&self) -> DiResult<Token> {
        let location = Location::caller();
        self.register_constructor(Constructor::of::<T>(), Some(format_location(location)))
    }

    /// Registers a type-erased constructible with an optional source location.
    pub fn register_constructor(
        &self,
        constructor: Constructor,
        source_location: Option<String>,
    ) -> DiResult<Token> {
        let name = constructor.name();
        let token = self.registry.write().insert(constructor, source_location)?;
        debug!(service = name, %token, "registered service");
        Ok(token)
    }

    /// Token of a registered `T`.
    pub fn token_of<T: ?Sized + 'static>(&self) -> Option<Token> {
        self.token_of_key(&TypeKey::of::<T>())
    }

    pub fn token_of_key(&self, key: &TypeKey) -> Option<Token> {
        self.registry.read().token_of(key).cloned()
    }

    /// The constructible registered under `token`.
    pub fn constructor_of(&self, token: &Token) -> Option<Constructor> {
        self.registry.read().get(token).map(|r| r.constructor.clone())
    }

    pub fn is_registered<T: ?Sized + 'static>(&self) -> bool {
        self.registry.read().contains_key(&TypeKey::of::<T>())
    }

    /// Associates an existing instance with registered `T`.
    ///
    /// Subsequent `resolve::<T>()` calls return this instance. Fails with
    /// [`DiError::NotAService`] when `T` was never registered.
    pub fn set<T: Any + Send + Sync>(&self, instance: Arc<T>) -> DiResult<()> {
        let token = self
            .token_of::<T>()
            .ok_or(DiError::NotAService(type_name::<T>()))?;
        debug!(service = type_name::<T>(), %token, "instance associated");
        self.cache.lock().insert(token, instance);
        Ok(())
    }

    /// Drops every cached singleton. Registrations are kept.
    pub fn reset(&self) {
        let dropped = self.cache.lock().clear();
        debug!(dropped, "instance cache cleared");
    }

    /// Whether a singleton for `token` is currently cached.
    pub fn is_cached(&self, token: &Token) -> bool {
        self.cache.lock().contains(token)
    }

    pub fn cached_count(&self) -> usize {
        self.cache.lock().len()
    }

    /// Descriptors of every registration, in registration order.
    pub fn descriptors(&self) -> Vec<ServiceDescriptor> {
        self.registry
            .read()
            .iter()
            .map(ServiceDescriptor::from_registration)
            .collect()
    }

    pub fn descriptor(&self, token: &Token) -> Option<ServiceDescriptor> {
        self.registry
            .read()
            .get(token)
            .map(ServiceDescriptor::from_registration)
    }

    pub fn len(&self) -> usize {
        self.registry.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Application entry point: registers `T` if needed and resolves it.
    #[track_caller]
    pub fn bootstrap<T: Injectable>(&self) -> DiResult<Arc<T>> {
        if !self.is_registered::<T>() {
            let location = Location::caller();
            self.register_constructor(Constructor::of::<T>(), Some(format_location(location)))?;
        }
        self.resolve::<T>()
    }
}

impl Default for Injector {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Injector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Injector")
            .field("services", &self.len())
            .field("cached", &self.cached_count())
            .field("options", &self.options)
            .finish()
    }
}

fn format_location(location: &Location<'_>) -> String {
    format!("{}:{}:{}", location.file(), location.line(), location.column())
}
