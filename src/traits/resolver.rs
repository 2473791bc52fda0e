//! Resolver traits for service resolution.

use std::any::{type_name, Any};
use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::params::{Instance, Param};
use crate::traits::{Constructor, Injectable};

/// Core resolver trait for object-safe service resolution.
///
/// Implementors provide the two type-erased entry points. Most users should
/// use the [`Resolver`] trait instead, which adds typed generic methods on
/// top of this trait.
pub trait ResolverCore: Send + Sync {
    /// Singleton resolution: returns the cached instance for a registered
    /// constructible, or builds (and caches, when registered) a new one.
    fn resolve_constructor(&self, constructor: &Constructor, params: &[Param]) -> DiResult<Instance>;

    /// Fresh construction: same argument computation as
    /// [`resolve_constructor`](Self::resolve_constructor), but never reads or
    /// writes the instance cache.
    fn create_constructor(&self, constructor: &Constructor, params: &[Param]) -> DiResult<Instance>;
}

/// Typed resolution API.
///
/// Blanket-implemented for every [`ResolverCore`].
///
/// # Examples
///
/// ```rust
/// use ferrous_injector::{Args, DiResult, Injectable, Injector, Resolver};
/// use std::sync::Arc;
///
/// struct Cache;
/// impl Injectable for Cache {
///     fn construct(_: Args) -> DiResult<Self> { Ok(Cache) }
/// }
///
/// let injector = Injector::new();
/// injector.register::<Cache>().unwrap();
///
/// let a = injector.resolve::<Cache>().unwrap();
/// let b = injector.resolve::<Cache>().unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
///
/// let fresh = injector.create::<Cache>().unwrap();
/// assert!(!Arc::ptr_eq(&a, &fresh));
/// ```
pub trait Resolver: ResolverCore {
    /// Resolves a singleton of `T`, injecting everything from the registry.
    fn resolve<T: Injectable>(&self) -> DiResult<Arc<T>> {
        self.resolve_with::<T>(&[])
    }

    /// Resolves a singleton of `T` with positional explicit parameters.
    ///
    /// Parameters are ignored when `T` is already cached.
    fn resolve_with<T: Injectable>(&self, params: &[Param]) -> DiResult<Arc<T>> {
        downcast(self.resolve_constructor(&Constructor::of::<T>(), params)?)
    }

    /// Builds a fresh `T`, bypassing the instance cache.
    fn create<T: Injectable>(&self) -> DiResult<Arc<T>> {
        self.create_with::<T>(&[])
    }

    /// Builds a fresh `T` with positional explicit parameters.
    fn create_with<T: Injectable>(&self, params: &[Param]) -> DiResult<Arc<T>> {
        downcast(self.create_constructor(&Constructor::of::<T>(), params)?)
    }

    /// Resolves a type-erased target.
    ///
    /// The target must be a [`Constructor`]; anything else (an already built
    /// instance, a plain value) fails with [`DiError::NotConstructible`].
    fn resolve_target<V: Any>(&self, target: &V, params: &[Param]) -> DiResult<Instance> {
        self.resolve_constructor(as_constructor(target)?, params)
    }

    /// Type-erased counterpart of [`create_with`](Self::create_with).
    fn create_target<V: Any>(&self, target: &V, params: &[Param]) -> DiResult<Instance> {
        self.create_constructor(as_constructor(target)?, params)
    }
}

impl<R: ResolverCore + ?Sized> Resolver for R {}

fn as_constructor<V: Any>(target: &V) -> DiResult<&Constructor> {
    (target as &dyn Any)
        .downcast_ref::<Constructor>()
        .ok_or(DiError::NotConstructible(type_name::<V>()))
}

/// Downcasts a resolved instance to `Arc<T>`.
pub fn downcast<T: Any + Send + Sync>(instance: Instance) -> DiResult<Arc<T>> {
    instance
        .downcast::<T>()
        .map_err(|_| DiError::Downcast(type_name::<T>()))
}
