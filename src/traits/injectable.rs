//! Constructible types and their declared dependencies.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::DiResult;
use crate::key::TypeKey;
use crate::params::{Args, Instance};

/// Declared type of one constructor parameter.
///
/// When the declared type is a registered service, the injector resolves it;
/// any other declared type is a value slot the caller fills with an explicit
/// parameter. `Unknown` records that no type information is available, which
/// the injector reports as a likely circular dependency or a missing custom
/// parameter.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Declared(TypeKey),
    Unknown,
}

impl ParamType {
    /// Declares a parameter of type `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        ParamType::Declared(TypeKey::of::<T>())
    }

    pub fn key(&self) -> Option<&TypeKey> {
        match self {
            ParamType::Declared(key) => Some(key),
            ParamType::Unknown => None,
        }
    }
}

impl fmt::Debug for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Declared(key) => write!(f, "{}", key.name()),
            ParamType::Unknown => f.write_str("<unknown>"),
        }
    }
}

/// A type the injector can build from its declared constructor parameters.
///
/// `dependencies` plays the role of constructor-parameter reflection: it
/// returns one [`ParamType`] per parameter, in order. `construct` receives
/// the computed [`Args`] in the same order.
///
/// # Examples
///
/// ```rust
/// use ferrous_injector::{Args, DiResult, Injectable, Injector, ParamType, Resolver};
/// use std::sync::Arc;
///
/// struct Database;
///
/// impl Injectable for Database {
///     fn construct(_: Args) -> DiResult<Self> {
///         Ok(Database)
///     }
/// }
///
/// struct UserService {
///     port: u16,
///     db: Arc<Database>,
/// }
///
/// impl Injectable for UserService {
///     fn dependencies() -> Vec<ParamType> {
///         vec![ParamType::of::<u16>(), ParamType::of::<Database>()]
///     }
///
///     fn construct(args: Args) -> DiResult<Self> {
///         Ok(UserService {
///             port: args.value_or(0, 8080u16)?,
///             db: args.required(1)?,
///         })
///     }
/// }
///
/// let injector = Injector::new();
/// injector.register::<Database>().unwrap();
/// injector.register::<UserService>().unwrap();
///
/// let users = injector.resolve::<UserService>().unwrap();
/// assert_eq!(users.port, 8080);
/// assert!(Arc::ptr_eq(&users.db, &injector.resolve::<Database>().unwrap()));
/// ```
pub trait Injectable: Any + Send + Sync + Sized {
    /// Declared constructor parameter types, in order.
    fn dependencies() -> Vec<ParamType> {
        Vec::new()
    }

    /// Builds the instance from the computed arguments.
    fn construct(args: Args) -> DiResult<Self>;
}

type ConstructFn = dyn Fn(Args) -> DiResult<Instance> + Send + Sync;

/// Type-erased constructible: identity, declared parameters and a factory.
///
/// Built from an [`Injectable`] type with [`Constructor::of`], or from a
/// closure with [`Constructor::from_fn`] for types that cannot implement the
/// trait (foreign types, test doubles).
#[derive(Clone)]
pub struct Constructor {
    key: TypeKey,
    dependencies: Arc<[ParamType]>,
    construct: Arc<ConstructFn>,
}

impl Constructor {
    pub fn of<T: Injectable>() -> Self {
        Self {
            key: TypeKey::of::<T>(),
            dependencies: T::dependencies().into(),
            construct: Arc::new(|args: Args| -> DiResult<Instance> {
                Ok(Arc::new(T::construct(args)?) as Instance)
            }),
        }
    }

    /// Constructible for `T` backed by a closure.
    pub fn from_fn<T, F>(dependencies: Vec<ParamType>, construct: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(Args) -> DiResult<T> + Send + Sync + 'static,
    {
        Self {
            key: TypeKey::of::<T>(),
            dependencies: dependencies.into(),
            construct: Arc::new(move |args: Args| -> DiResult<Instance> {
                Ok(Arc::new(construct(args)?) as Instance)
            }),
        }
    }

    pub fn key(&self) -> &TypeKey {
        &self.key
    }

    pub fn name(&self) -> &'static str {
        self.key.name()
    }

    /// Declared constructor parameter types, in order.
    pub fn dependencies(&self) -> &[ParamType] {
        &self.dependencies
    }

    pub(crate) fn construct(&self, args: Args) -> DiResult<Instance> {
        (self.construct)(args)
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("key", &self.key)
            .field("dependencies", &self.dependencies)
            .finish()
    }
}
