//! Explicit call-site parameters and the argument list handed to constructors.

use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

use crate::error::{DiError, DiResult};

/// Type-erased realized object.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// An explicit parameter supplied at a `resolve_with` / `create_with` call.
///
/// Explicit parameters are positional: the value at index `i` overrides the
/// registry for the constructor's `i`-th declared parameter, whatever its
/// declared type. A position that is not supplied at all behaves exactly like
/// [`Param::Skip`]; both fall back to registry resolution. `Option::None`
/// converts to `Skip` as well.
///
/// # Examples
///
/// ```rust
/// use ferrous_injector::Param;
///
/// let params = vec![Param::Skip, Param::value(8080u16), Param::from(None::<String>)];
/// assert!(params[0].is_skip());
/// assert!(!params[1].is_skip());
/// assert!(params[2].is_skip());
/// ```
#[derive(Clone)]
pub enum Param {
    /// Use this value verbatim
    Value(Instance),
    /// Fall back to registry resolution for this position
    Skip,
}

impl Param {
    /// Wraps an owned value.
    pub fn value<T: Any + Send + Sync>(value: T) -> Self {
        Param::Value(Arc::new(value))
    }

    /// Passes an already shared instance, keeping its identity.
    pub fn shared<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Param::Value(value)
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, Param::Skip)
    }
}

impl<T: Any + Send + Sync> From<Option<T>> for Param {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Param::value(v),
            None => Param::Skip,
        }
    }
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Value(_) => f.write_str("Param::Value(..)"),
            Param::Skip => f.write_str("Param::Skip"),
        }
    }
}

/// Computed constructor arguments, one slot per declared parameter.
///
/// A slot is `None` when the parameter was neither supplied explicitly nor
/// resolvable from the registry. Constructors decide whether that is an
/// error ([`Args::required`]) or a default ([`Args::value_or`]).
pub struct Args {
    service: &'static str,
    slots: Vec<Option<Instance>>,
}

impl Args {
    pub(crate) fn new(service: &'static str, slots: Vec<Option<Instance>>) -> Self {
        Self { service, slots }
    }

    /// Name of the type being constructed.
    pub fn service(&self) -> &'static str {
        self.service
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether the slot at `position` holds a value.
    pub fn is_set(&self, position: usize) -> bool {
        matches!(self.slots.get(position), Some(Some(_)))
    }

    /// The raw instance at `position`, if any.
    pub fn raw(&self, position: usize) -> Option<&Instance> {
        self.slots.get(position).and_then(Option::as_ref)
    }

    /// The argument at `position` as `Arc<T>`, or `None` when unset.
    ///
    /// Fails with [`DiError::TypeMismatch`] when the slot holds another type.
    pub fn get<T: Any + Send + Sync>(&self, position: usize) -> DiResult<Option<Arc<T>>> {
        match self.raw(position) {
            None => Ok(None),
            Some(instance) => instance
                .clone()
                .downcast::<T>()
                .map(Some)
                .map_err(|_| DiError::TypeMismatch {
                    position,
                    expected: type_name::<T>(),
                }),
        }
    }

    /// The argument at `position`, failing with [`DiError::MissingArgument`]
    /// when unset.
    pub fn required<T: Any + Send + Sync>(&self, position: usize) -> DiResult<Arc<T>> {
        self.get::<T>(position)?.ok_or(DiError::MissingArgument {
            position,
            expected: type_name::<T>(),
        })
    }

    /// A cloned plain value at `position`, or `None` when unset.
    pub fn value<T: Any + Send + Sync + Clone>(&self, position: usize) -> DiResult<Option<T>> {
        Ok(self.get::<T>(position)?.map(|v| (*v).clone()))
    }

    /// A cloned plain value at `position`, or `default` when unset.
    pub fn value_or<T: Any + Send + Sync + Clone>(&self, position: usize, default: T) -> DiResult<T> {
        Ok(self.value::<T>(position)?.unwrap_or(default))
    }
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let set: Vec<bool> = self.slots.iter().map(Option::is_some).collect();
        f.debug_struct("Args")
            .field("service", &self.service)
            .field("set", &set)
            .finish()
    }
}
