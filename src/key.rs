//! Type identity keys for constructibles.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a constructible type.
///
/// Two keys are equal when they refer to the same Rust type; the stored name
/// is carried only for diagnostics and tree rendering.
///
/// # Examples
///
/// ```rust
/// use ferrous_injector::{key_of_type, TypeKey};
///
/// struct Database;
///
/// let key: TypeKey = key_of_type::<Database>();
/// assert!(key.name().ends_with("Database"));
/// assert_eq!(key.short_name(), "Database");
/// assert_eq!(key, key_of_type::<Database>());
/// assert_ne!(key, key_of_type::<String>());
/// ```
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Key for the type `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The `TypeId` this key compares by.
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Full type name as reported by `std::any::type_name`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name with module paths stripped, generics included.
    ///
    /// `app::services::Repo<app::model::User>` becomes `Repo<User>`.
    pub fn short_name(&self) -> String {
        short_type_name(self.name)
    }
}

// Equality and hashing ignore the name: TypeId is the identity
impl PartialEq for TypeKey {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    #[inline(always)]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[inline(always)]
pub fn key_of_type<T: ?Sized + 'static>() -> TypeKey {
    TypeKey::of::<T>()
}

/// Strips every `path::` prefix from a type name.
pub(crate) fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();
    let mut chars = full.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            segment.clear();
        } else if c.is_alphanumeric() || c == '_' {
            segment.push(c);
        } else {
            out.push_str(&segment);
            segment.clear();
            out.push(c);
        }
    }
    out.push_str(&segment);
    out
}
