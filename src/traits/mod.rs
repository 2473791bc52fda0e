//! Core traits for the dependency injection container.

mod injectable;
mod resolver;

pub use injectable::{Constructor, Injectable, ParamType};
pub use resolver::{downcast, Resolver, ResolverCore};
