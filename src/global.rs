//! The process-wide injector instance.

use once_cell::sync::Lazy;
use tracing::warn;

use crate::config::InjectorOptions;
use crate::injector::Injector;

// Created on first access, with options taken from the environment.
static GLOBAL_INJECTOR: Lazy<Injector> = Lazy::new(|| {
    let options = InjectorOptions::from_env().unwrap_or_else(|err| {
        warn!(error = %err, "ignoring injector environment overrides");
        InjectorOptions::default()
    });
    Injector::with_options(options)
});

/// The shared injector every part of an application registers into.
///
/// Options are read once from `FERROUS_INJECTOR_*` environment variables;
/// invalid values are logged and replaced by defaults.
///
/// # Examples
///
/// ```
/// use ferrous_injector::{global, Args, DiResult, Injectable, Resolver};
///
/// struct Clock;
/// impl Injectable for Clock {
///     fn construct(_: Args) -> DiResult<Self> { Ok(Clock) }
/// }
///
/// let clock = global().bootstrap::<Clock>().unwrap();
/// assert!(std::sync::Arc::ptr_eq(&clock, &global().resolve::<Clock>().unwrap()));
/// ```
pub fn global() -> &'static Injector {
    &GLOBAL_INJECTOR
}
