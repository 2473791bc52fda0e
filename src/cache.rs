//! Singleton instance cache keyed by service token.

use std::collections::HashMap;

use crate::params::Instance;
use crate::token::Token;

/// Realized singletons, one per token.
///
/// Only `resolve` populates the cache; `create` never touches it. Clearing
/// the cache leaves the registry intact, so cleared services are simply
/// re-instantiated on their next resolution.
#[derive(Default)]
pub(crate) struct InstanceCache {
    instances: HashMap<Token, Instance>,
}

impl InstanceCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn get(&self, token: &Token) -> Option<Instance> {
        self.instances.get(token).cloned()
    }

    pub(crate) fn insert(&mut self, token: Token, instance: Instance) {
        self.instances.insert(token, instance);
    }

    pub(crate) fn contains(&self, token: &Token) -> bool {
        self.instances.contains_key(token)
    }

    pub(crate) fn clear(&mut self) -> usize {
        let dropped = self.instances.len();
        self.instances.clear();
        dropped
    }

    pub(crate) fn len(&self) -> usize {
        self.instances.len()
    }
}
