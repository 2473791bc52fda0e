//! Service registration types.

use std::collections::HashMap;

use crate::error::{DiError, DiResult};
use crate::key::TypeKey;
use crate::token::Token;
use crate::traits::Constructor;

/// A registered constructible with its token and declaration site.
#[derive(Debug, Clone)]
pub(crate) struct Registration {
    pub(crate) token: Token,
    pub(crate) constructor: Constructor,
    pub(crate) declared_in: Option<String>,
}

/// Service registry holding all registrations.
///
/// Entries keep registration order; two side tables index them by token and
/// by type identity so that both directions are O(1).
#[derive(Default)]
pub(crate) struct Registry {
    entries: Vec<Registration>,
    by_token: HashMap<Token, usize>,
    by_key: HashMap<TypeKey, usize>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Registers a constructible under a freshly minted token.
    pub(crate) fn insert(
        &mut self,
        constructor: Constructor,
        declared_in: Option<String>,
    ) -> DiResult<Token> {
        let key = *constructor.key();
        if self.by_key.contains_key(&key) {
            return Err(DiError::AlreadyRegistered(key.name()));
        }

        let token = Token::mint(|candidate| self.by_token.contains_key(candidate));
        let index = self.entries.len();
        self.entries.push(Registration {
            token: token.clone(),
            constructor,
            declared_in,
        });
        self.by_token.insert(token.clone(), index);
        self.by_key.insert(key, index);
        Ok(token)
    }

    #[inline]
    pub(crate) fn get(&self, token: &Token) -> Option<&Registration> {
        self.by_token.get(token).map(|&i| &self.entries[i])
    }

    #[inline]
    pub(crate) fn lookup(&self, key: &TypeKey) -> Option<&Registration> {
        self.by_key.get(key).map(|&i| &self.entries[i])
    }

    #[inline]
    pub(crate) fn token_of(&self, key: &TypeKey) -> Option<&Token> {
        self.lookup(key).map(|r| &r.token)
    }

    pub(crate) fn contains_key(&self, key: &TypeKey) -> bool {
        self.by_key.contains_key(key)
    }

    /// Registrations in registration order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Registration> {
        self.entries.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
