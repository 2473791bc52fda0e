//! Opaque service tokens.

use std::fmt;
use std::sync::Arc;

use rand::Rng;

const TOKEN_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const TOKEN_LEN: usize = 11;

/// Opaque unique identifier minted when a service is registered.
///
/// Tokens key both the registry and the instance cache. They are cheap to
/// clone and compare by value.
///
/// # Examples
///
/// ```rust
/// use ferrous_injector::Token;
///
/// let token = Token::from("ytbu9nb4hyc");
/// assert_eq!(token.as_str(), "ytbu9nb4hyc");
/// assert_eq!(token.to_string(), "ytbu9nb4hyc");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token(Arc<str>);

impl Token {
    /// Mints a random token for which `taken` returns `false`.
    pub(crate) fn mint(taken: impl Fn(&Token) -> bool) -> Self {
        let mut rng = rand::thread_rng();
        loop {
            let raw: String = (0..TOKEN_LEN)
                .map(|_| TOKEN_ALPHABET[rng.gen_range(0..TOKEN_ALPHABET.len())] as char)
                .collect();
            let token = Token(Arc::from(raw));
            if !taken(&token) {
                return token;
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Token(Arc::from(value))
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Token(Arc::from(value))
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({})", self.0)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(feature = "graph-export")]
impl serde::Serialize for Token {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "graph-export")]
impl<'de> serde::Deserialize<'de> for Token {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Token::from(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn minted_tokens_are_base36() {
        let token = Token::mint(|_| false);
        assert_eq!(token.as_str().len(), TOKEN_LEN);
        assert!(token
            .as_str()
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase()));
    }

    #[test]
    fn mint_retries_on_collision() {
        let rejected = std::cell::RefCell::new(HashSet::new());
        let token = Token::mint(|candidate| {
            let mut seen = rejected.borrow_mut();
            // Reject the first three candidates
            if seen.len() < 3 {
                seen.insert(candidate.clone());
                true
            } else {
                false
            }
        });
        assert_eq!(rejected.borrow().len(), 3);
        assert!(!rejected.borrow().contains(&token));
    }
}
