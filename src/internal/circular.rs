//! Circular dependency detection infrastructure.

use std::cell::RefCell;

use crate::error::{DiError, DiResult};
use crate::key::TypeKey;

// Thread-local stack of constructions currently in progress, tagged with the
// address of the injector that started each one
thread_local! {
    static RESOLUTION_TLS: RefCell<Vec<(usize, TypeKey)>> = const { RefCell::new(Vec::new()) };
}

/// Guard marking a type as "currently being constructed" by one injector on
/// this thread.
///
/// Entering a type that the same injector already has on the stack is a
/// circular dependency. Entries owned by other injectors are ignored, both for
/// cycle detection and for the depth limit. The guard pops its entry when
/// dropped, including on early error returns.
pub(crate) struct StackGuard {
    entry: (usize, TypeKey),
}

impl StackGuard {
    pub(crate) fn enter(owner: usize, key: TypeKey, max_depth: usize) -> DiResult<Self> {
        RESOLUTION_TLS.with(|tls| {
            let mut stack = tls.borrow_mut();
            let owned: Vec<TypeKey> = stack
                .iter()
                .filter(|(o, _)| *o == owner)
                .map(|(_, k)| *k)
                .collect();

            // Circular detection BEFORE pushing the new key
            if let Some(start) = owned.iter().position(|k| *k == key) {
                let mut path: Vec<&'static str> = owned[start..].iter().map(TypeKey::name).collect();
                path.push(key.name());
                return Err(DiError::Circular(path));
            }

            if owned.len() >= max_depth {
                return Err(DiError::DepthExceeded(owned.len()));
            }

            stack.push((owner, key));
            Ok(Self { entry: (owner, key) })
        })
    }
}

impl Drop for StackGuard {
    fn drop(&mut self) {
        RESOLUTION_TLS.with(|tls| {
            let popped = tls.borrow_mut().pop();
            debug_assert_eq!(popped, Some(self.entry));
        });
    }
}
