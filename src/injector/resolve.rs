//! Constructor-argument computation and the two resolution entry points.

use tracing::{instrument, trace, warn};

use super::Injector;
use crate::error::{DiError, DiResult};
use crate::internal::StackGuard;
use crate::params::{Args, Instance, Param};
use crate::token::Token;
use crate::traits::{Constructor, ParamType, ResolverCore};

impl ResolverCore for Injector {
    #[instrument(level = "trace", skip_all, fields(service = constructor.name()))]
    fn resolve_constructor(&self, constructor: &Constructor, params: &[Param]) -> DiResult<Instance> {
        let (token, constructor) = self.registered_or(constructor);

        if let Some(token) = &token {
            let cached = self.cache.lock().get(token);
            if let Some(instance) = cached {
                trace!(%token, "singleton cache hit");
                return Ok(instance);
            }
        }

        let instance = self.construct(&constructor, params)?;

        if let Some(token) = token {
            trace!(%token, "singleton cached");
            self.cache.lock().insert(token, instance.clone());
        }
        Ok(instance)
    }

    #[instrument(level = "trace", skip_all, fields(service = constructor.name()))]
    fn create_constructor(&self, constructor: &Constructor, params: &[Param]) -> DiResult<Instance> {
        let (_, constructor) = self.registered_or(constructor);
        self.construct(&constructor, params)
    }
}

impl Injector {
    /// The registered constructible for the target's type, if any; the
    /// registration takes precedence over the constructor passed in.
    fn registered_or(&self, constructor: &Constructor) -> (Option<Token>, Constructor) {
        let registry = self.registry.read();
        match registry.lookup(constructor.key()) {
            Some(registration) => (
                Some(registration.token.clone()),
                registration.constructor.clone(),
            ),
            None => (None, constructor.clone()),
        }
    }

    fn construct(&self, constructor: &Constructor, params: &[Param]) -> DiResult<Instance> {
        let owner = self as *const Injector as usize;
        let _guard = StackGuard::enter(owner, *constructor.key(), self.options.max_depth)?;
        let args = self.make_injections(constructor, params)?;
        constructor.construct(args)
    }

    /// Computes one argument per declared parameter, left to right.
    fn make_injections(&self, constructor: &Constructor, params: &[Param]) -> DiResult<Args> {
        let declared = constructor.dependencies();
        if params.len() > declared.len() {
            warn!(
                service = constructor.name(),
                supplied = params.len(),
                declared = declared.len(),
                "explicit parameters beyond the declared constructor parameters are ignored"
            );
        }

        let mut slots = Vec::with_capacity(declared.len());
        for (position, param_type) in declared.iter().enumerate() {
            let slot = match params.get(position) {
                Some(Param::Value(value)) => {
                    trace!(service = constructor.name(), position, "explicit parameter");
                    Some(value.clone())
                }
                Some(Param::Skip) | None => self.inject(constructor, position, param_type)?,
            };
            slots.push(slot);
        }

        Ok(Args::new(constructor.name(), slots))
    }

    /// Registry fallback for one parameter.
    fn inject(
        &self,
        constructor: &Constructor,
        position: usize,
        param_type: &ParamType,
    ) -> DiResult<Option<Instance>> {
        let key = match param_type {
            ParamType::Declared(key) => key,
            ParamType::Unknown => {
                return Err(DiError::CircularOrUnresolved {
                    service: constructor.name(),
                    position,
                })
            }
        };

        let registered = self
            .registry
            .read()
            .lookup(key)
            .map(|r| (r.token.clone(), r.constructor.clone()));

        match registered {
            Some((token, dependency)) => {
                let cached = self.cache.lock().get(&token);
                match cached {
                    Some(instance) => Ok(Some(instance)),
                    None => self.resolve_constructor(&dependency, &[]).map(Some),
                }
            }
            None if self.options.strict => Err(DiError::Unresolvable {
                service: constructor.name(),
                position,
                dependency: key.name(),
            }),
            None => {
                trace!(
                    service = constructor.name(),
                    position,
                    dependency = key.name(),
                    "not a registered service, left unset"
                );
                Ok(None)
            }
        }
    }
}
