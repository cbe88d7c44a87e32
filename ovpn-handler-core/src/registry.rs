//! Handler registry
//!
//! Maps the handler name given on the `plugin` line of the OpenVPN
//! configuration to the constructor of a [`Handler`] implementation.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{HandlerError, Result};
use crate::handler::Handler;
use crate::types::{Args, Env};

/// Constructor stored in the registry
pub type HandlerFactory = Box<dyn Fn(Args, Env) -> Result<Box<dyn Handler>> + Send + Sync>;

/// Named handler constructors
#[derive(Default)]
pub struct HandlerRegistry {
    factories: BTreeMap<String, HandlerFactory>,
}

impl HandlerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `H` under `name`, replacing any previous registration
    pub fn register<H>(&mut self, name: impl Into<String>)
    where
        H: Handler + 'static,
    {
        let factory: HandlerFactory =
            Box::new(|args: Args, env: Env| Ok(Box::new(H::new(args, env)?) as Box<dyn Handler>));
        self.factories.insert(name.into(), factory);
    }

    /// Builder form of [`register`](Self::register)
    pub fn with<H>(mut self, name: impl Into<String>) -> Self
    where
        H: Handler + 'static,
    {
        self.register::<H>(name);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Construct the handler registered under `name`
    ///
    /// # Errors
    ///
    /// Returns `HandlerError::Unimplemented` when nothing is registered
    /// under `name`, or whatever the handler's constructor returned.
    pub fn build(&self, name: &str, args: Args, env: Env) -> Result<Box<dyn Handler>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| HandlerError::Unimplemented {
                name: name.to_string(),
            })?;

        debug!("Constructing handler '{}' with {} argument(s)", name, args.len());
        factory(args, env)
    }
}
