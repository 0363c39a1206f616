//! Named environment factories.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::{debug, warn};

use super::{Env, ReplayEnv};
use crate::error::{ReplayError, Result};
use crate::ttyrec::ReplayOptions;

/// Arguments handed to every factory.
#[derive(Debug, Clone)]
pub struct EnvArgs {
    pub recording: PathBuf,
    pub options: ReplayOptions,
}

/// Builds an environment from [`EnvArgs`].
pub type EnvFactory = Box<dyn Fn(&EnvArgs) -> Result<Box<dyn Env>> + Send + Sync>;

/// Environment factories by name.
///
/// The registry is a plain value: build one, register what you need, and
/// pass it by reference to whoever creates environments.
#[derive(Default)]
pub struct EnvRegistry {
    factories: BTreeMap<String, EnvFactory>,
}

impl EnvRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the environments this crate provides.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(
            "replay",
            Box::new(|args: &EnvArgs| {
                Ok(Box::new(ReplayEnv::new(args.recording.clone(), args.options)) as Box<dyn Env>)
            }),
        );
        registry
    }

    /// Register `factory` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, factory: EnvFactory) {
        let name = name.into();
        if self.factories.contains_key(&name) {
            warn!(name = %name, "overwriting registered environment");
        } else {
            debug!(name = %name, "registered environment");
        }
        self.factories.insert(name, factory);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }

    /// Create the environment registered as `name`.
    pub fn make(&self, name: &str, args: &EnvArgs) -> Result<Box<dyn Env>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| ReplayError::UnknownEnvironment {
                name: name.to_string(),
                known: self.names(),
            })?;
        factory(args)
    }
}
