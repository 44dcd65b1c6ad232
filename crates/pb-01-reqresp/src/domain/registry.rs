//! # Protocol Registry
//!
//! Declarative catalog of reqresp protocols, populated once at node startup
//! from a fixed generator list. A generator is a pure factory over an
//! explicitly passed module bundle; the registry assembles and stores the
//! definition next to its handler but never invokes the handler itself.

use std::collections::HashMap;
use std::sync::Arc;

use shared_types::ChainConfig;
use thiserror::Error;
use tracing::info;

use crate::domain::protocol::{Method, ProtocolDefinition, Version};
use crate::ports::outbound::RequestHandler;

/// Externally owned modules a generator may draw on. All dependencies are
/// passed explicitly; generators hold no hidden captured state.
#[derive(Clone)]
pub struct ModuleBundle {
    /// The frozen network-parameter preset.
    pub config: Arc<ChainConfig>,
}

/// Pure protocol factory.
pub type ProtocolGenerator = fn(&ModuleBundle) -> ProtocolDefinition;

/// A definition paired with the handler serving it.
pub struct RegisteredProtocol {
    /// The assembled definition.
    pub definition: ProtocolDefinition,
    /// Caller-supplied asynchronous handler for the method.
    pub handler: Arc<dyn RequestHandler>,
}

/// Registry configuration errors. All startup-fatal: the embedding node is
/// expected to abort on any of these rather than run with a broken catalog.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A `(method, version)` pair was registered twice.
    #[error("protocol {method}/{version:?} registered twice")]
    DuplicateProtocol { method: Method, version: Version },

    /// A definition carried a zero quota or zero window.
    #[error("protocol {method}/{version:?} has a degenerate rate limit")]
    InvalidRateLimit { method: Method, version: Version },
}

/// The protocol catalog.
pub struct ProtocolRegistry {
    modules: ModuleBundle,
    entries: Vec<RegisteredProtocol>,
    index: HashMap<(Method, Version), usize>,
}

impl ProtocolRegistry {
    /// Empty registry over a module bundle.
    pub fn new(modules: ModuleBundle) -> Self {
        Self {
            modules,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// The module bundle definitions were generated from.
    pub fn modules(&self) -> &ModuleBundle {
        &self.modules
    }

    /// Run a generator and store its definition with `handler`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::DuplicateProtocol`] when `(method, version)` is
    ///   already present.
    /// - [`RegistryError::InvalidRateLimit`] when a configured quota or
    ///   window is zero.
    pub fn register(
        &mut self,
        generator: ProtocolGenerator,
        handler: Arc<dyn RequestHandler>,
    ) -> Result<&ProtocolDefinition, RegistryError> {
        let definition = generator(&self.modules);
        let key = (definition.method, definition.version);

        if self.index.contains_key(&key) {
            return Err(RegistryError::DuplicateProtocol {
                method: key.0,
                version: key.1,
            });
        }
        if let Some(limit) = definition.inbound_rate_limit {
            if limit.quota == 0 || limit.quota_time_ms == 0 {
                return Err(RegistryError::InvalidRateLimit {
                    method: key.0,
                    version: key.1,
                });
            }
        }

        info!(protocol = %definition.protocol_id(), "registered reqresp protocol");
        self.index.insert(key, self.entries.len());
        self.entries.push(RegisteredProtocol {
            definition,
            handler,
        });
        Ok(&self.entries[self.entries.len() - 1].definition)
    }

    /// Look up a definition by method and version.
    pub fn definition(&self, method: Method, version: Version) -> Option<&ProtocolDefinition> {
        self.index
            .get(&(method, version))
            .map(|&i| &self.entries[i].definition)
    }

    /// Look up a registered protocol by its full wire identifier.
    pub fn by_protocol_id(&self, protocol_id: &str) -> Option<&RegisteredProtocol> {
        self.entries
            .iter()
            .find(|entry| entry.definition.protocol_id() == protocol_id)
    }

    /// All advertised protocol identifiers, in registration order.
    pub fn protocol_ids(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| entry.definition.protocol_id())
            .collect()
    }

    /// Number of registered protocols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
