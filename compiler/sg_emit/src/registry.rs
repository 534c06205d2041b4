//! Dialect to generator lookup.

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::{Dialect, JavaGenerator, KotlinGenerator, SourceGenerator};

/// Source generators keyed by dialect.
#[derive(Default)]
pub struct EmitterRegistry {
    generators: FxHashMap<Dialect, Box<dyn SourceGenerator>>,
}

impl EmitterRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in generators: Java and Kotlin.
    ///
    /// Groovy is a known dialect without a built-in generator.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(JavaGenerator));
        registry.register(Box::new(KotlinGenerator));
        registry
    }

    /// Register a generator for its dialect, returning the one it replaces.
    pub fn register(
        &mut self,
        generator: Box<dyn SourceGenerator>,
    ) -> Option<Box<dyn SourceGenerator>> {
        let dialect = generator.dialect();
        trace!(%dialect, "registering source generator");
        let previous = self.generators.insert(dialect, generator);
        if previous.is_some() {
            debug!(%dialect, "replaced source generator");
        }
        previous
    }

    pub fn find(&self, dialect: Dialect) -> Option<&dyn SourceGenerator> {
        self.generators.get(&dialect).map(Box::as_ref)
    }

    pub fn contains(&self, dialect: Dialect) -> bool {
        self.generators.contains_key(&dialect)
    }

    /// Registered dialects in declaration order.
    pub fn dialects(&self) -> Vec<Dialect> {
        Dialect::ALL
            .iter()
            .copied()
            .filter(|d| self.contains(*d))
            .collect()
    }
}
