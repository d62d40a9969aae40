//! Translation capability graph.
//!
//! A process-wide table of which directed (source -> target) translation
//! operations are available, each edge backed by a callable engine. The graph
//! is built once at startup from configuration and shared read-only for the
//! rest of the run; advertised edges can still fail at call time, which the
//! executor treats as a per-language failure rather than a graph defect.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::TranslateConfig;
use crate::error::{Result, SubfillError};
use crate::language::LanguageCode;
use crate::translate::{TranslationEngine, TranslationEngineFactory};

pub struct CapabilityGraph {
    edges: HashMap<(LanguageCode, LanguageCode), Arc<dyn TranslationEngine>>,
}

impl CapabilityGraph {
    pub fn new() -> Self {
        Self {
            edges: HashMap::new(),
        }
    }

    /// Build the graph from the configured "from-to" pairs, creating one
    /// HTTP engine per edge.
    pub fn from_config(config: &TranslateConfig) -> Result<Self> {
        let factory = TranslationEngineFactory::new(config.clone())?;
        let mut graph = Self::new();

        for (from, to) in config.parsed_pairs()? {
            let engine = factory.create_engine(from.clone(), to.clone());
            graph.add_edge(from, to, engine)?;
        }

        Ok(graph)
    }

    pub fn add_edge(
        &mut self,
        from: LanguageCode,
        to: LanguageCode,
        engine: Arc<dyn TranslationEngine>,
    ) -> Result<()> {
        if from == to {
            return Err(SubfillError::Config(format!(
                "Capability edge cannot be a self-loop: {}",
                from
            )));
        }

        self.edges.insert((from, to), engine);
        Ok(())
    }

    pub fn has_edge(&self, from: &LanguageCode, to: &LanguageCode) -> bool {
        self.edges.contains_key(&(from.clone(), to.clone()))
    }

    pub fn engine(
        &self,
        from: &LanguageCode,
        to: &LanguageCode,
    ) -> Option<Arc<dyn TranslationEngine>> {
        self.edges.get(&(from.clone(), to.clone())).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl Default for CapabilityGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct EchoEngine;

    #[async_trait]
    impl TranslationEngine for EchoEngine {
        async fn translate(&self, text: &str) -> Result<String> {
            Ok(text.to_string())
        }
    }

    fn edge(graph: &mut CapabilityGraph, from: &str, to: &str) {
        graph
            .add_edge(from.into(), to.into(), Arc::new(EchoEngine))
            .unwrap();
    }

    #[test]
    fn test_edges_are_directed() {
        let mut graph = CapabilityGraph::new();
        edge(&mut graph, "en", "ar");

        assert!(graph.has_edge(&"en".into(), &"ar".into()));
        assert!(!graph.has_edge(&"ar".into(), &"en".into()));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_self_loop_rejected() {
        let mut graph = CapabilityGraph::new();
        let result = graph.add_edge("en".into(), "en".into(), Arc::new(EchoEngine));
        assert!(result.is_err());
    }

    #[test]
    fn test_engine_lookup() {
        let mut graph = CapabilityGraph::new();
        edge(&mut graph, "en", "nl");

        assert!(graph.engine(&"en".into(), &"nl".into()).is_some());
        assert!(graph.engine(&"nl".into(), &"en".into()).is_none());
    }
}
