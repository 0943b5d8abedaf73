//! Runs analyzers over the nodes of a tree

use rowan::TextRange;
use tracing::debug;

use crate::config::{DiagnosticsConfiguration, RuleSeverity};
use crate::cst::SyntaxTree;

use super::{Analyzer, Diagnostic};

/// Runs a set of analyzers and applies configured severities
#[derive(Debug, Clone)]
pub struct DiagnosticEngine {
    analyzers: Vec<Analyzer>,
    config: DiagnosticsConfiguration,
}

impl Default for DiagnosticEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticEngine {
    /// Engine with every analyzer and default severities
    pub fn new() -> Self {
        Self::with_config(DiagnosticsConfiguration::default())
    }

    pub fn with_config(config: DiagnosticsConfiguration) -> Self {
        Self {
            analyzers: Analyzer::ALL.to_vec(),
            config,
        }
    }

    /// Restrict the engine to `analyzers`
    pub fn with_analyzers(mut self, analyzers: impl IntoIterator<Item = Analyzer>) -> Self {
        self.analyzers = analyzers.into_iter().collect();
        self
    }

    pub fn analyzers(&self) -> &[Analyzer] {
        &self.analyzers
    }

    pub fn config(&self) -> &DiagnosticsConfiguration {
        &self.config
    }

    pub fn set_config(&mut self, config: DiagnosticsConfiguration) {
        self.config = config;
    }

    /// Diagnostics whose range intersects `range`
    ///
    /// Analyzers run over every node intersecting `range`; results are sorted
    /// by position.
    pub fn analyze(&self, tree: &SyntaxTree, range: TextRange) -> Vec<Diagnostic> {
        if !self.config.is_enabled() {
            return Vec::new();
        }

        let mut diagnostics = Vec::new();
        let mut visited = 0usize;
        for node in tree.syntax().descendants() {
            if node.text_range().intersect(range).is_none() {
                continue;
            }
            visited += 1;
            for analyzer in self.analyzers.iter().filter(|a| a.applies_to(node.kind())) {
                diagnostics.extend(
                    analyzer
                        .analyze(&node)
                        .into_iter()
                        .filter(|d| d.intersects(range))
                        .filter_map(|d| self.apply_severity(d)),
                );
            }
        }

        diagnostics.sort_by(|a, b| {
            a.range
                .start()
                .cmp(&b.range.start())
                .then_with(|| a.range.end().cmp(&b.range.end()))
                .then_with(|| a.id.cmp(&b.id))
        });

        debug!(
            buffer = %tree.buffer_id(),
            version = tree.version(),
            ?range,
            nodes = visited,
            diagnostics = diagnostics.len(),
            "Analyzed INI tree"
        );
        diagnostics
    }

    /// Diagnostics for the whole tree
    pub fn analyze_all(&self, tree: &SyntaxTree) -> Vec<Diagnostic> {
        self.analyze(tree, tree.snapshot().full_range())
    }

    /// Apply the configured severity; `None` when the diagnostic is turned off
    fn apply_severity(&self, diagnostic: Diagnostic) -> Option<Diagnostic> {
        match self.config.rule_severity(&diagnostic.id) {
            None => Some(diagnostic),
            Some(RuleSeverity::Off) => None,
            Some(level) => {
                let severity = level.to_severity()?;
                Some(diagnostic.with_severity(severity))
            }
        }
    }
}
