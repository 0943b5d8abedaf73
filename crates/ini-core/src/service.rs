//! The language service facade
//!
//! [`IniLanguageService`] owns the tree cache and the configured engines.
//! Every query takes the snapshot it is about; the tree for that snapshot is
//! parsed at most once and shared by all queries on it.

use std::path::Path;
use std::sync::Arc;

use rowan::{TextRange, TextSize};
use tracing::debug;

use crate::cache::{CacheStats, TreeCache};
use crate::classification::{ClassifiedSpan, classify};
use crate::config::{ConfigLoader, IniConfig};
use crate::cst::SyntaxTree;
use crate::diagnostics::{Diagnostic, DiagnosticEngine};
use crate::fixes::{CodeAction, code_actions};
use crate::formatting::OnTypeFormatter;
use crate::navigation::{
    BracketPair, FoldingRange, QuickInfo, folding_ranges, highlight_references, matching_brackets,
    quick_info,
};
use crate::result::Result;
use crate::text::{BufferEdit, BufferId, ContentChange, Snapshot};

/// Entry point for editor integrations
#[derive(Debug, Default)]
pub struct IniLanguageService {
    cache: TreeCache,
    engine: DiagnosticEngine,
    formatter: OnTypeFormatter,
    config: IniConfig,
}

impl IniLanguageService {
    /// Service with the default configuration
    pub fn new() -> Self {
        Self::with_config(IniConfig::default())
    }

    pub fn with_config(config: IniConfig) -> Self {
        Self {
            cache: TreeCache::new(),
            engine: DiagnosticEngine::with_config(config.diagnostics_config()),
            formatter: OnTypeFormatter::new(config.formatter_config()),
            config,
        }
    }

    /// Service configured from the nearest `.inirc.toml` or `.inirc.json`
    /// above `start_dir`
    pub fn discover(start_dir: &Path) -> Result<Self> {
        let config = ConfigLoader::load(None, Some(start_dir))?;
        Ok(Self::with_config(config))
    }

    pub fn config(&self) -> &IniConfig {
        &self.config
    }

    /// Replace the configuration; cached trees stay valid
    pub fn set_config(&mut self, config: IniConfig) {
        self.engine.set_config(config.diagnostics_config());
        self.formatter = OnTypeFormatter::new(config.formatter_config());
        self.config = config;
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// The tree for `snapshot`, parsed on first request
    pub fn tree(&self, snapshot: &Snapshot) -> Arc<SyntaxTree> {
        self.cache.get_tree(snapshot)
    }

    /// Diagnostics intersecting `range`
    pub fn diagnostics(&self, snapshot: &Snapshot, range: TextRange) -> Vec<Diagnostic> {
        let tree = self.tree(snapshot);
        self.engine.analyze(&tree, range)
    }

    /// Classified tokens intersecting `range`
    pub fn classify(&self, snapshot: &Snapshot, range: TextRange) -> Vec<ClassifiedSpan> {
        classify(&self.tree(snapshot), range)
    }

    /// Quick fixes for the diagnostics in `range` and refactorings for the
    /// nodes in `range`
    ///
    /// Fixes are offered for every diagnostic, whatever its configured
    /// severity, as long as it is not turned off.
    pub fn code_actions(&self, snapshot: &Snapshot, range: TextRange) -> Vec<CodeAction> {
        let tree = self.tree(snapshot);
        let diagnostics = self.engine.analyze(&tree, range);
        let actions = code_actions(&tree, &diagnostics, range);
        debug!(
            buffer = %snapshot.buffer_id(),
            version = snapshot.version(),
            actions = actions.len(),
            "Collected code actions"
        );
        actions
    }

    /// Edit to apply after `ch` was typed; `offset` is the position right
    /// after the character in `snapshot`
    pub fn format_on_type(
        &self,
        snapshot: &Snapshot,
        offset: TextSize,
        ch: char,
    ) -> Option<BufferEdit> {
        self.formatter.format_on_type(&self.tree(snapshot), offset, ch)
    }

    pub fn folding_ranges(&self, snapshot: &Snapshot, range: TextRange) -> Vec<FoldingRange> {
        folding_ranges(&self.tree(snapshot), range)
    }

    pub fn matching_brackets(&self, snapshot: &Snapshot, offset: TextSize) -> Option<BracketPair> {
        matching_brackets(&self.tree(snapshot), offset)
    }

    pub fn highlight_references(&self, snapshot: &Snapshot, offset: TextSize) -> Vec<TextRange> {
        highlight_references(&self.tree(snapshot), offset)
    }

    pub fn quick_info(&self, snapshot: &Snapshot, offset: TextSize) -> Option<QuickInfo> {
        quick_info(&self.tree(snapshot), offset)
    }

    /// Notify the service of an applied edit
    pub fn buffer_changed(&self, change: &ContentChange) {
        self.cache.invalidate(change);
    }

    /// Release everything held for a closed buffer
    pub fn buffer_closed(&self, buffer: BufferId) {
        if self.cache.evict(buffer).is_some() {
            debug!(%buffer, "Released tree of closed buffer");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DiagnosticsConfiguration, RuleSeverity};
    use crate::diagnostics::{MULTIPLE_DECLARATIONS_OF_SECTION, Severity};
    use crate::text::TextBuffer;
    use std::collections::HashMap;

    #[test]
    fn test_queries_share_one_parse() {
        let service = IniLanguageService::new();
        let buffer = TextBuffer::new("[a]\nx=1\n[A]\ny=2\n");
        let snapshot = buffer.snapshot();

        let diagnostics = service.diagnostics(&snapshot, snapshot.full_range());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].id, MULTIPLE_DECLARATIONS_OF_SECTION);

        assert!(!service.classify(&snapshot, snapshot.full_range()).is_empty());
        assert_eq!(service.code_actions(&snapshot, snapshot.full_range()).len(), 1);

        let stats = service.cache_stats();
        assert_eq!(stats.parses, 1);
        assert_eq!(stats.hits, 2);
    }

    #[test]
    fn test_edit_cycle() {
        let service = IniLanguageService::new();
        let mut buffer = TextBuffer::new("[a]\nx=1\n[A]\ny=2\n");

        let actions = service.code_actions(&buffer.snapshot(), buffer.snapshot().full_range());
        let change = actions[0].apply(&mut buffer).unwrap();
        service.buffer_changed(&change);

        let snapshot = buffer.snapshot();
        assert_eq!(snapshot.text(), "[a]\nx=1\ny=2\n");
        assert!(service.diagnostics(&snapshot, snapshot.full_range()).is_empty());
        assert_eq!(service.tree(&snapshot).version(), 1);

        service.buffer_closed(buffer.id());
        assert_eq!(service.cache_stats().buffers, 0);
    }

    #[test]
    fn test_configured_severity() {
        let mut rules = HashMap::new();
        rules.insert(MULTIPLE_DECLARATIONS_OF_SECTION.to_string(), RuleSeverity::Error);
        let config = IniConfig {
            diagnostics: Some(DiagnosticsConfiguration {
                enabled: None,
                rules: Some(rules),
            }),
            formatter: None,
        };
        let service = IniLanguageService::with_config(config);
        let snapshot = Snapshot::from_text("[a]\n[a]\n");
        let diagnostics = service.diagnostics(&snapshot, snapshot.full_range());
        assert_eq!(diagnostics[0].severity, Severity::Error);

        let mut service = service;
        service.set_config(IniConfig::default());
        let diagnostics = service.diagnostics(&snapshot, snapshot.full_range());
        assert_eq!(diagnostics[0].severity, Severity::Warning);
    }

    #[test]
    fn test_format_on_type() {
        let service = IniLanguageService::new();
        let snapshot = Snapshot::from_text("[ a ]\n");
        let edit = service
            .format_on_type(&snapshot, TextSize::from(5), ']')
            .unwrap();
        assert_eq!(edit.apply_to(&snapshot).unwrap(), "[a]\n");
    }

    #[test]
    fn test_service_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<IniLanguageService>();
    }
}
