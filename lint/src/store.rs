//! Per-(document, tool) diagnostic partitions and request sequencing.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use vlint_types::Diagnostic;

/// Key for one partition: (document path, tool name).
pub(crate) type PartitionKey = (PathBuf, String);

/// Mutable diagnostic state, partitioned by (document, tool).
///
/// Re-linting a tool against a document is an atomic replace of that one
/// partition; partitions for other tools on the same document are never
/// touched. Only the orchestrator mutates this store.
#[derive(Debug, Default)]
pub(crate) struct DiagnosticStore {
    partitions: HashMap<PartitionKey, Vec<Diagnostic>>,
}

impl DiagnosticStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomic swap: discard whatever (document, tool) held and install the
    /// new parse result.
    pub fn replace(&mut self, document: &Path, tool: &str, diagnostics: Vec<Diagnostic>) {
        self.partitions
            .insert((document.to_path_buf(), tool.to_string()), diagnostics);
    }

    /// Remove every tool's partition for a document (document closed).
    pub fn clear_document(&mut self, document: &Path) {
        self.partitions.retain(|(doc, _), _| doc != document);
    }

    /// Remove a single (document, tool) partition (single-tool re-run).
    pub fn clear_tool(&mut self, document: &Path, tool: &str) {
        self.partitions
            .remove(&(document.to_path_buf(), tool.to_string()));
    }

    /// All diagnostics for a document, merged across tools and ordered by
    /// position.
    pub fn document_diagnostics(&self, document: &Path) -> Vec<Diagnostic> {
        let mut items: Vec<Diagnostic> = self
            .partitions
            .iter()
            .filter(|((doc, _), _)| doc == document)
            .flat_map(|(_, items)| items.iter().cloned())
            .collect();
        items.sort_by_key(|d| (d.range().start_line, d.range().start_col));
        items
    }

    /// Per-document diagnostics across the whole store, files with errors
    /// first, then alphabetically.
    pub fn snapshot(&self) -> Vec<(PathBuf, Vec<Diagnostic>)> {
        let mut documents: Vec<PathBuf> = self.partitions.keys().map(|(doc, _)| doc.clone()).collect();
        documents.sort();
        documents.dedup();

        let mut files: Vec<(PathBuf, Vec<Diagnostic>)> = documents
            .into_iter()
            .map(|doc| {
                let items = self.document_diagnostics(&doc);
                (doc, items)
            })
            .filter(|(_, items)| !items.is_empty())
            .collect();

        files.sort_by(|a, b| {
            let a_has_errors = a.1.iter().any(|d| d.severity().is_error());
            let b_has_errors = b.1.iter().any(|d| d.severity().is_error());
            b_has_errors.cmp(&a_has_errors).then_with(|| a.0.cmp(&b.0))
        });

        files
    }

    #[cfg(test)]
    pub fn partition(&self, document: &Path, tool: &str) -> Option<&[Diagnostic]> {
        self.partitions
            .get(&(document.to_path_buf(), tool.to_string()))
            .map(Vec::as_slice)
    }
}

/// Per-(document, tool) monotonic request sequencing.
///
/// Two lint requests for the same pair can be in flight at once (rapid
/// consecutive saves). Results apply in request order: a completing run
/// whose number is no longer the latest issued for its pair is stale and
/// must be discarded, never applied.
#[derive(Debug, Default)]
pub(crate) struct RequestTracker {
    latest: HashMap<PartitionKey, u64>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next request number for a pair.
    pub fn begin(&mut self, key: &PartitionKey) -> u64 {
        let seq = self.latest.get(key).copied().unwrap_or(0) + 1;
        self.latest.insert(key.clone(), seq);
        seq
    }

    /// Whether `seq` is still the latest issued request for the pair.
    pub fn is_current(&self, key: &PartitionKey, seq: u64) -> bool {
        self.latest.get(key).copied() == Some(seq)
    }

    /// Drop counters for a closed document.
    pub fn clear_document(&mut self, document: &Path) {
        self.latest.retain(|(doc, _), _| doc != document);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vlint_types::{Range, Severity};

    fn diag(file: &str, line: u32, severity: Severity, source: &str) -> Diagnostic {
        Diagnostic::new(
            PathBuf::from(file),
            severity,
            Range::full_line(line),
            "msg",
            "error",
            source,
        )
    }

    fn key(doc: &str, tool: &str) -> PartitionKey {
        (PathBuf::from(doc), tool.to_string())
    }

    #[test]
    fn test_replace_is_atomic_swap() {
        let mut store = DiagnosticStore::new();
        let doc = Path::new("top.v");
        store.replace(
            doc,
            "iverilog",
            vec![
                diag("top.v", 1, Severity::Error, "iverilog"),
                diag("top.v", 2, Severity::Error, "iverilog"),
            ],
        );
        store.replace(doc, "iverilog", vec![diag("top.v", 5, Severity::Warning, "iverilog")]);

        let partition = store.partition(doc, "iverilog").unwrap();
        assert_eq!(partition.len(), 1);
        assert_eq!(partition[0].range().start_line, 5);
    }

    #[test]
    fn test_replace_leaves_other_tools_untouched() {
        let mut store = DiagnosticStore::new();
        let doc = Path::new("top.v");
        store.replace(doc, "iverilog", vec![diag("top.v", 1, Severity::Error, "iverilog")]);
        store.replace(doc, "verilator", vec![diag("top.v", 2, Severity::Warning, "verilator")]);

        store.replace(doc, "iverilog", vec![]);

        assert_eq!(store.partition(doc, "iverilog").unwrap().len(), 0);
        assert_eq!(store.partition(doc, "verilator").unwrap().len(), 1);
    }

    #[test]
    fn test_clear_document_removes_all_tools() {
        let mut store = DiagnosticStore::new();
        store.replace(Path::new("a.v"), "iverilog", vec![diag("a.v", 1, Severity::Error, "iverilog")]);
        store.replace(Path::new("a.v"), "verilator", vec![diag("a.v", 2, Severity::Error, "verilator")]);
        store.replace(Path::new("b.v"), "iverilog", vec![diag("b.v", 3, Severity::Error, "iverilog")]);

        store.clear_document(Path::new("a.v"));

        assert!(store.partition(Path::new("a.v"), "iverilog").is_none());
        assert!(store.partition(Path::new("a.v"), "verilator").is_none());
        assert!(store.partition(Path::new("b.v"), "iverilog").is_some());
    }

    #[test]
    fn test_clear_tool_removes_single_partition() {
        let mut store = DiagnosticStore::new();
        let doc = Path::new("top.v");
        store.replace(doc, "iverilog", vec![diag("top.v", 1, Severity::Error, "iverilog")]);
        store.replace(doc, "slang", vec![diag("top.v", 2, Severity::Error, "slang")]);

        store.clear_tool(doc, "iverilog");

        assert!(store.partition(doc, "iverilog").is_none());
        assert!(store.partition(doc, "slang").is_some());
    }

    #[test]
    fn test_document_diagnostics_merges_and_sorts() {
        let mut store = DiagnosticStore::new();
        let doc = Path::new("top.v");
        store.replace(doc, "verilator", vec![diag("top.v", 9, Severity::Warning, "verilator")]);
        store.replace(doc, "iverilog", vec![diag("top.v", 2, Severity::Error, "iverilog")]);

        let items = store.document_diagnostics(doc);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].source(), "iverilog");
        assert_eq!(items[1].source(), "verilator");
    }

    #[test]
    fn test_snapshot_errors_first() {
        let mut store = DiagnosticStore::new();
        store.replace(Path::new("b.v"), "iverilog", vec![diag("b.v", 1, Severity::Warning, "iverilog")]);
        store.replace(Path::new("a.v"), "iverilog", vec![diag("a.v", 1, Severity::Error, "iverilog")]);
        store.replace(Path::new("c.v"), "iverilog", vec![]);

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].0, PathBuf::from("a.v"));
        assert_eq!(snapshot[1].0, PathBuf::from("b.v"));
    }

    #[test]
    fn test_tracker_issues_monotonic_sequence() {
        let mut tracker = RequestTracker::new();
        let k = key("top.v", "iverilog");
        assert_eq!(tracker.begin(&k), 1);
        assert_eq!(tracker.begin(&k), 2);
        assert_eq!(tracker.begin(&key("top.v", "slang")), 1);
    }

    #[test]
    fn test_tracker_discards_superseded_request() {
        let mut tracker = RequestTracker::new();
        let k = key("top.v", "iverilog");
        let first = tracker.begin(&k);
        let second = tracker.begin(&k);

        // request 2 completes first and applies
        assert!(tracker.is_current(&k, second));
        // request 1 completes later and must be discarded
        assert!(!tracker.is_current(&k, first));
    }

    #[test]
    fn test_tracker_pairs_are_independent() {
        let mut tracker = RequestTracker::new();
        let iverilog = key("top.v", "iverilog");
        let slang = key("top.v", "slang");
        let seq = tracker.begin(&iverilog);
        tracker.begin(&slang);
        tracker.begin(&slang);
        assert!(tracker.is_current(&iverilog, seq));
    }

    #[test]
    fn test_tracker_clear_document() {
        let mut tracker = RequestTracker::new();
        let k = key("top.v", "iverilog");
        let seq = tracker.begin(&k);
        tracker.clear_document(Path::new("top.v"));
        assert!(!tracker.is_current(&k, seq));
        assert_eq!(tracker.begin(&k), 1);
    }
}
