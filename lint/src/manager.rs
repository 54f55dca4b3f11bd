//! LintManager facade — public API consumed by the editor layer and CLI.
//!
//! Owns the registered adapters, the diagnostic partitions, and the
//! per-(document, tool) request sequencing. Lint requests fan out across
//! enabled adapters concurrently; each adapter's partition is replaced as
//! soon as its own run completes, so a fast tool's results are visible
//! while a slow tool is still running.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

use futures_util::future::join_all;
use tokio::sync::mpsc;

use vlint_config::LintConfig;
use vlint_exec::{ExecutableResolver, ProcessRunner, WhichResolver, resolve_tool};
use vlint_types::{Diagnostic, Document};

use crate::adapter::{ToolAdapter, ToolView};
use crate::adapters::{
    IcarusAdapter, ModelsimAdapter, SlangAdapter, VerilatorAdapter, XvlogAdapter,
};
use crate::store::{DiagnosticStore, PartitionKey, RequestTracker};

/// Channel capacity for events flowing to the diagnostics publisher.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Error from an explicit single-tool lint request.
#[derive(Debug, thiserror::Error)]
pub enum LintError {
    #[error("no lint tool named '{name}' is registered")]
    ToolNotFound { name: String },
    #[error("not a Verilog/SystemVerilog document: {path:?}")]
    UnsupportedDocument { path: PathBuf },
}

/// Event published to the diagnostics consumer.
///
/// `Updated` always carries the full replacement sequence for its
/// (document, tool) pair, never a delta.
#[derive(Debug)]
pub enum LintEvent {
    Updated {
        document: PathBuf,
        tool: &'static str,
        diagnostics: Vec<Diagnostic>,
    },
    Cleared {
        document: PathBuf,
    },
    /// Progress signal for explicit single-tool runs.
    ToolStarted {
        document: PathBuf,
        tool: &'static str,
    },
    ToolFinished {
        document: PathBuf,
        tool: &'static str,
    },
    /// A contained run failure (missing executable, spawn error). The
    /// tool's partition keeps its last successful result.
    ToolFailed {
        document: PathBuf,
        tool: &'static str,
        error: String,
    },
}

/// The static adapter registry: every tool this build knows how to drive.
#[must_use]
pub fn default_adapters() -> Vec<Arc<dyn ToolAdapter>> {
    vec![
        Arc::new(IcarusAdapter::new()),
        Arc::new(VerilatorAdapter::new()),
        Arc::new(SlangAdapter::new()),
        Arc::new(XvlogAdapter::new()),
        Arc::new(ModelsimAdapter::new()),
    ]
}

/// Orchestrates concurrent tool runs per document and owns the resulting
/// diagnostic partitions.
pub struct LintManager {
    adapters: Vec<Arc<dyn ToolAdapter>>,
    runner: ProcessRunner,
    resolver: Arc<dyn ExecutableResolver>,
    config: RwLock<LintConfig>,
    store: Mutex<DiagnosticStore>,
    requests: Mutex<RequestTracker>,
    event_tx: mpsc::Sender<LintEvent>,
    workspace_root: Option<PathBuf>,
}

impl LintManager {
    /// Construct a manager with the default adapter registry and PATH-based
    /// executable resolution. Returns the manager plus the event receiver
    /// for the diagnostics publisher.
    #[must_use]
    pub fn new(
        config: LintConfig,
        workspace_root: Option<PathBuf>,
    ) -> (Self, mpsc::Receiver<LintEvent>) {
        Self::with_adapters(config, workspace_root, default_adapters())
    }

    /// Construct a manager with an explicit adapter list.
    #[must_use]
    pub fn with_adapters(
        config: LintConfig,
        workspace_root: Option<PathBuf>,
        adapters: Vec<Arc<dyn ToolAdapter>>,
    ) -> (Self, mpsc::Receiver<LintEvent>) {
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let manager = Self {
            adapters,
            runner: ProcessRunner::new(),
            resolver: Arc::new(WhichResolver),
            config: RwLock::new(config),
            store: Mutex::new(DiagnosticStore::new()),
            requests: Mutex::new(RequestTracker::new()),
            event_tx,
            workspace_root,
        };
        (manager, event_rx)
    }

    /// Swap the executable resolver (e.g. for shell-based lookup).
    #[must_use]
    pub fn with_resolver(mut self, resolver: Arc<dyn ExecutableResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Swap the process runner (e.g. to inject a timeout).
    #[must_use]
    pub fn with_runner(mut self, runner: ProcessRunner) -> Self {
        self.runner = runner;
        self
    }

    /// Replace the configuration. Takes effect on the next lint; in-flight
    /// runs keep the view they dispatched with.
    pub fn set_config(&self, config: LintConfig) {
        *self.config.write().expect("config lock") = config;
    }

    /// Lint a document with every enabled tool.
    ///
    /// A no-op for anything that is not a Verilog/SystemVerilog file.
    /// Waits for all tools, but each tool's partition is published as soon
    /// as that tool finishes; one failing tool never blocks the others.
    pub async fn lint_document(&self, path: &Path) {
        let Some(document) = Document::from_path(path) else {
            return;
        };

        let enabled: Vec<Arc<dyn ToolAdapter>> = {
            let config = self.config.read().expect("config lock");
            self.adapters
                .iter()
                .filter(|a| {
                    config
                        .tools
                        .get(a.name())
                        .is_some_and(|tool| tool.enabled)
                })
                .cloned()
                .collect()
        };

        tracing::info!(
            document = %document.path().display(),
            tools = enabled.len(),
            "linting document"
        );

        join_all(
            enabled
                .iter()
                .map(|adapter| self.run_tool(&document, adapter.as_ref())),
        )
        .await;
    }

    /// Run a single named tool against a document (user-initiated).
    ///
    /// Clears the existing (document, tool) partition first so stale
    /// results never mix with the in-progress run, and emits
    /// `ToolStarted`/`ToolFinished` progress events. Runs the tool even
    /// when its `enabled` flag is off.
    pub async fn lint_with_tool(&self, path: &Path, tool: &str) -> Result<(), LintError> {
        let adapter = self
            .adapters
            .iter()
            .find(|a| a.name() == tool)
            .cloned()
            .ok_or_else(|| LintError::ToolNotFound {
                name: tool.to_string(),
            })?;
        let document = Document::from_path(path).ok_or_else(|| LintError::UnsupportedDocument {
            path: path.to_path_buf(),
        })?;

        self.store
            .lock()
            .expect("store lock")
            .clear_tool(document.path(), adapter.name());
        self.publish(LintEvent::Updated {
            document: document.path().to_path_buf(),
            tool: adapter.name(),
            diagnostics: Vec::new(),
        });

        self.publish(LintEvent::ToolStarted {
            document: document.path().to_path_buf(),
            tool: adapter.name(),
        });
        self.run_tool(&document, adapter.as_ref()).await;
        self.publish(LintEvent::ToolFinished {
            document: document.path().to_path_buf(),
            tool: adapter.name(),
        });
        Ok(())
    }

    /// Remove every tool's partition for a document (document closed).
    pub fn clear_document(&self, path: &Path) {
        self.store.lock().expect("store lock").clear_document(path);
        self.requests
            .lock()
            .expect("requests lock")
            .clear_document(path);
        self.publish(LintEvent::Cleared {
            document: path.to_path_buf(),
        });
    }

    /// All diagnostics currently held for a document, merged across tools.
    #[must_use]
    pub fn document_diagnostics(&self, path: &Path) -> Vec<Diagnostic> {
        self.store
            .lock()
            .expect("store lock")
            .document_diagnostics(path)
    }

    /// Per-document diagnostics across all documents, files with errors
    /// first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(PathBuf, Vec<Diagnostic>)> {
        self.store.lock().expect("store lock").snapshot()
    }

    /// Names of all registered tools, in registration order.
    #[must_use]
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.adapters.iter().map(|a| a.name()).collect()
    }

    /// Run one adapter against one document and apply the result.
    ///
    /// Failures are contained here: they are logged and published, and the
    /// partition is left as it was.
    async fn run_tool(&self, document: &Document, adapter: &dyn ToolAdapter) {
        let name = adapter.name();
        let key: PartitionKey = (document.path().to_path_buf(), name.to_string());
        let seq = self.requests.lock().expect("requests lock").begin(&key);

        let view = self.tool_view(name);
        let Some(program) = resolve_tool(
            view.config.path.as_deref(),
            adapter.default_executable(),
            self.resolver.as_ref(),
        ) else {
            tracing::warn!(tool = name, "executable not found; check the tool's path setting");
            self.publish(LintEvent::ToolFailed {
                document: document.path().to_path_buf(),
                tool: name,
                error: format!("executable not found: {}", adapter.default_executable()),
            });
            return;
        };

        let mut args = adapter.tool_args(document, &view);
        args.extend(view.config.args.iter().cloned());
        args.push(document.path().display().to_string());

        let result = self
            .runner
            .run(&program, &args, self.workspace_root.as_deref())
            .await;

        match result {
            Ok(output) => {
                let diagnostics = adapter.parse(document, &output, self.workspace_root.as_deref());
                if !self
                    .requests
                    .lock()
                    .expect("requests lock")
                    .is_current(&key, seq)
                {
                    // Superseded by a later request for this pair; applying
                    // would overwrite newer results with older ones.
                    tracing::debug!(tool = name, seq, "discarding stale lint result");
                    return;
                }
                tracing::debug!(
                    tool = name,
                    document = %document.path().display(),
                    count = diagnostics.len(),
                    "diagnostics updated"
                );
                self.store.lock().expect("store lock").replace(
                    document.path(),
                    name,
                    diagnostics.clone(),
                );
                self.publish(LintEvent::Updated {
                    document: document.path().to_path_buf(),
                    tool: name,
                    diagnostics,
                });
            }
            Err(e) => {
                tracing::warn!(tool = name, "lint run failed: {e}");
                self.publish(LintEvent::ToolFailed {
                    document: document.path().to_path_buf(),
                    tool: name,
                    error: e.to_string(),
                });
            }
        }
    }

    fn tool_view(&self, name: &str) -> ToolView {
        let config = self.config.read().expect("config lock");
        ToolView {
            config: config.tools.get(name).cloned().unwrap_or_default(),
            verilog_standard: config.verilog_standard,
            systemverilog_standard: config.systemverilog_standard,
        }
    }

    /// Events are advisory; a full or closed channel never blocks linting.
    fn publish(&self, event: LintEvent) {
        if let Err(e) = self.event_tx.try_send(event) {
            tracing::debug!("dropping lint event: {e}");
        }
    }
}
