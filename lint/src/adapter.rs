//! The adapter contract every tool backend implements.

use std::path::{Path, PathBuf};

use vlint_config::ToolConfig;
use vlint_exec::CapturedOutput;
use vlint_types::{Diagnostic, Document, Severity, SystemVerilogStandard, VerilogStandard};

/// Dispatch-time view of the configuration relevant to one tool.
///
/// Built fresh for every lint request so configuration edits take effect on
/// the next run.
#[derive(Debug, Clone, Default)]
pub struct ToolView {
    pub config: ToolConfig,
    pub verilog_standard: VerilogStandard,
    pub systemverilog_standard: SystemVerilogStandard,
}

/// Translates between one external tool's command/output grammar and the
/// canonical diagnostic model.
///
/// Implementations are pure: `tool_args` and `parse` perform no IO and never
/// fail. Unparseable output lines (banners, summaries) are skipped, not
/// errors.
pub trait ToolAdapter: Send + Sync {
    /// Tool identifier; also the `source` field of produced diagnostics.
    fn name(&self) -> &'static str;

    /// Bare command name resolved on the host when no explicit path is
    /// configured.
    fn default_executable(&self) -> &str;

    /// Build tool-specific arguments (discard-output target, language
    /// standard selector, include directories). User-configured extra args
    /// and the document path are appended by the orchestrator.
    fn tool_args(&self, document: &Document, view: &ToolView) -> Vec<String>;

    /// Parse captured output into diagnostics. Each adapter scans the
    /// stream its tool reports on; lines not matching the grammar yield
    /// nothing.
    fn parse(
        &self,
        document: &Document,
        output: &CapturedOutput,
        workspace_root: Option<&Path>,
    ) -> Vec<Diagnostic>;

    /// Map the tool's severity vocabulary onto the canonical enum.
    /// Unrecognized tokens map to Info.
    fn severity_of(&self, token: &str) -> Severity;
}

/// Strip the workspace root prefix from a reported file path, yielding a
/// workspace-relative path when the file sits under the root and the
/// reported path unchanged otherwise.
#[must_use]
pub(crate) fn relativize(file: &str, workspace_root: Option<&Path>) -> PathBuf {
    if let Some(root) = workspace_root
        && let Ok(stripped) = Path::new(file).strip_prefix(root)
        && !stripped.as_os_str().is_empty()
    {
        return stripped.to_path_buf();
    }
    PathBuf::from(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relativize_strips_workspace_root() {
        let path = relativize(
            "/home/ubuntu/project1/module_1.sv",
            Some(Path::new("/home/ubuntu/project1")),
        );
        assert_eq!(path, PathBuf::from("module_1.sv"));
    }

    #[test]
    fn test_relativize_keeps_nested_path() {
        let path = relativize(
            "/home/ubuntu/project1/rtl/core/alu.v",
            Some(Path::new("/home/ubuntu/project1")),
        );
        assert_eq!(path, PathBuf::from("rtl/core/alu.v"));
    }

    #[test]
    fn test_relativize_outside_root_stays_absolute() {
        let path = relativize(
            "/opt/lib/cells.v",
            Some(Path::new("/home/ubuntu/project1")),
        );
        assert_eq!(path, PathBuf::from("/opt/lib/cells.v"));
    }

    #[test]
    fn test_relativize_without_root() {
        let path = relativize("/home/ubuntu/project1/top.sv", None);
        assert_eq!(path, PathBuf::from("/home/ubuntu/project1/top.sv"));
    }

    #[test]
    fn test_relativize_root_itself_is_unchanged() {
        let path = relativize(
            "/home/ubuntu/project1",
            Some(Path::new("/home/ubuntu/project1")),
        );
        assert_eq!(path, PathBuf::from("/home/ubuntu/project1"));
    }
}
