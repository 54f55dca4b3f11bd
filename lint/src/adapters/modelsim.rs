//! ModelSim/Questa (`vlog`) backend.
//!
//! Diagnostics arrive on stdout. The vlog message id may precede or follow
//! the location, and warnings can be marked suppressible:
//!
//! ```text
//! ** Error: (vlog-13069) rtl/top.v(3): near "endmodule": syntax error
//! ** Warning: rtl/top.v(12): (vlog-2623) undefined variable: q
//! ** Warning (suppressible): rtl/top.v(8): (vlog-2240) treating stale default
//! ```

use std::path::Path;

use regex::Regex;

use vlint_exec::CapturedOutput;
use vlint_types::{Diagnostic, Document, Range, Severity};

use crate::adapter::{ToolAdapter, ToolView, relativize};

pub struct ModelsimAdapter {
    line_re: Regex,
}

impl ModelsimAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            line_re: Regex::new(
                r"^\*\* (?P<level>Error|Warning|Note)(?: \(suppressible\))?: (?:\((?P<pre>vlog-\d+)\) )?(?P<file>[^(]+)\((?P<line>\d+)\): (?:\((?P<post>vlog-\d+)\) )?(?P<msg>.*)$",
            )
            .expect("modelsim line pattern is valid"),
        }
    }
}

impl Default for ModelsimAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolAdapter for ModelsimAdapter {
    fn name(&self) -> &'static str {
        "modelsim"
    }

    fn default_executable(&self) -> &str {
        "vlog"
    }

    fn tool_args(&self, document: &Document, view: &ToolView) -> Vec<String> {
        let mut args = vec!["-quiet".to_string(), "-lint".to_string()];
        if document.language().is_system_verilog() {
            args.push("-sv".to_string());
        }
        for dir in &view.config.include_dirs {
            args.push(format!("+incdir+{}", dir.display()));
        }
        args
    }

    fn parse(
        &self,
        _document: &Document,
        output: &CapturedOutput,
        workspace_root: Option<&Path>,
    ) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for line in output.stdout.lines() {
            let Some(caps) = self.line_re.captures(line) else {
                continue;
            };
            let Some(line_num) = caps["line"].parse::<u32>().ok().and_then(|n| n.checked_sub(1))
            else {
                continue;
            };
            let level = &caps["level"];
            let code = caps
                .name("pre")
                .or_else(|| caps.name("post"))
                .map_or_else(|| level.to_lowercase(), |m| m.as_str().to_string());
            diagnostics.push(Diagnostic::new(
                relativize(caps["file"].trim(), workspace_root),
                self.severity_of(level),
                Range::full_line(line_num),
                caps["msg"].trim(),
                code,
                self.name(),
            ));
        }
        diagnostics
    }

    fn severity_of(&self, token: &str) -> Severity {
        match token {
            "Error" => Severity::Error,
            "Warning" => Severity::Warning,
            _ => Severity::Info,
        }
    }
}
