//! Vivado logical simulator (`xvlog`) backend.
//!
//! Diagnostics arrive on stdout with the location at the end of the line:
//!
//! ```text
//! ERROR: [VRFC 10-2865] module 'top' ignored due to previous errors [/ws/rtl/top.sv:3]
//! WARNING: [VRFC 10-3091] port 'q' remains unconnected [/ws/rtl/top.sv:12]
//! ```

use std::path::Path;

use regex::Regex;

use vlint_exec::CapturedOutput;
use vlint_types::{Diagnostic, Document, Range, Severity};

use crate::adapter::{ToolAdapter, ToolView, relativize};

pub struct XvlogAdapter {
    line_re: Regex,
}

impl XvlogAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            line_re: Regex::new(
                r"^(?P<level>ERROR|WARNING|INFO): \[(?P<code>[^\]]+)\] (?P<msg>.*) \[(?P<file>.+):(?P<line>\d+)\]$",
            )
            .expect("xvlog line pattern is valid"),
        }
    }
}

impl Default for XvlogAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolAdapter for XvlogAdapter {
    fn name(&self) -> &'static str {
        "xvlog"
    }

    fn default_executable(&self) -> &str {
        "xvlog"
    }

    fn tool_args(&self, document: &Document, view: &ToolView) -> Vec<String> {
        let mut args = vec!["--nolog".to_string()];
        if document.language().is_system_verilog() {
            args.push("-sv".to_string());
        }
        for dir in &view.config.include_dirs {
            args.push("-i".to_string());
            args.push(dir.display().to_string());
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
            diagnostics.push(Diagnostic::new(
                relativize(&caps["file"], workspace_root),
                self.severity_of(level),
                Range::full_line(line_num),
                caps["msg"].trim(),
                &caps["code"],
                self.name(),
            ));
        }
        diagnostics
    }

    fn severity_of(&self, token: &str) -> Severity {
        match token {
            "ERROR" => Severity::Error,
            "WARNING" => Severity::Warning,
            _ => Severity::Info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> XvlogAdapter {
        XvlogAdapter::new()
    }

    fn doc(path: &str) -> Document {
        Document::from_path(path).unwrap()
    }

    fn captured(stdout: &str) -> CapturedOutput {
        CapturedOutput {
            stdout: stdout.to_string(),
            stderr: String::new(),
            exit_code: Some(1),
        }
    }

    #[test]
    fn test_args_verilog() {
        let args = adapter().tool_args(&doc("top.v"), &ToolView::default());
        assert_eq!(args, vec!["--nolog"]);
    }

    #[test]
    fn test_args_systemverilog() {
        let args = adapter().tool_args(&doc("top.sv"), &ToolView::default());
        assert_eq!(args, vec!["--nolog", "-sv"]);
    }

    #[test]
    fn test_parse_error() {
        let output = captured(
            "ERROR: [VRFC 10-2865] module 'top' ignored due to previous errors [/ws/rtl/top.sv:3]\n",
        );
        let diags = adapter().parse(&doc("top.sv"), &output, Some(Path::new("/ws")));
        assert_eq!(diags.len(), 1);
        let d = &diags[0];
        assert_eq!(d.file(), Path::new("rtl/top.sv"));
        assert_eq!(d.range().start_line, 2);
        assert_eq!(d.severity(), Severity::Error);
        assert_eq!(d.code(), "VRFC 10-2865");
        assert_eq!(d.message(), "module 'top' ignored due to previous errors");
        assert_eq!(d.source(), "xvlog");
    }

    #[test]
    fn test_parse_warning_and_info() {
        let output = captured(
            "WARNING: [VRFC 10-3091] port 'q' remains unconnected [top.sv:12]\nINFO: [VRFC 10-311] analyzing module top [top.sv:1]\n",
        );
        let diags = adapter().parse(&doc("top.sv"), &output, None);
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].severity(), Severity::Warning);
        assert_eq!(diags[1].severity(), Severity::Info);
    }

    #[test]
    fn test_lines_without_location_are_skipped() {
        let output = captured("INFO: [Common 17-206] Exiting xvlog at Thu Mar  6 10:00:00 2025\n");
        assert!(adapter().parse(&doc("top.sv"), &output, None).is_empty());
    }

    #[test]
    fn test_stderr_is_ignored() {
        let output = CapturedOutput {
            stdout: String::new(),
            stderr: "ERROR: [VRFC 10-2865] msg [top.sv:3]\n".to_string(),
            exit_code: Some(1),
        };
        assert!(adapter().parse(&doc("top.sv"), &output, None).is_empty());
    }
}
