//! Verilator (`verilator --lint-only`) backend.
//!
//! Diagnostics arrive on stderr:
//!
//! ```text
//! %Warning-WIDTH: rtl/top.v:7:12: Operator ASSIGN expects 8 bits ...
//! %Error: rtl/top.v:3:1: syntax error, unexpected endmodule
//! %Error: Exiting due to 1 error(s)
//! ```
//!
//! Summary and continuation lines carry no file location and are skipped.

use std::path::Path;

use regex::Regex;

use vlint_exec::CapturedOutput;
use vlint_types::{
    Diagnostic, Document, Range, Severity, SystemVerilogStandard, VerilogStandard,
};

use crate::adapter::{ToolAdapter, ToolView, relativize};

pub struct VerilatorAdapter {
    line_re: Regex,
}

impl VerilatorAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            line_re: Regex::new(
                r"^%(?P<level>Error|Warning)(?:-(?P<code>[A-Z][A-Z0-9_]*))?: (?:(?P<file>[^:]+):(?P<line>\d+):(?:(?P<col>\d+):)? )?(?P<msg>.*)$",
            )
            .expect("verilator line pattern is valid"),
        }
    }

    fn default_language(document: &Document, view: &ToolView) -> String {
        if document.language().is_system_verilog() {
            let year = match view.systemverilog_standard {
                SystemVerilogStandard::SV2005 => "2005",
                SystemVerilogStandard::SV2009 => "2009",
                SystemVerilogStandard::SV2012 => "2012",
                SystemVerilogStandard::SV2017 => "2017",
            };
            format!("1800-{year}")
        } else {
            let year = match view.verilog_standard {
                VerilogStandard::V1995 => "1995",
                VerilogStandard::V2001 => "2001",
                VerilogStandard::V2005 => "2005",
            };
            format!("1364-{year}")
        }
    }
}

impl Default for VerilatorAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolAdapter for VerilatorAdapter {
    fn name(&self) -> &'static str {
        "verilator"
    }

    fn default_executable(&self) -> &str {
        "verilator"
    }

    fn tool_args(&self, document: &Document, view: &ToolView) -> Vec<String> {
        let mut args = vec![
            "--lint-only".to_string(),
            "-Wall".to_string(),
            "--default-language".to_string(),
            Self::default_language(document, view),
        ];
        if document.language().is_system_verilog() {
            args.push("-sv".to_string());
        }
        for dir in &view.config.include_dirs {
            args.push(format!("-I{}", dir.display()));
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
        for line in output.stderr.lines() {
            let Some(caps) = self.line_re.captures(line) else {
                continue;
            };
            // No location means a summary line, not a diagnostic.
            let Some(file) = caps.name("file") else {
                continue;
            };
            let Some(line_num) = caps["line"].parse::<u32>().ok().and_then(|n| n.checked_sub(1))
            else {
                continue;
            };
            let range = match caps.name("col").and_then(|c| c.as_str().parse::<u32>().ok()) {
                Some(col) if col > 0 => Range::from_position(line_num, col - 1),
                _ => Range::full_line(line_num),
            };
            let level = &caps["level"];
            let code = caps
                .name("code")
                .map_or_else(|| level.to_lowercase(), |m| m.as_str().to_string());
            diagnostics.push(Diagnostic::new(
                relativize(file.as_str(), workspace_root),
                self.severity_of(level),
                range,
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
