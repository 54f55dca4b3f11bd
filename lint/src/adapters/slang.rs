//! Slang (`slang`) backend.
//!
//! Clang-style diagnostics on stderr:
//!
//! ```text
//! rtl/top.sv:8:13: error: expected ';'
//! rtl/top.sv:4:9: warning: implicit conversion truncates from 32 to 8 bits [-Wwidth-trunc]
//! ```

use std::path::Path;

use regex::Regex;

use vlint_exec::CapturedOutput;
use vlint_types::{Diagnostic, Document, Range, Severity, SystemVerilogStandard};

use crate::adapter::{ToolAdapter, ToolView, relativize};

pub struct SlangAdapter {
    line_re: Regex,
}

impl SlangAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            line_re: Regex::new(
                r"^(?P<file>.+?):(?P<line>\d+):(?P<col>\d+): (?P<level>error|warning|note): (?P<msg>.*)$",
            )
            .expect("slang line pattern is valid"),
        }
    }
}

impl Default for SlangAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolAdapter for SlangAdapter {
    fn name(&self) -> &'static str {
        "slang"
    }

    fn default_executable(&self) -> &str {
        "slang"
    }

    fn tool_args(&self, document: &Document, view: &ToolView) -> Vec<String> {
        let mut args = vec!["--lint-only".to_string()];
        if document.language().is_system_verilog() {
            let year = match view.systemverilog_standard {
                SystemVerilogStandard::SV2005 => "2005",
                SystemVerilogStandard::SV2009 => "2009",
                SystemVerilogStandard::SV2012 => "2012",
                SystemVerilogStandard::SV2017 => "2017",
            };
            args.push("--std".to_string());
            args.push(format!("1800-{year}"));
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
            let Some(line_num) = caps["line"].parse::<u32>().ok().and_then(|n| n.checked_sub(1))
            else {
                continue;
            };
            let range = match caps["col"].parse::<u32>() {
                Ok(col) if col > 0 => Range::from_position(line_num, col - 1),
                _ => Range::full_line(line_num),
            };
            let level = &caps["level"];
            diagnostics.push(Diagnostic::new(
                relativize(&caps["file"], workspace_root),
                self.severity_of(level),
                range,
                caps["msg"].trim(),
                level,
                self.name(),
            ));
        }
        diagnostics
    }

    fn severity_of(&self, token: &str) -> Severity {
        match token {
            "error" => Severity::Error,
            "warning" => Severity::Warning,
            _ => Severity::Info,
        }
    }
}
