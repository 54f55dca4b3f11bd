//! Icarus Verilog (`iverilog`) backend.
//!
//! Diagnostics arrive on stderr, one per line:
//!
//! ```text
//! /home/ubuntu/project1/module_1.sv:3: syntax error
//! /home/ubuntu/project1/property_1.sv:3: error: Invalid module instantiation
//! ```
//!
//! The level token is optional; when absent the line is an error.

use std::path::Path;

use regex::Regex;

use vlint_exec::CapturedOutput;
use vlint_types::{
    Diagnostic, Document, Range, Severity, SystemVerilogStandard, VerilogStandard,
};

use crate::adapter::{ToolAdapter, ToolView, relativize};

pub struct IcarusAdapter {
    line_re: Regex,
}

impl IcarusAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            line_re: Regex::new(r"^(?P<file>.+?):(?P<line>\d+):(?: (?P<level>error|warning):)? (?P<msg>.*)$")
                .expect("icarus line pattern is valid"),
        }
    }

    fn standard_flag(document: &Document, view: &ToolView) -> &'static str {
        if document.language().is_system_verilog() {
            match view.systemverilog_standard {
                SystemVerilogStandard::SV2005 => "-g2005-sv",
                SystemVerilogStandard::SV2009 => "-g2009",
                // iverilog has no separate 2017 mode
                SystemVerilogStandard::SV2012 | SystemVerilogStandard::SV2017 => "-g2012",
            }
        } else {
            match view.verilog_standard {
                VerilogStandard::V1995 => "-g1995",
                VerilogStandard::V2001 => "-g2001",
                VerilogStandard::V2005 => "-g2005",
            }
        }
    }
}

impl Default for IcarusAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolAdapter for IcarusAdapter {
    fn name(&self) -> &'static str {
        "iverilog"
    }

    fn default_executable(&self) -> &str {
        "iverilog"
    }

    fn tool_args(&self, document: &Document, view: &ToolView) -> Vec<String> {
        // -t null: elaborate and check only, discard output
        let mut args = vec!["-t".to_string(), "null".to_string()];
        args.push(Self::standard_flag(document, view).to_string());
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
            let code = caps
                .name("level")
                .map_or("error", |m| m.as_str());
            diagnostics.push(Diagnostic::new(
                relativize(&caps["file"], workspace_root),
                self.severity_of(code),
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
            "error" => Severity::Error,
            "warning" => Severity::Warning,
            _ => Severity::Info,
        }
    }
}
