//! Document identity: a source file plus its recognized HDL dialect.

use std::path::{Path, PathBuf};

/// Lexical variant of the hardware description language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HdlLanguage {
    Verilog,
    SystemVerilog,
}

impl HdlLanguage {
    /// Detect the language from a file extension.
    ///
    /// Returns `None` for anything that is not a Verilog/SystemVerilog
    /// source file; callers treat that as "not lintable".
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "v" | "vh" | "verilog" => Some(Self::Verilog),
            "sv" | "svh" => Some(Self::SystemVerilog),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_system_verilog(self) -> bool {
        self == Self::SystemVerilog
    }
}

/// A lintable document: path plus detected language.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Document {
    path: PathBuf,
    language: HdlLanguage,
}

impl Document {
    /// Build a document from a path, detecting the language from the
    /// extension. Returns `None` for unrecognized file types.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let language = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(HdlLanguage::from_extension)?;
        Some(Self { path, language })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn language(&self) -> HdlLanguage {
        self.language
    }
}
