//! Core domain types for vlint.
//!
//! This crate contains pure domain types with no IO, no async, and minimal
//! dependencies. Everything here can be used from any layer of the engine.

mod diagnostic;
mod document;
mod standard;

pub use diagnostic::{Diagnostic, Range, Severity};
pub use document::{Document, HdlLanguage};
pub use standard::{SystemVerilogStandard, VerilogStandard};
