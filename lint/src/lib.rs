//! Lint orchestration and diagnostic parsing engine for vlint.
//!
//! One [`adapter::ToolAdapter`] per external tool translates between that
//! tool's command grammar / output grammar and the canonical
//! [`vlint_types::Diagnostic`] model. The [`LintManager`] fans lint requests
//! out across the enabled adapters, owns the per-(document, tool) diagnostic
//! partitions, and publishes changes over an event channel.

pub mod adapter;
pub mod adapters;

pub(crate) mod store;

mod manager;

pub use adapter::{ToolAdapter, ToolView};
pub use manager::{LintError, LintEvent, LintManager, default_adapters};
