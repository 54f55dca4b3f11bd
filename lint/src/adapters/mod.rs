//! One adapter per supported external lint tool.

mod icarus;
mod modelsim;
mod slang;
mod verilator;
mod xvlog;

pub use icarus::IcarusAdapter;
pub use modelsim::ModelsimAdapter;
pub use slang::SlangAdapter;
pub use verilator::VerilatorAdapter;
pub use xvlog::XvlogAdapter;
