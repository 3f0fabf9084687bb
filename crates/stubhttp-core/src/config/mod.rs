//! Procedure files (YAML/JSON/JSONC).

pub mod error;
pub mod parser;
pub mod procedure;

pub use error::ConfigError;
pub use parser::load_procedures;
pub use procedure::{ProcedureConfig, ResponseConfig};
