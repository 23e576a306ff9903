//! pkgsnap-exec: External command execution
//!
//! Provides the single command-execution helper shared by all package
//! backends and the metadata collector: run a command, capture stdout,
//! map failures into one error type.

pub mod error;
pub mod local;
pub mod result;
pub mod traits;

pub use error::ExecError;
pub use local::LocalExecutor;
pub use result::CommandResult;
pub use traits::CommandExecutor;
