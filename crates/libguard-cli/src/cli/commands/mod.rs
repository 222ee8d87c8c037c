//! CLI command handlers. Each returns the process exit code on success.

mod check;
mod checksum;
mod root_check;
mod verify;

pub use check::run_check;
pub use checksum::run_checksum;
pub use root_check::run_root_check;
pub use verify::run_verify;
