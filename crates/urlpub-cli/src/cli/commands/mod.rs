//! CLI command handlers, one per file.

mod check;
mod completions;
mod config_path;
mod notify;

pub use check::run_check;
pub use completions::run_completions;
pub use config_path::run_config_path;
pub use notify::{run_notify, NotifyArgs};
