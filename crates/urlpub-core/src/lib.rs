pub mod config;
pub mod env;
pub mod logging;
pub mod notify;
pub mod step;
pub mod validate;
