//! CLI command implementations.

mod chapters;
mod config;
mod doctor;
mod status;

pub use chapters::run_chapters;
pub use config::run_config;
pub use doctor::run_doctor;
pub use status::run_status;
