mod config;
mod logging;

pub use config::{build_handler, load_config, log_config};
pub use logging::init_logging;
