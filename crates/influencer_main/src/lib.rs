mod app;
mod cli;
mod log;
mod media;
mod ui;

pub use app::run;
pub use cli::{Cli, Command};
pub use log::{init_logger, LogLevel};
pub use media::MediaReference;
