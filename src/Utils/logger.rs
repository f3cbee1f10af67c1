use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Installs a terminal logger at `level`. A logger that is already installed is kept, so
/// calling this twice (or from several tests) is harmless.
pub fn init_logger(level: LevelFilter) {
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Error)
        // the BDF solver reports every restart at info level
        .add_filter_ignore_str("RustedSciThe")
        .build();
    if TermLogger::init(level, config, TerminalMode::Mixed, ColorChoice::Auto).is_err() {
        log::debug!("logger already initialized");
    }
}
