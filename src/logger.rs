/// Initializes the global logger.
///
/// Verbose runs log per-file work at `Debug`; regular runs only show phase progress.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info })
        .format_target(false)
        .init();
}
