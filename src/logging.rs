use tracing::Level;

/// Diagnostic log level for the CLI's verbosity flags.
pub fn level_for(verbose: bool, quiet: bool) -> Level {
    if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::WARN
    }
}

/// Install a stderr subscriber. Safe to call once per process.
pub fn init(verbose: bool, quiet: bool) {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level_for(verbose, quiet))
        .with_target(false)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_flags() {
        assert_eq!(level_for(false, false), Level::WARN);
        assert_eq!(level_for(true, false), Level::DEBUG);
        assert_eq!(level_for(true, true), Level::ERROR);
    }
}
