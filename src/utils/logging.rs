//! Logging setup

use log::LevelFilter;

/// Level used when `--log` is not given.
pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;
/// Level used with `--log`.
pub const VERBOSE_LEVEL: LevelFilter = LevelFilter::Debug;

pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        VERBOSE_LEVEL
    } else {
        DEFAULT_LEVEL
    }
}

/// Install the stderr logger. `RUST_LOG` directives are applied on top of the
/// chosen level. Calling it twice is harmless.
pub fn init_logging(verbose: bool) {
    let _ = env_logger::Builder::new()
        .filter_level(level_for(verbose))
        .parse_default_env()
        .format_timestamp(None)
        .format_target(true)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels() {
        assert_eq!(level_for(false), LevelFilter::Warn);
        assert_eq!(level_for(true), LevelFilter::Debug);
    }

    #[test]
    fn test_init_twice() {
        init_logging(true);
        init_logging(false);
    }
}
