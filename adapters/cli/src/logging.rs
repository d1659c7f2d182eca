use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger.
///
/// `RUST_LOG` overrides the default `info` filter; set it to `debug` to see
/// spawns, exits and the frame rate.
pub(crate) fn init() {
    let env = Env::default().default_filter_or(LevelFilter::Info.to_string());
    let mut builder = Builder::from_env(env);

    // `try_init` only fails if a logger was already set.
    let _ = builder.try_init();
}
