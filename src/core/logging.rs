//! Logging initialization

/// Initialize the logging system
///
/// Uses env_logger with default filter level of `info`.
/// Override with RUST_LOG environment variable, e.g.
/// `RUST_LOG=bvh_player=trace` to see per-tick frame selection.
///
/// # Example
/// ```
/// bvh_player::core::logging::init();
/// log::info!("Playback started");
/// ```
pub fn init() {
    // try_init so repeated calls (tests, embedding hosts) do not panic
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).try_init();
}
