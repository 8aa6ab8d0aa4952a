use tracing::Level;

/// Install the global fmt subscriber. Later calls are no-ops.
pub fn init(level: &str) {
    let level = parse_level(level);
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
}

fn parse_level(level: &str) -> Level {
    level.trim().parse().unwrap_or(Level::INFO)
}
