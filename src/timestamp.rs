use tokio::time::Instant;

/// Whole milliseconds elapsed since `start`, truncated.
pub fn elapsed_millis(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
