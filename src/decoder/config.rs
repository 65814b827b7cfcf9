use std::sync::OnceLock;

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

/// Environment variable holding the minimum batch size for parallel unstuffing.
pub const PAR_MIN_BATCH_ENV: &str = "AZTEC_PAR_MIN_BATCH";

const DEFAULT_PAR_MIN_BATCH: usize = 64;

static PAR_MIN_BATCH: OnceLock<usize> = OnceLock::new();

/// Batches with at least this many symbols are spread over the rayon pool.
pub fn par_min_batch() -> usize {
    *PAR_MIN_BATCH.get_or_init(|| parse_env_usize(PAR_MIN_BATCH_ENV, DEFAULT_PAR_MIN_BATCH).max(1))
}
