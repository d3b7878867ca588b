//! Concurrency sizing for the batch runner.

// External commands are mostly I/O-bound; cap the pool so hundreds of
// managed repositories don't exhaust process slots.
pub const RUN_CONCURRENT_CAP: usize = 12;

/// Determines the worker-pool width for `do`.
///
/// An explicit `--jobs N` wins (floored at 1); otherwise CPU cores + 2,
/// capped at [`RUN_CONCURRENT_CAP`].
pub fn run_concurrency(jobs: Option<usize>) -> usize {
    if let Some(n) = jobs {
        return n.max(1);
    }
    (num_cpus::get() + 2).min(RUN_CONCURRENT_CAP)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_jobs_wins() {
        assert_eq!(run_concurrency(Some(3)), 3);
    }

    #[test]
    fn jobs_is_floored_at_one() {
        assert_eq!(run_concurrency(Some(0)), 1);
    }

    #[test]
    fn default_is_bounded() {
        let n = run_concurrency(None);
        assert!(n >= 1);
        assert!(n <= RUN_CONCURRENT_CAP);
    }
}
