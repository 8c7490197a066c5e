//! Performance instrumentation utilities

/// Time a block under a profiling scope and log the elapsed time.
/// Usage: timed!("operation name", { code })
#[macro_export]
macro_rules! timed {
    ($name:expr, $block:expr) => {{
        profiling::scope!($name);
        let _t = std::time::Instant::now();
        let r = $block;
        tracing::debug!(elapsed = ?_t.elapsed(), "{}", $name);
        r
    }};
}
