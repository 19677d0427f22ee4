/// Like `tracing::info!`, but takes a starting time and attaches how long it took
/// from the starting time to now as the `runtime_secs` field.
/// ```ignore
/// let time = Local::now();
/// info_time!(time, "str {}, {}", 1, 2);
/// ```
#[macro_export]
macro_rules! info_time {
    ($time:expr, $strfm:literal $(, $arg:expr)* $(,)?) => {{
        let run_time = (::chrono::Local::now() - $time)
            .num_microseconds()
            .map(|n| n as f64 / 1_000_000.0)
            .unwrap_or(0.0);
        ::tracing::info!(runtime_secs = run_time, $strfm $(, $arg)*);
    }};
}
