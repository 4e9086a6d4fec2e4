//! Lifecycle events, emitted through `tracing` when the `tracing` feature is enabled and compiled
//! out entirely otherwise.

cfg_if::cfg_if! {
    if #[cfg(feature = "tracing")] {
        macro_rules! trace_lifecycle {
            ($index:expr, $lifecycle:expr, $message:literal) => {
                tracing::trace!(
                    index = $index,
                    alternative = $lifecycle.name(),
                    $message
                )
            };
        }
    } else {
        macro_rules! trace_lifecycle {
            ($index:expr, $lifecycle:expr, $message:literal) => {{
                let _ = &$index;
                let _ = &$lifecycle;
            }};
        }
    }
}
