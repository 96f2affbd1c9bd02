pub mod range;

/// Number of decimal digits that generated tile fields keep. See [truncate].
pub const FIELD_PRECISION: f64 = 1000.0;

/// A macro to measure the evaluation time of an expression. Wraps an
/// expression, logs how long it took to evaluate, and returns its value.
#[macro_export]
macro_rules! timed {
    ($label:expr, $ex:expr) => {
        $crate::timed!($label, log::Level::Debug, $ex)
    };
    ($label:expr, $log_level:expr, $ex:expr) => {{
        let now = std::time::Instant::now();
        let value = $ex;
        let elapsed = now.elapsed();
        log::log!($log_level, "{} took {} ms", $label, elapsed.as_millis());
        value
    }};
}

/// Drop everything past the third decimal digit. This rounds towards negative
/// infinity rather than to the nearest value, so `0.9999` becomes `0.999`.
/// Height and temperature are clamped to [0,1] and then capped to this
/// precision. For values in that range, truncating again changes nothing,
/// which means exact equality comparisons on them are stable.
pub fn truncate(value: f64) -> f64 {
    (value * FIELD_PRECISION).floor() / FIELD_PRECISION
}
