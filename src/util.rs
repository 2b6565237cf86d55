/// Checks that a numerical value lies in an interval and returns early with
/// [`ConfigError::OutOfRange`](crate::error::ConfigError::OutOfRange) if not
///
/// `ensure_interval!(x, a, b)` checks `[a, b]`, `ensure_interval!(x, > a, b)` checks `(a, b]`.
/// NaN is never in range.
///
/// ### Example
/// ```ignore
/// let alpha = 2.0;
/// ensure_interval!(alpha, > 0.0, 1.0);
/// ```
/// This returns `Err` with the message "invalid value for \`alpha\`: 2 is not in the interval (0.0, 1.0]".
macro_rules! ensure_interval {
    ($var:expr, > $a:expr, $b:expr) => {{
        let value: f64 = $var;
        if !(value > $a && value <= $b) {
            return Err($crate::error::ConfigError::OutOfRange {
                name: stringify!($var),
                value,
                interval: concat!("(", stringify!($a), ", ", stringify!($b), "]"),
            });
        }
    }};
    ($var:expr, $a:expr, $b:expr) => {{
        let value: f64 = $var;
        if !(value >= $a && value <= $b) {
            return Err($crate::error::ConfigError::OutOfRange {
                name: stringify!($var),
                value,
                interval: concat!("[", stringify!($a), ", ", stringify!($b), "]"),
            });
        }
    }};
}

pub(crate) use ensure_interval;
