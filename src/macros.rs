use chrono::{DateTime, Local};

/// Logs a timestamped line to stderr, leaving stdout to the records.
/// Given a starting time as first argument it also reports the seconds elapsed since then.
/// ```
/// use chrono::Local;
/// use eksisozluk_cli::info_time;
///
/// info_time!("page {} of {}", 1, 2);
/// let time = Local::now();
/// info_time!(time, "fetched {} pages", 2);
/// ```
#[macro_export]
macro_rules! info_time {
    ($strfm:literal $(,)? $($arg:expr),*) => {{
        eprintln!("{:<30} : {}", ::chrono::Local::now(), format!($strfm, $($arg),*));
    }};
    ($time:expr, $strfm:literal $(,)? $($arg:expr),*) => {{
        let run_time = $crate::macros::elapsed_secs($time);
        eprintln!(
            "{:<30} : {} ({} sec)",
            ::chrono::Local::now(),
            format!($strfm, $($arg),*),
            run_time
        );
    }};
}

#[doc(hidden)]
pub fn elapsed_secs(since: DateTime<Local>) -> f64 {
    (Local::now() - since)
        .num_microseconds()
        .map(|n| n as f64 / 1_000_000.0)
        .unwrap_or(0.0)
}
