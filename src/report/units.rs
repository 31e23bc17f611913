//! Human-readable durations and storage sizes for the report

const MS_PER_SECOND: f64 = 1000.0;
const MS_PER_MINUTE: f64 = MS_PER_SECOND * 60.0;
const MS_PER_HOUR: f64 = MS_PER_MINUTE * 60.0;
const MS_PER_DAY: f64 = MS_PER_HOUR * 24.0;

const GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Format a millisecond total as days, hours, minutes and seconds.
///
/// Each component is the fractional remainder within the next larger unit
/// (hours within the day, minutes within the hour, ...), days within the
/// year. Components are not cumulative: `25h` renders as `1.04` days and
/// `1.00` hours.
pub fn format_duration(millis: f64) -> String {
    let seconds = (millis / MS_PER_SECOND) % 60.0;
    let minutes = (millis / MS_PER_MINUTE) % 60.0;
    let hours = (millis / MS_PER_HOUR) % 24.0;
    let days = (millis / MS_PER_DAY) % 365.0;

    format!(
        "{:.2} Days Total, {:.2} Hours, {:.2} Minutes, {:.2} Seconds of total content",
        days, hours, minutes, seconds
    )
}

/// Format a byte count in GB, switching to TB from 1024 GB.
pub fn format_storage(bytes: u64) -> String {
    let gb = bytes as f64 / GB;
    if gb < 1024.0 {
        format!("{:.2} GB", gb)
    } else {
        format!("{:.2} TB", gb / 1024.0)
    }
}
