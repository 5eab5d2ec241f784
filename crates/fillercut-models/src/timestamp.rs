//! Timestamp formatting utilities.
//!
//! Segment manifests and subtitle output both need wall-clock renderings of
//! float second values; the only difference is the millisecond separator.

/// Format seconds as `HH:MM:SS.mmm`.
///
/// # Examples
/// ```
/// use fillercut_models::timestamp::format_hms;
/// assert_eq!(format_hms(90.0), "00:01:30.000");
/// assert_eq!(format_hms(3661.25), "01:01:01.250");
/// ```
pub fn format_hms(total_secs: f64) -> String {
    let (hours, mins, secs, millis) = split_seconds(total_secs);
    format!("{:02}:{:02}:{:02}.{:03}", hours, mins, secs, millis)
}

/// Format seconds as `HH:MM:SS,mmm` (SRT timing line convention).
pub fn format_srt(total_secs: f64) -> String {
    let (hours, mins, secs, millis) = split_seconds(total_secs);
    format!("{:02}:{:02}:{:02},{:03}", hours, mins, secs, millis)
}

fn split_seconds(total_secs: f64) -> (u32, u32, u32, u32) {
    let clamped = total_secs.max(0.0);
    // Round at millisecond precision first so 59.9996 carries into the minute
    let total_millis = (clamped * 1000.0).round() as u64;
    let hours = (total_millis / 3_600_000) as u32;
    let mins = ((total_millis % 3_600_000) / 60_000) as u32;
    let secs = ((total_millis % 60_000) / 1000) as u32;
    let millis = (total_millis % 1000) as u32;
    (hours, mins, secs, millis)
}
