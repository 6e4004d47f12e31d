/// Formats a handle time as `M:SS`, or `H:MM:SS` from one hour on.
///
/// Sub-second precision is dropped.
///
/// # Example
/// ```
/// use trim_engine::format_duration_label;
///
/// assert_eq!(format_duration_label(5_400), "0:05");
/// assert_eq!(format_duration_label(3_723_000), "1:02:03");
/// ```
pub fn format_duration_label(ms: u64) -> String {
    let total_seconds = ms / 1_000;
    let hours = total_seconds / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::format_duration_label;

    #[test]
    fn zero_renders_as_minutes_and_seconds() {
        assert_eq!(format_duration_label(0), "0:00");
    }

    #[test]
    fn minutes_are_not_padded_below_one_hour() {
        assert_eq!(format_duration_label(754_999), "12:34");
    }

    #[test]
    fn hours_pad_minutes() {
        assert_eq!(format_duration_label(36_000_000), "10:00:00");
    }
}
