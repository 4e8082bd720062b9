//! Utility functions module
//!
//! Text editing for the creator and countdown formatting for the player.

pub mod text_input;

pub use text_input::TextInput;

use std::time::Duration;

/// Human-readable remaining time, e.g. `1m 5s`
///
/// # Examples
/// ```
/// use qcm::util::format_seconds;
///
/// assert_eq!(format_seconds(0), "0s");
/// assert_eq!(format_seconds(65), "1m 5s");
/// ```
pub fn format_seconds(secs: u32) -> String {
    humantime::format_duration(Duration::from_secs(secs as u64)).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(30), "30s");
        assert_eq!(format_seconds(120), "2m");
    }
}
