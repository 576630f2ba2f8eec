/// Pure functions for formatting user-facing messages (Discord-agnostic)

/// Format a validation error message with emoji
pub fn format_error(message: &str) -> String {
    format!("❌ {}", message)
}

/// Format a success message with emoji
pub fn format_success(message: &str) -> String {
    format!("✅ {}", message)
}

/// Format an info message with emoji
pub fn format_info(message: &str) -> String {
    format!("ℹ️ {}", message)
}

/// Build the help text for the accepted birthday formats
pub fn build_date_format_help() -> String {
    "Invalid date format. Please use DD/MM or DD/MM/YY.".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error() {
        assert_eq!(format_error("Something failed"), "❌ Something failed");
    }

    #[test]
    fn test_format_success() {
        assert_eq!(format_success("It worked"), "✅ It worked");
    }

    #[test]
    fn test_format_info() {
        assert_eq!(format_info("Good to know"), "ℹ️ Good to know");
    }

    #[test]
    fn test_build_date_format_help() {
        let help = build_date_format_help();
        assert!(help.contains("DD/MM"));
        assert!(help.contains("DD/MM/YY"));
    }
}
