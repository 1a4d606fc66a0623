//! Status icons for CLI output

use crate::shared::Severity;

/// Status icons for different states
pub struct StatusIcon;

impl StatusIcon {
    /// Operation succeeded
    pub const SUCCESS: &'static str = "✓";

    /// Warning diagnostic
    pub const WARNING: &'static str = "⚠";

    /// Error diagnostic
    pub const ERROR: &'static str = "✗";

    /// Get icon for a diagnostic severity
    pub fn get_severity_icon(severity: Severity) -> &'static str {
        match severity {
            Severity::Error => Self::ERROR,
            Severity::Warning => Self::WARNING,
        }
    }

    /// Get label for a diagnostic severity
    pub fn get_severity_text(severity: Severity) -> &'static str {
        match severity {
            Severity::Error => "Error",
            Severity::Warning => "Warning",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_severity_icon() {
        assert_eq!(StatusIcon::get_severity_icon(Severity::Error), StatusIcon::ERROR);
        assert_eq!(StatusIcon::get_severity_icon(Severity::Warning), StatusIcon::WARNING);
    }

    #[test]
    fn test_get_severity_text() {
        assert_eq!(StatusIcon::get_severity_text(Severity::Error), "Error");
        assert_eq!(StatusIcon::get_severity_text(Severity::Warning), "Warning");
    }
}
