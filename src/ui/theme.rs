//! Visual theme and styling.

use console::Style;

/// Toolgate's visual theme.
#[derive(Debug, Clone)]
pub struct ToolgateTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for informational/running elements (magenta).
    pub info: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for highlighted text such as resolved paths (bold).
    pub highlight: Style,
    /// Style for box-drawing borders (dim).
    pub border: Style,
    /// Style for diagnostic channel titles (magenta dim).
    pub channel: Style,
    /// Style for key labels in key-value displays (bold).
    pub key: Style,
}

impl Default for ToolgateTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolgateTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            info: Style::new().magenta(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            border: Style::new().dim(),
            channel: Style::new().magenta().dim(),
            key: Style::new().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            info: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            border: Style::new(),
            channel: Style::new(),
            key: Style::new(),
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format an informational message.
    pub fn format_info(&self, msg: &str) -> String {
        format!("{}", self.info.apply_to(format!("• {}", msg)))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_formats_success() {
        let theme = ToolgateTheme::plain();
        let msg = theme.format_success("Found maid 1.2.0");
        assert!(msg.contains("✓"));
        assert!(msg.contains("maid 1.2.0"));
    }

    #[test]
    fn theme_formats_warning() {
        let theme = ToolgateTheme::plain();
        let msg = theme.format_warning("Restart your shell");
        assert!(msg.contains("⚠"));
        assert!(msg.contains("Restart"));
    }

    #[test]
    fn theme_formats_error() {
        let theme = ToolgateTheme::plain();
        let msg = theme.format_error("Install failed");
        assert!(msg.contains("✗"));
        assert!(msg.contains("Install failed"));
    }

    #[test]
    fn theme_formats_info() {
        let theme = ToolgateTheme::plain();
        assert_eq!(theme.format_info("Canceled"), "• Canceled");
    }

    #[test]
    fn default_impl_matches_new() {
        let default = ToolgateTheme::default();
        let new = ToolgateTheme::new();
        assert_eq!(default.format_success("test"), new.format_success("test"));
    }
}
