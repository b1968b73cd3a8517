use thiserror::Error;

pub type Result<T> = std::result::Result<T, BrowserError>;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("chromium error: {0}")]
    ChromiumError(String),

    #[error("navigation failed: {0}")]
    NavigationError(String),

    #[error("control not found in group {group}: {selector}")]
    ControlNotFound { group: String, selector: String },

    #[error("timeout: {0}")]
    Timeout(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BrowserError::NavigationError("page not found".to_string());
        assert_eq!(err.to_string(), "navigation failed: page not found");
    }

    #[test]
    fn test_control_not_found_names_group() {
        let err = BrowserError::ControlNotFound {
            group: "R000005".to_string(),
            selector: "#surveyQuestions input".to_string(),
        };
        assert!(err.to_string().contains("R000005"));
    }
}
