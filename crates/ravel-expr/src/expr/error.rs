//! Expression construction errors.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    DegreeTooHigh,
    MismatchedLengths,
}

impl ExprError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ExprError::DegreeTooHigh => "EXPR_DEGREE_TOO_HIGH",
            ExprError::MismatchedLengths => "EXPR_MISMATCHED_LENGTHS",
        }
    }

    fn detail(&self) -> &'static str {
        match self {
            ExprError::DegreeTooHigh => "Product would exceed quadratic degree",
            ExprError::MismatchedLengths => "variables and coefficients must have the same length",
        }
    }
}

impl std::fmt::Display for ExprError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.detail())
    }
}

impl std::error::Error for ExprError {}

#[cfg(test)]
mod tests {
    use super::ExprError;

    #[test]
    fn error_code_is_stable() {
        assert_eq!(ExprError::DegreeTooHigh.code(), "EXPR_DEGREE_TOO_HIGH");
        assert_eq!(
            ExprError::MismatchedLengths.code(),
            "EXPR_MISMATCHED_LENGTHS"
        );
    }

    #[test]
    fn display_prefixes_error_code() {
        let rendered = ExprError::DegreeTooHigh.to_string();
        assert!(rendered.starts_with("[EXPR_DEGREE_TOO_HIGH]"));
    }
}
