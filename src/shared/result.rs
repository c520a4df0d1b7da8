use serde::Serialize;

// ============================================================================
// Command Results
// ============================================================================
//
// Command handlers never let an error escape as a panic or an untyped
// error. Every outcome is either `Ok(payload)` or a `CommandError` the
// caller can match on.
//
// ============================================================================

pub type CommandResult<T = ()> = Result<T, CommandError>;

/// Broad category of a command failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Raw input was rejected; the caller can fix it and resubmit
    Validation,
    /// Something went wrong after the input was accepted
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{code}: {description}")]
pub struct CommandError {
    kind: ErrorKind,
    code: String,
    description: String,
}

impl CommandError {
    pub fn validation(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Validation,
            code: code.into(),
            description: description.into(),
        }
    }

    pub fn failure(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Failure,
            code: code.into(),
            description: description.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Field-scoped code such as `Customer.PhoneNumber`
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// HTTP status a request adapter would usually answer with
    pub fn status_hint(&self) -> u16 {
        match self.kind {
            ErrorKind::Validation => 400,
            ErrorKind::Failure => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = CommandError::validation("Customer.PhoneNumber", "bad phone");

        assert_eq!(error.kind(), ErrorKind::Validation);
        assert_eq!(error.code(), "Customer.PhoneNumber");
        assert_eq!(error.description(), "bad phone");
        assert_eq!(error.status_hint(), 400);
    }

    #[test]
    fn test_failure_error_display() {
        let error = CommandError::failure("CreateCustomer.Failure", "connection reset");

        assert_eq!(error.kind(), ErrorKind::Failure);
        assert_eq!(error.status_hint(), 500);
        assert_eq!(error.to_string(), "CreateCustomer.Failure: connection reset");
    }

    #[test]
    fn test_error_serialization() {
        let error = CommandError::validation("Customer.Address", "missing city");
        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(json["kind"], "validation");
        assert_eq!(json["code"], "Customer.Address");
    }
}
