use crate::shared::CommandError;

// ============================================================================
// Customer Errors
// ============================================================================

pub const PHONE_NUMBER_CODE: &str = "Customer.PhoneNumber";
pub const ADDRESS_CODE: &str = "Customer.Address";
pub const CREATE_FAILURE_CODE: &str = "CreateCustomer.Failure";

#[derive(Debug, thiserror::Error)]
pub enum CustomerError {
    #[error("Phone number does not have a valid format")]
    InvalidPhoneNumber,

    #[error("Address is not valid")]
    InvalidAddress,

    #[error("{0}")]
    CreateFailed(String),
}

impl CustomerError {
    pub fn code(&self) -> &'static str {
        match self {
            CustomerError::InvalidPhoneNumber => PHONE_NUMBER_CODE,
            CustomerError::InvalidAddress => ADDRESS_CODE,
            CustomerError::CreateFailed(_) => CREATE_FAILURE_CODE,
        }
    }
}

impl From<CustomerError> for CommandError {
    fn from(err: CustomerError) -> Self {
        match err {
            CustomerError::InvalidPhoneNumber | CustomerError::InvalidAddress => {
                CommandError::validation(err.code(), err.to_string())
            }
            CustomerError::CreateFailed(_) => CommandError::failure(err.code(), err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::ErrorKind;

    #[test]
    fn test_validation_errors_keep_field_codes() {
        let phone: CommandError = CustomerError::InvalidPhoneNumber.into();
        let address: CommandError = CustomerError::InvalidAddress.into();

        assert_eq!(phone.kind(), ErrorKind::Validation);
        assert_eq!(phone.code(), "Customer.PhoneNumber");
        assert_eq!(address.kind(), ErrorKind::Validation);
        assert_eq!(address.code(), "Customer.Address");
    }

    #[test]
    fn test_create_failure_carries_message() {
        let error: CommandError = CustomerError::CreateFailed("disk full".to_string()).into();

        assert_eq!(error.kind(), ErrorKind::Failure);
        assert_eq!(error.code(), "CreateCustomer.Failure");
        assert_eq!(error.description(), "disk full");
    }
}
