use serde::Deserialize;

// ============================================================================
// Customer Domain Commands
// ============================================================================

/// Raw input for registering a customer, exactly as received from a caller.
/// Nothing here is validated yet.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerCommand {
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub country: String,
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}
