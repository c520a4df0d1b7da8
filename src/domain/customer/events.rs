use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::shared::DomainEvent;
use super::value_objects::{Address, CustomerId, PhoneNumber};

// ============================================================================
// Customer Domain Events
// ============================================================================

/// Union type for all customer events
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum CustomerEvent {
    Registered(CustomerRegistered),
}

impl DomainEvent for CustomerEvent {
    fn event_id(&self) -> Uuid {
        match self {
            CustomerEvent::Registered(e) => e.event_id,
        }
    }

    fn event_type(&self) -> &'static str {
        match self {
            CustomerEvent::Registered(_) => "CustomerRegistered",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CustomerEvent::Registered(e) => e.occurred_at,
        }
    }
}

// Individual event types

#[derive(Debug, Clone, Serialize)]
pub struct CustomerRegistered {
    pub event_id: Uuid,
    pub customer_id: CustomerId,
    pub full_name: String,
    pub email: String,
    pub phone_number: PhoneNumber,
    pub address: Address,
    pub occurred_at: DateTime<Utc>,
}
