use chrono::Utc;
use uuid::Uuid;

use crate::shared::{AggregateRoot, PendingEvents};
use super::events::{CustomerEvent, CustomerRegistered};
use super::value_objects::{Address, CustomerId, PhoneNumber};

// ============================================================================
// Customer Aggregate
// ============================================================================
//
// The phone number and address arrive already validated through their
// factories, so a Customer can never hold raw, unchecked contact data.
//
// ============================================================================

#[derive(Debug, Clone)]
pub struct Customer {
    id: CustomerId,
    name: String,
    last_name: String,
    email: String,
    phone_number: PhoneNumber,
    address: Address,
    active: bool,
    events: PendingEvents<CustomerEvent>,
}

impl Customer {
    /// Build a customer from already-validated parts without recording any
    /// event. Used when loading an existing customer from storage.
    pub fn new(
        id: CustomerId,
        name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        phone_number: PhoneNumber,
        address: Address,
        active: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone_number,
            address,
            active,
            events: PendingEvents::new(),
        }
    }

    /// Create a brand new customer and record `CustomerRegistered`.
    pub fn register(
        id: CustomerId,
        name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        phone_number: PhoneNumber,
        address: Address,
        active: bool,
    ) -> Self {
        let mut customer = Self::new(id, name, last_name, email, phone_number, address, active);

        let event = CustomerEvent::Registered(CustomerRegistered {
            event_id: Uuid::new_v4(),
            customer_id: customer.id,
            full_name: customer.full_name(),
            email: customer.email.clone(),
            phone_number: customer.phone_number.clone(),
            address: customer.address.clone(),
            occurred_at: Utc::now(),
        });
        customer.raise(event);

        customer
    }

    fn raise(&mut self, event: CustomerEvent) {
        self.events.record(event);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.last_name)
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone_number(&self) -> &PhoneNumber {
        &self.phone_number
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl AggregateRoot for Customer {
    type Id = CustomerId;
    type Event = CustomerEvent;

    fn id(&self) -> CustomerId {
        self.id
    }

    fn pending_events(&self) -> &[CustomerEvent] {
        self.events.as_slice()
    }

    fn take_pending_events(&mut self) -> Vec<CustomerEvent> {
        self.events.drain()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::DomainEvent;

    fn create_test_address() -> Address {
        Address::create("USA", "123 Main St", None, "Anytown", "CA", "12345").unwrap()
    }

    fn create_test_customer() -> Customer {
        Customer::register(
            CustomerId::new(),
            "John",
            "Doe",
            "john@example.com",
            PhoneNumber::create("5550-1234").unwrap(),
            create_test_address(),
            true,
        )
    }

    #[test]
    fn test_customer_registration() {
        let customer = create_test_customer();

        assert_eq!(customer.name(), "John");
        assert_eq!(customer.last_name(), "Doe");
        assert_eq!(customer.email(), "john@example.com");
        assert_eq!(customer.phone_number().as_str(), "5550-1234");
        assert_eq!(customer.address(), &create_test_address());
        assert!(customer.is_active());
    }

    #[test]
    fn test_full_name() {
        assert_eq!(create_test_customer().full_name(), "John Doe");
    }

    #[test]
    fn test_registration_raises_registered_event() {
        let customer = create_test_customer();
        let events = customer.pending_events();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "CustomerRegistered");
        match &events[0] {
            CustomerEvent::Registered(e) => {
                assert_eq!(e.customer_id, customer.id());
                assert_eq!(e.full_name, "John Doe");
            }
        }
    }

    #[test]
    fn test_new_records_no_events() {
        let customer = Customer::new(
            CustomerId::new(),
            "Jane",
            "Doe",
            "jane@example.com",
            PhoneNumber::create("12345678").unwrap(),
            create_test_address(),
            false,
        );

        assert!(customer.pending_events().is_empty());
        assert!(!customer.is_active());
    }

    #[test]
    fn test_take_pending_events_drains() {
        let mut customer = create_test_customer();

        let events = customer.take_pending_events();

        assert_eq!(events.len(), 1);
        assert!(customer.pending_events().is_empty());
    }

    #[test]
    fn test_identity_is_kept() {
        let id = CustomerId::new();
        let customer = Customer::register(
            id,
            "John",
            "Doe",
            "john@example.com",
            PhoneNumber::create("12345678").unwrap(),
            create_test_address(),
            true,
        );

        assert_eq!(customer.id(), id);
        assert_eq!(customer.clone().id(), id);
    }
}
