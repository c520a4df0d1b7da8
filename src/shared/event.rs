use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use anyhow::Result;

// ============================================================================
// Domain Event Trait
// ============================================================================

/// Something that happened inside an aggregate.
///
/// Events are collected by the aggregate and handed to infrastructure after
/// a successful commit. The aggregate never dispatches them itself.
pub trait DomainEvent: Serialize + Clone + Send + Sync {
    /// Unique identifier of this occurrence
    fn event_id(&self) -> Uuid;

    /// Stable name used when the event is stored or published
    fn event_type(&self) -> &'static str;

    fn occurred_at(&self) -> DateTime<Utc>;
}

pub fn serialize_event<E: Serialize>(event: &E) -> Result<String> {
    Ok(serde_json::to_string(event)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Clone, Debug)]
    struct TestEvent {
        id: Uuid,
        data: String,
    }

    #[test]
    fn test_event_serialization() {
        let event = TestEvent {
            id: Uuid::new_v4(),
            data: "test data".to_string(),
        };

        let json = serialize_event(&event).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["data"], "test data");
        assert_eq!(value["id"], event.id.to_string());
    }
}
