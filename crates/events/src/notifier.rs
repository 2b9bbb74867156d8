//! Workflow notifier that publishes onto the [`EventBus`].

use std::sync::Arc;

use async_trait::async_trait;
use reelflow_core::content::ContentItem;
use reelflow_core::store::{Notifier, WorkflowEvent};
use reelflow_core::types::DbId;

use crate::bus::{EventBus, PlatformEvent};

/// Source entity type recorded for content item events.
pub const CONTENT_ITEM_ENTITY: &str = "content_item";

/// [`Notifier`] that turns each workflow event into a [`PlatformEvent`].
///
/// Publishing never fails; delivery to people is up to the subscribers.
#[derive(Clone)]
pub struct BusNotifier {
    bus: Arc<EventBus>,
}

impl BusNotifier {
    pub fn new(bus: Arc<EventBus>) -> Self {
        Self { bus }
    }
}

#[async_trait]
impl Notifier for BusNotifier {
    async fn notify(&self, event: &WorkflowEvent, item: &ContentItem, recipients: &[DbId]) {
        let mut payload = match serde_json::to_value(event) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, event_type = event.event_type(), "Event payload not serializable");
                serde_json::json!({})
            }
        };
        if let Some(map) = payload.as_object_mut() {
            map.insert("title".into(), item.title.clone().into());
            map.insert("status".into(), item.status.as_str().into());
            map.insert(
                "production_stage".into(),
                item.production_stage.map(|s| s.as_str()).into(),
            );
            map.insert("version".into(), item.version.into());
        }

        tracing::debug!(
            event_type = event.event_type(),
            content_id = item.id,
            recipients = recipients.len(),
            "Publishing workflow event"
        );

        self.bus.publish(
            PlatformEvent::new(event.event_type())
                .with_source(CONTENT_ITEM_ENTITY, item.id)
                .with_recipients(recipients)
                .with_payload(payload),
        );
    }
}
