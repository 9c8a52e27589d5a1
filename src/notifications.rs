use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::broadcast;

use crate::domain::models::product::{ProductPlain, ProductWithImages};

#[derive(Debug, Clone, Serialize)]
pub struct ProductEvent {
    pub event_type: String,
    pub product: Value,
    pub timestamp: DateTime<Utc>,
}

/// In-process sink for product change events. Services emit after a write
/// has committed; whoever carries the events further (a push channel, a
/// log shipper) subscribes. Emitting with no subscriber is a no-op.
#[derive(Debug, Clone)]
pub struct ProductNotifier {
    tx: broadcast::Sender<ProductEvent>,
}

impl ProductNotifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ProductEvent> {
        self.tx.subscribe()
    }

    pub fn product_created(&self, product: &ProductPlain) {
        self.emit("product.created", product);
    }

    pub fn product_updated(&self, product: &ProductPlain) {
        self.emit("product.updated", product);
    }

    pub fn product_deleted(&self, product: &ProductWithImages) {
        self.emit("product.deleted", product);
    }

    fn emit<T: Serialize>(&self, event_type: &str, product: &T) {
        let payload = match serde_json::to_value(product) {
            Ok(value) => value,
            Err(err) => {
                tracing::error!(error = %err, event_type, "failed to serialize product event");
                return;
            }
        };

        let event = ProductEvent {
            event_type: event_type.to_string(),
            product: payload,
            timestamp: Utc::now(),
        };

        let _ = self.tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::product::Product;
    use uuid::Uuid;

    fn sample_plain() -> ProductPlain {
        let now = Utc::now();
        ProductPlain {
            product: Product {
                id: Uuid::new_v4(),
                title: "Blue Hat".into(),
                slug: "blue_hat".into(),
                price: 20.0,
                description: None,
                stock: 5,
                sizes: vec!["S".into(), "M".into()],
                gender: "unisex".into(),
                tags: vec![],
                user_id: Uuid::new_v4(),
                created_at: now,
                updated_at: now,
            },
            images: vec!["a.jpg".into(), "b.jpg".into()],
        }
    }

    #[tokio::test]
    async fn subscribers_receive_emitted_events() {
        let notifier = ProductNotifier::new(8);
        let mut rx = notifier.subscribe();

        let product = sample_plain();
        notifier.product_created(&product);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type, "product.created");
        assert_eq!(event.product["slug"], "blue_hat");
        assert_eq!(event.product["images"][0], "a.jpg");
    }

    #[test]
    fn emitting_without_subscribers_does_not_panic() {
        let notifier = ProductNotifier::new(8);
        notifier.product_updated(&sample_plain());
    }
}
