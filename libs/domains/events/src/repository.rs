//! Event repository trait

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{EventError, EventResult};
use crate::models::{Event, parse_timestamp};
use crate::query::EventQuery;

/// Read access to stored events
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Events with `from <= at <= to`, restricted to `query.host` when set.
    ///
    /// Rows come back in storage order; no sorting is applied.
    async fn fetch(&self, query: &EventQuery) -> EventResult<Vec<Event>>;
}

/// In-memory implementation of EventRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryEventRepository {
    events: Arc<RwLock<Vec<Event>>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: Vec<Event>) -> Self {
        Self {
            events: Arc::new(RwLock::new(events)),
        }
    }

    pub async fn insert(&self, event: Event) {
        self.events.write().await.push(event);
    }
}

fn parse_bound(value: &str) -> EventResult<chrono::DateTime<chrono::Utc>> {
    parse_timestamp(value).ok_or_else(|| {
        EventError::InvalidInput(format!(
            "invalid input syntax for type timestamp with time zone: \"{}\"",
            value
        ))
    })
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn fetch(&self, query: &EventQuery) -> EventResult<Vec<Event>> {
        let from = parse_bound(&query.from)?;
        let to = parse_bound(&query.to)?;

        let events = self.events.read().await;
        let result = events
            .iter()
            .filter(|e| e.at >= from && e.at <= to)
            .filter(|e| query.host.as_deref().is_none_or(|host| e.host == host))
            .cloned()
            .collect();

        Ok(result)
    }
}
