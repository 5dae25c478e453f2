//! Event service layer

use tracing::{debug, instrument};

use crate::error::EventResult;
use crate::models::{Event, FetchParams};
use crate::query::EventQuery;
use crate::repository::EventRepository;

pub struct EventService<R: EventRepository> {
    repository: R,
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Fetch events in `[from, to]`, optionally for a single host.
    #[instrument(
        skip(self, params),
        fields(from = %params.from, to = %params.to, host = ?params.host_filter())
    )]
    pub async fn fetch(&self, params: FetchParams) -> EventResult<Vec<Event>> {
        let query = EventQuery::from(params);
        let events = self.repository.fetch(&query).await?;

        debug!(count = events.len(), "Fetched events");
        Ok(events)
    }
}
