//! Events Domain
//!
//! Read-only access to the `events` table: every event recorded by a host
//! within an inclusive time range, optionally narrowed to one host.
//!
//! ```text
//! GET /fetch?from=..&to=..[&host=..]
//!        │
//!        ▼
//!   EventService ──► EventRepository ──► PostgreSQL (bound statement)
//!                          └──────────► in-memory store (dev/tests)
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod query;
pub mod repository;
pub mod service;

pub use error::{EventError, EventResult};
pub use handlers::{ApiDoc, router};
pub use models::{Event, FetchParams, parse_timestamp};
pub use postgres::{ConnectionSource, PgEventRepository};
pub use query::EventQuery;
pub use repository::{EventRepository, InMemoryEventRepository};
pub use service::EventService;
