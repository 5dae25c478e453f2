use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use database::postgres::{PostgresConfig, connect_scoped};
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbErr, FromQueryResult, QueryResult, TryGetError,
    TryGetable,
};

use crate::{
    error::{EventError, EventResult},
    models::Event,
    query::EventQuery,
    repository::EventRepository,
};

/// Where a repository gets its connection from.
#[derive(Clone)]
pub enum ConnectionSource {
    /// Open a single connection per fetch and close it afterwards.
    Scoped(PostgresConfig),
    /// Reuse a long-lived handle.
    Shared(DatabaseConnection),
}

pub struct PgEventRepository {
    source: ConnectionSource,
}

impl PgEventRepository {
    /// One connection per request, released before the response is written.
    pub fn scoped(config: PostgresConfig) -> Self {
        Self {
            source: ConnectionSource::Scoped(config),
        }
    }

    pub fn shared(db: DatabaseConnection) -> Self {
        Self {
            source: ConnectionSource::Shared(db),
        }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn fetch(&self, query: &EventQuery) -> EventResult<Vec<Event>> {
        match &self.source {
            ConnectionSource::Scoped(config) => {
                let db = connect_scoped(config)
                    .await
                    .map_err(|e| EventError::Connection(e.to_string()))?;

                let result = fetch_events(&db, query).await;

                if let Err(e) = db.close().await {
                    tracing::warn!(error = %e, "Failed to close scoped connection");
                }

                result
            }
            ConnectionSource::Shared(db) => fetch_events(db, query).await,
        }
    }
}

async fn fetch_events<C: ConnectionTrait>(db: &C, query: &EventQuery) -> EventResult<Vec<Event>> {
    let rows = EventRow::find_by_statement(query.to_statement())
        .all(db)
        .await
        .map_err(EventError::from_query_error)?;

    tracing::debug!(count = rows.len(), "Fetched event rows");
    Ok(rows.into_iter().map(Event::from).collect())
}

/// Raw row of the events table.
///
/// `at` may be `timestamptz` or `timestamp` (read as UTC). `evt` may be a text
/// column or json/jsonb.
struct EventRow {
    at: DateTime<Utc>,
    host: String,
    evt: serde_json::Value,
}

impl FromQueryResult for EventRow {
    fn from_query_result(res: &QueryResult, pre: &str) -> Result<Self, DbErr> {
        let at = match res.try_get::<DateTime<FixedOffset>>(pre, "at") {
            Ok(at) => at.with_timezone(&Utc),
            Err(_) => res.try_get::<NaiveDateTime>(pre, "at")?.and_utc(),
        };

        let host = res.try_get::<String>(pre, "host")?;

        // A text read that fails for any reason falls through to json; only a
        // real NULL from the json read becomes null.
        let evt = match String::try_get(res, pre, "evt") {
            Ok(text) => serde_json::Value::String(text),
            Err(_) => match serde_json::Value::try_get(res, pre, "evt") {
                Ok(value) => value,
                Err(TryGetError::Null(_)) => serde_json::Value::Null,
                Err(e) => return Err(e.into()),
            },
        };

        Ok(Self { at, host, evt })
    }
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Event {
            at: row.at,
            host: row.host,
            evt: row.evt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::fixtures::server_error;
    use crate::query::{SELECT_EVENTS_IN_RANGE, SELECT_EVENTS_IN_RANGE_FOR_HOST};
    use chrono::TimeZone;
    use sea_orm::{DatabaseBackend, MockDatabase, Transaction, Value};
    use serde_json::json;
    use std::collections::BTreeMap;

    fn row(at: DateTime<FixedOffset>, host: &str, evt: &str) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([
            ("at", Value::from(at)),
            ("host", Value::from(host.to_string())),
            ("evt", Value::from(evt.to_string())),
        ])
    }

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<FixedOffset> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap().fixed_offset()
    }

    #[tokio::test]
    async fn test_fetch_maps_rows_in_order() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                row(utc(2024, 1, 1, 0), "a", "boot"),
                row(utc(2024, 1, 1, 12), "b", "boot"),
            ]])
            .into_connection();

        let repo = PgEventRepository::shared(db);
        let query = EventQuery::new("2024-01-01T00:00:00Z", "2024-01-01T23:59:59Z", None);

        let events = repo.fetch(&query).await.unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].host, "a");
        assert_eq!(events[0].evt, json!("boot"));
        assert_eq!(events[0].at, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(events[1].host, "b");
    }

    #[tokio::test]
    async fn test_fetch_sends_bound_statement() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
            .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
            .into_connection();

        let repo = PgEventRepository::shared(db.clone());

        repo.fetch(&EventQuery::new("f", "t", None)).await.unwrap();
        repo.fetch(&EventQuery::new("f", "t", Some("srv".to_string())))
            .await
            .unwrap();

        assert_eq!(
            db.into_transaction_log(),
            vec![
                Transaction::from_sql_and_values(
                    DatabaseBackend::Postgres,
                    SELECT_EVENTS_IN_RANGE,
                    [Value::from("f".to_string()), Value::from("t".to_string())],
                ),
                Transaction::from_sql_and_values(
                    DatabaseBackend::Postgres,
                    SELECT_EVENTS_IN_RANGE_FOR_HOST,
                    [
                        Value::from("f".to_string()),
                        Value::from("t".to_string()),
                        Value::from("srv".to_string()),
                    ],
                ),
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_reads_naive_timestamps_as_utc() {
        let naive = Utc.with_ymd_and_hms(2024, 3, 1, 8, 15, 0).unwrap().naive_utc();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![BTreeMap::from([
                ("at", Value::from(naive)),
                ("host", Value::from("a".to_string())),
                ("evt", Value::from("boot".to_string())),
            ])]])
            .into_connection();

        let events = PgEventRepository::shared(db)
            .fetch(&EventQuery::new("2024-03-01", "2024-03-02", None))
            .await
            .unwrap();

        assert_eq!(events[0].at, naive.and_utc());
    }

    #[tokio::test]
    async fn test_fetch_passes_json_payload_through() {
        let payload = json!({ "kind": "logon", "user": "alice" });
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![BTreeMap::from([
                ("at", Value::from(utc(2024, 1, 1, 0))),
                ("host", Value::from("ws-01".to_string())),
                ("evt", Value::from(payload.clone())),
            ])]])
            .into_connection();

        let events = PgEventRepository::shared(db)
            .fetch(&EventQuery::new("2024-01-01", "2024-01-02", None))
            .await
            .unwrap();

        assert_eq!(events[0].evt, payload);
    }

    #[tokio::test]
    async fn test_fetch_keeps_null_payload_as_null() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![BTreeMap::from([
                ("at", Value::from(utc(2024, 1, 1, 0))),
                ("host", Value::from("ws-01".to_string())),
                ("evt", Value::String(None)),
            ])]])
            .into_connection();

        let events = PgEventRepository::shared(db)
            .fetch(&EventQuery::new("2024-01-01", "2024-01-02", None))
            .await
            .unwrap();

        assert_eq!(events[0].evt, serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_fetch_maps_invalid_timestamp_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([server_error(
                "22007",
                "invalid input syntax for type timestamp with time zone: \"garbage\"",
            )])
            .into_connection();

        let err = PgEventRepository::shared(db)
            .fetch(&EventQuery::new("garbage", "2024-01-02", None))
            .await
            .unwrap_err();

        match err {
            EventError::InvalidInput(msg) => {
                assert_eq!(
                    msg,
                    "invalid input syntax for type timestamp with time zone: \"garbage\""
                )
            }
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_keeps_other_server_errors_as_database_errors() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([server_error(
                "42P01",
                "relation \"public.events\" does not exist",
            )])
            .into_connection();

        let err = PgEventRepository::shared(db)
            .fetch(&EventQuery::new("2024-01-01", "2024-01-02", None))
            .await
            .unwrap_err();

        assert!(matches!(err, EventError::Database(_)));
    }

    #[tokio::test]
    async fn test_scoped_connect_failure_is_connection_error() {
        let repo = PgEventRepository::scoped(PostgresConfig::new("not-a-url"));

        let err = repo
            .fetch(&EventQuery::new("2024-01-01", "2024-01-02", None))
            .await
            .unwrap_err();

        assert!(matches!(err, EventError::Connection(_)));
    }
}
