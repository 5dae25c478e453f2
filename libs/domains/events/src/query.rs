//! Statement templates for the events table
//!
//! The optional host predicate is an explicit choice between two fixed
//! templates. Every user-supplied value is bound as a parameter.

use sea_orm::{DbBackend, Statement};

use crate::models::FetchParams;

/// Events in an inclusive time range.
pub const SELECT_EVENTS_IN_RANGE: &str = r#"SELECT "at", "host", "evt" FROM "public"."events" WHERE "at" BETWEEN CAST($1 AS TIMESTAMPTZ) AND CAST($2 AS TIMESTAMPTZ)"#;

/// Events in an inclusive time range from one host.
pub const SELECT_EVENTS_IN_RANGE_FOR_HOST: &str = r#"SELECT "at", "host", "evt" FROM "public"."events" WHERE "at" BETWEEN CAST($1 AS TIMESTAMPTZ) AND CAST($2 AS TIMESTAMPTZ) AND "host" = $3"#;

/// A normalized fetch request: range bounds plus an optional, non-empty host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    pub from: String,
    pub to: String,
    pub host: Option<String>,
}

impl EventQuery {
    pub fn new(from: impl Into<String>, to: impl Into<String>, host: Option<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            host: host.filter(|h| !h.is_empty()),
        }
    }

    /// The template matching this query's shape.
    pub fn sql(&self) -> &'static str {
        match self.host {
            Some(_) => SELECT_EVENTS_IN_RANGE_FOR_HOST,
            None => SELECT_EVENTS_IN_RANGE,
        }
    }

    /// Bind the query's values into a PostgreSQL statement.
    pub fn to_statement(&self) -> Statement {
        match &self.host {
            Some(host) => Statement::from_sql_and_values(
                DbBackend::Postgres,
                SELECT_EVENTS_IN_RANGE_FOR_HOST,
                [
                    self.from.clone().into(),
                    self.to.clone().into(),
                    host.clone().into(),
                ],
            ),
            None => Statement::from_sql_and_values(
                DbBackend::Postgres,
                SELECT_EVENTS_IN_RANGE,
                [self.from.clone().into(), self.to.clone().into()],
            ),
        }
    }
}

impl From<FetchParams> for EventQuery {
    fn from(params: FetchParams) -> Self {
        Self::new(params.from, params.to, params.host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Value;

    #[test]
    fn test_range_only_template() {
        let query = EventQuery::new("2024-01-01", "2024-01-02", None);
        let stmt = query.to_statement();

        assert_eq!(stmt.sql, SELECT_EVENTS_IN_RANGE);
        assert!(!stmt.sql.contains("\"host\" = "));

        let values = stmt.values.expect("bound values").0;
        assert_eq!(
            values,
            vec![Value::from("2024-01-01".to_string()), Value::from("2024-01-02".to_string())]
        );
    }

    #[test]
    fn test_host_template_binds_host() {
        let query = EventQuery::new("2024-01-01", "2024-01-02", Some("srv-01".to_string()));
        let stmt = query.to_statement();

        assert_eq!(stmt.sql, SELECT_EVENTS_IN_RANGE_FOR_HOST);
        assert!(stmt.sql.ends_with("AND \"host\" = $3"));

        let values = stmt.values.expect("bound values").0;
        assert_eq!(values.len(), 3);
        assert_eq!(values[2], Value::from("srv-01".to_string()));
    }

    #[test]
    fn test_empty_host_uses_range_template() {
        let query = EventQuery::new("a", "b", Some(String::new()));
        assert_eq!(query.host, None);
        assert_eq!(query.sql(), SELECT_EVENTS_IN_RANGE);
    }

    #[test]
    fn test_user_input_is_never_inlined() {
        let hostile = "x'; DROP TABLE events; --";
        let query = EventQuery::new(hostile, hostile, Some(hostile.to_string()));
        let stmt = query.to_statement();

        assert!(!stmt.sql.contains(hostile));
        assert_eq!(stmt.values.expect("bound values").0.len(), 3);
    }

    #[test]
    fn test_from_fetch_params() {
        let params = FetchParams::new("from", "to").with_host("h");
        let query = EventQuery::from(params);
        assert_eq!(query, EventQuery::new("from", "to", Some("h".to_string())));
    }

    #[test]
    fn test_templates_select_columns_in_order() {
        for sql in [SELECT_EVENTS_IN_RANGE, SELECT_EVENTS_IN_RANGE_FOR_HOST] {
            assert!(sql.starts_with(r#"SELECT "at", "host", "evt" FROM "public"."events""#));
            assert!(!sql.contains("ORDER BY"));
            assert!(!sql.contains("LIMIT"));
        }
    }
}
