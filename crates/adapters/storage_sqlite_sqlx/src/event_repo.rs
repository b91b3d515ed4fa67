//! `SQLite` implementation of [`EventRepository`].

use std::str::FromStr;

use chrono::NaiveDate;
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteRow};
use sqlx::{FromRow, Row, SqlitePool};

use paralympics_app::ports::EventRepository;
use paralympics_domain::error::{NotFoundError, ParalympicsError};
use paralympics_domain::event::{Event, EventDetails};
use paralympics_domain::id::{EventId, Noc};

use crate::error::StorageError;

type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

struct Wrapper(Event);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Event> {
        value.map(|w| w.0)
    }
}

fn decode_date(value: Option<String>) -> Result<Option<NaiveDate>, sqlx::Error> {
    value
        .as_deref()
        .map(NaiveDate::from_str)
        .transpose()
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let noc: String = row.try_get("noc")?;
        let start: Option<String> = row.try_get("start_date")?;
        let end: Option<String> = row.try_get("end_date")?;

        let details = EventDetails {
            kind: row.try_get("kind")?,
            year: row.try_get("year")?,
            country: row.try_get("country")?,
            host: row.try_get("host")?,
            noc: Noc::new(noc),
            start: decode_date(start)?,
            end: decode_date(end)?,
            duration: row.try_get("duration")?,
            disabilities_included: row.try_get("disabilities_included")?,
            countries: row.try_get("countries")?,
            events: row.try_get("events")?,
            sports: row.try_get("sports")?,
            participants_m: row.try_get("participants_m")?,
            participants_f: row.try_get("participants_f")?,
            participants: row.try_get("participants")?,
            highlights: row.try_get("highlights")?,
            url: row.try_get("url")?,
        };

        Ok(Self(Event {
            id: EventId::new(row.try_get("id")?),
            details,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO events (
        kind, year, country, host, noc, start_date, end_date, duration,
        disabilities_included, countries, events, sports, participants_m,
        participants_f, participants, highlights, url
    )
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
";

const UPDATE: &str = r"
    UPDATE events SET
        kind = ?, year = ?, country = ?, host = ?, noc = ?, start_date = ?,
        end_date = ?, duration = ?, disabilities_included = ?, countries = ?,
        events = ?, sports = ?, participants_m = ?, participants_f = ?,
        participants = ?, highlights = ?, url = ?
    WHERE id = ?
";

const SELECT_BY_ID: &str = "SELECT * FROM events WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM events ORDER BY id";
const DELETE_BY_ID: &str = "DELETE FROM events WHERE id = ?";

/// Bind every detail column, in the order used by [`INSERT`] and [`UPDATE`].
fn bind_details<'q>(query: SqliteQuery<'q>, details: &EventDetails) -> SqliteQuery<'q> {
    query
        .bind(details.kind.clone())
        .bind(details.year)
        .bind(details.country.clone())
        .bind(details.host.clone())
        .bind(details.noc.to_string())
        .bind(details.start.map(|date| date.to_string()))
        .bind(details.end.map(|date| date.to_string()))
        .bind(details.duration)
        .bind(details.disabilities_included.clone())
        .bind(details.countries)
        .bind(details.events)
        .bind(details.sports)
        .bind(details.participants_m)
        .bind(details.participants_f)
        .bind(details.participants)
        .bind(details.highlights.clone())
        .bind(details.url.clone())
}

fn not_found(id: EventId) -> ParalympicsError {
    NotFoundError {
        entity: "Event",
        id: id.to_string(),
    }
    .into()
}

/// `SQLite`-backed event repository.
pub struct SqliteEventRepository {
    pool: SqlitePool,
}

impl SqliteEventRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl EventRepository for SqliteEventRepository {
    async fn create(&self, details: EventDetails) -> Result<Event, ParalympicsError> {
        let mut tx = self.pool.begin().await.map_err(StorageError::from)?;

        let result = bind_details(sqlx::query(INSERT), &details)
            .execute(&mut *tx)
            .await
            .map_err(StorageError::from)?;

        tx.commit().await.map_err(StorageError::from)?;

        Ok(Event {
            id: EventId::new(result.last_insert_rowid()),
            details,
        })
    }

    async fn find(&self, id: EventId) -> Result<Option<Event>, ParalympicsError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<Event>, ParalympicsError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, event: Event) -> Result<Event, ParalympicsError> {
        let mut tx = self.pool.begin().await.map_err(StorageError::from)?;

        let result = bind_details(sqlx::query(UPDATE), &event.details)
            .bind(event.id.get())
            .execute(&mut *tx)
            .await
            .map_err(StorageError::from)?;

        if result.rows_affected() == 0 {
            return Err(not_found(event.id));
        }

        tx.commit().await.map_err(StorageError::from)?;
        Ok(event)
    }

    async fn delete(&self, id: EventId) -> Result<(), ParalympicsError> {
        let mut tx = self.pool.begin().await.map_err(StorageError::from)?;

        let result = sqlx::query(DELETE_BY_ID)
            .bind(id.get())
            .execute(&mut *tx)
            .await
            .map_err(StorageError::from)?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        tx.commit().await.map_err(StorageError::from)?;
        Ok(())
    }
}
