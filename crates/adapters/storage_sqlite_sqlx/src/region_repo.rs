//! `SQLite` implementation of [`RegionRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use paralympics_app::ports::RegionRepository;
use paralympics_domain::error::{ConflictError, NotFoundError, ParalympicsError};
use paralympics_domain::id::Noc;
use paralympics_domain::region::Region;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Region`].
struct Wrapper(Region);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Region> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let noc: String = row.try_get("noc")?;
        let region: String = row.try_get("region")?;
        let notes: Option<String> = row.try_get("notes")?;

        Ok(Self(Region {
            noc: Noc::new(noc),
            region,
            notes,
        }))
    }
}

const INSERT: &str = "INSERT INTO regions (noc, region, notes) VALUES (?, ?, ?)";
const SELECT_BY_NOC: &str = "SELECT noc, region, notes FROM regions WHERE noc = ?";
const SELECT_ALL: &str = "SELECT noc, region, notes FROM regions ORDER BY noc";
const UPDATE: &str = "UPDATE regions SET region = ?, notes = ? WHERE noc = ?";
const COUNT_EVENTS: &str = "SELECT COUNT(*) FROM events WHERE noc = ?";
const DELETE_BY_NOC: &str = "DELETE FROM regions WHERE noc = ?";

fn not_found(noc: &Noc) -> ParalympicsError {
    NotFoundError {
        entity: "Region",
        id: noc.to_string(),
    }
    .into()
}

/// `SQLite`-backed region repository.
pub struct SqliteRegionRepository {
    pool: SqlitePool,
}

impl SqliteRegionRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl RegionRepository for SqliteRegionRepository {
    async fn create(&self, region: Region) -> Result<Region, ParalympicsError> {
        let mut tx = self.pool.begin().await.map_err(StorageError::from)?;

        let inserted = sqlx::query(INSERT)
            .bind(region.noc.as_str())
            .bind(&region.region)
            .bind(region.notes.as_deref())
            .execute(&mut *tx)
            .await;

        match inserted {
            Ok(_) => {}
            Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                return Err(ConflictError::AlreadyExists {
                    entity: "Region",
                    id: region.noc.to_string(),
                }
                .into());
            }
            Err(err) => return Err(StorageError::from(err).into()),
        }

        tx.commit().await.map_err(StorageError::from)?;
        Ok(region)
    }

    async fn find(&self, noc: Noc) -> Result<Option<Region>, ParalympicsError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_NOC)
            .bind(noc.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<Region>, ParalympicsError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, region: Region) -> Result<Region, ParalympicsError> {
        let mut tx = self.pool.begin().await.map_err(StorageError::from)?;

        let result = sqlx::query(UPDATE)
            .bind(&region.region)
            .bind(region.notes.as_deref())
            .bind(region.noc.as_str())
            .execute(&mut *tx)
            .await
            .map_err(StorageError::from)?;

        if result.rows_affected() == 0 {
            return Err(not_found(&region.noc));
        }

        tx.commit().await.map_err(StorageError::from)?;
        Ok(region)
    }

    async fn delete(&self, noc: Noc) -> Result<(), ParalympicsError> {
        let mut tx = self.pool.begin().await.map_err(StorageError::from)?;

        let referencing: i64 = sqlx::query_scalar(COUNT_EVENTS)
            .bind(noc.as_str())
            .fetch_one(&mut *tx)
            .await
            .map_err(StorageError::from)?;

        if referencing > 0 {
            return Err(ConflictError::StillReferenced {
                entity: "Region",
                id: noc.to_string(),
                referrer: "event",
                count: referencing,
            }
            .into());
        }

        let result = sqlx::query(DELETE_BY_NOC)
            .bind(noc.as_str())
            .execute(&mut *tx)
            .await
            .map_err(StorageError::from)?;

        if result.rows_affected() == 0 {
            return Err(not_found(&noc));
        }

        tx.commit().await.map_err(StorageError::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;

    async fn setup() -> SqliteRegionRepository {
        let db = Config::in_memory().build().await.unwrap();
        SqliteRegionRepository::new(db.pool().clone())
    }

    fn gbr() -> Region {
        Region {
            noc: Noc::from("GBR"),
            region: "Great Britain".to_string(),
            notes: Some("Team GB".to_string()),
        }
    }

    #[tokio::test]
    async fn should_create_and_retrieve_region_when_valid() {
        let repo = setup().await;
        repo.create(gbr()).await.unwrap();

        let fetched = repo.find(Noc::from("GBR")).await.unwrap().unwrap();
        assert_eq!(fetched, gbr());
    }

    #[tokio::test]
    async fn should_return_none_when_region_not_found() {
        let repo = setup().await;
        let result = repo.find(Noc::from("XXX")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_return_conflict_when_noc_already_exists() {
        let repo = setup().await;
        repo.create(gbr()).await.unwrap();

        let result = repo.create(gbr()).await;
        assert!(matches!(
            result,
            Err(ParalympicsError::Conflict(ConflictError::AlreadyExists { .. }))
        ));
    }

    #[tokio::test]
    async fn should_list_all_regions_ordered_by_noc() {
        let repo = setup().await;
        repo.create(gbr()).await.unwrap();
        repo.create(Region {
            noc: Noc::from("CAN"),
            region: "Canada".to_string(),
            notes: None,
        })
        .await
        .unwrap();

        let all = repo.get_all().await.unwrap();
        let nocs: Vec<&str> = all.iter().map(|r| r.noc.as_str()).collect();
        assert_eq!(nocs, vec!["CAN", "GBR"]);
    }

    #[tokio::test]
    async fn should_update_region_when_exists() {
        let repo = setup().await;
        repo.create(gbr()).await.unwrap();

        let updated = Region {
            region: "United Kingdom".to_string(),
            notes: None,
            ..gbr()
        };
        repo.update(updated.clone()).await.unwrap();

        let fetched = repo.find(Noc::from("GBR")).await.unwrap().unwrap();
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn should_return_not_found_when_updating_missing_region() {
        let repo = setup().await;
        let result = repo.update(gbr()).await;
        assert!(matches!(result, Err(ParalympicsError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_delete_region_when_exists() {
        let repo = setup().await;
        repo.create(gbr()).await.unwrap();

        repo.delete(Noc::from("GBR")).await.unwrap();

        assert!(repo.find(Noc::from("GBR")).await.unwrap().is_none());
        let again = repo.delete(Noc::from("GBR")).await;
        assert!(matches!(again, Err(ParalympicsError::NotFound(_))));
    }
}
