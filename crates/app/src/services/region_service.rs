//! Region service: use-cases for managing regions.

use serde_json::Value;

use paralympics_domain::error::{NotFoundError, ParalympicsError, ValidationError};
use paralympics_domain::id::Noc;
use paralympics_domain::region::Region;
use paralympics_domain::schema::{Load, Schema};

use crate::ports::RegionRepository;

pub const PATH_MISMATCH: &str = "Does not match the NOC in the request path.";

/// Outcome of an upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upsert<T> {
    Created(T),
    Replaced(T),
}

/// Application service for region CRUD operations.
pub struct RegionService<R> {
    repo: R,
}

impl<R: RegionRepository> RegionService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// List all regions.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn list_regions(&self) -> Result<Vec<Region>, ParalympicsError> {
        self.repo.get_all().await
    }

    /// Look up a region by NOC code, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`ParalympicsError::NotFound`] when no region with `noc` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_region(&self, noc: Noc) -> Result<Region, ParalympicsError> {
        self.repo.find(noc.clone()).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Region",
                id: noc.to_string(),
            }
            .into()
        })
    }

    /// Validate `body` as a new region and insert it.
    ///
    /// # Errors
    ///
    /// Returns [`ParalympicsError::Validation`] if the body is invalid,
    /// [`ParalympicsError::Conflict`] if the NOC is taken, or a storage error.
    #[tracing::instrument(skip(self, body))]
    pub async fn create_region(&self, body: &Value) -> Result<Region, ParalympicsError> {
        let region = Region::load(body, Load::New)?;
        self.repo.create(region).await
    }

    /// Replace the region at `noc` with `body`, creating it if absent.
    ///
    /// The body must carry the same NOC as the path.
    ///
    /// # Errors
    ///
    /// Returns [`ParalympicsError::Validation`] if the body is invalid or names
    /// another NOC, or a storage error from the repository.
    #[tracing::instrument(skip(self, body))]
    pub async fn replace_region(
        &self,
        noc: Noc,
        body: &Value,
    ) -> Result<Upsert<Region>, ParalympicsError> {
        if let Some(existing) = self.repo.find(noc.clone()).await? {
            let region = Region::load(body, Load::Replace(existing))?;
            return Ok(Upsert::Replaced(self.repo.update(region).await?));
        }

        let region = Region::load(body, Load::New)?;
        if region.noc != noc {
            return Err(ValidationError::single("NOC", PATH_MISMATCH).into());
        }
        Ok(Upsert::Created(self.repo.create(region).await?))
    }

    /// Apply the fields present in `body` to an existing region and return
    /// the stored result.
    ///
    /// # Errors
    ///
    /// Returns [`ParalympicsError::NotFound`] when no region with `noc` exists,
    /// [`ParalympicsError::Validation`] if the body is invalid, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self, body))]
    pub async fn patch_region(&self, noc: Noc, body: &Value) -> Result<Region, ParalympicsError> {
        let existing = self.get_region(noc.clone()).await?;
        let region = Region::load(body, Load::Partial(existing))?;
        self.repo.update(region).await?;
        self.get_region(noc).await
    }

    /// Delete a region by NOC code.
    ///
    /// # Errors
    ///
    /// Returns [`ParalympicsError::NotFound`] when no region with `noc` exists,
    /// [`ParalympicsError::Conflict`] while events reference it, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_region(&self, noc: Noc) -> Result<(), ParalympicsError> {
        self.repo.delete(noc).await
    }
}
