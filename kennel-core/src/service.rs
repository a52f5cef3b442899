use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info, instrument};

use crate::bail_kennel;
use crate::errors::KennelError;
use crate::model::{
    parse_age, parse_id, parse_weight, Dog, DogFilter, DogForm, DogPatch, FormattedDog, NewDog,
    PatchOutcome, Window,
};
use crate::repository::DogRepository;

pub const DEFAULT_PAGE_SIZE: u64 = 2;

const NOT_FOUND: &str = "no dog found";

/// The seven dog operations, independent of any transport.
///
/// Inputs are the raw strings a client sent; parsing and validation happen
/// here so every transport gets the same answers. Failures are
/// [`KennelError`]s carried in `anyhow::Error`.
pub struct DogsService {
    repo: Arc<dyn DogRepository>,
    page_size: u64,
}

impl DogsService {
    pub fn new(repo: Arc<dyn DogRepository>) -> Self {
        Self {
            repo,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Zero is ignored.
    pub fn with_page_size(mut self, page_size: u64) -> Self {
        if page_size > 0 {
            self.page_size = page_size;
        }
        self
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Validate in order: age, weight, then name/breed.
    #[instrument(skip_all)]
    pub async fn create(&self, form: DogForm) -> Result<Dog> {
        let Some(age) = parse_age(form.age.as_deref()) else {
            bail_kennel!(bad_request, "age required");
        };
        let Some(weight) = parse_weight(form.weight.as_deref()) else {
            bail_kennel!(bad_request, "weight required");
        };
        let (Some(name), Some(breed)) = (non_empty(form.name), non_empty(form.breed)) else {
            bail_kennel!(bad_request, "name/breed required");
        };

        let dog = self
            .repo
            .create(NewDog {
                name,
                breed,
                age,
                weight,
            })
            .await?;

        info!(id = dog.id, "dog created");
        Ok(dog)
    }

    #[instrument(skip_all)]
    pub async fn list(&self) -> Result<Vec<FormattedDog>> {
        let dogs = self.repo.find_all(DogFilter::default(), None).await?;
        formatted_or_not_found(dogs)
    }

    /// `raw_page` defaults to `"1"`. Pages must be integers `>= 1`.
    #[instrument(skip(self))]
    pub async fn page(&self, raw_page: Option<&str>) -> Result<Vec<FormattedDog>> {
        let page = match raw_page.unwrap_or("1").trim().parse::<i64>() {
            Ok(page) if page >= 1 => page as u64,
            _ => return Err(KennelError::bad_request("invalid page").into_anyhow()),
        };

        let Some(window) = Window::page(page, self.page_size) else {
            bail_kennel!(not_found, NOT_FOUND);
        };

        let dogs = self.repo.find_all(DogFilter::default(), Some(window)).await?;
        formatted_or_not_found(dogs)
    }

    #[instrument(skip_all)]
    pub async fn puppies(&self) -> Result<Vec<FormattedDog>> {
        let dogs = self.repo.find_all(DogFilter::puppies(), None).await?;
        formatted_or_not_found(dogs)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, raw_id: &str) -> Result<FormattedDog> {
        Ok(self.lookup(raw_id).await?.into())
    }

    /// Partial update of `age` / `weight`.
    ///
    /// Missing or malformed fields are left unchanged and do not fail the
    /// call; they are listed in the returned [`PatchOutcome::skipped`].
    #[instrument(skip(self, form))]
    pub async fn update(&self, raw_id: &str, form: DogForm) -> Result<PatchOutcome> {
        let dog = self.lookup(raw_id).await?;

        let outcome = DogPatch::from_form(&form);
        if !outcome.skipped.is_empty() {
            debug!(id = dog.id, skipped = ?outcome.skipped, "fields left unchanged");
        }

        if !outcome.patch.is_empty() && self.repo.update(dog.id, outcome.patch.clone()).await?.is_none() {
            // Deleted between the lookup and the write.
            bail_kennel!(not_found, NOT_FOUND);
        }

        info!(id = dog.id, "dog updated");
        Ok(outcome)
    }

    /// Soft delete.
    #[instrument(skip(self))]
    pub async fn remove(&self, raw_id: &str) -> Result<()> {
        let dog = self.lookup(raw_id).await?;

        if !self.repo.soft_delete(dog.id).await? {
            bail_kennel!(not_found, NOT_FOUND);
        }

        info!(id = dog.id, "dog deleted");
        Ok(())
    }

    /// Close the underlying store once the server has stopped.
    pub async fn close(&self) {
        self.repo.close().await;
        info!("dog store closed");
    }

    async fn lookup(&self, raw_id: &str) -> Result<Dog> {
        let Some(id) = parse_id(raw_id) else {
            bail_kennel!(not_found, NOT_FOUND);
        };

        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| KennelError::not_found(NOT_FOUND).into_anyhow())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn formatted_or_not_found(dogs: Vec<Dog>) -> Result<Vec<FormattedDog>> {
    if dogs.is_empty() {
        bail_kennel!(not_found, NOT_FOUND);
    }
    Ok(dogs.into_iter().map(FormattedDog::from).collect())
}
