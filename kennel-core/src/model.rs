//! Record shapes and the mapping between them.
//!
//! - [`Dog`] is the persisted record, audit timestamps included.
//! - [`FormattedDog`] is the only shape that is ever serialized to clients.
//! - [`DogForm`] is the raw inbound form, parsed into [`NewDog`] / [`DogPatch`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Dogs younger than this many years are puppies.
pub const PUPPY_AGE_LIMIT: i16 = 2;

/// A persisted dog row.
#[derive(Debug, Clone, PartialEq)]
pub struct Dog {
    pub id: u64,
    pub name: String,
    pub breed: String,
    pub age: i16,
    pub weight: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Dog {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Client-visible subset of [`Dog`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedDog {
    pub id: u64,
    pub name: String,
    pub breed: String,
    pub age: i16,
    pub weight: f64,
}

impl From<Dog> for FormattedDog {
    fn from(dog: Dog) -> Self {
        Self {
            id: dog.id,
            name: dog.name,
            breed: dog.breed,
            age: dog.age,
            weight: dog.weight,
        }
    }
}

/// Validated input for an insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDog {
    pub name: String,
    pub breed: String,
    pub age: i16,
    pub weight: f64,
}

/// Fields of an update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DogPatch {
    pub age: Option<i16>,
    pub weight: Option<f64>,
}

impl DogPatch {
    pub fn is_empty(&self) -> bool {
        self.age.is_none() && self.weight.is_none()
    }

    /// Apply-if-valid parsing: every field that is present and parses goes into
    /// the patch, every other field is reported in `skipped` and left alone.
    pub fn from_form(form: &DogForm) -> PatchOutcome {
        let mut patch = DogPatch::default();
        let mut skipped = Vec::new();

        match parse_age(form.age.as_deref()) {
            Some(age) => patch.age = Some(age),
            None => skipped.push("age"),
        }
        match parse_weight(form.weight.as_deref()) {
            Some(weight) => patch.weight = Some(weight),
            None => skipped.push("weight"),
        }

        PatchOutcome { patch, skipped }
    }

    pub fn apply_to(&self, dog: &mut Dog) {
        if let Some(age) = self.age {
            dog.age = age;
        }
        if let Some(weight) = self.weight {
            dog.weight = weight;
        }
    }
}

/// Result of [`DogPatch::from_form`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatchOutcome {
    pub patch: DogPatch,
    pub skipped: Vec<&'static str>,
}

/// Read filter. The default matches every live record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DogFilter {
    /// Only records with `age < age_below`.
    pub age_below: Option<i16>,
}

impl DogFilter {
    pub fn puppies() -> Self {
        Self {
            age_below: Some(PUPPY_AGE_LIMIT),
        }
    }

    pub fn matches(&self, dog: &Dog) -> bool {
        self.age_below.map_or(true, |limit| dog.age < limit)
    }
}

/// A limit/offset slice of an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub limit: u64,
    pub offset: u64,
}

impl Window {
    /// Window for a 1-based page. `None` when the offset does not fit in `u64`,
    /// which no store could ever fill.
    pub fn page(page: u64, page_size: u64) -> Option<Self> {
        let offset = page.checked_sub(1)?.checked_mul(page_size)?;
        Some(Self {
            limit: page_size,
            offset,
        })
    }
}

/// Raw urlencoded form fields, exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DogForm {
    pub name: Option<String>,
    pub breed: Option<String>,
    pub age: Option<String>,
    pub weight: Option<String>,
}

pub(crate) fn parse_age(raw: Option<&str>) -> Option<i16> {
    raw?.trim().parse::<i16>().ok()
}

/// Finite numbers only: `"NaN"` and `"inf"` parse as `f64` but are not weights.
pub(crate) fn parse_weight(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok().filter(|w| w.is_finite())
}

/// Record ids are positive integers; anything else cannot match a row.
pub(crate) fn parse_id(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|id| *id > 0)
}
