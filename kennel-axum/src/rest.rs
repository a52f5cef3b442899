use axum::{
    extract::{
        rejection::{FormRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Form, Router,
};
use kennel_core::{DogForm, FormattedDog, KennelError};

use crate::{params::PageQuery, Envelope, KennelAxumError, KennelState};

pub const DOGS_BASE_PATH: &str = "/api/v1/dogs";

type Reply<T = ()> = Result<Envelope<T>, KennelAxumError>;

/// A body that is not a urlencoded form counts as a form with no fields, so
/// validation reports the first missing field instead of a parse failure.
fn form_or_empty(form: Result<Form<DogForm>, FormRejection>) -> DogForm {
    match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!(%rejection, "treating request body as an empty form");
            DogForm::default()
        }
    }
}

/// An id segment axum cannot decode cannot name a dog either.
fn dog_id(path: Result<Path<String>, PathRejection>) -> Result<String, KennelAxumError> {
    match path {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            tracing::debug!(%rejection, "undecodable dog id");
            Err(KennelError::not_found("no dog found").into_anyhow().into())
        }
    }
}

async fn list_dogs(State(state): State<KennelState>) -> Reply<Vec<FormattedDog>> {
    Ok(Envelope::ok(state.dogs.list().await?))
}

async fn list_page(
    State(state): State<KennelState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Reply<Vec<FormattedDog>> {
    let Ok(Query(query)) = query else {
        return Err(KennelError::bad_request("invalid page").into_anyhow().into());
    };
    Ok(Envelope::ok(state.dogs.page(query.raw_page()).await?))
}

async fn list_puppies(State(state): State<KennelState>) -> Reply<Vec<FormattedDog>> {
    Ok(Envelope::ok(state.dogs.puppies().await?))
}

async fn get_dog(
    State(state): State<KennelState>,
    id: Result<Path<String>, PathRejection>,
) -> Reply<FormattedDog> {
    let id = dog_id(id)?;
    Ok(Envelope::ok(state.dogs.get(&id).await?))
}

async fn create_dog(
    State(state): State<KennelState>,
    form: Result<Form<DogForm>, FormRejection>,
) -> Reply {
    let dog = state.dogs.create(form_or_empty(form)).await?;
    Ok(Envelope::created(dog.id, "Dog created successfully!"))
}

async fn update_dog(
    State(state): State<KennelState>,
    id: Result<Path<String>, PathRejection>,
    form: Result<Form<DogForm>, FormRejection>,
) -> Reply {
    let id = dog_id(id)?;
    state.dogs.update(&id, form_or_empty(form)).await?;
    Ok(Envelope::message(StatusCode::OK, "Dog updated successfully!"))
}

async fn delete_dog(
    State(state): State<KennelState>,
    id: Result<Path<String>, PathRejection>,
) -> Reply {
    let id = dog_id(id)?;
    state.dogs.remove(&id).await?;
    Ok(Envelope::message(StatusCode::OK, "Dog deleted successfully!"))
}

/// Dog routes mounted at `base` (e.g. [`DOGS_BASE_PATH`]). The collection is
/// reachable with and without a trailing slash.
///
/// | Method | Path | Operation |
/// |---|---|---|
/// | GET | `base` | list |
/// | POST | `base` | create |
/// | GET | `base/puppies` | dogs younger than two |
/// | GET | `base/pages?pag=N` | one page |
/// | GET / PUT / DELETE | `base/{id}` | get / update / soft delete |
pub fn dogs_router(base: &str, state: KennelState) -> Router<()> {
    let base = base.trim_end_matches('/');

    Router::new()
        .route(base, get(list_dogs).post(create_dog))
        .route(&format!("{base}/"), get(list_dogs).post(create_dog))
        .route(&format!("{base}/puppies"), get(list_puppies))
        .route(&format!("{base}/pages"), get(list_page))
        .route(
            &format!("{base}/{{id}}"),
            get(get_dog).put(update_dog).delete(delete_dog),
        )
        .with_state(state)
}
