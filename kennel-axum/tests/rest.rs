use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderValue, Request};
use kennel_axum::axum;
use kennel_core::{
    Dog, DogFilter, DogPatch, DogRepository, DogsService, MemoryDogRepository, NewDog, Window,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

const FORM: &str = "application/x-www-form-urlencoded";

struct BoomRepository;

#[async_trait::async_trait]
impl DogRepository for BoomRepository {
    async fn create(&self, _dog: NewDog) -> anyhow::Result<Dog> {
        Err(anyhow::anyhow!("boom: database is locked"))
    }

    async fn find_all(&self, _filter: DogFilter, _window: Option<Window>) -> anyhow::Result<Vec<Dog>> {
        Err(anyhow::anyhow!("boom: database is locked"))
    }

    async fn find_by_id(&self, _id: u64) -> anyhow::Result<Option<Dog>> {
        Err(anyhow::anyhow!("boom: database is locked"))
    }

    async fn update(&self, _id: u64, _patch: DogPatch) -> anyhow::Result<Option<Dog>> {
        Err(anyhow::anyhow!("boom: database is locked"))
    }

    async fn soft_delete(&self, _id: u64) -> anyhow::Result<bool> {
        Err(anyhow::anyhow!("boom: database is locked"))
    }
}

fn memory_app() -> kennel_axum::KennelAxumApp {
    axum(DogsService::new(Arc::new(MemoryDogRepository::new())))
}

async fn json_body(res: axum::response::Response) -> Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", FORM)
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn create_returns_201_envelope_with_resource_id() {
    let ax = memory_app();

    let res = ax
        .router
        .oneshot(post_form("/api/v1/dogs", "name=Rex&breed=Lab&age=3&weight=25"))
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 201);
    let body = json_body(res).await;
    assert_eq!(body["status"], 201);
    assert_eq!(body["resourceId"], 1);
    assert!(body["message"].is_string());
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn trailing_slash_reaches_the_collection() {
    let ax = memory_app();

    let res = ax
        .router
        .clone()
        .oneshot(post_form("/api/v1/dogs/", "name=Rex&breed=Lab&age=3&weight=25"))
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 201);

    let res = ax.router.oneshot(get("/api/v1/dogs/")).await.unwrap();
    assert_eq!(res.status().as_u16(), 200);
    let body = json_body(res).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn non_form_body_counts_as_empty_form() {
    let ax = memory_app();

    let res = ax
        .router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/dogs")
                .header("content-type", "application/json")
                .body(Body::from("{\"name\":\"Rex\"}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 400);
    let body = json_body(res).await;
    assert_eq!(body["status"], 400);
    assert_eq!(body["message"], "age required");
}

#[tokio::test]
async fn bad_page_is_400_and_empty_page_is_404() {
    let ax = memory_app();

    let res = ax.router.clone().oneshot(get("/api/v1/dogs/pages?pag=abc")).await.unwrap();
    assert_eq!(res.status().as_u16(), 400);
    assert_eq!(json_body(res).await["message"], "invalid page");

    let res = ax.router.clone().oneshot(get("/api/v1/dogs/pages?pag=0")).await.unwrap();
    assert_eq!(res.status().as_u16(), 400);

    let res = ax.router.oneshot(get("/api/v1/dogs/pages")).await.unwrap();
    assert_eq!(res.status().as_u16(), 404);
    let body = json_body(res).await;
    assert_eq!(body["status"], 404);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn store_failures_map_to_generic_500() {
    let ax = axum(DogsService::new(Arc::new(BoomRepository)));

    let res = ax.router.oneshot(get("/api/v1/dogs")).await.unwrap();

    assert_eq!(res.status().as_u16(), 500);
    let body = json_body(res).await;
    assert_eq!(body["status"], 500);
    assert_eq!(body["message"], "internal server error");
    assert!(!body.to_string().contains("boom"));
}

#[tokio::test]
async fn request_id_is_generated_or_preserved() {
    let ax = memory_app();

    let res = ax.router.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert!(res.headers().get("x-request-id").is_some());

    let provided = HeaderValue::from_static("req-test-123");
    let res = ax
        .router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/dogs")
                .header("x-request-id", provided.clone())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.headers().get("x-request-id").unwrap(), &provided);
}

#[tokio::test]
async fn merged_routes_are_served_next_to_dog_routes() {
    let ax = memory_app().merge(axum::Router::new().route(
        "/version",
        axum::routing::get(|| async { "0.1.0" }),
    ));

    let res = ax.router.clone().oneshot(get("/version")).await.unwrap();
    assert_eq!(res.status().as_u16(), 200);

    let res = ax.router.oneshot(get("/health")).await.unwrap();
    assert_eq!(res.status().as_u16(), 200);
}

#[tokio::test]
async fn undecodable_id_is_a_404_envelope() {
    let ax = memory_app();

    for method in ["GET", "PUT", "DELETE"] {
        let res = ax
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri("/api/v1/dogs/%FF")
                    .header("content-type", FORM)
                    .body(Body::from("age=4"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status().as_u16(), 404, "{method}");
        let body = json_body(res).await;
        assert_eq!(body["status"], 404);
        assert_eq!(body["message"], "no dog found");
    }
}
