use std::fs;
use std::sync::Arc;

use actix_web::http::{header::ContentType, StatusCode};
use actix_web::{test, web, App};
use disaster_api::server::{routes, PredictionResponse, StaticRoot};
use disaster_api::{Classifier, ClassifierError, DisasterLabel, Scorer};
use serde_json::json;
use tempfile::TempDir;

const INDEX_HTML: &str = "<!doctype html><div id=\"root\"></div>";
const APP_JS: &[u8] = b"console.log('analyzer');";

/// Scores tweets mentioning a hazard as disasters, fails on "explode".
#[derive(Debug)]
struct HazardScorer;

impl Scorer for HazardScorer {
    fn logits(&self, text: &str) -> Result<Vec<f32>, ClassifierError> {
        let text = text.to_lowercase();
        if text.contains("explode") {
            return Err(ClassifierError::ModelError("session crashed".into()));
        }
        if ["fire", "flood", "earthquake"].iter().any(|w| text.contains(w)) {
            Ok(vec![-2.1, 2.4])
        } else {
            Ok(vec![1.7, -1.2])
        }
    }
}

fn fixture(with_index: bool) -> (TempDir, web::Data<Classifier>, web::Data<StaticRoot>) {
    let dir = TempDir::new().unwrap();
    if with_index {
        fs::write(dir.path().join("index.html"), INDEX_HTML).unwrap();
    }
    fs::create_dir_all(dir.path().join("assets")).unwrap();
    fs::write(dir.path().join("assets/app.js"), APP_JS).unwrap();

    let classifier = Classifier::builder()
        .with_scorer(Arc::new(HazardScorer))
        .build()
        .unwrap();
    let root = StaticRoot::new(dir.path());
    (dir, web::Data::new(classifier), web::Data::new(root))
}

#[actix_web::test]
async fn test_predict_disaster() {
    let (_dir, classifier, root) = fixture(true);
    let app = test::init_service(App::new().app_data(classifier).app_data(root).configure(routes)).await;

    let req = test::TestRequest::post()
        .uri("/api/predict")
        .set_json(json!({ "text": "Forest fire spreading rapidly near town" }))
        .to_request();
    let body: PredictionResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.prediction, DisasterLabel::Disaster);
    assert!(body.confidence > 0.5 && body.confidence <= 1.0);
}

#[actix_web::test]
async fn test_predict_not_disaster_wire_format() {
    let (_dir, classifier, root) = fixture(true);
    let app = test::init_service(App::new().app_data(classifier).app_data(root).configure(routes)).await;

    let req = test::TestRequest::post()
        .uri("/api/predict")
        .set_json(json!({ "text": "Having lunch with friends" }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["prediction"], "Not Disaster");
    let confidence = body["confidence"].as_f64().unwrap();
    assert!(confidence > 0.5 && confidence <= 1.0);
    assert_eq!(body.as_object().unwrap().len(), 2);
}

#[actix_web::test]
async fn test_predict_is_idempotent() {
    let (_dir, classifier, root) = fixture(true);
    let app = test::init_service(App::new().app_data(classifier).app_data(root).configure(routes)).await;

    let mut responses = Vec::new();
    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/api/predict")
            .set_json(json!({ "text": "Flood waters rising downtown" }))
            .to_request();
        let body: PredictionResponse = test::call_and_read_body_json(&app, req).await;
        responses.push(body);
    }
    assert_eq!(responses[0], responses[1]);
}

#[actix_web::test]
async fn test_client_errors() {
    let (_dir, classifier, root) = fixture(true);
    let app = test::init_service(App::new().app_data(classifier).app_data(root).configure(routes)).await;

    let missing_text = test::TestRequest::post()
        .uri("/api/predict")
        .set_json(json!({ "message": "no text field" }))
        .to_request();
    assert_eq!(test::call_service(&app, missing_text).await.status(), StatusCode::BAD_REQUEST);

    let wrong_type = test::TestRequest::post()
        .uri("/api/predict")
        .set_json(json!({ "text": 42 }))
        .to_request();
    assert_eq!(test::call_service(&app, wrong_type).await.status(), StatusCode::BAD_REQUEST);

    let not_json = test::TestRequest::post()
        .uri("/api/predict")
        .insert_header(ContentType::json())
        .set_payload("text=hello")
        .to_request();
    assert_eq!(test::call_service(&app, not_json).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_empty_text_is_classified() {
    let (_dir, classifier, root) = fixture(true);
    let app = test::init_service(App::new().app_data(classifier).app_data(root).configure(routes)).await;

    for text in ["", "  "] {
        let req = test::TestRequest::post()
            .uri("/api/predict")
            .set_json(json!({ "text": text }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "text {:?}", text);

        let body: PredictionResponse = test::read_body_json(resp).await;
        assert_eq!(body.prediction, DisasterLabel::NotDisaster);
        assert!(body.confidence > 0.5 && body.confidence <= 1.0);
    }
}

#[actix_web::test]
async fn test_inference_failure_is_server_error() {
    let (_dir, classifier, root) = fixture(true);
    let app = test::init_service(App::new().app_data(classifier).app_data(root).configure(routes)).await;

    let req = test::TestRequest::post()
        .uri("/api/predict")
        .set_json(json!({ "text": "watch this explode" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn test_get_on_predict_path_serves_entry_document() {
    let (_dir, classifier, root) = fixture(true);
    let app = test::init_service(App::new().app_data(classifier).app_data(root).configure(routes)).await;

    let req = test::TestRequest::get().uri("/api/predict").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, INDEX_HTML.as_bytes());
}

#[actix_web::test]
async fn test_static_file_exact_bytes() {
    let (_dir, classifier, root) = fixture(true);
    let app = test::init_service(App::new().app_data(classifier).app_data(root).configure(routes)).await;

    let req = test::TestRequest::get().uri("/assets/app.js").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers().get("content-type").unwrap().to_str().unwrap().to_string();
    assert!(content_type.contains("javascript"), "content type {}", content_type);
    assert_eq!(test::read_body(resp).await, APP_JS);
}

#[actix_web::test]
async fn test_unknown_path_serves_entry_document() {
    let (_dir, classifier, root) = fixture(true);
    let app = test::init_service(App::new().app_data(classifier).app_data(root).configure(routes)).await;

    let index = test::call_and_read_body(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(index, INDEX_HTML.as_bytes());

    for uri in ["/does-not-exist", "/reports/2024/latest", "/assets", "/../Cargo.toml"] {
        let body = test::call_and_read_body(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(body, index, "uri {}", uri);
    }
}

#[actix_web::test]
async fn test_missing_entry_document_is_not_found() {
    let (_dir, classifier, root) = fixture(false);
    let app = test::init_service(App::new().app_data(classifier).app_data(root).configure(routes)).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/anything").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let asset = test::call_service(&app, test::TestRequest::get().uri("/assets/app.js").to_request()).await;
    assert_eq!(asset.status(), StatusCode::OK);
}
