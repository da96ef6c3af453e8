use actix_web::{App, test, web};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::ImageEncoder;
use kennel_base::Tensor;
use kennel_infer::{Backend, BreedClassifier, InferError, LabelTable, ModelSource, Session};
use kennel_server::db;
use kennel_server::handlers::{self, AppState};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Mutex;

struct FixedBackend {
    scores: Vec<f32>,
}

struct FixedSession {
    scores: Vec<f32>,
    input_names: Vec<String>,
    output_names: Vec<String>,
}

impl Backend for FixedBackend {
    fn name(&self) -> &str {
        "fixed"
    }

    fn load_model(&self, _model: ModelSource) -> Result<Box<dyn Session>, InferError> {
        Ok(Box::new(FixedSession {
            scores: self.scores.clone(),
            input_names: vec!["images".to_string()],
            output_names: vec!["scores".to_string()],
        }))
    }
}

impl Session for FixedSession {
    fn run(
        &mut self,
        _inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError> {
        let out = Tensor::new(vec![1, self.scores.len()], self.scores.clone()).unwrap();
        Ok(HashMap::from([("scores".to_string(), out)]))
    }

    fn input_names(&self) -> &[String] {
        &self.input_names
    }

    fn output_names(&self) -> &[String] {
        &self.output_names
    }
}

fn test_state(scores: Vec<f32>, db_name: &str) -> web::Data<AppState> {
    let labels = LabelTable::from_names(vec![
        "husky".to_string(),
        "pug".to_string(),
        "beagle".to_string(),
    ])
    .unwrap();

    let backend = FixedBackend { scores };
    let classifier = BreedClassifier::new(ModelSource::Memory(vec![]), &backend, labels).unwrap();

    let path = std::env::temp_dir().join(format!(
        "kennel-http-test-{}-{db_name}.db",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    let pool = db::init_pool(&path).unwrap();

    web::Data::new(AppState {
        classifier: Mutex::new(classifier),
        pool,
    })
}

fn png_base64() -> String {
    let mut buffer = Vec::new();
    let img = image::RgbImage::from_fn(8, 8, |x, y| {
        image::Rgb([(x * 30) as u8, (y * 30) as u8, 77])
    });
    image::codecs::png::PngEncoder::new(&mut buffer)
        .write_image(img.as_raw(), 8, 8, image::ExtendedColorType::Rgb8)
        .unwrap();
    BASE64.encode(&buffer)
}

#[actix_web::test]
async fn test_health() {
    let app = test::init_service(
        App::new().route("/health", web::get().to(handlers::health)),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn test_predict_returns_breed() {
    let state = test_state(vec![0.1, 0.7, 0.2], "predict");
    let app = test::init_service(
        App::new()
            .app_data(state)
            .route("/predict", web::post().to(handlers::predict)),
    )
    .await;

    // Browser uploads arrive with the data URL prefix
    let image = format!("data:image/png;base64,{}", png_base64());
    let req = test::TestRequest::post()
        .uri("/predict")
        .set_json(json!({"image": image}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["breed"], "pug");
    assert_eq!(body["confidence"], 70.0);
}

#[actix_web::test]
async fn test_predict_without_data_prefix() {
    let state = test_state(vec![0.0, 0.0, 0.9], "predict-plain");
    let app = test::init_service(
        App::new()
            .app_data(state)
            .route("/predict", web::post().to(handlers::predict)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/predict")
        .set_json(json!({"image": png_base64()}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["breed"], "beagle");
}

#[actix_web::test]
async fn test_predict_rejects_bad_base64() {
    let state = test_state(vec![0.1, 0.7, 0.2], "bad-base64");
    let app = test::init_service(
        App::new()
            .app_data(state)
            .route("/predict", web::post().to(handlers::predict)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/predict")
        .set_json(json!({"image": "!!!not base64!!!"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("invalid image data"));
}

#[actix_web::test]
async fn test_predict_rejects_undecodable_image() {
    let state = test_state(vec![0.1, 0.7, 0.2], "bad-image");
    let app = test::init_service(
        App::new()
            .app_data(state)
            .route("/predict", web::post().to(handlers::predict)),
    )
    .await;

    // Valid base64, but the payload is not an image
    let req = test::TestRequest::post()
        .uri("/predict")
        .set_json(json!({"image": BASE64.encode([0u8, 1, 2, 3])}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("invalid image data"));
}

#[actix_web::test]
async fn test_predict_rejects_missing_field() {
    let state = test_state(vec![0.1, 0.7, 0.2], "missing-field");
    let app = test::init_service(
        App::new()
            .app_data(state)
            .route("/predict", web::post().to(handlers::predict)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/predict")
        .set_json(json!({"picture": "nope"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_account_flow() {
    let state = test_state(vec![0.1, 0.7, 0.2], "accounts");
    let app = test::init_service(
        App::new()
            .app_data(state)
            .route("/signup", web::post().to(handlers::signup))
            .route("/login", web::post().to(handlers::login))
            .route("/logout", web::post().to(handlers::logout))
            .route("/me", web::get().to(handlers::me)),
    )
    .await;

    // Signup
    let req = test::TestRequest::post()
        .uri("/signup")
        .set_json(json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "hunter2",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["username"], "alice");
    let signup_token = body["token"].as_str().unwrap().to_string();
    assert_eq!(signup_token.len(), 64);

    // Duplicate email
    let req = test::TestRequest::post()
        .uri("/signup")
        .set_json(json!({
            "username": "alice2",
            "email": "alice@example.com",
            "password": "hunter3",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);

    // Login with the right password
    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({
            "email": "alice@example.com",
            "password": "hunter2",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    let token = body["token"].as_str().unwrap().to_string();

    // Login with the wrong password
    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({
            "email": "alice@example.com",
            "password": "wrong",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    // Session is valid
    let req = test::TestRequest::get()
        .uri("/me")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["username"], "alice");

    // Logout, then the session is gone
    let req = test::TestRequest::post()
        .uri("/logout")
        .set_json(json!({"token": token}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::get()
        .uri("/me")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_me_without_token() {
    let state = test_state(vec![0.1, 0.7, 0.2], "no-token");
    let app = test::init_service(
        App::new()
            .app_data(state)
            .route("/me", web::get().to(handlers::me)),
    )
    .await;

    let req = test::TestRequest::get().uri("/me").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}
