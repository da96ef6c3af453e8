use crate::db::{self, Pool};
use actix_web::{HttpRequest, HttpResponse, error, web};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use kennel_base::log;
use kennel_infer::{BreedClassifier, ClassifyError};
use rand::Rng as _;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Mutex;

/// Shared per-process state: the loaded classifier and the user database.
///
/// The classifier is immutable in spirit (model and labels never change
/// after startup) but `Session::run` takes `&mut self`, so it sits behind a
/// mutex and runs on the blocking pool.
pub struct AppState {
    pub classifier: Mutex<BreedClassifier>,
    pub pool: Pool,
}

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub image: String,
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub username: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn error_json(msg: impl Into<String>) -> ErrorBody {
    ErrorBody { error: msg.into() }
}

fn new_session_token() -> String {
    use std::fmt::Write;

    let bytes: [u8; 32] = rand::rng().random();
    let mut token = String::with_capacity(64);
    for b in bytes {
        let _ = write!(token, "{b:02x}");
    }
    token
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(actix_web::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({"status": "ok"}))
}

/// `POST /predict` with `{"image": "<base64>"}`.
///
/// Accepts an optional `data:*;base64,` prefix. Decode failures are the
/// caller's fault (400); anything past decode is a server-side failure
/// (500). Either way the body is `{"error": ...}` and the process keeps
/// serving.
pub async fn predict(
    state: web::Data<AppState>,
    body: web::Json<PredictRequest>,
) -> Result<HttpResponse, actix_web::Error> {
    // Strip the data:image/...;base64 prefix if present
    let encoded = match body.image.split_once(',') {
        Some((_, rest)) => rest,
        None => body.image.as_str(),
    };

    let bytes = match BASE64.decode(encoded) {
        Ok(bytes) => bytes,
        Err(e) => {
            return Ok(
                HttpResponse::BadRequest().json(error_json(format!("invalid image data: {e}")))
            );
        }
    };

    let state = state.clone();
    let result = web::block(move || {
        let mut classifier = state
            .classifier
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        classifier.classify(&bytes)
    })
    .await?;

    match result {
        Ok(prediction) => Ok(HttpResponse::Ok().json(prediction)),
        Err(err @ ClassifyError::Decode(_)) => {
            Ok(HttpResponse::BadRequest().json(error_json(err.to_string())))
        }
        Err(err) => {
            log::error!("Prediction failed: {err}");
            Ok(HttpResponse::InternalServerError().json(error_json(err.to_string())))
        }
    }
}

pub async fn signup(
    state: web::Data<AppState>,
    body: web::Json<SignupRequest>,
) -> Result<HttpResponse, actix_web::Error> {
    let SignupRequest {
        username,
        email,
        password,
    } = body.into_inner();

    let state = state.clone();
    let created = web::block(move || -> anyhow::Result<Option<SessionResponse>> {
        let conn = state.pool.get()?;

        if db::find_user_by_email(&conn, &email)?.is_some() {
            return Ok(None);
        }

        let hash = bcrypt::hash(&password, bcrypt::DEFAULT_COST)?;
        let user_id = db::create_user(&conn, &username, &email, &hash)?;

        let token = new_session_token();
        db::create_session(&conn, &token, user_id, &Utc::now().to_rfc3339())?;

        Ok(Some(SessionResponse { token, username }))
    })
    .await?
    .map_err(error::ErrorInternalServerError)?;

    match created {
        Some(session) => Ok(HttpResponse::Ok().json(session)),
        None => Ok(HttpResponse::Conflict().json(error_json("email already registered"))),
    }
}

pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, actix_web::Error> {
    let LoginRequest { email, password } = body.into_inner();

    let state = state.clone();
    let session = web::block(move || -> anyhow::Result<Option<SessionResponse>> {
        let conn = state.pool.get()?;

        let user = match db::find_user_by_email(&conn, &email)? {
            Some(user) => user,
            None => return Ok(None),
        };

        if !bcrypt::verify(&password, &user.password_hash)? {
            return Ok(None);
        }

        let token = new_session_token();
        db::create_session(&conn, &token, user.id, &Utc::now().to_rfc3339())?;

        Ok(Some(SessionResponse {
            token,
            username: user.username,
        }))
    })
    .await?
    .map_err(error::ErrorInternalServerError)?;

    match session {
        Some(session) => Ok(HttpResponse::Ok().json(session)),
        None => Ok(HttpResponse::Unauthorized().json(error_json("invalid email or password"))),
    }
}

pub async fn logout(
    state: web::Data<AppState>,
    body: web::Json<LogoutRequest>,
) -> Result<HttpResponse, actix_web::Error> {
    let token = body.into_inner().token;

    let state = state.clone();
    web::block(move || -> anyhow::Result<()> {
        let conn = state.pool.get()?;
        db::delete_session(&conn, &token)?;
        Ok(())
    })
    .await?
    .map_err(error::ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(json!({"status": "logged out"})))
}

/// `GET /me` with `Authorization: Bearer <token>`; the UI uses this to gate
/// the classification page.
pub async fn me(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, actix_web::Error> {
    let token = match bearer_token(&req) {
        Some(token) => token.to_string(),
        None => {
            return Ok(HttpResponse::Unauthorized().json(error_json("missing bearer token")));
        }
    };

    let state = state.clone();
    let user = web::block(move || -> anyhow::Result<Option<db::User>> {
        let conn = state.pool.get()?;
        match db::session_user(&conn, &token)? {
            Some(user_id) => Ok(db::find_user_by_id(&conn, user_id)?),
            None => Ok(None),
        }
    })
    .await?
    .map_err(error::ErrorInternalServerError)?;

    match user {
        Some(user) => Ok(HttpResponse::Ok().json(json!({
            "username": user.username,
            "email": user.email,
        }))),
        None => Ok(HttpResponse::Unauthorized().json(error_json("invalid session"))),
    }
}
