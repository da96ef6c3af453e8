use actix_web::{App, HttpServer, middleware, web};
use kennel_base::log;
use kennel_base::log_fatal;
use kennel_infer::{BreedClassifier, Device, InferError, LabelTable, ModelSource};
use kennel_server::config::Config;
use kennel_server::db;
use kennel_server::handlers::{self, AppState};
use std::sync::Mutex;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    kennel_base::init_stdout_logger();

    let config = Config::from_env();
    log::info!("kennel-server starting on {}", config.bind_addr);

    // All startup failures are fatal; there is no partial-startup mode.
    let labels = match LabelTable::from_path(&config.labels_path) {
        Ok(labels) => labels,
        Err(e) => log_fatal!(
            "failed to load labels from {}: {e}",
            config.labels_path.display()
        ),
    };
    log::info!(
        "Loaded {} breed labels from {}",
        labels.len(),
        config.labels_path.display()
    );

    let registry = kennel_infer::create_registry(Device::Cpu);
    let backend = match registry.get(&config.backend) {
        Some(backend) => backend,
        None => log_fatal!(
            "{}",
            InferError::UnknownBackend(config.backend.clone())
        ),
    };

    let classifier = match BreedClassifier::new(
        ModelSource::File(config.model_path.clone()),
        backend,
        labels,
    ) {
        Ok(classifier) => classifier,
        Err(e) => log_fatal!(
            "failed to load model from {}: {e}",
            config.model_path.display()
        ),
    };
    log::info!("Model loaded from {}", config.model_path.display());

    let pool = match db::init_pool(&config.db_path) {
        Ok(pool) => pool,
        Err(e) => log_fatal!(
            "failed to open user database {}: {e}",
            config.db_path.display()
        ),
    };

    let state = web::Data::new(AppState {
        classifier: Mutex::new(classifier),
        pool,
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .route("/health", web::get().to(handlers::health))
            .route("/predict", web::post().to(handlers::predict))
            .route("/signup", web::post().to(handlers::signup))
            .route("/login", web::post().to(handlers::login))
            .route("/logout", web::post().to(handlers::logout))
            .route("/me", web::get().to(handlers::me))
    })
    .bind(&config.bind_addr)?
    .run()
    .await?;

    Ok(())
}
