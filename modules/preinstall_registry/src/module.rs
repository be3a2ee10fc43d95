//! Module declaration and lifecycle: open, migrate, serve, close

use crate::api::native::NativeClient;
use crate::config::Config;
use crate::contract::RegistryApi;
use crate::domain::{FileIntake, Service};
use crate::infra::storage::SeaOrmSubmissionRepository;
use crate::infra::uploads::LocalFileIntake;
use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::Arc;

/// Pre-install registry module
pub struct RegistryModule {
    config: Config,
    db: Arc<DatabaseConnection>,
    service: Arc<Service>,
    intake: Arc<dyn FileIntake>,
}

impl RegistryModule {
    /// Open the store, create the schema and wire the service.
    ///
    /// Any failure here is fatal for startup.
    pub async fn init(config: Config) -> Result<Self> {
        let mut options = ConnectOptions::new(config.database_url.clone());
        options.sqlx_logging(false);

        let db = Database::connect(options)
            .await
            .with_context(|| format!("failed to open database {}", config.database_url))?;
        let db = Arc::new(db);
        tracing::info!(url = %config.database_url, "Connected to submissions database");

        let intake = LocalFileIntake::open(&config.upload_dir).await?;

        Self::from_parts(config, db, Arc::new(intake)).await
    }

    /// Wire the module around an already open connection and file intake
    pub async fn from_parts(
        config: Config,
        db: Arc<DatabaseConnection>,
        intake: Arc<dyn FileIntake>,
    ) -> Result<Self> {
        let repo = SeaOrmSubmissionRepository::new(db.clone());
        repo.initialize()
            .await
            .context("failed to create submissions schema")?;
        tracing::info!("Submissions schema ready");

        let service = Arc::new(Service::new(Arc::new(repo), config.clone()));

        Ok(Self {
            config,
            db,
            service,
            intake,
        })
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    /// In-process client for other modules
    pub fn client(&self) -> Arc<dyn RegistryApi> {
        Arc::new(NativeClient::new(self.service.clone()))
    }

    /// Mount the REST routes onto `router`
    pub fn register_rest(&self, router: axum::Router) -> axum::Router {
        tracing::info!("Registering pre-install registry REST routes");
        crate::api::rest::routes::register_routes(
            router,
            self.service.clone(),
            self.intake.clone(),
            self.config.max_upload_bytes,
        )
    }

    /// Close the database once the HTTP server has drained
    pub async fn shutdown(self) -> Result<()> {
        let Self { db, service, .. } = self;
        // Routers holding the service must be gone before the pool can be reclaimed
        drop(service);
        match Arc::try_unwrap(db) {
            Ok(db) => {
                db.close().await.context("failed to close database")?;
                tracing::info!("Submissions database closed");
            }
            Err(_) => tracing::warn!("Database still referenced at shutdown; leaving pool to drop"),
        }
        Ok(())
    }
}
