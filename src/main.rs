//! Rigbook API server
//!
//! Explicit wiring, no framework magic: build the stores, the token
//! codec, and the access policy, inject them into the router, serve.

use anyhow::{Context, Result};
use dotenv::dotenv;
use rigbook_backend::{
    api::{create_router, AppState},
    auth::{AccessPolicy, AuthState, GateState, JwtCodec},
    config::Config,
    store::{ModStore, ProfileStore, VehicleStore},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    init_tracing();

    let config = Config::from_env()?;

    info!("🚀 Starting rigbook API server");

    let profiles = Arc::new(ProfileStore::new(&config.db_path)?);
    let vehicles = Arc::new(VehicleStore::new(&config.db_path)?);
    let mods = Arc::new(ModStore::new(&config.db_path)?);

    info!("📊 Catalog database initialized at: {}", config.db_path);

    let codec = Arc::new(JwtCodec::new(config.jwt_secret.clone()));
    let policy = Arc::new(AccessPolicy::defaults());

    let app = create_router(
        AppState {
            profiles: profiles.clone(),
            vehicles,
            mods,
        },
        AuthState {
            profiles: profiles.clone(),
            codec: codec.clone(),
        },
        GateState { codec, profiles },
        policy,
    );

    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!("🎯 API server listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rigbook_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
