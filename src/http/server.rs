//! HTTP server setup and the test-harness handle.
//!
//! # Responsibilities
//! - Create the Axum router (protocol endpoint + optional admin routes)
//! - Wire up middleware (tracing, request timeout)
//! - Bind an ephemeral local address and serve in the background
//! - Expose direct model seeding for test authors
//!
//! # Design Decisions
//! - Every path that is not `/admin/*` reaches the dispatcher
//! - Dropping the handle stops the server

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::admin;
use crate::config::SimulatorConfig;
use crate::http::dispatcher::Dispatcher;
use crate::lifecycle::Shutdown;
use crate::model::ModelStore;
use crate::protocol::FormValues;

/// Errors raised while starting the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read local address: {0}")]
    LocalAddr(#[source] std::io::Error),

    #[error("Server task failed: {0}")]
    Serve(String),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub store: Arc<ModelStore>,
}

impl AppState {
    pub fn new(store: Arc<ModelStore>) -> Self {
        Self {
            dispatcher: Arc::new(Dispatcher::new(store.clone())),
            store,
        }
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &SimulatorConfig, state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", any(protocol_handler))
        .route("/{*path}", any(protocol_handler));
    if config.admin.enabled {
        router = router.merge(admin::setup_admin_router());
    }
    router
        .with_state(state)
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(TraceLayer::new_for_http())
}

/// Decode the form and hand it to the dispatcher.
async fn protocol_handler(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Response {
    let form = FormValues::from_request(&body, query.as_deref());
    let outcome = state.dispatcher.dispatch(&form);
    let status = StatusCode::from_u16(outcome.status).unwrap_or(StatusCode::BAD_REQUEST);
    (status, [(header::CONTENT_TYPE, "text/xml")], outcome.body).into_response()
}

/// A running simulator.
pub struct ElbServer {
    addr: SocketAddr,
    store: Arc<ModelStore>,
    shutdown: Shutdown,
    task: Option<JoinHandle<Result<(), std::io::Error>>>,
}

impl ElbServer {
    /// Bind the configured address and start serving.
    pub async fn start(config: SimulatorConfig) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(&config.listener.bind_address)
            .await
            .map_err(|source| ServerError::Bind {
                address: config.listener.bind_address.clone(),
                source,
            })?;
        Self::serve(listener, config)
    }

    /// Start serving on an already bound listener.
    pub fn serve(listener: TcpListener, config: SimulatorConfig) -> Result<Self, ServerError> {
        let addr = listener.local_addr().map_err(ServerError::LocalAddr)?;
        let store = Arc::new(ModelStore::new());
        seed(&store, &config);

        let router = build_router(&config, AppState::new(store.clone()));
        let shutdown = Shutdown::new();
        let mut stop = shutdown.subscribe();

        let task = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    let _ = stop.recv().await;
                })
                .await
        });

        tracing::info!(address = %addr, "ELB simulator listening");
        Ok(Self {
            addr,
            store,
            shutdown,
            task: Some(task),
        })
    }

    /// Base URL, e.g. `http://127.0.0.1:41234`.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// The model backing this server.
    pub fn store(&self) -> &Arc<ModelStore> {
        &self.store
    }

    /// Create an instance without going through the protocol.
    pub fn new_instance(&self) -> String {
        self.store.new_instance()
    }

    /// Remove an instance; unknown ids are ignored.
    pub fn remove_instance(&self, id: &str) {
        self.store.remove_instance(id);
    }

    /// Seed a load balancer without a stored form.
    pub fn new_load_balancer(&self, name: &str) {
        self.store.new_load_balancer(name);
    }

    /// Remove a load balancer and everything stored for it.
    pub fn remove_load_balancer(&self, name: &str) {
        self.store.remove_load_balancer(name);
    }

    /// Stop accepting connections and wait for the server task.
    pub async fn stop(mut self) -> Result<(), ServerError> {
        self.shutdown.trigger();
        self.join().await
    }

    async fn join(&mut self) -> Result<(), ServerError> {
        let Some(task) = self.task.take() else {
            return Ok(());
        };
        let result = match task.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(ServerError::Serve(e.to_string())),
            Err(e) => Err(ServerError::Serve(e.to_string())),
        };
        tracing::info!(address = %self.addr, "ELB simulator stopped");
        result
    }
}

impl Drop for ElbServer {
    fn drop(&mut self) {
        if self.task.is_some() {
            self.shutdown.trigger();
        }
    }
}

fn seed(store: &ModelStore, config: &SimulatorConfig) {
    for _ in 0..config.seed.instances {
        store.new_instance();
    }
    for name in &config.seed.load_balancers {
        store.new_load_balancer(name);
    }
    if config.seed.instances > 0 || !config.seed.load_balancers.is_empty() {
        tracing::info!(
            instances = config.seed.instances,
            load_balancers = config.seed.load_balancers.len(),
            "Model seeded"
        );
    }
}
