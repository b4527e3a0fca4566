use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use crate::actions::ActionRegistry;
use crate::http::server::AppState;
use crate::observability::metrics;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub actions: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct LoadBalancerSummary {
    pub name: String,
    pub dns_name: String,
    /// Whether the balancer was created through the protocol.
    pub configured: bool,
}

#[derive(Debug, Serialize)]
pub struct ModelSnapshot {
    pub load_balancers: Vec<LoadBalancerSummary>,
    pub instances: Vec<String>,
}

#[derive(Serialize)]
pub struct CreatedInstance {
    pub instance_id: String,
}

#[derive(Serialize)]
pub struct CreatedLoadBalancer {
    pub name: String,
    pub dns_name: String,
}

pub async fn get_status() -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        actions: ActionRegistry::standard().actions(),
    })
}

pub async fn get_state(State(state): State<AppState>) -> Json<ModelSnapshot> {
    let model = state.store.lock();
    let snapshot = ModelSnapshot {
        load_balancers: model
            .load_balancers()
            .map(|(name, entry)| LoadBalancerSummary {
                name: name.to_string(),
                dns_name: entry.dns_name.clone(),
                configured: entry.config.is_some(),
            })
            .collect(),
        instances: model.instances().to_vec(),
    };
    drop(model);

    metrics::record_model_size(snapshot.instances.len(), snapshot.load_balancers.len());
    Json(snapshot)
}

pub async fn create_instance(State(state): State<AppState>) -> (StatusCode, Json<CreatedInstance>) {
    let instance_id = state.store.new_instance();
    (StatusCode::CREATED, Json(CreatedInstance { instance_id }))
}

pub async fn remove_instance(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    state.store.remove_instance(&id);
    StatusCode::NO_CONTENT
}

pub async fn create_load_balancer(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> (StatusCode, Json<CreatedLoadBalancer>) {
    let dns_name = state.store.lock().create_legacy_load_balancer(&name);
    (StatusCode::CREATED, Json(CreatedLoadBalancer { name, dns_name }))
}

pub async fn remove_load_balancer(State(state): State<AppState>, Path(name): Path<String>) -> StatusCode {
    state.store.remove_load_balancer(&name);
    StatusCode::NO_CONTENT
}
