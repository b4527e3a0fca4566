//! In-memory model of load balancers and instances.
//!
//! # Responsibilities
//! - Own every piece of mutable simulator state
//! - Serialize all access behind a single coarse lock
//! - Provide existence checks that map to provider errors
//!
//! # Design Decisions
//! - One `Mutex` for the whole model; a request holds it from validation
//!   through mutation, so no caller ever sees a partial update
//! - A load balancer's DNS name and stored form live in one entry and are
//!   removed together

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::protocol::{ElbError, ElbResult, FormValues};

/// DNS name assigned by `CreateLoadBalancer`.
pub fn dns_name_for(name: &str) -> String {
    format!("{}-some-aws-stuff.us-east-1.elb.amazonaws.com", name)
}

/// DNS name assigned by the test-harness helper.
pub fn legacy_dns_name_for(name: &str) -> String {
    format!("{}-some-aws-stuff.sa-east-1.amazonaws.com", name)
}

/// A load balancer known to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadBalancerEntry {
    /// Synthesized DNS name.
    pub dns_name: String,
    /// The form accepted at creation; `None` for harness-seeded balancers.
    pub config: Option<FormValues>,
}

/// The state guarded by [`ModelStore`]'s lock.
#[derive(Debug, Default)]
pub struct StoreState {
    load_balancers: BTreeMap<String, LoadBalancerEntry>,
    instances: Vec<String>,
    instance_count: u64,
    request_count: u64,
}

impl StoreState {
    /// Store a load balancer and its form, replacing any entry of the same name.
    pub fn create_load_balancer(&mut self, name: &str, config: FormValues) -> String {
        let dns_name = dns_name_for(name);
        self.load_balancers.insert(
            name.to_string(),
            LoadBalancerEntry {
                dns_name: dns_name.clone(),
                config: Some(config),
            },
        );
        tracing::debug!(name = %name, dns_name = %dns_name, "Load balancer created");
        dns_name
    }

    /// Store a load balancer without a form.
    pub fn create_legacy_load_balancer(&mut self, name: &str) -> String {
        let dns_name = legacy_dns_name_for(name);
        self.load_balancers.insert(
            name.to_string(),
            LoadBalancerEntry {
                dns_name: dns_name.clone(),
                config: None,
            },
        );
        tracing::debug!(name = %name, "Legacy load balancer seeded");
        dns_name
    }

    /// Drop a load balancer; absent names are ignored.
    pub fn remove_load_balancer(&mut self, name: &str) {
        if self.load_balancers.remove(name).is_some() {
            tracing::debug!(name = %name, "Load balancer removed");
        }
    }

    pub fn lb_exists(&self, name: &str) -> bool {
        self.load_balancers.contains_key(name)
    }

    /// Look up a load balancer or fail with `LoadBalancerNotFound`.
    pub fn require_load_balancer(&self, name: &str) -> ElbResult<&LoadBalancerEntry> {
        self.load_balancers
            .get(name)
            .ok_or_else(|| ElbError::LoadBalancerNotFound(name.to_string()))
    }

    /// All load balancers, ordered by name.
    pub fn load_balancers(&self) -> impl Iterator<Item = (&str, &LoadBalancerEntry)> {
        self.load_balancers.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Register a new instance and return its id (`i-<n>`).
    pub fn create_instance(&mut self) -> String {
        self.instance_count += 1;
        let id = format!("i-{}", self.instance_count);
        self.instances.push(id.clone());
        tracing::debug!(instance_id = %id, "Instance created");
        id
    }

    /// Drop an instance; absent ids are ignored.
    pub fn remove_instance(&mut self, id: &str) {
        if let Some(pos) = self.instances.iter().position(|i| i == id) {
            self.instances.remove(pos);
            tracing::debug!(instance_id = %id, "Instance removed");
        }
    }

    pub fn instance_exists(&self, id: &str) -> bool {
        self.instances.iter().any(|i| i == id)
    }

    /// Fail with `InvalidInstance` unless `id` exists.
    pub fn require_instance(&self, id: &str) -> ElbResult<()> {
        if self.instance_exists(id) {
            Ok(())
        } else {
            Err(ElbError::InvalidInstance(id.to_string()))
        }
    }

    /// Known instance ids in creation order.
    pub fn instances(&self) -> &[String] {
        &self.instances
    }

    /// Take the next request identifier (`req0`, `req1`, ... `reqA`).
    pub fn next_request_id(&mut self) -> String {
        let id = format!("req{:X}", self.request_count);
        self.request_count += 1;
        id
    }
}

/// Shared handle to the model. Every access goes through [`ModelStore::lock`].
#[derive(Debug, Default)]
pub struct ModelStore {
    state: Mutex<StoreState>,
}

impl ModelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the model lock for the duration of one request.
    pub fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().expect("model store mutex poisoned")
    }

    /// Create an instance outside the protocol.
    pub fn new_instance(&self) -> String {
        self.lock().create_instance()
    }

    /// Remove an instance outside the protocol.
    pub fn remove_instance(&self, id: &str) {
        self.lock().remove_instance(id);
    }

    /// Seed a load balancer outside the protocol.
    pub fn new_load_balancer(&self, name: &str) {
        self.lock().create_legacy_load_balancer(name);
    }

    /// Remove a load balancer outside the protocol.
    pub fn remove_load_balancer(&self, name: &str) {
        self.lock().remove_load_balancer(name);
    }
}
