//! Action handlers.
//!
//! # Data Flow
//! ```text
//! Dispatcher (model lock held)
//!     → ActionRegistry::get(action)
//!     → validate.rs (required fields, field composition)
//!     → existence checks against StoreState
//!     → mutation / read
//!     → ActionResponse or ElbError
//! ```
//!
//! # Design Decisions
//! - Registry is built once and never changes
//! - Handlers never release the lock mid-request; they only see `&mut StoreState`
//! - The first failed check returns before any mutation

pub mod health_check;
pub mod instances;
pub mod load_balancer;
pub mod validate;

use std::collections::HashMap;

use crate::model::StoreState;
use crate::protocol::{ActionResponse, ElbResult, FormValues};

/// Everything a handler may touch while serving one request.
pub struct RequestContext<'a> {
    pub form: &'a FormValues,
    pub store: &'a mut StoreState,
    pub request_id: &'a str,
}

/// One protocol operation.
pub trait ActionHandler: Send + Sync {
    fn handle(&self, ctx: &mut RequestContext<'_>) -> ElbResult<ActionResponse>;
}

impl<F> ActionHandler for F
where
    F: Fn(&mut RequestContext<'_>) -> ElbResult<ActionResponse> + Send + Sync,
{
    fn handle(&self, ctx: &mut RequestContext<'_>) -> ElbResult<ActionResponse> {
        self(ctx)
    }
}

/// Static table of supported actions.
pub struct ActionRegistry {
    handlers: HashMap<&'static str, Box<dyn ActionHandler>>,
}

impl ActionRegistry {
    /// The full set of actions the simulator understands.
    pub fn standard() -> Self {
        let mut handlers: HashMap<&'static str, Box<dyn ActionHandler>> = HashMap::new();
        handlers.insert("CreateLoadBalancer", Box::new(load_balancer::create_load_balancer));
        handlers.insert("DeleteLoadBalancer", Box::new(load_balancer::delete_load_balancer));
        handlers.insert("DescribeLoadBalancers", Box::new(load_balancer::describe_load_balancers));
        handlers.insert(
            "RegisterInstancesWithLoadBalancer",
            Box::new(instances::register_instances_with_load_balancer),
        );
        handlers.insert(
            "DeregisterInstancesFromLoadBalancer",
            Box::new(instances::deregister_instances_from_load_balancer),
        );
        handlers.insert("DescribeInstanceHealth", Box::new(instances::describe_instance_health));
        handlers.insert("ConfigureHealthCheck", Box::new(health_check::configure_health_check));
        Self { handlers }
    }

    pub fn get(&self, action: &str) -> Option<&dyn ActionHandler> {
        self.handlers.get(action).map(|h| h.as_ref())
    }

    /// Supported action names, sorted.
    pub fn actions(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.handlers.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("actions", &self.actions())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry() {
        let registry = ActionRegistry::standard();
        assert_eq!(registry.actions().len(), 7);
        assert!(registry.get("CreateLoadBalancer").is_some());
        assert!(registry.get("ConfigureHealthCheck").is_some());
        assert!(registry.get("DescribeTags").is_none());
    }
}
