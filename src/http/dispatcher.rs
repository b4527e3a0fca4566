//! Action dispatch.
//!
//! # Responsibilities
//! - Resolve the `Action` field against the registry
//! - Stamp each recognized request with the next request id
//! - Run the handler with the model lock held
//! - Render the result as a success document or error envelope
//!
//! # Design Decisions
//! - Unknown actions are rejected before a request id is taken
//! - A payload that cannot be rendered is a simulator defect and aborts the
//!   process instead of answering with something the caller can't trust

use std::sync::Arc;
use std::time::Instant;

use crate::actions::{ActionRegistry, RequestContext};
use crate::model::ModelStore;
use crate::observability::metrics;
use crate::protocol::response::error_xml;
use crate::protocol::{ElbError, FixtureError, FormValues};

/// A rendered reply ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub status: u16,
    pub body: String,
}

/// Routes decoded requests to action handlers.
#[derive(Debug)]
pub struct Dispatcher {
    registry: ActionRegistry,
    store: Arc<ModelStore>,
}

impl Dispatcher {
    pub fn new(store: Arc<ModelStore>) -> Self {
        Self {
            registry: ActionRegistry::standard(),
            store,
        }
    }

    /// Handle one request. Aborts the process on a simulator defect.
    pub fn dispatch(&self, form: &FormValues) -> DispatchOutcome {
        match self.try_dispatch(form) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "Simulator defect, aborting");
                std::process::abort();
            }
        }
    }

    /// Handle one request, surfacing defects to the caller.
    pub fn try_dispatch(&self, form: &FormValues) -> Result<DispatchOutcome, FixtureError> {
        let start = Instant::now();
        let action = form.value("Action");

        let mut state = self.store.lock();
        let Some(handler) = self.registry.get(action) else {
            drop(state);
            tracing::info!(action = %action, "Unrecognized action");
            let err = ElbError::UnrecognizedAction;
            metrics::record_action("unknown", err.code(), start);
            return Ok(DispatchOutcome {
                status: err.status_code(),
                body: error_xml(&err, "")?,
            });
        };

        let request_id = state.next_request_id();
        tracing::debug!(request_id = %request_id, action = %action, "Dispatching action");

        let result = handler.handle(&mut RequestContext {
            form,
            store: &mut *state,
            request_id: &request_id,
        });
        drop(state);

        match result {
            Ok(response) => {
                metrics::record_action(action, "Success", start);
                Ok(DispatchOutcome {
                    status: 200,
                    body: response.to_xml(action, &request_id)?,
                })
            }
            Err(err) => {
                tracing::info!(
                    request_id = %request_id,
                    action = %action,
                    code = err.code(),
                    message = %err,
                    "Action rejected"
                );
                metrics::record_action(action, err.code(), start);
                Ok(DispatchOutcome {
                    status: err.status_code(),
                    body: error_xml(&err, &request_id)?,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(fields: &[(&str, &str)]) -> FormValues {
        fields.iter().copied().collect()
    }

    #[test]
    fn test_unknown_action() {
        let dispatcher = Dispatcher::new(Arc::new(ModelStore::new()));
        let outcome = dispatcher.try_dispatch(&form(&[("Action", "Nope")])).unwrap();
        assert_eq!(outcome.status, 400);
        assert!(outcome.body.contains("<Code>InvalidParameterValue</Code>"));
        assert!(outcome.body.contains("<Message>Unrecognized Action</Message>"));

        let missing = dispatcher.try_dispatch(&FormValues::new()).unwrap();
        assert_eq!(missing.status, 400);
    }

    #[test]
    fn test_request_ids_advance_only_for_known_actions() {
        let dispatcher = Dispatcher::new(Arc::new(ModelStore::new()));
        let delete = form(&[("Action", "DeleteLoadBalancer"), ("LoadBalancerName", "x")]);

        let first = dispatcher.try_dispatch(&delete).unwrap();
        assert!(first.body.contains("<RequestId>req0</RequestId>"));
        dispatcher.try_dispatch(&form(&[("Action", "Bogus")])).unwrap();
        let second = dispatcher.try_dispatch(&delete).unwrap();
        assert!(second.body.contains("<RequestId>req1</RequestId>"));
    }

    #[test]
    fn test_error_envelope_carries_request_id() {
        let dispatcher = Dispatcher::new(Arc::new(ModelStore::new()));
        let outcome = dispatcher
            .try_dispatch(&form(&[
                ("Action", "DescribeLoadBalancers"),
                ("LoadBalancerNames.member.1", "ghost"),
            ]))
            .unwrap();
        assert_eq!(outcome.status, 400);
        assert!(outcome.body.contains("<Code>LoadBalancerNotFound</Code>"));
        assert!(outcome.body.contains("<RequestId>req0</RequestId>"));
    }

    #[test]
    fn test_success_status() {
        let store = Arc::new(ModelStore::new());
        store.new_load_balancer("web");
        let id = store.new_instance();
        let dispatcher = Dispatcher::new(store);
        let outcome = dispatcher
            .try_dispatch(&form(&[
                ("Action", "RegisterInstancesWithLoadBalancer"),
                ("LoadBalancerName", "web"),
                ("Instances.member.1.InstanceId", id.as_str()),
            ]))
            .unwrap();
        assert_eq!(outcome.status, 200);
        assert!(outcome.body.starts_with("<RegisterInstancesWithLoadBalancerResponse>"));
    }
}
