//! XML payloads returned to callers.
//!
//! # Responsibilities
//! - Define the success payload of every action
//! - Render payloads and error envelopes as provider-shaped XML
//!
//! # Design Decisions
//! - Repeated values render as `<List><member>..</member></List>`
//! - Success documents are rooted at `<Action>Response` and always carry
//!   `ResponseMetadata/RequestId`

use serde::Serialize;

use crate::model::{HealthCheck, Listener, SourceSecurityGroup};
use crate::protocol::error::{ElbError, FixtureError};

/// A repeated wire value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberList<T> {
    pub member: Vec<T>,
}

impl<T> From<Vec<T>> for MemberList<T> {
    fn from(member: Vec<T>) -> Self {
        Self { member }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstanceRef {
    pub instance_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListenerDescription {
    pub listener: Listener,
}

/// Everything `DescribeLoadBalancers` reports about one load balancer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoadBalancerDescription {
    pub load_balancer_name: String,
    #[serde(rename = "DNSName")]
    pub dns_name: String,
    pub scheme: String,
    pub availability_zones: MemberList<String>,
    pub subnets: MemberList<String>,
    pub security_groups: MemberList<String>,
    pub health_check: HealthCheck,
    pub listener_descriptions: MemberList<ListenerDescription>,
    pub source_security_group: SourceSecurityGroup,
}

/// Health of one instance behind a load balancer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstanceState {
    pub description: String,
    pub instance_id: String,
    pub reason_code: String,
    pub state: String,
}

impl InstanceState {
    /// The only state this simulator reports.
    pub fn pending(instance_id: &str) -> Self {
        Self {
            description: "Instance is in pending state.".to_string(),
            instance_id: instance_id.to_string(),
            reason_code: "Instance".to_string(),
            state: "OutOfService".to_string(),
        }
    }
}

/// Success payload produced by an action handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResponse {
    /// DNS name of a freshly created load balancer.
    CreateLoadBalancer { dns_name: String },
    /// Bare acknowledgement echoing the request id.
    Acknowledged { request_id: String },
    /// Instance ids accepted for registration.
    RegisterInstances { instance_ids: Vec<String> },
    DescribeLoadBalancers(Vec<LoadBalancerDescription>),
    DescribeInstanceHealth(Vec<InstanceState>),
    ConfigureHealthCheck(HealthCheck),
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ResponseMetadata<'a> {
    request_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Acknowledgement<'a> {
    response_metadata: ResponseMetadata<'a>,
}

#[derive(Serialize)]
struct DnsNameResult<'a> {
    #[serde(rename = "DNSName")]
    dns_name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct CreateLoadBalancerEnvelope<'a> {
    create_load_balancer_result: DnsNameResult<'a>,
    response_metadata: ResponseMetadata<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct InstancesResult {
    instances: MemberList<InstanceRef>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct RegisterInstancesEnvelope<'a> {
    register_instances_with_load_balancer_result: InstancesResult,
    response_metadata: ResponseMetadata<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct DescriptionsResult<'a> {
    load_balancer_descriptions: MemberList<&'a LoadBalancerDescription>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeLoadBalancersEnvelope<'a> {
    describe_load_balancers_result: DescriptionsResult<'a>,
    response_metadata: ResponseMetadata<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct InstanceStatesResult<'a> {
    instance_states: MemberList<&'a InstanceState>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeInstanceHealthEnvelope<'a> {
    describe_instance_health_result: InstanceStatesResult<'a>,
    response_metadata: ResponseMetadata<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct HealthCheckResult<'a> {
    health_check: &'a HealthCheck,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ConfigureHealthCheckEnvelope<'a> {
    configure_health_check_result: HealthCheckResult<'a>,
    response_metadata: ResponseMetadata<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ErrorBody<'a> {
    code: &'a str,
    message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ErrorEnvelope<'a> {
    error: ErrorBody<'a>,
    request_id: &'a str,
}

fn render<T: Serialize>(root: &str, value: &T) -> Result<String, FixtureError> {
    quick_xml::se::to_string_with_root(root, value).map_err(|e| FixtureError::Serialize {
        root: root.to_string(),
        reason: e.to_string(),
    })
}

impl ActionResponse {
    /// Render as the `<action>Response` document.
    pub fn to_xml(&self, action: &str, request_id: &str) -> Result<String, FixtureError> {
        let root = format!("{}Response", action);
        let metadata = ResponseMetadata { request_id };
        match self {
            ActionResponse::CreateLoadBalancer { dns_name } => render(
                &root,
                &CreateLoadBalancerEnvelope {
                    create_load_balancer_result: DnsNameResult { dns_name },
                    response_metadata: metadata,
                },
            ),
            ActionResponse::Acknowledged { request_id } => render(
                &root,
                &Acknowledgement {
                    response_metadata: ResponseMetadata { request_id },
                },
            ),
            ActionResponse::RegisterInstances { instance_ids } => render(
                &root,
                &RegisterInstancesEnvelope {
                    register_instances_with_load_balancer_result: InstancesResult {
                        instances: instance_ids
                            .iter()
                            .map(|id| InstanceRef { instance_id: id.clone() })
                            .collect::<Vec<_>>()
                            .into(),
                    },
                    response_metadata: metadata,
                },
            ),
            ActionResponse::DescribeLoadBalancers(descriptions) => render(
                &root,
                &DescribeLoadBalancersEnvelope {
                    describe_load_balancers_result: DescriptionsResult {
                        load_balancer_descriptions: descriptions.iter().collect::<Vec<_>>().into(),
                    },
                    response_metadata: metadata,
                },
            ),
            ActionResponse::DescribeInstanceHealth(states) => render(
                &root,
                &DescribeInstanceHealthEnvelope {
                    describe_instance_health_result: InstanceStatesResult {
                        instance_states: states.iter().collect::<Vec<_>>().into(),
                    },
                    response_metadata: metadata,
                },
            ),
            ActionResponse::ConfigureHealthCheck(health_check) => render(
                &root,
                &ConfigureHealthCheckEnvelope {
                    configure_health_check_result: HealthCheckResult { health_check },
                    response_metadata: metadata,
                },
            ),
        }
    }
}

/// Render the `<ErrorResponse>` envelope for `err`.
pub fn error_xml(err: &ElbError, request_id: &str) -> Result<String, FixtureError> {
    render(
        "ErrorResponse",
        &ErrorEnvelope {
            error: ErrorBody {
                code: err.code(),
                message: err.to_string(),
            },
            request_id,
        },
    )
}
