//! Load balancer lifecycle and description actions.

use crate::actions::{validate, RequestContext};
use crate::model::{HealthCheck, Listener, SourceSecurityGroup};
use crate::protocol::response::ListenerDescription;
use crate::protocol::{ActionResponse, ElbResult, FormValues, LoadBalancerDescription};

const ZONES_OR_SUBNETS: (&str, &str) = ("AvailabilityZones.member.1", "Subnets.member.1");

const CREATE_REQUIRED: &[&str] = &[
    "Listeners.member.1.InstancePort",
    "Listeners.member.1.InstanceProtocol",
    "Listeners.member.1.Protocol",
    "Listeners.member.1.LoadBalancerPort",
    "LoadBalancerName",
];

const DEFAULT_SCHEME: &str = "internet-facing";
const DEFAULT_ZONE: &str = "us-east-1a";

/// `CreateLoadBalancer`: store the form and return the synthesized DNS name.
pub fn create_load_balancer(ctx: &mut RequestContext<'_>) -> ElbResult<ActionResponse> {
    validate::composition(ctx.form, &[ZONES_OR_SUBNETS])?;
    validate::required(ctx.form, CREATE_REQUIRED)?;

    let mut config = ctx.form.clone();
    if !config.has("Path") {
        config.insert("Path", "/");
    }
    let name = ctx.form.value("LoadBalancerName");
    let dns_name = ctx.store.create_load_balancer(name, config);
    Ok(ActionResponse::CreateLoadBalancer { dns_name })
}

/// `DeleteLoadBalancer`: idempotent removal.
pub fn delete_load_balancer(ctx: &mut RequestContext<'_>) -> ElbResult<ActionResponse> {
    validate::required(ctx.form, &["LoadBalancerName"])?;
    ctx.store.remove_load_balancer(ctx.form.value("LoadBalancerName"));
    Ok(ActionResponse::Acknowledged {
        request_id: ctx.request_id.to_string(),
    })
}

/// `DescribeLoadBalancers`: every requested name must exist; all balancers are described.
pub fn describe_load_balancers(ctx: &mut RequestContext<'_>) -> ElbResult<ActionResponse> {
    for member in ctx.form.members("LoadBalancerNames", None) {
        ctx.store.require_load_balancer(member.value())?;
    }

    let mut configured = Vec::new();
    let mut legacy = Vec::new();
    for (name, entry) in ctx.store.load_balancers() {
        match &entry.config {
            Some(config) => configured.push(describe_configured(name, &entry.dns_name, config)),
            None => legacy.push(describe_legacy(name, &entry.dns_name)),
        }
    }
    configured.extend(legacy);
    Ok(ActionResponse::DescribeLoadBalancers(configured))
}

fn describe_configured(name: &str, dns_name: &str, config: &FormValues) -> LoadBalancerDescription {
    let listener_descriptions = config
        .members("Listeners", Some("Protocol"))
        .map(|m| ListenerDescription {
            listener: Listener {
                protocol: m.field("Protocol").to_uppercase(),
                load_balancer_port: m.field("LoadBalancerPort").parse().unwrap_or(0),
                instance_protocol: m.field("InstanceProtocol").to_uppercase(),
                instance_port: m.field("InstancePort").parse().unwrap_or(0),
            },
        })
        .collect::<Vec<_>>();

    LoadBalancerDescription {
        load_balancer_name: name.to_string(),
        dns_name: dns_name.to_string(),
        scheme: config.get("Scheme").unwrap_or(DEFAULT_SCHEME).to_string(),
        availability_zones: config.member_values("AvailabilityZones").into(),
        subnets: config.member_values("Subnets").into(),
        security_groups: config.member_values("SecurityGroups").into(),
        health_check: HealthCheck::from_form_or_default(config),
        listener_descriptions: listener_descriptions.into(),
        source_security_group: SourceSecurityGroup::from_form_or_default(config),
    }
}

fn describe_legacy(name: &str, dns_name: &str) -> LoadBalancerDescription {
    let empty = FormValues::new();
    LoadBalancerDescription {
        load_balancer_name: name.to_string(),
        dns_name: dns_name.to_string(),
        scheme: DEFAULT_SCHEME.to_string(),
        availability_zones: vec![DEFAULT_ZONE.to_string()].into(),
        subnets: Vec::new().into(),
        security_groups: Vec::new().into(),
        health_check: HealthCheck::default(),
        listener_descriptions: Vec::new().into(),
        source_security_group: SourceSecurityGroup::from_form_or_default(&empty),
    }
}
