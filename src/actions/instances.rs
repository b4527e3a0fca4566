//! Instance registration and health actions.
//!
//! Registration is validate-and-echo: no per-balancer membership is kept.

use crate::actions::{validate, RequestContext};
use crate::protocol::{ActionResponse, ElbResult, InstanceState};

/// Walk `Instances.member.N.InstanceId`, failing on the first unknown id.
fn referenced_instances(ctx: &RequestContext<'_>) -> ElbResult<Vec<String>> {
    ctx.form
        .member_fields("Instances", "InstanceId")
        .into_iter()
        .map(|id| ctx.store.require_instance(&id).map(|_| id))
        .collect()
}

/// `RegisterInstancesWithLoadBalancer`
pub fn register_instances_with_load_balancer(
    ctx: &mut RequestContext<'_>,
) -> ElbResult<ActionResponse> {
    validate::required(ctx.form, &["LoadBalancerName", "Instances.member.1.InstanceId"])?;
    ctx.store.require_load_balancer(ctx.form.value("LoadBalancerName"))?;
    let instance_ids = referenced_instances(ctx)?;
    Ok(ActionResponse::RegisterInstances { instance_ids })
}

/// `DeregisterInstancesFromLoadBalancer`
pub fn deregister_instances_from_load_balancer(
    ctx: &mut RequestContext<'_>,
) -> ElbResult<ActionResponse> {
    validate::required(ctx.form, &["LoadBalancerName"])?;
    ctx.store.require_load_balancer(ctx.form.value("LoadBalancerName"))?;
    referenced_instances(ctx)?;
    Ok(ActionResponse::Acknowledged {
        request_id: ctx.request_id.to_string(),
    })
}

/// `DescribeInstanceHealth`: every known instance reports `OutOfService`.
pub fn describe_instance_health(ctx: &mut RequestContext<'_>) -> ElbResult<ActionResponse> {
    ctx.store.require_load_balancer(ctx.form.value("LoadBalancerName"))?;
    let states = referenced_instances(ctx)?
        .iter()
        .map(|id| InstanceState::pending(id))
        .collect();
    Ok(ActionResponse::DescribeInstanceHealth(states))
}
