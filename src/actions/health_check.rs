//! `ConfigureHealthCheck`.
//!
//! Validates and echoes the health check. The stored load balancer form is
//! left untouched, so `DescribeLoadBalancers` keeps reporting what was sent
//! at creation.

use std::sync::LazyLock;

use regex::Regex;

use crate::actions::{validate, RequestContext};
use crate::model::HealthCheck;
use crate::protocol::{ActionResponse, ElbError, ElbResult};

/// `<protocol>:<port>/` somewhere in the target.
static TARGET_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+:\d+/+").expect("health check target pattern"));

const REQUIRED: &[&str] = &[
    "LoadBalancerName",
    "HealthCheck.HealthyThreshold",
    "HealthCheck.Interval",
    "HealthCheck.Target",
    "HealthCheck.Timeout",
    "HealthCheck.UnhealthyThreshold",
];

const TARGET_FORMAT: &str = "HealthCheck HTTP Target must specify a port followed by a path that begins with a slash. e.g. HTTP:80/ping/this/path";

pub fn is_valid_target(target: &str) -> bool {
    TARGET_PATTERN.is_match(target)
}

pub fn configure_health_check(ctx: &mut RequestContext<'_>) -> ElbResult<ActionResponse> {
    validate::required(ctx.form, REQUIRED)?;
    ctx.store.require_load_balancer(ctx.form.value("LoadBalancerName"))?;

    if !is_valid_target(ctx.form.value("HealthCheck.Target")) {
        return Err(ElbError::Validation(TARGET_FORMAT.to_string()));
    }
    Ok(ActionResponse::ConfigureHealthCheck(HealthCheck::from_form(ctx.form)))
}
