//! Value types shared by the store, handlers and wire payloads.

use serde::Serialize;

use crate::protocol::FormValues;

/// Health-check parameters of a load balancer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HealthCheck {
    pub healthy_threshold: i64,
    pub interval: i64,
    pub target: String,
    pub timeout: i64,
    pub unhealthy_threshold: i64,
}

impl Default for HealthCheck {
    fn default() -> Self {
        Self {
            healthy_threshold: 10,
            interval: 30,
            target: "TCP:80".to_string(),
            timeout: 5,
            unhealthy_threshold: 2,
        }
    }
}

impl HealthCheck {
    /// Build from `HealthCheck.*` fields, defaulting each absent field independently.
    pub fn from_form_or_default(form: &FormValues) -> Self {
        let defaults = Self::default();
        let int_or = |key: &str, fallback: i64| {
            if form.has(key) {
                form.int(key)
            } else {
                fallback
            }
        };
        Self {
            healthy_threshold: int_or("HealthCheck.HealthyThreshold", defaults.healthy_threshold),
            interval: int_or("HealthCheck.Interval", defaults.interval),
            target: form
                .get("HealthCheck.Target")
                .map(str::to_string)
                .unwrap_or(defaults.target),
            timeout: int_or("HealthCheck.Timeout", defaults.timeout),
            unhealthy_threshold: int_or("HealthCheck.UnhealthyThreshold", defaults.unhealthy_threshold),
        }
    }

    /// Build from `HealthCheck.*` fields with no defaults applied.
    pub fn from_form(form: &FormValues) -> Self {
        Self {
            healthy_threshold: form.int("HealthCheck.HealthyThreshold"),
            interval: form.int("HealthCheck.Interval"),
            target: form.value("HealthCheck.Target").to_string(),
            timeout: form.int("HealthCheck.Timeout"),
            unhealthy_threshold: form.int("HealthCheck.UnhealthyThreshold"),
        }
    }
}

/// A front-end to back-end port mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Listener {
    pub protocol: String,
    pub load_balancer_port: i64,
    pub instance_protocol: String,
    pub instance_port: i64,
}

/// Security group the provider attaches to the balancer's own traffic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SourceSecurityGroup {
    pub group_name: String,
    pub owner_alias: String,
}

impl SourceSecurityGroup {
    /// Build from `SourceSecurityGroup.*` fields, falling back to the provider group.
    pub fn from_form_or_default(form: &FormValues) -> Self {
        Self {
            group_name: form
                .get("SourceSecurityGroup.GroupName")
                .unwrap_or("amazon-elb-sg")
                .to_string(),
            owner_alias: form
                .get("SourceSecurityGroup.OwnerAlias")
                .unwrap_or("amazon-elb")
                .to_string(),
        }
    }
}
