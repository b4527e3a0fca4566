//! Shared utilities for integration tests.

use elb_sim::{ElbServer, SimulatorConfig};

/// Start a simulator on an ephemeral local port.
pub async fn start_server() -> ElbServer {
    start_server_with(SimulatorConfig::default()).await
}

/// Start a simulator with a custom configuration.
pub async fn start_server_with(config: SimulatorConfig) -> ElbServer {
    ElbServer::start(config).await.expect("simulator failed to start")
}

/// POST a form-encoded action and return the status and body.
pub async fn post_action(server: &ElbServer, fields: &[(&str, &str)]) -> (u16, String) {
    let res = reqwest::Client::new()
        .post(server.url())
        .form(fields)
        .send()
        .await
        .expect("simulator unreachable");
    let status = res.status().as_u16();
    let body = res.text().await.expect("unreadable body");
    (status, body)
}

/// Form fields for a one-listener load balancer in a single zone.
#[allow(dead_code)]
pub fn create_request(name: &str) -> Vec<(&'static str, String)> {
    vec![
        ("Action", "CreateLoadBalancer".to_string()),
        ("LoadBalancerName", name.to_string()),
        ("AvailabilityZones.member.1", "us-east-1a".to_string()),
        ("Listeners.member.1.LoadBalancerPort", "80".to_string()),
        ("Listeners.member.1.InstancePort", "8080".to_string()),
        ("Listeners.member.1.Protocol", "http".to_string()),
        ("Listeners.member.1.InstanceProtocol", "http".to_string()),
    ]
}

/// Borrow owned fields as `&str` pairs.
#[allow(dead_code)]
pub fn borrowed<'a>(fields: &'a [(&'static str, String)]) -> Vec<(&'static str, &'a str)> {
    fields.iter().map(|(k, v)| (*k, v.as_str())).collect()
}
