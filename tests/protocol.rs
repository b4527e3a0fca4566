//! End-to-end protocol tests against a live simulator.

use std::time::Duration;

use elb_sim::SimulatorConfig;
use tokio::net::TcpStream;

mod common;
use common::{borrowed, create_request, post_action, start_server, start_server_with};

async fn create(server: &elb_sim::ElbServer, name: &str) -> (u16, String) {
    let fields = create_request(name);
    post_action(server, &borrowed(&fields)).await
}

#[tokio::test]
async fn test_create_returns_deterministic_dns_name() {
    let server = start_server().await;

    let (status, body) = create(&server, "test-lb").await;
    assert_eq!(status, 200);
    assert!(body.contains("<DNSName>test-lb-some-aws-stuff.us-east-1.elb.amazonaws.com</DNSName>"));

    let (status, body) = post_action(&server, &[("Action", "DescribeLoadBalancers")]).await;
    assert_eq!(status, 200);
    assert_eq!(body.matches("<LoadBalancerName>").count(), 1);
    assert!(body.contains("<LoadBalancerName>test-lb</LoadBalancerName>"));
    assert!(body.contains("<DNSName>test-lb-some-aws-stuff.us-east-1.elb.amazonaws.com</DNSName>"));
    assert!(body.contains("<Protocol>HTTP</Protocol>"));
    assert!(body.contains("<Scheme>internet-facing</Scheme>"));

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_register_and_describe_instance_health() {
    let server = start_server().await;
    create(&server, "test-lb").await;
    let a = server.new_instance();
    let b = server.new_instance();

    let (status, body) = post_action(
        &server,
        &[
            ("Action", "RegisterInstancesWithLoadBalancer"),
            ("LoadBalancerName", "test-lb"),
            ("Instances.member.1.InstanceId", a.as_str()),
            ("Instances.member.2.InstanceId", b.as_str()),
        ],
    )
    .await;
    assert_eq!(status, 200);
    assert!(body.contains(&format!("<InstanceId>{}</InstanceId>", a)));
    assert!(body.contains(&format!("<InstanceId>{}</InstanceId>", b)));

    let (status, body) = post_action(
        &server,
        &[
            ("Action", "DescribeInstanceHealth"),
            ("LoadBalancerName", "test-lb"),
            ("Instances.member.1.InstanceId", a.as_str()),
            ("Instances.member.2.InstanceId", b.as_str()),
        ],
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body.matches("<State>OutOfService</State>").count(), 2);
    assert_eq!(body.matches("<ReasonCode>Instance</ReasonCode>").count(), 2);
}

#[tokio::test]
async fn test_zones_and_subnets_are_exclusive() {
    let server = start_server().await;
    let mut fields = create_request("test-lb");
    fields.push(("Subnets.member.1", "subnet-1".to_string()));

    let (status, body) = post_action(&server, &borrowed(&fields)).await;
    assert_eq!(status, 400);
    assert!(body.contains("<Code>ValidationError</Code>"));
    assert!(body.contains(
        "<Message>Only one of AvailabilityZones.member.1 or Subnets.member.1 may be specified</Message>"
    ));
}

#[tokio::test]
async fn test_describe_unknown_load_balancer() {
    let server = start_server().await;
    let (status, body) = post_action(
        &server,
        &[("Action", "DescribeLoadBalancers"), ("LoadBalancerNames.member.1", "never-created")],
    )
    .await;
    assert_eq!(status, 400);
    assert!(body.contains("<Code>LoadBalancerNotFound</Code>"));
}

#[tokio::test]
async fn test_delete_then_reference_fails() {
    let server = start_server().await;
    create(&server, "web").await;
    let id = server.new_instance();

    for _ in 0..2 {
        let (status, _) =
            post_action(&server, &[("Action", "DeleteLoadBalancer"), ("LoadBalancerName", "web")]).await;
        assert_eq!(status, 200);
    }

    let (status, body) = post_action(
        &server,
        &[
            ("Action", "RegisterInstancesWithLoadBalancer"),
            ("LoadBalancerName", "web"),
            ("Instances.member.1.InstanceId", id.as_str()),
        ],
    )
    .await;
    assert_eq!(status, 400);
    assert!(body.contains("<Code>LoadBalancerNotFound</Code>"));

    let (_, body) = post_action(&server, &[("Action", "DescribeLoadBalancers")]).await;
    assert!(!body.contains("<LoadBalancerName>web</LoadBalancerName>"));
}

#[tokio::test]
async fn test_unknown_instance_is_reported_first() {
    let server = start_server().await;
    create(&server, "web").await;
    let id = server.new_instance();

    let (status, body) = post_action(
        &server,
        &[
            ("Action", "DeregisterInstancesFromLoadBalancer"),
            ("LoadBalancerName", "web"),
            ("Instances.member.1.InstanceId", id.as_str()),
            ("Instances.member.2.InstanceId", "i-500"),
            ("Instances.member.3.InstanceId", "i-501"),
        ],
    )
    .await;
    assert_eq!(status, 400);
    assert!(body.contains("<Code>InvalidInstance</Code>"));
    assert!(body.contains("i-500"));
    assert!(!body.contains("i-501"));

    server.remove_instance(&id);
    let (status, _) = post_action(
        &server,
        &[
            ("Action", "DeregisterInstancesFromLoadBalancer"),
            ("LoadBalancerName", "web"),
            ("Instances.member.1.InstanceId", id.as_str()),
        ],
    )
    .await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_configure_health_check_targets() {
    let server = start_server().await;
    server.new_load_balancer("web");

    for (target, expected) in [("bogus", 400), ("HTTP:80", 400), ("HTTP:80/ping", 200)] {
        let (status, body) = post_action(
            &server,
            &[
                ("Action", "ConfigureHealthCheck"),
                ("LoadBalancerName", "web"),
                ("HealthCheck.HealthyThreshold", "3"),
                ("HealthCheck.UnhealthyThreshold", "2"),
                ("HealthCheck.Interval", "10"),
                ("HealthCheck.Timeout", "5"),
                ("HealthCheck.Target", target),
            ],
        )
        .await;
        assert_eq!(status, expected, "target {}", target);
        if expected == 200 {
            assert!(body.contains("<Target>HTTP:80/ping</Target>"));
        }
    }
}

#[tokio::test]
async fn test_unrecognized_action() {
    let server = start_server().await;
    let (status, body) = post_action(&server, &[("Action", "LaunchRockets")]).await;
    assert_eq!(status, 400);
    assert!(body.contains("<Code>InvalidParameterValue</Code>"));
    assert!(body.contains("Unrecognized Action"));
}

#[tokio::test]
async fn test_action_in_query_string() {
    let server = start_server().await;
    server.new_load_balancer("legacy");
    let res = reqwest::Client::new()
        .get(format!("{}/?Action=DescribeLoadBalancers", server.url()))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body = res.text().await.unwrap();
    assert!(body.contains("<DNSName>legacy-some-aws-stuff.sa-east-1.amazonaws.com</DNSName>"));
    assert!(body.contains("<member>us-east-1a</member>"));
}

#[tokio::test]
async fn test_concurrent_creates_are_serialized() {
    let server = start_server().await;
    let url = server.url();

    let mut tasks = Vec::new();
    for i in 0..20 {
        let url = url.clone();
        tasks.push(tokio::spawn(async move {
            let name = format!("lb-{}", i);
            let fields = create_request(&name);
            reqwest::Client::new()
                .post(url)
                .form(&borrowed(&fields))
                .send()
                .await
                .unwrap()
                .status()
                .as_u16()
        }));
    }
    for task in tasks {
        assert_eq!(task.await.unwrap(), 200);
    }

    let (_, body) = post_action(&server, &[("Action", "DescribeLoadBalancers")]).await;
    assert_eq!(body.matches("<LoadBalancerName>").count(), 20);

    // 20 creates + this describe took req0..req14 (hex).
    let (_, body) = post_action(&server, &[("Action", "DeleteLoadBalancer"), ("LoadBalancerName", "x")]).await;
    assert!(body.contains("<RequestId>req15</RequestId>"));
}

#[tokio::test]
async fn test_seeded_state_from_config() {
    let mut config = SimulatorConfig::default();
    config.seed.instances = 2;
    config.seed.load_balancers = vec!["seeded".into()];
    let server = start_server_with(config).await;

    let (status, body) = post_action(
        &server,
        &[
            ("Action", "DescribeInstanceHealth"),
            ("LoadBalancerName", "seeded"),
            ("Instances.member.1.InstanceId", "i-1"),
            ("Instances.member.2.InstanceId", "i-2"),
        ],
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body.matches("<InstanceId>").count(), 2);
}

#[tokio::test]
async fn test_stop_closes_listener() {
    let server = start_server().await;
    let addr = server.local_addr();
    assert!(TcpStream::connect(addr).await.is_ok());

    server.stop().await.unwrap();
    assert!(TcpStream::connect(addr).await.is_err());
}

#[tokio::test]
async fn test_drop_closes_listener() {
    let server = start_server().await;
    let addr = server.local_addr();
    assert!(TcpStream::connect(addr).await.is_ok());

    drop(server);
    let mut closed = false;
    for _ in 0..50 {
        if TcpStream::connect(addr).await.is_err() {
            closed = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(closed, "listener still accepting after drop");
}
