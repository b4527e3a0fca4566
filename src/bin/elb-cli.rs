use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "elb-cli")]
#[command(about = "Client for a running ELB simulator", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://127.0.0.1:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a load balancer with a single listener
    Create {
        name: String,
        #[arg(long, default_value = "us-east-1a", conflicts_with = "subnet")]
        zone: Option<String>,
        #[arg(long)]
        subnet: Option<String>,
        #[arg(long, default_value = "http")]
        protocol: String,
        #[arg(long, default_value_t = 80)]
        port: u16,
        #[arg(long, default_value = "http")]
        instance_protocol: String,
        #[arg(long, default_value_t = 8080)]
        instance_port: u16,
    },
    /// Delete a load balancer
    Delete { name: String },
    /// Describe load balancers (all when no name is given)
    Describe { names: Vec<String> },
    /// Register instances with a load balancer
    Register { name: String, instances: Vec<String> },
    /// Deregister instances from a load balancer
    Deregister { name: String, instances: Vec<String> },
    /// Describe instance health behind a load balancer
    Health { name: String, instances: Vec<String> },
    /// Configure a load balancer's health check
    ConfigureHealthCheck {
        name: String,
        #[arg(long)]
        target: String,
        #[arg(long, default_value_t = 10)]
        healthy_threshold: u32,
        #[arg(long, default_value_t = 2)]
        unhealthy_threshold: u32,
        #[arg(long, default_value_t = 30)]
        interval: u32,
        #[arg(long, default_value_t = 5)]
        timeout: u32,
    },
    /// Show simulator status and model contents
    Status,
}

fn members(list: &str, field: Option<&str>, values: &[String]) -> Vec<(String, String)> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let key = match field {
                Some(field) => format!("{}.member.{}.{}", list, i + 1, field),
                None => format!("{}.member.{}", list, i + 1),
            };
            (key, v.clone())
        })
        .collect()
}

fn action_form(command: Commands) -> Vec<(String, String)> {
    let pair = |k: &str, v: String| (k.to_string(), v);
    match command {
        Commands::Create { name, zone, subnet, protocol, port, instance_protocol, instance_port } => {
            let mut form = vec![
                pair("Action", "CreateLoadBalancer".into()),
                pair("LoadBalancerName", name),
                pair("Listeners.member.1.Protocol", protocol),
                pair("Listeners.member.1.LoadBalancerPort", port.to_string()),
                pair("Listeners.member.1.InstanceProtocol", instance_protocol),
                pair("Listeners.member.1.InstancePort", instance_port.to_string()),
            ];
            match subnet {
                Some(subnet) => form.push(pair("Subnets.member.1", subnet)),
                None => form.extend(zone.map(|z| pair("AvailabilityZones.member.1", z))),
            }
            form
        }
        Commands::Delete { name } => vec![
            pair("Action", "DeleteLoadBalancer".into()),
            pair("LoadBalancerName", name),
        ],
        Commands::Describe { names } => {
            let mut form = vec![pair("Action", "DescribeLoadBalancers".into())];
            form.extend(members("LoadBalancerNames", None, &names));
            form
        }
        Commands::Register { name, instances } => {
            let mut form = vec![
                pair("Action", "RegisterInstancesWithLoadBalancer".into()),
                pair("LoadBalancerName", name),
            ];
            form.extend(members("Instances", Some("InstanceId"), &instances));
            form
        }
        Commands::Deregister { name, instances } => {
            let mut form = vec![
                pair("Action", "DeregisterInstancesFromLoadBalancer".into()),
                pair("LoadBalancerName", name),
            ];
            form.extend(members("Instances", Some("InstanceId"), &instances));
            form
        }
        Commands::Health { name, instances } => {
            let mut form = vec![
                pair("Action", "DescribeInstanceHealth".into()),
                pair("LoadBalancerName", name),
            ];
            form.extend(members("Instances", Some("InstanceId"), &instances));
            form
        }
        Commands::ConfigureHealthCheck {
            name,
            target,
            healthy_threshold,
            unhealthy_threshold,
            interval,
            timeout,
        } => vec![
            pair("Action", "ConfigureHealthCheck".into()),
            pair("LoadBalancerName", name),
            pair("HealthCheck.Target", target),
            pair("HealthCheck.HealthyThreshold", healthy_threshold.to_string()),
            pair("HealthCheck.UnhealthyThreshold", unhealthy_threshold.to_string()),
            pair("HealthCheck.Interval", interval.to_string()),
            pair("HealthCheck.Timeout", timeout.to_string()),
        ],
        Commands::Status => Vec::new(),
    }
}

fn encode(form: &[(String, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(form)
        .finish()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/').to_string();

    let res = match cli.command {
        Commands::Status => {
            let status = client.get(format!("{}/admin/status", base)).send().await?;
            print_response(status).await?;
            client.get(format!("{}/admin/state", base)).send().await?
        }
        command => {
            client
                .post(format!("{}/", base))
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(encode(&action_form(command)))
                .send()
                .await?
        }
    };
    print_response(res).await?;
    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    if !status.is_success() {
        eprintln!("Error: simulator returned status {}", status);
        eprintln!("{}", text);
        std::process::exit(1);
    }
    println!("{}", text);
    Ok(())
}
