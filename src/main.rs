use clap::Parser;

use apigrant::{GatewayConfig, GrantError};

#[derive(Parser)]
#[command(name = "apigrant")]
#[command(version)]
#[command(
    about = "Grant an application access to named APIs via the gateway control plane",
    long_about = "Resolves the application name, API-group name, and API names to their \
service identifiers, then issues one permanent access grant binding them.\n\n\
Credentials are read from the `access_key_id` and `access_key_secret` environment \
variables.\n\nExit codes: 3 application lookup, 4 group lookup, 5 API lookup, \
6 authorization, 7 configuration."
)]
struct Cli {
    /// Gateway endpoint, e.g. apigateway.cn-hangzhou.aliyuncs.com
    #[arg(long)]
    endpoint: String,
    /// Name of the application receiving access
    #[arg(long)]
    app_name: String,
    /// Name of the API group the APIs belong to
    #[arg(long)]
    group_name: String,
    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
    /// Names of the APIs to authorize, in order
    #[arg(required = true)]
    api_names: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    let result = GatewayConfig::with_timeout(&cli.endpoint, cli.timeout_secs)
        .and_then(|config| apigrant::grant_access(&config, &cli.app_name, &cli.group_name, &cli.api_names));

    match result {
        Ok(ack) => {
            println!(
                "✅ Granted '{}' permanent access to {} API(s) in group '{}'",
                cli.app_name,
                cli.api_names.len(),
                cli.group_name
            );
            println!("Request id: {}", ack.request_id);
        }
        Err(e) => {
            report_error(&e);
            std::process::exit(e.exit_code());
        }
    }
}

fn report_error(error: &GrantError) {
    use std::error::Error as _;

    eprintln!("Error: {error}");
    let mut source = error.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}
