use std::process;
use std::time::Duration;

use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use log::{error, info};

use media_gateway::config::{Backend, Operation, Phase};
use media_gateway::{config_loader, configure, cors, Gateway, GatewayConfigValidator};

/// Public endpoints and the upstream operation each one forwards to
const ENDPOINTS: [(&str, &str, Operation); 6] = [
    ("POST", "/api/conversion/post", Operation::new(Backend::Conversion, Phase::Submit)),
    ("GET", "/api/conversion/status/:id", Operation::new(Backend::Conversion, Phase::Status)),
    ("GET", "/api/conversion/get/:id", Operation::new(Backend::Conversion, Phase::Result)),
    ("POST", "/api/subtitles/post", Operation::new(Backend::Subtitles, Phase::Submit)),
    ("GET", "/api/subtitles/status/:id", Operation::new(Backend::Subtitles, Phase::Status)),
    ("GET", "/api/subtitles/get/:id", Operation::new(Backend::Subtitles, Phase::Result)),
];

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // Documentation helpers exit before anything else happens
    if let Some(flag) = std::env::args().nth(1) {
        match flag.as_str() {
            "--print-config" => {
                print!("{}", GatewayConfigValidator::generate_sample_config());
                return Ok(());
            }
            "--print-config-docs" => {
                print!("{}", GatewayConfigValidator::generate_config_documentation());
                return Ok(());
            }
            other => {
                error!("Unknown argument: {}", other);
                process::exit(2);
            }
        }
    }

    // Load configuration file into the environment, then validate everything
    config_loader::load_config();
    let config = match GatewayConfigValidator::validate_and_load() {
        Ok(config) => config,
        Err(_) => {
            error!("Refusing to start with an invalid configuration");
            process::exit(1);
        }
    };

    let bind_address = config.bind_address();
    let workers = config.worker_count();
    let keep_alive = Duration::from_secs(config.keepalive);
    let client_timeout = Duration::from_secs(config.client_timeout);

    let gateway = Gateway::new(config).map_err(std::io::Error::other)?;

    info!("Starting Media Gateway on http://{}", bind_address);
    info!("Workers: {}", workers);
    match gateway.status().limits.upstream_timeout {
        Some(secs) => info!("Upstream timeout: {}s", secs),
        None => info!("Upstream timeout: disabled"),
    }
    info!("Endpoints:");
    for (method, path, operation) in ENDPOINTS {
        info!(
            "  {:<4} {:<28} -> {}",
            method,
            path,
            gateway.upstreams().target(operation).url()
        );
    }

    let gateway = web::Data::new(gateway);

    HttpServer::new(move || {
        App::new()
            .wrap(cors())
            .wrap(Logger::default())
            .app_data(gateway.clone())
            .configure(configure)
    })
    .workers(workers)
    .bind(bind_address)?
    .client_disconnect_timeout(client_timeout)
    .keep_alive(keep_alive)
    .run()
    .await
}
