use clap::{App, Arg};
use hostelites_server::server::{ServerConfig, ServerNode, DEFAULT_JSON_LIMIT_KIB, DEFAULT_PORT};
use std::net::IpAddr;

fn setup_logger(level: log::LevelFilter, log_file: &str) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout())
        .chain(fern::log_file(log_file)?)
        .apply()?;
    Ok(())
}

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    let default_port =
        std::env::var("HOSTELITES_PORT").unwrap_or_else(|_| DEFAULT_PORT.to_string());
    let default_json_limit = DEFAULT_JSON_LIMIT_KIB.to_string();
    let matches = App::new("hostelites-server")
        .version("0.1")
        .about("Serves an in-memory hostel registry over a JSON REST API")
        .arg(
            Arg::new("address")
                .long("address")
                .takes_value(true)
                .default_value("0.0.0.0")
                .help("Address to bind the HTTP server to"),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .takes_value(true)
                .default_value(&default_port)
                .help("Port to listen on (env HOSTELITES_PORT)"),
        )
        .arg(
            Arg::new("json_limit")
                .long("json-limit")
                .takes_value(true)
                .default_value(&default_json_limit)
                .help("Maximum JSON request body size in KiB"),
        )
        .arg(
            Arg::new("log_file")
                .long("log-file")
                .takes_value(true)
                .default_value("hostelites.log")
                .help("File that receives a copy of the log"),
        )
        .arg(
            Arg::new("log_level")
                .long("log-level")
                .takes_value(true)
                .default_value("info")
                .possible_values(["off", "error", "warn", "info", "debug", "trace"])
                .help("Log verbosity"),
        )
        .arg(
            Arg::new("seed_sample")
                .long("seed-sample")
                .help("Start with the sample hostel already registered"),
        )
        .get_matches();

    let level = matches
        .value_of("log_level")
        .unwrap_or("info")
        .parse::<log::LevelFilter>()
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;
    let log_file = matches.value_of("log_file").unwrap_or("hostelites.log");
    setup_logger(level, log_file)?;

    let config = ServerConfig {
        address: matches.value_of("address").unwrap_or("0.0.0.0").parse::<IpAddr>()?,
        port: matches.value_of("port").unwrap_or_default().parse::<u16>()?,
        json_limit_kib: matches.value_of("json_limit").unwrap_or_default().parse::<u64>()?,
        seed_sample: matches.is_present("seed_sample"),
    };
    log::info!("Starting hostelites on {}:{}", config.address, config.port);

    let server_node = ServerNode::new(config);
    let _ = server_node.build().launch().await?;
    Ok(())
}
