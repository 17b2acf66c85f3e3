use clap::{Arg, ArgAction, Command};
use colored::Colorize;
use std::process;

use portpulse::{
    config::ProbeConfig,
    output::{OutputConfig, OutputFormat, OutputManager},
    scanner::engine::ScanEngine,
    utils::scan_options::ScanOrder,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = Command::new("portpulse")
        .version(env!("CARGO_PKG_VERSION"))
        .about("TCP/UDP port reachability prober for cooperating echo endpoints")
        .arg(
            Arg::new("target")
                .value_name("TARGET")
                .help("Host to probe (IP or hostname). Default is 127.0.0.1")
                .index(1),
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .help("First TCP/UDP port of the range. Default is 6030")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("max-port")
                .short('m')
                .long("max-port")
                .value_name("PORT")
                .help("End of the port range, exclusive. Default is 6060")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("MS")
                .help("Bound for each connect/send/receive wait in milliseconds")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("concurrency")
                .short('c')
                .long("concurrency")
                .value_name("COUNT")
                .help("Number of ports probed concurrently")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("order")
                .long("order")
                .value_name("ORDER")
                .help("Port ordering")
                .value_parser(["serial", "random"]),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .help("Report format")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Write the report to a file instead of stdout"),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .help("Disable colored output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Include reply text and timings in the report")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    // Config file first, CLI flags override
    let mut config = ProbeConfig::load_default_config();
    if let Some(target) = matches.get_one::<String>("target") {
        config.host = target.clone();
    }
    if let Some(port) = matches.get_one::<u16>("port") {
        config.port = *port;
    }
    if let Some(max_port) = matches.get_one::<u16>("max-port") {
        config.max_port = *max_port;
    }
    if let Some(timeout) = matches.get_one::<u64>("timeout") {
        config.timeout = *timeout;
    }
    if let Some(concurrency) = matches.get_one::<usize>("concurrency") {
        config.concurrency = *concurrency;
    }
    if let Some(order) = matches.get_one::<String>("order") {
        config.scan_order = ScanOrder::from_str(order).unwrap_or_default();
    }

    println!(
        "host: {}\tport: {}\tmax_port: {}\n",
        config.host, config.port, config.max_port
    );

    // Configuration problems are the only non-zero exits; per-port
    // failures are reported in the results and exit 0.
    let engine = match ScanEngine::new(config).await {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("{} {}", "[!]".bright_red(), e);
            process::exit(1);
        }
    };

    let cancel = engine.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupt received, aborting scan");
            cancel.cancel();
        }
    });

    let report = engine.scan().await?;

    let output_config = OutputConfig {
        format: matches
            .get_one::<String>("format")
            .map(|s| s.parse().unwrap())
            .unwrap_or(OutputFormat::Text),
        file: matches.get_one::<String>("output").cloned(),
        colored: !matches.get_flag("no-color"),
        verbose: matches.get_flag("verbose"),
    };

    OutputManager::new(output_config).write_report(&report)?;

    Ok(())
}
