use clap::Parser;
use docker_graphite::config::Config;

/// Entry point for the Docker Graphite metrics reporter.
///
/// The log level defaults to `info`, or `debug` with `--debug`; `RUST_LOG`
/// overrides both.
///
/// # Examples
///
/// ```bash
/// docker-graphite --host graphite.local --prefix containers.metrics
/// ```
#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    let default_filter = if config.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
    docker_graphite::run(config).await
}
