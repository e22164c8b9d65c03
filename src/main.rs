use clap::Parser;
use dictlite::cli::{self, messages::system_message, parsers::CliParser};
use log::error;
use tracing_subscriber::EnvFilter;

fn main() {
    // A missing .env file is fine, the environment may be set already.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let parser = CliParser::parse();

    if let Err(err) = cli::run(parser) {
        error!("{:?}", err);
        eprintln!("{}", system_message("error", err.to_string()));
        std::process::exit(1);
    }
}
