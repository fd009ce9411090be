use azure_nic_ip::config::Args;
use azure_nic_ip::logging::init_logging;
use clap::Parser;
use colored::Colorize;

#[tokio::main]
async fn main() {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let args = Args::parse();
    if let Err(e) = init_logging(args.log_level()) {
        eprintln!("Error initializing log4rs: {e}");
    }
    log::info!("#Start main()");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = azure_nic_ip::run(&args, &mut out).await {
        log::error!("{e}");
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}
