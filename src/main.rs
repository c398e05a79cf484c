// src/main.rs

use triggerd::errors::TriggerdError;
use triggerd::{cli, logging, run};

#[tokio::main]
async fn main() {
    if let Err(err) = run_main().await {
        eprintln!("triggerd error: {err}");
        if matches!(err, TriggerdError::NoTargets) {
            eprintln!("Try 'triggerd --help' for more information.");
        }
        std::process::exit(1);
    }
}

async fn run_main() -> triggerd::errors::Result<()> {
    let args = cli::parse();
    let log = logging::init_logging(args.log_level, args.verbose, args.log_file.as_deref())?;
    run(args, log).await
}
