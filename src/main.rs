// src/main.rs

use watchjob::{cli, logging};

#[tokio::main]
async fn main() {
    let args = cli::parse();
    if let Err(err) = logging::init_logging(args.log_level, args.verbose) {
        eprintln!("watchjob error: {err:?}");
        std::process::exit(1);
    }

    match watchjob::run(args).await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("watchjob error: {err:?}");
            std::process::exit(1);
        }
    }
}
