use nl2sql::cli::{init_logging, Cli, CliHandler, ResultFormatter};
use std::process;

#[tokio::main]
async fn main() {
    // Pick up API keys from a local .env before anything reads the environment
    let _ = dotenvy::dotenv();

    let cli = match Cli::parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("❌ Argument parsing failed: {}", e);
            process::exit(e.exit_code());
        }
    };

    init_logging(&cli);

    let formatter = ResultFormatter::new(&cli);
    let handler = CliHandler::new(cli);

    let exit_code = match handler.run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", formatter.format_error(&e));
            e.exit_code()
        }
    };

    process::exit(exit_code);
}
