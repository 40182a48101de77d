pub mod args;
pub mod reporter;

pub use args::{Cli, Command};
pub use reporter::ResultFormatter;

use std::io::{self, Read};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use crate::error::Nl2SqlError;
use crate::generator::{Credentials, ProviderRouter};
use crate::models::SchemaInfo;

/// Install the stderr log subscriber. `RUST_LOG` wins over the verbosity flags.
pub fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(cli.is_debug())
        .with_writer(io::stderr)
        .try_init();
}

pub struct CliHandler {
    cli: Cli,
}

impl CliHandler {
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    pub async fn run(&self) -> Result<i32, Nl2SqlError> {
        let router = ProviderRouter::new(Credentials::from_env(), &self.cli.generator_config());
        let output = self.run_with_router(&router).await?;
        println!("{}", output);
        Ok(0)
    }

    /// Execute the selected subcommand and return the rendered output.
    pub async fn run_with_router(&self, router: &ProviderRouter) -> Result<String, Nl2SqlError> {
        debug!(credentials = ?router.credentials(), "credentials resolved");

        let schema = self.load_schema()?;
        info!(tables = schema.table_count(), "schema loaded");

        let formatter = ResultFormatter::new(&self.cli);

        match self.cli.query_request() {
            Some(request) => {
                let sql = router.route_sql(&request, &schema).await?;
                formatter.format_sql(&request, &sql)
            }
            None => {
                let question = router.route_question(&schema).await?;
                formatter.format_question(&question)
            }
        }
    }

    fn load_schema(&self) -> Result<SchemaInfo, Nl2SqlError> {
        match &self.cli.schema {
            None => Ok(SchemaInfo::new()),
            Some(_) if self.cli.reads_schema_from_stdin() => {
                let mut buffer = String::new();
                io::stdin().read_to_string(&mut buffer)?;
                SchemaInfo::from_json(&buffer)
            }
            Some(path) => {
                debug!(path = %path.display(), "reading schema file");
                SchemaInfo::from_file(path)
            }
        }
    }
}
