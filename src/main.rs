use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use async_graphql::{Request, Variables};

use podcast_catalog::config::Config;
use podcast_catalog::db::Store;
use podcast_catalog::error::Result;
use podcast_catalog::graphql::{build_schema, sdl};

const USAGE: &str = "usage: podcast-catalog [--config PATH] [--db PATH] [--vars JSON] <DOCUMENT | ->
       podcast-catalog --schema";

#[derive(Debug, Default, PartialEq)]
struct Args {
    config: Option<PathBuf>,
    db: Option<String>,
    vars: Option<String>,
    document: Option<String>,
    print_schema: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--schema" => parsed.print_schema = true,
            "--config" | "--db" | "--vars" => {
                let value = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("{} needs a value\n{}", arg, USAGE))?;
                match arg.as_str() {
                    "--config" => parsed.config = Some(PathBuf::from(value)),
                    "--db" => parsed.db = Some(value),
                    _ => parsed.vars = Some(value),
                }
            }
            "-h" | "--help" => return Err(anyhow::anyhow!(USAGE).into()),
            _ if parsed.document.is_none() => parsed.document = Some(arg),
            _ => return Err(anyhow::anyhow!("unexpected argument {}\n{}", arg, USAGE).into()),
        }
    }

    if !parsed.print_schema && parsed.document.is_none() {
        return Err(anyhow::anyhow!(USAGE).into());
    }
    Ok(parsed)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = parse_args(std::env::args().skip(1))?;

    if args.print_schema {
        println!("{}", sdl());
        return Ok(ExitCode::SUCCESS);
    }

    // Load configuration
    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Initialize logging; RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let db_path = args.db.unwrap_or(config.db_path);
    let store = Store::open(&db_path).await?;
    let schema = build_schema(store);

    let document = match args.document.as_deref() {
        Some("-") | None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
        Some(doc) => doc.to_string(),
    };

    let mut request = Request::new(document);
    if let Some(vars) = args.vars {
        let value: serde_json::Value = serde_json::from_str(&vars)?;
        request = request.variables(Variables::from_json(value));
    }

    let response = schema.execute(request).await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    if response.is_err() {
        tracing::debug!("Request finished with {} errors", response.errors.len());
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
