use std::{io::Write, sync::Arc};

use clap::Parser;
use color_eyre::Result;
use env_logger::{Builder, Target};
use log::info;

mod catalog;
mod cli;
mod error;
mod routes;
mod server;
mod upstream;

use crate::{
    catalog::{FixtureCatalog, UpstreamCatalog},
    routes::SharedCatalog,
    upstream::HttpDndApi,
};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();
    Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{}:L{} [{}] - {}",
                record.file().unwrap_or("Unknown File"),
                record.line().unwrap_or(0),
                record.level(),
                record.args()
            )
        })
        .target(Target::Stderr)
        .init();

    let args = cli::Args::parse();

    let catalog: SharedCatalog = if args.mock {
        info!("Serving fixture data");
        Arc::new(FixtureCatalog::default())
    } else {
        info!("Proxying {}", args.upstream_url);
        let api = Arc::new(HttpDndApi::new(&args.upstream_url));
        Arc::new(UpstreamCatalog::new(api, args.sample_size))
    };

    let app = server::app(catalog, &args.cors_origin);
    server::run_server(&format!("{}:{}", args.host, args.port), app).await?;
    Ok(())
}
