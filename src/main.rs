use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use golf_league::args::{self, types::MEMORY_DB};
use golf_league::controller::{self, prefill::db_prefill};
use golf_league::db::{LeagueDb, MemoryDb, SqliteDb};

#[actix_web::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = args::args_checks()?;

    let db: Arc<dyn LeagueDb> = if args.db_name == MEMORY_DB {
        Arc::new(MemoryDb::new())
    } else {
        Arc::new(
            SqliteDb::open(&args.db_name)
                .with_context(|| format!("open database {}", args.db_name))?,
        )
    };

    if let Some(seed) = &args.db_populate_json {
        match db_prefill(seed, db.as_ref()).await {
            Ok(ids) => info!(count = ids.len(), "database prefilled"),
            Err(e) => {
                error!("prefill failed: {e:#}");
                return Err(e);
            }
        }
    }

    let data: Data<dyn LeagueDb> = Data::from(db);
    info!(bind = %args.bind, port = args.port, "starting league admin");
    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .configure(controller::configure)
    })
    .bind((args.bind.as_str(), args.port))?
    .run()
    .await?;
    Ok(())
}
