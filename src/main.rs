use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crew_planner::api;
use crew_planner::config::{Config, DatabaseArgs, ServeArgs};
use planner_core::Database;

#[derive(Parser)]
#[command(name = "crew-planner")]
#[command(about = "Monthly crew visit planner with spreadsheet export")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server (default)
    Serve(ServeArgs),
    /// Create the database (from the template, if given) and apply the schema
    InitDb(DatabaseArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| {
                "crew_planner=debug,planner_core=info,tower_http=debug".into()
            }),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve(args)) => serve(args.into_config()).await?,
        Some(Commands::InitDb(args)) => {
            let db = Database::new(args.resolve())?;
            db.migrate()?;
            println!("Database ready at {}", db.path().display());
        }
        None => serve(cli.serve.into_config()).await?,
    }

    Ok(())
}

async fn serve(config: Config) -> anyhow::Result<()> {
    tracing::info!("Using database {}", config.database.path.display());
    let db = Database::new(config.database)?;
    db.migrate()?;

    let app = api::create_router(api::AppState::new(db, config.export));

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("crew-planner listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
