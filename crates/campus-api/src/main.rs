//! campus-api server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, and serves the course API over HTTP.
//!
//! # Password hash generation
//!
//! To generate the argon2 PHC string for `admin_password_hash` in
//! config.toml:
//!
//! ```
//! cargo run -p campus-api --bin server -- --hash-password
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use campus_api::{AppState, ServerConfig, auth::hash_password};
use campus_core::{
  service::CourseService,
  store::CourseStore as _,
  user::{NewUser, Role},
};
use campus_store_sqlite::SqliteStore;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Campus course platform server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Print the argon2 hash for a password entered on stdin and exit.
  #[arg(long)]
  hash_password: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Helper mode: hash a password and exit.
  if cli.hash_password {
    let password = read_password_from_stdin()?;
    let hash = hash_password(&password)
      .map_err(|e| anyhow::anyhow!("hashing failed: {e}"))?;
    println!("{hash}");
    return Ok(());
  }

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("CAMPUS"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Open SQLite store.
  let store = SqliteStore::open(&server_cfg.store_path)
    .await
    .with_context(|| {
      format!("failed to open store at {:?}", server_cfg.store_path)
    })?;
  let store = Arc::new(store);

  seed_admin(&store, &server_cfg).await?;

  // Build application state.
  let state = AppState {
    service: CourseService::new(store),
    config:  Arc::new(server_cfg.clone()),
  };

  let app = campus_api::router(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Insert the configured admin account if it is not registered yet.
/// Registration over HTTP refuses the admin role, so this is the only path
/// that creates one.
async fn seed_admin(
  store:  &Arc<SqliteStore>,
  config: &ServerConfig,
) -> anyhow::Result<()> {
  let (Some(email), Some(hash)) =
    (&config.admin_email, &config.admin_password_hash)
  else {
    return Ok(());
  };

  let created = store
    .create_user(NewUser {
      name:          config
        .admin_name
        .clone()
        .unwrap_or_else(|| "Administrator".to_string()),
      email:         email.clone(),
      password_hash: hash.clone(),
      role:          Role::Admin,
    })
    .await
    .context("failed to seed admin user")?;

  if created.is_some() {
    tracing::info!(%email, "seeded admin account");
  }
  Ok(())
}

/// Read a password from stdin.
fn read_password_from_stdin() -> anyhow::Result<String> {
  use std::io::{self, BufRead, Write};
  let stdin = io::stdin();
  print!("Password: ");
  io::stdout().flush().ok();
  let mut line = String::new();
  stdin.lock().read_line(&mut line)?;
  Ok(
    line
      .trim_end_matches('\n')
      .trim_end_matches('\r')
      .to_string(),
  )
}
