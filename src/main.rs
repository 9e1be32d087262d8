//! access-check - evaluate a configured gate against an actor profile
//!
//! Exits 0 when authorized, 1 when unauthorized and 2 on errors.

use clap::Parser;
use clinic_access::auth::{HttpProfileSource, ProfileSource, SessionTokens, StaticProfileSource};
use clinic_access::utils::init_logging;
use clinic_access::{AccessDecision, AuthorizationGate, Config, ProfileCache, SessionContext};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Parser)]
#[command(name = "access-check", version, about = "Check a gate policy against an actor profile")]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "ACCESS_CONFIG", default_value = "config/access.yaml")]
    config: PathBuf,

    /// Name of the gate to evaluate
    #[arg(short, long)]
    gate: String,

    /// Read the actor profile from a JSON file
    #[arg(short, long, conflicts_with = "live")]
    profile: Option<PathBuf>,

    /// Fetch the actor profile from the configured backend
    #[arg(long)]
    live: bool,

    /// Access token for the backend
    #[arg(long, env = "ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// Refresh token for the backend
    #[arg(long, env = "ACCESS_REFRESH_TOKEN", hide_env_values = true)]
    refresh_token: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    match run(args).await {
        Ok(AccessDecision::Authorized) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

async fn run(args: Args) -> clinic_access::Result<AccessDecision> {
    let config = Config::from_file(&args.config).await?;
    init_logging(config.logging())?;

    let policy = config.gate(&args.gate)?.clone();
    let source = build_source(&args, &config).await?;
    let session = SessionContext::new(
        "access-check",
        source,
        ProfileCache::from_config(config.profile()),
    );

    let gate: AuthorizationGate = AuthorizationGate::new(policy);
    let decision = gate.resolve(&session).await;
    debug!("Final profile state: {:?}", session.state());

    info!("Gate '{}': {}", args.gate, decision);
    println!("{}", decision);
    Ok(decision)
}

async fn build_source(
    args: &Args,
    config: &Config,
) -> clinic_access::Result<Arc<dyn ProfileSource>> {
    if let Some(path) = &args.profile {
        return Ok(Arc::new(StaticProfileSource::from_file(path).await?));
    }

    if args.live {
        let source = HttpProfileSource::new(config.profile())?;
        if let Some(token) = &args.access_token {
            source.login(SessionTokens::new(token.clone(), args.refresh_token.clone()));
        }
        return Ok(Arc::new(source));
    }

    Ok(Arc::new(StaticProfileSource::anonymous()))
}
