use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use hn::api::hn::HnApi;
use hn::app::cache::StoryCache;
use hn::app::config::{Config, PathOpt, StrOpt, USizeOpt};
use hn::env::Env;
use hn::fs::Fs;
use hn::log::{Log, LogLevel};
use hn::net::Net;
use hn::server::{self, AppState};
use hn::utils::install_panic_hook;

use hn::{ArcPath, ArcStr};

#[derive(Parser)]
#[command(name = "hn")]
#[command(about = "A caching proxy for the Hacker News top stories")]
struct Cli {
    /// Path to the configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Address to listen on, overriding the configured one
    #[arg(long)]
    listen: Option<String>,
    /// Minimum level of log messages printed to stderr on exit
    #[arg(long)]
    log_level: Option<LogLevel>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    install_panic_hook()?;

    let cli = Cli::parse();

    // Initialize actors
    let env = Env::spawn();
    let fs = Fs::spawn();

    let config_path = match &cli.config {
        Some(path) => ArcPath::from(path.as_path()),
        None => default_config_path(&env).await?,
    };

    let config = Config::spawn(fs.clone(), config_path);
    let res = config.load().await;

    if res.is_err() {
        config.save().await?;
    }

    if let Some(listen) = cli.listen {
        config
            .set_str(StrOpt::ListenAddr, ArcStr::from(listen.as_str()))
            .await;
    }
    if let Some(level) = cli.log_level {
        config.set_log_level(level).await;
    }

    let log = Log::spawn(
        fs.clone(),
        config.log_level().await,
        config.usize(USizeOpt::MaxLogAge).await,
        config.path(PathOpt::LogDir).await,
    )
    .await?;
    log.collect_garbage().await;

    let net = Net::spawn(config.clone(), log.clone()).await?;
    let api = HnApi::spawn_with_base_url(net, config.str(StrOpt::ApiBaseUrl).await);
    let cache = StoryCache::spawn(api, config.clone(), log.clone());

    log.info("Starting the top stories service");

    let result = server::serve(AppState {
        cache,
        config,
        log: log.clone(),
    })
    .await;

    log.flush().await?;
    result
}

/// Resolves the configuration file location.
///
/// `$HN_CONFIG` wins when set, then `$XDG_CONFIG_HOME/hn/config.toml`, then
/// `$HOME/.config/hn/config.toml`.
async fn default_config_path(env: &Env) -> anyhow::Result<ArcPath> {
    if let Ok(path) = env.env(ArcStr::from("HN_CONFIG")).await {
        return Ok(ArcPath::from(Path::new(path.as_ref())));
    }

    let base = match env.env(ArcStr::from("XDG_CONFIG_HOME")).await {
        Ok(dir) => PathBuf::from(dir.as_ref()),
        Err(_) => {
            let home = env
                .env(ArcStr::from("HOME"))
                .await
                .context("Neither $XDG_CONFIG_HOME nor $HOME is set")?;
            Path::new(home.as_ref()).join(".config")
        }
    };

    Ok(ArcPath::from(base.join("hn").join("config.toml").as_path()))
}
