#![deny(warnings)]

use anyhow::Context;
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use textlens_core::config::{
    resolve_optional_string, resolve_string_with_default, Env, SourceLang, StdEnv, TargetLang,
    DEFAULT_SOURCE_LANG, DEFAULT_TARGET_LANG, ENV_ENDPOINTS, ENV_HISTORY_FILE, ENV_SOURCE_LANG,
    ENV_TARGET_LANG,
};
use textlens_core::gateway::{
    ProviderRegistry, RawEndpoint, TranslationGateway, TranslationRequest,
};
use textlens_core::history::{History, HistoryEntry};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "textlens")]
#[command(about = "Translate captured or typed text through a fallback cascade of public endpoints")]
struct Args {
    /// Text to translate; read from stdin when omitted.
    #[arg(long)]
    text: Option<String>,

    /// Source language hint (ISO code or "auto").
    #[arg(long)]
    source_lang: Option<String>,

    #[arg(long)]
    target_lang: Option<String>,

    /// Translation endpoint, repeatable; `URL` or `DIALECT=URL`
    /// (dialects: libre, google). Overrides the built-in list.
    #[arg(long = "endpoint")]
    endpoints: Vec<String>,

    /// JSON file the translation history is appended to.
    #[arg(long)]
    history_file: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    log_level: String,
}

struct CliConfig {
    source: SourceLang,
    target: TargetLang,
    registry: ProviderRegistry,
    history_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = Args::parse();
    init_tracing(&args.log_level)?;

    let env = StdEnv;
    let text = read_input(args.text.take())?;
    let text = text.trim().to_owned();
    if text.is_empty() {
        anyhow::bail!("no text to translate");
    }

    let cfg = build_config(args, &env)?;

    tracing::info!(
        source = %cfg.source,
        target = %cfg.target,
        providers = cfg.registry.len(),
        "config loaded"
    );

    let gateway = TranslationGateway::new(cfg.registry.clone());
    let request = TranslationRequest::new(text.clone(), cfg.source.as_str(), cfg.target.as_str());
    let translated = gateway.translate(&request).await?;

    println!("{translated}");

    if let Some(path) = &cfg.history_file {
        let mut history = History::load(path)
            .with_context(|| format!("loading history from {}", path.display()))?;
        history.push(HistoryEntry::new(text, translated));
        history
            .save(path)
            .with_context(|| format!("saving history to {}", path.display()))?;
    }

    Ok(())
}

fn read_input(text: Option<String>) -> anyhow::Result<String> {
    match text {
        Some(t) => Ok(t),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(
            level
                .parse()
                .with_context(|| format!("invalid --log-level: {level}"))?,
        )
        .from_env_lossy();

    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

fn build_config(args: Args, env: &impl Env) -> anyhow::Result<CliConfig> {
    let source = SourceLang::new(resolve_string_with_default(
        args.source_lang,
        ENV_SOURCE_LANG,
        env,
        DEFAULT_SOURCE_LANG,
    ))?;
    let target = TargetLang::new(resolve_string_with_default(
        args.target_lang,
        ENV_TARGET_LANG,
        env,
        DEFAULT_TARGET_LANG,
    ))?;

    let endpoints = if args.endpoints.is_empty() {
        resolve_optional_string(None, ENV_ENDPOINTS, env)
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    } else {
        args.endpoints
    };

    let registry = if endpoints.is_empty() {
        ProviderRegistry::defaults()
    } else {
        let raw = endpoints
            .iter()
            .map(|s| s.parse::<RawEndpoint>())
            .collect::<Result<Vec<_>, _>>()?;
        ProviderRegistry::normalize(raw)?
    };

    let history_file = args
        .history_file
        .or_else(|| resolve_optional_string(None, ENV_HISTORY_FILE, env).map(PathBuf::from));

    Ok(CliConfig {
        source,
        target,
        registry,
        history_file,
    })
}
