use dokusho_sources::config::{Config, LoggingConfig};
use dokusho_sources::models::{ChapterId, FetchSearchSerieFilter, SerieId, SourceId, VolumeId};
use dokusho_sources::{Source, SourceError, SourceRegistry};
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;
use std::str::FromStr;
use tokio_util::sync::CancellationToken;

const CONFIG_FILE: &str = "config.toml";

const USAGE: &str = "usage: dokusho-sources sources
       dokusho-sources <source-id> info
       dokusho-sources <source-id> popular [page]
       dokusho-sources <source-id> latest [page]
       dokusho-sources <source-id> search <query> [page]
       dokusho-sources <source-id> detail <serie-id>
       dokusho-sources <source-id> chapter <serie-id> <volume-id> <chapter-id>
       dokusho-sources <source-id> url <serie-id>";

fn init_logging(cfg: &LoggingConfig) {
    if Path::new(&cfg.config_file).exists() {
        match log4rs::init_file(&cfg.config_file, Default::default()) {
            Ok(()) => return,
            Err(e) => eprintln!("Failed to load {}: {}, logging to stderr", cfg.config_file, e),
        }
    }

    let level = LevelFilter::from_str(&cfg.level).unwrap_or(LevelFilter::Info);
    let stderr = ConsoleAppender::builder()
        .target(log4rs::append::console::Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%Y-%m-%d %H:%M:%S)} {l} {t} - {m}{n}")))
        .build();
    let config = log4rs::config::Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level));

    match config {
        Ok(config) => {
            if let Err(e) = log4rs::init_config(config) {
                eprintln!("Failed to initialize logging: {}", e);
            }
        }
        Err(e) => eprintln!("Invalid logging configuration: {}", e),
    }
}

fn page_arg(args: &[String], index: usize) -> Result<u32, String> {
    match args.get(index) {
        None => Ok(1),
        Some(raw) => raw
            .parse::<u32>()
            .ok()
            .filter(|page| *page >= 1)
            .ok_or_else(|| format!("invalid page number: {}", raw)),
    }
}

fn required<'a>(args: &'a [String], index: usize, name: &str) -> Result<&'a str, String> {
    args.get(index).map(String::as_str).ok_or_else(|| format!("missing <{}>\n{}", name, USAGE))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| e.to_string())
}

async fn run_command(
    source: &dyn Source,
    args: &[String],
    cancel: &CancellationToken,
) -> Result<String, String> {
    let command = required(args, 1, "command")?;
    let failed = |e: SourceError| e.to_string();

    match command {
        "info" => to_json(&serde_json::json!({
            "information": source.information(),
            "apiInformation": source.api_information(),
        })),
        "popular" => {
            let page = page_arg(args, 2)?;
            to_json(&source.fetch_popular_serie(page, cancel).await.map_err(failed)?)
        }
        "latest" => {
            let page = page_arg(args, 2)?;
            to_json(&source.fetch_latest_updates(page, cancel).await.map_err(failed)?)
        }
        "search" => {
            let filter = FetchSearchSerieFilter::query(required(args, 2, "query")?);
            let page = page_arg(args, 3)?;
            to_json(&source.fetch_search_serie(page, &filter, cancel).await.map_err(failed)?)
        }
        "detail" => {
            let serie_id = SerieId::from(required(args, 2, "serie-id")?);
            to_json(&source.fetch_serie_detail(&serie_id, cancel).await.map_err(failed)?)
        }
        "chapter" => {
            let serie_id = SerieId::from(required(args, 2, "serie-id")?);
            let volume_id = VolumeId::from(required(args, 3, "volume-id")?);
            let chapter_id = ChapterId::from(required(args, 4, "chapter-id")?);
            let data = source
                .fetch_chapter_data(&serie_id, &volume_id, &chapter_id, cancel)
                .await
                .map_err(failed)?;
            to_json(&data)
        }
        "url" => {
            let serie_id = SerieId::from(required(args, 2, "serie-id")?);
            Ok(source.serie_url(&serie_id).map_err(failed)?.to_string())
        }
        other => Err(format!("unknown command: {}\n{}", other, USAGE)),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cfg = Config::load(CONFIG_FILE);
    init_logging(&cfg.logging);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(first) = args.first() else {
        eprintln!("{}", USAGE);
        return ExitCode::FAILURE;
    };

    let registry = match SourceRegistry::build(&cfg) {
        Ok(registry) => registry,
        Err(e) => {
            log::error!("Failed to build sources: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if first == "sources" {
        return match to_json(&registry.informations()) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}", e);
                ExitCode::FAILURE
            }
        };
    }

    let source = match registry.get(&SourceId::from(first.as_str())) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("{} (available: {:?})", e, registry.ids());
            return ExitCode::FAILURE;
        }
    };

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupted, cancelling");
            on_signal.cancel();
        }
    });

    match run_command(source.as_ref(), &args, &cancel).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{} {} failed: {}", first, args.get(1).map(String::as_str).unwrap_or(""), e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
