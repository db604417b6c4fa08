use std::path::Path;

use common::utils::logging::{init_logging, LogFormat};
use configs::AppConfig;
use dotenvy::dotenv;
use service::{BookingRepository, FileBookingStore};
use tracing::{error, info, warn};
use uuid::Uuid;

fn init_logging_from_env() {
    // load .env first so RUST_LOG / LOG_FORMAT take effect
    dotenv().ok();
    init_logging(LogFormat::from_env());
    info!(service = "booking", event = "logger_init", "tracing subscriber initialized");
}

fn main() -> std::process::ExitCode {
    init_logging_from_env();

    let instance_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(service = "booking", event = "panic", %instance_id, pid, message = %info, "unhandled panic occurred");
    }));

    let cfg = match AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "booking", event = "config_invalid", error = %e, "cannot load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.runtime.worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "booking", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "booking",
        event = "start",
        %instance_id,
        pid,
        version,
        storage = %cfg.storage.path,
        id_strategy = ?cfg.storage.id_strategy,
        "booking storage starting"
    );

    rt.block_on(async move {
        match run(&cfg).await {
            Ok(()) => {
                info!(service = "booking", event = "stop", %instance_id, pid, "booking storage stopped normally");
                std::process::ExitCode::SUCCESS
            }
            Err(e) => {
                error!(service = "booking", event = "run_failed", error = %e, "booking storage failed");
                std::process::ExitCode::FAILURE
            }
        }
    })
}

/// Open the store, report what it holds, and keep it open until Ctrl+C.
async fn run(cfg: &AppConfig) -> anyhow::Result<()> {
    common::env::ensure_storage_dir(Path::new(&cfg.storage.path)).await?;

    let store = FileBookingStore::open_with_config(&cfg.storage).await?;
    let repo: &dyn BookingRepository = &*store;
    let stats = repo.stats().await;
    info!(
        service = "booking",
        event = "loaded",
        users = stats.users,
        events = stats.events,
        tickets = stats.tickets,
        summary = %serde_json::to_string(&stats)?,
        "storage loaded"
    );

    tokio::signal::ctrl_c().await?;
    info!(service = "booking", event = "shutdown_signal", "received Ctrl+C, shutting down");

    if cfg.storage.save_on_shutdown {
        repo.save().await?;
    } else {
        warn!(service = "booking", event = "discard", "save_on_shutdown disabled; in-memory changes are not written");
    }
    Ok(())
}
