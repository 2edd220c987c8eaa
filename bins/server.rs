use std::process::ExitCode;

use configs::AppConfig;
use dotenvy::dotenv;
use tokio::runtime::{Builder, Runtime};
use tracing::{error, info};
use uuid::Uuid;

fn build_runtime(cfg: &AppConfig) -> std::io::Result<Runtime> {
    let mut builder = Builder::new_multi_thread();
    builder.enable_all();
    if let Some(threads) = cfg.server.worker_threads {
        builder.worker_threads(threads);
    }
    builder.build()
}

fn install_panic_hook(service_id: Uuid) {
    let pid = std::process::id();
    std::panic::set_hook(Box::new(move |info| {
        error!(service = "docstore", event = "panic", %service_id, pid, message = %info, "unhandled panic occurred");
    }));
}

fn main() -> ExitCode {
    // .env before the subscriber so RUST_LOG / LOG_FORMAT apply
    dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let service_id = Uuid::new_v4();
    install_panic_hook(service_id);

    let cfg = match server::startup::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "docstore", event = "config_invalid", error = %e, "configuration rejected");
            return ExitCode::FAILURE;
        }
    };
    let rt = match build_runtime(&cfg) {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "docstore", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = "docstore",
        event = "start",
        %service_id,
        pid = std::process::id(),
        version = env!("CARGO_PKG_VERSION"),
        threads = cfg.server.worker_threads.unwrap_or_default(),
        owner = %cfg.store.owner,
        "document store starting"
    );

    rt.block_on(async move {
        tokio::select! {
            res = server::run(cfg) => match res {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    error!(service = "docstore", event = "run_failed", error = %e, "server stopped with error");
                    ExitCode::FAILURE
                }
            },
            _ = tokio::signal::ctrl_c() => {
                // documents are replaced by rename, so abandoned writes leave no torn file
                info!(service = "docstore", event = "shutdown_signal", %service_id, "received Ctrl+C, shutting down");
                ExitCode::SUCCESS
            }
        }
    })
}
