use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mccontrol_dashboard::api::HttpTransport;
use mccontrol_dashboard::command::Command;
use mccontrol_dashboard::config;
use mccontrol_dashboard::modal::DialogHost;
use mccontrol_dashboard::shell::{self, ShellCommand};
use mccontrol_dashboard::state::Dashboard;
use mccontrol_dashboard::surface::{TextSurface, Viewport};
use mccontrol_dashboard::types::UploadFile;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logging (stderr + daily file rotation under ./logs); stdout belongs to the dashboard
    std::fs::create_dir_all("logs").ok();
    let (stderr_nb, stderr_guard) = tracing_appender::non_blocking(std::io::stderr());
    let file_appender = tracing_appender::rolling::daily("logs", "dashboard.log");
    let (file_nb, file_guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,reqwest=warn,hyper=warn".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(stderr_nb))
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(file_nb))
        .init();
    let _log_guards = (stderr_guard, file_guard);

    // Embedded defaults -> mccontrol.toml -> env/.env
    let app_cfg = config::load()?;

    let transport = HttpTransport::new(
        &app_cfg.backend.base_url,
        &app_cfg.backend.api_prefix,
        app_cfg.backend.connect_timeout(),
        app_cfg.backend.request_timeout(),
    )?;
    let surface = Arc::new(TextSurface::new(Viewport {
        width: app_cfg.ui.viewport_width,
        height: app_cfg.ui.viewport_height,
    }));
    let dialogs = Arc::new(DialogHost::new(surface.clone()));
    let start_page = app_cfg.start_page();
    info!("MCControl dashboard connecting to {}", app_cfg.backend.base_url);

    let dashboard = Arc::new(Dashboard::new(app_cfg, Arc::new(transport), surface, dialogs.clone()));
    dashboard.start_monitor();
    {
        let dashboard = dashboard.clone();
        tokio::spawn(async move { dashboard.select_page(start_page).await });
    }
    println!("Type 'help' for the list of commands.");

    tokio::select! {
        res = input_loop(dashboard.clone(), dialogs) => res?,
        _ = shutdown_signal() => {},
    }

    dashboard.shutdown();
    Ok(())
}

async fn input_loop(dashboard: Arc<Dashboard>, dialogs: Arc<DialogHost>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if shell::answer_dialog(&dialogs, &line) {
            continue;
        }
        let command = match shell::parse_line(&line) {
            Ok(ShellCommand::Quit) => break,
            Ok(ShellCommand::Empty) => continue,
            Ok(ShellCommand::Help) => {
                println!("{}", shell::help());
                continue;
            }
            Ok(ShellCommand::Dispatch(command)) => command,
            Ok(ShellCommand::Parent) => Command::Browse(parent_path(&dashboard.files().current_path())),
            Ok(ShellCommand::SaveFrom(path)) => match tokio::fs::read_to_string(&path).await {
                Ok(content) => Command::SaveFile(content),
                Err(e) => {
                    println!("Cannot read {}: {}", path.display(), e);
                    continue;
                }
            },
            Ok(ShellCommand::UploadFrom(paths)) => match read_uploads(&paths).await {
                Ok(files) => Command::Upload(files),
                Err(e) => {
                    println!("{:#}", e);
                    continue;
                }
            },
            Err(e) => {
                println!("{}", e.user_message());
                continue;
            }
        };
        // Each action runs on its own task so its dialogs can be answered from this loop
        let dashboard = dashboard.clone();
        tokio::spawn(async move {
            let outcome = dashboard.dispatch(command).await;
            tracing::debug!(?outcome, "command finished");
        });
    }
    Ok(())
}

fn parent_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rsplit_once('/') {
        Some((parent, _)) => parent.to_string(),
        None => String::new(),
    }
}

async fn read_uploads(paths: &[PathBuf]) -> anyhow::Result<Vec<UploadFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes = tokio::fs::read(path).await.with_context(|| format!("Cannot read {}", path.display()))?;
        files.push(UploadFile::new(upload_name(path), bytes));
    }
    Ok(files)
}

fn upload_name(path: &Path) -> String {
    path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_else(|| "upload".to_string())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("Shutdown signal received. Stopping dashboard...");
}
