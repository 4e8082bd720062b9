use clap::Parser;
use qcm::{app::App, cli::Cli, Result, APP_NAME, LOG_FILE};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Set up panic hook to restore terminal state on panic
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen
        );
        original_hook(panic_info);
    }));
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;

    setup_panic_hook();

    let log_dir = match &cli.log_dir {
        Some(dir) => dir.clone(),
        None => dirs::cache_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_default())
            .join(APP_NAME),
    };
    std::fs::create_dir_all(&log_dir)?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    info!(
        "Starting {} (default time limit {}s)",
        APP_NAME, config.default_time_limit_secs
    );

    let mut app = App::new(config)?;
    app.init()?;
    let result = app.run().await;
    if let Err(e) = &result {
        error!("Application error: {}", e);
    }

    drop(app);
    drop(guard);

    result
}
