use clap::Parser;
use edu_access::config::cli::{Command, PredictArgs, ServeArgs};
use edu_access::core::ConfigProvider;
use edu_access::utils::logger::{self, LogFormat};
use edu_access::utils::validation::Validate;
use edu_access::{create_router, AppState, CliConfig, LoadedArtifacts, PredictionService, Result};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let result = match cli.command {
        Command::Serve(args) => serve(args, cli.verbose).await,
        Command::Predict(args) => predict(args, cli.verbose),
    };

    if let Err(e) = result {
        tracing::error!("❌ {} (Category: {:?})", e, e.category());
        eprintln!("❌ {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn serve(args: ServeArgs, verbose: bool) -> Result<()> {
    let config = match args.resolve() {
        Ok(config) => config,
        Err(e) => {
            // 設定檔讀不到時仍要能記錄錯誤
            logger::init_logger(verbose, None, LogFormat::Compact);
            return Err(e);
        }
    };
    logger::init_logger(verbose, config.log_level(), config.log_format());

    tracing::info!("Starting edu-access API");
    if verbose {
        tracing::debug!("Resolved config: {:?}", config);
    }

    // 驗證配置
    config.validate()?;

    // 模型載入失敗就不開放服務
    let artifacts = LoadedArtifacts::load(config.artifacts_path())?;
    let service = PredictionService::from_artifacts(artifacts);
    let app = create_router(AppState::new(service));

    let addr = format!("{}:{}", config.host(), config.port());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn predict(args: PredictArgs, verbose: bool) -> Result<()> {
    logger::init_logger(verbose, None, LogFormat::Compact);

    let artifacts = LoadedArtifacts::load(&args.artifacts)?;
    let service = PredictionService::from_artifacts(artifacts);
    let prediction = service.predict(&args.to_request())?;

    println!("{}", serde_json::to_string_pretty(&prediction)?);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
