use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" | "text" => Some(LogFormat::Compact),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

fn build_filter(verbose: bool, level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directive = match (verbose, level) {
            (true, _) => "edu_access=debug,tower_http=debug,info".to_string(),
            (false, Some(level)) => format!("edu_access={},tower_http=info", level),
            (false, None) => "edu_access=info,tower_http=info".to_string(),
        };
        EnvFilter::new(directive)
    })
}

/// Logs go to stderr so `predict` can keep stdout for the JSON document.
pub fn init_logger(verbose: bool, level: Option<&str>, format: LogFormat) {
    let filter = build_filter(verbose, level);

    match format {
        LogFormat::Compact => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_thread_ids(false)
                        .with_file(false)
                        .with_line_number(false)
                        .with_writer(std::io::stderr)
                        .compact(),
                )
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(true)
                        .with_thread_ids(false)
                        .with_file(false)
                        .with_line_number(false)
                        .with_writer(std::io::stderr)
                        .json(), // 方便送進集中式日誌系統
                )
                .init();
        }
    }
}
