use clap::Parser;
use co2_dashboard::app::{action_event, build_dashboard, run_events};
use co2_dashboard::core::ConfigProvider;
use co2_dashboard::utils::{logger, validation::Validate};
use co2_dashboard::{DashError, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-dashboard")]
#[command(about = "CO2 dashboard driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "dashboard.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Dry run - show what would be rendered without loading the dataset
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.json_logging() && !args.verbose {
        logger::init_json_logger(config.log_level());
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based dashboard");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No dataset will be loaded");
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    match run(&config, monitor_enabled).await {
        Ok(()) => {
            tracing::info!("✅ Dashboard run completed successfully!");
        }
        Err(e) => {
            tracing::error!(
                "❌ Dashboard run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

async fn run(config: &TomlConfig, monitor_enabled: bool) -> Result<(), DashError> {
    let controls = config.initial_controls()?;
    let mut dashboard =
        build_dashboard(config, controls, config.timeout(), monitor_enabled).await?;

    let events = config
        .actions()
        .iter()
        .filter_map(|action| action_event(action))
        .collect();

    run_events(&mut dashboard, events).await?;
    dashboard.finish();
    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    tracing::info!("📋 Dashboard: {}", config.dashboard.name);
    if let Some(description) = &config.dashboard.description {
        tracing::info!("   {}", description);
    }
    tracing::info!("📥 Dataset: {}", config.dataset_source());
    if let Ok(controls) = config.initial_controls() {
        tracing::info!(
            "🎚️ Years {}-{}, top {} countries",
            controls.start_year(),
            controls.end_year(),
            controls.country_count()
        );
    }
    tracing::info!("🎯 Actions: {}", config.actions().join(", "));
    tracing::info!(
        "📤 Output: {} ({}{})",
        config.output_path(),
        config.output_formats().join(", "),
        if config.bundle_enabled() { ", zipped" } else { "" }
    );
}
