use clap::Parser;
use co2_dashboard::app::{build_dashboard, run_events};
use co2_dashboard::core::session::run_session;
use co2_dashboard::utils::{logger, validation::Validate};
use co2_dashboard::{CliConfig, DashError, Event};
use std::time::Duration;
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting co2-dashboard");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    if let Err(e) = run(&config).await {
        tracing::error!(
            "❌ Dashboard failed: {} (Category: {:?}, Severity: {:?})",
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

    Ok(())
}

async fn run(config: &CliConfig) -> Result<(), DashError> {
    let controls = config.controls()?;
    let mut dashboard = build_dashboard(
        config,
        controls,
        Duration::from_secs(config.timeout_seconds),
        config.monitor,
    )
    .await?;

    let mut events = Vec::new();
    if config.summary {
        events.push(Event::ShowSummary);
    }
    if config.bar {
        events.push(Event::ShowTopEmitters);
    }
    if config.map {
        events.push(Event::ShowEmissionsMap);
    }

    // 沒有指定任何動作時進入互動模式
    if config.interactive || events.is_empty() {
        run_events(&mut dashboard, events).await?;
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        run_session(&mut dashboard, stdin, &mut stdout).await?;
    } else {
        run_events(&mut dashboard, events).await?;
    }

    dashboard.finish();
    tracing::info!("✅ Dashboard session finished");
    Ok(())
}
