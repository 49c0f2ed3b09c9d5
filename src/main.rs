use clap::Parser;
use posts_etl::utils::logger;
use posts_etl::{run_with_config, CliConfig, EtlError, RunSummary};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose, cli.log_format);

    tracing::info!("Starting posts-etl");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 解析配置: 預設值 -> TOML -> 命令列參數
    let result = match cli.resolve() {
        Ok(config) => run_with_config(config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(summary) => report_success(&summary, cli.json),
        Err(e) => {
            report_failure(&e, cli.json);
            std::process::exit(e.exit_code());
        }
    }
}

fn report_success(summary: &RunSummary, json: bool) {
    tracing::info!(
        "✅ ETL process completed: {} rows written in {} ms",
        summary.rows_written,
        (summary.finished_at - summary.started_at).num_milliseconds()
    );

    if json {
        match serde_json::to_string(summary) {
            Ok(line) => println!("{}", line),
            Err(e) => tracing::warn!("Could not serialize run summary: {}", e),
        }
        return;
    }

    println!("✅ ETL process completed successfully!");
    println!("📁 Output saved to: {}", summary.output_path);
}

fn report_failure(e: &EtlError, json: bool) {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ ETL process failed: {} (Stage: {:?}, Category: {:?})",
        e,
        e.stage(),
        e.category()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    if json {
        match serde_json::to_string(&e.report()) {
            Ok(line) => eprintln!("{}", line),
            Err(err) => tracing::warn!("Could not serialize failure report: {}", err),
        }
        return;
    }

    // 輸出用戶友好的錯誤信息
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());
}
