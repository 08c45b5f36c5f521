use clap::Parser;
use weblog_etl::utils::logger;
use weblog_etl::{CliConfig, CsvPipeline, EtlEngine, LocalStorage};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting weblog-etl");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let storage = LocalStorage::new();
    let pipeline = CsvPipeline::new(storage, config);
    let engine = EtlEngine::new(pipeline);

    match engine.run() {
        Ok(output_path) => {
            tracing::info!("Pipeline completed, output saved to {}", output_path);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Pipeline failed: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
