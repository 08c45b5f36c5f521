pub mod cli;

use crate::core::ConfigProvider;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "weblog-etl")]
#[command(about = "Validate a web-log CSV and emit the valid rows as JSON")]
pub struct CliConfig {
    /// Input CSV file with a URL,IP,timeStamp,timeSpent header
    pub input_path: String,

    /// Output JSON file
    pub output_path: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }
}
