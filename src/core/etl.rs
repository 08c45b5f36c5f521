use crate::domain::model::TransformResult;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Run the batch in strict phases: read-all, validate-all, report,
    /// write-once. The output is written even when some rows were
    /// invalid; only I/O faults abort the run.
    pub fn run(&self) -> Result<String> {
        let rows = self.pipeline.extract()?;
        tracing::info!("Extracted {} data rows", rows.len());

        let result = self.pipeline.transform(rows)?;
        print_report(&result);

        let output_path = self.pipeline.load(&result)?;
        println!(
            "Wrote {} valid record(s) to {}",
            result.valid.len(),
            output_path
        );

        Ok(output_path)
    }
}

/// Print the validation report: per-row error detail for every invalid
/// row, then the totals; or a single success line when everything passed.
fn print_report(result: &TransformResult) {
    if result.invalid.is_empty() {
        println!("All {} row(s) valid", result.valid.len());
        return;
    }

    for invalid in &result.invalid {
        println!("Row {}:", invalid.row);
        for error in &invalid.errors {
            println!("  - {}", error);
        }
    }
    println!(
        "Validation finished: {} valid, {} invalid",
        result.valid.len(),
        result.invalid.len()
    );
}
