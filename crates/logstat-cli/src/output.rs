use crate::OutputFormat;
use anyhow::Result;
use logstat_core::RunOutcome;

/// Print the summary of a successful run on stdout
pub fn print_outcome(outcome: &RunOutcome, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => output_json(outcome),
        OutputFormat::Pretty => {
            output_pretty(outcome);
            Ok(())
        }
    }
}

fn output_pretty(outcome: &RunOutcome) {
    use console::style;

    println!("\n{}", style("Latency Report").bold().cyan());
    println!("{}", style("==============").cyan());

    println!("  Log File:        {}", outcome.log.path.display());
    println!("  Log Date:        {}", outcome.log.date);
    println!(
        "  Lines Parsed:    {} of {} ({:.2}%)",
        outcome.parse.handled_lines,
        outcome.parse.total_lines,
        outcome.parse.success_ratio * 100.0
    );
    println!("  Distinct URLs:   {}", outcome.distinct_urls);
    println!("  Rows Reported:   {}", outcome.rows);
    println!(
        "  Report:          {}",
        style(outcome.report_path.display()).green()
    );

    println!(); // trailing newline
}

fn output_json(outcome: &RunOutcome) -> Result<()> {
    let json = serde_json::to_string_pretty(outcome)?;
    println!("{}", json);
    Ok(())
}
