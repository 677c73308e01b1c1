use crate::commands::docs::{build_runner, ReportOptions};
use crate::error::Result;

/// Generate the solution FAQ PDF for a project
pub async fn generate_faq(options: ReportOptions) -> Result<()> {
    let runner = build_runner(options)?;
    let outcome = runner.run_faq().await?;

    println!("\n=== Run Summary ===");
    println!("Fetched:    {} issues", outcome.fetched);
    println!("Solutions:  {} issues", outcome.documented);
    match outcome.artifact {
        Some(path) => println!("Report:     {}", path.display()),
        None => println!("No solutions found; no report was generated."),
    }

    Ok(())
}
