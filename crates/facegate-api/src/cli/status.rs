//! Service status dashboard command.

use anyhow::Result;
use console::style;

use crate::state::AppState;

/// Display service status.
///
/// Shows employee counts, enrollment coverage, attendance volume, and
/// matching configuration.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let employees = state.employees.list().await?;
    let enrolled = employees.iter().filter(|e| e.face_enrolled).count();
    let with_password = employees.iter().filter(|e| e.has_password).count();
    let events = state.attendance.total_events().await?;

    let policy = state.recognition.policy();

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "employees": {
                "total": employees.len(),
                "face_enrolled": enrolled,
                "with_password": with_password,
            },
            "attendance_events": events,
            "matching": {
                "metric": format!("{:?}", policy.metric()).to_lowercase(),
                "threshold": policy.threshold(),
            },
            "encoder": {
                "url": state.config.encoder.base_url,
                "model": state.config.encoder.model,
                "dimension": state.config.encoder.dimension,
            },
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Facegate v{}",
        style("⚡").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("  {}", style("── Employees ──").dim());
    println!("  Total:          {}", style(employees.len()).bold());
    println!("  Face enrolled:  {}", style(enrolled).green());
    println!("  With password:  {}", with_password);
    println!();

    println!("  {}", style("── Attendance ──").dim());
    println!("  Events recorded: {}", style(events).bold());
    println!();

    println!("  {}", style("── Matching ──").dim());
    println!(
        "  Policy: {:?} (threshold {})",
        policy.metric(),
        policy.threshold()
    );
    println!(
        "  Encoder: {} ({}d via {})",
        state.config.encoder.model,
        state.config.encoder.dimension,
        style(&state.config.encoder.base_url).dim()
    );
    println!();

    println!("  {}", style("── System ──").dim());
    println!("  Data dir: {}", style(state.data_dir.display()).dim());
    println!("  Database: {}", style("SQLite (WAL mode)").dim());
    println!();

    Ok(())
}
