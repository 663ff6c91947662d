//! Monthly recap command: table, JSON, or CSV file output.

use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use crate::report::recap_to_csv;
use crate::state::AppState;

/// Print or export the monthly attendance recap.
pub async fn recap(
    state: &AppState,
    month: u32,
    year: i32,
    nip: Option<&str>,
    csv: Option<&Path>,
    json: bool,
) -> Result<()> {
    let rows = match nip {
        Some(nip) => {
            let employee = state.employees.get_by_nip(nip).await?;
            state.attendance.employee_recap(&employee, year, month).await?
        }
        None => {
            let employees = state.employees.list().await?;
            state.attendance.monthly_recap(&employees, year, month).await?
        }
    };

    if let Some(path) = csv {
        let content = recap_to_csv(&rows);
        tokio::fs::write(path, content).await?;
        if !json {
            println!(
                "  {} Recap for {year}-{month:02} written to {}",
                style("✓").green(),
                style(path.display()).cyan()
            );
        }
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!();
        println!(
            "  {} No attendance recorded for {year}-{month:02}.",
            style("i").blue().bold()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Date").fg(Color::White),
        Cell::new("NIP").fg(Color::White),
        Cell::new("Name").fg(Color::White),
        Cell::new("Clock In").fg(Color::White),
        Cell::new("Clock Out").fg(Color::White),
        Cell::new("Note").fg(Color::White),
    ]);

    for row in &rows {
        let clock_in = match &row.clock_in {
            Some(t) => Cell::new(t).fg(Color::Green),
            None => Cell::new("-").fg(Color::DarkGrey),
        };
        let clock_out = match &row.clock_out {
            Some(t) => Cell::new(t).fg(Color::Yellow),
            None => Cell::new("-").fg(Color::DarkGrey),
        };
        table.add_row(vec![
            Cell::new(row.date.to_string()),
            Cell::new(&row.nip),
            Cell::new(&row.name).fg(Color::Cyan),
            clock_in,
            clock_out,
            Cell::new(row.note.as_deref().unwrap_or("")).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!(
        "  {} Attendance recap for {}",
        style("📋").bold(),
        style(format!("{year}-{month:02}")).cyan()
    );
    println!();
    println!("{table}");
    println!();

    Ok(())
}
