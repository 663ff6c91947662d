//! CSV rendering for the monthly attendance recap.
//!
//! Shared between the REST report endpoint (`?format=csv`) and the
//! `facegate recap --csv` CLI command.

use facegate_types::attendance::RecapRow;

/// Render recap rows as CSV with a header line.
///
/// Fields containing commas or quotes are quoted per RFC 4180; everything
/// this report emits is plain, but names are user input.
pub fn recap_to_csv(rows: &[RecapRow]) -> String {
    let mut out = String::from("date,nip,name,clock_in,clock_out,note\n");
    for row in rows {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            row.date,
            escape(&row.nip),
            escape(&row.name),
            escape(row.clock_in.as_deref().unwrap_or("")),
            escape(row.clock_out.as_deref().unwrap_or("")),
            escape(row.note.as_deref().unwrap_or("")),
        ));
    }
    out
}

fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
