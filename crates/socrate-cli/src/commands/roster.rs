use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use serde_json::json;

pub fn run(path: &Path, json: bool) -> Result<(), String> {
    let roster = super::load_roster(path)?;
    let total = roster.total_weight();

    if json {
        let entries: Vec<_> = roster
            .iter()
            .map(|e| {
                json!({
                    "index": e.index,
                    "last_name": e.last_name,
                    "first_name": e.first_name,
                    "count_called": e.count_called,
                    "count_failed": e.count_failed,
                    "count_absent": e.count_absent,
                    "weight": e.weight(),
                    "probability": e.weight() / total,
                })
            })
            .collect();
        let out = serde_json::to_string_pretty(&entries).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Index", "Name", "Called", "Failed", "Absent", "Weight", "Odds",
    ]);

    for e in &roster {
        table.add_row(vec![
            e.index.to_string(),
            e.full_name(),
            e.count_called.to_string(),
            e.count_failed.to_string(),
            e.count_absent.to_string(),
            format!("{:.4}", e.weight()),
            format!("{:.1}%", 100.0 * e.weight() / total),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} members", roster.len());

    Ok(())
}
