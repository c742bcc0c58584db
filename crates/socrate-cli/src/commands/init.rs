use std::fs;
use std::path::Path;

use socrate_core::{Roster, RosterEntry};
use socrate_store::record;
use socrate_store::{RosterStore, StoreConfig};

pub fn run(names: &Path, path: &Path) -> Result<(), String> {
    if path.exists() {
        return Err(format!("{} already exists", path.display()));
    }
    let store = RosterStore::new(StoreConfig::new(path));
    if let Some(leftover) = store.leftover().map_err(|e| e.to_string())? {
        return Err(format!(
            "{} exists from an interrupted save; restore it as {} first",
            leftover.display(),
            path.display()
        ));
    }

    let text =
        fs::read_to_string(names).map_err(|e| format!("cannot read {}: {e}", names.display()))?;
    let records = record::parse(&text).map_err(|e| {
        format!(
            "{}:{}: unterminated quoted field",
            names.display(),
            e.line
        )
    })?;

    let mut entries = Vec::with_capacity(records.len());
    for (i, r) in records.iter().enumerate() {
        let [last, first] = r.fields.as_slice() else {
            return Err(format!(
                "{}:{}: expected 'Last,First', found {} fields",
                names.display(),
                r.line,
                r.fields.len()
            ));
        };
        let index = u32::try_from(i + 1).map_err(|e| e.to_string())?;
        entries.push(RosterEntry::new(index, last.trim(), first.trim()));
    }

    let roster = Roster::new(entries).map_err(|e| format!("{}: {e}", names.display()))?;
    store
        .persist(&roster)
        .map_err(|e| e.to_string())?;

    println!(
        "  Created roster '{}' with {} members",
        path.display(),
        roster.len()
    );

    Ok(())
}
