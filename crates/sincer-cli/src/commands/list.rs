use anyhow::Result;
use serde::Serialize;

use crate::context::Context;

/// A record as printed by `list --json`
#[derive(Debug, Serialize)]
struct RecordJson<'a> {
    position: usize,
    name: &'a str,
    since: String,
    color: &'a str,
    elapsed_ms: i64,
}

/// List all records, or those matching `pattern`
///
/// - Human-readable: the record table, "no records" or "no matches"
/// - Machine-readable: a JSON array (empty when nothing matches)
pub fn handle(ctx: &Context, pattern: Option<String>, json: bool) -> Result<()> {
    let manager = ctx.manager();

    if !json {
        ctx.emit(&manager.display(pattern.as_deref()));
        return Ok(());
    }

    let records = manager.records();
    let selected: Vec<usize> = match pattern.as_deref() {
        Some(pattern) => manager.match_all_indices(pattern),
        None => (0..records.len()).collect(),
    };

    let now = chrono::Utc::now();
    let json_records: Vec<_> = selected
        .into_iter()
        .map(|index| {
            let record = &records[index];
            RecordJson {
                position: index + 1,
                name: &record.name,
                since: record.since_string(),
                color: &record.color,
                elapsed_ms: record.elapsed(now).num_milliseconds(),
            }
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&json_records)?);

    Ok(())
}
