//! Show the most recently stored records.

use crate::{connections::ConnectionRegistry, storage::StoredApod, Result};

use super::{
    common::{open_database, ConnIds},
    run::display_or_dash,
};

/// Handle the latest command
pub fn handle_latest(
    registry: &ConnectionRegistry,
    conn_ids: &ConnIds,
    limit: u32,
    as_json: bool,
) -> Result<Vec<StoredApod>> {
    let db = open_database(registry, &conn_ids.db)?;
    db.create_table()?;
    let records = db.recent_records(limit)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else if records.is_empty() {
        println!("No APOD records stored yet");
    } else {
        for stored in &records {
            let record = stored.to_record();
            println!(
                "{:>5}  {:<10}  {:<6}  {}  {}",
                stored.id,
                display_or_dash(&record.date),
                display_or_dash(&record.media_type),
                display_or_dash(&record.title),
                record.url
            );
        }
    }

    Ok(records)
}
