//! Create the destination table without running the pipeline.

use crate::{connections::ConnectionRegistry, Result, APOD_TABLE};

use super::common::{open_database, ConnIds};

/// Handle the init-db command
pub fn handle_init_db(registry: &ConnectionRegistry, conn_ids: &ConnIds) -> Result<()> {
    let db = open_database(registry, &conn_ids.db)?;
    db.create_table()?;
    println!("✓ Table {APOD_TABLE} is ready");
    Ok(())
}
