use crate::store::StoreError;
use log::{debug, error};
use rusqlite::Connection;

// Embed migrations from the migrations directory
refinery::embed_migrations!("migrations");

/// Opens the database, enables cascading deletes and runs migrations
pub fn init_connection(db_path: &str) -> Result<Connection, StoreError> {
    let mut conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    match migrations::runner().run(&mut conn) {
        Ok(report) => {
            debug!(
                "Migrations completed successfully ({} applied)",
                report.applied_migrations().len()
            );
        }
        Err(e) => {
            error!("Refinery migration error: {}", e);
            return Err(StoreError::Migration(e.to_string()));
        }
    }

    Ok(conn)
}
