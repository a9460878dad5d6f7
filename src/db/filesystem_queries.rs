use super::models::Filesystem;
use super::Database;
use crate::forecast::{FilesystemRecord, InventoryFilter, InventorySource};
use anyhow::Result;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection};

/// Map a row from the filesystems table into a `Filesystem`.
fn map_filesystem_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Filesystem> {
    Ok(Filesystem {
        id: row.get(0)?,
        host_id: row.get(1)?,
        host_name: row.get(2)?,
        mount: row.get(3)?,
        total_bytes: row.get(4)?,
        used_bytes: row.get(5)?,
        fs_type: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

const FILESYSTEM_COLUMNS: &str =
    "id, host_id, host_name, mount, total_bytes, used_bytes, fs_type, updated_at";

/// Insert or refresh an inventory row, returning its ID in a single round-trip.
pub(super) fn upsert_filesystem(
    conn: &Connection,
    record: &FilesystemRecord,
    fs_type: Option<&str>,
) -> rusqlite::Result<i64> {
    conn.query_row(
        "INSERT INTO filesystems (host_id, host_name, mount, total_bytes, used_bytes, \
         fs_type, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, strftime('%Y-%m-%dT%H:%M:%fZ','now'))
         ON CONFLICT(host_id, mount) DO UPDATE SET
            host_name = excluded.host_name,
            total_bytes = excluded.total_bytes,
            used_bytes = excluded.used_bytes,
            fs_type = COALESCE(excluded.fs_type, filesystems.fs_type),
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ','now')
         RETURNING id",
        params![
            record.host_id,
            record.host_name,
            record.mount,
            record.total_bytes,
            record.used_bytes,
            fs_type
        ],
        |row| row.get(0),
    )
}

impl Database {
    /// Get all tracked filesystems.
    pub fn get_all_filesystems(&self) -> Result<Vec<Filesystem>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {FILESYSTEM_COLUMNS} FROM filesystems ORDER BY host_name, mount"
        ))?;

        let filesystems = stmt.query_map([], map_filesystem_row)?.collect::<Result<Vec<_>, _>>()?;

        Ok(filesystems)
    }

    pub fn filesystem_count(&self) -> Result<usize> {
        let conn = self.conn();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM filesystems", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Filesystems matching the host-id and host-name parts of `filter`.
    /// Group membership is resolved by the caller.
    pub fn get_filtered_filesystems(&self, filter: &InventoryFilter) -> Result<Vec<Filesystem>> {
        let mut clauses: Vec<String> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if !filter.host_ids.is_empty() {
            let placeholders = vec!["?"; filter.host_ids.len()].join(", ");
            clauses.push(format!("host_id IN ({placeholders})"));
            values.extend(filter.host_ids.iter().cloned().map(Value::Text));
        }
        if let Some(needle) = filter.host_name_substring.as_deref().filter(|s| !s.is_empty()) {
            clauses.push("instr(lower(host_name), lower(?)) > 0".to_string());
            values.push(Value::Text(needle.to_string()));
        }

        let where_clause =
            if clauses.is_empty() { String::new() } else { format!("WHERE {}", clauses.join(" AND ")) };

        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {FILESYSTEM_COLUMNS} FROM filesystems {where_clause} ORDER BY id"
        ))?;
        let filesystems = stmt
            .query_map(params_from_iter(values), map_filesystem_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(filesystems)
    }
}

impl InventorySource for Database {
    fn fetch_inventory(&self, filter: &InventoryFilter) -> Result<Vec<FilesystemRecord>> {
        Ok(self.get_filtered_filesystems(filter)?.iter().map(Filesystem::record).collect())
    }
}
