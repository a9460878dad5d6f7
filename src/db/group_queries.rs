use super::Database;
use crate::forecast::HostGroupLookup;
use anyhow::Result;
use rusqlite::params;

impl Database {
    /// Replace the group memberships of a host.
    pub fn set_host_groups(&self, host_id: &str, group_ids: &[String]) -> Result<()> {
        let conn = self.conn();
        let tx = conn.unchecked_transaction()?;
        tx.execute("DELETE FROM host_groups WHERE host_id = ?1", params![host_id])?;
        for group_id in group_ids.iter().filter(|g| !g.is_empty()) {
            tx.execute(
                "INSERT OR IGNORE INTO host_groups (host_id, group_id) VALUES (?1, ?2)",
                params![host_id, group_id],
            )?;
        }
        tx.commit()?;
        Ok(())
    }
}

impl HostGroupLookup for Database {
    fn host_groups(&self, host_id: &str) -> Result<Vec<String>> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare("SELECT group_id FROM host_groups WHERE host_id = ?1 ORDER BY group_id")?;
        let groups =
            stmt.query_map(params![host_id], |row| row.get(0))?.collect::<Result<Vec<_>, _>>()?;
        Ok(groups)
    }
}
