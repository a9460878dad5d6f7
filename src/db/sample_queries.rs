use super::filesystem_queries::upsert_filesystem;
use super::models::Observation;
use super::Database;
use crate::forecast::{HistorySource, ItemKey, Sample};
use anyhow::Result;
use rusqlite::params;
use std::collections::{HashMap, HashSet};
use tracing::debug;

impl Database {
    /// Record a batch of observations in one transaction: refresh each
    /// inventory row, then append its sample. Returns the number recorded.
    pub fn record_observations(&self, observations: &[Observation]) -> Result<usize> {
        let conn = self.conn();
        let tx = conn.unchecked_transaction()?;

        {
            let mut insert =
                tx.prepare_cached("INSERT INTO samples (filesystem_id, clock, value) VALUES (?1, ?2, ?3)")?;
            for obs in observations {
                let fs_id = upsert_filesystem(&tx, &obs.record, obs.fs_type.as_deref())?;
                insert.execute(params![fs_id, obs.timestamp, obs.record.used_bytes])?;
            }
        }

        tx.commit()?;
        Ok(observations.len())
    }

    /// Delete samples older than `before` (epoch seconds).
    pub fn prune_samples(&self, before: i64) -> Result<usize> {
        let conn = self.conn();
        let deleted = conn.execute("DELETE FROM samples WHERE clock < ?1", params![before])?;
        if deleted > 0 {
            debug!("Pruned {} sample(s) older than {}", deleted, before);
        }
        Ok(deleted)
    }

    /// Total number of stored samples.
    pub fn sample_count(&self) -> Result<i64> {
        let conn = self.conn();
        let count = conn.query_row("SELECT COUNT(*) FROM samples", [], |row| row.get(0))?;
        Ok(count)
    }
}

impl HistorySource for Database {
    /// One query for the whole key set; rows for unrequested keys are
    /// dropped while streaming.
    fn fetch_history(&self, keys: &[ItemKey], since: i64) -> Result<HashMap<ItemKey, Vec<Sample>>> {
        let wanted: HashSet<&ItemKey> = keys.iter().collect();
        let mut history: HashMap<ItemKey, Vec<Sample>> = HashMap::with_capacity(keys.len());
        if wanted.is_empty() {
            return Ok(history);
        }

        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT f.host_id, f.mount, s.clock, s.value
             FROM samples s JOIN filesystems f ON f.id = s.filesystem_id
             WHERE s.clock >= ?1
             ORDER BY s.filesystem_id, s.clock, s.rowid",
        )?;
        let mut rows = stmt.query(params![since])?;

        while let Some(row) = rows.next()? {
            let key = ItemKey::new(row.get::<_, String>(0)?, row.get::<_, String>(1)?);
            if !wanted.contains(&key) {
                continue;
            }
            let sample = Sample::new(row.get(2)?, row.get(3)?);
            history.entry(key).or_default().push(sample);
        }

        Ok(history)
    }
}
