use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{Connection, Row};

use crate::parser::records::Record;

pub fn connect(path: &Path) -> Result<Connection> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("Cannot create {:?}", dir))?;
    }
    let conn = Connection::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS records (
            id          INTEGER PRIMARY KEY,
            source      TEXT NOT NULL,
            position    INTEGER NOT NULL,
            question    TEXT NOT NULL,
            answer      TEXT NOT NULL,
            content     TEXT NOT NULL,
            page_number INTEGER NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE(source, position)
        );
        CREATE INDEX IF NOT EXISTS idx_records_source ON records(source);
        ",
    )?;
    Ok(())
}

/// Replace every stored record of `source` with `records`, keeping their order.
pub fn save_records(conn: &Connection, source: &str, records: &[Record]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut count = 0;
    {
        tx.execute("DELETE FROM records WHERE source = ?1", [source])?;
        let mut stmt = tx.prepare(
            "INSERT INTO records (source, position, question, answer, content, page_number)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for (position, r) in records.iter().enumerate() {
            count += stmt.execute(rusqlite::params![
                source, position, r.question, r.answer, r.content, r.page_number,
            ])?;
        }
    }
    tx.commit()?;
    Ok(count)
}

pub fn fetch_records(conn: &Connection, source: Option<&str>, limit: usize) -> Result<Vec<Record>> {
    let sql = format!(
        "SELECT content, question, answer, page_number, source
         FROM records{}
         ORDER BY source, position
         LIMIT {}",
        if source.is_some() { " WHERE source = ?1" } else { "" },
        limit
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = match source {
        Some(s) => stmt.query_map([s], record_from_row)?.collect::<Result<Vec<_>, _>>()?,
        None => stmt.query_map([], record_from_row)?.collect::<Result<Vec<_>, _>>()?,
    };
    Ok(rows)
}

fn record_from_row(row: &Row) -> rusqlite::Result<Record> {
    Ok(Record {
        content: row.get(0)?,
        question: row.get(1)?,
        answer: row.get(2)?,
        page_number: row.get(3)?,
        source: row.get(4)?,
    })
}

// ── Stats ──

pub struct Stats {
    pub total: usize,
    pub per_source: Vec<(String, usize)>,
}

pub fn get_stats(conn: &Connection) -> Result<Stats> {
    let total: usize = conn.query_row("SELECT COUNT(*) FROM records", [], |r| r.get(0))?;
    let mut stmt =
        conn.prepare("SELECT source, COUNT(*) FROM records GROUP BY source ORDER BY source")?;
    let per_source = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Stats { total, per_source })
}
