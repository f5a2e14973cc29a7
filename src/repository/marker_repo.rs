//! Category Marker Repository
//!
//! Markers are always written as a whole set per store: the previous set is
//! deleted and the new one inserted in a single transaction.

use async_trait::async_trait;
use rusqlite::params;

use crate::domain::{CategoryMarker, DomainResult};
use super::db::{not_initialized, sql_err, SharedConnection};
use super::traits::{MarkerStore, Repository};

/// SQLite implementation of the category marker store
pub struct MarkerRepository {
    conn: SharedConnection,
}

impl MarkerRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Repository<CategoryMarker> for MarkerRepository {
    async fn find_by_id(&self, id: &String) -> DomainResult<Option<CategoryMarker>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let mut stmt = conn
            .prepare("SELECT id, name, display_order, anchor_item_id FROM category_markers WHERE id = ?")
            .map_err(sql_err)?;
        let mut rows = stmt.query(params![id]).map_err(sql_err)?;

        match rows.next().map_err(sql_err)? {
            Some(row) => Ok(Some(row_to_marker(row)?)),
            None => Ok(None),
        }
    }

    async fn list_for_store(&self, store_id: &str) -> DomainResult<Vec<CategoryMarker>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let mut stmt = conn
            .prepare(
                "SELECT id, name, display_order, anchor_item_id FROM category_markers
                 WHERE store_id = ?
                 ORDER BY display_order, id",
            )
            .map_err(sql_err)?;
        let mut rows = stmt.query(params![store_id]).map_err(sql_err)?;

        let mut markers = Vec::new();
        while let Some(row) = rows.next().map_err(sql_err)? {
            markers.push(row_to_marker(row)?);
        }
        Ok(markers)
    }
}

#[async_trait]
impl MarkerStore for MarkerRepository {
    async fn replace_for_store(&self, store_id: &str, markers: &[CategoryMarker]) -> DomainResult<()> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or_else(not_initialized)?;
        let now = chrono::Utc::now().timestamp_millis();

        let tx = conn.transaction().map_err(sql_err)?;
        tx.execute("DELETE FROM category_markers WHERE store_id = ?", params![store_id])
            .map_err(sql_err)?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO category_markers (id, store_id, name, display_order, anchor_item_id, updated_at)
                     VALUES (?, ?, ?, ?, ?, ?)",
                )
                .map_err(sql_err)?;
            for marker in markers {
                stmt.execute(params![
                    marker.id,
                    store_id,
                    marker.name,
                    marker.display_order,
                    marker.anchor_item_id,
                    now
                ])
                .map_err(sql_err)?;
            }
        }
        tx.commit().map_err(sql_err)?;

        log::debug!("Stored {} category markers for store {}", markers.len(), store_id);
        Ok(())
    }
}

/// Convert a database row to CategoryMarker
fn row_to_marker(row: &rusqlite::Row) -> DomainResult<CategoryMarker> {
    Ok(CategoryMarker {
        id: row.get(0).map_err(sql_err)?,
        name: row.get(1).map_err(sql_err)?,
        display_order: row.get(2).map_err(sql_err)?,
        anchor_item_id: row.get(3).map_err(sql_err)?,
    })
}
