//! Menu Item Repository
//!
//! SQLite-backed storage for kiosk products and their placement.

use async_trait::async_trait;
use rusqlite::{params, params_from_iter};

use crate::domain::{DomainError, DomainResult, MenuItem};
use super::db::{not_initialized, sql_err, SharedConnection};
use super::traits::{MenuItemStore, Repository};

const COLUMNS: &str = "id, name, price_cents, sold_out, kiosk_enabled, display_order";

/// SQLite implementation of the menu item store
pub struct MenuItemRepository {
    conn: SharedConnection,
}

impl MenuItemRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    async fn query_one(&self, sql: &str, args: &[&str]) -> DomainResult<Option<MenuItem>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let mut stmt = conn.prepare(sql).map_err(sql_err)?;
        let mut rows = stmt.query(params_from_iter(args)).map_err(sql_err)?;

        match rows.next().map_err(sql_err)? {
            Some(row) => Ok(Some(row_to_menu_item(row)?)),
            None => Ok(None),
        }
    }

    async fn query_for_store(&self, sql: &str, store_id: &str) -> DomainResult<Vec<MenuItem>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let mut stmt = conn.prepare(sql).map_err(sql_err)?;
        let mut rows = stmt.query(params![store_id]).map_err(sql_err)?;

        let mut items = Vec::new();
        while let Some(row) = rows.next().map_err(sql_err)? {
            items.push(row_to_menu_item(row)?);
        }
        Ok(items)
    }
}

#[async_trait]
impl Repository<MenuItem> for MenuItemRepository {
    async fn find_by_id(&self, id: &String) -> DomainResult<Option<MenuItem>> {
        let sql = format!("SELECT {} FROM menu_items WHERE id = ?", COLUMNS);
        self.query_one(&sql, &[id.as_str()]).await
    }

    async fn list_for_store(&self, store_id: &str) -> DomainResult<Vec<MenuItem>> {
        let sql = format!(
            "SELECT {} FROM menu_items WHERE store_id = ? ORDER BY display_order, id",
            COLUMNS
        );
        self.query_for_store(&sql, store_id).await
    }
}

#[async_trait]
impl MenuItemStore for MenuItemRepository {
    async fn create(&self, store_id: &str, item: &MenuItem) -> DomainResult<MenuItem> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        conn.execute(
            "INSERT INTO menu_items (id, store_id, name, price_cents, sold_out, kiosk_enabled, display_order, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                item.id,
                store_id,
                item.name,
                item.price_cents,
                item.sold_out,
                item.kiosk_enabled,
                item.display_order,
                chrono::Utc::now().timestamp_millis()
            ],
        )
        .map_err(sql_err)?;

        Ok(item.clone())
    }

    async fn find_for_store(&self, store_id: &str, id: &str) -> DomainResult<Option<MenuItem>> {
        let sql = format!("SELECT {} FROM menu_items WHERE id = ? AND store_id = ?", COLUMNS);
        self.query_one(&sql, &[id, store_id]).await
    }

    async fn list_kiosk_enabled(&self, store_id: &str) -> DomainResult<Vec<MenuItem>> {
        let sql = format!(
            "SELECT {} FROM menu_items WHERE store_id = ? AND kiosk_enabled = 1 ORDER BY display_order, id",
            COLUMNS
        );
        self.query_for_store(&sql, store_id).await
    }

    async fn update_placement(
        &self,
        store_id: &str,
        id: &str,
        kiosk_enabled: bool,
        display_order: i32,
    ) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let changed = conn
            .execute(
                "UPDATE menu_items SET kiosk_enabled = ?, display_order = ?, updated_at = ?
                 WHERE id = ? AND store_id = ?",
                params![kiosk_enabled, display_order, chrono::Utc::now().timestamp_millis(), id, store_id],
            )
            .map_err(sql_err)?;

        if changed == 0 {
            return Err(DomainError::NotFound(format!("Menu item {} in store {}", id, store_id)));
        }
        Ok(())
    }
}

/// Convert a database row to MenuItem
fn row_to_menu_item(row: &rusqlite::Row) -> DomainResult<MenuItem> {
    Ok(MenuItem {
        id: row.get(0).map_err(sql_err)?,
        name: row.get(1).map_err(sql_err)?,
        price_cents: row.get(2).map_err(sql_err)?,
        sold_out: row.get(3).map_err(sql_err)?,
        kiosk_enabled: row.get(4).map_err(sql_err)?,
        display_order: row.get(5).map_err(sql_err)?,
    })
}
