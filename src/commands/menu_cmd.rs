//! Menu Editor Commands
//!
//! Every mutating handler holds the working-menu lock from the sequencer call
//! through the storage write, so rapid drag events apply one at a time.
//! Storage always receives both derived collections together: the store's
//! finalized markers and the placement of every listed item.

use crate::domain::{CategoryMarker, DomainError, DomainResult};
use crate::repository::{MarkerStore, MenuItemStore, Repository};
use crate::sequencer::{self, DropTarget, MarkerPosition, Section, Sequence};
use crate::AppState;

/// Reload the store's menu from storage into the working copy
pub async fn load_menu(state: &AppState) -> Result<Sequence, String> {
    let loaded = async {
        let items = state.items.list_kiosk_enabled(&state.store_id).await?;
        let markers = state.markers.list_for_store(&state.store_id).await?;
        DomainResult::Ok(sequencer::build(items, markers))
    }
    .await
    .map_err(|e| failed("load_menu", e))?;

    log::info!("Loaded kiosk menu for store {} ({} entries)", state.store_id, loaded.len());
    *state.sequence.lock().await = loaded.clone();
    Ok(loaded)
}

/// Current working menu
pub async fn get_menu(state: &AppState) -> Sequence {
    state.sequence.lock().await.clone()
}

/// Menu grouped by category, as the kiosk lists it
pub async fn list_sections(state: &AppState) -> Vec<Section> {
    state.sequence.lock().await.sections()
}

/// Put an existing product on the kiosk menu at `at` (append when None)
pub async fn add_menu_item(state: &AppState, item_id: String, at: Option<usize>) -> Result<Sequence, String> {
    async {
        let mut item = state
            .items
            .find_for_store(&state.store_id, &item_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Menu item {}", item_id)))?;
        item.kiosk_enabled = true;

        apply(state, |seq| sequencer::insert_menu_item(seq, item, at)).await
    }
    .await
    .map_err(|e| failed("add_menu_item", e))
}

/// Take a product off the kiosk menu
///
/// The product is disabled in storage before the rest of the menu is written;
/// the working menu changes only after every write succeeds.
pub async fn remove_menu_item(state: &AppState, item_id: String) -> Result<Sequence, String> {
    async {
        let mut current = state.sequence.lock().await;
        let next = sequencer::remove_menu_item(&current, &item_id)?;

        state
            .items
            .update_placement(&state.store_id, &item_id, false, 0)
            .await?;
        commit(state, &mut current, next).await
    }
    .await
    .map_err(|e| failed("remove_menu_item", e))
}

/// Create a category divider; its id comes from the state's id generator
pub async fn add_category(state: &AppState, name: String, at: MarkerPosition) -> Result<CategoryMarker, String> {
    async {
        let id = state.ids.next_id();
        let next = apply(state, |seq| sequencer::insert_marker(seq, id.clone(), name, at)).await?;
        next.marker(&id)
            .cloned()
            .ok_or_else(|| DomainError::Internal(format!("Category marker {} missing after insert", id)))
    }
    .await
    .map_err(|e| failed("add_category", e))
}

pub async fn remove_category(state: &AppState, marker_id: String) -> Result<Sequence, String> {
    apply(state, |seq| sequencer::remove_marker(seq, &marker_id))
        .await
        .map_err(|e| failed("remove_category", e))
}

/// Rename a category. A blank name stays in the working menu only.
pub async fn rename_category(state: &AppState, marker_id: String, name: String) -> Result<Sequence, String> {
    apply(state, |seq| sequencer::rename_marker(seq, &marker_id, name))
        .await
        .map_err(|e| failed("rename_category", e))
}

/// Confirm a category's name and store it
pub async fn finalize_category(state: &AppState, marker_id: String) -> Result<CategoryMarker, String> {
    async {
        let current = state.sequence.lock().await;
        let marker = current
            .marker(&marker_id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("Category marker {}", marker_id)))?;

        if !marker.is_finalized() {
            return Err(DomainError::InvalidName("Category name cannot be empty".to_string()));
        }

        persist(state, &current).await?;
        DomainResult::Ok(marker)
    }
    .await
    .map_err(|e| failed("finalize_category", e))
}

/// Move the entry at `from` to index `to`
pub async fn move_entry(state: &AppState, from: usize, to: usize) -> Result<Sequence, String> {
    apply(state, |seq| sequencer::reorder(seq, from, to))
        .await
        .map_err(|e| failed("move_entry", e))
}

/// Drop the entry at `from` onto a gap reported by the drag-and-drop UI
///
/// A drop that leaves the entry in place returns the menu unchanged.
pub async fn drop_entry(state: &AppState, from: usize, target: DropTarget) -> Result<Sequence, String> {
    async {
        let mut current = state.sequence.lock().await;
        let Some((from, to)) = sequencer::resolve_drop(current.len(), from, target)? else {
            log::debug!("Drop of entry {} onto {:?} is a no-op", from, target);
            return Ok(current.clone());
        };

        let next = sequencer::reorder(&current, from, to)?;
        commit(state, &mut current, next).await
    }
    .await
    .map_err(|e| failed("drop_entry", e))
}

/// Run one sequencer operation against the working menu and store the result
async fn apply<F>(state: &AppState, op: F) -> DomainResult<Sequence>
where
    F: FnOnce(&Sequence) -> DomainResult<Sequence>,
{
    let mut current = state.sequence.lock().await;
    let next = op(&*current)?;
    commit(state, &mut current, next).await
}

/// Persist `next`, then make it the working menu
async fn commit(state: &AppState, current: &mut Sequence, next: Sequence) -> DomainResult<Sequence> {
    persist(state, &next).await?;
    *current = next.clone();
    Ok(next)
}

/// Write both derived collections: finalized markers and every item's placement
async fn persist(state: &AppState, seq: &Sequence) -> DomainResult<()> {
    let markers: Vec<CategoryMarker> = seq
        .markers()
        .into_iter()
        .filter(CategoryMarker::is_finalized)
        .collect();
    state.markers.replace_for_store(&state.store_id, &markers).await?;

    for item in seq.items() {
        state
            .items
            .update_placement(&state.store_id, &item.id, true, item.display_order)
            .await?;
    }

    log::debug!(
        "Persisted menu for store {}: {} entries, {} stored markers",
        state.store_id,
        seq.len(),
        markers.len()
    );
    Ok(())
}

fn failed(command: &str, e: DomainError) -> String {
    log::warn!("{} failed: {}", command, e);
    e.to_string()
}
