use crate::errors::AppError;
use crate::models::{Item, TodoData, TodoList};
use std::{path::Path, path::PathBuf, sync::Arc};
use tokio::{fs, sync::Mutex};
use tracing::info;
use uuid::Uuid;

/// Handle to the JSON document store.
///
/// Every call re-reads the document from disk; writes are persisted before the
/// lock is released, so read-modify-write operations never interleave.
#[derive(Clone)]
pub struct TodoStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl TodoStore {
    /// Opens the store, failing if an existing document cannot be read or parsed.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let data = load_data(&path).await?;
        info!(
            "opened store at {} ({} items, {} lists)",
            path.display(),
            data.items.len(),
            data.lists.len()
        );

        Ok(Self {
            path,
            lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn list_default_items(&self) -> Result<Vec<Item>, AppError> {
        Ok(self.read().await?.items)
    }

    pub async fn find_item_by_id(&self, id: Uuid) -> Result<Option<Item>, AppError> {
        let data = self.read().await?;
        Ok(data.items.into_iter().find(|item| item.id == id))
    }

    pub async fn add_default_item(&self, item: Item) -> Result<(), AppError> {
        self.modify(|data| {
            data.items.push(item);
            ((), true)
        })
        .await
    }

    pub async fn toggle_default_item(&self, id: Uuid) -> Result<Option<Item>, AppError> {
        self.modify(|data| {
            let toggled = toggle(&mut data.items, id);
            let changed = toggled.is_some();
            (toggled, changed)
        })
        .await
    }

    pub async fn delete_default_item(&self, id: Uuid) -> Result<bool, AppError> {
        self.modify(|data| {
            let removed = remove(&mut data.items, id);
            (removed, removed)
        })
        .await
    }

    pub async fn find_list_by_name(&self, name: &str) -> Result<Option<TodoList>, AppError> {
        let data = self.read().await?;
        Ok(data.lists.into_iter().find(|list| list.name == name))
    }

    /// Looks up a single embedded item of a named list.
    pub async fn find_list_item(&self, name: &str, id: Uuid) -> Result<Option<Item>, AppError> {
        let data = self.read().await?;
        Ok(data
            .lists
            .into_iter()
            .find(|list| list.name == name)
            .and_then(|list| list.items.into_iter().find(|item| item.id == id)))
    }

    /// Appends to a named list, creating the list if it does not exist yet.
    /// Returns `true` when the list was created.
    pub async fn append_item_to_list(&self, name: &str, item: Item) -> Result<bool, AppError> {
        self.modify(|data| match find_list_mut(data, name) {
            Some(list) => {
                list.items.push(item);
                (false, true)
            }
            None => {
                let mut list = TodoList::new(name);
                list.items.push(item);
                data.lists.push(list);
                (true, true)
            }
        })
        .await
    }

    pub async fn toggle_list_item(&self, name: &str, id: Uuid) -> Result<Option<Item>, AppError> {
        self.modify(|data| {
            let toggled = find_list_mut(data, name).and_then(|list| toggle(&mut list.items, id));
            let changed = toggled.is_some();
            (toggled, changed)
        })
        .await
    }

    /// Pulls an item out of a named list. `None` when the list does not exist;
    /// `Some(false)` when the list exists but holds no such item.
    pub async fn remove_item_from_list(
        &self,
        name: &str,
        id: Uuid,
    ) -> Result<Option<bool>, AppError> {
        self.modify(|data| {
            let removed = find_list_mut(data, name).map(|list| remove(&mut list.items, id));
            (removed, removed == Some(true))
        })
        .await
    }

    /// Inserts an empty list unless one with this name already exists.
    pub async fn create_list(&self, name: &str) -> Result<bool, AppError> {
        self.modify(|data| {
            if data.lists.iter().any(|list| list.name == name) {
                (false, false)
            } else {
                data.lists.push(TodoList::new(name));
                (true, true)
            }
        })
        .await
    }

    async fn read(&self) -> Result<TodoData, AppError> {
        let _guard = self.lock.lock().await;
        load_data(&self.path).await
    }

    /// Runs `apply` against the current document and persists it when the
    /// closure reports a change.
    async fn modify<T>(
        &self,
        apply: impl FnOnce(&mut TodoData) -> (T, bool),
    ) -> Result<T, AppError> {
        let _guard = self.lock.lock().await;
        let mut data = load_data(&self.path).await?;
        let (result, changed) = apply(&mut data);
        if changed {
            persist_data(&self.path, &data).await?;
        }
        Ok(result)
    }
}

fn find_list_mut<'a>(data: &'a mut TodoData, name: &str) -> Option<&'a mut TodoList> {
    data.lists.iter_mut().find(|list| list.name == name)
}

fn toggle(items: &mut [Item], id: Uuid) -> Option<Item> {
    let item = items.iter_mut().find(|item| item.id == id)?;
    item.is_checked = !item.is_checked;
    Some(item.clone())
}

fn remove(items: &mut Vec<Item>, id: Uuid) -> bool {
    let before = items.len();
    items.retain(|item| item.id != id);
    items.len() != before
}

async fn load_data(path: &Path) -> Result<TodoData, AppError> {
    match fs::read(path).await {
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(TodoData::default()),
        Err(err) => Err(err.into()),
    }
}

/// Writes a sibling temp file and renames it over the store, so readers only
/// ever see a complete document.
async fn persist_data(path: &Path, data: &TodoData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data)?;
    let temp_path = path.with_extension(format!("{}.tmp", Uuid::new_v4().simple()));
    fs::write(&temp_path, payload).await?;
    if let Err(err) = fs::rename(&temp_path, path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(err.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn scratch_store() -> (TempDir, TodoStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = TodoStore::open(dir.path().join("db/todolist.json"))
            .await
            .unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn default_items_start_unchecked() {
        let (_dir, store) = scratch_store().await;
        let item = Item::new("Buy milk");
        store.add_default_item(item.clone()).await.unwrap();

        let items = store.list_default_items().await.unwrap();
        assert_eq!(items, vec![item.clone()]);
        assert!(!items[0].is_checked);
        assert_eq!(store.find_item_by_id(item.id).await.unwrap(), Some(item));
    }

    #[tokio::test]
    async fn toggling_twice_restores_state() {
        let (_dir, store) = scratch_store().await;
        let item = Item::new("Walk dog");
        store.add_default_item(item.clone()).await.unwrap();

        let once = store.toggle_default_item(item.id).await.unwrap().unwrap();
        assert!(once.is_checked);
        let twice = store.toggle_default_item(item.id).await.unwrap().unwrap();
        assert!(!twice.is_checked);

        assert_eq!(store.toggle_default_item(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let (_dir, store) = scratch_store().await;
        let keep = Item::new("keep");
        let gone = Item::new("gone");
        store.add_default_item(keep.clone()).await.unwrap();
        store.add_default_item(gone.clone()).await.unwrap();

        assert!(store.delete_default_item(gone.id).await.unwrap());
        assert!(!store.delete_default_item(gone.id).await.unwrap());
        assert_eq!(store.list_default_items().await.unwrap(), vec![keep]);
    }

    #[tokio::test]
    async fn named_list_items_keep_insertion_order() {
        let (_dir, store) = scratch_store().await;
        assert!(store.create_list("Work").await.unwrap());
        assert!(!store.create_list("Work").await.unwrap());

        let first = Item::new("first");
        let second = Item::new("second");
        assert!(!store.append_item_to_list("Work", first.clone()).await.unwrap());
        assert!(!store.append_item_to_list("Work", second.clone()).await.unwrap());

        let list = store.find_list_by_name("Work").await.unwrap().unwrap();
        assert_eq!(list.items, vec![first, second]);
    }

    #[tokio::test]
    async fn append_creates_missing_list() {
        let (_dir, store) = scratch_store().await;
        let item = Item::new("Buy milk");
        assert!(store.append_item_to_list("Groceries", item.clone()).await.unwrap());

        let list = store.find_list_by_name("Groceries").await.unwrap().unwrap();
        assert_eq!(list.items, vec![item]);
        assert!(store.list_default_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_item_toggle_and_remove() {
        let (_dir, store) = scratch_store().await;
        let item = Item::new("Ship it");
        store.append_item_to_list("Work", item.clone()).await.unwrap();

        let toggled = store.toggle_list_item("Work", item.id).await.unwrap().unwrap();
        assert!(toggled.is_checked);
        assert_eq!(
            store.find_list_item("Work", item.id).await.unwrap(),
            Some(toggled)
        );
        assert_eq!(store.toggle_list_item("Home", item.id).await.unwrap(), None);

        assert_eq!(store.remove_item_from_list("Work", item.id).await.unwrap(), Some(true));
        assert_eq!(store.remove_item_from_list("Work", item.id).await.unwrap(), Some(false));
        assert_eq!(store.remove_item_from_list("Home", item.id).await.unwrap(), None);
        assert!(store.find_list_by_name("Home").await.unwrap().is_none());
        assert_eq!(store.find_list_item("Work", item.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn reopening_sees_persisted_data() {
        let (_dir, store) = scratch_store().await;
        store.create_list("Work").await.unwrap();

        let reopened = TodoStore::open(store.path()).await.unwrap();
        assert!(reopened.find_list_by_name("Work").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn persist_replaces_document_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todolist.json");
        let store = TodoStore::open(&path).await.unwrap();

        for n in 0..5 {
            store.add_default_item(Item::new(format!("task {n}"))).await.unwrap();
            store.append_item_to_list("Work", Item::new(format!("work {n}"))).await.unwrap();

            let bytes = std::fs::read(&path).unwrap();
            let data: TodoData = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(data.items.len(), n + 1);
            assert_eq!(data.lists[0].items.len(), n + 1);
        }

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("todolist.json")]);
    }

    #[tokio::test]
    async fn requests_fail_once_document_is_corrupted() {
        let (_dir, store) = scratch_store().await;
        let item = Item::new("Buy milk");
        store.add_default_item(item.clone()).await.unwrap();

        let bytes = std::fs::read(store.path()).unwrap();
        std::fs::write(store.path(), &bytes[..bytes.len() / 2]).unwrap();

        let err = store.list_default_items().await.err().unwrap();
        assert!(err.status.is_server_error());
        let err = store.toggle_default_item(item.id).await.err().unwrap();
        assert!(err.status.is_server_error());
    }

    #[tokio::test]
    async fn open_rejects_corrupt_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todolist.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let err = TodoStore::open(&path).await.err().unwrap();
        assert!(err.status.is_server_error());
    }
}
