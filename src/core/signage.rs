use crate::core::SelectionStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use regex::Regex;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SignItem {
    pub id: &'static str,
    pub name: &'static str,
    pub src: &'static str,
    pub alt: &'static str,
}

pub const SIGNAGE_ITEMS: &[SignItem] = &[
    SignItem {
        id: "countertop-sign",
        name: "Countertop Sign",
        src: "https://i.postimg.cc/V64YDzmc/countertop-Sign.png",
        alt: "Countertop sign for flagship stashpoints",
    },
    SignItem {
        id: "floor-mat",
        name: "Floor Mat",
        src: "https://i.postimg.cc/pTk2qPRb/floorMat.png",
        alt: "Floor mat for flagship stashpoints",
    },
    SignItem {
        id: "opening-hours",
        name: "Opening Hours",
        src: "https://i.postimg.cc/1tM9Jys1/opening-Times-Sign.png",
        alt: "Opening hours sign for flagship stashpoints",
    },
    SignItem {
        id: "pavement-sign",
        name: "Pavement Sign",
        src: "https://i.postimg.cc/ZRjTVJ4T/pavement-Sign.png",
        alt: "Pavement sign for flagship stashpoints",
    },
    SignItem {
        id: "flag",
        name: "Flag",
        src: "https://i.postimg.cc/KzQZJmFH/flag.png",
        alt: "Flag for flagship stashpoints",
    },
    SignItem {
        id: "neon-sign",
        name: "Neon Sign",
        src: "https://i.postimg.cc/V64YDzm8/neonSign.png",
        alt: "Neon sign for flagship stashpoints",
    },
];

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// `flagship-signs-<business name, lowercased, whitespace runs as '-'>`
pub fn storage_key(business_name: &str) -> String {
    format!(
        "flagship-signs-{}",
        WHITESPACE_RUN.replace_all(&business_name.to_lowercase(), "-")
    )
}

pub fn is_catalog_item(id: &str) -> bool {
    SIGNAGE_ITEMS.iter().any(|item| item.id == id)
}

/// Ordered set of picked sign ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignageSelection {
    ids: Vec<String>,
}

impl SignageSelection {
    pub fn new(ids: Vec<String>) -> Self {
        let mut selection = Self::default();
        for id in ids {
            if !selection.is_selected(&id) {
                selection.ids.push(id);
            }
        }
        selection
    }

    /// Like [`SignageSelection::new`], dropping ids that are not in the catalog.
    pub fn from_catalog(ids: Vec<String>) -> Self {
        Self::new(ids.into_iter().filter(|id| is_catalog_item(id)).collect())
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    /// Appends `id` if absent, removes it if present.
    pub fn toggle(&mut self, id: &str) {
        if self.is_selected(id) {
            self.ids.retain(|s| s != id);
        } else {
            self.ids.push(id.to_string());
        }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Value of the hidden `selectedSigns` form field.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.ids).unwrap_or_else(|_| "[]".to_string())
    }
}

/// Reads a selection, treating any store failure as "nothing selected".
pub async fn load_selection(store: &dyn SelectionStore, key: &str) -> SignageSelection {
    match store.load(key).await {
        Ok(ids) => SignageSelection::new(ids.unwrap_or_default()),
        Err(e) => {
            tracing::debug!(key, error = %e, "selection store unavailable, starting empty");
            SignageSelection::default()
        }
    }
}

/// Persists a selection; failures are logged and dropped.
pub async fn save_selection(store: &dyn SelectionStore, key: &str, selection: &SignageSelection) {
    if let Err(e) = store.save(key, selection.ids()).await {
        tracing::debug!(key, error = %e, "selection not persisted");
    }
}

/// Fallback when no storage is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSelectionStore;

#[async_trait]
impl SelectionStore for NoopSelectionStore {
    async fn load(&self, _key: &str) -> Result<Option<Vec<String>>> {
        Ok(None)
    }

    async fn save(&self, _key: &str, _selected: &[String]) -> Result<()> {
        Ok(())
    }
}

/// One JSON array per key under `base_path`.
#[derive(Debug, Clone)]
pub struct FileSelectionStore {
    base_path: PathBuf,
}

impl FileSelectionStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base_path.join(format!("{}.json", file_name))
    }
}

#[async_trait]
impl SelectionStore for FileSelectionStore {
    async fn load(&self, key: &str) -> Result<Option<Vec<String>>> {
        let path = self.path_for(key);
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Some(serde_json::from_slice(&data)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, key: &str, selected: &[String]) -> Result<()> {
        tokio::fs::create_dir_all(&self.base_path).await?;
        let data = serde_json::to_vec(selected)?;
        tokio::fs::write(self.path_for(key), data).await?;
        Ok(())
    }
}
