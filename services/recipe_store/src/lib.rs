//! Named-recipe persistence
//!
//! Stores [`SavedRecipe`] values in a single JSON file, newest first.
//! Saving and loading exchange independent copies of the settings snapshot
//! only: a stored recipe never aliases live editor state, and mutating a
//! loaded snapshot never touches the store. Rewrites are atomic (write to
//! a temp file in the same directory, then rename over the target), so a
//! crash mid-save leaves the previous file intact.

use anyhow::{Context, Result};
use chrono::Utc;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use types::{MixSettings, SavedRecipe};
use uuid::Uuid;

/// File-backed store of named recipes.
pub struct RecipeStore {
    path: PathBuf,
    recipes: Vec<SavedRecipe>,
}

impl RecipeStore {
    /// Open the store at `path`, reading the recipe file if it exists.
    ///
    /// A missing file means an empty store; a corrupt file is an error
    /// rather than a silent reset.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let recipes = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed to read recipe file {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("recipe file {} is not valid", path.display()))?
        } else {
            Vec::new()
        };
        debug!(count = recipes.len(), path = %path.display(), "recipe store opened");
        Ok(Self { path, recipes })
    }

    /// Store an independent copy of `settings` under `name` and flush.
    ///
    /// Returns the stored recipe with its fresh id and timestamp. Names are
    /// not required to be unique; lookups resolve to the newest match.
    pub fn save(&mut self, name: &str, settings: &MixSettings) -> Result<SavedRecipe> {
        let recipe = SavedRecipe {
            id: Uuid::new_v4(),
            name: name.to_string(),
            saved_at: Utc::now(),
            settings: settings.clone(),
        };
        self.recipes.insert(0, recipe.clone());
        self.flush()?;
        info!(name, id = %recipe.id, "recipe saved");
        Ok(recipe)
    }

    /// All recipes, newest first.
    pub fn list(&self) -> &[SavedRecipe] {
        &self.recipes
    }

    /// The newest recipe with the given name.
    pub fn find(&self, name: &str) -> Option<&SavedRecipe> {
        self.recipes.iter().find(|recipe| recipe.name == name)
    }

    /// An owned copy of the stored settings; the store keeps its own.
    pub fn load(&self, name: &str) -> Option<MixSettings> {
        self.find(name).map(|recipe| recipe.settings.clone())
    }

    /// Remove every recipe with the given name. Returns whether anything
    /// was removed; removing nothing does not rewrite the file.
    pub fn delete(&mut self, name: &str) -> Result<bool> {
        let before = self.recipes.len();
        self.recipes.retain(|recipe| recipe.name != name);
        if self.recipes.len() == before {
            return Ok(false);
        }
        self.flush()?;
        info!(name, removed = before - self.recipes.len(), "recipe deleted");
        Ok(true)
    }

    /// Rewrite the recipe file atomically.
    fn flush(&self) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create data directory {}", parent.display())
                })?;
                parent
            }
            _ => Path::new("."),
        };

        let mut tmp = tempfile::NamedTempFile::new_in(dir)
            .context("failed to create temporary recipe file")?;
        serde_json::to_writer_pretty(&mut tmp, &self.recipes)
            .context("failed to serialize recipes")?;
        tmp.write_all(b"\n")?;
        tmp.persist(&self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    fn store_in(dir: &Path) -> RecipeStore {
        RecipeStore::open(dir.join("recipes.json")).unwrap()
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let mut store = store_in(dir.path());

        let settings = MixSettings::default();
        let saved = store.save("daily", &settings).unwrap();
        assert_eq!(saved.settings, settings);

        let loaded = store.load("daily").unwrap();
        assert_eq!(loaded, settings);
        assert!(store.load("unknown").is_none());
    }

    #[test]
    fn test_loaded_settings_are_independent_copies() {
        let dir = tempdir().unwrap();
        let mut store = store_in(dir.path());
        store.save("daily", &MixSettings::default()).unwrap();

        let mut loaded = store.load("daily").unwrap();
        loaded.target_volume_ml = dec!(999);

        // The store still holds the original value.
        assert_eq!(
            store.load("daily").unwrap().target_volume_ml,
            MixSettings::default().target_volume_ml
        );
    }

    #[test]
    fn test_reopen_reads_back_saved_recipes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("recipes.json");

        let mut store = RecipeStore::open(&path).unwrap();
        store.save("first", &MixSettings::default()).unwrap();
        store.save("second", &MixSettings::default()).unwrap();
        drop(store);

        let store = RecipeStore::open(&path).unwrap();
        assert_eq!(store.list().len(), 2);
        // Newest first
        assert_eq!(store.list()[0].name, "second");
        assert_eq!(store.list()[1].name, "first");
    }

    #[test]
    fn test_delete() {
        let dir = tempdir().unwrap();
        let mut store = store_in(dir.path());
        store.save("keep", &MixSettings::default()).unwrap();
        store.save("drop", &MixSettings::default()).unwrap();

        assert!(store.delete("drop").unwrap());
        assert!(!store.delete("drop").unwrap());
        assert_eq!(store.list().len(), 1);
        assert_eq!(store.list()[0].name, "keep");
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("recipes.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(RecipeStore::open(&path).is_err());
    }

    #[test]
    fn test_missing_parent_directory_is_created() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/data/recipes.json");
        let mut store = RecipeStore::open(&path).unwrap();
        store.save("daily", &MixSettings::default()).unwrap();
        assert!(path.exists());
    }
}
