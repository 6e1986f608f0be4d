use log::debug;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::FinderError;
use crate::model::Recipe;

const APP_DIR: &str = "recipe-finder";
const RESULTS_FILE: &str = "last_results.json";

/// Keeps the last successful result list on disk between sessions
#[derive(Debug, Clone)]
pub struct ResultStore {
    path: PathBuf,
}

impl ResultStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/recipe-finder/last_results.json`, if the platform has a data dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join(APP_DIR).join(RESULTS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file means nothing was stored yet
    pub async fn load(&self) -> Result<Vec<Recipe>, FinderError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let recipes: Vec<Recipe> = serde_json::from_slice(&bytes)?;
        debug!("Restored {} recipe(s) from {}", recipes.len(), self.path.display());
        Ok(recipes)
    }

    pub async fn save(&self, recipes: &[Recipe]) -> Result<(), FinderError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(recipes)?;
        tokio::fs::write(&self.path, json).await?;
        debug!("Stored {} recipe(s) in {}", recipes.len(), self.path.display());
        Ok(())
    }
}
