// File: ./src/storage.rs
// Persists converted namespaces as versioned JSON files.
use crate::context::AppContext;
use crate::model::Namespace;
use anyhow::{Context, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const IMPORT_STORAGE_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct ImportData {
    version: u32,
    namespace: Namespace,
}

pub struct ImportStorage;

impl ImportStorage {
    /// File name for a namespace title: lowercase alphanumerics joined by hyphens.
    pub fn file_name_for(title: &str) -> String {
        let mut slug = String::new();
        for c in title.chars() {
            if c.is_alphanumeric() {
                slug.extend(c.to_lowercase());
            } else if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        }
        let slug = slug.trim_end_matches('-');
        if slug.is_empty() {
            "import.json".to_string()
        } else {
            format!("{}.json", slug)
        }
    }

    pub fn path_for(ctx: &dyn AppContext, title: &str) -> Result<PathBuf> {
        Ok(ctx.get_import_dir()?.join(Self::file_name_for(title)))
    }

    /// Saves into the context's import directory and returns the file written.
    pub fn save(ctx: &dyn AppContext, namespace: &Namespace, pretty: bool) -> Result<PathBuf> {
        let path = Self::path_for(ctx, &namespace.title)?;
        Self::save_to_path(&path, namespace, pretty)?;
        Ok(path)
    }

    pub fn save_to_path(path: &Path, namespace: &Namespace, pretty: bool) -> Result<()> {
        Self::with_lock(path, || {
            let data = ImportData {
                version: IMPORT_STORAGE_VERSION,
                namespace: namespace.clone(),
            };
            let json = if pretty {
                serde_json::to_string_pretty(&data)?
            } else {
                serde_json::to_string(&data)?
            };
            Self::atomic_write(path, json)?;
            Ok(())
        })
        .with_context(|| format!("Failed to save import to '{}'", path.display()))?;
        log::info!(
            "Saved '{}' ({} lists) to {}",
            namespace.title,
            namespace.lists.len(),
            path.display()
        );
        Ok(())
    }

    pub fn load_from_path(path: &Path) -> Result<Namespace> {
        if !path.exists() {
            anyhow::bail!("Import file not found: {}", path.display());
        }
        Self::with_lock(path, || {
            let json = fs::read_to_string(path)?;
            let data: ImportData = serde_json::from_str(&json)
                .map_err(|e| anyhow::anyhow!("Failed to parse '{}': {}", path.display(), e))?;
            if data.version != IMPORT_STORAGE_VERSION {
                anyhow::bail!(
                    "Unsupported import file version {} (expected {})",
                    data.version,
                    IMPORT_STORAGE_VERSION
                );
            }
            Ok(data.namespace)
        })
    }

    /// Sidecar lock file path: `foo.json` -> `foo.json.lock`.
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = lock_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }
}
