use std::fs;
use std::path::{Path, PathBuf};
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use crate::error::Result;

/// Manages paths for uniscout configuration and data
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory (~/.uniscout)
    pub root: PathBuf,
    /// Configuration file path (~/.uniscout/config.toml)
    pub config_file: PathBuf,
    /// Key-value store directory (~/.uniscout/store)
    pub store_dir: PathBuf,
}

impl Paths {
    /// Create a new Paths instance using the user's home directory
    pub fn new() -> Result<Self> {
        let home = std::env::var("HOME")?;
        Ok(Self::under(PathBuf::from(home).join(".uniscout")))
    }

    /// Lay out all paths beneath an explicit root
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            config_file: root.join("config.toml"),
            store_dir: root.join("store"),
            root,
        }
    }

    /// Ensure the root directory exists with proper permissions
    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;

        // 700: the store holds password hashes
        #[cfg(unix)]
        {
            let perms = fs::Permissions::from_mode(0o700);
            fs::set_permissions(&self.root, perms)?;
        }

        Ok(())
    }

    /// Check if the config file exists
    pub fn config_exists(&self) -> bool {
        self.config_file.exists()
    }
}
