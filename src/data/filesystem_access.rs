//! Represents the directories a post-processing config may be looked up in.
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "postprocess.json";

#[derive(Debug)]
pub enum FsAccess {
    Config,
    Current,
}

impl FsAccess {
    /// Returns the directory for this location, e.g. `~/.config/bvr` or the working directory.
    pub fn path(&self) -> anyhow::Result<PathBuf> {
        let base_path = match self {
            FsAccess::Config => dirs::config_dir().map(|dir| dir.join("bvr")),
            FsAccess::Current => std::env::current_dir().ok(),
        };

        base_path.ok_or_else(|| {
            anyhow::anyhow!("Unsupported operating system. Supported OS: Linux, MacOS, Windows.")
        })
    }

    /// Finds an existing `postprocess.json`, preferring the working directory over `~/.config/bvr`.
    ///
    /// Nothing is created when neither location holds one.
    pub fn find_config() -> Option<PathBuf> {
        [FsAccess::Current, FsAccess::Config]
            .iter()
            .filter_map(|fs| fs.path().ok())
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .find(|candidate| candidate.is_file())
    }
}
