//! Where kubestatus keeps its files
//!
//! The root config lives in the config dir, per-context overrides in the
//! data dir. Both honour an explicit `KUBESTATUS_*` override first. On Unix
//! the XDG variables and then `~/.config` / `~/.local/share` are used (also on
//! macOS, matching kubectl-adjacent tools); Windows uses the known folders.

use std::path::{Path, PathBuf};

use directories::{BaseDirs, ProjectDirs};

const APP_NAME: &str = "kubestatus";

/// How one of the two application directories is located
struct AppDir {
    override_var: &'static str,
    xdg_var: &'static str,
    home_relative: &'static [&'static str],
    known_folder: fn(&ProjectDirs) -> &Path,
}

const CONFIG_DIR: AppDir = AppDir {
    override_var: "KUBESTATUS_CONFIG_DIR",
    xdg_var: "XDG_CONFIG_HOME",
    home_relative: &[".config"],
    known_folder: ProjectDirs::config_dir,
};

const DATA_DIR: AppDir = AppDir {
    override_var: "KUBESTATUS_DATA_DIR",
    xdg_var: "XDG_DATA_HOME",
    home_relative: &[".local", "share"],
    known_folder: ProjectDirs::data_dir,
};

impl AppDir {
    fn resolve(&self, env: impl Fn(&str) -> Option<String>) -> PathBuf {
        if let Some(dir) = env(self.override_var).filter(|d| !d.is_empty()) {
            return PathBuf::from(dir);
        }

        if cfg!(windows) {
            if let Some(dirs) = ProjectDirs::from("", "", APP_NAME) {
                return (self.known_folder)(&dirs).to_path_buf();
            }
        }

        let base = env(self.xdg_var)
            .filter(|d| !d.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                let home = BaseDirs::new()
                    .map(|dirs| dirs.home_dir().to_path_buf())
                    .unwrap_or_else(|| PathBuf::from("."));
                self.home_relative.iter().fold(home, |path, part| path.join(part))
            });
        base.join(APP_NAME)
    }
}

fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Directory holding the root `config.yaml`
pub fn config_dir() -> PathBuf {
    CONFIG_DIR.resolve(process_env)
}

/// Directory holding per-context state
pub fn data_dir() -> PathBuf {
    DATA_DIR.resolve(process_env)
}

pub fn root_config_path() -> PathBuf {
    config_dir().join("config.yaml")
}

/// `<data_dir>/contexts/<context>/config.yaml`
pub fn context_config_path(context: &str) -> PathBuf {
    data_dir().join("contexts").join(context).join("config.yaml")
}

/// Create a directory (and parents) if it does not exist yet
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
