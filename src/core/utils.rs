use dirs::home_dir;
use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::Result;

const DEFAULT_DIR_NAME: &str = ".expense_ledger";
const CONFIG_FILE: &str = "config.json";
const SLOT_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "EXPENSE_LEDGER_HOME";

/// Returns the application-specific data directory, defaulting to `~/.expense_ledger`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

/// Resolves the file backing a named storage slot.
pub fn slot_file_in(base: &Path, slot: &str) -> PathBuf {
    base.join(format!("{}.{}", canonical_slot(slot), SLOT_EXTENSION))
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

pub fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Stages `data` next to `path` and renames it into place.
pub fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn canonical_slot(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "transactions".into()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn slot_names_are_sanitized() {
        let base = Path::new("/data");
        assert_eq!(slot_file_in(base, "transactions"), base.join("transactions.json"));
        assert_eq!(slot_file_in(base, "My Ledger"), base.join("my_ledger.json"));
        assert_eq!(slot_file_in(base, "  "), base.join("transactions.json"));
    }

    #[test]
    fn tmp_path_appends_suffix() {
        assert_eq!(
            tmp_path(Path::new("/data/transactions.json")),
            PathBuf::from("/data/transactions.json.tmp")
        );
    }

    #[test]
    fn write_atomic_leaves_no_staging_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("slot.json");
        write_atomic(&path, "[]").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
        assert!(!tmp_path(&path).exists());
    }
}
