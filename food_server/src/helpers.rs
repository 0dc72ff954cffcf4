use std::{fs, io, path::Path};

use log::debug;

/// Makes sure the directory holding a SQLite database file exists, since SQLite will create the file but not its
/// parent directories. In-memory databases and other URL schemes are left alone.
pub fn prepare_sqlite_path(url: &str) -> io::Result<()> {
    let Some(path) = url.strip_prefix("sqlite://").or_else(|| url.strip_prefix("sqlite:")) else {
        return Ok(());
    };
    let path = path.split('?').next().unwrap_or_default();
    if path.is_empty() || path.starts_with(":memory:") {
        return Ok(());
    }
    match Path::new(path).parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
            debug!("🗃️ Creating database directory {}", dir.display());
            fs::create_dir_all(dir)
        },
        _ => Ok(()),
    }
}
