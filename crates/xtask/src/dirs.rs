//! Data directory and character file resolution

use std::path::{Path, PathBuf};

/// Environment variable overriding the default data directory.
pub const DATA_DIR_ENV: &str = "BUILDER_DATA_DIR";

/// Pick the data directory for a command.
///
/// Priority: explicit `--data` flag, then `BUILDER_DATA_DIR`, then the data
/// set bundled with `builder-content`.
pub fn data_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
        .unwrap_or_else(bundled_data_dir)
}

/// The sample data set shipped in the workspace.
pub fn bundled_data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("builder")
        .join("content")
        .join("data")
}

/// Resolve a character argument to a file path.
///
/// Anything that looks like a path (has an extension or a separator) is used
/// as-is; a bare name means `characters/{name}.ron` inside the data directory.
pub fn character_path(data_dir: &Path, character: &str) -> PathBuf {
    let candidate = Path::new(character);
    if candidate.extension().is_some() || candidate.components().count() > 1 {
        candidate.to_path_buf()
    } else {
        data_dir.join("characters").join(format!("{}.ron", character))
    }
}
