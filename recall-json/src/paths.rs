use directories::ProjectDirs;
use std::path::PathBuf;

pub fn data_root() -> PathBuf {
    if let Some(pd) = ProjectDirs::from("com", "recall", "Recall") {
        pd.data_dir().to_path_buf()
    } else {
        // Fallback: current dir
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }
}

pub fn collection_file(root: &std::path::Path, key: &str) -> PathBuf {
    root.join(format!("{key}.json"))
}

pub fn backups_dir(root: &std::path::Path) -> PathBuf {
    root.join("backups")
}
