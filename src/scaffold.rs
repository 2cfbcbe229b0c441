//! Starter-file scaffolding for `devcmd init`

use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::config_file::CONFIG_DIR;
use crate::style::Paint;

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("Unable to write starter file: {0}")]
    Io(#[from] std::io::Error),
}

const BASE_FILES: [(&str, &str); 1] = [("cmd.yaml", include_str!("../templates/cmd.yaml"))];

const GO_FILES: [(&str, &str); 4] = [
    ("cmd.yaml", include_str!("../templates/go/cmd.yaml")),
    (
        "devcontainer.json",
        include_str!("../templates/go/devcontainer.json"),
    ),
    (
        "devcontainer.env",
        include_str!("../templates/go/devcontainer.env"),
    ),
    (
        "devcontainer.sh",
        include_str!("../templates/go/devcontainer.sh"),
    ),
];

/// Which starter file set `init` writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaffoldKind {
    /// A bare `cmd.yaml` to fill in.
    Base,
    /// A Go project devcontainer: config plus container definition files.
    Go,
}

impl ScaffoldKind {
    fn files(self) -> &'static [(&'static str, &'static str)] {
        match self {
            ScaffoldKind::Base => &BASE_FILES,
            ScaffoldKind::Go => &GO_FILES,
        }
    }
}

/// Write the starter `.devcontainer` files for `kind` into `cwd`.
///
/// Files that already exist are reported and left untouched.
///
/// # Errors
///
/// Returns `ScaffoldError::Io` if the directory or a file cannot be written.
pub fn run(kind: ScaffoldKind, cwd: &Path) -> Result<(), ScaffoldError> {
    let paint = Paint::new();
    let dir = cwd.join(CONFIG_DIR);
    debug!("Scaffolding {kind:?} files into {}", dir.display());
    std::fs::create_dir_all(&dir)?;
    for (file, contents) in kind.files() {
        let path = dir.join(file);
        if path.exists() {
            eprintln!(
                "{}",
                paint.alert(&format!("File {} already exists", path.display()))
            );
            continue;
        }
        std::fs::write(&path, contents)?;
        println!(
            "{}",
            paint.note(&format!("Created file: {}", path.display()))
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_file::Config;

    #[test]
    fn test_base_scaffold_parses_with_own_loader() {
        let dir = tempfile::tempdir().unwrap();
        run(ScaffoldKind::Base, dir.path()).unwrap();
        let path = dir.path().join(CONFIG_DIR).join("cmd.yaml");
        let config = Config::from_file(&path).unwrap();
        assert!(config.commands.contains_key("hello"));
    }

    #[test]
    fn test_go_scaffold_writes_all_files() {
        let dir = tempfile::tempdir().unwrap();
        run(ScaffoldKind::Go, dir.path()).unwrap();
        for file in [
            "cmd.yaml",
            "devcontainer.json",
            "devcontainer.env",
            "devcontainer.sh",
        ] {
            assert!(dir.path().join(CONFIG_DIR).join(file).exists(), "{file}");
        }
        let config = Config::from_file(&dir.path().join(CONFIG_DIR).join("cmd.yaml")).unwrap();
        assert_eq!(config.container.unwrap().name, "go-dev");
    }

    #[test]
    fn test_existing_files_are_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join(CONFIG_DIR);
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(config_dir.join("cmd.yaml"), "commands:\n  keep: echo kept\n").unwrap();

        run(ScaffoldKind::Base, dir.path()).unwrap();

        let contents = std::fs::read_to_string(config_dir.join("cmd.yaml")).unwrap();
        assert!(contents.contains("keep: echo kept"));
    }
}
