//! Site root on disk.

use crate::fetch::{FetchError, FetchResult, Fetcher};
use log::debug;
use std::path::{Component, Path, PathBuf};

/// Serves resources from a site directory.
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn locate(&self, path: &str) -> FetchResult<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        let mut located = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => located.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(FetchError::OutsideRoot(path.to_string()));
                }
            }
        }
        Ok(located)
    }
}

impl Fetcher for FsFetcher {
    fn fetch_text(&self, path: &str) -> FetchResult<String> {
        let located = self.locate(path)?;
        debug!(
            "event=fetch module=fetch status=start path={} file={}",
            path,
            located.display()
        );
        std::fs::read_to_string(&located).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => FetchError::NotFound(path.to_string()),
            _ => FetchError::Io {
                path: path.to_string(),
                message: err.to_string(),
            },
        })
    }
}
