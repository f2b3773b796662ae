//! In-memory fetcher for tests and embedded fixtures.

use crate::fetch::{FetchError, FetchResult, Fetcher};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;

/// Map of root-relative path → body. Unknown paths answer 404.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    bodies: HashMap<String, String>,
    failures: HashMap<String, u16>,
    requests: RefCell<HashMap<String, usize>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, path: &str, body: impl Into<String>) -> Self {
        self.insert_text(path, body);
        self
    }

    pub fn with_json(mut self, path: &str, value: &Value) -> Self {
        self.insert_text(path, value.to_string());
        self
    }

    pub fn insert_text(&mut self, path: &str, body: impl Into<String>) {
        self.bodies.insert(normalize(path), body.into());
    }

    /// Makes `path` answer with a non-OK `status`.
    pub fn fail(mut self, path: &str, status: u16) -> Self {
        self.failures.insert(normalize(path), status);
        self
    }

    /// How many times `path` was requested.
    pub fn request_count(&self, path: &str) -> usize {
        self.requests
            .borrow()
            .get(&normalize(path))
            .copied()
            .unwrap_or(0)
    }
}

impl Fetcher for StaticFetcher {
    fn fetch_text(&self, path: &str) -> FetchResult<String> {
        let key = normalize(path);
        *self.requests.borrow_mut().entry(key.clone()).or_insert(0) += 1;
        if let Some(status) = self.failures.get(&key) {
            return Err(match status {
                404 => FetchError::NotFound(key),
                other => FetchError::Status {
                    path: key,
                    status: *other,
                },
            });
        }
        self.bodies
            .get(&key)
            .cloned()
            .ok_or(FetchError::NotFound(key))
    }
}

fn normalize(path: &str) -> String {
    path.trim().trim_start_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::StaticFetcher;
    use crate::fetch::{FetchError, Fetcher};

    #[test]
    fn failures_override_bodies_and_requests_are_counted() {
        let fetcher = StaticFetcher::new()
            .with_text("data/a.json", "[]")
            .fail("data/a.json", 500);
        let err = fetcher.fetch_text("/data/a.json").expect_err("forced failure");
        assert_eq!(err.status(), Some(500));
        assert_eq!(
            fetcher.fetch_text("data/b.json"),
            Err(FetchError::NotFound("data/b.json".to_string()))
        );
        assert_eq!(fetcher.request_count("data/a.json"), 1);
    }
}
