//! Canned-document fetcher for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{query_string, Fetcher};
use crate::error::{CrawlError, Result};

#[derive(Default)]
pub struct MockFetcher {
    routes: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

fn route_key(url: &str, query: &[(&str, String)]) -> String {
    if query.is_empty() {
        url.to_string()
    } else {
        format!("{}?{}", url, query_string(query))
    }
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, url: &str, query: &[(&str, &str)], body: impl Into<String>) -> Self {
        let query: Vec<(&str, String)> = query.iter().map(|(k, v)| (*k, v.to_string())).collect();
        self.routes.insert(route_key(url, &query), body.into());
        self
    }

    /// Every request made so far, as `url?query`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str, query: &[(&str, String)]) -> Result<String> {
        let key = route_key(url, query);
        self.calls.lock().unwrap().push(key.clone());
        self.routes
            .get(&key)
            .cloned()
            .ok_or_else(|| CrawlError::transport(url, format!("no route for {}", key)))
    }
}
