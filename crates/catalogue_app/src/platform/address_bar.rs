use catalogue_core::{merge_into_url, QueryState};
use catalogue_logging::catalogue_debug;
use url::Url;

/// Where the view's query lives between sessions.
pub trait AddressBar {
    /// Raw query string of the address the view was opened with.
    fn initial_query(&self) -> String;
    /// Rewrites the current address in place. No history entry is added.
    fn replace_query(&mut self, query: &QueryState);
}

/// In-memory address seeded from `--location`.
#[derive(Debug, Clone)]
pub struct LocationBar {
    current: Url,
}

impl LocationBar {
    pub fn new(location: Url) -> Self {
        Self { current: location }
    }

    pub fn current(&self) -> &Url {
        &self.current
    }
}

impl AddressBar for LocationBar {
    fn initial_query(&self) -> String {
        self.current.query().unwrap_or_default().to_string()
    }

    fn replace_query(&mut self, query: &QueryState) {
        self.current = merge_into_url(&self.current, query);
        catalogue_debug!("Address replaced: {}", self.current);
    }
}
