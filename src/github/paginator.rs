use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::github::client::GitHubClient;

pub struct Paginator<'a> {
    client: &'a GitHubClient,
}

impl<'a> Paginator<'a> {
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Fetches pages until one comes back empty or short. Each page goes
    /// through the client's retry policy on its own.
    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
        per_page: u32,
    ) -> Result<Vec<T>> {
        let mut all_items = Vec::new();
        let mut page = 1u32;

        loop {
            let mut query: Vec<(&str, String)> = params.to_vec();
            query.push(("per_page", per_page.to_string()));
            query.push(("page", page.to_string()));

            tracing::debug!("Fetching {} page {}", path, page);
            let items: Vec<T> = self.client.get_json(path, &query).await?;
            let items_count = items.len();
            all_items.extend(items);

            if is_last_page(items_count, per_page) {
                break;
            }

            page += 1;
        }

        Ok(all_items)
    }
}

fn is_last_page(items_count: usize, per_page: u32) -> bool {
    items_count == 0 || items_count < per_page as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stops_on_short_or_empty_page() {
        assert!(is_last_page(0, 100));
        assert!(is_last_page(42, 100));
        assert!(!is_last_page(100, 100));
    }
}
