//! Scrape coordination
//!
//! Drives one run end to end: fetch the first page resiliently, derive the
//! page plan from it, announce the totals, then walk the follow-up pages in
//! strictly increasing order, extracting records as they arrive. Pages are
//! fetched one at a time; the only suspension points are the network and the
//! post-rotation pause inside the fetcher.

use crate::config::Config;
use crate::crawler::extract::PageExtractor;
use crate::crawler::fetch::ResilientFetcher;
use crate::crawler::pagination::{page_url, PagePlan};
use crate::crawler::transport::Transport;
use crate::listing::Listing;
use crate::ScrapeError;

/// Result of a completed scrape run
#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    /// All extracted records, in page order then document order
    pub listings: Vec<Listing>,

    /// The plan the run executed
    pub plan: PagePlan,

    /// Pages fetched over the network (first page included)
    pub pages_fetched: u32,
}

/// Scrapes the configured listing through the given transport
///
/// The first page is fetched once and reused: its records become the start
/// of the accumulator, and the walk continues at page 2. A fetch whose
/// retry budget runs out aborts the run with an error before any output is
/// produced.
pub async fn scrape<T: Transport>(
    config: &Config,
    transport: T,
) -> Result<ScrapeOutcome, ScrapeError> {
    let extractor = PageExtractor::new(&config.selectors)?;
    let mut fetcher = ResilientFetcher::new(transport, config.fetch.clone());

    tracing::info!("fetching first listing page: {}", config.site.listing_url);
    let first_page = fetcher.fetch(&page_url(&config.site, 1)).await?;
    let mut pages_fetched = 1u32;

    let total_pages = extractor.page_count(&first_page)?;
    let mut listings = extractor.extract(&first_page);
    let plan = PagePlan::new(listings.len(), total_pages, config.site.max_pages);

    tracing::info!("items per page: {}", plan.items_per_page);
    tracing::info!("total pages: {}", plan.total_pages);
    tracing::info!("total items: ~{}", plan.estimated_total_items());
    tracing::info!(
        "page 1/{}: {} items",
        plan.effective_pages,
        listings.len()
    );

    for page in plan.follow_up_pages() {
        let url = page_url(&config.site, page);
        let html = fetcher.fetch(&url).await?;
        pages_fetched += 1;

        let page_listings = extractor.extract(&html);
        tracing::info!(
            "page {}/{}: {} items",
            page,
            plan.effective_pages,
            page_listings.len()
        );
        listings.extend(page_listings);
    }

    tracing::info!(
        "scrape complete: {} records from {} pages",
        listings.len(),
        pages_fetched
    );

    Ok(ScrapeOutcome {
        listings,
        plan,
        pages_fetched,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::transport::TransportError;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Transport serving a fixed page body per URL and recording the fetch
    /// order
    struct PageServer {
        pages: Vec<(String, String)>,
        fetched: Arc<Mutex<Vec<String>>>,
    }

    impl PageServer {
        fn new(pages: Vec<(String, String)>) -> (Self, Arc<Mutex<Vec<String>>>) {
            let fetched = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    pages,
                    fetched: Arc::clone(&fetched),
                },
                fetched,
            )
        }
    }

    #[async_trait]
    impl Transport for PageServer {
        async fn fetch(&self, url: &str) -> Result<String, TransportError> {
            self.fetched.lock().unwrap().push(url.to_string());
            let body = self
                .pages
                .iter()
                .find(|(u, _)| u == url)
                .map(|(_, body)| body.clone())
                .unwrap_or_default();
            Ok(body)
        }

        async fn rotate_identity(&mut self) -> Result<(), TransportError> {
            Ok(())
        }
    }

    fn item_block(n: u32) -> String {
        format!(
            r#"<div class="ListingItem-module__main">
                <a class="ListingItemTitle-module__link" href="/cars/used/sale/make-model/{}/">Car {}</a>
                <div class="ListingItemPrice-module__content">1 000 000 ₽</div>
            </div>"#,
            n, n
        )
    }

    fn listing_page(item_count: u32, last_page: u32) -> String {
        let items: String = (0..item_count).map(item_block).collect();
        format!(
            r#"<html><body>{}
            <div class="ListingPagination-module__pages">
                <a class="Button"><span class="Button__text">1</span></a>
                <a class="Button"><span class="Button__text">{}</span></a>
            </div></body></html>"#,
            items, last_page
        )
    }

    fn test_config() -> Config {
        let mut config = Config::default();
        config.site.listing_url = "https://auto.ru/cars/all/".to_string();
        config.site.pagination_params = "?sort=fresh_relevance_1-desc&page=".to_string();
        config.site.max_pages = 5;
        config.fetch.min_html_length = 10;
        config.fetch.rotate_delay_ms = 0;
        config
    }

    #[tokio::test]
    async fn test_first_page_is_not_refetched() {
        let config = test_config();
        let (transport, fetched) = PageServer::new(vec![
            (
                "https://auto.ru/cars/all/".to_string(),
                listing_page(3, 2),
            ),
            (
                "https://auto.ru/cars/all/?sort=fresh_relevance_1-desc&page=2".to_string(),
                listing_page(2, 2),
            ),
        ]);

        let outcome = scrape(&config, transport).await.unwrap();

        // 3 items reused from page 1 plus 2 from page 2, no duplicates
        assert_eq!(outcome.listings.len(), 5);
        assert_eq!(outcome.pages_fetched, 2);
        assert_eq!(outcome.plan.total_pages, 2);
        assert_eq!(outcome.plan.effective_pages, 2);

        // Page 1 was requested exactly once
        let urls = fetched.lock().unwrap();
        assert_eq!(
            urls.iter()
                .filter(|u| u.as_str() == "https://auto.ru/cars/all/")
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn test_cap_bounds_the_walk() {
        let mut config = test_config();
        config.site.max_pages = 3;

        let mut pages = vec![(
            "https://auto.ru/cars/all/".to_string(),
            listing_page(2, 50),
        )];
        for page in 2..=3 {
            pages.push((
                format!(
                    "https://auto.ru/cars/all/?sort=fresh_relevance_1-desc&page={}",
                    page
                ),
                listing_page(2, 50),
            ));
        }
        let (transport, _) = PageServer::new(pages);

        let outcome = scrape(&config, transport).await.unwrap();

        assert_eq!(outcome.pages_fetched, 3);
        assert_eq!(outcome.plan.effective_pages, 3);
        assert_eq!(outcome.listings.len(), 6);
    }

    #[tokio::test]
    async fn test_pages_fetched_in_increasing_order() {
        let mut config = test_config();
        config.site.max_pages = 4;

        let mut pages = vec![(
            "https://auto.ru/cars/all/".to_string(),
            listing_page(1, 4),
        )];
        for page in 2..=4 {
            pages.push((
                format!(
                    "https://auto.ru/cars/all/?sort=fresh_relevance_1-desc&page={}",
                    page
                ),
                listing_page(1, 4),
            ));
        }
        let (transport, fetched) = PageServer::new(pages);

        let outcome = scrape(&config, transport).await.unwrap();
        assert_eq!(outcome.listings.len(), 4);

        let urls = fetched.lock().unwrap();
        let expected: Vec<String> = std::iter::once("https://auto.ru/cars/all/".to_string())
            .chain((2..=4).map(|p| {
                format!(
                    "https://auto.ru/cars/all/?sort=fresh_relevance_1-desc&page={}",
                    p
                )
            }))
            .collect();
        assert_eq!(*urls, expected);
    }

    #[tokio::test]
    async fn test_missing_pagination_control_is_fatal() {
        let config = test_config();
        let (transport, _) = PageServer::new(vec![(
            "https://auto.ru/cars/all/".to_string(),
            // Long enough to pass the validity check, but no pagination
            format!("<html><body>{}</body></html>", item_block(1)),
        )]);

        let err = scrape(&config, transport).await.unwrap_err();
        assert!(matches!(err, ScrapeError::Extract(_)));
    }
}
