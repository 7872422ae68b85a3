//! Per-author pagination with the empty-page rescue workaround.

use std::time::Duration;

use crate::models::{AuthorQuery, ConsolidatedResult};
use crate::source::GoogleBooksClient;

/// Drives repeated page requests for one author and assembles the
/// consolidated result.
///
/// Termination rules, in the order they are checked per page:
///
/// 1. advertised total of 0 ends the harvest with no items;
/// 2. an empty page with a nonzero advertised total triggers exactly one
///    rescue request at the same offset, sized to the advertised total,
///    after which pagination ends unconditionally — the catalog
///    intermittently reports a nonzero count alongside an empty payload,
///    and re-requesting the offset with the reported count as the page
///    size recovers the missing items in one shot;
/// 3. a partial page is the natural end of the result set.
///
/// A transport failure ends pagination for the author; whatever was
/// accumulated up to that point is kept.
#[derive(Debug)]
pub struct Paginator {
    client: GoogleBooksClient,
    page_size: u32,
    page_delay: Duration,
}

impl Paginator {
    /// Create a paginator with a fixed page size and inter-page delay
    pub fn new(client: GoogleBooksClient, page_size: u32, page_delay: Duration) -> Self {
        Self {
            client,
            page_size,
            page_delay,
        }
    }

    /// Fetch every page of results for one author.
    ///
    /// Always returns a result; failures are reflected in the request
    /// log and whatever items were accumulated before the failure.
    pub async fn fetch_all(&self, author: &AuthorQuery) -> ConsolidatedResult {
        let mut items = Vec::new();
        let mut request_urls = Vec::new();
        let mut request_count: u32 = 0;
        let mut offset: u32 = 0;
        let mut queried_total: u32 = 0;

        tracing::info!(author = %author.name, "starting fetch");

        loop {
            request_count += 1;
            request_urls.push(self.client.volumes_url(&author.name, offset, self.page_size));

            let page = match self.client.fetch(&author.name, offset, self.page_size).await {
                Ok(page) => page,
                Err(err) => {
                    tracing::warn!(
                        author = %author.name,
                        request = request_count,
                        error = %err,
                        "page request failed, keeping partial results"
                    );
                    break;
                }
            };

            let fetched = page.items.len();
            if request_count == 1 {
                queried_total = page.advertised_total;
            } else {
                // Later pages' totals are informational only.
                tracing::debug!(
                    author = %author.name,
                    offset,
                    advertised_total = page.advertised_total,
                    "page total"
                );
            }

            if page.advertised_total == 0 {
                tracing::info!(author = %author.name, "no results (advertised total is 0)");
                break;
            }

            if fetched == 0 {
                // Known upstream inconsistency: nonzero total, empty
                // payload. One rescue request at the same offset, sized
                // to the advertised total; then stop regardless.
                tracing::warn!(
                    author = %author.name,
                    offset,
                    advertised_total = page.advertised_total,
                    "empty page with nonzero total, attempting rescue"
                );

                request_count += 1;
                request_urls.push(self.client.volumes_url(
                    &author.name,
                    offset,
                    page.advertised_total,
                ));

                match self
                    .client
                    .fetch_exact(&author.name, offset, page.advertised_total)
                    .await
                {
                    Ok(rescue) => {
                        tracing::info!(
                            author = %author.name,
                            recovered = rescue.items.len(),
                            "rescue request returned"
                        );
                        items.extend(rescue.items);
                    }
                    Err(err) => {
                        tracing::warn!(author = %author.name, error = %err, "rescue request failed");
                    }
                }
                break;
            }

            items.extend(page.items);

            if fetched < self.page_size as usize {
                tracing::debug!(author = %author.name, fetched, "partial page, end of results");
                break;
            }

            offset += self.page_size;
            tokio::time::sleep(self.page_delay).await;
        }

        tracing::info!(
            author = %author.name,
            fetched = items.len(),
            requests = request_count,
            "finished fetch"
        );

        let first_request_url = request_urls.first().cloned().unwrap_or_default();
        ConsolidatedResult {
            author: author.clone(),
            first_request_url,
            request_urls,
            queried_total,
            fetched_total: items.len(),
            request_count,
            page_size: self.page_size,
            items,
        }
    }
}
