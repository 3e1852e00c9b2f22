//! Cart Hydration
//!
//! Fills in missing display fields on cart lines by fetching each pending
//! product from the catalog, at most once per product id per session.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cart::CartStore;
use crate::catalog::CatalogClient;

/// Hydrates every line still missing display fields.
///
/// Pending ids are claimed under the write lock before any fetch is
/// issued, so overlapping calls never duplicate a request and a failed id
/// is not retried within the session. The lock is released while the
/// fetches run concurrently and re-acquired for the merge pass; a line
/// removed mid-flight is discarded rather than re-inserted. Per-item
/// failures are logged and the call still completes.
pub async fn load_cart_details(cart: &Arc<RwLock<CartStore>>, catalog: &CatalogClient) {
    let pending = {
        let mut cart = cart.write().await;
        cart.claim_pending_hydrations()
    };

    if pending.is_empty() {
        return;
    }
    debug!("Hydrating {} cart line(s)", pending.len());

    let fetches = pending.into_iter().map(|product_id| {
        let catalog = catalog.clone();
        async move {
            let result = catalog.fetch_product(&product_id).await;
            (product_id, result)
        }
    });
    let results = join_all(fetches).await;

    let mut cart = cart.write().await;
    let mut merged = 0;
    for (product_id, result) in results {
        match result {
            Ok(details) => {
                if cart.merge_details(&product_id, &details) {
                    merged += 1;
                }
            }
            Err(e) => {
                // Line stays unhydrated and attempted; no retry this session.
                warn!("Hydration failed for '{}': {}", product_id, e);
            }
        }
    }

    if merged > 0 {
        cart.persist();
    }
}
