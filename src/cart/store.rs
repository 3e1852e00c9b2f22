//! Cart Store Module
//!
//! Ordered line list with merge-by-product semantics, derived totals, and
//! whole-list persistence through the durable store after every mutation.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::cart::{CartLine, CART_STORAGE_KEY};
use crate::catalog::ProductDetails;
use crate::storage::DiskStore;

// == Cart Store ==
/// The cart: an ordered sequence of lines, at most one per product id.
///
/// Every mutation recomputes the derived totals implicitly (they are read
/// off the line list) and writes the full list back to the durable store.
/// The attempted-set tracks which product ids have already been submitted
/// for hydration this session and is never persisted.
#[derive(Debug)]
pub struct CartStore {
    /// Line items in insertion order
    lines: Vec<CartLine>,
    /// Product ids already submitted for hydration this session
    attempted: HashSet<String>,
    /// Durable store holding the serialized line list
    disk: DiskStore,
}

impl CartStore {
    // == Open ==
    /// Opens the cart, restoring a previously persisted line list.
    ///
    /// Missing or malformed persisted data reads as an empty cart; lines
    /// with a zero quantity are dropped on load. The attempted-set always
    /// starts empty, so hydration failures from a past session are retried.
    pub fn open(disk: DiskStore) -> Self {
        let lines = match disk.read(CART_STORAGE_KEY) {
            Some(raw) => match serde_json::from_str::<Vec<CartLine>>(&raw) {
                Ok(lines) => lines.into_iter().filter(|line| line.quantity > 0).collect(),
                Err(e) => {
                    warn!("Persisted cart is malformed, starting empty: {}", e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        Self {
            lines,
            attempted: HashSet::new(),
            disk,
        }
    }

    // == Add Item ==
    /// Adds `quantity` units of a product.
    ///
    /// An existing line is merged by incrementing its quantity; otherwise a
    /// new unhydrated line is appended. A zero quantity violates the
    /// precondition and is ignored with a warning.
    pub fn add_item(&mut self, product_id: &str, quantity: u32) {
        if quantity == 0 {
            warn!("Ignoring add of '{}' with zero quantity", product_id);
            return;
        }

        match self.find_line_mut(product_id) {
            Some(line) => line.quantity += quantity,
            None => self.lines.push(CartLine::new(product_id, quantity)),
        }

        self.persist();
    }

    // == Remove Item ==
    /// Deletes the line for `product_id`; a no-op if absent.
    pub fn remove_item(&mut self, product_id: &str) {
        let before = self.lines.len();
        self.lines.retain(|line| line.product_id != product_id);

        if self.lines.len() != before {
            self.persist();
        }
    }

    // == Update Quantity ==
    /// Sets a line's quantity directly (no increment).
    ///
    /// Zero removes the line entirely. Updating an absent product is a
    /// no-op.
    pub fn update_quantity(&mut self, product_id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove_item(product_id);
            return;
        }

        if let Some(line) = self.find_line_mut(product_id) {
            line.quantity = quantity;
            self.persist();
        }
    }

    // == Clear ==
    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.persist();
    }

    // == Derived Totals ==
    /// Total number of units across all lines.
    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Total price across all lines.
    ///
    /// Unhydrated lines contribute zero, so the total is best-effort until
    /// every line carries a price.
    pub fn total_price(&self) -> f64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// The current line list, in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Returns true if the cart holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    // == Hydration Support ==
    /// Collects product ids that still need hydration and marks them
    /// attempted.
    ///
    /// Marking happens here, synchronously, before any fetch is issued, so
    /// overlapping hydration passes cannot claim the same id twice and a
    /// failed id is not retried within the session.
    pub fn claim_pending_hydrations(&mut self) -> Vec<String> {
        let pending: Vec<String> = self
            .lines
            .iter()
            .filter(|line| !line.is_hydrated())
            .map(|line| line.product_id.clone())
            .filter(|id| !self.attempted.contains(id))
            .collect();

        for id in &pending {
            self.attempted.insert(id.clone());
        }

        pending
    }

    /// Merges fetched display fields into the line for `product_id`.
    ///
    /// Returns false when the line no longer exists (removed while the
    /// fetch was in flight); the result is discarded rather than
    /// re-inserted.
    pub fn merge_details(&mut self, product_id: &str, details: &ProductDetails) -> bool {
        let Some(line) = self.find_line_mut(product_id) else {
            debug!("Discarding hydration for '{}', line removed mid-flight", product_id);
            return false;
        };

        line.name = Some(details.name.clone());
        line.price = Some(details.price);
        line.image = details.image.clone();
        true
    }

    // == Persistence ==
    /// Writes the full line list to the durable store.
    ///
    /// A failure is logged and swallowed; the in-memory cart stays
    /// authoritative for the rest of the session.
    pub fn persist(&self) {
        match serde_json::to_string(&self.lines) {
            Ok(json) => {
                if let Err(e) = self.disk.write(CART_STORAGE_KEY, &json) {
                    warn!("Cart persistence failed: {}", e);
                }
            }
            Err(e) => warn!("Cart serialization failed: {}", e),
        }
    }

    fn find_line_mut(&mut self, product_id: &str) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_cart() -> (CartStore, DiskStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let disk = DiskStore::new(temp_dir.path().to_path_buf());
        (CartStore::open(disk.clone()), disk, temp_dir)
    }

    fn details(name: &str, price: f64) -> ProductDetails {
        ProductDetails {
            name: name.to_string(),
            price,
            image: Some(format!("{}.jpg", name)),
        }
    }

    #[test]
    fn test_add_item_merges_by_product_id() {
        let (mut cart, _disk, _dir) = create_test_cart();

        cart.add_item("p1", 2);
        cart.add_item("p1", 3);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
    }

    #[test]
    fn test_add_item_preserves_insertion_order() {
        let (mut cart, _disk, _dir) = create_test_cart();

        cart.add_item("b", 1);
        cart.add_item("a", 1);
        cart.add_item("b", 1);

        let ids: Vec<&str> = cart.lines().iter().map(|l| l.product_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_add_item_zero_quantity_is_ignored() {
        let (mut cart, _disk, _dir) = create_test_cart();

        cart.add_item("p1", 0);

        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_sets_directly() {
        let (mut cart, _disk, _dir) = create_test_cart();

        cart.add_item("p1", 2);
        cart.update_quantity("p1", 7);

        assert_eq!(cart.lines()[0].quantity, 7);
    }

    #[test]
    fn test_update_quantity_zero_removes_line() {
        let (mut cart, _disk, _dir) = create_test_cart();

        cart.add_item("p1", 2);
        cart.add_item("p2", 1);
        cart.update_quantity("p1", 0);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].product_id, "p2");
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_remove_absent_item_is_noop() {
        let (mut cart, _disk, _dir) = create_test_cart();

        cart.add_item("p1", 1);
        cart.remove_item("ghost");

        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_total_price_over_hydrated_lines() {
        let (mut cart, _disk, _dir) = create_test_cart();

        cart.add_item("p1", 2);
        cart.add_item("p2", 1);
        cart.merge_details("p1", &details("First", 10.0));
        cart.merge_details("p2", &details("Second", 5.0));

        assert_eq!(cart.total_price(), 25.0);
        assert_eq!(cart.total_items(), 3);
    }

    #[test]
    fn test_total_price_is_best_effort_until_hydrated() {
        let (mut cart, _disk, _dir) = create_test_cart();

        cart.add_item("p1", 2);
        cart.add_item("p2", 1);
        cart.merge_details("p2", &details("Second", 5.0));

        // Unhydrated p1 contributes zero.
        assert_eq!(cart.total_price(), 5.0);
    }

    #[test]
    fn test_clear_resets_everything() {
        let (mut cart, disk, _dir) = create_test_cart();

        cart.add_item("p1", 2);
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), 0.0);
        assert_eq!(disk.read(CART_STORAGE_KEY).as_deref(), Some("[]"));
    }

    #[test]
    fn test_persisted_cart_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let disk = DiskStore::new(temp_dir.path().to_path_buf());

        let mut cart = CartStore::open(disk.clone());
        cart.add_item("a", 1);
        cart.merge_details("a", &details("Americano", 3.0));
        cart.persist();
        let original = cart.lines().to_vec();

        let reopened = CartStore::open(disk);
        assert_eq!(reopened.lines(), original.as_slice());
    }

    #[test]
    fn test_malformed_persisted_cart_reads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let disk = DiskStore::new(temp_dir.path().to_path_buf());
        disk.write(CART_STORAGE_KEY, "{definitely not a cart").unwrap();

        let cart = CartStore::open(disk);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_zero_quantity_lines_dropped_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let disk = DiskStore::new(temp_dir.path().to_path_buf());
        disk.write(
            CART_STORAGE_KEY,
            r#"[{"product_id":"ok","quantity":1},{"product_id":"bad","quantity":0}]"#,
        )
        .unwrap();

        let cart = CartStore::open(disk);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].product_id, "ok");
    }

    #[test]
    fn test_claim_pending_marks_attempted_once() {
        let (mut cart, _disk, _dir) = create_test_cart();

        cart.add_item("p1", 1);
        cart.add_item("p2", 1);
        cart.merge_details("p2", &details("Second", 5.0));

        let first = cart.claim_pending_hydrations();
        assert_eq!(first, vec!["p1".to_string()]);

        // Second claim finds nothing, even though p1 is still unhydrated.
        let second = cart.claim_pending_hydrations();
        assert!(second.is_empty());
    }

    #[test]
    fn test_new_line_after_claim_is_still_claimable() {
        let (mut cart, _disk, _dir) = create_test_cart();

        cart.add_item("p1", 1);
        let _ = cart.claim_pending_hydrations();

        cart.add_item("p2", 1);
        let pending = cart.claim_pending_hydrations();
        assert_eq!(pending, vec!["p2".to_string()]);
    }

    #[test]
    fn test_merge_details_discards_removed_line() {
        let (mut cart, _disk, _dir) = create_test_cart();

        cart.add_item("p1", 1);
        cart.remove_item("p1");

        let merged = cart.merge_details("p1", &details("Ghost", 9.0));
        assert!(!merged);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_attempted_set_survives_mutations() {
        let (mut cart, _disk, _dir) = create_test_cart();

        cart.add_item("p1", 1);
        let _ = cart.claim_pending_hydrations();
        cart.update_quantity("p1", 4);

        assert!(cart.claim_pending_hydrations().is_empty());
    }
}
