//! The side-segregated order store.
//!
//! Two top-level indices, one per [`OrderSide`], each mapping an
//! [`OrderKey`] to its [`Order`]. Distinct prices for the same
//! (collection, token, payment token) are independent entries — this is a
//! true multi-price book, not a best-offer cache. Entries are removed, not
//! tombstoned, on cancellation or fulfillment.

use std::collections::BTreeMap;

use nftmatch_types::{Address, Order, OrderKey, OrderSide, TokenId};

/// The outstanding orders of one marketplace, both sides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBook {
    sell_orders: BTreeMap<OrderKey, Order>,
    buy_orders: BTreeMap<OrderKey, Order>,
}

impl OrderBook {
    /// Create an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn side(&self, side: OrderSide) -> &BTreeMap<OrderKey, Order> {
        match side {
            OrderSide::Sell => &self.sell_orders,
            OrderSide::Buy => &self.buy_orders,
        }
    }

    fn side_mut(&mut self, side: OrderSide) -> &mut BTreeMap<OrderKey, Order> {
        match side {
            OrderSide::Sell => &mut self.sell_orders,
            OrderSide::Buy => &mut self.buy_orders,
        }
    }

    // =================================================================
    // Mutation
    // =================================================================

    /// Store an order at its key, overwriting any existing entry.
    ///
    /// Callers enforce key-uniqueness and maker-exclusivity first; the
    /// store itself never rejects a write.
    pub fn put(&mut self, side: OrderSide, key: OrderKey, order: Order) {
        self.side_mut(side).insert(key, order);
    }

    /// Remove and return the order at a key, if present.
    pub fn remove(&mut self, side: OrderSide, key: &OrderKey) -> Option<Order> {
        self.side_mut(side).remove(key)
    }

    // =================================================================
    // Queries
    // =================================================================

    /// The order at a key, if present.
    #[must_use]
    pub fn get(&self, side: OrderSide, key: &OrderKey) -> Option<&Order> {
        self.side(side).get(key)
    }

    /// Whether any order exists at a key.
    #[must_use]
    pub fn contains(&self, side: OrderSide, key: &OrderKey) -> bool {
        self.side(side).contains_key(key)
    }

    /// Number of outstanding orders on one side.
    #[must_use]
    pub fn count(&self, side: OrderSide) -> usize {
        self.side(side).len()
    }

    /// Whether the book has no orders on either side.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sell_orders.is_empty() && self.buy_orders.is_empty()
    }

    /// All listings for one asset on one side, across prices and payment
    /// tokens, in key order.
    pub fn listings_for(
        &self,
        side: OrderSide,
        collection: Address,
        token_id: TokenId,
    ) -> impl Iterator<Item = (&OrderKey, &Order)> {
        self.side(side)
            .iter()
            .filter(move |(key, _)| key.collection == collection && key.token_id == token_id)
    }

    /// Iterate one full side in key order.
    pub fn entries(&self, side: OrderSide) -> impl Iterator<Item = (&OrderKey, &Order)> {
        self.side(side).iter()
    }
}

#[cfg(test)]
mod tests {
    use nftmatch_types::BlockHeight;

    use super::*;

    fn addr(b: u8) -> Address {
        Address([b; 20])
    }

    fn key(price: u128) -> OrderKey {
        OrderKey::new(addr(1), TokenId(7), Address::ZERO, price)
    }

    fn order(maker: u8) -> Order {
        Order::new(addr(maker), BlockHeight(100))
    }

    #[test]
    fn put_get_remove() {
        let mut book = OrderBook::new();
        book.put(OrderSide::Sell, key(100), order(2));

        assert!(book.contains(OrderSide::Sell, &key(100)));
        assert_eq!(book.get(OrderSide::Sell, &key(100)).unwrap().maker, addr(2));

        let removed = book.remove(OrderSide::Sell, &key(100)).unwrap();
        assert_eq!(removed.maker, addr(2));
        assert!(book.is_empty());
    }

    #[test]
    fn sides_are_independent() {
        let mut book = OrderBook::new();
        book.put(OrderSide::Sell, key(100), order(2));
        book.put(OrderSide::Buy, key(100), order(3));

        assert_eq!(book.count(OrderSide::Sell), 1);
        assert_eq!(book.count(OrderSide::Buy), 1);

        book.remove(OrderSide::Sell, &key(100)).unwrap();
        // The opposite-side order at the same key is untouched.
        assert_eq!(book.get(OrderSide::Buy, &key(100)).unwrap().maker, addr(3));
    }

    #[test]
    fn multi_price_entries_coexist() {
        let mut book = OrderBook::new();
        book.put(OrderSide::Sell, key(100), order(2));
        book.put(OrderSide::Sell, key(200), order(2));
        book.put(OrderSide::Sell, key(300), order(2));

        assert_eq!(book.count(OrderSide::Sell), 3);
        let prices: Vec<u128> = book
            .listings_for(OrderSide::Sell, addr(1), TokenId(7))
            .map(|(k, _)| k.price)
            .collect();
        assert_eq!(prices, vec![100, 200, 300]);
    }

    #[test]
    fn put_overwrites_existing_entry() {
        let mut book = OrderBook::new();
        book.put(OrderSide::Buy, key(100), order(2));
        book.put(OrderSide::Buy, key(100), Order::new(addr(2), BlockHeight(999)));

        assert_eq!(book.count(OrderSide::Buy), 1);
        assert_eq!(
            book.get(OrderSide::Buy, &key(100)).unwrap().expiration,
            BlockHeight(999)
        );
    }

    #[test]
    fn remove_missing_is_none() {
        let mut book = OrderBook::new();
        assert!(book.remove(OrderSide::Sell, &key(100)).is_none());
    }

    #[test]
    fn listings_filter_other_assets() {
        let mut book = OrderBook::new();
        book.put(OrderSide::Sell, key(100), order(2));
        book.put(
            OrderSide::Sell,
            OrderKey::new(addr(1), TokenId(8), Address::ZERO, 100),
            order(2),
        );

        assert_eq!(
            book.listings_for(OrderSide::Sell, addr(1), TokenId(7)).count(),
            1
        );
    }

    #[test]
    fn entries_iterate_in_key_order() {
        let mut book = OrderBook::new();
        book.put(OrderSide::Sell, key(300), order(2));
        book.put(OrderSide::Sell, key(100), order(2));
        book.put(OrderSide::Sell, key(200), order(2));

        let prices: Vec<u128> = book.entries(OrderSide::Sell).map(|(k, _)| k.price).collect();
        assert_eq!(prices, vec![100, 200, 300]);
    }
}
