// src/model/orders.rs

use serde::Serialize;

/// A replenishment order that has been placed but not yet received.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PendingOrder {
    pub quantity: f64,
    pub arrival_day: u32,
}

/// Orders in transit, in the order they were placed.
#[derive(Debug, Clone, Default)]
pub struct PendingOrders {
    orders: Vec<PendingOrder>,
}

impl PendingOrders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step 1: Take out every order due on or before `day`.
    /// Call this at the START of the day.
    pub fn pop_arrivals(&mut self, day: u32) -> Vec<PendingOrder> {
        let (arrived, in_transit): (Vec<_>, Vec<_>) = self
            .orders
            .drain(..)
            .partition(|order| order.arrival_day <= day);
        self.orders = in_transit;
        arrived
    }

    /// Step 2: A new order enters the pipeline.
    pub fn push(&mut self, quantity: f64, arrival_day: u32) {
        self.orders.push(PendingOrder {
            quantity,
            arrival_day,
        });
    }

    /// Days from `day` until the earliest pending arrival, `None` if nothing is in transit.
    pub fn days_until_next(&self, day: u32) -> Option<u32> {
        self.orders
            .iter()
            .map(|order| order.arrival_day.saturating_sub(day))
            .min()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_arrivals_takes_due_orders_only() {
        let mut book = PendingOrders::new();
        book.push(100.0, 9);
        book.push(50.0, 8);
        book.push(25.0, 11);

        let arrived = book.pop_arrivals(9);
        assert_eq!(arrived.len(), 2);
        assert_eq!(arrived.iter().map(|o| o.quantity).sum::<f64>(), 150.0);
        assert_eq!(book.len(), 1);
        assert_eq!(book.days_until_next(9), Some(2));
    }

    #[test]
    fn test_empty_book_has_no_next_delivery() {
        let mut book = PendingOrders::new();
        assert!(book.pop_arrivals(1).is_empty());
        assert_eq!(book.days_until_next(1), None);
        assert!(book.is_empty());
    }
}
