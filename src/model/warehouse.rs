// src/model/warehouse.rs

/// Stock held at the single storage point of the inventory model.
#[derive(Debug, Clone)]
pub struct Warehouse {
    pub capacity: f64,
    pub on_hand: f64,

    // Tracking for the daily ledger
    pub last_received: f64,
    pub last_sold: f64,
    pub last_unmet: f64,
}

impl Warehouse {
    /// The opening stock is taken as given; the caller keeps it within capacity.
    pub fn new(capacity: f64, initial_inventory: f64) -> Self {
        Self {
            capacity,
            on_hand: initial_inventory,
            last_received: 0.0,
            last_sold: 0.0,
            last_unmet: 0.0,
        }
    }

    /// Step 1: Receive a delivery. Anything beyond capacity is lost.
    pub fn receive_shipment(&mut self, quantity: f64) {
        let before = self.on_hand;
        self.on_hand = (self.on_hand + quantity).min(self.capacity);
        self.last_received += self.on_hand - before;
    }

    /// Space left before the warehouse is full.
    pub fn shortfall(&self) -> f64 {
        (self.capacity - self.on_hand).max(0.0)
    }

    /// Step 2: Serve the day's demand from stock. No backlog is kept.
    ///
    /// Returns the quantity sold.
    pub fn fulfil_demand(&mut self, demand: f64) -> f64 {
        let sold = self.on_hand.min(demand);
        self.last_unmet = (demand - sold).max(0.0);
        self.last_sold = sold;
        self.on_hand -= sold;
        sold
    }

    /// Holding cost for the stock left after today's sales.
    pub fn carrying_cost(&self, rate_per_unit_day: f64) -> f64 {
        self.on_hand * rate_per_unit_day
    }

    pub fn start_day(&mut self) {
        self.last_received = 0.0;
        self.last_sold = 0.0;
        self.last_unmet = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receive_caps_at_capacity() {
        let mut wh = Warehouse::new(700.0, 650.0);
        wh.receive_shipment(200.0);
        assert_eq!(wh.on_hand, 700.0);
        assert_eq!(wh.last_received, 50.0);
    }

    #[test]
    fn test_fulfil_short_demand_records_unmet() {
        let mut wh = Warehouse::new(700.0, 40.0);
        let sold = wh.fulfil_demand(100.0);
        assert_eq!(sold, 40.0);
        assert_eq!(wh.last_unmet, 60.0);
        assert_eq!(wh.on_hand, 0.0);
        assert_eq!(wh.shortfall(), 700.0);
    }

    #[test]
    fn test_carrying_cost_uses_remaining_stock() {
        let mut wh = Warehouse::new(700.0, 500.0);
        wh.fulfil_demand(100.0);
        assert!((wh.carrying_cost(0.1) - 40.0).abs() < 1e-9);
    }
}
