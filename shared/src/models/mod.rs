//! API-facing models
//!
//! String ids (`"table:id"` format) and Unix-millis timestamps, ready for
//! JSON transport. The server converts its storage records into these.

mod order;
mod product;
mod reorder;

pub use order::{Order, OrderItem};
pub use product::Product;
pub use reorder::{Reorder, ReorderStats, ReorderSummary};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ReorderStatus, TriggerReason};
    use rust_decimal::Decimal;

    #[test]
    fn money_goes_over_the_wire_as_numbers() {
        let order = Order {
            id: Some("sales_order:abc".into()),
            items: vec![OrderItem {
                product: "product:abc".into(),
                name: "Widget".into(),
                unit_price: Decimal::new(250, 2),
                quantity: 4,
            }],
            total: Decimal::new(1000, 2),
            customer_name: None,
            created_by: "u1".into(),
            created_at: 0,
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["total"], 10.0);
        assert_eq!(json["items"][0]["unitPrice"], 2.5);
        assert!(json["total"].is_f64());
    }

    #[test]
    fn reorder_fields_are_camel_case_with_numeric_cost() {
        let reorder = Reorder {
            id: Some("reorder:abc".into()),
            product: "product:abc".into(),
            product_name: Some("Widget".into()),
            product_sku: Some("SKU-1".into()),
            quantity: 20,
            status: ReorderStatus::Ordered,
            trigger_reason: TriggerReason::LowStock,
            supplier_info: None,
            estimated_delivery: 1,
            actual_delivery: None,
            cost: Some(Decimal::new(4999, 2)),
            notes: None,
            created_by: "u1".into(),
            created_at: 0,
        };
        let json = serde_json::to_value(&reorder).unwrap();
        assert_eq!(json["cost"], 49.99);
        assert_eq!(json["triggerReason"], "low_stock");
        assert_eq!(json["productSku"], "SKU-1");
        assert_eq!(json["estimatedDelivery"], 1);

        let back: Reorder = serde_json::from_value(json).unwrap();
        assert_eq!(back.cost, Some(Decimal::new(4999, 2)));
    }
}
