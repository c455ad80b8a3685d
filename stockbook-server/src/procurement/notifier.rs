//! Supplier notification seam
//!
//! Notification is best-effort: a failure is logged and never rolls back the
//! reorder it belongs to. Real transport (SMTP etc.) plugs in behind
//! [`SupplierNotifier`]; the shipped implementation logs only.

use async_trait::async_trait;

use crate::db::models::{Product, Reorder};

#[async_trait]
pub trait SupplierNotifier: Send + Sync {
    /// Notify the product's supplier about a newly created reorder.
    /// Callers only invoke this when the product has a supplier email.
    async fn notify_supplier(&self, product: &Product, reorder: &Reorder) -> anyhow::Result<()>;
}

/// Log-backed notifier
pub struct LogNotifier;

#[async_trait]
impl SupplierNotifier for LogNotifier {
    async fn notify_supplier(&self, product: &Product, reorder: &Reorder) -> anyhow::Result<()> {
        let email = product
            .supplier_info
            .as_ref()
            .and_then(|s| s.email.as_deref())
            .unwrap_or("<no email>");

        tracing::info!(
            sku = %product.sku,
            product = %product.name,
            supplier_email = %email,
            quantity = reorder.quantity,
            "Supplier reorder notification"
        );
        Ok(())
    }
}
