//! Product Repository

use super::{BaseRepository, RepoError, RepoResult, make_thing, money_bind, strip_table_prefix};
use crate::db::models::{Product, ProductCreate, ProductUpdate};
use crate::utils::time::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

pub const PRODUCT_TABLE: &str = "product";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active products
    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product WHERE is_active = true ORDER BY name")
            .await?
            .take(0)?;
        Ok(products)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let pure_id = strip_table_prefix(PRODUCT_TABLE, id);
        let product: Option<Product> = self.base.db().select((PRODUCT_TABLE, pure_id)).await?;
        Ok(product)
    }

    pub async fn find_by_sku(&self, sku: &str) -> RepoResult<Option<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product WHERE sku = $sku")
            .bind(("sku", sku.to_string()))
            .await?
            .take(0)?;
        Ok(products.into_iter().next())
    }

    /// Active products at or below their reorder point
    pub async fn find_low_stock(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query(
                "SELECT * FROM product \
                 WHERE is_active = true AND quantity <= reorder_point \
                 ORDER BY name",
            )
            .await?
            .take(0)?;
        Ok(products)
    }

    /// The shortage set: low-stock products flagged for auto-reorder
    pub async fn find_shortages(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query(
                "SELECT * FROM product \
                 WHERE is_active = true \
                   AND auto_reorder_enabled = true \
                   AND quantity <= reorder_point",
            )
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Create a new product. SKU uniqueness is enforced both here and by the
    /// unique index, so a concurrent create loses with a Duplicate error.
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        if let Some(existing) = self.find_by_sku(&data.sku).await? {
            return Err(RepoError::Duplicate(format!(
                "SKU {} already used by product {}",
                data.sku,
                existing.name
            )));
        }

        let now = now_millis();
        let product = Product {
            id: None,
            sku: data.sku,
            name: data.name,
            category: data.category.unwrap_or_default(),
            price: data.price,
            quantity: data.quantity.unwrap_or(0),
            auto_reorder_enabled: data.auto_reorder_enabled.unwrap_or(false),
            reorder_point: data.reorder_point.unwrap_or(5),
            reorder_quantity: data.reorder_quantity.unwrap_or(20),
            supplier_info: data.supplier_info,
            last_reorder_date: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let created: Option<Product> = self.base.db().create(PRODUCT_TABLE).content(product).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Update a product
    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let pure_id = strip_table_prefix(PRODUCT_TABLE, id);
        let thing = make_thing(PRODUCT_TABLE, pure_id);

        // Build dynamic SET clauses with proper type bindings
        let mut set_parts: Vec<&str> = Vec::new();

        if data.sku.is_some() {
            set_parts.push("sku = $sku");
        }
        if data.name.is_some() {
            set_parts.push("name = $name");
        }
        if data.category.is_some() {
            set_parts.push("category = $category");
        }
        if data.price.is_some() {
            set_parts.push("price = $price");
        }
        if data.quantity.is_some() {
            set_parts.push("quantity = $quantity");
        }
        if data.auto_reorder_enabled.is_some() {
            set_parts.push("auto_reorder_enabled = $auto_reorder_enabled");
        }
        if data.reorder_point.is_some() {
            set_parts.push("reorder_point = $reorder_point");
        }
        if data.reorder_quantity.is_some() {
            set_parts.push("reorder_quantity = $reorder_quantity");
        }
        if data.supplier_info.is_some() {
            set_parts.push("supplier_info = $supplier_info");
        }
        if data.is_active.is_some() {
            set_parts.push("is_active = $is_active");
        }

        if set_parts.is_empty() {
            return self
                .find_by_id(pure_id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)));
        }
        set_parts.push("updated_at = $updated_at");

        let query_str = format!("UPDATE $thing SET {} RETURN AFTER", set_parts.join(", "));

        let mut query = self
            .base
            .db()
            .query(&query_str)
            .bind(("thing", thing))
            .bind(("updated_at", now_millis()));

        if let Some(v) = data.sku {
            query = query.bind(("sku", v));
        }
        if let Some(v) = data.name {
            query = query.bind(("name", v));
        }
        if let Some(v) = data.category {
            query = query.bind(("category", v));
        }
        if let Some(v) = data.price {
            query = query.bind(("price", money_bind(v)?));
        }
        if let Some(v) = data.quantity {
            query = query.bind(("quantity", v));
        }
        if let Some(v) = data.auto_reorder_enabled {
            query = query.bind(("auto_reorder_enabled", v));
        }
        if let Some(v) = data.reorder_point {
            query = query.bind(("reorder_point", v));
        }
        if let Some(v) = data.reorder_quantity {
            query = query.bind(("reorder_quantity", v));
        }
        if let Some(v) = data.supplier_info {
            query = query.bind(("supplier_info", v));
        }
        if let Some(v) = data.is_active {
            query = query.bind(("is_active", v));
        }

        let mut result = query.await?;
        let products: Vec<Product> = result.take(0)?;

        products
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    /// Hard delete a product. Refused while open reorders still reference it;
    /// deleting would leave dangling record links in procurement history.
    /// Also cleans up any guard record left behind.
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let pure_id = strip_table_prefix(PRODUCT_TABLE, id);
        let thing = make_thing(PRODUCT_TABLE, pure_id);

        #[derive(serde::Deserialize)]
        struct CountRow {
            count: u64,
        }

        let open: Vec<CountRow> = self
            .base
            .db()
            .query(
                "SELECT count() AS count FROM reorder \
                 WHERE product = $product AND status IN ['pending', 'ordered'] \
                 GROUP ALL",
            )
            .bind(("product", thing.clone()))
            .await?
            .take(0)?;
        if open.first().map(|r| r.count).unwrap_or(0) > 0 {
            return Err(RepoError::Validation(format!(
                "Product {id} has open reorders; cancel or receive them first"
            )));
        }

        if let Err(e) = self
            .base
            .db()
            .query("DELETE reorder_guard WHERE product = $product")
            .bind(("product", thing))
            .await
        {
            tracing::warn!(product = %id, error = %e, "Reorder guard cleanup failed during delete");
        }

        let result: Option<Product> = self.base.db().delete((PRODUCT_TABLE, pure_id)).await?;
        if result.is_none() {
            return Err(RepoError::NotFound(format!("Product {} not found", id)));
        }
        Ok(())
    }
}
