//! SeaORM implementation of InvoiceItemRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{DomainError, InvoiceItem, InvoiceItemInput, InvoiceItemRepository};
use crate::models::invoice_item::{self, ActiveModel, Entity as InvoiceItemEntity};

/// SeaORM-based implementation of InvoiceItemRepository
pub struct SeaOrmInvoiceItemRepository {
    db: DatabaseConnection,
}

impl SeaOrmInvoiceItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<invoice_item::Model> for InvoiceItem {
    fn from(model: invoice_item::Model) -> Self {
        Self {
            id: model.id,
            invoice_id: model.invoice_id,
            name: model.name,
            description: model.description,
            quantity: model.quantity,
            // SQLite hands the column back through a float
            price: model.price.round_dp(2),
            tax: model.tax,
        }
    }
}

#[async_trait]
impl InvoiceItemRepository for SeaOrmInvoiceItemRepository {
    async fn find_all(&self) -> Result<Vec<InvoiceItem>, DomainError> {
        let items = InvoiceItemEntity::find()
            .order_by_asc(invoice_item::Column::Id)
            .all(&self.db)
            .await?;

        Ok(items.into_iter().map(InvoiceItem::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<InvoiceItem>, DomainError> {
        let item = InvoiceItemEntity::find_by_id(id).one(&self.db).await?;
        Ok(item.map(InvoiceItem::from))
    }

    async fn find_by_invoice(&self, invoice_id: i32) -> Result<Vec<InvoiceItem>, DomainError> {
        let items = InvoiceItemEntity::find()
            .filter(invoice_item::Column::InvoiceId.eq(invoice_id))
            .order_by_asc(invoice_item::Column::Id)
            .all(&self.db)
            .await?;

        Ok(items.into_iter().map(InvoiceItem::from).collect())
    }

    async fn create(&self, input: InvoiceItemInput) -> Result<InvoiceItem, DomainError> {
        let item = ActiveModel {
            invoice_id: Set(input.invoice_id),
            name: Set(input.name),
            description: Set(input.description),
            quantity: Set(input.quantity),
            price: Set(input.price.round_dp(2)),
            tax: Set(input.tax),
            ..Default::default()
        };

        let result = item.insert(&self.db).await?;
        tracing::debug!(
            "Created item {} on invoice {}",
            result.id,
            result.invoice_id
        );
        Ok(result.into())
    }

    async fn update(&self, id: i32, input: InvoiceItemInput) -> Result<InvoiceItem, DomainError> {
        let existing = InvoiceItemEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.invoice_id = Set(input.invoice_id);
        active.name = Set(input.name);
        active.description = Set(input.description);
        active.quantity = Set(input.quantity);
        active.price = Set(input.price.round_dp(2));
        active.tax = Set(input.tax);

        Ok(active.update(&self.db).await?.into())
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = InvoiceItemEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }
}
