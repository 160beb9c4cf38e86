//! SeaORM implementation of VendorRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::domain::{DomainError, Vendor, VendorInput, VendorRepository};
use crate::models::vendor::{self, ActiveModel, Entity as VendorEntity};
use crate::models::{bank_account, invoice};

/// SeaORM-based implementation of VendorRepository
pub struct SeaOrmVendorRepository {
    db: DatabaseConnection,
}

impl SeaOrmVendorRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<vendor::Model> for Vendor {
    fn from(model: vendor::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            company_name: model.company_name,
            address_id: model.address_id,
        }
    }
}

#[async_trait]
impl VendorRepository for SeaOrmVendorRepository {
    async fn find_all(&self) -> Result<Vec<Vendor>, DomainError> {
        let vendors = VendorEntity::find()
            .order_by_asc(vendor::Column::Id)
            .all(&self.db)
            .await?;

        Ok(vendors.into_iter().map(Vendor::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Vendor>, DomainError> {
        let vendor = VendorEntity::find_by_id(id).one(&self.db).await?;
        Ok(vendor.map(Vendor::from))
    }

    async fn create(&self, input: VendorInput) -> Result<Vendor, DomainError> {
        let vendor = ActiveModel {
            name: Set(input.name),
            company_name: Set(input.company_name),
            address_id: Set(input.address_id),
            ..Default::default()
        };

        let result = vendor.insert(&self.db).await?;
        tracing::debug!("Created vendor {}", result.id);
        Ok(result.into())
    }

    async fn update(&self, id: i32, input: VendorInput) -> Result<Vendor, DomainError> {
        let existing = VendorEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(input.name);
        active.company_name = Set(input.company_name);
        active.address_id = Set(input.address_id);

        Ok(active.update(&self.db).await?.into())
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        if VendorEntity::find_by_id(id).one(&self.db).await?.is_none() {
            return Err(DomainError::NotFound);
        }

        let invoices = invoice::Entity::find()
            .filter(invoice::Column::VendorId.eq(id))
            .count(&self.db)
            .await?;
        if invoices > 0 {
            return Err(DomainError::Conflict(format!(
                "Vendor has issued {} invoice(s)",
                invoices
            )));
        }

        let txn = self.db.begin().await?;
        let accounts = bank_account::Entity::delete_many()
            .filter(bank_account::Column::VendorId.eq(id))
            .exec(&txn)
            .await?;
        VendorEntity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        tracing::debug!(
            "Deleted vendor {} and {} bank account(s)",
            id,
            accounts.rows_affected
        );
        Ok(())
    }
}
