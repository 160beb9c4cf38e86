//! Row counts for the start page

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

use crate::domain::{DomainError, Overview, OverviewRepository};
use crate::models::{address, bank_account, customer, invoice, invoice_item, vendor};

pub struct SeaOrmOverviewRepository {
    db: DatabaseConnection,
}

impl SeaOrmOverviewRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OverviewRepository for SeaOrmOverviewRepository {
    async fn overview(&self) -> Result<Overview, DomainError> {
        Ok(Overview {
            addresses: address::Entity::find().count(&self.db).await?,
            customers: customer::Entity::find().count(&self.db).await?,
            vendors: vendor::Entity::find().count(&self.db).await?,
            bank_accounts: bank_account::Entity::find().count(&self.db).await?,
            invoices: invoice::Entity::find().count(&self.db).await?,
            invoice_items: invoice_item::Entity::find().count(&self.db).await?,
        })
    }
}
