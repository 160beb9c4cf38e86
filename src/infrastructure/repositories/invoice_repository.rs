//! SeaORM implementation of InvoiceRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::domain::{
    Address, BankAccount, Customer, DomainError, Invoice, InvoiceDocument, InvoiceInput,
    InvoiceItem, InvoiceRepository, Vendor,
};
use crate::models::invoice::{self, ActiveModel, Entity as InvoiceEntity};
use crate::models::{address, bank_account, customer, invoice_item, vendor};

/// SeaORM-based implementation of InvoiceRepository
pub struct SeaOrmInvoiceRepository {
    db: DatabaseConnection,
}

impl SeaOrmInvoiceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn address(&self, id: i32) -> Result<Address, DomainError> {
        address::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Address::from)
            .ok_or_else(|| DomainError::Database(format!("Address {} is missing", id)))
    }
}

impl From<invoice::Model> for Invoice {
    fn from(model: invoice::Model) -> Self {
        Self {
            id: model.id,
            invoice_number: model.invoice_number,
            date: model.date,
            vendor_id: model.vendor_id,
            customer_id: model.customer_id,
        }
    }
}

#[async_trait]
impl InvoiceRepository for SeaOrmInvoiceRepository {
    async fn find_all(&self) -> Result<Vec<Invoice>, DomainError> {
        let invoices = InvoiceEntity::find()
            .order_by_asc(invoice::Column::Id)
            .all(&self.db)
            .await?;

        Ok(invoices.into_iter().map(Invoice::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Invoice>, DomainError> {
        let invoice = InvoiceEntity::find_by_id(id).one(&self.db).await?;
        Ok(invoice.map(Invoice::from))
    }

    async fn find_by_number(
        &self,
        vendor_id: i32,
        invoice_number: i32,
    ) -> Result<Option<Invoice>, DomainError> {
        let invoice = InvoiceEntity::find()
            .filter(invoice::Column::VendorId.eq(vendor_id))
            .filter(invoice::Column::InvoiceNumber.eq(invoice_number))
            .one(&self.db)
            .await?;
        Ok(invoice.map(Invoice::from))
    }

    async fn create(&self, input: InvoiceInput) -> Result<Invoice, DomainError> {
        let invoice = ActiveModel {
            invoice_number: Set(input.invoice_number),
            date: Set(input.date),
            vendor_id: Set(input.vendor_id),
            customer_id: Set(input.customer_id),
            ..Default::default()
        };

        let result = invoice.insert(&self.db).await?;
        tracing::debug!(
            "Created invoice {} (number {})",
            result.id,
            result.invoice_number
        );
        Ok(result.into())
    }

    async fn update(&self, id: i32, input: InvoiceInput) -> Result<Invoice, DomainError> {
        let existing = InvoiceEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.invoice_number = Set(input.invoice_number);
        active.date = Set(input.date);
        active.vendor_id = Set(input.vendor_id);
        active.customer_id = Set(input.customer_id);

        Ok(active.update(&self.db).await?.into())
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        let items = invoice_item::Entity::delete_many()
            .filter(invoice_item::Column::InvoiceId.eq(id))
            .exec(&txn)
            .await?;
        let result = InvoiceEntity::delete_by_id(id).exec(&txn).await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(DomainError::NotFound);
        }
        txn.commit().await?;

        tracing::debug!("Deleted invoice {} with {} item(s)", id, items.rows_affected);
        Ok(())
    }

    async fn load_document(&self, id: i32) -> Result<InvoiceDocument, DomainError> {
        let invoice = InvoiceEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let vendor = vendor::Entity::find_by_id(invoice.vendor_id)
            .one(&self.db)
            .await?
            .map(Vendor::from)
            .ok_or_else(|| DomainError::Database(format!("Vendor {} is missing", invoice.vendor_id)))?;
        let customer = customer::Entity::find_by_id(invoice.customer_id)
            .one(&self.db)
            .await?
            .map(Customer::from)
            .ok_or_else(|| {
                DomainError::Database(format!("Customer {} is missing", invoice.customer_id))
            })?;

        let vendor_address = self.address(vendor.address_id).await?;
        let customer_address = self.address(customer.address_id).await?;

        let bank_accounts = bank_account::Entity::find()
            .filter(bank_account::Column::VendorId.eq(vendor.id))
            .order_by_asc(bank_account::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(BankAccount::from)
            .collect();

        let items = invoice_item::Entity::find()
            .filter(invoice_item::Column::InvoiceId.eq(invoice.id))
            .order_by_asc(invoice_item::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(InvoiceItem::from)
            .collect();

        Ok(InvoiceDocument {
            invoice: invoice.into(),
            vendor,
            vendor_address,
            bank_accounts,
            customer,
            customer_address,
            items,
        })
    }
}
