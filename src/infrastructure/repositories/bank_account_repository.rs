//! SeaORM implementation of BankAccountRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{BankAccount, BankAccountInput, BankAccountRepository, DomainError};
use crate::models::bank_account::{self, ActiveModel, Entity as BankAccountEntity};

/// SeaORM-based implementation of BankAccountRepository
pub struct SeaOrmBankAccountRepository {
    db: DatabaseConnection,
}

impl SeaOrmBankAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<bank_account::Model> for BankAccount {
    fn from(model: bank_account::Model) -> Self {
        Self {
            id: model.id,
            vendor_id: model.vendor_id,
            bank_name: model.bank_name,
            iban: model.iban,
            bic: model.bic,
        }
    }
}

#[async_trait]
impl BankAccountRepository for SeaOrmBankAccountRepository {
    async fn find_all(&self) -> Result<Vec<BankAccount>, DomainError> {
        let accounts = BankAccountEntity::find()
            .order_by_asc(bank_account::Column::Id)
            .all(&self.db)
            .await?;

        Ok(accounts.into_iter().map(BankAccount::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<BankAccount>, DomainError> {
        let account = BankAccountEntity::find_by_id(id).one(&self.db).await?;
        Ok(account.map(BankAccount::from))
    }

    async fn find_by_vendor(&self, vendor_id: i32) -> Result<Vec<BankAccount>, DomainError> {
        let accounts = BankAccountEntity::find()
            .filter(bank_account::Column::VendorId.eq(vendor_id))
            .order_by_asc(bank_account::Column::Id)
            .all(&self.db)
            .await?;

        Ok(accounts.into_iter().map(BankAccount::from).collect())
    }

    async fn create(&self, input: BankAccountInput) -> Result<BankAccount, DomainError> {
        let account = ActiveModel {
            vendor_id: Set(input.vendor_id),
            bank_name: Set(input.bank_name),
            iban: Set(input.iban),
            bic: Set(input.bic),
            ..Default::default()
        };

        let result = account.insert(&self.db).await?;
        tracing::debug!("Created bank account {}", result.id);
        Ok(result.into())
    }

    async fn update(&self, id: i32, input: BankAccountInput) -> Result<BankAccount, DomainError> {
        let existing = BankAccountEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.vendor_id = Set(input.vendor_id);
        active.bank_name = Set(input.bank_name);
        active.iban = Set(input.iban);
        active.bic = Set(input.bic);

        Ok(active.update(&self.db).await?.into())
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = BankAccountEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }
}
