//! SeaORM implementation of AddressRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::{Address, AddressInput, AddressRepository, DomainError};
use crate::models::address::{self, ActiveModel, Entity as AddressEntity};
use crate::models::{customer, vendor};

/// SeaORM-based implementation of AddressRepository
pub struct SeaOrmAddressRepository {
    db: DatabaseConnection,
}

impl SeaOrmAddressRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<address::Model> for Address {
    fn from(model: address::Model) -> Self {
        Self {
            id: model.id,
            street: model.street,
            number: model.number,
            city: model.city,
            country: model.country,
        }
    }
}

#[async_trait]
impl AddressRepository for SeaOrmAddressRepository {
    async fn find_all(&self) -> Result<Vec<Address>, DomainError> {
        let addresses = AddressEntity::find()
            .order_by_asc(address::Column::Id)
            .all(&self.db)
            .await?;

        Ok(addresses.into_iter().map(Address::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Address>, DomainError> {
        let address = AddressEntity::find_by_id(id).one(&self.db).await?;
        Ok(address.map(Address::from))
    }

    async fn create(&self, input: AddressInput) -> Result<Address, DomainError> {
        let address = ActiveModel {
            street: Set(input.street),
            number: Set(input.number),
            city: Set(input.city),
            country: Set(input.country),
            ..Default::default()
        };

        let result = address.insert(&self.db).await?;
        tracing::debug!("Created address {}", result.id);
        Ok(result.into())
    }

    async fn update(&self, id: i32, input: AddressInput) -> Result<Address, DomainError> {
        let existing = AddressEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.street = Set(input.street);
        active.number = Set(input.number);
        active.city = Set(input.city);
        active.country = Set(input.country);

        Ok(active.update(&self.db).await?.into())
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        if AddressEntity::find_by_id(id).one(&self.db).await?.is_none() {
            return Err(DomainError::NotFound);
        }

        let customers = customer::Entity::find()
            .filter(customer::Column::AddressId.eq(id))
            .count(&self.db)
            .await?;
        let vendors = vendor::Entity::find()
            .filter(vendor::Column::AddressId.eq(id))
            .count(&self.db)
            .await?;
        if customers + vendors > 0 {
            return Err(DomainError::Conflict(format!(
                "Address is used by {} customer(s) and {} vendor(s)",
                customers, vendors
            )));
        }

        AddressEntity::delete_by_id(id).exec(&self.db).await?;
        tracing::debug!("Deleted address {}", id);
        Ok(())
    }
}
