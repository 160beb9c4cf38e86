//! SeaORM implementation of CustomerRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::{Customer, CustomerInput, CustomerRepository, DomainError};
use crate::models::customer::{self, ActiveModel, Entity as CustomerEntity};
use crate::models::invoice;

/// SeaORM-based implementation of CustomerRepository
pub struct SeaOrmCustomerRepository {
    db: DatabaseConnection,
}

impl SeaOrmCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<customer::Model> for Customer {
    fn from(model: customer::Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            address_id: model.address_id,
        }
    }
}

#[async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn find_all(&self) -> Result<Vec<Customer>, DomainError> {
        let customers = CustomerEntity::find()
            .order_by_asc(customer::Column::Id)
            .all(&self.db)
            .await?;

        Ok(customers.into_iter().map(Customer::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, DomainError> {
        let customer = CustomerEntity::find_by_id(id).one(&self.db).await?;
        Ok(customer.map(Customer::from))
    }

    async fn create(&self, input: CustomerInput) -> Result<Customer, DomainError> {
        let customer = ActiveModel {
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            email: Set(input.email),
            address_id: Set(input.address_id),
            ..Default::default()
        };

        let result = customer.insert(&self.db).await?;
        tracing::debug!("Created customer {}", result.id);
        Ok(result.into())
    }

    async fn update(&self, id: i32, input: CustomerInput) -> Result<Customer, DomainError> {
        let existing = CustomerEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.first_name = Set(input.first_name);
        active.last_name = Set(input.last_name);
        active.email = Set(input.email);
        active.address_id = Set(input.address_id);

        Ok(active.update(&self.db).await?.into())
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        if CustomerEntity::find_by_id(id).one(&self.db).await?.is_none() {
            return Err(DomainError::NotFound);
        }

        let invoices = invoice::Entity::find()
            .filter(invoice::Column::CustomerId.eq(id))
            .count(&self.db)
            .await?;
        if invoices > 0 {
            return Err(DomainError::Conflict(format!(
                "Customer is billed on {} invoice(s)",
                invoices
            )));
        }

        CustomerEntity::delete_by_id(id).exec(&self.db).await?;
        tracing::debug!("Deleted customer {}", id);
        Ok(())
    }
}
