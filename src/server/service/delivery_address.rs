//! Saved delivery addresses of a customer.

use chrono::Utc;
use sea_orm::{ActiveValue, DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{delivery_address::DeliveryAddressRepository, lifecycle},
    error::{conflict_on_unique, lifecycle::LifecycleError, AppError},
    model::delivery_address::{
        CreateDeliveryAddressParams, DeliveryAddress, UpdateDeliveryAddressParams,
        MAX_ADDRESSES_PER_USER,
    },
    policy::{self, Operation, Principal},
};

const DUPLICATE_ADDRESS: &str = "Delivery address already exists";

pub struct DeliveryAddressService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DeliveryAddressService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Saves a new address for the calling customer.
    ///
    /// The duplicate and limit checks run in the same transaction as the insert; the partial
    /// unique index on live `(user_id, address)` rejects a concurrent duplicate that gets past
    /// the check.
    ///
    /// # Returns
    /// - `Ok(DeliveryAddress)` - Saved address
    /// - `Err(AppError::Conflict(_))` - Same live address already saved
    /// - `Err(AppError::BadRequest(_))` - Empty address or address limit reached
    pub async fn create(
        &self,
        caller: Option<&Principal>,
        params: CreateDeliveryAddressParams,
    ) -> Result<DeliveryAddress, AppError> {
        let user_id = caller.map(|principal| principal.id);
        let principal = Operation::CreateDeliveryAddress.require(caller, user_id)?;

        if params.address.is_empty() {
            return Err(AppError::BadRequest("Address must not be empty".to_string()));
        }

        let txn = self.db.begin().await?;
        let repo = DeliveryAddressRepository::new(&txn);

        if repo
            .address_in_use(principal.id, &params.address, None)
            .await?
        {
            return Err(AppError::Conflict(DUPLICATE_ADDRESS.to_string()));
        }
        if repo.count_live_by_user(principal.id).await? >= MAX_ADDRESSES_PER_USER {
            return Err(AppError::BadRequest(format!(
                "At most {} delivery addresses may be saved",
                MAX_ADDRESSES_PER_USER
            )));
        }

        let address = repo
            .create(
                principal.id,
                params.address,
                params.request,
                Utc::now(),
                &principal.username,
            )
            .await
            .map_err(|e| conflict_on_unique(e, DUPLICATE_ADDRESS))?;

        txn.commit().await?;

        Ok(DeliveryAddress::from_entity(address))
    }

    /// Gets one of the caller's live addresses.
    pub async fn get(&self, caller: Option<&Principal>, id: i32) -> Result<DeliveryAddress, AppError> {
        policy::authenticate(caller)?;
        let address = self.find_live(id).await?;
        Operation::ReadDeliveryAddress.require(caller, Some(address.user_id))?;

        Ok(DeliveryAddress::from_entity(address))
    }

    /// Lists the caller's live addresses.
    pub async fn list(&self, caller: Option<&Principal>) -> Result<Vec<DeliveryAddress>, AppError> {
        let user_id = caller.map(|principal| principal.id);
        let principal = Operation::ReadDeliveryAddress.require(caller, user_id)?;

        let addresses = DeliveryAddressRepository::new(self.db)
            .find_live_by_user(principal.id)
            .await?;

        Ok(addresses
            .into_iter()
            .map(DeliveryAddress::from_entity)
            .collect())
    }

    /// Changes one of the caller's live addresses.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest(_))` - New address equals the current one
    /// - `Err(AppError::Conflict(_))` - New address duplicates another live address
    pub async fn update(
        &self,
        caller: Option<&Principal>,
        id: i32,
        params: UpdateDeliveryAddressParams,
    ) -> Result<DeliveryAddress, AppError> {
        policy::authenticate(caller)?;

        let txn = self.db.begin().await?;
        let repo = DeliveryAddressRepository::new(&txn);

        let address = repo.find_live_by_id(id).await?.ok_or(LifecycleError::NotFound {
            resource: "Delivery address",
            id,
        })?;
        let principal = Operation::UpdateDeliveryAddress.require(caller, Some(address.user_id))?;

        if let Some(new_address) = params.address.as_deref() {
            if new_address.is_empty() {
                return Err(AppError::BadRequest("Address must not be empty".to_string()));
            }
            if new_address == address.address {
                return Err(AppError::BadRequest(
                    "New address is the same as the current one".to_string(),
                ));
            }
            if repo
                .address_in_use(address.user_id, new_address, Some(id))
                .await?
            {
                return Err(AppError::Conflict(DUPLICATE_ADDRESS.to_string()));
            }
        }

        let active = lifecycle::mutate(
            address,
            Utc::now(),
            &principal.username,
            |active: &mut entity::delivery_address::ActiveModel| {
                if let Some(address) = params.address {
                    active.address = ActiveValue::Set(address);
                }
                if let Some(request) = params.request {
                    active.request = ActiveValue::Set(Some(request));
                }
            },
        )?;
        let address = repo
            .update(active)
            .await
            .map_err(|e| conflict_on_unique(e, DUPLICATE_ADDRESS))?;

        txn.commit().await?;

        Ok(DeliveryAddress::from_entity(address))
    }

    /// Soft-deletes one of the caller's addresses.
    pub async fn delete(&self, caller: Option<&Principal>, id: i32) -> Result<(), AppError> {
        policy::authenticate(caller)?;
        let repo = DeliveryAddressRepository::new(self.db);
        let address = repo.find_by_id(id).await?.ok_or(LifecycleError::NotFound {
            resource: "Delivery address",
            id,
        })?;
        let principal = Operation::DeleteDeliveryAddress.require(caller, Some(address.user_id))?;

        let active: entity::delivery_address::ActiveModel =
            lifecycle::delete(address, Utc::now(), &principal.username)?;
        repo.update(active).await?;

        Ok(())
    }

    async fn find_live(&self, id: i32) -> Result<entity::delivery_address::Model, AppError> {
        Ok(DeliveryAddressRepository::new(self.db)
            .find_live_by_id(id)
            .await?
            .ok_or(LifecycleError::NotFound {
                resource: "Delivery address",
                id,
            })?)
    }
}
