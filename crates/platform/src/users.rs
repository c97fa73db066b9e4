// In crates/platform/src/users.rs

use crate::error::storage;
use crate::{
    EntityKind, Error, Platform, Result, delete_document, get_document, into_patch, list_documents,
    new_id, update_document,
};
use chrono::Utc;
use core_types::{CreateUser, UpdateUser, User, Validate, rules};
use database::Filter;

impl Platform {
    /// Registers a user. Email and wallet address must not be taken.
    pub async fn create_user(&self, mut input: CreateUser) -> Result<User> {
        input.validate()?;

        let now = Utc::now();
        let user = User {
            id: new_id(),
            name: input.name,
            email: input.email,
            wallet_address: input.wallet_address,
            role: input.role,
            profile_picture: input.profile_picture,
            created_at: now,
            updated_at: now,
        };

        let saved = self
            .db
            .users
            .save(&user)
            .await
            .map_err(storage(EntityKind::User, "create user"))?;
        tracing::info!(user_id = %saved.id, role = %saved.role, "User created");
        Ok(saved)
    }

    pub async fn get_all_users(&self) -> Result<Vec<User>> {
        list_documents(self.db.users.as_ref(), EntityKind::User, Filter::All, "fetch users").await
    }

    pub async fn get_user_by_id(&self, id: &str) -> Result<User> {
        rules::required("id", id, "User ID is required")?;
        get_document(self.db.users.as_ref(), EntityKind::User, id, "fetch user").await
    }

    /// The lookup a wallet login performs once the wallet is connected.
    pub async fn get_user_by_wallet_address(&self, wallet_address: &str) -> Result<User> {
        rules::user::wallet_address(wallet_address)?;
        self.db
            .users
            .find(&Filter::eq("walletAddress", wallet_address))
            .await
            .map_err(storage(EntityKind::User, "fetch user"))?
            .into_iter()
            .next()
            .ok_or_else(|| Error::not_found(EntityKind::User, wallet_address))
    }

    pub async fn update_user(&self, mut input: UpdateUser) -> Result<User> {
        input.validate()?;
        let patch = into_patch(EntityKind::User, &input, Utc::now())?;
        update_document(
            self.db.users.as_ref(),
            EntityKind::User,
            &input.id,
            patch,
            "update user",
        )
        .await
    }

    /// Removes the user only. Their challenges, vaults, positions and trades are kept.
    pub async fn delete_user(&self, id: &str) -> Result<User> {
        rules::required("id", id, "User ID is required")?;
        delete_document(self.db.users.as_ref(), EntityKind::User, id, "delete user").await
    }
}
