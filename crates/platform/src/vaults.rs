// In crates/platform/src/vaults.rs

use crate::error::storage;
use crate::validators::ensure_trader;
use crate::{
    EntityKind, Platform, Result, delete_document, get_document, into_patch, list_documents, new_id,
    update_document,
};
use chrono::Utc;
use core_types::{CreateVault, UpdateVault, Validate, Vault, rules};
use database::Filter;

impl Platform {
    /// Opens a vault. Only users with the trader role can own one.
    pub async fn create_vault(&self, mut input: CreateVault) -> Result<Vault> {
        input.validate()?;

        let user = self.require_user(&input.user_id).await?;
        ensure_trader(&user, "vaults")?;

        let now = Utc::now();
        let vault = Vault {
            id: new_id(),
            user_id: input.user_id,
            name: input.name,
            picture: input.picture,
            balance: input.balance,
            profit_share_ratio: input.profit_share_ratio,
            payout_cycle: input.payout_cycle,
            created_at: now,
            updated_at: now,
        };

        let saved = self
            .db
            .vaults
            .save(&vault)
            .await
            .map_err(storage(EntityKind::Vault, "create vault"))?;
        tracing::info!(vault_id = %saved.id, user_id = %saved.user_id, "Vault created");
        Ok(saved)
    }

    pub async fn get_all_vaults(&self) -> Result<Vec<Vault>> {
        list_documents(
            self.db.vaults.as_ref(),
            EntityKind::Vault,
            Filter::All,
            "fetch vaults",
        )
        .await
    }

    pub async fn get_vault_by_id(&self, id: &str) -> Result<Vault> {
        rules::required("id", id, "Vault ID is required")?;
        get_document(self.db.vaults.as_ref(), EntityKind::Vault, id, "fetch vault").await
    }

    pub async fn get_vaults_by_user_id(&self, user_id: &str) -> Result<Vec<Vault>> {
        rules::vault::user_id(user_id)?;
        list_documents(
            self.db.vaults.as_ref(),
            EntityKind::Vault,
            Filter::eq("userId", user_id),
            "fetch user vaults",
        )
        .await
    }

    pub async fn update_vault(&self, mut input: UpdateVault) -> Result<Vault> {
        input.validate()?;
        let patch = into_patch(EntityKind::Vault, &input, Utc::now())?;
        update_document(
            self.db.vaults.as_ref(),
            EntityKind::Vault,
            &input.id,
            patch,
            "update vault",
        )
        .await
    }

    pub async fn delete_vault(&self, id: &str) -> Result<Vault> {
        rules::required("id", id, "Vault ID is required")?;
        delete_document(self.db.vaults.as_ref(), EntityKind::Vault, id, "delete vault").await
    }
}
