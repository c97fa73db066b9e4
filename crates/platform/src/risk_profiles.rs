// In crates/platform/src/risk_profiles.rs

use crate::error::storage;
use crate::{
    EntityKind, Platform, Result, delete_document, into_patch, list_documents, new_id,
    update_document,
};
use chrono::Utc;
use core_types::{CreateRiskProfile, RiskProfile, UpdateRiskProfile, Validate, rules};
use database::Filter;

impl Platform {
    pub async fn create_risk_profile(&self, mut input: CreateRiskProfile) -> Result<RiskProfile> {
        input.validate()?;

        let now = Utc::now();
        let profile = RiskProfile {
            id: new_id(),
            name: input.name,
            description: input.description,
            image: input.image,
            max_drawdown: input.max_drawdown,
            challenge_profit_target: input.challenge_profit_target,
            challenge_time_box: input.challenge_time_box,
            created_at: now,
            updated_at: now,
        };

        let saved = self
            .db
            .risk_profiles
            .save(&profile)
            .await
            .map_err(storage(EntityKind::RiskProfile, "create risk profile"))?;
        tracing::info!(
            risk_profile_id = %saved.id,
            days = saved.challenge_time_box,
            "Risk profile created"
        );
        Ok(saved)
    }

    pub async fn get_all_risk_profiles(&self) -> Result<Vec<RiskProfile>> {
        list_documents(
            self.db.risk_profiles.as_ref(),
            EntityKind::RiskProfile,
            Filter::All,
            "fetch risk profiles",
        )
        .await
    }

    pub async fn get_risk_profile_by_id(&self, id: &str) -> Result<RiskProfile> {
        rules::required("id", id, "Risk Profile ID is required")?;
        self.require_risk_profile(id).await
    }

    /// Existing challenges keep their end date when the time box changes.
    pub async fn update_risk_profile(&self, mut input: UpdateRiskProfile) -> Result<RiskProfile> {
        input.validate()?;
        let patch = into_patch(EntityKind::RiskProfile, &input, Utc::now())?;
        update_document(
            self.db.risk_profiles.as_ref(),
            EntityKind::RiskProfile,
            &input.id,
            patch,
            "update risk profile",
        )
        .await
    }

    pub async fn delete_risk_profile(&self, id: &str) -> Result<RiskProfile> {
        rules::required("id", id, "Risk Profile ID is required")?;
        delete_document(
            self.db.risk_profiles.as_ref(),
            EntityKind::RiskProfile,
            id,
            "delete risk profile",
        )
        .await
    }
}
