// In crates/platform/src/challenges.rs

use crate::error::storage;
use crate::validators::ensure_trader;
use crate::{
    EntityKind, Platform, Result, delete_document, get_document, into_patch, list_documents, new_id,
    update_document,
};
use chrono::{DateTime, Duration, Utc};
use core_types::{Challenge, CreateChallenge, RiskProfile, UpdateChallenge, Validate, rules};
use database::Filter;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Every challenge starts with this balance.
pub const CHALLENGE_STARTING_BALANCE: Decimal = dec!(10000);

/// `start + challengeTimeBox` whole days, as a plain duration (no calendar or
/// timezone adjustment).
pub(crate) fn challenge_end_date(start: DateTime<Utc>, profile: &RiskProfile) -> DateTime<Utc> {
    start + Duration::days(i64::from(profile.challenge_time_box))
}

impl Platform {
    /// Starts a challenge for a trader under the given risk profile.
    ///
    /// Only `userId` and `riskProfileId` come from the caller. The balance is
    /// fixed, the start is now and the end is derived from the profile's time box.
    pub async fn create_challenge(&self, mut input: CreateChallenge) -> Result<Challenge> {
        input.validate()?;

        let user = self.require_user(&input.user_id).await?;
        let profile = self.require_risk_profile(&input.risk_profile_id).await?;
        ensure_trader(&user, "challenges")?;

        let start_date = Utc::now();
        let challenge = Challenge {
            id: new_id(),
            user_id: input.user_id,
            risk_profile_id: input.risk_profile_id,
            balance: CHALLENGE_STARTING_BALANCE,
            start_date,
            end_date: challenge_end_date(start_date, &profile),
            created_at: start_date,
            updated_at: start_date,
        };

        let saved = self
            .db
            .challenges
            .save(&challenge)
            .await
            .map_err(storage(EntityKind::Challenge, "create challenge"))?;
        tracing::info!(
            challenge_id = %saved.id,
            user_id = %saved.user_id,
            end_date = %saved.end_date,
            "Challenge created"
        );
        Ok(saved)
    }

    pub async fn get_all_challenges(&self) -> Result<Vec<Challenge>> {
        list_documents(
            self.db.challenges.as_ref(),
            EntityKind::Challenge,
            Filter::All,
            "fetch challenges",
        )
        .await
    }

    pub async fn get_challenge_by_id(&self, id: &str) -> Result<Challenge> {
        rules::required("id", id, "Challenge ID is required")?;
        get_document(
            self.db.challenges.as_ref(),
            EntityKind::Challenge,
            id,
            "fetch challenge",
        )
        .await
    }

    pub async fn get_challenges_by_user_id(&self, user_id: &str) -> Result<Vec<Challenge>> {
        rules::challenge::user_id(user_id)?;
        list_documents(
            self.db.challenges.as_ref(),
            EntityKind::Challenge,
            Filter::eq("userId", user_id),
            "fetch user challenges",
        )
        .await
    }

    pub async fn update_challenge(&self, mut input: UpdateChallenge) -> Result<Challenge> {
        input.validate()?;
        let patch = into_patch(EntityKind::Challenge, &input, Utc::now())?;
        update_document(
            self.db.challenges.as_ref(),
            EntityKind::Challenge,
            &input.id,
            patch,
            "update challenge",
        )
        .await
    }

    pub async fn delete_challenge(&self, id: &str) -> Result<Challenge> {
        rules::required("id", id, "Challenge ID is required")?;
        delete_document(
            self.db.challenges.as_ref(),
            EntityKind::Challenge,
            id,
            "delete challenge",
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_date_is_whole_days_after_start() {
        let now = Utc::now();
        let profile = RiskProfile {
            id: "r1".into(),
            name: "Standard".into(),
            description: "30 day evaluation".into(),
            image: "standard.png".into(),
            max_drawdown: dec!(10),
            challenge_profit_target: dec!(8),
            challenge_time_box: 30,
            created_at: now,
            updated_at: now,
        };

        let end = challenge_end_date(now, &profile);
        assert_eq!((end - now).num_milliseconds(), 30 * 24 * 60 * 60 * 1000);
    }
}
