use super::db_error;
use super::entities::{user, User};
use crate::application::ports::UserStore;
use crate::domain::{Plan, UserRecord};
use async_trait::async_trait;
use sea_orm::{entity::*, query::*, DatabaseConnection};
use validationly_errors::AppError;

#[derive(Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_record(model: user::Model) -> UserRecord {
    let plan = model.plan.parse().unwrap_or_else(|e| {
        tracing::warn!("User {} has {}; treating as free", model.id, e);
        Plan::Free
    });
    UserRecord {
        id: model.id,
        email: model.email,
        plan,
        stripe_customer_id: model.stripe_customer_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn upsert(&self, record: &UserRecord) -> Result<UserRecord, AppError> {
        let now = chrono::Utc::now();
        let existing = User::find_by_id(record.id.clone())
            .one(&self.db)
            .await
            .map_err(db_error)?;

        let result = if let Some(existing) = existing {
            let keep_customer = existing.stripe_customer_id.clone();
            let mut active: user::ActiveModel = existing.into();
            active.email = Set(record.email.clone());
            active.plan = Set(record.plan.as_str().to_string());
            active.stripe_customer_id = Set(record.stripe_customer_id.clone().or(keep_customer));
            active.updated_at = Set(Some(now));
            active.update(&self.db).await
        } else {
            let active = user::ActiveModel {
                id: Set(record.id.clone()),
                email: Set(record.email.clone()),
                plan: Set(record.plan.as_str().to_string()),
                stripe_customer_id: Set(record.stripe_customer_id.clone()),
                created_at: Set(Some(now)),
                updated_at: Set(Some(now)),
            };
            active.insert(&self.db).await
        };

        result.map(to_record).map_err(db_error)
    }

    async fn find_by_customer(&self, customer_id: &str) -> Result<Option<UserRecord>, AppError> {
        let found = User::find()
            .filter(user::Column::StripeCustomerId.eq(customer_id))
            .one(&self.db)
            .await
            .map_err(db_error)?;
        Ok(found.map(to_record))
    }
}
