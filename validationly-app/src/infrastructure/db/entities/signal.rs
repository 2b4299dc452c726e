use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "signals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub run_id: Uuid,
    pub provider: String,
    pub strength: f64,
    pub freshness: f64,
    pub confidence: f64,
    pub payload: Json,
    pub created_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::validation_run::Entity",
        from = "Column::RunId",
        to = "super::validation_run::Column::Id",
        on_delete = "Cascade"
    )]
    ValidationRun,
}

impl Related<super::validation_run::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ValidationRun.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
