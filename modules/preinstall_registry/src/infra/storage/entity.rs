//! SeaORM entities for database tables

use sea_orm::entity::prelude::*;

/// Submissions table entity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    /// Autoincrement id, never reused
    #[sea_orm(primary_key)]
    pub id: i32,

    pub intersection_name: String,
    pub city: String,
    pub state: String,
    pub end_user: String,
    pub distributor: String,
    pub cabinet_type: String,
    pub tls_connection: String,
    pub detection_io: Option<String>,
    pub phasing: Option<String>,
    pub timing_plans: Option<String>,

    /// Insert timestamp
    pub submitted_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
