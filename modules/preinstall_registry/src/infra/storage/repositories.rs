//! SeaORM repository implementations

use crate::contract::{FilterColumn, NewSubmission, Submission, SubmissionFilter};
use crate::domain::repository::SubmissionRepository;
use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{
    sea_query::{Alias, Expr, Func, SimpleExpr},
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select,
};
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;

use super::entity;
use super::migrations::Migrator;

// ===== Submission Repository =====

pub struct SeaOrmSubmissionRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmSubmissionRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Create the submissions schema if it is not there yet; safe on every startup
    pub async fn initialize(&self) -> Result<()> {
        Migrator::up(&*self.db, None).await?;
        Ok(())
    }
}

/// Case-sensitive substring test; SQLite `LIKE` would fold ASCII case
fn contains(column: entity::Column, term: &str) -> SimpleExpr {
    Expr::expr(
        Func::cust(Alias::new("instr"))
            .arg(Expr::col(column))
            .arg(Expr::val(term.to_string())),
    )
    .gt(0)
}

fn apply_filter(query: Select<entity::Entity>, filter: &SubmissionFilter) -> Select<entity::Entity> {
    let mut condition = Condition::all();

    if let Some(term) = &filter.search {
        condition = condition.add(
            Condition::any()
                .add(contains(entity::Column::IntersectionName, term))
                .add(contains(entity::Column::City, term))
                .add(contains(entity::Column::EndUser, term))
                .add(contains(entity::Column::Distributor, term)),
        );
    }
    if let Some(city) = &filter.city {
        condition = condition.add(entity::Column::City.eq(city.as_str()));
    }
    if let Some(state) = &filter.state {
        condition = condition.add(entity::Column::State.eq(state.as_str()));
    }
    if let Some(cabinet_type) = &filter.cabinet_type {
        condition = condition.add(entity::Column::CabinetType.eq(cabinet_type.as_str()));
    }

    query.filter(condition)
}

#[async_trait]
impl SubmissionRepository for SeaOrmSubmissionRepository {
    async fn insert(&self, submission: &NewSubmission) -> Result<Submission> {
        use sea_orm::ActiveValue::Set;

        let mut active: entity::ActiveModel = submission.into();
        active.submitted_at = Set(chrono::Utc::now());

        let result = entity::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;

        Ok(result.into())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Submission>> {
        let result = entity::Entity::find_by_id(id).one(&*self.db).await?;

        Ok(result.map(|e| e.into()))
    }

    async fn delete_by_id(&self, id: i32) -> Result<u64> {
        let result = entity::Entity::delete_by_id(id).exec(&*self.db).await?;

        Ok(result.rows_affected)
    }

    async fn list(
        &self,
        filter: &SubmissionFilter,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Submission>> {
        let results = apply_filter(entity::Entity::find(), filter)
            .order_by_desc(entity::Column::SubmittedAt)
            .order_by_desc(entity::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(|e| e.into()).collect())
    }

    async fn count(&self, filter: &SubmissionFilter) -> Result<u64> {
        let total = apply_filter(entity::Entity::find(), filter)
            .count(&*self.db)
            .await?;

        Ok(total)
    }

    async fn distinct_values(&self, column: FilterColumn) -> Result<Vec<String>> {
        let column: entity::Column = column.into();

        let values = entity::Entity::find()
            .select_only()
            .column(column)
            .distinct()
            .order_by_asc(column)
            .into_tuple::<String>()
            .all(&*self.db)
            .await?;

        Ok(values)
    }
}
