//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use super::entity;
use crate::contract::{FilterColumn, NewSubmission, Submission};

impl From<entity::Model> for Submission {
    fn from(entity: entity::Model) -> Self {
        Self {
            id: entity.id,
            intersection_name: entity.intersection_name,
            city: entity.city,
            state: entity.state,
            end_user: entity.end_user,
            distributor: entity.distributor,
            cabinet_type: entity.cabinet_type,
            tls_connection: entity.tls_connection,
            detection_io: entity.detection_io,
            phasing: entity.phasing,
            timing_plans: entity.timing_plans,
            submitted_at: entity.submitted_at,
        }
    }
}

impl From<&NewSubmission> for entity::ActiveModel {
    fn from(model: &NewSubmission) -> Self {
        use sea_orm::ActiveValue::*;

        Self {
            id: NotSet,
            intersection_name: Set(model.intersection_name.clone()),
            city: Set(model.city.clone()),
            state: Set(model.state.clone()),
            end_user: Set(model.end_user.clone()),
            distributor: Set(model.distributor.clone()),
            cabinet_type: Set(model.cabinet_type.clone()),
            tls_connection: Set(model.tls_connection.clone()),
            detection_io: Set(model.detection_io.clone()),
            phasing: Set(model.phasing.clone()),
            timing_plans: Set(model.timing_plans.clone()),
            submitted_at: NotSet,
        }
    }
}

impl From<FilterColumn> for entity::Column {
    fn from(column: FilterColumn) -> Self {
        match column {
            FilterColumn::City => entity::Column::City,
            FilterColumn::State => entity::Column::State,
            FilterColumn::CabinetType => entity::Column::CabinetType,
        }
    }
}
