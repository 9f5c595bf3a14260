//! Guest records.
//!
//! A guest is registered once and accumulates a running total of stay
//! costs; the total is owned by the expense recompute pass and is never
//! written directly by callers.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A registered guest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    pub id: i64,
    pub name: String,
    pub document: String,
    pub phone: String,
    /// Accumulated stay cost in minor currency units.
    pub total_spent_minor: i64,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "guests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub document: String,
    pub phone: String,
    pub total_spent_minor: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::checkins::Entity")]
    Checkins,
}

impl Related<super::checkins::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Checkins.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Guest {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            document: model.document,
            phone: model.phone,
            total_spent_minor: model.total_spent_minor,
        }
    }
}
