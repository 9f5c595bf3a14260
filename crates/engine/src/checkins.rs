//! Check-in records.
//!
//! One stay per guest, schema-enforced. Timestamps are naive wall-clock
//! values in the hotel's local zone; `exit_time` is nullable in storage so
//! an open stay can be told apart from a completed one.

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One guest's continuous occupancy record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkin {
    pub id: i64,
    pub guest_id: i64,
    pub entry_time: NaiveDateTime,
    pub exit_time: Option<NaiveDateTime>,
    pub vehicle_surcharge: bool,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "checkins")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub guest_id: i64,
    pub entry_time: DateTime,
    pub exit_time: Option<DateTime>,
    pub vehicle_surcharge: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::guests::Entity",
        from = "Column::GuestId",
        to = "super::guests::Column::Id"
    )]
    Guests,
}

impl Related<super::guests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Guests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Checkin {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            guest_id: model.guest_id,
            entry_time: model.entry_time,
            exit_time: model.exit_time,
            vehicle_surcharge: model.vehicle_surcharge,
        }
    }
}
