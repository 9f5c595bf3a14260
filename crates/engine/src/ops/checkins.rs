use chrono::NaiveDateTime;
use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};

use crate::{
    Checkin, EngineError, Guest, ResultEngine, checkins, guests,
    rates::{STANDARD_RATES, stay_charge_minor},
};

use super::{Engine, with_tx};

impl Engine {
    /// Records a stay for an existing guest, then refreshes every guest's
    /// running total in the same transaction.
    ///
    /// The returned snapshot is taken before the recompute pass: the
    /// response carries the state as read, totals catch up in storage.
    pub async fn new_checkin(
        &self,
        guest_id: i64,
        entry_time: NaiveDateTime,
        exit_time: NaiveDateTime,
        vehicle_surcharge: bool,
    ) -> ResultEngine<(Checkin, Guest)> {
        with_tx!(self, |db_tx| {
            let guest_model = guests::Entity::find_by_id(guest_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("guest not exists".to_string()))?;

            let exists = checkins::Entity::find()
                .filter(checkins::Column::GuestId.eq(guest_id))
                .one(&db_tx)
                .await?
                .is_some();
            if exists {
                return Err(EngineError::ExistingKey(format!(
                    "check-in for guest {guest_id}"
                )));
            }

            let model = checkins::ActiveModel {
                guest_id: ActiveValue::Set(guest_id),
                entry_time: ActiveValue::Set(entry_time),
                exit_time: ActiveValue::Set(Some(exit_time)),
                vehicle_surcharge: ActiveValue::Set(vehicle_surcharge),
                ..Default::default()
            }
            .insert(&db_tx)
            .await?;

            let checkin = Checkin::from(model);
            let guest = Guest::from(guest_model);

            recompute_expenses_tx(&db_tx).await?;

            Ok((checkin, guest))
        })
    }

    /// Return a check-in and its guest, then refresh all running totals.
    ///
    /// Reads are not free here: fetching a stay triggers the same
    /// whole-collection recompute pass as creating one. The snapshot is
    /// taken before the pass runs.
    pub async fn checkin(&self, checkin_id: i64) -> ResultEngine<(Checkin, Guest)> {
        with_tx!(self, |db_tx| {
            let model = checkins::Entity::find_by_id(checkin_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("checkin not exists".to_string()))?;

            let guest_model = guests::Entity::find_by_id(model.guest_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("guest not exists".to_string()))?;

            let checkin = Checkin::from(model);
            let guest = Guest::from(guest_model);

            recompute_expenses_tx(&db_tx).await?;

            Ok((checkin, guest))
        })
    }

    /// Recomputes every guest's `total_spent_minor` from the stored
    /// check-in collection.
    pub async fn recompute_expenses(&self) -> ResultEngine<()> {
        with_tx!(self, |db_tx| { recompute_expenses_tx(&db_tx).await })
    }
}

/// Walks all stays in id order and overwrites each owning guest's total
/// with that stay's charge. One stay per guest, so the overwrite is the
/// whole story; a later pass over unchanged stays writes the same values.
async fn recompute_expenses_tx(db_tx: &DatabaseTransaction) -> ResultEngine<()> {
    let stays = checkins::Entity::find()
        .order_by_asc(checkins::Column::Id)
        .all(db_tx)
        .await?;

    for stay in stays {
        // An open stay has no exit to price yet.
        let Some(exit_time) = stay.exit_time else {
            continue;
        };

        let total = stay_charge_minor(
            &STANDARD_RATES,
            stay.entry_time,
            exit_time,
            stay.vehicle_surcharge,
        );

        let guest = guests::Entity::find_by_id(stay.guest_id)
            .one(db_tx)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("guest not exists".to_string()))?;

        let mut guest: guests::ActiveModel = guest.into();
        guest.total_spent_minor = ActiveValue::Set(total);
        guest.update(db_tx).await?;
    }

    Ok(())
}
