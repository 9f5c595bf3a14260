use sea_orm::{
    ActiveValue, JoinType, QueryFilter, QueryOrder, QuerySelect, TransactionTrait, prelude::*,
    sea_query::SimpleExpr,
};

use crate::{EngineError, Guest, ResultEngine, checkins, guests};

use super::{Engine, validate_guest_name, validate_required_text, with_tx};

impl Engine {
    /// Registers a new guest with a zero running total.
    pub async fn new_guest(&self, name: &str, document: &str, phone: &str) -> ResultEngine<i64> {
        let name = validate_guest_name(name)?;
        let document = validate_required_text(document, "document")?;
        let phone = validate_required_text(phone, "phone")?;

        with_tx!(self, |db_tx| {
            let model = guests::ActiveModel {
                name: ActiveValue::Set(name),
                document: ActiveValue::Set(document),
                phone: ActiveValue::Set(phone),
                total_spent_minor: ActiveValue::Set(0),
                ..Default::default()
            }
            .insert(&db_tx)
            .await?;

            Ok(model.id)
        })
    }

    /// Return a guest snapshot from DB.
    pub async fn guest(&self, guest_id: i64) -> ResultEngine<Guest> {
        let model = guests::Entity::find_by_id(guest_id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("guest not exists".to_string()))?;

        Ok(Guest::from(model))
    }

    /// Return every registered guest.
    pub async fn guests(&self) -> ResultEngine<Vec<Guest>> {
        self.guests_where(None, || "no guests registered".to_string())
            .await
    }

    /// Exact-match lookup by name. Case sensitive; empty results are
    /// reported as not found.
    pub async fn guests_by_name(&self, name: &str) -> ResultEngine<Vec<Guest>> {
        self.guests_where(Some(guests::Column::Name.eq(name)), || {
            format!("no guests registered with the name {name}")
        })
        .await
    }

    /// Exact-match lookup by document.
    pub async fn guests_by_document(&self, document: &str) -> ResultEngine<Vec<Guest>> {
        self.guests_where(Some(guests::Column::Document.eq(document)), || {
            format!("no guests registered with the document {document}")
        })
        .await
    }

    /// Exact-match lookup by phone.
    pub async fn guests_by_phone(&self, phone: &str) -> ResultEngine<Vec<Guest>> {
        self.guests_where(Some(guests::Column::Phone.eq(phone)), || {
            format!("no guests registered with the phone {phone}")
        })
        .await
    }

    /// Guests whose stay has no recorded exit yet.
    pub async fn guests_checked_in(&self) -> ResultEngine<Vec<Guest>> {
        self.guests_with_exit(checkins::Column::ExitTime.is_null(), || {
            "no guests currently in the hotel".to_string()
        })
        .await
    }

    /// Guests whose stay has a recorded exit.
    pub async fn guests_checked_out(&self) -> ResultEngine<Vec<Guest>> {
        self.guests_with_exit(checkins::Column::ExitTime.is_not_null(), || {
            "no guests with a recorded checkout".to_string()
        })
        .await
    }

    /// Updates a guest's identity fields.
    ///
    /// The running total is not touched here: it belongs to the expense
    /// recompute pass. A payload id that contradicts the addressed id is
    /// rejected as forbidden, distinct from not-found.
    pub async fn update_guest(
        &self,
        guest_id: i64,
        payload_id: Option<i64>,
        name: &str,
        document: &str,
        phone: &str,
    ) -> ResultEngine<Guest> {
        let name = validate_guest_name(name)?;
        let document = validate_required_text(document, "document")?;
        let phone = validate_required_text(phone, "phone")?;

        with_tx!(self, |db_tx| {
            let model = guests::Entity::find_by_id(guest_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("guest not exists".to_string()))?;

            if let Some(id) = payload_id {
                if id != model.id {
                    return Err(EngineError::Forbidden(format!("guest id: {id}")));
                }
            }

            let mut active: guests::ActiveModel = model.into();
            active.name = ActiveValue::Set(name);
            active.document = ActiveValue::Set(document);
            active.phone = ActiveValue::Set(phone);
            let model = active.update(&db_tx).await?;

            Ok(Guest::from(model))
        })
    }

    /// Removes a guest.
    ///
    /// Check-ins are never cascade-deleted; the FK turns deleting a guest
    /// with a recorded check-in into a database error.
    pub async fn delete_guest(&self, guest_id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = guests::Entity::find_by_id(guest_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("guest not exists".to_string()))?;

            model.delete(&db_tx).await?;
            Ok(())
        })
    }

    async fn guests_where(
        &self,
        condition: Option<SimpleExpr>,
        not_found: impl FnOnce() -> String,
    ) -> ResultEngine<Vec<Guest>> {
        let mut query = guests::Entity::find().order_by_asc(guests::Column::Id);
        if let Some(condition) = condition {
            query = query.filter(condition);
        }
        let models = query.all(&self.database).await?;

        if models.is_empty() {
            return Err(EngineError::KeyNotFound(not_found()));
        }
        Ok(models.into_iter().map(Guest::from).collect())
    }

    async fn guests_with_exit(
        &self,
        condition: SimpleExpr,
        not_found: impl FnOnce() -> String,
    ) -> ResultEngine<Vec<Guest>> {
        let models = guests::Entity::find()
            .join(JoinType::InnerJoin, guests::Relation::Checkins.def())
            .filter(condition)
            .order_by_asc(guests::Column::Id)
            .all(&self.database)
            .await?;

        if models.is_empty() {
            return Err(EngineError::KeyNotFound(not_found()));
        }
        Ok(models.into_iter().map(Guest::from).collect())
    }
}
