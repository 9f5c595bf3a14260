//! Initial schema migration - creates all tables from scratch.
//!
//! The complete schema for Locanda:
//!
//! - `guests`: registered guests with their running stay totals
//! - `checkins`: one stay per guest, entry/exit timestamps and the
//!   vehicle-surcharge flag

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Guests {
    Table,
    Id,
    Name,
    Document,
    Phone,
    TotalSpentMinor,
}

#[derive(Iden)]
enum Checkins {
    Table,
    Id,
    GuestId,
    EntryTime,
    ExitTime,
    VehicleSurcharge,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Guests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Guests::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Guests::Name).string().not_null())
                    .col(ColumnDef::new(Guests::Document).string().not_null())
                    .col(ColumnDef::new(Guests::Phone).string().not_null())
                    .col(
                        ColumnDef::new(Guests::TotalSpentMinor)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Checkins::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Checkins::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    // One stay per guest, schema-enforced.
                    .col(
                        ColumnDef::new(Checkins::GuestId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Checkins::EntryTime).date_time().not_null())
                    // Nullable: an open stay has no recorded checkout.
                    .col(ColumnDef::new(Checkins::ExitTime).date_time())
                    .col(
                        ColumnDef::new(Checkins::VehicleSurcharge)
                            .boolean()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-checkins-guest_id")
                            .from(Checkins::Table, Checkins::GuestId)
                            .to(Guests::Table, Guests::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Checkins::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Guests::Table).to_owned())
            .await?;

        Ok(())
    }
}
