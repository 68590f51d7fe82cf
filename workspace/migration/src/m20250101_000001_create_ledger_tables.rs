use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create classifications table
        manager
            .create_table(
                Table::create()
                    .table(Classifications::Table)
                    .if_not_exists()
                    .col(pk_auto(Classifications::Id))
                    .col(string_len(Classifications::Name, 100).unique_key())
                    .col(string_len(Classifications::Kind, 30))
                    .col(string_len(Classifications::DefaultCategory, 20).default("OPERATIONAL"))
                    .col(boolean(Classifications::Active).default(true))
                    .col(date_time(Classifications::CreatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        // Create entries table
        manager
            .create_table(
                Table::create()
                    .table(Entries::Table)
                    .if_not_exists()
                    .col(pk_auto(Entries::Id))
                    .col(date(Entries::Date))
                    .col(integer(Entries::Day))
                    .col(integer(Entries::Month))
                    .col(integer(Entries::Year))
                    .col(string_len(Entries::Kind, 20))
                    .col(string_len(Entries::Category, 20))
                    .col(integer_null(Entries::ClassificationId))
                    .col(string_len_null(Entries::Item, 200))
                    .col(decimal(Entries::Amount).decimal_len(16, 4))
                    .col(string_len(Entries::SettlementState, 20).default("SETTLED"))
                    .col(date_time(Entries::CreatedAt).default(Expr::current_timestamp()))
                    .col(date_time(Entries::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_entry_classification")
                            .from(Entries::Table, Entries::ClassificationId)
                            .to(Classifications::Table, Classifications::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_entries_date")
                    .table(Entries::Table)
                    .col(Entries::Date)
                    .to_owned(),
            )
            .await?;

        // Create settings table
        manager
            .create_table(
                Table::create()
                    .table(Settings::Table)
                    .if_not_exists()
                    .col(pk_auto(Settings::Id))
                    .col(string_len(Settings::Key, 50).unique_key())
                    .col(string_len(Settings::Value, 200))
                    .col(string_len_null(Settings::Description, 500))
                    .col(date_time(Settings::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order to avoid foreign key constraints
        manager
            .drop_table(Table::drop().table(Settings::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Entries::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Classifications::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Classifications {
    Table,
    Id,
    Name,
    Kind,
    DefaultCategory,
    Active,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Entries {
    Table,
    Id,
    Date,
    Day,
    Month,
    Year,
    Kind,
    Category,
    ClassificationId,
    Item,
    Amount,
    SettlementState,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Settings {
    Table,
    Id,
    Key,
    Value,
    Description,
    UpdatedAt,
}
