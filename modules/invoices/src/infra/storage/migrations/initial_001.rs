use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Invoices::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Invoices::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Invoices::Number)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Invoices::Date).date().not_null())
                    .col(ColumnDef::new(Invoices::ClientName).string().not_null())
                    .col(ColumnDef::new(Invoices::ClientNif).string())
                    .col(ColumnDef::new(Invoices::ClientAddress).string())
                    .col(ColumnDef::new(Invoices::Items).json().not_null())
                    .col(ColumnDef::new(Invoices::Subtotal).big_integer().not_null())
                    .col(ColumnDef::new(Invoices::TaxRate).big_integer().not_null())
                    .col(
                        ColumnDef::new(Invoices::TaxAmount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Invoices::Total).big_integer().not_null())
                    .col(ColumnDef::new(Invoices::Notes).string())
                    .col(
                        ColumnDef::new(Invoices::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_invoices_date")
                    .table(Invoices::Table)
                    .col(Invoices::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Invoices::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Invoices {
    Table,
    Id,
    Number,
    Date,
    ClientName,
    ClientNif,
    ClientAddress,
    Items,
    Subtotal,
    TaxRate,
    TaxAmount,
    Total,
    Notes,
    CreatedAt,
}
