use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Staff::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Staff::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Staff::Name).string().not_null())
                    .col(ColumnDef::new(Staff::Email).string().not_null())
                    .col(ColumnDef::new(Staff::Phone).string())
                    .col(ColumnDef::new(Staff::Position).string().not_null())
                    .col(ColumnDef::new(Staff::Salary).big_integer().not_null())
                    .col(ColumnDef::new(Staff::TeamId).uuid())
                    .col(
                        ColumnDef::new(Staff::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StaffPayments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StaffPayments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StaffPayments::StaffId).uuid().not_null())
                    .col(
                        ColumnDef::new(StaffPayments::Amount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StaffPayments::PaymentDate).date().not_null())
                    .col(
                        ColumnDef::new(StaffPayments::ReceiptNumber)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StaffPayments::Notes).string())
                    .col(
                        ColumnDef::new(StaffPayments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StaffPayments::Table, StaffPayments::StaffId)
                            .to(Staff::Table, Staff::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SalaryPlayers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SalaryPlayers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SalaryPlayers::Name).string().not_null())
                    .col(ColumnDef::new(SalaryPlayers::TeamId).uuid())
                    .col(
                        ColumnDef::new(SalaryPlayers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PlayerSalaries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PlayerSalaries::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PlayerSalaries::PlayerId).uuid().not_null())
                    .col(
                        ColumnDef::new(PlayerSalaries::Salary)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlayerSalaries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PlayerSalaries::Table, PlayerSalaries::PlayerId)
                            .to(SalaryPlayers::Table, SalaryPlayers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PlayerSalaryPayments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PlayerSalaryPayments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PlayerSalaryPayments::PlayerId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlayerSalaryPayments::Amount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlayerSalaryPayments::PaymentDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlayerSalaryPayments::ReceiptNumber)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PlayerSalaryPayments::Notes).string())
                    .col(
                        ColumnDef::new(PlayerSalaryPayments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PlayerSalaryPayments::Table, PlayerSalaryPayments::PlayerId)
                            .to(SalaryPlayers::Table, SalaryPlayers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PlayerSalaryPayments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PlayerSalaries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SalaryPlayers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StaffPayments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Staff::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Staff {
    Table,
    Id,
    Name,
    Email,
    Phone,
    Position,
    Salary,
    TeamId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum StaffPayments {
    Table,
    Id,
    StaffId,
    Amount,
    PaymentDate,
    ReceiptNumber,
    Notes,
    CreatedAt,
}

#[derive(DeriveIden)]
enum SalaryPlayers {
    Table,
    Id,
    Name,
    TeamId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum PlayerSalaries {
    Table,
    Id,
    PlayerId,
    Salary,
    CreatedAt,
}

#[derive(DeriveIden)]
enum PlayerSalaryPayments {
    Table,
    Id,
    PlayerId,
    Amount,
    PaymentDate,
    ReceiptNumber,
    Notes,
    CreatedAt,
}
