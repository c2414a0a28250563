//! Migration: Create loan_applications table.
//!
//! `user_id` and `verified_by` are plain references without foreign keys so
//! deleting an account leaves its applications in place.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LoanApplications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LoanApplications::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LoanApplications::UserId).uuid().not_null())
                    .col(ColumnDef::new(LoanApplications::Amount).double().not_null())
                    .col(ColumnDef::new(LoanApplications::Purpose).text().not_null())
                    .col(
                        ColumnDef::new(LoanApplications::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(LoanApplications::VerifiedBy).uuid().null())
                    .col(
                        ColumnDef::new(LoanApplications::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LoanApplications::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .check(Expr::col(LoanApplications::Amount).gt(0))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_loan_applications_user_id")
                    .table(LoanApplications::Table)
                    .col(LoanApplications::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LoanApplications::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum LoanApplications {
    Table,
    Id,
    UserId,
    Amount,
    Purpose,
    Status,
    VerifiedBy,
    CreatedAt,
    UpdatedAt,
}
