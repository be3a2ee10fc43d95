//! Database migrations for the pre-install registry

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_submissions::Migration),
            Box::new(m20250301_000002_index_submission_filters::Migration),
        ]
    }
}

mod m20250301_000001_create_submissions {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000001_create_submissions"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Submissions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Submissions::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Submissions::IntersectionName).text().not_null())
                        .col(ColumnDef::new(Submissions::City).text().not_null())
                        .col(ColumnDef::new(Submissions::State).text().not_null())
                        .col(ColumnDef::new(Submissions::EndUser).text().not_null())
                        .col(ColumnDef::new(Submissions::Distributor).text().not_null())
                        .col(ColumnDef::new(Submissions::CabinetType).text().not_null())
                        .col(ColumnDef::new(Submissions::TlsConnection).text().not_null())
                        .col(ColumnDef::new(Submissions::DetectionIo).text())
                        .col(ColumnDef::new(Submissions::Phasing).text())
                        .col(ColumnDef::new(Submissions::TimingPlans).text())
                        .col(
                            ColumnDef::new(Submissions::SubmittedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Submissions::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Submissions {
        Table,
        Id,
        IntersectionName,
        City,
        State,
        EndUser,
        Distributor,
        CabinetType,
        TlsConnection,
        DetectionIo,
        Phasing,
        TimingPlans,
        SubmittedAt,
    }
}

mod m20250301_000002_index_submission_filters {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000002_index_submission_filters"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            for (name, column) in [
                ("idx_submissions_city", Submissions::City),
                ("idx_submissions_state", Submissions::State),
                ("idx_submissions_cabinet_type", Submissions::CabinetType),
                ("idx_submissions_submitted_at", Submissions::SubmittedAt),
            ] {
                manager
                    .create_index(
                        Index::create()
                            .name(name)
                            .table(Submissions::Table)
                            .col(column)
                            .if_not_exists()
                            .to_owned(),
                    )
                    .await?;
            }

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            for name in [
                "idx_submissions_city",
                "idx_submissions_state",
                "idx_submissions_cabinet_type",
                "idx_submissions_submitted_at",
            ] {
                manager
                    .drop_index(Index::drop().name(name).table(Submissions::Table).to_owned())
                    .await?;
            }

            Ok(())
        }
    }

    #[derive(DeriveIden, Clone, Copy)]
    enum Submissions {
        Table,
        City,
        State,
        CabinetType,
        SubmittedAt,
    }
}
