use sea_orm_migration::prelude::*;

const INDEX_NAME: &str = "ux_tbl_emp_emp_name";

#[derive(DeriveIden)]
enum Emp {
    #[sea_orm(iden = "tbl_emp")]
    Table,
    EmpName,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name(INDEX_NAME)
                    .table(Emp::Table)
                    .col(Emp::EmpName)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name(INDEX_NAME).table(Emp::Table).to_owned())
            .await
    }
}
