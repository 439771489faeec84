use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Dept {
    #[sea_orm(iden = "tbl_dept")]
    Table,
    DeptId,
    DeptName,
}

#[derive(DeriveIden)]
enum Emp {
    #[sea_orm(iden = "tbl_emp")]
    Table,
    EmpId,
    EmpName,
    Gender,
    Email,
    #[sea_orm(iden = "d_id")]
    DId,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Dept::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Dept::DeptId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Dept::DeptName).string_len(255).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Emp::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Emp::EmpId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Emp::EmpName).string_len(255).not_null())
                    .col(ColumnDef::new(Emp::Gender).string_len(1).not_null())
                    .col(ColumnDef::new(Emp::Email).string_len(255).not_null())
                    .col(ColumnDef::new(Emp::DId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_emp_dept")
                            .from(Emp::Table, Emp::DId)
                            .to(Dept::Table, Dept::DeptId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tbl_emp_d_id")
                    .table(Emp::Table)
                    .col(Emp::DId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Emp::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Dept::Table).if_exists().to_owned())
            .await
    }
}
