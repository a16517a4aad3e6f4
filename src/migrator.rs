use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users_table::Migration),
            Box::new(m20240101_000002_create_accounting_tables::Migration),
            Box::new(m20240101_000003_create_warehouses_table::Migration),
            Box::new(m20240101_000004_create_items_table::Migration),
            Box::new(m20240101_000005_create_item_groups_tables::Migration),
            Box::new(m20240101_000006_create_transfer_orders_table::Migration),
            Box::new(m20240101_000007_create_transactions_table::Migration),
        ]
    }
}

mod m20240101_000001_create_users_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_users_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Users::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Users::FirstName).string().not_null())
                        .col(ColumnDef::new(Users::LastName).string().not_null().default(""))
                        .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                        .col(ColumnDef::new(Users::Password).string().not_null())
                        .col(ColumnDef::new(Users::Phone).string().not_null().default(""))
                        .col(
                            ColumnDef::new(Users::Enabled)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Users::Role)
                                .string()
                                .not_null()
                                .default("user"),
                        )
                        .col(ColumnDef::new(Users::CompanyId).integer().null())
                        .col(
                            ColumnDef::new(Users::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Users::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Users::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Users {
        Table,
        Id,
        FirstName,
        LastName,
        Email,
        Password,
        Phone,
        Enabled,
        Role,
        CompanyId,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000002_create_accounting_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_accounting_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Companies::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Companies::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Companies::Name).string().not_null())
                        .col(ColumnDef::new(Companies::Email).string().not_null().default(""))
                        .col(ColumnDef::new(Companies::Phone).string().not_null().default(""))
                        .col(ColumnDef::new(Companies::Address).string().not_null().default(""))
                        .col(ColumnDef::new(Companies::City).string().not_null().default(""))
                        .col(ColumnDef::new(Companies::Country).string().not_null().default(""))
                        .col(ColumnDef::new(Companies::PostalCode).string().not_null().default(""))
                        .col(ColumnDef::new(Companies::TaxNumber).string().not_null().default(""))
                        .col(ColumnDef::new(Companies::Website).string().not_null().default(""))
                        .col(ColumnDef::new(Companies::Logo).string().not_null().default(""))
                        .col(
                            ColumnDef::new(Companies::Enabled)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Companies::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Companies::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Accounts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Accounts::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Accounts::Name).string().not_null())
                        .col(ColumnDef::new(Accounts::Number).string().not_null().default(""))
                        .col(ColumnDef::new(Accounts::Type).string_len(32).not_null())
                        .col(
                            ColumnDef::new(Accounts::Currency)
                                .string_len(3)
                                .not_null()
                                .default("USD"),
                        )
                        .col(
                            ColumnDef::new(Accounts::Balance)
                                .decimal_len(20, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Accounts::Enabled)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(ColumnDef::new(Accounts::CompanyId).integer().null())
                        .col(
                            ColumnDef::new(Accounts::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Accounts::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Categories::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Categories::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Categories::Name).string().not_null())
                        .col(ColumnDef::new(Categories::Type).string_len(32).not_null())
                        .col(ColumnDef::new(Categories::Color).string().not_null().default(""))
                        .col(
                            ColumnDef::new(Categories::Enabled)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(ColumnDef::new(Categories::CompanyId).integer().null())
                        .col(
                            ColumnDef::new(Categories::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Categories::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Categories::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Accounts::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Companies::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Companies {
        Table,
        Id,
        Name,
        Email,
        Phone,
        Address,
        City,
        Country,
        PostalCode,
        TaxNumber,
        Website,
        Logo,
        Enabled,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Accounts {
        Table,
        Id,
        Name,
        Number,
        Type,
        Currency,
        Balance,
        Enabled,
        CompanyId,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Categories {
        Table,
        Id,
        Name,
        Type,
        Color,
        Enabled,
        CompanyId,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000003_create_warehouses_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_warehouses_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Warehouses::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Warehouses::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Warehouses::Code).string().not_null())
                        .col(ColumnDef::new(Warehouses::Name).string().not_null())
                        .col(ColumnDef::new(Warehouses::Address).string().not_null().default(""))
                        .col(ColumnDef::new(Warehouses::City).string().not_null().default(""))
                        .col(ColumnDef::new(Warehouses::Province).string().not_null().default(""))
                        .col(
                            ColumnDef::new(Warehouses::Capacity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Warehouses::Status)
                                .string()
                                .not_null()
                                .default("active"),
                        )
                        .col(
                            ColumnDef::new(Warehouses::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Warehouses::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Warehouses::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Warehouses {
        Table,
        Id,
        Code,
        Name,
        Address,
        City,
        Province,
        Capacity,
        Status,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000004_create_items_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_items_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Items::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Items::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Items::Code).string().not_null())
                        .col(ColumnDef::new(Items::Name).string().not_null())
                        .col(ColumnDef::new(Items::Brand).string().not_null().default(""))
                        .col(ColumnDef::new(Items::Category).string().not_null().default(""))
                        .col(ColumnDef::new(Items::Unit).string().not_null().default(""))
                        .col(
                            ColumnDef::new(Items::Quantity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Items::Price)
                                .decimal_len(20, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Items::Status)
                                .string()
                                .not_null()
                                .default("active"),
                        )
                        .col(ColumnDef::new(Items::Supplier).string().not_null().default(""))
                        .col(ColumnDef::new(Items::Location).string().not_null().default(""))
                        .col(ColumnDef::new(Items::EntryDate).date().null())
                        .col(ColumnDef::new(Items::Description).text().not_null().default(""))
                        .col(ColumnDef::new(Items::WarehouseId).integer().null())
                        .col(
                            ColumnDef::new(Items::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Items::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_items_warehouse_id")
                        .table(Items::Table)
                        .col(Items::WarehouseId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Items::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Items {
        Table,
        Id,
        Code,
        Name,
        Brand,
        Category,
        Unit,
        Quantity,
        Price,
        Status,
        Supplier,
        Location,
        EntryDate,
        Description,
        WarehouseId,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000005_create_item_groups_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000005_create_item_groups_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ItemGroups::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ItemGroups::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(ItemGroups::Name).string().not_null())
                        .col(
                            ColumnDef::new(ItemGroups::Description)
                                .string()
                                .not_null()
                                .default(""),
                        )
                        .col(ColumnDef::new(ItemGroups::Category).string().not_null().default(""))
                        .col(
                            ColumnDef::new(ItemGroups::Status)
                                .string()
                                .not_null()
                                .default("active"),
                        )
                        .col(
                            ColumnDef::new(ItemGroups::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ItemGroups::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(GroupItems::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(GroupItems::GroupId).integer().not_null())
                        .col(ColumnDef::new(GroupItems::ItemId).integer().not_null())
                        .col(
                            ColumnDef::new(GroupItems::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(GroupItems::GroupId)
                                .col(GroupItems::ItemId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_group_items_group")
                                .from(GroupItems::Table, GroupItems::GroupId)
                                .to(ItemGroups::Table, ItemGroups::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_group_items_item")
                                .from(GroupItems::Table, GroupItems::ItemId)
                                .to(Items::Table, Items::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(GroupItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ItemGroups::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum ItemGroups {
        Table,
        Id,
        Name,
        Description,
        Category,
        Status,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum GroupItems {
        Table,
        GroupId,
        ItemId,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum Items {
        Table,
        Id,
    }
}

mod m20240101_000006_create_transfer_orders_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000006_create_transfer_orders_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(TransferOrders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(TransferOrders::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(TransferOrders::Code).string().not_null())
                        .col(ColumnDef::new(TransferOrders::ItemId).integer().not_null())
                        .col(
                            ColumnDef::new(TransferOrders::FromWarehouseId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TransferOrders::ToWarehouseId)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(TransferOrders::Quantity).integer().not_null())
                        .col(
                            ColumnDef::new(TransferOrders::Status)
                                .string()
                                .not_null()
                                .default("pending"),
                        )
                        .col(ColumnDef::new(TransferOrders::TransferDate).date().null())
                        .col(
                            ColumnDef::new(TransferOrders::Notes)
                                .text()
                                .not_null()
                                .default(""),
                        )
                        .col(
                            ColumnDef::new(TransferOrders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TransferOrders::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(TransferOrders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum TransferOrders {
        Table,
        Id,
        Code,
        ItemId,
        FromWarehouseId,
        ToWarehouseId,
        Quantity,
        Status,
        TransferDate,
        Notes,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000007_create_transactions_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000007_create_transactions_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // History rows reference items, warehouses and users by plain id
            // so they survive deletion of what they describe.
            manager
                .create_table(
                    Table::create()
                        .table(Transactions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Transactions::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Transactions::Number).string().not_null())
                        .col(ColumnDef::new(Transactions::Type).string_len(32).not_null())
                        .col(ColumnDef::new(Transactions::Description).text().not_null())
                        .col(
                            ColumnDef::new(Transactions::Amount)
                                .decimal_len(20, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Transactions::Currency).string_len(3).not_null())
                        .col(
                            ColumnDef::new(Transactions::Date)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Transactions::Reference).string().not_null())
                        .col(
                            ColumnDef::new(Transactions::ItemId)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Transactions::WarehouseId)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Transactions::UserId)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Transactions::Quantity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Transactions::Status)
                                .string()
                                .not_null()
                                .default("completed"),
                        )
                        .col(ColumnDef::new(Transactions::CompanyId).integer().null())
                        .col(ColumnDef::new(Transactions::AccountId).integer().null())
                        .col(ColumnDef::new(Transactions::CategoryId).integer().null())
                        .col(
                            ColumnDef::new(Transactions::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Transactions::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_transactions_item_id")
                        .table(Transactions::Table)
                        .col(Transactions::ItemId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_transactions_warehouse_id")
                        .table(Transactions::Table)
                        .col(Transactions::WarehouseId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_transactions_created_at")
                        .table(Transactions::Table)
                        .col(Transactions::CreatedAt)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Transactions::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Transactions {
        Table,
        Id,
        Number,
        Type,
        Description,
        Amount,
        Currency,
        Date,
        Reference,
        ItemId,
        WarehouseId,
        UserId,
        Quantity,
        Status,
        CompanyId,
        AccountId,
        CategoryId,
        CreatedAt,
        UpdatedAt,
    }
}
