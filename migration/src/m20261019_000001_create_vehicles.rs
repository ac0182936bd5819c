use sea_orm_migration::{prelude::*, schema::*, sea_orm::sea_query::extension::postgres::Type};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(VehicleCategory::Enum)
                    .values([
                        VehicleCategory::Auto,
                        VehicleCategory::Car,
                        VehicleCategory::Bus,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Vehicle::Table)
                    .if_not_exists()
                    .col(
                        uuid(Vehicle::Id)
                            .primary_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(string_len(Vehicle::Name, 100).not_null())
                    .col(
                        ColumnDef::new(Vehicle::Category)
                            .custom(VehicleCategory::Enum)
                            .not_null(),
                    )
                    .col(string_len(Vehicle::VehicleType, 50).not_null())
                    .col(integer(Vehicle::Seats).not_null())
                    .col(boolean(Vehicle::IsAvailable).not_null().default(true))
                    .col(
                        timestamp_with_time_zone(Vehicle::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Seed the fleet
        let insert = Query::insert()
            .into_table(Vehicle::Table)
            .columns([
                Vehicle::Name,
                Vehicle::Category,
                Vehicle::VehicleType,
                Vehicle::Seats,
            ])
            .values_panic([
                "Auto Rickshaw".into(),
                category("auto"),
                "three-wheeler".into(),
                3.into(),
            ])
            .values_panic([
                "Swift Dzire".into(),
                category("car"),
                "sedan".into(),
                4.into(),
            ])
            .values_panic([
                "Toyota Innova".into(),
                category("car"),
                "suv".into(),
                7.into(),
            ])
            .values_panic([
                "Tempo Traveller".into(),
                category("bus"),
                "mini-bus".into(),
                17.into(),
            ])
            .to_owned();

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Vehicle::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(VehicleCategory::Enum).to_owned())
            .await
    }
}

pub(crate) fn category(value: &str) -> SimpleExpr {
    Expr::val(value).as_enum(VehicleCategory::Enum)
}

#[derive(DeriveIden)]
pub enum Vehicle {
    Table,
    Id,
    Name,
    Category,
    VehicleType,
    Seats,
    IsAvailable,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum VehicleCategory {
    #[sea_orm(iden = "vehicle_category")]
    Enum,
    #[sea_orm(iden = "auto")]
    Auto,
    #[sea_orm(iden = "car")]
    Car,
    #[sea_orm(iden = "bus")]
    Bus,
}
