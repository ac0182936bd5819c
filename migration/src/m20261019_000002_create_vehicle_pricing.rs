use sea_orm_migration::{prelude::*, schema::*, sea_orm::sea_query::extension::postgres::Type};

use super::m20261019_000001_create_vehicles::{category, VehicleCategory};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(TripType::Enum)
                    .values([TripType::OneWay, TripType::Return])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(VehiclePricing::Table)
                    .if_not_exists()
                    .col(pk_auto(VehiclePricing::Id))
                    .col(
                        ColumnDef::new(VehiclePricing::Category)
                            .custom(VehicleCategory::Enum)
                            .not_null(),
                    )
                    .col(string_len(VehiclePricing::VehicleType, 50).not_null())
                    .col(
                        ColumnDef::new(VehiclePricing::TripType)
                            .custom(TripType::Enum)
                            .not_null(),
                    )
                    .col(double_null(VehiclePricing::RatePerKm))
                    .col(double_null(VehiclePricing::Rate50km))
                    .col(double_null(VehiclePricing::Rate100km))
                    .col(double_null(VehiclePricing::Rate150km))
                    .col(double_null(VehiclePricing::Rate200km))
                    .col(
                        timestamp_with_time_zone(VehiclePricing::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_vehicle_pricing_lookup")
                    .table(VehiclePricing::Table)
                    .col(VehiclePricing::Category)
                    .col(VehiclePricing::VehicleType)
                    .col(VehiclePricing::TripType)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Seed rates. Auto rickshaws charge a flat per-km rate, cars a tiered
        // per-km rate, buses a flat base price per distance tier.
        let insert = Query::insert()
            .into_table(VehiclePricing::Table)
            .columns([
                VehiclePricing::Category,
                VehiclePricing::VehicleType,
                VehiclePricing::TripType,
                VehiclePricing::RatePerKm,
                VehiclePricing::Rate50km,
                VehiclePricing::Rate100km,
                VehiclePricing::Rate150km,
                VehiclePricing::Rate200km,
            ])
            .values_panic(row("auto", "three-wheeler", "one-way", Some(15.0), [None; 4]))
            .values_panic(row("auto", "three-wheeler", "return", Some(14.0), [None; 4]))
            .values_panic(row(
                "car",
                "sedan",
                "one-way",
                None,
                [Some(14.0), Some(13.0), Some(12.0), Some(11.0)],
            ))
            .values_panic(row(
                "car",
                "sedan",
                "return",
                None,
                [Some(12.0), Some(11.0), Some(10.0), Some(9.0)],
            ))
            .values_panic(row(
                "car",
                "suv",
                "one-way",
                None,
                [Some(18.0), Some(17.0), Some(16.0), Some(15.0)],
            ))
            .values_panic(row(
                "car",
                "suv",
                "return",
                None,
                [Some(16.0), Some(15.0), Some(14.0), Some(13.0)],
            ))
            .values_panic(row(
                "bus",
                "mini-bus",
                "one-way",
                None,
                [Some(3500.0), Some(6000.0), Some(8500.0), Some(11000.0)],
            ))
            .values_panic(row(
                "bus",
                "mini-bus",
                "return",
                None,
                [Some(6000.0), Some(10500.0), Some(15000.0), Some(19500.0)],
            ))
            .to_owned();

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VehiclePricing::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(TripType::Enum).to_owned())
            .await
    }
}

fn row(
    vehicle_category: &str,
    vehicle_type: &str,
    trip_type: &str,
    rate_per_km: Option<f64>,
    tiers: [Option<f64>; 4],
) -> Vec<SimpleExpr> {
    let [rate_50km, rate_100km, rate_150km, rate_200km] = tiers;
    vec![
        category(vehicle_category),
        vehicle_type.into(),
        Expr::val(trip_type).as_enum(TripType::Enum),
        rate_per_km.into(),
        rate_50km.into(),
        rate_100km.into(),
        rate_150km.into(),
        rate_200km.into(),
    ]
}

#[derive(DeriveIden)]
pub enum VehiclePricing {
    Table,
    Id,
    Category,
    VehicleType,
    TripType,
    RatePerKm,
    #[sea_orm(iden = "rate_50km")]
    Rate50km,
    #[sea_orm(iden = "rate_100km")]
    Rate100km,
    #[sea_orm(iden = "rate_150km")]
    Rate150km,
    #[sea_orm(iden = "rate_200km")]
    Rate200km,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum TripType {
    #[sea_orm(iden = "trip_type")]
    Enum,
    #[sea_orm(iden = "one-way")]
    OneWay,
    #[sea_orm(iden = "return")]
    Return,
}
