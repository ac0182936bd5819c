pub mod fares;
pub mod geocode;
pub mod vehicles;
