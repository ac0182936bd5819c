pub mod vehicle;
pub mod vehicle_pricing;
