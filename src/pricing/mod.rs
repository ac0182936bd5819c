pub mod resolver;
pub mod table;

pub use resolver::{resolve_fare, select_bucket, FareQuote, Unavailable};
pub use table::{DistanceBucket, PricingTable, RateCard};
