pub mod rmp_client;

pub use rmp_client::RmpClient;
