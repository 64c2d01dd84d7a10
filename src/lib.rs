// Library for tests to access modules

pub mod aggregator;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod provider;
pub mod resources;
pub mod sysinfo_repo;
pub mod units;
pub mod worker;
