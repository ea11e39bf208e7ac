// Library for tests to access modules

pub mod aggregate;
pub mod config;
pub mod models;
pub mod registry;
pub mod routes;
pub mod timefmt;
pub mod upstream;
