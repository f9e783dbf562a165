pub mod address;
pub mod chain;
pub mod config;
pub mod error;
pub mod interest;
pub mod lending;
pub mod models;
pub mod payment;
pub mod payment_request;
pub mod reads;
pub mod routes;
pub mod session;
pub mod tx;
pub mod units;
pub mod validation;
pub mod wallet;
