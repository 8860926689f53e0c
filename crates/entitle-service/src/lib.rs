#![doc = include_str!("../README.md")]

pub mod date;
pub mod entitlement;
pub mod error;
pub mod facade;

pub use entitlement::{
    EntitlementBackend, OptionMap, ProxyConfig, RemovalOutcome, SerialRemoval,
};
pub use error::{ServiceError, ServiceResult};
pub use facade::EntitlementFacade;
