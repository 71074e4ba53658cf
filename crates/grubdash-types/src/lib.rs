//! grubdash-types: domain records, validation rules and storage ports

pub mod domain;
pub mod ports;
