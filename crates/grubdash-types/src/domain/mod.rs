pub mod dish;
pub mod envelope;
pub mod order;

mod fields;
