//! Domain layer: value objects, the fundable entities, the allocation engine and the ports
//! through which the application reaches storage.

pub mod allocation;
pub mod donation;
pub mod funding;
pub mod money;
pub mod ports;
pub mod project;
