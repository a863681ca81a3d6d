pub mod memory;
pub mod processor;
pub mod store;
