pub mod adapters;
pub mod capability;
pub mod registry;
