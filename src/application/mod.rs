// Application layer - Shared stores and the actors that drive them
pub mod cadence;
pub mod evaluator;
pub mod fetcher;
pub mod forecast_provider;
pub mod location_editor;
pub mod location_store;
pub mod snapshot_store;
