// Domain layer - Coordinates, forecasts and alert rules
pub mod alert;
pub mod forecast;
pub mod location;
