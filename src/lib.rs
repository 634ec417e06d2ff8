pub mod authentication;
pub mod configuration;
pub mod delivery;
pub mod domain;
pub mod extractor;
pub mod relay_client;
pub mod routes;
pub mod startup;
pub mod telemetry;
