pub mod aggregator_service;
pub mod chart_service;
pub mod projector_service;
