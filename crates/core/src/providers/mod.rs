pub mod registry;
pub mod traits;

// API provider implementations
pub mod binance_p2p;
pub mod dolarvzla;
