//! Network-facing providers.

pub mod exchange_rate;

pub use exchange_rate::ExchangeRateHostProvider;
