//! Inbound adapters translating external requests into domain port calls.
//!
//! Only HTTP exists today; framework details stay inside [`http`].

pub mod http;
