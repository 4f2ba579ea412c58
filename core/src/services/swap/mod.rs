//! Swap workflow engine and its inputs.

mod service;

#[cfg(test)]
mod tests;

pub use service::{CreateSwapInput, SwapService};
