//! Status server HTTP handlers.

mod metrics;
mod status;

pub use metrics::metrics_handler;
pub use status::status_handler;

#[cfg(test)]
mod tests;
