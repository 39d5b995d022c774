//! Turn a [`Molecule`] into the position indexed input an InChI engine takes,
//! run the engine once, and read back what it made of it.

mod molecule;
pub use molecule::*;

mod options;
pub use options::*;

mod engine;
pub use engine::*;

mod translate;
pub use translate::*;

mod generator;
pub use generator::*;

mod factory;
pub use factory::*;

mod error;
pub use error::*;

#[cfg(test)]
mod fixtures;

/// Install a `tracing` subscriber printing at `level` ("trace", "debug", "info", ...).
///
/// Unknown levels fall back to "info". Calling it more than once is harmless.
pub fn init_logging(level: &str) {
    let level = level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_test_writer()
        .try_init();
}
