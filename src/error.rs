use thiserror::Error;

use crate::Problem;

#[derive(Error, Debug)]
pub enum InchiError {
    #[error(
        "Failed to generate InChI: unsupported spin multiplicity {multiplicity} on atom '{atom}'"
    )]
    UnsupportedSpinMultiplicity { atom: String, multiplicity: i32 },
    #[error("Negative implicit hydrogen count {count} on atom '{atom}'")]
    NegativeImplicitHydrogens { atom: String, count: i32 },
    #[error("Implicit hydrogen count {count} on atom '{atom}' is too large")]
    ImplicitHydrogensOutOfRange { atom: String, count: i64 },
    #[error("Generator cannot be reused")]
    GeneratorReused,
    /// The structure was rejected before it ever reached the engine.
    #[error("InChI generation failed: {0}")]
    GenerationFailed(Problem),
    /// An earlier `generate` failed fatally; holds that failure's message.
    #[error("{0}")]
    PreviouslyFailed(String),
    #[error("Failed to generate InChI: no InChI string was produced")]
    MissingInchi,
    #[error("Failed to generate InChI: {0}")]
    Engine(#[source] anyhow::Error),
    #[error("Unable to load InChI engine: {0}")]
    EngineUnavailable(#[source] anyhow::Error),
    #[error("Invalid InChI option string: {0}")]
    InvalidOption(String),
}
