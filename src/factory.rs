use tracing::*;

use crate::*;

/// Hands out [`InchiGenerator`]s for an engine that is known to be usable.
///
/// The engine is loaded once, when the factory is built, so a missing native
/// library shows up here rather than in the middle of a generation.
pub struct InchiGeneratorFactory<E> {
    engine: E,
}

impl<E: InchiEngine> InchiGeneratorFactory<E> {
    pub fn new(engine: E) -> Result<Self, InchiError> {
        engine.load().map_err(InchiError::EngineUnavailable)?;
        info!("InChI engine loaded");
        Ok(Self { engine })
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// A generator with the default options.
    pub fn generator<'a>(&'a self, molecule: &'a Molecule) -> InchiGenerator<'a, E> {
        InchiGenerator::new(molecule, &self.engine, EngineOptions::default())
    }

    /// A generator configured from an option string such as `"-SRel -FixedH"`.
    pub fn generator_with_options<'a>(
        &'a self,
        molecule: &'a Molecule,
        options: &str,
    ) -> Result<InchiGenerator<'a, E>, InchiError> {
        let options = EngineOptions::parse(options)?;
        Ok(InchiGenerator::new(molecule, &self.engine, options))
    }

    pub fn generator_with_option_list<'a>(
        &'a self,
        molecule: &'a Molecule,
        options: impl IntoIterator<Item = InchiOption>,
    ) -> InchiGenerator<'a, E> {
        InchiGenerator::new(molecule, &self.engine, EngineOptions::from_options(options))
    }
}
