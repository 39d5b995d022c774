use tracing::*;

use crate::*;

#[derive(Debug, Clone)]
enum GenerationState {
    NotRun,
    Generated(InchiOutput),
    /// Translation stopped before the engine was called.
    Halted(Problem),
    /// Translation or the engine failed fatally, with the failure's message.
    Failed(String),
}

/// Generates the InChI for one molecule, once.
///
/// The result accessors run [`generate`](Self::generate) on first use, so a
/// freshly built generator can be read directly. A generator cannot be reused:
/// a second call to `generate` fails, however the first one went. A fatal
/// failure is kept and handed back by every accessor without running again.
///
/// ```ignore
/// let mut generator = factory.generator_with_options(&molecule, "-SRel")?;
/// match generator.return_status()? {
///     InchiStatus::Warning => warn!("InChI warning: {}", generator.message()?),
///     status if !status.is_acceptable() => bail!("InChI failed: {:?}", status),
///     _ => {}
/// }
/// let inchi = generator.inchi()?;
/// ```
pub struct InchiGenerator<'a, E: ?Sized> {
    molecule: &'a Molecule,
    engine: &'a E,
    options: EngineOptions,
    processing: ProcessingOptions,
    state: GenerationState,
}

impl<'a, E: InchiEngine + ?Sized> InchiGenerator<'a, E> {
    pub fn new(molecule: &'a Molecule, engine: &'a E, options: EngineOptions) -> Self {
        Self {
            molecule,
            engine,
            options,
            processing: ProcessingOptions::default(),
            state: GenerationState::NotRun,
        }
    }

    /// Translate the molecule and, unless translation ran into a problem, run the engine.
    pub fn generate(&mut self) -> Result<(), InchiError> {
        if self.is_generated() {
            return Err(InchiError::GeneratorReused);
        }

        match self.run() {
            Ok(state) => {
                self.state = state;
                Ok(())
            }
            Err(err) => {
                error!("InChI generation failed: {}", err);
                self.state = GenerationState::Failed(err.to_string());
                Err(err)
            }
        }
    }

    fn run(&self) -> Result<GenerationState, InchiError> {
        let translation =
            StructureTranslator::new(self.molecule, &self.processing).translate(&self.options)?;
        Ok(match translation {
            Translation::Halted(problem) => {
                info!("Not calling the InChI engine: {}", problem);
                GenerationState::Halted(problem)
            }
            Translation::Ready(input) => {
                trace!(
                    "Calling the InChI engine with {} atoms, {} bonds and {} stereo elements",
                    input.atoms.len(),
                    input.bonds.len(),
                    input.stereos.len()
                );
                let output = self.engine.get_inchi(&input).map_err(InchiError::Engine)?;
                debug!("InChI engine returned {:?}", output.status);
                GenerationState::Generated(output)
            }
        })
    }

    fn output(&mut self) -> Result<&InchiOutput, InchiError> {
        if !self.is_generated() {
            self.generate()?;
        }
        match &self.state {
            GenerationState::Generated(output) => Ok(output),
            GenerationState::Halted(problem) => Err(InchiError::GenerationFailed(problem.clone())),
            GenerationState::Failed(message) => Err(InchiError::PreviouslyFailed(message.clone())),
            GenerationState::NotRun => unreachable!("generate() leaves the generator generated"),
        }
    }

    /// Return status of the engine. `Okay` and `Warning` mean an InChI was made.
    pub fn return_status(&mut self) -> Result<InchiStatus, InchiError> {
        Ok(self.output()?.status)
    }

    pub fn is_acceptable(&mut self) -> Result<bool, InchiError> {
        Ok(self.return_status()?.is_acceptable())
    }

    /// The generated InChI, if the engine produced one.
    pub fn inchi(&mut self) -> Result<Option<&str>, InchiError> {
        Ok(self.output()?.inchi.as_deref())
    }

    pub fn aux_info(&mut self) -> Result<&str, InchiError> {
        Ok(&self.output()?.aux_info)
    }

    /// Error and warning messages from the engine.
    pub fn message(&mut self) -> Result<&str, InchiError> {
        Ok(&self.output()?.message)
    }

    pub fn log(&mut self) -> Result<&str, InchiError> {
        Ok(&self.output()?.log)
    }

    /// The InChI as an identifier annotation.
    pub fn identifier(&mut self) -> Result<Identifier, InchiError> {
        let inchi = self.inchi()?.ok_or(InchiError::MissingInchi)?;
        Ok(Identifier::inchi(inchi))
    }

    /// Append the InChI as an identifier to `host`.
    pub fn append_to<H>(&mut self, host: &mut H) -> Result<(), InchiError>
    where
        H: IdentifierHost + ?Sized,
    {
        let identifier = self.identifier()?;
        host.append_identifier(identifier);
        Ok(())
    }

    /// The problem that stopped generation before the engine was called, if any.
    ///
    /// Unlike the other accessors this never triggers generation.
    pub fn prior_problem(&self) -> Option<&Problem> {
        match &self.state {
            GenerationState::Halted(problem) => Some(problem),
            _ => None,
        }
    }

    pub fn is_generated(&self) -> bool {
        !matches!(self.state, GenerationState::NotRun)
    }

    pub fn molecule(&self) -> &Molecule {
        self.molecule
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn processing_options(&self) -> &ProcessingOptions {
        &self.processing
    }

    /// Only has an effect before generation.
    pub fn set_processing_options(&mut self, processing: ProcessingOptions) {
        if self.is_generated() {
            warn!("Processing options changed after generation, they will not be used");
        }
        self.processing = processing;
    }

    pub fn with_processing_options(mut self, processing: ProcessingOptions) -> Self {
        self.set_processing_options(processing);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::mock::RecordingEngine;
    use crate::fixtures::*;

    const ALANINE: &str = "InChI=1S/C3H7NO2/c1-2(4)3(5)6/h2H,4H2,1H3,(H,5,6)/t2-/m0/s1";

    #[test]
    fn test_lazy_generation() {
        init_logging("trace");
        let mol = alanine();
        let engine = RecordingEngine::okay(ALANINE);
        let mut generator = InchiGenerator::new(&mol, &engine, EngineOptions::default());
        assert!(!generator.is_generated());

        assert_eq!(generator.return_status().unwrap(), InchiStatus::Okay);
        assert!(generator.is_generated());
        assert_eq!(generator.inchi().unwrap(), Some(ALANINE));
        assert_eq!(generator.aux_info().unwrap(), "AuxInfo=1/1/N:1");
        assert_eq!(generator.message().unwrap(), "");
        assert_eq!(generator.log().unwrap(), "engine log");
        assert!(generator.is_acceptable().unwrap());
        assert_eq!(engine.calls.get(), 1);

        let input = engine.input();
        assert_eq!(input.atoms.len(), 6);
        assert_eq!(input.bonds.len(), 5);
    }

    #[test]
    fn test_accessors_are_idempotent() {
        let mol = alanine();
        let engine = RecordingEngine::answering(InchiStatus::Warning, Some(ALANINE));
        let mut generator = InchiGenerator::new(&mol, &engine, EngineOptions::default());
        generator.generate().unwrap();

        let mut read = || {
            (
                generator.return_status().unwrap(),
                generator.inchi().unwrap().map(str::to_owned),
                generator.aux_info().unwrap().to_owned(),
                generator.message().unwrap().to_owned(),
                generator.log().unwrap().to_owned(),
            )
        };
        let first = read();
        let second = read();
        assert_eq!(first, second);
        assert_eq!(first.2, "AuxInfo=1/1/N:1");
        assert_eq!(first.4, "engine log");
        assert!(generator.is_acceptable().unwrap());
        assert_eq!(engine.calls.get(), 1);
    }

    #[test]
    fn test_generator_cannot_be_reused() {
        let mol = lone_carbon();
        let engine = RecordingEngine::okay("InChI=1S/CH4/h1H4");
        let mut generator = InchiGenerator::new(&mol, &engine, EngineOptions::default());
        generator.generate().unwrap();
        assert!(matches!(generator.generate(), Err(InchiError::GeneratorReused)));

        // Also after a lazy generation
        let mut generator = InchiGenerator::new(&mol, &engine, EngineOptions::default());
        generator.inchi().unwrap();
        assert!(matches!(generator.generate(), Err(InchiError::GeneratorReused)));
        assert_eq!(engine.calls.get(), 2);
    }

    #[test]
    fn test_fresh_generator_generates_once() {
        let mol = lone_carbon();
        let engine = RecordingEngine::okay("InChI=1S/CH4/h1H4");
        let mut generator = InchiGenerator::new(&mol, &engine, EngineOptions::default());
        generator.is_acceptable().unwrap();
        generator.inchi().unwrap();
        generator.message().unwrap();
        assert_eq!(engine.calls.get(), 1);
        assert_eq!(engine.input().atoms[0].implicit_h, INFER_IMPLICIT_H);
    }

    #[test]
    fn test_bad_bond_order_never_reaches_engine() {
        let mol = alanine_with_bad_bond();
        let engine = RecordingEngine::okay(ALANINE);
        let mut generator = InchiGenerator::new(&mol, &engine, EngineOptions::default());
        assert_eq!(generator.prior_problem(), None);

        generator.generate().unwrap();
        assert!(generator.is_generated());
        assert!(matches!(
            generator.prior_problem(),
            Some(Problem::UnsupportedBondOrder { bond: 5, .. })
        ));
        assert!(matches!(generator.return_status(), Err(InchiError::GenerationFailed(_))));
        assert!(matches!(generator.inchi(), Err(InchiError::GenerationFailed(_))));
        assert!(matches!(generator.aux_info(), Err(InchiError::GenerationFailed(_))));
        assert!(matches!(generator.message(), Err(InchiError::GenerationFailed(_))));
        assert!(matches!(generator.log(), Err(InchiError::GenerationFailed(_))));
        assert!(matches!(generator.generate(), Err(InchiError::GeneratorReused)));
        assert_eq!(engine.calls.get(), 0);
    }

    #[test]
    fn test_prior_problem_does_not_generate() {
        let mol = alanine_with_bad_bond();
        let engine = RecordingEngine::okay(ALANINE);
        let generator = InchiGenerator::new(&mol, &engine, EngineOptions::default());
        assert_eq!(generator.prior_problem(), None);
        assert!(!generator.is_generated());
    }

    #[test]
    fn test_negative_hydrogens_fail_before_engine() {
        let mut mol = lone_carbon();
        let c = mol.atom_by_id("a1").unwrap();
        mol.atom_mut(c).hydrogen_count = Some(0);
        let h = mol.add_atom(Atom::new("h1", "H"));
        mol.add_bond(c, h, Bond::single());

        let engine = RecordingEngine::okay("InChI=1S/CH4/h1H4");
        let mut generator = InchiGenerator::new(&mol, &engine, EngineOptions::default());
        assert!(matches!(
            generator.inchi(),
            Err(InchiError::NegativeImplicitHydrogens { .. })
        ));
        assert_eq!(engine.calls.get(), 0);
        assert!(generator.is_generated());

        // The failure sticks without translating again
        let err = generator.return_status().unwrap_err();
        assert!(matches!(err, InchiError::PreviouslyFailed(ref msg) if msg.contains("'a1'")));
        assert!(matches!(generator.generate(), Err(InchiError::GeneratorReused)));
        assert_eq!(generator.prior_problem(), None);
        assert_eq!(engine.calls.get(), 0);
    }

    #[test]
    fn test_engine_failure() {
        let mol = alanine();
        let engine = RecordingEngine::failing("inchi library crashed");
        let mut generator = InchiGenerator::new(&mol, &engine, EngineOptions::default());
        let err = generator.generate().unwrap_err();
        assert!(matches!(err, InchiError::Engine(_)));
        assert!(err.to_string().contains("inchi library crashed"));

        assert!(matches!(generator.generate(), Err(InchiError::GeneratorReused)));
        for _ in 0..2 {
            let err = generator.return_status().unwrap_err();
            assert!(matches!(err, InchiError::PreviouslyFailed(_)));
            assert!(err.to_string().contains("inchi library crashed"));
        }
        assert!(matches!(generator.inchi(), Err(InchiError::PreviouslyFailed(_))));
        assert!(matches!(generator.log(), Err(InchiError::PreviouslyFailed(_))));
        assert_eq!(engine.calls.get(), 1);
    }

    #[test]
    fn test_failed_status_is_not_acceptable() {
        let mol = alanine();
        let engine = RecordingEngine::answering(InchiStatus::Error, None);
        let mut generator = InchiGenerator::new(&mol, &engine, EngineOptions::default());
        assert!(!generator.is_acceptable().unwrap());
        assert_eq!(generator.inchi().unwrap(), None);
        assert_eq!(generator.message().unwrap(), "Error from engine");
        assert!(matches!(generator.identifier(), Err(InchiError::MissingInchi)));

        let mut annotated = mol.clone();
        assert!(matches!(
            generator.append_to(&mut annotated),
            Err(InchiError::MissingInchi)
        ));
        assert!(annotated.identifiers().is_empty());
        assert_eq!(engine.calls.get(), 1);
    }

    #[test]
    fn test_processing_options_without_bonds() {
        let mol = alanine();
        let engine = RecordingEngine::okay("InChI=1S/3CH4.H3N.2H2O/h3*1H4;1H3;2*1H2");
        let mut generator = InchiGenerator::new(&mol, &engine, EngineOptions::default())
            .with_processing_options(ProcessingOptions::none());
        assert_eq!(generator.processing_options(), &ProcessingOptions::none());
        generator.generate().unwrap();
        assert!(engine.input().bonds.is_empty());
        assert_eq!(engine.input().atoms.len(), 6);
    }

    #[test]
    fn test_append_to_molecule() {
        let mol = but_2_ene(BondStereo::cis("a1 a2 a3 a4"));
        let engine = RecordingEngine::okay("InChI=1S/C4H8/c1-3-4-2/h3-4H,1-2H3/b4-3-");
        let mut generator = InchiGenerator::new(&mol, &engine, EngineOptions::default());

        let mut annotated = generator.molecule().clone();
        generator.append_to(&mut annotated).unwrap();
        assert_eq!(
            annotated.identifiers(),
            &[Identifier {
                convention: INCHI_CONVENTION.to_string(),
                value: "InChI=1S/C4H8/c1-3-4-2/h3-4H,1-2H3/b4-3-".to_string(),
            }]
        );
        assert_eq!(engine.input().stereos.len(), 1);
    }
}
