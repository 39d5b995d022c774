use std::collections::{BTreeSet, HashMap};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use lazy_static::lazy_static;
use nom::{
    bytes::complete::take_while1,
    character::complete::{multispace0, multispace1, one_of},
    combinator::{all_consuming, opt},
    error::{convert_error, VerboseError},
    multi::separated_list0,
    sequence::{delimited, preceded},
    Finish, IResult,
};
use tracing::*;

use crate::InchiError;

type Res<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

/// Options understood by the InChI engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InchiOption {
    SUCF,
    ChiralFlagOn,
    ChiralFlagOff,
    SNon,
    SAbs,
    SRel,
    SRac,
    SUU,
    SLUUD,
    FixedH,
    RecMet,
    Ket,
    OneFiveT,
    AuxNone,
    NewPsOff,
    DoNotAddH,
    WarnOnEmptyStructure,
    LargeMolecules,
}

impl InchiOption {
    pub const ALL: [InchiOption; 18] = [
        InchiOption::SUCF,
        InchiOption::ChiralFlagOn,
        InchiOption::ChiralFlagOff,
        InchiOption::SNon,
        InchiOption::SAbs,
        InchiOption::SRel,
        InchiOption::SRac,
        InchiOption::SUU,
        InchiOption::SLUUD,
        InchiOption::FixedH,
        InchiOption::RecMet,
        InchiOption::Ket,
        InchiOption::OneFiveT,
        InchiOption::AuxNone,
        InchiOption::NewPsOff,
        InchiOption::DoNotAddH,
        InchiOption::WarnOnEmptyStructure,
        InchiOption::LargeMolecules,
    ];

    /// The name of the option as the engine spells it.
    pub fn name(&self) -> &'static str {
        match self {
            InchiOption::SUCF => "SUCF",
            InchiOption::ChiralFlagOn => "ChiralFlagON",
            InchiOption::ChiralFlagOff => "ChiralFlagOFF",
            InchiOption::SNon => "SNon",
            InchiOption::SAbs => "SAbs",
            InchiOption::SRel => "SRel",
            InchiOption::SRac => "SRac",
            InchiOption::SUU => "SUU",
            InchiOption::SLUUD => "SLUUD",
            InchiOption::FixedH => "FixedH",
            InchiOption::RecMet => "RecMet",
            InchiOption::Ket => "KET",
            InchiOption::OneFiveT => "15T",
            InchiOption::AuxNone => "AuxNone",
            InchiOption::NewPsOff => "NEWPSOFF",
            InchiOption::DoNotAddH => "DoNotAddH",
            InchiOption::WarnOnEmptyStructure => "WarnOnEmptyStructure",
            InchiOption::LargeMolecules => "LargeMolecules",
        }
    }

    /// Look up an option by name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        OPTION_NAMES.get(&name.to_ascii_lowercase()).copied()
    }
}

impl Display for InchiOption {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}", self.name())
    }
}

lazy_static! {
    static ref OPTION_NAMES: HashMap<String, InchiOption> = InchiOption::ALL
        .iter()
        .map(|option| (option.name().to_ascii_lowercase(), *option))
        .collect();
}

/// A single option token, with an optional `-` or `/` switch in front.
fn option_token(input: &str) -> Res<&str> {
    preceded(opt(one_of("-/")), take_while1(|c: char| !c.is_whitespace()))(input)
}

fn option_list(input: &str) -> Res<Vec<&str>> {
    all_consuming(delimited(
        multispace0,
        separated_list0(multispace1, option_token),
        multispace0,
    ))(input)
}

/// The resolved set of engine options for one generation.
///
/// Options keep the order they were first given in; repeats are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EngineOptions(Vec<InchiOption>);

impl EngineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_options(options: impl IntoIterator<Item = InchiOption>) -> Self {
        let mut result = Self::new();
        for option in options {
            result.insert(option);
        }
        result
    }

    /// Parse a space delimited option string such as `"-SRel /FixedH"`.
    pub fn parse(options: &str) -> Result<Self, InchiError> {
        let (_, names) = option_list(options)
            .finish()
            .map_err(|e| InchiError::InvalidOption(convert_error(options, e)))?;

        let mut result = Self::new();
        for name in names {
            let option = InchiOption::from_name(name).ok_or_else(|| {
                InchiError::InvalidOption(format!("unrecognised InChI option '{}'", name))
            })?;
            result.insert(option);
        }
        debug!("Parsed InChI options {:?} into {}", options, result);
        Ok(result)
    }

    pub fn insert(&mut self, option: InchiOption) {
        if !self.contains(option) {
            self.0.push(option);
        }
    }

    pub fn contains(&self, option: InchiOption) -> bool {
        self.0.contains(&option)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InchiOption> {
        self.0.iter()
    }

    /// Render as the flag string handed to the engine.
    pub fn to_option_string(&self) -> String {
        self.0
            .iter()
            .map(|option| format!("-{}", option))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl FromStr for EngineOptions {
    type Err = InchiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl FromIterator<InchiOption> for EngineOptions {
    fn from_iter<T: IntoIterator<Item = InchiOption>>(iter: T) -> Self {
        Self::from_options(iter)
    }
}

impl Display for EngineOptions {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}", self.to_option_string())
    }
}

/// Switches that control what the translator hands to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProcessingOption {
    /// Include bonds. Without it the engine only sees disconnected atoms.
    UseBonds,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingOptions(BTreeSet<ProcessingOption>);

impl ProcessingOptions {
    /// No processing options at all.
    pub fn none() -> Self {
        Self(BTreeSet::new())
    }

    pub fn contains(&self, option: ProcessingOption) -> bool {
        self.0.contains(&option)
    }

    pub fn with(mut self, option: ProcessingOption) -> Self {
        self.0.insert(option);
        self
    }

    pub fn without(mut self, option: ProcessingOption) -> Self {
        self.0.remove(&option);
        self
    }
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self::none().with(ProcessingOption::UseBonds)
    }
}

impl FromIterator<ProcessingOption> for ProcessingOptions {
    fn from_iter<T: IntoIterator<Item = ProcessingOption>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
