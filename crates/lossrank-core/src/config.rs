//! Typed run parameters.
//!
//! There is no configuration file: every value here is supplied at
//! invocation (CLI flags or library callers) and checked with `validate()`
//! before any computation starts. All structs serialize so reports can echo
//! the exact parameters they were produced with.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// Denominator offset in the ranking score; only matters for targets whose
/// incoming weight is zero.
pub const DEFAULT_EPSILON: f64 = 1e-10;

/// Default HITS iteration cap.
pub const DEFAULT_HITS_MAX_ITER: usize = 100;

/// Default HITS convergence tolerance.
pub const DEFAULT_HITS_TOLERANCE: f64 = 1e-8;

/// The 26 uppercase ASCII letters, `A` through `Z`.
#[must_use]
pub fn default_nodes() -> Vec<String> {
    ('A'..='Z').map(String::from).collect()
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Inclusive integer bounds for generated edge weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightBounds {
    pub min: u32,
    pub max: u32,
}

impl WeightBounds {
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidWeightBounds`] if `min > max`.
    pub fn new(min: u32, max: u32) -> Result<Self, GraphError> {
        let bounds = Self { min, max };
        bounds.validate()?;
        Ok(bounds)
    }

    /// # Errors
    ///
    /// Returns [`GraphError::InvalidWeightBounds`] if `min > max`.
    pub const fn validate(&self) -> Result<(), GraphError> {
        if self.min > self.max {
            return Err(GraphError::InvalidWeightBounds {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, weight: f64) -> bool {
        weight >= f64::from(self.min) && weight <= f64::from(self.max)
    }
}

impl Default for WeightBounds {
    fn default() -> Self {
        Self { min: 1, max: 20 }
    }
}

/// Parameters for random edge generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Node identifiers, in iteration order.
    #[serde(default = "default_nodes")]
    pub nodes: Vec<String>,
    #[serde(default)]
    pub bounds: WeightBounds,
    /// Seed for the random source; `None` draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            nodes: default_nodes(),
            bounds: WeightBounds::default(),
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// # Errors
    ///
    /// Returns an error for inverted weight bounds or a repeated node.
    pub fn validate(&self) -> Result<(), GraphError> {
        self.bounds.validate()?;
        let mut seen = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !seen.insert(node.as_str()) {
                return Err(GraphError::DuplicateNode(node.clone()));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// Parameters for the inverse-incoming-weight ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
}

const fn default_epsilon() -> f64 {
    DEFAULT_EPSILON
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl RankingConfig {
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidParameter`] unless epsilon is finite and
    /// strictly positive.
    pub fn validate(&self) -> Result<(), GraphError> {
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(GraphError::invalid(
                "epsilon",
                format!("must be finite and > 0, got {}", self.epsilon),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Reference oracle
// ---------------------------------------------------------------------------

/// Convergence parameters for the HITS reference ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitsConfig {
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

const fn default_max_iter() -> usize {
    DEFAULT_HITS_MAX_ITER
}

const fn default_tolerance() -> f64 {
    DEFAULT_HITS_TOLERANCE
}

impl Default for HitsConfig {
    fn default() -> Self {
        Self {
            max_iter: DEFAULT_HITS_MAX_ITER,
            tolerance: DEFAULT_HITS_TOLERANCE,
        }
    }
}

impl HitsConfig {
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidParameter`] for a zero iteration cap or a
    /// tolerance that is not finite and positive.
    pub fn validate(&self) -> Result<(), GraphError> {
        if self.max_iter == 0 {
            return Err(GraphError::invalid("max_iter", "must be at least 1"));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(GraphError::invalid(
                "tolerance",
                format!("must be finite and > 0, got {}", self.tolerance),
            ));
        }
        Ok(())
    }
}

/// Which of the two HITS mappings the comparison correlates against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    #[default]
    Hubs,
    Authorities,
}

impl ReferenceKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hubs => "hubs",
            Self::Authorities => "authorities",
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReferenceKind {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hubs" | "hub" => Ok(Self::Hubs),
            "authorities" | "authority" => Ok(Self::Authorities),
            other => Err(GraphError::invalid(
                "reference",
                format!("expected `hubs` or `authorities`, got `{other}`"),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Experiment
// ---------------------------------------------------------------------------

/// Everything one generate → rank → compare run needs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExperimentConfig {
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub hits: HitsConfig,
    #[serde(default)]
    pub reference: ReferenceKind,
}

impl ExperimentConfig {
    /// Validate every section.
    ///
    /// # Errors
    ///
    /// Returns the first section error.
    pub fn validate(&self) -> Result<(), GraphError> {
        self.generator.validate()?;
        self.ranking.validate()?;
        self.hits.validate()
    }
}
