//! Algorithm family configurations
//!
//! One plain configuration struct per family of external algorithms, with
//! the family defaults. The structs carry no training logic: an
//! [`Algorithm`](crate::model::Algorithm) implementation wrapping the
//! external library reads its options from them and uses
//! [`AlgorithmFamily`] for its identity, kind and declared capabilities.

use serde::{Deserialize, Serialize};

use crate::capabilities::{capabilities_for, Capabilities};
use crate::error::{Error, Result};
use crate::model::ModelKind;

fn non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_nan() || value < 0.0 {
        return Err(Error::InvalidInput(format!(
            "{} must be >= 0, got {}",
            name, value
        )));
    }
    Ok(())
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value.is_nan() || value <= 0.0 {
        return Err(Error::InvalidInput(format!(
            "{} must be > 0, got {}",
            name, value
        )));
    }
    Ok(())
}

fn at_least(name: &str, value: usize, min: usize) -> Result<()> {
    if value < min {
        return Err(Error::InvalidInput(format!(
            "{} must be >= {}, got {}",
            name, min, value
        )));
    }
    Ok(())
}

/// Mercer kernels used by SVM, SVR and Gaussian process regression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kernel", rename_all = "snake_case")]
pub enum KernelConfig {
    Gaussian { sigma: f64 },
    Laplacian { sigma: f64 },
    Polynomial { degree: u32, scale: f64, offset: f64 },
    Hellinger,
    Linear,
    HyperbolicTangent { scale: f64, offset: f64 },
    Pearson { omega: f64, sigma: f64 },
}

impl Default for KernelConfig {
    fn default() -> Self {
        KernelConfig::Gaussian { sigma: 0.01 }
    }
}

impl KernelConfig {
    pub fn name(&self) -> &'static str {
        match self {
            KernelConfig::Gaussian { .. } => "gaussian",
            KernelConfig::Laplacian { .. } => "laplacian",
            KernelConfig::Polynomial { .. } => "polynomial",
            KernelConfig::Hellinger => "hellinger",
            KernelConfig::Linear => "linear",
            KernelConfig::HyperbolicTangent { .. } => "hyperbolic_tangent",
            KernelConfig::Pearson { .. } => "pearson",
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            KernelConfig::Gaussian { sigma } | KernelConfig::Laplacian { sigma } => {
                non_negative("sigma", *sigma)
            }
            KernelConfig::Polynomial { degree, .. } => at_least("degree", *degree as usize, 1),
            KernelConfig::Pearson { sigma, .. } => positive("sigma", *sigma),
            _ => Ok(()),
        }
    }

    pub fn command_line(&self) -> String {
        let options = match self {
            KernelConfig::Gaussian { sigma } | KernelConfig::Laplacian { sigma } => {
                format!(" -sigma {}", sigma)
            }
            KernelConfig::Polynomial {
                degree,
                scale,
                offset,
            } => format!(" -degree {} -scale {} -offset {}", degree, scale, offset),
            KernelConfig::HyperbolicTangent { scale, offset } => {
                format!(" -scale {} -offset {}", scale, offset)
            }
            KernelConfig::Pearson { omega, sigma } => {
                format!(" -omega {} -sigma {}", omega, sigma)
            }
            KernelConfig::Hellinger | KernelConfig::Linear => String::new(),
        };
        format!("{}{}", self.name(), options)
    }
}

/// Distance functions used by CLARANS
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceConfig {
    #[default]
    Euclidean,
}

impl DistanceConfig {
    pub fn name(&self) -> &'static str {
        match self {
            DistanceConfig::Euclidean => "euclidean",
        }
    }
}

/// Multi-class decomposition for binary SVMs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MulticlassStrategy {
    OneVsOne,
    #[default]
    OneVsAll,
}

impl MulticlassStrategy {
    fn name(&self) -> &'static str {
        match self {
            MulticlassStrategy::OneVsOne => "one_vs_one",
            MulticlassStrategy::OneVsAll => "one_vs_all",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvmConfig {
    pub kernel: KernelConfig,
    pub capacity: f64,
    pub tolerance: f64,
    pub multiclass_strategy: MulticlassStrategy,
}

impl Default for SvmConfig {
    fn default() -> Self {
        SvmConfig {
            kernel: KernelConfig::default(),
            capacity: 1.0,
            tolerance: 0.001,
            multiclass_strategy: MulticlassStrategy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvrConfig {
    pub kernel: KernelConfig,
    pub epsilon: f64,
    pub capacity: f64,
    pub tolerance: f64,
}

impl Default for SvrConfig {
    fn default() -> Self {
        SvrConfig {
            kernel: KernelConfig::default(),
            epsilon: 1e-3,
            capacity: 1.0,
            tolerance: 0.001,
        }
    }
}

/// Random forest options, shared by classification and regression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomForestConfig {
    pub num_trees: usize,
    /// Features sampled per split; `None` lets the algorithm decide
    pub num_features: Option<usize>,
    pub max_nodes: usize,
    pub min_node_size: usize,
    pub subsample: f64,
}

impl Default for RandomForestConfig {
    fn default() -> Self {
        RandomForestConfig {
            num_trees: 100,
            num_features: None,
            max_nodes: 100,
            min_node_size: 5,
            subsample: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RidgeConfig {
    pub lambda: f64,
}

impl Default for RidgeConfig {
    fn default() -> Self {
        RidgeConfig { lambda: 1.0e-8 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaussianProcessConfig {
    pub kernel: KernelConfig,
    pub lambda: f64,
}

impl Default for GaussianProcessConfig {
    fn default() -> Self {
        GaussianProcessConfig {
            kernel: KernelConfig::default(),
            lambda: 0.01,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KMeansConfig {
    pub num_clusters: usize,
    pub max_iter: usize,
    pub runs: usize,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        KMeansConfig {
            num_clusters: 2,
            max_iter: 100,
            runs: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BirchConfig {
    pub num_clusters: usize,
    pub dimensionality: usize,
    pub branching: usize,
    pub max_radius: f64,
}

impl Default for BirchConfig {
    fn default() -> Self {
        BirchConfig {
            num_clusters: 2,
            dimensionality: 2,
            branching: 2,
            max_radius: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaransConfig {
    pub distance: DistanceConfig,
    pub num_clusters: usize,
    /// Neighbours examined per step; `None` lets the algorithm decide
    pub max_neighbor: Option<usize>,
    pub num_local_minima: usize,
}

impl Default for ClaransConfig {
    fn default() -> Self {
        ClaransConfig {
            distance: DistanceConfig::default(),
            num_clusters: 2,
            max_neighbor: None,
            num_local_minima: 2,
        }
    }
}

/// A configured external algorithm family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum AlgorithmFamily {
    Svm(SvmConfig),
    Svr(SvrConfig),
    RandomForest(RandomForestConfig),
    RandomForestRegression(RandomForestConfig),
    RidgeRegression(RidgeConfig),
    GaussianProcessRegression(GaussianProcessConfig),
    Kmeans(KMeansConfig),
    Birch(BirchConfig),
    Clarans(ClaransConfig),
}

impl AlgorithmFamily {
    /// Identifier, also the key of the capability table
    pub fn id(&self) -> &'static str {
        match self {
            AlgorithmFamily::Svm(_) => "svm",
            AlgorithmFamily::Svr(_) => "svr",
            AlgorithmFamily::RandomForest(_) => "random_forest",
            AlgorithmFamily::RandomForestRegression(_) => "random_forest_regression",
            AlgorithmFamily::RidgeRegression(_) => "ridge_regression",
            AlgorithmFamily::GaussianProcessRegression(_) => "gaussian_process_regression",
            AlgorithmFamily::Kmeans(_) => "kmeans",
            AlgorithmFamily::Birch(_) => "birch",
            AlgorithmFamily::Clarans(_) => "clarans",
        }
    }

    pub fn kind(&self) -> ModelKind {
        match self {
            AlgorithmFamily::Svm(_) | AlgorithmFamily::RandomForest(_) => ModelKind::Classifier,
            AlgorithmFamily::Svr(_)
            | AlgorithmFamily::RandomForestRegression(_)
            | AlgorithmFamily::RidgeRegression(_)
            | AlgorithmFamily::GaussianProcessRegression(_) => ModelKind::Regressor,
            AlgorithmFamily::Kmeans(_) | AlgorithmFamily::Birch(_) | AlgorithmFamily::Clarans(_) => {
                ModelKind::Clusterer
            }
        }
    }

    /// Declared data capabilities of this family
    pub fn capabilities(&self) -> Capabilities {
        capabilities_for(self.id()).unwrap_or_default()
    }

    /// Rejects out-of-range option values
    pub fn validate(&self) -> Result<()> {
        match self {
            AlgorithmFamily::Svm(c) => {
                c.kernel.validate()?;
                non_negative("capacity", c.capacity)?;
                positive("tolerance", c.tolerance)
            }
            AlgorithmFamily::Svr(c) => {
                c.kernel.validate()?;
                non_negative("epsilon", c.epsilon)?;
                non_negative("capacity", c.capacity)?;
                positive("tolerance", c.tolerance)
            }
            AlgorithmFamily::RandomForest(c) | AlgorithmFamily::RandomForestRegression(c) => {
                at_least("num_trees", c.num_trees, 1)?;
                if let Some(n) = c.num_features {
                    at_least("num_features", n, 1)?;
                }
                at_least("max_nodes", c.max_nodes, 2)?;
                at_least("min_node_size", c.min_node_size, 1)?;
                if !(c.subsample > 0.0 && c.subsample <= 1.0) {
                    return Err(Error::InvalidInput(format!(
                        "subsample must be in (0, 1], got {}",
                        c.subsample
                    )));
                }
                Ok(())
            }
            AlgorithmFamily::RidgeRegression(c) => non_negative("lambda", c.lambda),
            AlgorithmFamily::GaussianProcessRegression(c) => {
                c.kernel.validate()?;
                non_negative("lambda", c.lambda)
            }
            AlgorithmFamily::Kmeans(c) => {
                at_least("num_clusters", c.num_clusters, 2)?;
                at_least("max_iter", c.max_iter, 1)?;
                at_least("runs", c.runs, 1)
            }
            AlgorithmFamily::Birch(c) => {
                at_least("num_clusters", c.num_clusters, 2)?;
                at_least("dimensionality", c.dimensionality, 1)?;
                at_least("branching", c.branching, 2)?;
                positive("max_radius", c.max_radius)
            }
            AlgorithmFamily::Clarans(c) => {
                at_least("num_clusters", c.num_clusters, 2)?;
                if let Some(n) = c.max_neighbor {
                    at_least("max_neighbor", n, 1)?;
                }
                at_least("num_local_minima", c.num_local_minima, 1)
            }
        }
    }

    /// Options in `-name value` form
    pub fn options(&self) -> Vec<String> {
        fn opt(name: &str, value: impl ToString) -> [String; 2] {
            [format!("-{}", name), value.to_string()]
        }
        let pairs: Vec<[String; 2]> = match self {
            AlgorithmFamily::Svm(c) => vec![
                opt("kernel", format!("\"{}\"", c.kernel.command_line())),
                opt("capacity", c.capacity),
                opt("tolerance", c.tolerance),
                opt("multiclass-strategy", c.multiclass_strategy.name()),
            ],
            AlgorithmFamily::Svr(c) => vec![
                opt("kernel", format!("\"{}\"", c.kernel.command_line())),
                opt("epsilon", c.epsilon),
                opt("capacity", c.capacity),
                opt("tolerance", c.tolerance),
            ],
            AlgorithmFamily::RandomForest(c) | AlgorithmFamily::RandomForestRegression(c) => {
                let mut pairs = vec![opt("num-trees", c.num_trees)];
                if let Some(n) = c.num_features {
                    pairs.push(opt("num-features", n));
                }
                pairs.push(opt("max-nodes", c.max_nodes));
                pairs.push(opt("min-node-size", c.min_node_size));
                pairs.push(opt("subsample", c.subsample));
                pairs
            }
            AlgorithmFamily::RidgeRegression(c) => vec![opt("lambda", c.lambda)],
            AlgorithmFamily::GaussianProcessRegression(c) => vec![
                opt("kernel", format!("\"{}\"", c.kernel.command_line())),
                opt("lambda", c.lambda),
            ],
            AlgorithmFamily::Kmeans(c) => vec![
                opt("num-clusters", c.num_clusters),
                opt("max-iter", c.max_iter),
                opt("runs", c.runs),
            ],
            AlgorithmFamily::Birch(c) => vec![
                opt("num-clusters", c.num_clusters),
                opt("dimensionality", c.dimensionality),
                opt("branching", c.branching),
                opt("max-radius", c.max_radius),
            ],
            AlgorithmFamily::Clarans(c) => {
                let mut pairs = vec![
                    opt("distance", c.distance.name()),
                    opt("num-clusters", c.num_clusters),
                ];
                if let Some(n) = c.max_neighbor {
                    pairs.push(opt("max-neighbor", n));
                }
                pairs.push(opt("num-local-minima", c.num_local_minima));
                pairs
            }
        };
        pairs.into_iter().flatten().collect()
    }

    /// Identifier followed by the options
    pub fn command_line(&self) -> String {
        let mut parts = vec![self.id().to_string()];
        parts.extend(self.options());
        parts.join(" ")
    }
}
