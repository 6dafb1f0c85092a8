//! Stand-in algorithms for adapter tests
//!
//! Small, deterministic learners that exercise every model capability
//! without depending on an external library.

use serde::{Deserialize, Serialize};
use tabular_bridge::capabilities::{AttributeType, Capabilities};
use tabular_bridge::family::{AlgorithmFamily, KMeansConfig, RidgeConfig};
use tabular_bridge::model::{
    Algorithm, Model, ModelCapabilities, ModelKind, OnlineClassifier, SoftClassifier,
};
use tabular_bridge::schema::Dataset;
use tabular_bridge::{is_missing, Error, Result};

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .filter(|(x, y)| !is_missing(**x) && !is_missing(**y))
        .map(|(x, y)| (x - y) * (x - y))
        .sum()
}

fn nearest(centers: &[Vec<f64>], x: &[f64], skip: impl Fn(usize) -> bool) -> Option<usize> {
    (0..centers.len())
        .filter(|&i| !skip(i))
        .min_by(|&a, &b| {
            squared_distance(&centers[a], x)
                .partial_cmp(&squared_distance(&centers[b], x))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

/// Nearest-centroid classifier; soft and online views can be switched off
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearestCentroid {
    pub soft: bool,
    pub online: bool,
}

impl NearestCentroid {
    pub fn full() -> Self {
        NearestCentroid {
            soft: true,
            online: true,
        }
    }

    pub fn hard_only() -> Self {
        NearestCentroid {
            soft: false,
            online: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentroidModel {
    pub centroids: Vec<Vec<f64>>,
    /// Non-missing observations per class and feature
    pub counts: Vec<Vec<usize>>,
    soft: bool,
    online: bool,
}

impl CentroidModel {
    fn observe(&mut self, x: &[f64], label: usize) {
        for (j, value) in x.iter().enumerate() {
            if is_missing(*value) {
                continue;
            }
            self.counts[label][j] += 1;
            let n = self.counts[label][j] as f64;
            self.centroids[label][j] += (value - self.centroids[label][j]) / n;
        }
    }

    fn is_empty_class(&self, label: usize) -> bool {
        self.counts[label].iter().all(|&n| n == 0)
    }
}

impl Model for CentroidModel {
    fn predict(&self, x: &[f64]) -> Result<f64> {
        nearest(&self.centroids, x, |i| self.is_empty_class(i))
            .map(|i| i as f64)
            .ok_or_else(|| Error::InvalidInput("no class has been observed".to_string()))
    }

    fn identity(&self) -> String {
        format!("CentroidModel ({} classes)", self.centroids.len())
    }

    fn as_soft(&self) -> Option<&dyn SoftClassifier> {
        if self.soft {
            Some(self)
        } else {
            None
        }
    }

    fn as_online_mut(&mut self) -> Option<&mut dyn OnlineClassifier> {
        if self.online {
            Some(self)
        } else {
            None
        }
    }
}

impl SoftClassifier for CentroidModel {
    fn predict_proba(&self, x: &[f64]) -> Result<Vec<f64>> {
        let weights: Vec<f64> = (0..self.centroids.len())
            .map(|i| {
                if self.is_empty_class(i) {
                    0.0
                } else {
                    1.0 / (1.0 + squared_distance(&self.centroids[i], x))
                }
            })
            .collect();
        let total: f64 = weights.iter().sum();
        Ok(weights.into_iter().map(|w| w / total).collect())
    }
}

impl OnlineClassifier for CentroidModel {
    fn learn(&mut self, x: &[f64], label: usize) -> Result<()> {
        if label >= self.centroids.len() || x.len() != self.centroids[label].len() {
            return Err(Error::InvalidInput(format!("cannot learn class {}", label)));
        }
        self.observe(x, label);
        Ok(())
    }
}

impl Algorithm for NearestCentroid {
    type Model = CentroidModel;

    fn id(&self) -> String {
        "nearest_centroid".to_string()
    }

    fn kind(&self) -> ModelKind {
        ModelKind::Classifier
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::new()
            .with_attribute(AttributeType::Numeric)
            .with_attribute(AttributeType::Nominal)
            .with_attribute(AttributeType::Date)
            .with_missing_values()
            .with_class(AttributeType::Nominal)
            .with_missing_class_values()
    }

    fn model_capabilities(&self) -> ModelCapabilities {
        let mut caps = ModelCapabilities::predict_only();
        if self.soft {
            caps = caps.with_distribution();
        }
        if self.online {
            caps = caps.with_incremental_learning();
        }
        caps
    }

    fn command_line(&self) -> String {
        format!("{} -soft {} -online {}", self.id(), self.soft, self.online)
    }

    fn train(&self, data: &Dataset) -> Result<CentroidModel> {
        let num_classes = data
            .response()
            .and_then(|r| r.num_categories())
            .ok_or_else(|| Error::InvalidInput("nominal response required".to_string()))?;
        let width = data.num_features();
        let mut model = CentroidModel {
            centroids: vec![vec![0.0; width]; num_classes],
            counts: vec![vec![0; width]; num_classes],
            soft: self.soft,
            online: self.online,
        };
        for (x, y) in data.x().iter().zip(data.y()) {
            if is_missing(*y) {
                return Err(Error::InvalidInput("missing class in training data".to_string()));
            }
            model.observe(x, *y as usize);
        }
        Ok(model)
    }
}

/// Predicts the mean training response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeanRegressor {
    pub config: RidgeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeanModel {
    pub mean: f64,
}

impl Model for MeanModel {
    fn predict(&self, _x: &[f64]) -> Result<f64> {
        Ok(self.mean)
    }

    fn identity(&self) -> String {
        "MeanModel".to_string()
    }
}

impl MeanRegressor {
    fn family(&self) -> AlgorithmFamily {
        AlgorithmFamily::RidgeRegression(self.config.clone())
    }
}

impl Algorithm for MeanRegressor {
    type Model = MeanModel;

    fn id(&self) -> String {
        self.family().id().to_string()
    }

    fn kind(&self) -> ModelKind {
        self.family().kind()
    }

    fn capabilities(&self) -> Capabilities {
        self.family().capabilities()
    }

    fn command_line(&self) -> String {
        self.family().command_line()
    }

    fn train(&self, data: &Dataset) -> Result<MeanModel> {
        self.family().validate()?;
        let targets: Vec<f64> = data.y().iter().copied().filter(|y| !is_missing(*y)).collect();
        if targets.is_empty() {
            return Err(Error::InvalidInput("no training targets".to_string()));
        }
        Ok(MeanModel {
            mean: targets.iter().sum::<f64>() / targets.len() as f64,
        })
    }
}

/// Uses the first `num_clusters` rows as fixed cluster centres
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixedCenters {
    pub config: KMeansConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartitionModel {
    pub centers: Vec<Vec<f64>>,
}

impl Model for PartitionModel {
    fn predict(&self, x: &[f64]) -> Result<f64> {
        nearest(&self.centers, x, |_| false)
            .map(|i| i as f64)
            .ok_or_else(|| Error::InvalidInput("no centres".to_string()))
    }

    fn identity(&self) -> String {
        "PartitionModel".to_string()
    }

    fn num_clusters(&self) -> Option<usize> {
        Some(self.centers.len())
    }
}

impl FixedCenters {
    fn family(&self) -> AlgorithmFamily {
        AlgorithmFamily::Kmeans(self.config.clone())
    }
}

impl Algorithm for FixedCenters {
    type Model = PartitionModel;

    fn id(&self) -> String {
        self.family().id().to_string()
    }

    fn kind(&self) -> ModelKind {
        self.family().kind()
    }

    fn capabilities(&self) -> Capabilities {
        self.family().capabilities()
    }

    fn command_line(&self) -> String {
        self.family().command_line()
    }

    fn train(&self, data: &Dataset) -> Result<PartitionModel> {
        self.family().validate()?;
        let k = self.config.num_clusters;
        if data.num_rows() < k {
            return Err(Error::training(
                self.id(),
                format!("{} rows cannot seed {} clusters", data.num_rows(), k),
            ));
        }
        Ok(PartitionModel {
            centers: data.x()[..k].to_vec(),
        })
    }
}
