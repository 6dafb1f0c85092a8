mod common;

use common::*;
use tabular_bridge::config::{AdapterConfig, DistributionFallback, UnseenCategoryPolicy};
use tabular_bridge::family::KMeansConfig;
use tabular_bridge::frame::{Cell, HostColumn, HostFrame};
use tabular_bridge::model::{ModelAdapter, ModelKind};
use tabular_bridge::{Algorithm, Error, NA};

fn built_classifier(algorithm: NearestCentroid) -> ModelAdapter<NearestCentroid> {
    let mut adapter = ModelAdapter::new(algorithm);
    adapter.build(&weather_frame()).unwrap();
    adapter
}

#[test]
fn test_predict_before_build_is_not_built() {
    let mut classifier = ModelAdapter::new(NearestCentroid::full());
    let row = weather_row(1.0, "red", None);
    assert!(!classifier.is_built());
    assert!(matches!(classifier.predict(&row), Err(Error::NotBuilt)));
    assert!(matches!(
        classifier.predict_distribution(&row),
        Err(Error::NotBuilt)
    ));
    assert!(matches!(classifier.predict_label(&row), Err(Error::NotBuilt)));

    let mut regressor = ModelAdapter::new(MeanRegressor::default());
    assert!(matches!(
        regressor.predict(&[Cell::from(1.0), NA::NA, NA::NA]),
        Err(Error::NotBuilt)
    ));

    let clusterer = ModelAdapter::new(FixedCenters::default());
    assert!(matches!(clusterer.number_of_clusters(), Err(Error::NotBuilt)));
}

#[test]
fn test_build_then_predict() {
    let mut adapter = built_classifier(NearestCentroid::full());
    assert!(adapter.is_built());
    assert!(adapter.header().is_some());
    assert!(adapter.model().is_some());

    assert_eq!(adapter.predict(&weather_row(0.2, "red", None)).unwrap(), 0.0);
    assert_eq!(
        adapter
            .predict_label(&weather_row(10.5, "blue", None))
            .unwrap(),
        "no"
    );
    // the class cell of a prediction row is ignored
    assert_eq!(
        adapter
            .predict(&weather_row(0.2, "red", Some("no")))
            .unwrap(),
        0.0
    );
}

#[test]
fn test_describe_distinguishes_built_state() {
    let mut adapter = ModelAdapter::new(NearestCentroid::full());
    assert_eq!(
        adapter.describe(),
        "nearest_centroid -soft true -online true\nNo model built yet!"
    );

    adapter.build(&weather_frame()).unwrap();
    assert_eq!(
        adapter.describe(),
        "nearest_centroid -soft true -online true\nCentroidModel (2 classes)"
    );
    assert_eq!(adapter.to_string(), adapter.describe());

    adapter.reset();
    assert!(adapter.describe().ends_with("No model built yet!"));

    let regressor = ModelAdapter::new(MeanRegressor::default());
    assert_eq!(
        regressor.describe(),
        "ridge_regression -lambda 0.00000001\nNo model built yet!"
    );
}

#[test]
fn test_incompatible_data_fails_before_conversion() {
    let mut adapter = built_classifier(NearestCentroid::full());

    // numeric response on a classifier
    let err = adapter.build(&prices_frame()).unwrap_err();
    assert!(matches!(err, Error::IncompatibleData(_)));
    assert!(!adapter.is_built());

    // a relational column would fail conversion; the capability test fails first
    let mut bags = HostFrame::new(
        "bags",
        vec![
            HostColumn::numeric("x"),
            HostColumn::relational("bag"),
            HostColumn::nominal("label", ["a", "b"]),
        ],
    );
    bags.set_class_index(Some(2)).unwrap();
    assert!(matches!(
        adapter.build(&bags),
        Err(Error::IncompatibleData(_))
    ));

    let mut points = points_frame();
    points.add_row(vec![NA::NA, Cell::from("left")]).unwrap();
    let mut clusterer = ModelAdapter::new(FixedCenters::default());
    assert!(matches!(
        clusterer.build(&points),
        Err(Error::IncompatibleData(_))
    ));
    assert!(!clusterer.is_built());
}

#[test]
fn test_failed_build_leaves_adapter_empty() {
    let mut adapter = ModelAdapter::new(MeanRegressor::default());
    adapter.build(&prices_frame()).unwrap();
    assert!(adapter.is_built());

    // the only row has no price, so nothing is left to train on
    let mut frame = prices_frame().structure();
    frame
        .add_row(vec![Cell::from(4.0), NA::NA, Cell::from("2024-03-01")])
        .unwrap();
    match adapter.build(&frame).unwrap_err() {
        Error::TrainingFailed { algorithm, message } => {
            assert_eq!(algorithm, "ridge_regression");
            assert!(message.contains("no training targets"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(!adapter.is_built());
    assert!(adapter.header().is_none());
    assert!(adapter.model().is_none());
}

#[test]
fn test_training_failures_pass_through() {
    let mut adapter = ModelAdapter::new(FixedCenters {
        config: KMeansConfig {
            num_clusters: 5,
            ..KMeansConfig::default()
        },
    });
    match adapter.build(&points_frame()).unwrap_err() {
        Error::TrainingFailed { algorithm, message } => {
            assert_eq!(algorithm, "kmeans");
            assert_eq!(message, "4 rows cannot seed 5 clusters");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_soft_distribution() {
    let mut adapter = built_classifier(NearestCentroid::full());
    let distribution = adapter
        .predict_distribution(&weather_row(0.0, "red", None))
        .unwrap();
    assert_eq!(distribution.len(), 2);
    assert!((distribution.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    assert!(distribution[0] > distribution[1]);
}

#[test]
fn test_hard_only_distribution_is_one_hot() {
    let mut adapter = built_classifier(NearestCentroid::hard_only());
    assert!(!adapter.model_capabilities().supports_distribution());
    assert_eq!(
        adapter
            .predict_distribution(&weather_row(10.0, "blue", None))
            .unwrap(),
        vec![0.0, 1.0]
    );

    let config = AdapterConfig {
        distribution_fallback: DistributionFallback::Error,
        ..AdapterConfig::default()
    };
    let mut strict = ModelAdapter::with_config(NearestCentroid::hard_only(), config);
    strict.build(&weather_frame()).unwrap();
    assert!(matches!(
        strict.predict_distribution(&weather_row(10.0, "blue", None)),
        Err(Error::UnsupportedOperation(_))
    ));
}

#[test]
fn test_regressor_predictions() {
    let mut adapter = ModelAdapter::new(MeanRegressor::default());
    assert_eq!(adapter.algorithm().kind(), ModelKind::Regressor);
    adapter.build(&prices_frame()).unwrap();

    let row = vec![Cell::from(5.0), NA::NA, Cell::from("2024-05-01")];
    assert_eq!(adapter.predict(&row).unwrap(), 150.0);
    assert_eq!(adapter.predict_label(&row).unwrap(), "150");
    assert!(matches!(
        adapter.predict_distribution(&row),
        Err(Error::UnsupportedOperation(_))
    ));
    assert!(matches!(
        adapter.number_of_clusters(),
        Err(Error::UnsupportedOperation(_))
    ));
}

#[test]
fn test_clusterer() {
    let mut adapter = ModelAdapter::new(FixedCenters::default());
    adapter.build(&points_frame()).unwrap();

    assert_eq!(adapter.number_of_clusters().unwrap(), 2);
    let row = vec![Cell::from(9.0), Cell::from("right")];
    assert_eq!(adapter.predict(&row).unwrap(), 1.0);
    assert!(matches!(
        adapter.predict_label(&row),
        Err(Error::UnsupportedOperation(_))
    ));
    assert_eq!(
        adapter.describe(),
        "kmeans -num-clusters 2 -max-iter 100 -runs 1\nPartitionModel"
    );
}

#[test]
fn test_missing_numeric_cells_are_not_errors() {
    let mut adapter = built_classifier(NearestCentroid::full());
    let row = vec![NA::NA, Cell::from("blue"), NA::NA];
    assert_eq!(adapter.predict(&row).unwrap(), 1.0);

    let mut header = adapter.header().unwrap().clone();
    let x = header.convert_row(&row).unwrap();
    assert!(x[0].is_nan());
    assert_eq!(x[1], 1.0);
}

#[test]
fn test_header_captures_training_schema() {
    let adapter = built_classifier(NearestCentroid::full());
    let mut header = adapter.header().unwrap().clone();
    assert_eq!(header.instances(), &weather_frame().structure());

    let data = header.dataset().unwrap();
    assert!(data.is_empty());
    assert_eq!(data.num_features(), 2);
    assert_eq!(data.response().unwrap().name(), "label");

    let (x, y) = header
        .convert_labelled_row(&weather_row(1.5, "blue", Some("no")))
        .unwrap();
    assert_eq!(x, vec![1.5, 1.0]);
    assert_eq!(y, 1.0);
}

#[test]
fn test_unseen_category_policy_at_prediction() {
    let mut strict = built_classifier(NearestCentroid::full());
    assert!(matches!(
        strict.predict(&weather_row(0.0, "green", None)),
        Err(Error::UnknownCategoryValue { .. })
    ));

    let config = AdapterConfig {
        unseen_category: UnseenCategoryPolicy::Missing,
        ..AdapterConfig::default()
    };
    let mut lenient = ModelAdapter::with_config(NearestCentroid::full(), config);
    lenient.build(&weather_frame()).unwrap();
    assert_eq!(
        lenient.predict(&weather_row(0.0, "green", None)).unwrap(),
        0.0
    );
}

#[test]
fn test_rows_with_missing_class_are_dropped() {
    let mut frame = weather_frame();
    frame.add_row(weather_row(5.0, "red", None)).unwrap();

    let mut adapter = ModelAdapter::new(NearestCentroid::full());
    adapter.build(&frame).unwrap();
    assert_eq!(adapter.model().unwrap().counts[0][0], 3);
    assert_eq!(adapter.header().unwrap().instances().num_rows(), 0);

    let config = AdapterConfig {
        drop_missing_class: false,
        ..AdapterConfig::default()
    };
    let mut keep = ModelAdapter::with_config(NearestCentroid::full(), config);
    assert!(matches!(
        keep.build(&frame),
        Err(Error::TrainingFailed { .. })
    ));
    assert!(!keep.is_built());
}

#[test]
fn test_rebuild_replaces_model() {
    let mut adapter = built_classifier(NearestCentroid::full());
    let mut frame = weather_frame().structure();
    frame
        .add_row(weather_row(3.0, "blue", Some("yes")))
        .unwrap();
    adapter.build(&frame).unwrap();
    // "no" was never observed, so every row is a "yes"
    assert_eq!(
        adapter
            .predict_label(&weather_row(10.0, "blue", None))
            .unwrap(),
        "yes"
    );
}
