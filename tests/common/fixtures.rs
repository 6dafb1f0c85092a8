//! Host frames shared by the integration tests

use tabular_bridge::frame::{Cell, HostColumn, HostFrame};
use tabular_bridge::NA;

/// Two separable classes over a numeric and a nominal feature
pub fn weather_frame() -> HostFrame {
    let mut frame = HostFrame::new(
        "weather",
        vec![
            HostColumn::numeric("x"),
            HostColumn::nominal("color", ["red", "blue"]),
            HostColumn::nominal("label", ["yes", "no"]),
        ],
    );
    frame.set_class_by_name("label").unwrap();
    let rows = [
        (0.0, "red", "yes"),
        (0.5, "red", "yes"),
        (1.0, "red", "yes"),
        (9.0, "blue", "no"),
        (10.0, "blue", "no"),
        (11.0, "blue", "no"),
    ];
    for (x, color, label) in rows {
        frame
            .add_row(vec![Cell::from(x), Cell::from(color), Cell::from(label)])
            .unwrap();
    }
    frame
}

/// A host row typed by [`weather_frame`]
pub fn weather_row(x: f64, color: &str, label: Option<&str>) -> Vec<Cell> {
    vec![
        Cell::from(x),
        Cell::from(color),
        label.map(Cell::from).unwrap_or(NA::NA),
    ]
}

/// Numeric response in the middle column
pub fn prices_frame() -> HostFrame {
    let mut frame = HostFrame::new(
        "prices",
        vec![
            HostColumn::numeric("rooms"),
            HostColumn::numeric("price"),
            HostColumn::date("listed", "%Y-%m-%d"),
        ],
    );
    frame.set_class_index(Some(1)).unwrap();
    for (rooms, price, listed) in [(2.0, 100.0, "2024-01-01"), (3.0, 200.0, "2024-02-01")] {
        frame
            .add_row(vec![Cell::from(rooms), Cell::from(price), Cell::from(listed)])
            .unwrap();
    }
    frame
}

/// Unlabelled points in two groups
pub fn points_frame() -> HostFrame {
    let mut frame = HostFrame::new(
        "points",
        vec![
            HostColumn::numeric("a"),
            HostColumn::nominal("side", ["left", "right"]),
        ],
    );
    for (a, side) in [(0.0, "left"), (10.0, "right"), (0.5, "left"), (9.5, "right")] {
        frame
            .add_row(vec![Cell::from(a), Cell::from(side)])
            .unwrap();
    }
    frame
}
