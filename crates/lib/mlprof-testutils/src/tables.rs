use mlprof_core::batch::{BatchSize, BatchSizes};
use mlprof_core::table::MeasurementTable;

pub const TOLERANCE: f64 = 1e-9;

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {} but got {}",
        expected,
        actual
    );
}

pub fn table_from_rows(rows: &[(u64, f64)]) -> MeasurementTable {
    rows.iter()
        .map(|(size, runtime)| (BatchSize::from(*size), *runtime))
        .collect()
}

/// Three runtimes for batch size 16 and a single one for batch size 32.
pub fn scenario_rows() -> Vec<(u64, f64)> {
    vec![(16, 10.0), (16, 12.0), (16, 14.0), (32, 20.0)]
}

pub fn scenario_table() -> MeasurementTable {
    table_from_rows(&scenario_rows())
}

pub fn batch_sizes(sizes: &[u64]) -> BatchSizes {
    BatchSizes::try_from(sizes.to_vec()).expect("invalid batch sizes in test")
}
