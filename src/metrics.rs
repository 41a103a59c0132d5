use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_writer::ArrowWriter;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use crate::search::SolveOutcome;
use crate::types::Distance;

/// One convergence sample of one solver run.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceRecord {
    pub solver: String,
    pub run: usize,
    pub step: usize,
    pub best_distance: Distance,
}

impl TraceRecord {
    /// Flattens the trace of an outcome into records.
    pub fn from_outcome(solver: &str, run: usize, outcome: &SolveOutcome) -> Vec<TraceRecord> {
        outcome
            .trace
            .iter()
            .enumerate()
            .map(|(step, &best_distance)| TraceRecord {
                solver: solver.to_string(),
                run,
                step,
                best_distance,
            })
            .collect()
    }
}

pub fn serialize_to_parquet(
    records: &[TraceRecord],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let solvers: StringArray = records.iter().map(|r| Some(r.solver.as_str())).collect();
    let runs: Int64Array = records.iter().map(|r| r.run as i64).collect();
    let steps: Int64Array = records.iter().map(|r| r.step as i64).collect();
    let best_distances: Float64Array = records.iter().map(|r| r.best_distance).collect();

    let schema = Schema::new(vec![
        Field::new("solver", DataType::Utf8, false),
        Field::new("run", DataType::Int64, false),
        Field::new("step", DataType::Int64, false),
        Field::new("best_distance", DataType::Float64, false),
    ]);

    let batch = RecordBatch::try_new(
        Arc::new(schema),
        vec![
            Arc::new(solvers),
            Arc::new(runs),
            Arc::new(steps),
            Arc::new(best_distances),
        ],
    )?;

    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;

    Ok(())
}
