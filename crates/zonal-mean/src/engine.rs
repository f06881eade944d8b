//! The aggregation loop over snapshots.

use std::io::Write;
use std::path::Path;

use climatology::Climatology;
use met_data::{Field3d, Snapshot, SnapshotReader};
use tracing::{debug, info, warn};

use crate::accumulator::{AccumulatorGrid, ClimatologySample, ConvectiveGate, SamplePoint};
use crate::config::ZonalMeanConfig;
use crate::error::{Result, ZonalMeanError};
use crate::grid::{GridBuilder, ZonalGrid};
use crate::interpolation::interpolate_all;
use crate::output;

/// Streams snapshots into the zonal-mean accumulators.
///
/// The grid is built from the first processed snapshot and then kept for
/// the rest of the run.
pub struct ZonalMeanEngine<'a, C: Climatology + ?Sized> {
    config: &'a ZonalMeanConfig,
    climatology: &'a C,
    gate: ConvectiveGate,
    state: Option<ZonalMean>,
    snapshots: usize,
}

impl<'a, C: Climatology + ?Sized> ZonalMeanEngine<'a, C> {
    pub fn new(config: &'a ZonalMeanConfig, climatology: &'a C) -> Self {
        Self {
            config,
            climatology,
            gate: config.convective_gate(),
            state: None,
            snapshots: 0,
        }
    }

    /// Output grid, once the first snapshot has been processed.
    pub fn grid(&self) -> Option<&ZonalGrid> {
        self.state.as_ref().map(|s| &s.grid)
    }

    /// Number of snapshots folded in so far.
    pub fn snapshots_processed(&self) -> usize {
        self.snapshots
    }

    /// Fold one snapshot into the accumulators.
    ///
    /// Visits the native longitudes inside the configured band, then every
    /// latitude bin and level of the grid.
    pub fn process_snapshot(&mut self, snapshot: &Snapshot) -> Result<()> {
        let ZonalMean { grid, accumulators } = match &mut self.state {
            Some(state) => state,
            None => {
                let grid = GridBuilder::new(self.config).build(snapshot)?;
                let accumulators = AccumulatorGrid::new(grid.nz(), grid.ny());
                self.state.insert(ZonalMean { grid, accumulators })
            }
        };

        let mut columns = 0;
        for &lon in snapshot.lon.iter().filter(|&&lon| grid.contains_lon(lon)) {
            columns += 1;
            for (iy, &lat) in grid.lats.iter().enumerate() {
                for (iz, &p) in grid.pressures.iter().enumerate() {
                    let met = interpolate_all(snapshot, p, lon, lat);
                    let point = SamplePoint {
                        time: snapshot.time,
                        lon,
                        p,
                    };
                    let clim = ClimatologySample::evaluate(
                        self.climatology,
                        &point,
                        lat,
                        met.get3d(Field3d::H2o),
                    );
                    accumulators
                        .cell_mut(iz, iy)
                        .accumulate(&point, &met, &clim, &self.gate);
                }
            }
        }

        self.snapshots += 1;
        debug!(
            time = snapshot.time,
            datetime = ?snapshot.datetime(),
            columns,
            "Processed snapshot"
        );
        Ok(())
    }

    /// Read and process each file in order.
    ///
    /// Files that cannot be read are logged and skipped. Returns the number
    /// of files processed.
    pub fn process_files<R, P>(&mut self, reader: &R, paths: &[P]) -> Result<usize>
    where
        R: SnapshotReader + ?Sized,
        P: AsRef<Path>,
    {
        let mut processed = 0;
        for path in paths {
            let path = path.as_ref();
            let snapshot = match reader.read(path) {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "Skipping unreadable meteorological file");
                    continue;
                }
            };
            debug!(file = %path.display(), "Read meteorological file");
            self.process_snapshot(&snapshot)?;
            processed += 1;
        }

        info!(
            processed,
            skipped = paths.len() - processed,
            "Finished reading meteorological files"
        );
        Ok(processed)
    }

    /// Finish the run. Fails when no snapshot has been processed.
    pub fn finish(self) -> Result<ZonalMean> {
        self.state.ok_or(ZonalMeanError::NoSnapshot)
    }
}

/// Final grid and accumulators of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct ZonalMean {
    pub grid: ZonalGrid,
    pub accumulators: AccumulatorGrid,
}

impl ZonalMean {
    /// Add the accumulators of another run over the same grid.
    pub fn merge(&mut self, other: &Self) -> Result<()> {
        if self.grid != other.grid {
            return Err(ZonalMeanError::invalid_grid(
                "cannot merge runs with different grids",
            ));
        }
        self.accumulators.merge(&other.accumulators)
    }

    /// Write the text table.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        output::write_table(out, &self.grid, &self.accumulators)?;
        Ok(())
    }

    /// Write the text table to a file.
    pub fn write(&self, path: &Path) -> Result<()> {
        output::write_table_file(path, &self.grid, &self.accumulators)
    }
}
