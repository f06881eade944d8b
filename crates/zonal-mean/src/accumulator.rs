//! Running sums and sample counters of the zonal-mean grid.
//!
//! Each cell holds three independent groups: the primary group receives
//! every sample, the tropopause and convective groups only samples that pass
//! their validity gate. A group owns both its sums and its counter and only
//! changes through [`Group::add`] and [`Group::merge`], so a group with a
//! zero counter always has zero sums and a mean is never formed from another
//! group's counter.

use climatology::{nat_temperature, Climatology, Species};
use met_data::{Field2d, Field3d};

use crate::error::{Result, ZonalMeanError};
use crate::interpolation::MetSample;
use crate::thermo;

/// A fixed set of named values that can be summed and averaged.
pub trait Record: Copy + Default {
    /// Field-wise `self += other`.
    fn accumulate(&mut self, other: &Self);

    /// Field-wise `self / divisor`.
    fn divided(&self, divisor: f64) -> Self;

    /// Record with every field set to `value`.
    fn filled(value: f64) -> Self;
}

macro_rules! record {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[$fmeta:meta])* $field:ident ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: f64, )*
        }

        impl Record for $name {
            fn accumulate(&mut self, other: &Self) {
                $( self.$field += other.$field; )*
            }

            fn divided(&self, divisor: f64) -> Self {
                Self {
                    $( $field: self.$field / divisor, )*
                }
            }

            fn filled(value: f64) -> Self {
                Self {
                    $( $field: value, )*
                }
            }
        }
    };
}

record! {
    /// Values averaged over every sample of a cell.
    pub struct PrimarySample {
        /// Time [s since 2000-01-01]
        time,
        /// Longitude of the native column [deg]
        lon,
        /// Geopotential height [km]
        z,
        /// Temperature [K]
        t,
        /// Zonal wind [m/s]
        u,
        /// Meridional wind [m/s]
        v,
        /// Vertical velocity [hPa/s]
        w,
        /// Potential vorticity [PVU]
        pv,
        /// Water vapor [ppv]
        h2o,
        /// Ozone [ppv]
        o3,
        /// Cloud liquid water content [kg/kg]
        lwc,
        /// Cloud ice water content [kg/kg]
        iwc,
        /// Cloud cover [1]
        cc,
        /// Surface pressure [hPa]
        ps,
        /// Surface temperature [K]
        ts,
        /// Surface geopotential height [km]
        zs,
        /// Surface zonal wind [m/s]
        us,
        /// Surface meridional wind [m/s]
        vs,
        /// Land-sea mask [1]
        lsm,
        /// Sea surface temperature [K]
        sst,
        /// Boundary layer top pressure [hPa]
        pbl,
        /// Cloud top pressure [hPa]
        pct,
        /// Cloud bottom pressure [hPa]
        pcb,
        /// Total column cloud water [kg/m^2]
        cl,
        /// Total column ozone [DU]
        o3c,
        /// Relative humidity over water [%]
        rh,
        /// Relative humidity over ice [%]
        rhice,
        /// Dew point [K]
        tdew,
        /// Frost point [K]
        tice,
        /// NAT existence temperature [K]
        tnat,
        /// HNO3 [ppv]
        hno3,
        /// OH [molec/cm^3]
        oh,
        /// H2O2 [ppv]
        h2o2,
        /// HO2 [ppv]
        ho2,
        /// O(1D) [ppv]
        o1d,
    }
}

record! {
    /// Values averaged over samples with a defined tropopause.
    pub struct TropopauseSample {
        /// Tropopause pressure [hPa]
        pt,
        /// Tropopause geopotential height [km]
        zt,
        /// Tropopause temperature [K]
        tt,
        /// Tropopause water vapor [ppv]
        h2ot,
    }
}

record! {
    /// Values averaged over convective samples.
    pub struct ConvectiveSample {
        /// Lifted condensation level [hPa]
        plcl,
        /// Level of free convection [hPa]
        plfc,
        /// Equilibrium level [hPa]
        pel,
        /// Convective available potential energy [J/kg]
        cape,
        /// Convective inhibition [J/kg]
        cin,
    }
}

/// Sums of one gating class and their sample counter.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Group<S: Record> {
    sum: S,
    count: u64,
}

impl<S: Record> Group<S> {
    /// Add one sample.
    pub fn add(&mut self, sample: &S) {
        self.sum.accumulate(sample);
        self.count += 1;
    }

    /// Add another group's sums and counter.
    pub fn merge(&mut self, other: &Self) {
        self.sum.accumulate(&other.sum);
        self.count += other.count;
    }

    /// Number of samples.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Running sums.
    pub fn sum(&self) -> &S {
        &self.sum
    }

    /// Mean of all samples, `None` when there are none.
    pub fn mean(&self) -> Option<S> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum.divided(self.count as f64))
        }
    }
}

/// Validity gate of the convective group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvectiveGate {
    /// Minimum CAPE [J/kg].
    pub cape_min: f64,
    /// CIN must be below this limit [J/kg]; no limit when `None`.
    pub cin_max: Option<f64>,
}

impl Default for ConvectiveGate {
    fn default() -> Self {
        Self {
            cape_min: -999.0,
            cin_max: None,
        }
    }
}

impl ConvectiveGate {
    /// Whether `met` describes a convective state.
    pub fn admits(&self, met: &MetSample) -> bool {
        let levels_defined = [Field2d::Plcl, Field2d::Plfc, Field2d::Pel]
            .iter()
            .all(|&f| met.get2d(f).is_finite());
        let cin_ok = match self.cin_max {
            Some(limit) => met.get2d(Field2d::Cin) < limit,
            None => true,
        };
        levels_defined && met.get2d(Field2d::Cape) >= self.cape_min && cin_ok
    }
}

/// Climatological values at one query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimatologySample {
    pub hno3: f64,
    pub oh: f64,
    pub h2o2: f64,
    pub ho2: f64,
    pub o1d: f64,
    /// NAT existence temperature from the local H2O and climatological HNO3
    pub tnat: f64,
}

impl ClimatologySample {
    /// Evaluate the climatology at `(time, lon, lat, p)`.
    pub fn evaluate<C: Climatology + ?Sized>(
        clim: &C,
        point: &SamplePoint,
        lat: f64,
        h2o: f64,
    ) -> Self {
        let SamplePoint { time, lon, p } = *point;
        let hno3 = clim.zonal_mean(Species::Hno3, time, lat, p);
        Self {
            hno3,
            oh: clim.photochemical_oh(time, lon, lat, p),
            h2o2: clim.zonal_mean(Species::H2o2, time, lat, p),
            ho2: clim.zonal_mean(Species::Ho2, time, lat, p),
            o1d: clim.zonal_mean(Species::O1d, time, lat, p),
            tnat: nat_temperature(p, h2o, hno3),
        }
    }
}

/// Where a sample was taken: snapshot time, native column longitude and
/// output level pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub time: f64,
    pub lon: f64,
    pub p: f64,
}

/// Accumulation state of one (level, latitude) cell.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cell {
    pub primary: Group<PrimarySample>,
    pub tropopause: Group<TropopauseSample>,
    pub convective: Group<ConvectiveSample>,
}

impl Cell {
    /// Fold one interpolated sample into the cell.
    pub fn accumulate(
        &mut self,
        point: &SamplePoint,
        met: &MetSample,
        clim: &ClimatologySample,
        gate: &ConvectiveGate,
    ) {
        let p = point.p;
        let t = met.get3d(Field3d::T);
        let h2o = met.get3d(Field3d::H2o);

        self.primary.add(&PrimarySample {
            time: point.time,
            lon: point.lon,
            z: met.get3d(Field3d::Z),
            t,
            u: met.get3d(Field3d::U),
            v: met.get3d(Field3d::V),
            w: met.get3d(Field3d::W),
            pv: met.get3d(Field3d::Pv),
            h2o,
            o3: met.get3d(Field3d::O3),
            lwc: met.get3d(Field3d::Lwc),
            iwc: met.get3d(Field3d::Iwc),
            cc: met.get3d(Field3d::Cc),
            ps: met.get2d(Field2d::Ps),
            ts: met.get2d(Field2d::Ts),
            zs: met.get2d(Field2d::Zs),
            us: met.get2d(Field2d::Us),
            vs: met.get2d(Field2d::Vs),
            lsm: met.get2d(Field2d::Lsm),
            sst: met.get2d(Field2d::Sst),
            pbl: met.get2d(Field2d::Pbl),
            pct: met.get2d(Field2d::Pct),
            pcb: met.get2d(Field2d::Pcb),
            cl: met.get2d(Field2d::Cl),
            o3c: met.get2d(Field2d::O3c),
            rh: thermo::rh(p, t, h2o),
            rhice: thermo::rhice(p, t, h2o),
            tdew: thermo::tdew(p, h2o),
            tice: thermo::tice(p, h2o),
            tnat: clim.tnat,
            hno3: clim.hno3,
            oh: clim.oh,
            h2o2: clim.h2o2,
            ho2: clim.ho2,
            o1d: clim.o1d,
        });

        if met.get2d(Field2d::Pt).is_finite() {
            self.tropopause.add(&TropopauseSample {
                pt: met.get2d(Field2d::Pt),
                zt: met.get2d(Field2d::Zt),
                tt: met.get2d(Field2d::Tt),
                h2ot: met.get2d(Field2d::H2ot),
            });
        }

        if gate.admits(met) {
            self.convective.add(&ConvectiveSample {
                plcl: met.get2d(Field2d::Plcl),
                plfc: met.get2d(Field2d::Plfc),
                pel: met.get2d(Field2d::Pel),
                cape: met.get2d(Field2d::Cape),
                cin: met.get2d(Field2d::Cin),
            });
        }
    }

    /// Add another cell's groups.
    pub fn merge(&mut self, other: &Self) {
        self.primary.merge(&other.primary);
        self.tropopause.merge(&other.tropopause);
        self.convective.merge(&other.convective);
    }
}

/// Cells of the whole grid, indexed by (level, latitude bin).
#[derive(Debug, Clone, PartialEq)]
pub struct AccumulatorGrid {
    nz: usize,
    ny: usize,
    cells: Vec<Cell>,
}

impl AccumulatorGrid {
    /// Zero-initialized grid of `nz` levels and `ny` latitude bins.
    pub fn new(nz: usize, ny: usize) -> Self {
        Self {
            nz,
            ny,
            cells: vec![Cell::default(); nz * ny],
        }
    }

    /// Number of levels.
    pub fn nz(&self) -> usize {
        self.nz
    }

    /// Number of latitude bins.
    pub fn ny(&self) -> usize {
        self.ny
    }

    pub fn cell(&self, iz: usize, iy: usize) -> &Cell {
        &self.cells[iz * self.ny + iy]
    }

    pub fn cell_mut(&mut self, iz: usize, iy: usize) -> &mut Cell {
        &mut self.cells[iz * self.ny + iy]
    }

    /// Add every cell of `other`, which must have the same shape.
    pub fn merge(&mut self, other: &Self) -> Result<()> {
        if (self.nz, self.ny) != (other.nz, other.ny) {
            return Err(ZonalMeanError::invalid_grid(format!(
                "cannot merge a {}x{} grid into a {}x{} grid",
                other.nz, other.ny, self.nz, self.ny
            )));
        }
        for (cell, other) in self.cells.iter_mut().zip(&other.cells) {
            cell.merge(other);
        }
        Ok(())
    }

    /// Total number of primary samples over all cells.
    pub fn total_samples(&self) -> u64 {
        self.cells.iter().map(|c| c.primary.count()).sum()
    }
}
