//! Text table output.
//!
//! One `#` header line per column, then one block per level (preceded by a
//! blank line) with one row per latitude bin. Means of groups without
//! samples are written as `nan`.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::accumulator::{AccumulatorGrid, Cell, Group, Record};
use crate::error::Result;
use crate::grid::ZonalGrid;

/// Column descriptions in output order.
pub const COLUMNS: [&str; 50] = [
    "time [s]",
    "altitude [km]",
    "longitude [deg]",
    "latitude [deg]",
    "pressure [hPa]",
    "temperature [K]",
    "zonal wind [m/s]",
    "meridional wind [m/s]",
    "vertical velocity [hPa/s]",
    "H2O volume mixing ratio [ppv]",
    "O3 volume mixing ratio [ppv]",
    "geopotential height [km]",
    "potential vorticity [PVU]",
    "surface pressure [hPa]",
    "surface temperature [K]",
    "surface geopotential height [km]",
    "surface zonal wind [m/s]",
    "surface meridional wind [m/s]",
    "land-sea mask [1]",
    "sea surface temperature [K]",
    "tropopause pressure [hPa]",
    "tropopause geopotential height [km]",
    "tropopause temperature [K]",
    "tropopause water vapor [ppv]",
    "cloud liquid water content [kg/kg]",
    "cloud ice water content [kg/kg]",
    "cloud cover [1]",
    "total column cloud water [kg/m^2]",
    "cloud top pressure [hPa]",
    "cloud bottom pressure [hPa]",
    "pressure at lifted condensation level (LCL) [hPa]",
    "pressure at level of free convection (LFC) [hPa]",
    "pressure at equilibrium level (EL) [hPa]",
    "convective available potential energy (CAPE) [J/kg]",
    "convective inhibition (CIN) [J/kg]",
    "relative humidity over water [%]",
    "relative humidity over ice [%]",
    "dew point temperature [K]",
    "frost point temperature [K]",
    "NAT temperature [K]",
    "HNO3 volume mixing ratio [ppv]",
    "OH concentration [molec/cm^3]",
    "H2O2 volume mixing ratio [ppv]",
    "HO2 volume mixing ratio [ppv]",
    "O(1D) volume mixing ratio [ppv]",
    "boundary layer pressure [hPa]",
    "total column ozone [DU]",
    "number of data points",
    "number of tropopause data points",
    "number of CAPE data points",
];

/// Significant digits of `%g` formatting.
const G_PRECISION: usize = 6;

/// Format like C's `%g`: six significant digits, trailing zeros removed,
/// scientific notation for very small or large magnitudes.
pub fn format_g(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // Decimal exponent after rounding to the target precision
    let sci = format!("{:.*e}", G_PRECISION - 1, value);
    let (mantissa, exponent) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exponent < -4 || exponent >= G_PRECISION as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            strip_zeros(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (G_PRECISION as i32 - 1 - exponent) as usize;
        strip_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// Format like C's `%.2f`.
pub fn format_fixed2(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "inf" } else { "-inf" }.to_string()
    } else {
        format!("{:.2}", value)
    }
}

fn strip_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Write the header and every cell mean.
pub fn write_table<W: Write>(
    out: &mut W,
    grid: &ZonalGrid,
    accumulators: &AccumulatorGrid,
) -> io::Result<()> {
    for (i, column) in COLUMNS.iter().enumerate() {
        writeln!(out, "# ${} = {}", i + 1, column)?;
    }

    for iz in 0..grid.nz() {
        writeln!(out)?;
        for iy in 0..grid.ny() {
            let row = format_row(grid, iz, iy, accumulators.cell(iz, iy));
            writeln!(out, "{}", row)?;
        }
    }

    Ok(())
}

/// Write the table to `path`.
pub fn write_table_file(
    path: &Path,
    grid: &ZonalGrid,
    accumulators: &AccumulatorGrid,
) -> Result<()> {
    info!(file = %path.display(), "Writing zonal-mean table");
    let mut out = BufWriter::new(File::create(path)?);
    write_table(&mut out, grid, accumulators)?;
    out.flush()?;
    Ok(())
}

fn mean_or_nan<S: Record>(group: &Group<S>) -> S {
    group.mean().unwrap_or_else(|| S::filled(f64::NAN))
}

fn format_row(grid: &ZonalGrid, iz: usize, iy: usize, cell: &Cell) -> String {
    let m = mean_or_nan(&cell.primary);
    let t = mean_or_nan(&cell.tropopause);
    let c = mean_or_nan(&cell.convective);

    let values = [
        grid.altitude(iz),
        m.lon,
        grid.lats[iy],
        grid.pressures[iz],
        m.t,
        m.u,
        m.v,
        m.w,
        m.h2o,
        m.o3,
        m.z,
        m.pv,
        m.ps,
        m.ts,
        m.zs,
        m.us,
        m.vs,
        m.lsm,
        m.sst,
        t.pt,
        t.zt,
        t.tt,
        t.h2ot,
        m.lwc,
        m.iwc,
        m.cc,
        m.cl,
        m.pct,
        m.pcb,
        c.plcl,
        c.plfc,
        c.pel,
        c.cape,
        c.cin,
        m.rh,
        m.rhice,
        m.tdew,
        m.tice,
        m.tnat,
        m.hno3,
        m.oh,
        m.h2o2,
        m.ho2,
        m.o1d,
        m.pbl,
        m.o3c,
    ];

    let mut row = format_fixed2(m.time);
    for value in values {
        row.push(' ');
        row.push_str(&format_g(value));
    }
    for count in [
        cell.primary.count(),
        cell.tropopause.count(),
        cell.convective.count(),
    ] {
        row.push(' ');
        row.push_str(&count.to_string());
    }
    row
}
