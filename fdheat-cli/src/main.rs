mod ic;
mod report;

use clap::Parser;
use fdheat_core::{
    GridParameters, LENGTH_T, LENGTH_X, Profile, Scheme, SimConfig, Simulation, StabilityCurves,
    snap_cells,
};
use ic::{IcType, MethodType};
use log::info;
use report::Record;
use std::io::{self, BufWriter, Write};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Number of grid cells; snapped to a power of two in [32, 256]
    #[arg(long, default_value_t = 32)]
    cells: usize,

    /// Number of time steps over the horizon, clamped to [1, 1000]
    #[arg(long, default_value_t = 100)]
    nt: usize,

    /// Initial temperature profile
    #[arg(long, value_enum, default_value_t = IcType::Gauss)]
    profile: IcType,

    /// Time-integration scheme
    #[arg(long, value_enum, default_value_t = MethodType::Explicit)]
    scheme: MethodType,

    /// Length of the spatial domain
    #[arg(long, default_value_t = LENGTH_X)]
    length_x: f64,

    /// Integration horizon
    #[arg(long, default_value_t = LENGTH_T)]
    length_t: f64,

    /// Print grid and stability curves without running the solver
    #[arg(long)]
    curves_only: bool,

    /// Debug logging on stderr (RUST_LOG otherwise)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn sim_config(&self) -> SimConfig {
        SimConfig {
            length_x: self.length_x,
            length_t: self.length_t,
            ..SimConfig::from_cells(self.cells, self.nt, Profile::from(self.profile))
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if args.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    if snap_cells(args.cells) != args.cells {
        info!("cells={} snapped to {}", args.cells, snap_cells(args.cells));
    }

    let scheme = Scheme::from(args.scheme);
    let config = args.sim_config();
    let profile = config.profile;
    let mut sim = Simulation::new(config, scheme)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    write_header(&mut out, sim.grid(), scheme, profile)?;

    if args.curves_only {
        out.flush()?;
        return Ok(());
    }

    let x = sim.grid().coordinates();
    let mut write_err = None;
    let outcome = sim.run(|snapshot| {
        if write_err.is_none() {
            if let Err(e) = write_record(&mut out, &Record::snapshot(snapshot, &x)) {
                write_err = Some(e);
            }
        }
    });
    if let Some(e) = write_err {
        return Err(e.into());
    }

    write_record(
        &mut out,
        &Record::finished(outcome, sim.steps_taken(), sim.elapsed()),
    )?;
    out.flush()?;

    Ok(())
}

/// Grid record followed by one curves record per scheme, so all three can be
/// compared for the same alpha.
fn write_header<W: Write>(
    w: &mut W,
    grid: &GridParameters,
    scheme: Scheme,
    profile: Profile,
) -> io::Result<()> {
    write_record(w, &Record::grid(grid, scheme.as_str(), profile.as_str()))?;
    for s in Scheme::ALL {
        let curves = StabilityCurves::compute(s, grid.alpha(), grid.nx() / 2 + 1);
        write_record(w, &Record::curves(&curves))?;
    }
    Ok(())
}

fn write_record<W: Write>(w: &mut W, record: &Record<'_>) -> io::Result<()> {
    serde_json::to_writer(&mut *w, record)?;
    w.write_all(b"\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_map_onto_config() {
        let args = Args::parse_from([
            "fdheat",
            "--cells",
            "100",
            "--nt",
            "5000",
            "--profile",
            "super-gauss",
            "--scheme",
            "crank-nicolson",
        ]);
        let cfg = args.sim_config();
        assert_eq!(cfg.nx, 129);
        assert_eq!(cfg.nt, 1000);
        assert_eq!(cfg.profile, Profile::SuperGauss);
        assert_eq!(cfg.length_x, LENGTH_X);
        assert_eq!(Scheme::from(args.scheme), Scheme::CrankNicolson);
    }

    #[test]
    fn defaults_give_default_config() {
        let args = Args::parse_from(["fdheat"]);
        assert_eq!(args.sim_config(), SimConfig::default());
    }

    #[test]
    fn header_lists_curves_for_every_scheme() {
        let grid = SimConfig::default().grid().unwrap();
        let mut buf = Vec::new();
        write_header(&mut buf, &grid, Scheme::Implicit, Profile::Gauss).unwrap();

        let records: Vec<serde_json::Value> = String::from_utf8(buf)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0]["record"], "grid");
        assert_eq!(records[0]["scheme"], "implicit");
        let schemes: Vec<&str> = records[1..]
            .iter()
            .map(|r| r["scheme"].as_str().unwrap())
            .collect();
        assert_eq!(schemes, vec!["explicit", "implicit", "crank-nicolson"]);
        assert!(records[1..].iter().all(|r| r["xi"].as_array().unwrap().len() == 17));
    }

    #[test]
    fn records_are_newline_delimited() {
        let mut buf = Vec::new();
        write_record(&mut buf, &Record::finished(fdheat_core::RunOutcome::Completed, 1, 1.0)).unwrap();
        assert!(buf.ends_with(b"\n"));
        assert_eq!(buf.iter().filter(|&&b| b == b'\n').count(), 1);
    }
}
