use anyhow::Context;
use std::path::PathBuf;
use tracing::{debug, info};
use wsbound_core::{
    BoundStateReport, BoundStateResult, BoundStateSolver, GridSpec, PhysicalConstants,
    PotentialParams, QuantumLabel,
};

/// Well, grid, and kinematics flags shared by every subcommand.
#[derive(clap::Args)]
pub(super) struct WellArgs {
    /// Well depth V0 in MeV
    #[arg(long, default_value_t = 50.0, allow_negative_numbers = true)]
    depth: f64,

    /// Well radius R0 in fm
    #[arg(long, default_value_t = 1.5, allow_negative_numbers = true)]
    radius: f64,

    /// Surface diffuseness a0 in fm
    #[arg(long, default_value_t = 0.6, allow_negative_numbers = true)]
    diffuseness: f64,

    /// Particle pair fixing the reduced mass
    #[arg(long, value_enum, default_value_t = Pair::Np)]
    pair: Pair,

    /// Explicit reduced mass in MeV, overriding --pair
    #[arg(long, allow_negative_numbers = true)]
    reduced_mass: Option<f64>,

    /// Outer grid radius in fm
    #[arg(long, default_value_t = GridSpec::DEFAULT_R_MAX_FM, allow_negative_numbers = true)]
    r_max: f64,

    /// Grid step in fm
    #[arg(long, default_value_t = GridSpec::DEFAULT_STEP_FM, allow_negative_numbers = true)]
    step: f64,
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub(super) enum Pair {
    /// Neutron-proton (deuteron-like)
    Np,
    /// Alpha-neutron (helium-5-like)
    AlphaN,
    /// Neutron on an oxygen-16 core
    #[value(name = "n-o16")]
    NO16,
}

impl WellArgs {
    fn potential(&self) -> anyhow::Result<PotentialParams> {
        PotentialParams::new(self.depth, self.radius, self.diffuseness)
            .context("invalid well parameters")
    }

    fn constants(&self) -> anyhow::Result<PhysicalConstants> {
        match self.reduced_mass {
            Some(reduced_mass_mev) => PhysicalConstants::from_reduced_mass(reduced_mass_mev)
                .context("invalid reduced mass"),
            None => Ok(match self.pair {
                Pair::Np => PhysicalConstants::neutron_proton(),
                Pair::AlphaN => PhysicalConstants::alpha_neutron(),
                Pair::NO16 => PhysicalConstants::neutron_oxygen16(),
            }),
        }
    }

    fn grid(&self) -> anyhow::Result<GridSpec> {
        GridSpec::new(self.r_max, self.step).context("invalid radial grid")
    }
}

#[derive(clap::Args)]
pub(super) struct SolveArgs {
    #[command(flatten)]
    well: WellArgs,

    /// Orbital angular momentum l
    #[arg(long, default_value_t = 0)]
    l: u32,

    /// Requested interior node count
    #[arg(long, default_value_t = 0)]
    nodes: u32,

    /// Write the full JSON report to this path
    #[arg(long)]
    json: Option<PathBuf>,
}

pub(super) fn run_solve(args: SolveArgs) -> anyhow::Result<i32> {
    let potential = args.well.potential()?;
    let constants = args.well.constants()?;
    let grid = args.well.grid()?;
    let label = QuantumLabel::new(args.nodes, args.l);

    info!(
        depth_mev = potential.depth_mev(),
        radius_fm = potential.radius_fm(),
        reduced_mass_mev = constants.reduced_mass_mev(),
        %label,
        "solving bound state"
    );

    let solver = BoundStateSolver::new(constants);
    let result = solver.solve(&potential, label, grid)?;
    print_state_line(&result);
    for warning in &result.diagnostics.warnings {
        eprintln!("warning: {}", warning);
    }

    if let Some(path) = &args.json {
        write_report(path, &serde_json::to_value(BoundStateReport::from(&result))?)?;
        debug!(path = %path.display(), "wrote JSON report");
    }

    Ok(if result.converged { 0 } else { 1 })
}

#[derive(clap::Args)]
pub(super) struct SpectrumArgs {
    #[command(flatten)]
    well: WellArgs,

    /// Orbital angular momentum l
    #[arg(long, default_value_t = 0)]
    l: u32,

    /// Upper limit on enumerated node counts
    #[arg(long, default_value_t = 10)]
    max_nodes: u32,

    /// Write all converged states as a JSON array to this path
    #[arg(long)]
    json: Option<PathBuf>,
}

/// Walk node counts upward until a state fails to converge; in a finite well
/// the spectrum is ordered by node count, so the first miss ends it.
pub(super) fn run_spectrum(args: SpectrumArgs) -> anyhow::Result<i32> {
    let potential = args.well.potential()?;
    let constants = args.well.constants()?;
    let grid = args.well.grid()?;
    let solver = BoundStateSolver::new(constants);

    let mut reports = Vec::new();
    for nodes in 0..=args.max_nodes {
        let label = QuantumLabel::new(nodes, args.l);
        let result = solver.solve(&potential, label, grid)?;
        if !result.converged {
            debug!(%label, "spectrum ends: state did not converge");
            break;
        }
        print_state_line(&result);
        reports.push(serde_json::to_value(BoundStateReport::from(&result))?);
    }

    if reports.is_empty() {
        println!("no bound states found for l = {}", args.l);
    }
    if let Some(path) = &args.json {
        write_report(path, &serde_json::Value::Array(reports.clone()))?;
    }

    Ok(if reports.is_empty() { 1 } else { 0 })
}

fn print_state_line(result: &BoundStateResult) {
    let status = if result.converged {
        "converged"
    } else {
        "not converged"
    };
    println!(
        "{}: E = {:.4} MeV ({}, boundary {:.3e}, nodes {})",
        result.label,
        result.energy_mev,
        status,
        result.boundary_value,
        result.node_count
    );
}

fn write_report(path: &PathBuf, value: &serde_json::Value) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating report directory {}", parent.display()))?;
    }
    let rendered = serde_json::to_string_pretty(value)?;
    std::fs::write(path, rendered)
        .with_context(|| format!("writing report to {}", path.display()))
}
