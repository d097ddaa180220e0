use std::env;
use clap::Parser;
use log::info;
use saxshell_pdb::{load_pdb, ResidueStorage};
use saxshell_scatter::{CompositeHistogram, HistogramManagerChoice, Molecule, RuntimeOptions};
use saxshell_fitter::{SaxsData, SmartFitter};

#[derive(Parser, Debug)]
#[clap(name = "saxs_fit", version, author)]
#[clap(about = "Fit the scattering curve of a structure against a SAXS measurement", long_about = None)]
struct Args {
    /// input structure in the PDB format
    #[clap(short = 'i', long, required = true)]
    structure: String,
    /// measurement file with columns (q, I, sigma)
    #[clap(short = 'm', long, required = true)]
    measurement: String,
    /// folder for all produced files
    #[clap(short = 'o', long, default_value = "output/")]
    output: String,
    /// lower bound of the momentum transfer range, in 1/A
    #[clap(long, default_value = "1e-4")]
    qmin: f64,
    /// upper bound of the momentum transfer range, in 1/A
    #[clap(long, default_value = "0.5")]
    qmax: f64,
    /// histogram manager: simple, partial, partial-ff, partial-symmetry, foxs or crysol
    #[clap(long, default_value = "partial")]
    manager: String,
    /// number of worker threads; zero means hardware concurrency
    #[clap(short = 't', long, default_value = "0")]
    threads: usize,
    /// don't fold implicit hydrogens into the heavy atoms
    #[clap(long, action)]
    no_implicit_hydrogens: bool,
    /// also write the pair-distance distribution next to the intensity curve
    #[clap(long, action)]
    supplementary_plots: bool,
    /// be more verbose and log program actions on the screen
    #[clap(short = 'v', long, action)]
    verbose: bool,
}

fn manager_choice(name: &str) -> HistogramManagerChoice {
    match name {
        "simple" => HistogramManagerChoice::Simple,
        "partial" => HistogramManagerChoice::Partial,
        "partial-ff" => HistogramManagerChoice::PartialFF,
        "partial-symmetry" => HistogramManagerChoice::PartialSymmetry,
        "foxs" => HistogramManagerChoice::FoXS,
        "crysol" => HistogramManagerChoice::Crysol,
        other => {
            eprintln!("unknown histogram manager '{}', falling back to 'partial'", other);
            HistogramManagerChoice::Partial
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    unsafe {
        if env::var("RUST_LOG").is_err() { env::set_var("RUST_LOG", "info") }
        if args.verbose { env::set_var("RUST_LOG", "debug"); }
    }
    env_logger::init();

    if args.threads > 0 {
        rayon::ThreadPoolBuilder::new().num_threads(args.threads).build_global()?;
    }

    let mut options = RuntimeOptions::default();
    options.axes.q_min = args.qmin;
    options.axes.q_max = args.qmax;
    options.hist.manager_choice = manager_choice(&args.manager);
    options.molecule.implicit_hydrogens = !args.no_implicit_hydrogens;
    options.general.output = args.output.clone();
    options.general.verbose = args.verbose;
    options.general.threads = args.threads;
    options.general.supplementary_plots = args.supplementary_plots;

    std::fs::create_dir_all(&args.output)?;
    let strctr = load_pdb(&args.structure)?;
    info!("{} atoms loaded from {}", strctr.count_atoms(), args.structure);

    let mut residues = ResidueStorage::new(&format!("{}/residues", args.output));
    let mut molecule = Molecule::from_structure(&strctr, &mut residues, options);

    let data = SaxsData::from_file(&args.measurement, args.qmin, args.qmax)?;
    let mut fitter = SmartFitter::new(data, molecule.histogram_all());
    let fit = fitter.fit();

    print!("{}", fit);
    fit.write_report(&format!("{}/fit.txt", args.output))?;

    let mut model = molecule.histogram_all();
    if let Some(c) = fit.parameter("c") { model.apply_water_scaling_factor(c.value); }
    if let Some(cx) = fit.parameter("cx") { model.apply_excluded_volume_scaling_factor(cx.value); }
    let curve = model.debye_transform();
    curve.write(&format!("{}/intensity.dat", args.output))?;
    info!("model intensity written to {}/intensity.dat", args.output);

    if args.supplementary_plots {
        use std::io::Write;
        let hist = molecule.histogram();
        let mut writer = saxshell_io::out_writer(&format!("{}/distances.dat", args.output), false);
        writeln!(writer, "# d [A]         P(d)")?;
        for (d, p) in hist.d().iter().zip(hist.p().iter()) {
            writeln!(writer, "{:<12.4} {:14.6e}", d, p)?;
        }
        info!("distance distribution written to {}/distances.dat", args.output);
    }

    return Ok(());
}
