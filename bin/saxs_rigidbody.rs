use std::env;
use clap::Parser;
use log::info;
use saxshell_pdb::{load_pdb, ResidueStorage};
use saxshell_scatter::{Body, Molecule, RuntimeOptions, Water};
use saxshell_fitter::SaxsData;
use saxshell_rigidbody::{BodySelectorChoice, ConstraintGenerationChoice, ParameterStrategyChoice,
                         RigidBody, RigidBodyOptions, TransformStrategyChoice};

#[derive(Parser, Debug)]
#[clap(name = "saxs_rigidbody", version, author)]
#[clap(about = "Rigid-body optimisation of a multi-body assembly against a SAXS measurement", long_about = None)]
struct Args {
    /// input structures in the PDB format, one rigid body each
    #[clap(short = 'i', long, required = true, num_args = 1..)]
    structures: Vec<String>,
    /// measurement file with columns (q, I, sigma)
    #[clap(short = 'm', long, required = true)]
    measurement: String,
    /// folder for all produced files
    #[clap(short = 'o', long, default_value = "output/")]
    output: String,
    /// number of optimisation iterations
    #[clap(short = 'n', long, default_value = "100")]
    iterations: usize,
    /// body selector: random-body, random-constraint or sequential
    #[clap(long, default_value = "random-body")]
    selector: String,
    /// transform strategy: single or rigid
    #[clap(long, default_value = "single")]
    transform: String,
    /// parameter strategy: simple, rotations-only or translations-only
    #[clap(long, default_value = "simple")]
    parameters: String,
    /// constraint generation: none or linear
    #[clap(long, default_value = "none")]
    constraints: String,
    /// largest allowed constraint length at construction, in A
    #[clap(long, default_value = "4.0")]
    bond_distance: f64,
    /// number of worker threads; zero means hardware concurrency
    #[clap(short = 't', long, default_value = "0")]
    threads: usize,
    /// be more verbose and log program actions on the screen
    #[clap(short = 'v', long, action)]
    verbose: bool,
}

fn rigid_body_options(args: &Args) -> RigidBodyOptions {
    let mut options = RigidBodyOptions::default();
    options.iterations = args.iterations;
    options.bond_distance = args.bond_distance;
    options.body_selector = match args.selector.as_str() {
        "random-constraint" => BodySelectorChoice::RandomConstraint,
        "sequential" => BodySelectorChoice::Sequential,
        _ => BodySelectorChoice::RandomBody,
    };
    options.transform_strategy = match args.transform.as_str() {
        "rigid" => TransformStrategyChoice::Rigid,
        _ => TransformStrategyChoice::Single,
    };
    options.parameter_strategy = match args.parameters.as_str() {
        "rotations-only" => ParameterStrategyChoice::RotationsOnly,
        "translations-only" => ParameterStrategyChoice::TranslationsOnly,
        _ => ParameterStrategyChoice::Simple,
    };
    options.constraint_generation_strategy = match args.constraints.as_str() {
        "linear" => ConstraintGenerationChoice::Linear,
        _ => ConstraintGenerationChoice::None,
    };
    return options;
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
    options.general.output = args.output.clone();
    options.general.verbose = args.verbose;
    options.general.threads = args.threads;
    std::fs::create_dir_all(&args.output)?;

    let mut residues = ResidueStorage::new(&format!("{}/residues", args.output));
    let mut bodies: Vec<Body> = Vec::new();
    let mut waters: Vec<Water> = Vec::new();
    for file_name in &args.structures {
        let strctr = load_pdb(file_name)?;
        let body = Body::from_structure(&strctr, &mut residues, options.molecule.implicit_hydrogens);
        info!("body of {} atoms loaded from {}", body.len(), file_name);
        waters.extend(strctr.waters().iter().map(|a| Water::from_pdb_atom(a)));
        bodies.push(body);
    }

    let mut molecule = Molecule::from_bodies(bodies, options);
    if !waters.is_empty() { molecule.set_waters(waters); }

    let data = SaxsData::from_file(&args.measurement, 1e-4, 0.5)?;
    let mut rigidbody = RigidBody::new(molecule, rigid_body_options(&args))?;
    let fit = rigidbody.optimize(data)?;

    print!("{}", fit);
    return Ok(());
}
