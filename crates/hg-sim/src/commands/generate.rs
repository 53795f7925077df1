use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use hg_graph::gen_random_session;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::write_output;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Output path for the YAML script.
    #[arg(long)]
    pub out: PathBuf,
    /// Number of operations to generate.
    #[arg(long, default_value_t = 100)]
    pub steps: usize,
    /// Deterministic seed.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

pub fn run(args: &GenerateArgs) -> Result<(), Box<dyn Error>> {
    let mut rng = StdRng::seed_from_u64(args.seed);
    let operations = gen_random_session(args.steps, &mut rng);
    write_output(&args.out, serde_yaml::to_string(&operations)?)?;
    println!("wrote {} operations to {}", operations.len(), args.out.display());
    Ok(())
}
