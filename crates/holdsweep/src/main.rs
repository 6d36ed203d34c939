use clap::Parser;
use holdsweep::{Args, init_logging, run};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let _log_guard = init_logging(&args.log_level, args.out_dir.as_deref())?;

    run(&args)
}
