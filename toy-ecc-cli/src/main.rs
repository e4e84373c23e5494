use structopt::StructOpt;
use toy_ecc_cli::config::get_config;
use toy_ecc_cli::{run, Opt};

fn main() -> anyhow::Result<()> {
    let _ = env_logger::try_init();

    let opt = Opt::from_args();
    let settings = get_config()?;
    let output = run(opt, settings)?;
    print!("{}", output);
    Ok(())
}
