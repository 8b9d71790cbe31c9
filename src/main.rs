use std::process;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use react_scaffold::{Cli, Config, DuctRunner, Interface, Invocation, Scaffold};

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "react_scaffold=debug"
    } else {
        "react_scaffold=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(args: &Cli, interface: &mut Interface) -> anyhow::Result<()> {
    let invocation = Invocation::try_from(args)?;
    let config = Config::load(args)?;

    Scaffold::new(&config, interface, DuctRunner).run(&invocation)?;

    Ok(())
}

fn main() {
    let args = Cli::parse();
    init_tracing(args.verbose);

    let mut interface = Interface::new(args.quiet);
    if let Err(e) = run(&args, &mut interface) {
        interface.error(format!("{:#}", e));
        process::exit(1);
    }
}
