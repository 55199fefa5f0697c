use clap::Parser;
use eyre::Result;
use timesheet::command::TimesheetCmd;
use timesheet::VERSION;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    author = "Sam Uherek",
    version = VERSION,
    about = "Track working hours against the timesheet site",
    )]
struct Timesheet {
    /// Log requests and state changes
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    timesheet: TimesheetCmd,
}

impl Timesheet {
    fn init_logging(&self) {
        let default = if self.verbose { "debug" } else { "warn" };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init();
    }

    fn run(self) -> Result<()> {
        self.init_logging();
        self.timesheet.run()
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    Timesheet::parse().run()
}
