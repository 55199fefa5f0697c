use clap::Subcommand;
use eyre::Result;
use timesheet_client::settings::Settings;

mod browse;
mod delete;
mod edit;
mod list;
mod summary;
mod view;

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// List entries with totals for a period
    List(list::Cmd),
    /// Show one entry in full
    View(view::Cmd),
    /// Record a new entry
    New(edit::NewCmd),
    /// Change an existing entry
    Edit(edit::EditCmd),
    /// Remove an entry
    Delete(delete::Cmd),
    /// Totals computed by the server
    Summary,
    /// Interactive entry browser
    Browse(browse::Cmd),
}

impl Cmd {
    pub(crate) async fn run(self, settings: Settings) -> Result<()> {
        match self {
            Self::List(cmd) => cmd.run(settings).await,
            Self::View(cmd) => cmd.run(settings).await,
            Self::New(cmd) => cmd.run(settings).await,
            Self::Edit(cmd) => cmd.run(settings).await,
            Self::Delete(cmd) => cmd.run(settings).await,
            Self::Summary => summary::run(settings).await,
            Self::Browse(cmd) => cmd.run(settings).await,
        }
    }
}
