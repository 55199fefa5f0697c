use clap::Parser;
use eyre::{Context, Result};
use std::path::PathBuf;
use timesheet_client::api_client::ApiClient;
use timesheet_client::settings::Settings;

#[derive(Parser, Debug)]
pub struct Cmd {
    /// Where to write the file
    #[arg(short, long, default_value = "resume.pdf")]
    output: PathBuf,
}

impl Cmd {
    pub async fn run(self, settings: Settings) -> Result<()> {
        let client = ApiClient::new(&settings.server_address, &settings.api_root)?;
        let bytes = client.download(&settings.resume_path).await?;

        fs_err::write(&self.output, &bytes)
            .wrap_err_with(|| format!("Failed to save the resume to {:?}", self.output))?;

        println!("Saved {} bytes to {}", bytes.len(), self.output.display());
        Ok(())
    }
}
