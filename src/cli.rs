use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "teleclinic", version, about = "TeleClinic landing page in the terminal")]
pub struct Args {
    /// Theme name (e.g., "Catppuccin Mocha")
    #[arg(short, long)]
    pub theme: Option<String>,

    /// Opening a dialog closes every other open dialog
    #[arg(long)]
    pub exclusive_modals: bool,

    /// Read the configuration from this file instead of the default location
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,
}
