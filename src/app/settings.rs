use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// GPS Trace Viewer - renders the output of the GPS-trace cleaning pipeline
/// on an interactive map
pub struct Settings {
    /// URL of the processed-trace endpoint
    #[clap(long, default_value = "http://127.0.0.1:8000/api/processed")]
    pub data_url: String,
}

impl Settings {
    pub fn from_cli() -> Self {
        Settings::parse()
    }
}
