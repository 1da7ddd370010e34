use clap::Parser;

mod client;
mod tui;

#[derive(Parser)]
#[command(name = "battle")]
#[command(about = "Fight a creature battle against the server AI", long_about = None)]
struct Cli {
    /// Server base URL
    #[arg(short, long, default_value = "http://127.0.0.1:8080")]
    server: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = client::start_client(&cli.server).await {
        eprintln!("Error: {}", e);
    }
}
