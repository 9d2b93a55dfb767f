use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Command-line client for the camera relay", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    /// Personal access token for the camera API.
    #[arg(short, long, env = "RELAY_TOKEN")]
    token: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the account the token belongs to
    Login,
    /// List cameras shared with the account
    Cameras,
    /// Show recording info for one camera
    Recordings {
        /// Camera ID
        cam_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let (path, body) = match &cli.command {
        Commands::Login => ("login", json!({ "token": cli.token })),
        Commands::Cameras => ("cameras", json!({ "token": cli.token })),
        Commands::Recordings { cam_id } => {
            ("recordings", json!({ "token": cli.token, "camId": cam_id }))
        }
    };

    let res = client
        .post(format!("{}/{}/", base, path))
        .json(&body)
        .send()
        .await?;

    let success = print_response(res).await?;
    if !success {
        std::process::exit(1);
    }
    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<bool, Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    match serde_json::from_str::<Value>(&text) {
        Ok(json) if status.is_success() => println!("{}", serde_json::to_string_pretty(&json)?),
        Ok(json) => {
            eprintln!("Error: relay returned status {}", status);
            eprintln!("{}", serde_json::to_string_pretty(&json)?);
        }
        Err(_) => {
            eprintln!("Error: relay returned status {} with a non-JSON body", status);
            eprintln!("Response: {}", text);
        }
    }

    Ok(status.is_success())
}
