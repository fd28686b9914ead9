use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "feed-cli")]
#[command(about = "Operator CLI for the feed API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000/api/v1")]
    url: String,

    /// API key (defaults to the API_KEY environment variable).
    #[arg(short, long)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the API is reachable and the key is accepted
    ConnectCheck,
    /// List Discord direct-message recipients
    DirectMessages,
    /// List Discord server-channel recipients
    ServerChannels,
    /// Show a Kakao user
    KakaoUser { user_id: String },
    /// Latest notices of a type
    Notices {
        notice_type: String,
        #[arg(short, long)]
        list_size: Option<usize>,
    },
    /// Notices newer than the given link
    NewNotices {
        notice_type: String,
        #[arg(short, long)]
        last_link: Option<String>,
    },
    /// List scraper types
    ScraperTypes,
    /// List scraper categories
    ScraperCategories,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let key = cli
        .key
        .or_else(|| std::env::var("API_KEY").ok())
        .ok_or("API key required: pass --key or set API_KEY")?;

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {key}"))?);
    let client = reqwest::Client::builder().default_headers(headers).build()?;

    let base = cli.url.trim_end_matches('/');
    let request = match cli.command {
        Commands::ConnectCheck => client.get(format!("{base}/connect-check")),
        Commands::DirectMessages => client.get(format!("{base}/discord/direct-messages")),
        Commands::ServerChannels => client.get(format!("{base}/discord/server-channels")),
        Commands::KakaoUser { user_id } => client
            .get(format!("{base}/kakao/user"))
            .query(&[("user_id", user_id)]),
        Commands::Notices {
            notice_type,
            list_size,
        } => {
            let mut query = vec![("notice_type", notice_type)];
            if let Some(size) = list_size {
                query.push(("list_size", size.to_string()));
            }
            client.get(format!("{base}/notices/all")).query(&query)
        }
        Commands::NewNotices {
            notice_type,
            last_link,
        } => {
            let mut query = vec![("notice_type", notice_type)];
            if let Some(link) = last_link {
                query.push(("last_notice_link", link));
            }
            client.get(format!("{base}/notices/new")).query(&query)
        }
        Commands::ScraperTypes => client.get(format!("{base}/scraper/types")),
        Commands::ScraperCategories => client.get(format!("{base}/scraper/categories")),
    };

    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
