use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use reqwest::{Client, Response};
use serde_json::json;

#[derive(Parser)]
#[command(name = "sales-analytics-cli")]
#[command(about = "Sales Analytics CLI", long_about = None)]
struct Cli {
    #[arg(short, long, env = "SALES_ANALYTICS_ENDPOINT", default_value = "http://localhost:4000")]
    endpoint: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List sales, newest first
    List,

    /// Get sale details
    Get {
        #[arg(value_name = "SALE_ID")]
        id: i32,
    },

    /// Record a sale
    Create {
        #[arg(short, long)]
        product: String,

        #[arg(short, long)]
        category: String,

        #[arg(short, long)]
        quantity: i64,

        #[arg(short = 'P', long)]
        price: f64,

        /// Sale date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
    },

    /// Delete a sale
    Delete {
        #[arg(value_name = "SALE_ID")]
        id: i32,
    },

    /// Show dashboard analytics
    Analytics {
        /// Last day of the trend window (YYYY-MM-DD)
        #[arg(long)]
        as_of: Option<String>,
    },

    /// Score the sentiment of one or more texts
    Sentiment {
        #[arg(required = true)]
        texts: Vec<String>,
    },

    /// Check server health
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = Client::new();
    let endpoint = cli.endpoint.trim_end_matches('/');

    match cli.command {
        Commands::List => {
            let response = client
                .get(format!("{}/v1/sales", endpoint))
                .send()
                .await?;
            print_json(response).await?;
        }

        Commands::Get { id } => {
            let response = client
                .get(format!("{}/v1/sales/{}", endpoint, id))
                .send()
                .await?;
            print_json(response).await?;
        }

        Commands::Create {
            product,
            category,
            quantity,
            price,
            date,
        } => {
            let response = client
                .post(format!("{}/v1/sales", endpoint))
                .json(&json!({
                    "productName": product,
                    "category": category,
                    "quantity": quantity,
                    "price": price,
                    "saleDate": date,
                }))
                .send()
                .await?;
            print_json(response).await?;
        }

        Commands::Delete { id } => {
            let response = client
                .delete(format!("{}/v1/sales/{}", endpoint, id))
                .send()
                .await?;

            if response.status().is_success() {
                println!("Sale {} deleted", id);
            } else {
                print_json(response).await?;
            }
        }

        Commands::Analytics { as_of } => {
            let mut request = client.get(format!("{}/v1/analytics", endpoint));
            if let Some(as_of) = as_of {
                request = request.query(&[("asOf", as_of)]);
            }
            print_json(request.send().await?).await?;
        }

        Commands::Sentiment { texts } => {
            let response = if let [text] = texts.as_slice() {
                client
                    .post(format!("{}/v1/sentiment", endpoint))
                    .json(&json!({ "text": text }))
                    .send()
                    .await?
            } else {
                client
                    .post(format!("{}/v1/sentiment/batch", endpoint))
                    .json(&json!({ "texts": texts }))
                    .send()
                    .await?
            };
            print_json(response).await?;
        }

        Commands::Health => {
            let response = client
                .get(format!("{}/health", endpoint))
                .send()
                .await?;
            print_json(response).await?;
        }
    }

    Ok(())
}

/// Pretty-print a JSON body; non-2xx responses become an error exit
async fn print_json(response: Response) -> Result<()> {
    let status = response.status();
    let body: serde_json::Value = response
        .json()
        .await
        .with_context(|| format!("Server returned a non-JSON body ({})", status))?;

    println!("{}", serde_json::to_string_pretty(&body)?);

    if !status.is_success() {
        bail!("Request failed with status {}", status);
    }
    Ok(())
}
