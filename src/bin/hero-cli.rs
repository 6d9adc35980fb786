use clap::{Parser, Subcommand, ValueEnum};
use reqwest::Method;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "hero-cli")]
#[command(about = "Command-line client for the hero routes API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8787")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ApiVersion {
    V1,
    V2,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the welcome message
    Root,
    /// Fetch the static profile
    Me,
    /// Fetch a profile by user id
    Profile { id: String },
    /// Send a profile update (JSON body)
    Update { json: String },
    /// Search, optionally without a query
    Search { query: Option<String> },
    /// Fetch a post by author and post id
    Post { user_id: String, post_id: String },
    /// Fetch a versioned profile
    Versioned {
        #[arg(value_enum)]
        version: ApiVersion,
    },
    /// Send an arbitrary request
    Raw { method: String, path: String },
}

impl Commands {
    fn method(&self) -> Result<Method, Box<dyn std::error::Error>> {
        Ok(match self {
            Commands::Update { .. } => Method::POST,
            Commands::Raw { method, .. } => Method::from_bytes(method.to_uppercase().as_bytes())?,
            _ => Method::GET,
        })
    }

    fn path(&self) -> String {
        match self {
            Commands::Root => "/".to_string(),
            Commands::Me => "/api/profile/me".to_string(),
            Commands::Profile { id } => format!("/api/profile/{id}"),
            Commands::Update { .. } => "/api/profile".to_string(),
            Commands::Search { query: None } => "/api/search".to_string(),
            Commands::Search { query: Some(query) } => {
                let encoded: String = url::form_urlencoded::Serializer::new(String::new())
                    .append_pair("query", query)
                    .finish();
                format!("/api/search?{encoded}")
            }
            Commands::Post { user_id, post_id } => {
                format!("/api/profile/me/{user_id}/posts/{post_id}")
            }
            Commands::Versioned { version: ApiVersion::V1 } => "/api/v1/profile/me".to_string(),
            Commands::Versioned { version: ApiVersion::V2 } => "/api/v2/profile/me".to_string(),
            Commands::Raw { path, .. } => path.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let url = format!("{}{}", cli.url.trim_end_matches('/'), cli.command.path());
    let mut request = client.request(cli.command.method()?, url);
    if let Commands::Update { json } = &cli.command {
        let body: Value = serde_json::from_str(json)?;
        request = request.json(&body);
    }

    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    println!("{status}");

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) if text.is_empty() => {}
        Err(_) => println!("{text}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Commands::Root.path(), "/");
        assert_eq!(Commands::Profile { id: "2".into() }.path(), "/api/profile/2");
        assert_eq!(
            Commands::Post {
                user_id: "12".into(),
                post_id: "101".into()
            }
            .path(),
            "/api/profile/me/12/posts/101"
        );
        assert_eq!(
            Commands::Versioned {
                version: ApiVersion::V2
            }
            .path(),
            "/api/v2/profile/me"
        );
    }

    #[test]
    fn test_search_query_is_encoded() {
        assert_eq!(Commands::Search { query: None }.path(), "/api/search");
        assert_eq!(
            Commands::Search {
                query: Some("iron man".into())
            }
            .path(),
            "/api/search?query=iron+man"
        );
    }

    #[test]
    fn test_methods() {
        assert_eq!(
            Commands::Update { json: "{}".into() }.method().unwrap(),
            Method::POST
        );
        assert_eq!(
            Commands::Raw {
                method: "delete".into(),
                path: "/foo".into()
            }
            .method()
            .unwrap(),
            Method::DELETE
        );
        assert_eq!(Commands::Me.method().unwrap(), Method::GET);
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["hero-cli", "versioned", "v1"]).unwrap();
        assert_eq!(cli.url, "http://localhost:8787");
        assert_eq!(cli.command.path(), "/api/v1/profile/me");
    }
}
