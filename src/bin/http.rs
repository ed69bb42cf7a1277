#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::net::SocketAddr;

    use coverage_board::{Roster, http_api, load_roster_from_json};

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let addr: SocketAddr = std::env::var("COVERAGE_BOARD_HTTP_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse()?;

    let source = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("COVERAGE_BOARD_ROSTER").ok());

    let roster = match source {
        #[cfg(feature = "fetch")]
        Some(source) if source.starts_with("http://") || source.starts_with("https://") => {
            coverage_board::fetch_roster_from_url(&source).inspect_err(|err| {
                tracing::error!(url = %source, error = %err, "roster fetch failed");
            })?
        }
        Some(path) => load_roster_from_json(&path).inspect_err(|err| {
            tracing::error!(path = %path, error = %err, "roster load failed");
        })?,
        None => Roster::new(),
    };

    println!("coverage-board HTTP API listening on http://{addr}");
    http_api::serve(addr, roster).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
