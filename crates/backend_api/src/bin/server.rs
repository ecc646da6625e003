use backend_api::run_server;
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Environment variables with sane defaults; no config file.
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .unwrap_or(3000);

    println!("SG Statement Parser API");
    println!("=======================");
    println!("Listening on: {}:{}", host, port);
    println!();

    run_server(&host, port).await?;

    Ok(())
}
