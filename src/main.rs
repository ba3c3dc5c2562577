#![cfg(not(tarpaulin_include))]

use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    // Default port matches the frontend's expectation
    let mut port: u16 = 5000;

    if args.len() >= 2 {
        port = args[1].parse().unwrap_or(5000);
    }

    topsheet::app::run(&format!("127.0.0.1:{}", port)).await
}
