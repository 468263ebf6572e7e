use clap::Parser;
use opendata_etl::utils::logger;
use opendata_etl::{BanksPipeline, EtlEngine};

#[derive(Debug, Parser)]
#[command(name = "banks-etl")]
#[command(about = "Scrape the largest-banks table into top_5_banks.csv and banks.db")]
struct Args {
    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    tracing::info!("Starting banks-etl");

    let engine = EtlEngine::new(BanksPipeline::new());
    match engine.run().await {
        Ok(destinations) => {
            println!("✅ Banks ETL completed successfully!");
            for destination in destinations {
                println!("📁 {}", destination);
            }
        }
        Err(e) => {
            tracing::error!("banks ETL failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}
