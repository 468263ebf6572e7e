use clap::Parser;
use opendata_etl::utils::logger;
use opendata_etl::{EtlEngine, UniversitiesPipeline};

#[derive(Debug, Parser)]
#[command(name = "universities-etl")]
#[command(about = "Load the universities API into the cal_uni table of store.db")]
struct Args {
    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    tracing::info!("Starting universities-etl");

    let engine = EtlEngine::new(UniversitiesPipeline::new());
    match engine.run().await {
        Ok(destinations) => {
            println!("✅ Universities ETL completed successfully!");
            for destination in destinations {
                println!("📁 {}", destination);
            }
        }
        Err(e) => {
            tracing::error!("universities ETL failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}
