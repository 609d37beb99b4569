use azure_vnet_peering::config::PeeringConfig;
use azure_vnet_peering::logging::init_logging;
use azure_vnet_peering::output::print_summary;
use std::error::Error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    init_logging("log4rs.yml");
    dotenv::dotenv().ok();
    //
    log::info!("#Start main()");

    let config = PeeringConfig::from_env().map_err(|e| {
        log::error!("{e}");
        e
    })?;

    let outcome = azure_vnet_peering::run(&config).await.map_err(|e| {
        log::error!("{e}");
        e
    })?;

    print_summary(&config, &outcome);
    log::info!("#End main()");
    Ok(())
}
