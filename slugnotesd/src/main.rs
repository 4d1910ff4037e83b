use clap::{crate_name, Parser};
use log::info;
use rocket::figment::Figment;
use slugnotes::config::app_config::AppConfig;
use slugnotes::config::figment::FigmentExt;
use slugnotes::error_exit;
use slugnotes::logging::init_logging;
use slugnotesd::app_setup::AppSetupFairing;
use slugnotesd::cli::CliConfig;

fn main() {
    let cli_config = CliConfig::parse();
    init_logging(cli_config.syslog);

    info!("{} starting up", crate_name!());

    if !cli_config.config_file.exists() {
        error_exit!(
            "configuration file at {} does not exist",
            cli_config.config_file.display()
        )
    }
    let figment = Figment::from(rocket::Config::default())
        .setup_app_config(&cli_config.config_file);
    let app_config: AppConfig = figment.extract()
        .unwrap_or_else(|e| error_exit!("failed to load config: {e}"));

    let result = rocket::execute(
        rocket
            ::custom(figment)
            .attach(AppSetupFairing::new(app_config))
            .launch()
    );
    if let Err(e) = result {
        error_exit!("failed to launch rocket: {}", e);
    }
}
