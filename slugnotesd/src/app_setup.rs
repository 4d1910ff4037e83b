use async_trait::async_trait;
use log::{error, info};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::{Build, Rocket};
use slugnotes::config::app_config::AppConfig;
use slugnotes::hasher::ProductionHasher;
use slugnotes::session_storage::{ProductionSessionStorage, SessionStorage};
use slugnotes::storage::{NoteStorage, ProductionNoteStorage};
use slugnotes::user_db::{ProductionUserDb, UserDb};
use crate::routes::SlugnotesRocketBuildExt;

/// Loads the stores from the data directory and installs the app.
pub struct AppSetupFairing {
    app_config: AppConfig,
}

impl AppSetupFairing {
    pub fn new(app_config: AppConfig) -> Self {
        AppSetupFairing {
            app_config,
        }
    }
}

macro_rules! ok_or_bail {
    ($rocket:ident, $expr:expr, |$e:ident| $error_logger:expr) => ({
        match $expr {
            std::result::Result::Ok(ok) => ok,
            std::result::Result::Err(e) => {
                let $e = e;
                $error_logger;
                return std::result::Result::Err($rocket);
            },
        }
    });
}

#[async_trait]
impl Fairing for AppSetupFairing {
    fn info(&self) -> Info {
        Info {
            name: "app setup",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(
        &self,
        rocket: Rocket<Build>,
    ) -> rocket::fairing::Result {
        info!(
            "using data directory {}",
            self.app_config.data_directory.display(),
        );

        let hasher = ok_or_bail!(
            rocket,
            ProductionHasher::new(&self.app_config.hasher_config),
            |e| error!("password hasher initialization failed: {e}")
        );
        let storage: Box<dyn NoteStorage> = Box::new(
            ok_or_bail!(
                rocket,
                ProductionNoteStorage::new(&self.app_config).await,
                |e| error!("note storage initialization failed: {e}")
            )
        );
        let user_db: Box<dyn UserDb> = Box::new(
            ok_or_bail!(
                rocket,
                ProductionUserDb::new(&self.app_config, hasher).await,
                |e| error!("user db initialization failed: {e}")
            )
        );
        let sessions: Box<dyn SessionStorage> = Box::new(
            ok_or_bail!(
                rocket,
                ProductionSessionStorage::new(&self.app_config).await,
                |e| error!("session storage initialization failed: {e}")
            )
        );

        Ok(
            rocket
                .manage(storage)
                .manage(user_db)
                .manage(sessions)
                .manage(self.app_config.clone())
                .install_slugnotes()
        )
    }
}
