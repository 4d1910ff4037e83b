use argon2::password_hash::PasswordHashString;
use async_trait::async_trait;
use indexmap::IndexMap;
use log::{debug, info, trace};
use time::OffsetDateTime;
use tokio::sync::RwLock;
use crate::config::app_config::AppConfig;
use crate::hasher::{Hasher, ProductionHasher};
use crate::lib_constants::USERS_FILE_PATH;
use crate::state_file::{StateFileIo, TomlStateFile};
use crate::user_db::{UserDb, UserDbError};
use crate::username_string::UsernameString;
use data::{UserData, UsersData};

mod data;

pub type ProductionUserDb = UserDbImpl<ProductionHasher, TomlStateFile>;

#[allow(private_bounds)]
pub struct UserDbImpl<H: Hasher, Io: StateFileIo<UsersData>> {
    state: RwLock<State>,
    hasher: H,
    io: Io,
}

#[derive(Clone, Default)]
struct State {
    users: IndexMap<UsernameString, User>,
}

#[derive(Clone)]
struct User {
    hash: PasswordHashString,
    created_at: OffsetDateTime,
}

impl ProductionUserDb {
    pub async fn new(
        app_config: &AppConfig,
        hasher: ProductionHasher,
    ) -> Result<ProductionUserDb, UserDbError> {
        Self::load(
            hasher,
            TomlStateFile::new(&app_config.data_directory, USERS_FILE_PATH)
                .await?,
        ).await
    }
}

#[allow(private_bounds)]
impl<H: Hasher, Io: StateFileIo<UsersData>> UserDbImpl<H, Io> {
    pub(crate) async fn load(hasher: H, io: Io) -> Result<Self, UserDbError> {
        let state: State = io.read_state()
            .await?
            .map(State::from)
            .unwrap_or_default();
        debug!("loaded {} users", state.users.len());
        Ok(
            UserDbImpl {
                state: RwLock::new(state),
                hasher,
                io,
            }
        )
    }
}

#[allow(private_bounds)]
#[async_trait]
impl<H: Hasher, Io: StateFileIo<UsersData>> UserDb for UserDbImpl<H, Io> {
    async fn does_user_exist(
        &self,
        username: &UsernameString,
    ) -> Result<bool, UserDbError> {
        Ok(self.state.read().await.users.contains_key(username))
    }

    async fn check_user_credentials(
        &self,
        username: &UsernameString,
        password: &str,
    ) -> Result<bool, UserDbError> {
        trace!("checking credentials for user \"{username}\"");
        let Some(user) = self.state
            .read()
            .await
            .users
            .get(username)
            .cloned()
        else {
            debug!("user \"{username}\" not found");
            return Ok(false)
        };
        Ok(self.hasher.check_hash(user.hash.password_hash(), password)?)
    }

    async fn create_user(
        &self,
        username: &UsernameString,
        password: &str,
    ) -> Result<(), UserDbError> {
        let hash = self.hasher.generate_hash(password)?;
        let mut state = self.state.write().await;
        if state.users.contains_key(username) {
            return Err(UserDbError::UserExists(username.clone()))
        }
        let mut updated = state.clone();
        updated.users.insert(
            username.clone(),
            User {
                hash,
                created_at: OffsetDateTime::now_utc(),
            },
        );
        self.io.write_state(&UsersData::from(&updated)).await?;
        *state = updated;
        info!("created user \"{username}\"");
        Ok(())
    }

    async fn count_users(&self) -> usize {
        self.state.read().await.users.len()
    }
}

impl From<UsersData> for State {
    fn from(value: UsersData) -> Self {
        State {
            users: value.users
                .into_iter()
                .map(|user| (
                    user.username,
                    User {
                        hash: user.hash,
                        created_at: user.created_at,
                    },
                ))
                .collect(),
        }
    }
}

impl From<&State> for UsersData {
    fn from(value: &State) -> Self {
        UsersData {
            users: value.users
                .iter()
                .map(|(username, user)| UserData {
                    username: username.clone(),
                    hash: user.hash.clone(),
                    created_at: user.created_at,
                })
                .collect(),
        }
    }
}
