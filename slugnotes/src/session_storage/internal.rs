use async_trait::async_trait;
use indexmap::IndexMap;
use log::{debug, info, trace};
use time::OffsetDateTime;
use tokio::sync::RwLock;
use crate::config::app_config::AppConfig;
use crate::lib_constants::SESSIONS_FILE_PATH;
use crate::rng::{make_session_token, make_uuid};
use crate::session_storage::{Session, SessionStorage, SessionStorageError};
use crate::state_file::{StateFileIo, TomlStateFile};
use crate::username_string::UsernameString;
use data::{SessionData, SessionsData};

mod data;

pub type ProductionSessionStorage = SessionStorageImpl<TomlStateFile>;

#[allow(private_bounds)]
pub struct SessionStorageImpl<Io: StateFileIo<SessionsData>> {
    state: RwLock<State>,
    io: Io,
}

#[derive(Clone, Debug, Default)]
struct State {
    token_to_session: IndexMap<Vec<u8>, Session>,
}

impl ProductionSessionStorage {
    pub async fn new(
        app_config: &AppConfig,
    ) -> Result<ProductionSessionStorage, SessionStorageError> {
        Self::load(
            TomlStateFile::new(&app_config.data_directory, SESSIONS_FILE_PATH)
                .await?,
        ).await
    }
}

#[allow(private_bounds)]
impl<Io: StateFileIo<SessionsData>> SessionStorageImpl<Io> {
    pub(crate) async fn load(io: Io) -> Result<Self, SessionStorageError> {
        let state: State = io.read_state()
            .await?
            .map(State::from)
            .unwrap_or_default();
        debug!("loaded {} sessions", state.token_to_session.len());
        Ok(
            SessionStorageImpl {
                state: RwLock::new(state),
                io,
            }
        )
    }

    /// Drops the expired sessions, then saves the rest.
    async fn write_state(
        &self,
        mut state: State,
    ) -> Result<State, SessionStorageError> {
        let now = OffsetDateTime::now_utc();
        state.token_to_session.retain(|_, session| !session.is_expired(now));
        trace!("saving {} sessions", state.token_to_session.len());
        self.io.write_state(&SessionsData::from(&state)).await?;
        Ok(state)
    }
}

#[allow(private_bounds)]
#[async_trait]
impl<Io: StateFileIo<SessionsData>> SessionStorage for SessionStorageImpl<Io> {
    async fn create_session(
        &self,
        username: &UsernameString,
        created_at: OffsetDateTime,
        expires_at: OffsetDateTime,
    ) -> Result<Session, SessionStorageError> {
        let session = {
            let mut rng = rand::rng();
            Session {
                session_id: make_uuid(&mut rng),
                username: username.clone(),
                token: make_session_token(&mut rng),
                created_at,
                expires_at,
            }
        };
        info!(
            "creating new user session {} for user \"{username}\", \
                expires at {expires_at}",
            session.session_id,
        );
        let mut state = self.state.write().await;
        let mut updated = state.clone();
        updated.token_to_session.insert(session.token.clone(), session.clone());
        *state = self.write_state(updated).await?;
        Ok(session)
    }

    async fn get_session_by_token(
        &self,
        token: &[u8],
        now: OffsetDateTime,
    ) -> Result<Option<Session>, SessionStorageError> {
        Ok(
            self.state
                .read()
                .await
                .token_to_session
                .get(token)
                .filter(|session| !session.is_expired(now))
                .cloned()
        )
    }

    async fn delete_session(
        &self,
        token: &[u8],
    ) -> Result<bool, SessionStorageError> {
        let mut state = self.state.write().await;
        let Some(session) = state.token_to_session.get(token) else {
            trace!("no session to terminate");
            return Ok(false)
        };
        info!(
            "terminating session {} for user \"{}\"",
            session.session_id,
            session.username,
        );
        let mut updated = state.clone();
        updated.token_to_session.shift_remove(token);
        *state = self.write_state(updated).await?;
        Ok(true)
    }
}

impl From<SessionsData> for State {
    fn from(value: SessionsData) -> Self {
        State {
            token_to_session: value.sessions
                .into_iter()
                .map(|session| (
                    session.token.clone(),
                    Session {
                        session_id: session.session_id,
                        username: session.username,
                        token: session.token,
                        created_at: session.created_at,
                        expires_at: session.expires_at,
                    },
                ))
                .collect(),
        }
    }
}

impl From<&State> for SessionsData {
    fn from(value: &State) -> Self {
        SessionsData {
            sessions: value.token_to_session
                .values()
                .map(|session| SessionData {
                    session_id: session.session_id,
                    username: session.username.clone(),
                    token: session.token.clone(),
                    created_at: session.created_at,
                    expires_at: session.expires_at,
                })
                .collect(),
        }
    }
}
