
use std::error::Error;
use std::io;
use std::path::Path;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHashString, SaltString};
use argon2::{Algorithm, Argon2, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use base64ct::{Base64, Encoding};
use log::debug;
use thiserror::Error;
use crate::config::hasher_config::ProductionHasherConfigData;

pub trait Hasher: Send + Sync {
    fn generate_hash(&self, password: &str) -> Result<PasswordHashString, HasherError>;
    fn check_hash(
        &self,
        hash: PasswordHash<'_>,
        password: &str,
    ) -> Result<bool, HasherError>;
}

pub struct ProductionHasher {
    argon2_params: argon2::Params,
    pepper: Option<Box<[u8]>>,
}

impl ProductionHasher {
    pub fn new(
        config: &ProductionHasherConfigData,
    ) -> Result<Self, HasherError> {
        let pepper = config.pepper_path
            .as_deref()
            .map(read_pepper)
            .transpose()?;
        debug!(
            "initializing password hasher, peppered: {}",
            pepper.is_some(),
        );
        let ret = ProductionHasher {
            argon2_params: config.try_into()
                .map_err(|e| HasherError::Initialization(Box::new(e)))?,
            pepper,
        };
        ret.get_hasher()
            .map_err(|e| HasherError::Initialization(Box::new(e)))?;
        Ok(ret)
    }

    fn get_hasher(&self) -> Result<Argon2<'_>, argon2::Error> {
        match self.pepper {
            Some(ref pepper) => Argon2::new_with_secret(
                pepper,
                Algorithm::Argon2id,
                Version::V0x13,
                self.argon2_params.clone(),
            ),
            None => Ok(
                Argon2::new(
                    Algorithm::Argon2id,
                    Version::V0x13,
                    self.argon2_params.clone(),
                )
            ),
        }
    }
}

fn read_pepper(path: &Path) -> Result<Box<[u8]>, HasherError> {
    Ok(
        Base64
            ::decode_vec(
                std::fs::read_to_string(path)?
                    .trim_ascii_end()
            )
            .map_err(HasherError::PepperDecode)?
            .into()
    )
}

impl Hasher for ProductionHasher {
    fn generate_hash(&self, password: &str) -> Result<PasswordHashString, HasherError> {
        let salt = SaltString::generate(&mut OsRng);
        let hasher = self.get_hasher()
            .map_err(|e| HasherError::Initialization(Box::new(e)))?;
        hasher.hash_password(password.as_bytes(), &salt)
            .map_err(|e| HasherError::Hash(Box::new(e)))
            .map(|v| v.serialize())
    }

    fn check_hash(&self, hash: PasswordHash<'_>, password: &str) -> Result<bool, HasherError> {
        self.get_hasher()
            .map_err(|e| HasherError::Initialization(Box::new(e)))?
            .verify_password(password.as_bytes(), &hash)
            .map(|_| true)
            .or_else(|e|
                if let argon2::password_hash::Error::Password = e {
                    Ok(false)
                } else {
                    Err(e)
                }
            )
            .map_err(|e| HasherError::Hash(Box::new(e)))
    }
}

#[derive(Debug, Error)]
pub enum HasherError {
    #[error("failed to initialize password hasher: {0}")]
    Initialization(Box<dyn Error + Send + Sync>),

    #[error("failed to hash password: {0}")]
    Hash(Box<dyn Error + Send + Sync>),

    #[error("failed to decode pepper: {0}")]
    PepperDecode(base64ct::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}
