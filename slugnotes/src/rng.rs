use rand::{Rng, RngCore};
use uuid::{Uuid, Variant, Version};
use crate::lib_constants::SESSION_TOKEN_SIZE;

pub fn make_uuid<R: Rng>(rng: &mut R) -> Uuid {
    uuid::Builder::from_random_bytes(rng.random())
        .with_variant(Variant::RFC4122)
        .with_version(Version::Random)
        .into_uuid()
}

pub fn make_session_token<R: RngCore>(rng: &mut R) -> Vec<u8> {
    let mut token = vec![0; SESSION_TOKEN_SIZE];
    rng.fill_bytes(token.as_mut_slice());
    token
}
