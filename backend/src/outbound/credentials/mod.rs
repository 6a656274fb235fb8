//! Credential codec adapters: bcrypt password digests and HS256 tokens.

mod bcrypt_hasher;
mod jwt_codec;

pub use bcrypt_hasher::{BcryptPasswordHasher, DEFAULT_BCRYPT_COST, MIN_BCRYPT_COST};
pub use jwt_codec::JwtTokenCodec;
