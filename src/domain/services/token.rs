use rand::{distributions::Alphanumeric, Rng};

pub const TOKEN_LEN: usize = 32;

/// Issues an opaque guest token: 32 alphanumeric characters (~190 bits of
/// entropy). Side-effect-free; global uniqueness is enforced by the UNIQUE
/// index on guests.token at insert time.
pub fn issue() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}
