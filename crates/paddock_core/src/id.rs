use rand::Rng;

use crate::PlayerId;

/// Generate a v4-format player id from the passed RNG.
pub fn generate_player_id(rng: &mut impl Rng) -> PlayerId {
    let bytes: [u8; 16] = rng.gen();
    PlayerId(uuid::Builder::from_random_bytes(bytes).into_uuid().to_string())
}
