use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// Random stream used by a world. Fixed seeds give identical trajectories.
pub type SimRng = ChaCha12Rng;

/// Create a deterministic RNG from a seed.
pub fn create_rng(seed: u64) -> SimRng {
    ChaCha12Rng::seed_from_u64(seed)
}
