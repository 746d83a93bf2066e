use std::collections::BTreeMap;
use std::sync::OnceLock;

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};
use tracing::debug;

/// Seed input domain for a [`RandomStream`].
///
/// Every variant except `Unseeded` is deterministically convertible to
/// a PRNG seed: integers directly, floats via their bit pattern, text
/// and byte sequences via a SHA-256 prefix. Unseeded streams draw from
/// OS entropy unless a process-wide global seed was set.
#[derive(Debug, Clone, PartialEq)]
pub enum Seed {
    Unseeded,
    Number(u64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
}

impl Seed {
    fn material(&self) -> Option<u64> {
        match self {
            Seed::Unseeded => None,
            Seed::Number(value) => Some(*value),
            Seed::Float(value) => Some(value.to_bits()),
            Seed::Text(value) => Some(fold_bytes(value.as_bytes())),
            Seed::Bytes(value) => Some(fold_bytes(value)),
        }
    }
}

impl From<u64> for Seed {
    fn from(value: u64) -> Self {
        Seed::Number(value)
    }
}

impl From<&str> for Seed {
    fn from(value: &str) -> Self {
        Seed::Text(value.to_string())
    }
}

fn fold_bytes(bytes: &[u8]) -> u64 {
    let digest = Sha256::digest(bytes);
    let mut prefix = [0_u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(prefix)
}

static GLOBAL_SEED: OnceLock<Seed> = OnceLock::new();

/// Set the process-wide default seed, honored by streams constructed
/// with [`Seed::Unseeded`]. Settable once; returns false if a global
/// seed was already in place. An explicit per-stream seed always wins.
pub fn set_global_seed(seed: Seed) -> bool {
    GLOBAL_SEED.set(seed).is_ok()
}

pub(crate) fn global_seed() -> Option<&'static Seed> {
    GLOBAL_SEED.get()
}

/// Seedable PRNG wrapper used by every provider and the engine itself.
///
/// All operations are deterministic functions of internal state: given
/// the same seed, two independently constructed streams driven through
/// the same operation sequence produce the same outputs.
#[derive(Debug, Clone)]
pub struct RandomStream {
    rng: ChaCha8Rng,
}

impl RandomStream {
    pub fn new(seed: Seed) -> Self {
        let effective = match seed {
            Seed::Unseeded => global_seed().cloned().unwrap_or(Seed::Unseeded),
            explicit => explicit,
        };
        let rng = match effective.material() {
            Some(value) => ChaCha8Rng::seed_from_u64(value),
            None => ChaCha8Rng::from_os_rng(),
        };
        Self { rng }
    }

    /// Reset the stream state from a new seed.
    pub fn reseed(&mut self, seed: Seed) {
        debug!("random stream reseeded");
        *self = Self::new(seed);
    }

    /// Uniform integer in `a..=b`.
    pub fn randint(&mut self, a: i64, b: i64) -> i64 {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        self.rng.random_range(low..=high)
    }

    /// Uniform float in `a..=b`, rounded to `precision` decimal places.
    pub fn uniform(&mut self, a: f64, b: f64, precision: u32) -> f64 {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let value = self.rng.random_range(low..=high);
        let factor = 10_f64.powi(precision as i32);
        (value * factor).round() / factor
    }

    /// Bernoulli draw with probability `p` (clamped to `[0, 1]`).
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.random_bool(p.clamp(0.0, 1.0))
    }

    /// One element drawn uniformly from a sequence.
    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..items.len());
        items.get(index)
    }

    /// `k` independent draws from a population, optionally weighted.
    /// Weights that are missing, empty, or non-positive in total fall
    /// back to uniform draws.
    pub fn choices<T: Clone>(&mut self, population: &[T], weights: Option<&[f64]>, k: usize) -> Vec<T> {
        if population.is_empty() {
            return Vec::new();
        }
        let weights = weights.filter(|w| w.len() == population.len());
        let total: f64 = weights.map(|w| w.iter().sum()).unwrap_or(0.0);

        let mut out = Vec::with_capacity(k);
        for _ in 0..k {
            let index = match weights {
                Some(weights) if total > 0.0 => {
                    let mut mark = self.rng.random_range(0.0..total);
                    let mut chosen = population.len() - 1;
                    for (i, weight) in weights.iter().enumerate() {
                        if mark < *weight {
                            chosen = i;
                            break;
                        }
                        mark -= weight;
                    }
                    chosen
                }
                _ => self.rng.random_range(0..population.len()),
            };
            out.push(population[index].clone());
        }
        out
    }

    /// One key drawn from a mapping, weighted by its values. Iteration
    /// order is the map's key order, so draws are deterministic.
    pub fn weighted_choice<'a>(&mut self, mapping: &'a BTreeMap<String, f64>) -> Option<&'a str> {
        let total: f64 = mapping.values().filter(|w| **w > 0.0).sum();
        if total <= 0.0 {
            return None;
        }
        let mut mark = self.rng.random_range(0.0..total);
        for (key, weight) in mapping {
            if *weight <= 0.0 {
                continue;
            }
            if mark < *weight {
                return Some(key.as_str());
            }
            mark -= weight;
        }
        mapping.keys().next_back().map(|key| key.as_str())
    }

    pub fn random_bytes(&mut self, n: usize) -> Vec<u8> {
        let mut bytes = vec![0_u8; n];
        self.rng.fill_bytes(&mut bytes);
        bytes
    }

    /// Hex string over `n` random bytes.
    pub fn random_hex(&mut self, n: usize) -> String {
        hex::encode(self.random_bytes(n))
    }

    /// Random alphanumeric string of `len` characters.
    pub fn randstr(&mut self, len: usize) -> String {
        const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
        (0..len)
            .map(|_| {
                let index = self.rng.random_range(0..CHARSET.len());
                CHARSET[index] as char
            })
            .collect()
    }
}

impl Default for RandomStream {
    fn default() -> Self {
        Self::new(Seed::Unseeded)
    }
}
