use serde_json::Value;
use sha2::{Digest, Sha256};

use fabrica_core::FieldValue;

use crate::errors::Result;
use crate::params::{ParamKind, ParamSpec, validate_params};
use crate::providers::{Provider, no_such_method};
use crate::random::RandomStream;

const METHODS: &[&str] = &["uuid", "hash", "token_hex", "mnemonic_phrase"];

const TOKEN_PARAMS: &[ParamSpec] = &[ParamSpec::new("entropy", ParamKind::Int)];
const MNEMONIC_PARAMS: &[ParamSpec] = &[ParamSpec::new("length", ParamKind::Int)];

const DEFAULT_TOKEN_ENTROPY: usize = 32;
const DEFAULT_MNEMONIC_LENGTH: usize = 12;

// Small fixed wordlist; not the BIP-39 set, these phrases carry no key
// material.
const WORDLIST: &[&str] = &[
    "absorb", "anchor", "basket", "bridge", "canvas", "cellar", "copper", "dragon", "ember",
    "fabric", "falcon", "garden", "hammer", "harbor", "island", "jungle", "kernel", "ladder",
    "lantern", "marble", "meadow", "needle", "orchid", "oyster", "pebble", "pillar", "quartz",
    "ribbon", "saddle", "shadow", "timber", "velvet", "walnut", "willow", "zephyr",
];

/// Pseudo-cryptographic values drawn from the stream, not from a CSPRNG.
/// Locale independent.
pub struct CryptographicProvider;

impl CryptographicProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CryptographicProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for CryptographicProvider {
    fn name(&self) -> &'static str {
        "cryptographic"
    }

    fn methods(&self) -> &'static [&'static str] {
        METHODS
    }

    fn call(
        &mut self,
        method: &str,
        params: Option<&Value>,
        random: &mut RandomStream,
    ) -> Result<FieldValue> {
        match method {
            "uuid" => {
                let mut bytes = [0_u8; 16];
                bytes.copy_from_slice(&random.random_bytes(16));
                bytes[6] = (bytes[6] & 0x0f) | 0x40;
                bytes[8] = (bytes[8] & 0x3f) | 0x80;
                Ok(FieldValue::Text(uuid::Uuid::from_bytes(bytes).to_string()))
            }
            "hash" => {
                let digest = Sha256::digest(random.random_bytes(32));
                Ok(FieldValue::Text(hex::encode(digest)))
            }
            "token_hex" => {
                let map = validate_params(params, TOKEN_PARAMS, "cryptographic.token_hex")?;
                let entropy = map.usize("entropy").unwrap_or(DEFAULT_TOKEN_ENTROPY);
                Ok(FieldValue::Text(random.random_hex(entropy)))
            }
            "mnemonic_phrase" => {
                let map = validate_params(params, MNEMONIC_PARAMS, "cryptographic.mnemonic_phrase")?;
                let length = map.usize("length").unwrap_or(DEFAULT_MNEMONIC_LENGTH);
                let words: Vec<&str> = (0..length)
                    .map(|_| *random.choice(WORDLIST).unwrap_or(&"fabric"))
                    .collect();
                Ok(FieldValue::Text(words.join(" ")))
            }
            other => Err(no_such_method("cryptographic", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::Seed;

    #[test]
    fn uuid_carries_version_and_variant_bits() {
        let mut provider = CryptographicProvider::new();
        let mut random = RandomStream::new(Seed::Number(4));
        let value = provider.call("uuid", None, &mut random).unwrap();
        let text = value.as_str().unwrap();
        let parsed = uuid::Uuid::parse_str(text).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn token_hex_length_follows_entropy() {
        let mut provider = CryptographicProvider::new();
        let mut random = RandomStream::new(Seed::Number(4));
        let params = serde_json::json!({"entropy": 8});
        let value = provider
            .call("token_hex", Some(&params), &mut random)
            .unwrap();
        assert_eq!(value.as_str().unwrap().len(), 16);
    }
}
