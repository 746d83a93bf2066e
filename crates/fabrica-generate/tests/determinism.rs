use fabrica_core::Locale;
use fabrica_generate::{FieldEngine, RandomStream, Seed};

const FIELDS: &[&str] = &[
    "person.full_name",
    "address.address",
    "text.sentence",
    "datetime.date",
    "payment.credit_card_number",
    "numeric.integer_number",
    "cryptographic.uuid",
];

fn run(seed: Seed) -> Vec<String> {
    let mut engine = FieldEngine::new(Locale::En, seed).unwrap();
    FIELDS
        .iter()
        .map(|field| engine.value(field).unwrap().render())
        .collect()
}

#[test]
fn equal_seeds_reproduce_every_field() {
    assert_eq!(run(Seed::Number(42)), run(Seed::Number(42)));
}

#[test]
fn different_seeds_diverge() {
    assert_ne!(run(Seed::Number(42)), run(Seed::Number(43)));
}

#[test]
fn text_and_byte_seeds_are_stable() {
    assert_eq!(run(Seed::from("fixtures")), run(Seed::from("fixtures")));
    assert_eq!(
        run(Seed::Bytes(vec![1, 2, 3])),
        run(Seed::Bytes(vec![1, 2, 3])),
    );
    // A text seed and its byte rendering hash to the same material.
    assert_eq!(
        run(Seed::from("fixtures")),
        run(Seed::Bytes(b"fixtures".to_vec())),
    );
}

#[test]
fn float_seed_folds_through_its_bit_pattern() {
    let mut a = RandomStream::new(Seed::Float(0.5));
    let mut b = RandomStream::new(Seed::Float(0.5));
    let mut c = RandomStream::new(Seed::Float(0.25));
    let left: Vec<i64> = (0..8).map(|_| a.randint(0, 1_000_000)).collect();
    let right: Vec<i64> = (0..8).map(|_| b.randint(0, 1_000_000)).collect();
    let other: Vec<i64> = (0..8).map(|_| c.randint(0, 1_000_000)).collect();
    assert_eq!(left, right);
    assert_ne!(left, other);
}

#[test]
fn reseeding_restarts_the_stream() {
    let mut engine = FieldEngine::new(Locale::En, Seed::Number(7)).unwrap();
    let first: Vec<String> = FIELDS
        .iter()
        .map(|field| engine.value(field).unwrap().render())
        .collect();
    engine.reseed(Seed::Number(7));
    let second: Vec<String> = FIELDS
        .iter()
        .map(|field| engine.value(field).unwrap().render())
        .collect();
    assert_eq!(first, second);
}

#[test]
fn unseeded_engines_do_not_collide() {
    // Not a determinism guarantee, but two OS-seeded streams agreeing on
    // a 32-byte draw would indicate the seed is not reaching the RNG.
    let mut a = RandomStream::new(Seed::Unseeded);
    let mut b = RandomStream::new(Seed::Unseeded);
    assert_ne!(a.random_bytes(32), b.random_bytes(32));
}
