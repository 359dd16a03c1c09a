//! Benchmark utilities.

use layerkv_core::TransactionStack;
use rand::seq::SliceRandom;
use rand::Rng;

/// Generate `count` distinct keys.
pub fn generate_keys(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("key-{i:08}")).collect()
}

/// Generate `count` random values.
pub fn random_values(count: usize) -> Vec<u64> {
    let mut rng = rand::thread_rng();
    (0..count).map(|_| rng.gen()).collect()
}

/// Pick `count` keys from `keys` at random, with repetition.
pub fn sample_keys(keys: &[String], count: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();
    (0..count)
        .filter_map(|_| keys.choose(&mut rng).cloned())
        .collect()
}

/// Build a stack whose root holds every key, with `depth` empty
/// transactions opened on top.
pub fn stack_with_depth(keys: &[String], depth: usize) -> TransactionStack<String, u64> {
    let mut stack = TransactionStack::new();
    for (key, value) in keys.iter().zip(random_values(keys.len())) {
        stack.put(key.clone(), value);
    }
    for _ in 0..depth {
        stack.begin();
    }
    stack
}
