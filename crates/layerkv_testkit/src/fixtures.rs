//! Stack fixtures for common test setups.

use layerkv_core::TransactionStack;

/// A stack with string keys and integer values, as used across the tests.
pub type TestStack = TransactionStack<String, i64>;

/// Creates a stack whose root layer holds `pairs`.
pub fn stack_with(pairs: &[(&str, i64)]) -> TestStack {
    let mut stack = TestStack::new();
    for (key, value) in pairs {
        stack.put((*key).to_string(), *value);
    }
    stack
}

/// Creates a stack with one open transaction per entry of `levels`.
///
/// `levels[0]` is written to the root; every later level is written after
/// a `begin`, so the returned stack sits at depth `levels.len() - 1`.
pub fn nested_stack(levels: &[&[(&str, i64)]]) -> TestStack {
    let mut stack = TestStack::new();
    for (depth, pairs) in levels.iter().enumerate() {
        if depth > 0 {
            stack.begin();
        }
        for (key, value) in pairs.iter() {
            stack.put((*key).to_string(), *value);
        }
    }
    stack
}
