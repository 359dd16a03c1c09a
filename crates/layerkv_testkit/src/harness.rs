//! Differential harness: replay operations against the layered stack and the
//! reference model and report the first divergence.

use crate::generators::{Op, KEY_ALPHABET};
use crate::model::ModelStack;
use layerkv_core::TransactionStack;
use thiserror::Error;

/// The first point at which the stack and the model disagreed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("step {step} ({op:?}): model says {expected}, stack says {actual}")]
pub struct Divergence {
    /// Index of the operation after which the disagreement was seen.
    pub step: usize,
    /// The operation itself.
    pub op: Op,
    /// What the model produced.
    pub expected: String,
    /// What the stack produced.
    pub actual: String,
}

/// Runs `ops` against a fresh stack and a fresh model.
///
/// After every operation the direct result, the depth, and the value of
/// every key in [`KEY_ALPHABET`] are compared.
///
/// # Errors
///
/// Returns the first [`Divergence`] found.
pub fn apply_and_compare(ops: &[Op]) -> Result<(), Divergence> {
    let mut stack: TransactionStack<String, i64> = TransactionStack::new();
    let mut model: ModelStack<String, i64> = ModelStack::new();

    for (step, op) in ops.iter().enumerate() {
        let diverge = |expected: String, actual: String| Divergence {
            step,
            op: op.clone(),
            expected,
            actual,
        };

        match op {
            Op::Get(key) => {
                let expected = model.get(key.as_str()).copied();
                let actual = stack.get(key.as_str()).copied();
                if expected != actual {
                    return Err(diverge(format!("{expected:?}"), format!("{actual:?}")));
                }
            }
            Op::Put(key, value) => {
                model.put(key.clone(), *value);
                stack.put(key.clone(), *value);
            }
            Op::Delete(key) => {
                model.delete(key);
                stack.delete(key.clone());
            }
            Op::Begin => {
                model.begin();
                stack.begin();
            }
            Op::Commit => {
                let expected = model.commit();
                let actual = stack.commit().is_ok();
                if expected != actual {
                    return Err(diverge(format!("ok={expected}"), format!("ok={actual}")));
                }
            }
            Op::Rollback => {
                let expected = model.rollback();
                let actual = stack.rollback().is_ok();
                if expected != actual {
                    return Err(diverge(format!("ok={expected}"), format!("ok={actual}")));
                }
            }
        }

        if model.depth() != stack.depth() {
            return Err(diverge(
                format!("depth {}", model.depth()),
                format!("depth {}", stack.depth()),
            ));
        }
        for key in KEY_ALPHABET {
            let expected = model.get(key).copied();
            let actual = stack.get(key).copied();
            if expected != actual {
                return Err(diverge(
                    format!("{key}={expected:?}"),
                    format!("{key}={actual:?}"),
                ));
            }
        }
    }

    Ok(())
}

/// Replays `ops` onto an existing stack, ignoring commit/rollback rejections.
pub fn replay(stack: &mut TransactionStack<String, i64>, ops: &[Op]) {
    for op in ops {
        match op {
            Op::Get(_) => {}
            Op::Put(key, value) => stack.put(key.clone(), *value),
            Op::Delete(key) => stack.delete(key.clone()),
            Op::Begin => {
                stack.begin();
            }
            Op::Commit => {
                let _ = stack.commit();
            }
            Op::Rollback => {
                let _ = stack.rollback();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn put(key: &str, value: i64) -> Op {
        Op::Put(key.to_string(), value)
    }

    #[test]
    fn empty_sequence_agrees() {
        assert!(apply_and_compare(&[]).is_ok());
    }

    #[test]
    fn rejected_commit_agrees() {
        assert!(apply_and_compare(&[Op::Commit, Op::Rollback, put("a", 1)]).is_ok());
    }

    #[test]
    fn nested_sequence_agrees() {
        let ops = vec![
            put("a", 1),
            Op::Begin,
            Op::Delete("a".to_string()),
            Op::Begin,
            put("b", 2),
            Op::Commit,
            put("a", 3),
            Op::Get("a".to_string()),
            Op::Delete("a".to_string()),
            Op::Commit,
            Op::Get("a".to_string()),
            Op::Get("b".to_string()),
        ];
        assert_eq!(apply_and_compare(&ops), Ok(()));
    }

    #[test]
    fn replay_applies_writes() {
        let mut stack = TransactionStack::new();
        replay(&mut stack, &[Op::Begin, put("a", 5), Op::Commit, Op::Commit]);

        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.get("a"), Some(&5));
    }

    #[test]
    fn divergence_message_names_step() {
        let divergence = Divergence {
            step: 3,
            op: Op::Begin,
            expected: "depth 1".to_string(),
            actual: "depth 2".to_string(),
        };
        assert_eq!(
            divergence.to_string(),
            "step 3 (Begin): model says depth 1, stack says depth 2"
        );
    }
}
