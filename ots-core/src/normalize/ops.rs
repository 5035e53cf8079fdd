//! Per-path operation normalization: rewrites a path's operation list into
//! atomized canonical form using the algebraic identities
//! `reverse∘reverse = id`, `append-after-reverse = reverse-after-prepend` (of
//! the reversed operand), and `prepend-after-reverse =
//! reverse-after-append` (of the reversed operand).

use crate::op::Op;

/// Rewrites `ops` into canonical, single-byte-operand form. The result
/// produces the same message transformation as `ops` for every input
/// message (see the round-trip test below and
/// [`crate::op::call_ops`]).
pub fn normalize_ops(ops: &[Op]) -> Vec<Op> {
    let mut out = Vec::new();
    let mut prefix: Vec<u8> = Vec::new();
    let mut suffix: Vec<u8> = Vec::new();
    let mut reverse_pending = false;

    for op in ops {
        match op {
            Op::Reverse => {
                std::mem::swap(&mut prefix, &mut suffix);
                prefix.reverse();
                suffix.reverse();
                reverse_pending = !reverse_pending;
            }
            Op::Append(operand) => suffix.extend_from_slice(operand),
            Op::Prepend(operand) => {
                let mut combined = operand.clone();
                combined.extend_from_slice(&prefix);
                prefix = combined;
            }
            other => {
                flush(&mut out, &mut prefix, &mut suffix, &mut reverse_pending);
                out.push(other.clone());
            }
        }
    }
    flush(&mut out, &mut prefix, &mut suffix, &mut reverse_pending);
    out
}

/// Emits the accumulated reverse/prefix/suffix state as atomized operations
/// and resets the accumulators.
fn flush(
    out: &mut Vec<Op>,
    prefix: &mut Vec<u8>,
    suffix: &mut Vec<u8>,
    reverse_pending: &mut bool,
) {
    if *reverse_pending {
        out.push(Op::Reverse);
    }
    for &byte in prefix.iter().rev() {
        out.push(Op::Prepend(vec![byte]));
    }
    for &byte in suffix.iter() {
        out.push(Op::Append(vec![byte]));
    }
    prefix.clear();
    suffix.clear();
    *reverse_pending = false;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::call_ops;

    fn assert_same_transform(ops: &[Op], msg: &[u8]) {
        let normalized = normalize_ops(ops);
        assert!(normalized.iter().all(|op| match op.operand() {
            Some(operand) => operand.len() == 1,
            None => true,
        }));
        assert_eq!(call_ops(ops, msg), call_ops(&normalized, msg));
    }

    #[test]
    fn atomizes_multi_byte_append_and_prepend() {
        let ops = vec![Op::Append(b"abc".to_vec()), Op::Prepend(b"xy".to_vec())];
        assert_same_transform(&ops, b"msg");
    }

    #[test]
    fn reverse_swaps_and_reverses_prefix_suffix() {
        let ops = vec![
            Op::Prepend(b"ab".to_vec()),
            Op::Reverse,
            Op::Append(b"cd".to_vec()),
            Op::Sha256,
        ];
        assert_same_transform(&ops, b"hello");
    }

    #[test]
    fn double_reverse_cancels() {
        let ops = vec![Op::Reverse, Op::Reverse, Op::Sha256];
        let normalized = normalize_ops(&ops);
        assert_eq!(normalized, vec![Op::Sha256]);
    }

    #[test]
    fn trailing_accumulator_is_flushed_without_a_triggering_op() {
        let ops = vec![Op::Append(b"z".to_vec())];
        let normalized = normalize_ops(&ops);
        assert_eq!(normalized, vec![Op::Append(b"z".to_vec())]);
    }

    #[test]
    fn idempotent_on_already_normalized_ops() {
        let ops = vec![Op::Prepend(vec![1]), Op::Append(vec![2]), Op::Sha256];
        assert_eq!(normalize_ops(&ops), normalize_ops(&normalize_ops(&ops)));
    }
}
