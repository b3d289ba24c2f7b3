//! This module implements the self-delimiting binary encoding of Turing
//! machines described by Penrose in "The Emperor's New Mind": `decode` turns
//! an encoding string into a [`TransitionTable`], `encode` produces the
//! canonical encoding of a table.
//!
//! The encoding is a prefix-free run-length code. A run of `k` consecutive
//! `1`s terminated by a `0` is one token:
//!
//! | token | encoding |
//! | ----- | -------- |
//! |     0 | `0`      |
//! |     1 | `10`     |
//! |     R | `110`    |
//! |     L | `1110`   |
//! |  STOP | `11110`  |
//!
//! Every machine implicitly begins and ends with an `R` token (`110`), so
//! the wrapping is never written out.

use crate::types::{
    Action, Bit, DecodeError, Direction, EncodeError, State, TransitionTable,
};

/// One symbolic unit of the token stream. Tokens only exist while decoding;
/// they do not survive past table construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Zero,
    One,
    Right,
    Left,
    Stop,
}

/// An action as it comes off the token stream, before actions are paired
/// into states and targets are validated.
#[derive(Debug, Clone, Copy)]
struct RawAction {
    write: Bit,
    direction: Direction,
    target: usize,
}

/// Decodes a machine specification into a [`TransitionTable`].
///
/// The input must consist only of `0` and `1` characters. The decoder wraps
/// it with the implicit `110` prefix and suffix, tokenizes it, partitions the
/// tokens into actions, pairs consecutive actions into states (action `2i`
/// is state `i`'s response to `0`, action `2i + 1` its response to `1`), and
/// validates that every transition targets a defined state.
///
/// Decoding is a pure function of its input: the same specification always
/// yields a structurally identical table.
///
/// # Errors
///
/// Any [`DecodeError`] is a terminal rejection of the specification; no
/// partially decoded table is ever returned.
pub fn decode(spec: &str) -> Result<TransitionTable, DecodeError> {
    if let Some(ix) = spec.chars().position(|c| c != '0' && c != '1') {
        return Err(DecodeError::InvalidCharacter(ix));
    }

    let tokens = tokenize(spec)?;
    let actions = partition_actions(&tokens);

    if actions.len() % 2 != 0 {
        return Err(DecodeError::IncompleteStateDefinition);
    }
    let states_len = actions.len() / 2;

    for (ix, action) in actions.iter().enumerate() {
        if action.target >= states_len {
            return Err(DecodeError::UndefinedStateReference(ix / 2, action.target));
        }
    }

    let states = actions
        .chunks(2)
        .enumerate()
        .map(|(id, pair)| State {
            id,
            on_zero: pair[0].into_action(),
            on_one: pair[1].into_action(),
        })
        .collect();

    Ok(TransitionTable::new(states))
}

/// Scans the wrapped specification into tokens.
///
/// Reported indices are relative to the unwrapped specification; a run that
/// overflows across the implicit boundary is attributed to the nearest
/// specification index.
fn tokenize(spec: &str) -> Result<Vec<Token>, DecodeError> {
    let padded = format!("110{spec}110");

    let mut tokens = Vec::new();
    let mut run_len = 0u8;
    for (i, c) in padded.chars().enumerate() {
        run_len += 1;
        if run_len > 5 {
            return Err(DecodeError::InvalidRunLength(i.saturating_sub(3)));
        }
        if c == '0' {
            tokens.push(match run_len - 1 {
                0 => Token::Zero,
                1 => Token::One,
                2 => Token::Right,
                3 => Token::Left,
                _ => Token::Stop,
            });
            run_len = 0;
        }
    }

    Ok(tokens)
}

/// Splits the token stream into actions.
///
/// Every `R`/`L`/`STOP` token closes one action; the binary tokens gathered
/// since the previous terminator are its body. An empty body means "write 0,
/// go to state 0"; a single token is the write bit with target state 0; a
/// longer body ends with the write bit, preceded by the target state index
/// in binary, most significant bit first.
fn partition_actions(tokens: &[Token]) -> Vec<RawAction> {
    let mut actions = Vec::new();
    let mut body: Vec<Bit> = Vec::new();

    for token in tokens {
        let direction = match token {
            Token::Zero => {
                body.push(Bit::Zero);
                continue;
            }
            Token::One => {
                body.push(Bit::One);
                continue;
            }
            Token::Right => Direction::Right,
            Token::Left => Direction::Left,
            Token::Stop => Direction::Stop,
        };

        let (write, target) = match body.as_slice() {
            [] => (Bit::Zero, 0),
            [write] => (*write, 0),
            [address @ .., write] => (*write, address_value(address)),
        };
        actions.push(RawAction {
            write,
            direction,
            target,
        });
        body.clear();
    }

    actions
}

/// Reads a binary state address, most significant bit first. Saturates on
/// overflow; a saturated value can never name a defined state, so it is
/// rejected by the reference check in `decode`.
fn address_value(address: &[Bit]) -> usize {
    address.iter().fold(0usize, |n, bit| {
        n.saturating_mul(2).saturating_add(match bit {
            Bit::Zero => 0,
            Bit::One => 1,
        })
    })
}

impl RawAction {
    fn into_action(self) -> Action {
        Action {
            write: self.write,
            direction: self.direction,
            next_state: self.target,
        }
    }
}

/// Encodes a [`TransitionTable`] into its canonical specification string,
/// the inverse of [`decode`].
///
/// The implicit wrapping constrains which tables are representable: state 0
/// must respond to `0` by writing 0, moving right and staying in state 0
/// (its encoding is the implicit prefix), and the final action must move
/// right (its terminator is the implicit suffix).
pub fn encode(table: &TransitionTable) -> Result<String, EncodeError> {
    let actions: Vec<&Action> = table.actions().map(|(_, _, action)| action).collect();

    let first = *actions.first().ok_or(EncodeError::UnencodableFirstAction)?;
    if first.write != Bit::Zero
        || first.direction != Direction::Right
        || first.next_state != 0
    {
        return Err(EncodeError::UnencodableFirstAction);
    }
    if actions[actions.len() - 1].direction != Direction::Right {
        return Err(EncodeError::UnencodableLastAction);
    }

    let mut out = String::new();
    for (i, action) in actions.iter().enumerate() {
        if i == 0 {
            // Carried entirely by the implicit prefix.
            continue;
        }

        if action.next_state == 0 {
            // Canonical short forms: empty body writes 0, a single 1 token
            // writes 1, both targeting state 0.
            if action.write == Bit::One {
                out.push_str("10");
            }
        } else {
            push_address(&mut out, action.next_state);
            out.push_str(bit_token(action.write));
        }

        if i != actions.len() - 1 {
            out.push_str(match action.direction {
                Direction::Right => "110",
                Direction::Left => "1110",
                Direction::Stop => "11110",
            });
        }
    }

    Ok(out)
}

/// Appends the binary encoding of a non-zero state index, most significant
/// bit first, without leading zeros.
fn push_address(out: &mut String, target: usize) {
    let bits = usize::BITS - target.leading_zeros();
    for i in (0..bits).rev() {
        out.push_str(if target >> i & 1 == 1 { "10" } else { "0" });
    }
}

fn bit_token(bit: Bit) -> &'static str {
    match bit {
        Bit::Zero => "0",
        Bit::One => "10",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StateId;

    /// Penrose's UN+1 machine (number 177642): appends a 1 to a unary
    /// number.
    const UN_PLUS_ONE: &str = "101011010111101010";

    fn action(write: Bit, direction: Direction, next_state: StateId) -> Action {
        Action {
            write,
            direction,
            next_state,
        }
    }

    #[test]
    fn test_decode_un_plus_one() {
        let table = decode(UN_PLUS_ONE).unwrap();
        assert_eq!(table.len(), 2);

        let s0 = table.state(0);
        assert_eq!(s0.on_zero, action(Bit::Zero, Direction::Right, 0));
        assert_eq!(s0.on_one, action(Bit::One, Direction::Right, 1));

        let s1 = table.state(1);
        assert_eq!(s1.on_zero, action(Bit::One, Direction::Stop, 0));
        assert_eq!(s1.on_one, action(Bit::One, Direction::Right, 1));
    }

    #[test]
    fn test_decode_is_deterministic() {
        assert_eq!(decode(UN_PLUS_ONE).unwrap(), decode(UN_PLUS_ONE).unwrap());
    }

    #[test]
    fn test_first_action_is_fixed_by_the_implicit_prefix() {
        // Whatever the rest of the specification says, action 0 has no body
        // and is terminated by the implicit leading R.
        for spec in ["", "0", UN_PLUS_ONE] {
            let table = decode(spec).unwrap();
            assert_eq!(
                table.state(0).on_zero,
                action(Bit::Zero, Direction::Right, 0),
                "spec {spec:?}"
            );
        }
    }

    #[test]
    fn test_decode_empty_spec() {
        // "" wraps to 110110: two R tokens, one state that only ever moves
        // right.
        let table = decode("").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.state(0).on_one, action(Bit::Zero, Direction::Right, 0));
    }

    #[test]
    fn test_decode_rejects_invalid_character() {
        assert_eq!(decode("10a10"), Err(DecodeError::InvalidCharacter(2)));
        assert_eq!(decode("x"), Err(DecodeError::InvalidCharacter(0)));
    }

    #[test]
    fn test_decode_rejects_run_of_five_ones() {
        assert_eq!(decode("111110"), Err(DecodeError::InvalidRunLength(5)));
    }

    #[test]
    fn test_decode_rejects_odd_action_count() {
        assert_eq!(decode("10110"), Err(DecodeError::IncompleteStateDefinition));
    }

    #[test]
    fn test_decode_rejects_undefined_state_reference() {
        // State 0's response to 1 targets state 2 of a two-state machine.
        assert_eq!(
            decode("1001011010111101010"),
            Err(DecodeError::UndefinedStateReference(0, 2))
        );
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let table = decode(UN_PLUS_ONE).unwrap();
        assert_eq!(encode(&table).unwrap(), UN_PLUS_ONE);
    }

    #[test]
    fn test_decode_encode_round_trip() {
        // A machine that walks left into blank tape before stopping.
        let table = TransitionTable::new(vec![
            State {
                id: 0,
                on_zero: action(Bit::Zero, Direction::Right, 0),
                on_one: action(Bit::One, Direction::Left, 1),
            },
            State {
                id: 1,
                on_zero: action(Bit::One, Direction::Stop, 0),
                on_one: action(Bit::Zero, Direction::Right, 0),
            },
        ]);

        let spec = encode(&table).unwrap();
        assert_eq!(spec, "101011101011110");
        assert_eq!(decode(&spec).unwrap(), table);
    }

    #[test]
    fn test_encode_rejects_bad_first_action() {
        let table = TransitionTable::new(vec![State {
            id: 0,
            on_zero: action(Bit::One, Direction::Right, 0),
            on_one: action(Bit::Zero, Direction::Right, 0),
        }]);
        assert_eq!(encode(&table), Err(EncodeError::UnencodableFirstAction));
    }

    #[test]
    fn test_encode_rejects_bad_last_action() {
        let table = TransitionTable::new(vec![State {
            id: 0,
            on_zero: action(Bit::Zero, Direction::Right, 0),
            on_one: action(Bit::Zero, Direction::Stop, 0),
        }]);
        assert_eq!(encode(&table), Err(EncodeError::UnencodableLastAction));
    }
}
