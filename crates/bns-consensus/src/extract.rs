//! Consensus fields extracted from already-parsed transactions.

use crate::chain::{AddressCodec, ScriptDeserializer, TxInput};

/// Finds the public key that signed one of `inputs` for `address`.
///
/// Only pay-to-pubkey-hash spends (`<signature> <pubkey>`) are recognized;
/// other script shapes are skipped. Inputs whose script or key cannot be
/// decoded are logged and skipped. The first matching input wins.
pub fn public_key_for_address<S, A>(
    inputs: &[TxInput],
    address: &str,
    scripts: &S,
    codec: &A,
) -> Option<Vec<u8>>
where
    S: ScriptDeserializer + ?Sized,
    A: AddressCodec + ?Sized,
{
    for (idx, input) in inputs.iter().enumerate() {
        let elements = match scripts.deserialize(&input.script) {
            Ok(elements) => elements,
            Err(e) => {
                log::warn!("input {}: undecodable script: {}", idx, e);
                continue;
            }
        };
        if elements.len() != 2 {
            continue;
        }

        let candidate = match elements[1].as_push() {
            Some(candidate) => candidate,
            None => {
                log::warn!("input {}: second script element is not a data push", idx);
                continue;
            }
        };

        let derived = match codec.address_from_public_key(candidate) {
            Ok(derived) => derived,
            Err(e) => {
                log::warn!("input {}: invalid public key {}: {}", idx, hex::encode(candidate), e);
                continue;
            }
        };

        if derived == address {
            return Some(candidate.to_vec());
        }
    }

    None
}
