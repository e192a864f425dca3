use bns_consensus::{ChainError, ScriptDeserializer, ScriptElement};

/// Pushes an empty byte vector.
pub const OP_0: u8 = 0x00;
/// Largest opcode that pushes its own value as a byte count.
pub const OP_PUSHBYTES_MAX: u8 = 0x4b;
/// Next byte is the push length.
pub const OP_PUSHDATA1: u8 = 0x4c;
/// Next two bytes (little-endian) are the push length.
pub const OP_PUSHDATA2: u8 = 0x4d;
/// Next four bytes (little-endian) are the push length.
pub const OP_PUSHDATA4: u8 = 0x4e;

/// Deserializer for Bitcoin scripts.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitcoinScripts;

impl ScriptDeserializer for BitcoinScripts {
    fn deserialize(&self, script: &[u8]) -> Result<Vec<ScriptElement>, ChainError> {
        deserialize_script(script)
    }
}

fn take<'s>(script: &'s [u8], pos: usize, len: usize, opcode_at: usize) -> Result<&'s [u8], ChainError> {
    pos.checked_add(len)
        .and_then(|end| script.get(pos..end))
        .ok_or_else(|| ChainError::Script {
            offset: opcode_at,
            reason: format!("push of {} bytes runs past end of script", len),
        })
}

fn read_len(script: &[u8], pos: usize, width: usize, opcode_at: usize) -> Result<usize, ChainError> {
    let bytes = take(script, pos, width, opcode_at)?;
    let mut buf = [0u8; 4];
    buf[..width].copy_from_slice(bytes);
    Ok(u32::from_le_bytes(buf) as usize)
}

/// Splits a script into data pushes and bare opcodes.
pub fn deserialize_script(script: &[u8]) -> Result<Vec<ScriptElement>, ChainError> {
    let mut elements = Vec::new();
    let mut pos = 0;

    while pos < script.len() {
        let opcode_at = pos;
        let opcode = script[pos];
        pos += 1;

        let len = match opcode {
            OP_0 => 0,
            1..=OP_PUSHBYTES_MAX => usize::from(opcode),
            OP_PUSHDATA1 => {
                let len = read_len(script, pos, 1, opcode_at)?;
                pos += 1;
                len
            }
            OP_PUSHDATA2 => {
                let len = read_len(script, pos, 2, opcode_at)?;
                pos += 2;
                len
            }
            OP_PUSHDATA4 => {
                let len = read_len(script, pos, 4, opcode_at)?;
                pos += 4;
                len
            }
            other => {
                elements.push(ScriptElement::Op(other));
                continue;
            }
        };

        let data = take(script, pos, len, opcode_at)?;
        elements.push(ScriptElement::Push(data.to_vec()));
        pos += len;
    }

    Ok(elements)
}
