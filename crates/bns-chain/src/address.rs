use bns_consensus::{AddressCodec, ChainError};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Which chain an address belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Network {
    /// Bitcoin mainnet.
    #[default]
    Mainnet,
    /// Bitcoin testnet and regtest.
    Testnet,
}

impl Network {
    /// Version byte of pay-to-pubkey-hash addresses.
    pub fn p2pkh_version(self) -> u8 {
        match self {
            Network::Mainnet => 0x00,
            Network::Testnet => 0x6f,
        }
    }

    /// Version byte of pay-to-script-hash addresses.
    pub fn p2sh_version(self) -> u8 {
        match self {
            Network::Mainnet => 0x05,
            Network::Testnet => 0xc4,
        }
    }
}

/// `RIPEMD160(SHA256(data))`.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(data);
    let digest = Ripemd160::digest(sha);
    let mut out = [0u8; 20];
    out.copy_from_slice(&digest);
    out
}

fn encode_check(version: u8, hash: &[u8]) -> String {
    let mut payload = Vec::with_capacity(1 + hash.len());
    payload.push(version);
    payload.extend_from_slice(hash);
    bs58::encode(payload).with_check().into_string()
}

/// Base58check address codec for one network.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitcoinAddresses {
    network: Network,
}

impl BitcoinAddresses {
    /// Creates a codec for `network`.
    pub fn new(network: Network) -> Self {
        Self { network }
    }

    /// The network addresses are encoded for.
    pub fn network(&self) -> Network {
        self.network
    }
}

impl AddressCodec for BitcoinAddresses {
    fn address_from_public_key(&self, public_key: &[u8]) -> Result<String, ChainError> {
        k256::PublicKey::from_sec1_bytes(public_key)
            .map_err(|e| ChainError::PublicKey(e.to_string()))?;
        Ok(encode_check(self.network.p2pkh_version(), &hash160(public_key)))
    }

    fn reencode(&self, address: &str) -> Result<String, ChainError> {
        let payload = bs58::decode(address)
            .with_check(None)
            .into_vec()
            .map_err(|e| ChainError::Address(format!("{}: {}", address, e)))?;
        if payload.len() != 21 {
            return Err(ChainError::Address(format!(
                "{}: payload is {} bytes, expected 21",
                address,
                payload.len()
            )));
        }

        let version = match payload[0] {
            0x00 | 0x6f => self.network.p2pkh_version(),
            0x05 | 0xc4 => self.network.p2sh_version(),
            other => {
                return Err(ChainError::Address(format!(
                    "{}: unknown version byte {:#04x}",
                    address, other
                )))
            }
        };
        Ok(encode_check(version, &payload[1..]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const G_COMPRESSED: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
    const G_UNCOMPRESSED: &str = "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

    #[test]
    fn hash160_of_generator() {
        let key = hex::decode(G_COMPRESSED).unwrap();
        assert_eq!(hex::encode(hash160(&key)), "751e76e8199196d454941c45d1b3a323f1433bd6");
    }

    #[test]
    fn derives_mainnet_addresses() {
        let codec = BitcoinAddresses::new(Network::Mainnet);
        let compressed = hex::decode(G_COMPRESSED).unwrap();
        let uncompressed = hex::decode(G_UNCOMPRESSED).unwrap();
        assert_eq!(
            codec.address_from_public_key(&compressed).unwrap(),
            "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH"
        );
        assert_eq!(
            codec.address_from_public_key(&uncompressed).unwrap(),
            "1EHNa6Q4Jz2uvNExL497mE43ikXhwF6kZm"
        );
    }

    #[test]
    fn rejects_points_off_the_curve() {
        let codec = BitcoinAddresses::default();
        let mut x_past_modulus = vec![0x02];
        x_past_modulus.extend_from_slice(&[0xff; 32]);
        assert!(codec.address_from_public_key(&x_past_modulus).is_err());
        assert!(codec.address_from_public_key(&[0x02; 32]).is_err());
        assert!(matches!(
            codec.address_from_public_key(&[0x05; 33]),
            Err(ChainError::PublicKey(_))
        ));
        assert!(codec.address_from_public_key(&[]).is_err());
    }

    #[test]
    fn reencode_is_stable_on_own_network() {
        let codec = BitcoinAddresses::new(Network::Mainnet);
        for addr in ["1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH", "3J98t1WpEZ73CNmQviecrnyiWrnqRhWNLy"] {
            assert_eq!(codec.reencode(addr).unwrap(), addr);
        }
    }

    #[test]
    fn reencode_switches_network() {
        let mainnet = BitcoinAddresses::new(Network::Mainnet);
        let testnet = BitcoinAddresses::new(Network::Testnet);
        let p2pkh = testnet.reencode("1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH").unwrap();
        assert!(p2pkh.starts_with('m') || p2pkh.starts_with('n'));
        assert_eq!(mainnet.reencode(&p2pkh).unwrap(), "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH");
        let p2sh = testnet.reencode("3J98t1WpEZ73CNmQviecrnyiWrnqRhWNLy").unwrap();
        assert!(p2sh.starts_with('2'));
    }

    #[test]
    fn reencode_rejects_bad_checksum_and_shape() {
        let codec = BitcoinAddresses::default();
        assert!(codec.reencode("1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMJ").is_err());
        assert!(codec.reencode("not-base58-0OIl").is_err());
        assert!(codec.reencode("").is_err());
        // Valid checksum, wrong payload length.
        let short = bs58::encode([0u8; 10]).with_check().into_string();
        assert!(codec.reencode(&short).is_err());
        // Valid checksum, unknown version byte.
        let odd = encode_check(0x30, &[0u8; 20]);
        assert!(matches!(codec.reencode(&odd), Err(ChainError::Address(_))));
    }
}
