/*
[INPUT]:  Type strings, field words, and domain parameters
[OUTPUT]: EIP-712 struct hashes and final signing hashes
[POS]:    Signing layer - typed-data hashing primitives
[UPDATE]: When changing hashing helpers or domain encoding
*/

// Hand-rolled rather than derived: the exchange's typed-data names contain
// a ':' (e.g. "HyperliquidTransaction:ApproveAgent"), which derive macros
// reject as an identifier.

use alloy_primitives::{Address, B256, U256, keccak256};

const DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// Hash of the EIP-712 domain with a zero verifying contract,
/// as used by all Hyperliquid signing domains
pub fn domain_separator(name: &str, version: &str, chain_id: u64) -> B256 {
    let mut enc = Vec::with_capacity(160);
    enc.extend_from_slice(keccak256(DOMAIN_TYPE.as_bytes()).as_slice());
    enc.extend_from_slice(keccak256(name.as_bytes()).as_slice());
    enc.extend_from_slice(keccak256(version.as_bytes()).as_slice());
    enc.extend_from_slice(word_u64(chain_id).as_slice());
    enc.extend_from_slice(word_address(Address::ZERO).as_slice());
    keccak256(&enc)
}

/// `keccak256(typeHash ‖ field words)`
pub fn struct_hash(type_string: &str, fields: &[B256]) -> B256 {
    let mut enc = Vec::with_capacity(32 * (fields.len() + 1));
    enc.extend_from_slice(keccak256(type_string.as_bytes()).as_slice());
    for field in fields {
        enc.extend_from_slice(field.as_slice());
    }
    keccak256(&enc)
}

/// Final `\x19\x01`-prefixed signing hash
pub fn signing_hash(domain: B256, struct_hash: B256) -> B256 {
    let mut enc = Vec::with_capacity(66);
    enc.extend_from_slice(&[0x19, 0x01]);
    enc.extend_from_slice(domain.as_slice());
    enc.extend_from_slice(struct_hash.as_slice());
    keccak256(&enc)
}

/// Dynamic `string` fields are encoded as the hash of their contents
pub fn word_string(value: &str) -> B256 {
    keccak256(value.as_bytes())
}

pub fn word_address(value: Address) -> B256 {
    B256::left_padding_from(value.as_slice())
}

pub fn word_u64(value: u64) -> B256 {
    B256::new(U256::from(value).to_be_bytes::<32>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_word_encodings() {
        assert_eq!(word_u64(0), B256::ZERO);
        assert_eq!(
            word_u64(998).as_slice()[30..],
            [0x03, 0xe6]
        );

        let addr = address!("2222222222222222222222222222222222222222");
        let word = word_address(addr);
        assert_eq!(&word.as_slice()[..12], &[0u8; 12]);
        assert_eq!(&word.as_slice()[12..], addr.as_slice());
    }

    #[test]
    fn test_domain_separator_varies_by_chain() {
        let testnet = domain_separator("HyperliquidSignTransaction", "1", 998);
        let mainnet = domain_separator("HyperliquidSignTransaction", "1", 999);
        assert_ne!(testnet, mainnet);
        // deterministic
        assert_eq!(
            testnet,
            domain_separator("HyperliquidSignTransaction", "1", 998)
        );
    }

    #[test]
    fn test_struct_hash_sensitive_to_fields() {
        let type_string = "Agent(string source,bytes32 connectionId)";
        let a = struct_hash(type_string, &[word_string("a"), B256::ZERO]);
        let b = struct_hash(type_string, &[word_string("b"), B256::ZERO]);
        assert_ne!(a, b);
    }
}
