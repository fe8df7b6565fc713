//! Personal-message signature recovery
//!
//! Clients sign challenge strings with the standard Ethereum personal-message
//! scheme (EIP-191). Recovery derives the signing address from the message
//! and signature alone; no public key is known in advance.

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use sha3::{Digest, Keccak256};

use crate::address::EthAddress;
use crate::error::{AuthError, AuthResult};

/// Prehash for personal-message signing:
/// `keccak256("\x19Ethereum Signed Message:\n" + len(message) + message)`.
///
/// Public so signing clients and tests build the exact digest recovery
/// expects.
pub fn personal_digest(message: &str) -> Keccak256 {
    let mut hasher = Keccak256::new();
    hasher.update(b"\x19Ethereum Signed Message:\n");
    hasher.update(message.len().to_string().as_bytes());
    hasher.update(message.as_bytes());
    hasher
}

/// Recover the address that signed `message`.
///
/// Accepts the 65-byte `r ‖ s ‖ v` wire form as hex, with or without a `0x`
/// prefix; `v` may be 0/1 or the legacy 27/28. Fails only when the signature
/// is malformed or recovery is mathematically impossible — a mismatched
/// signer is the caller's comparison to make, not an error here.
pub fn recover_signer(message: &str, signature: &str) -> AuthResult<EthAddress> {
    let raw = signature.strip_prefix("0x").unwrap_or(signature);
    let bytes =
        hex::decode(raw).map_err(|e| AuthError::InvalidSignature(format!("bad hex: {e}")))?;
    if bytes.len() != 65 {
        return Err(AuthError::InvalidSignature(format!(
            "expected 65 bytes, got {}",
            bytes.len()
        )));
    }

    let mut sig = Signature::from_slice(&bytes[..64])
        .map_err(|e| AuthError::InvalidSignature(e.to_string()))?;
    let mut parity = match bytes[64] {
        v @ (0 | 1) => v,
        v @ (27 | 28) => v - 27,
        v => {
            return Err(AuthError::InvalidSignature(format!(
                "bad recovery byte {v}"
            )))
        }
    };
    // Wallets may emit high-s signatures; normalizing s flips the parity.
    if let Some(normalized) = sig.normalize_s() {
        sig = normalized;
        parity ^= 1;
    }
    let recovery_id = RecoveryId::from_byte(parity).ok_or_else(|| {
        AuthError::InvalidSignature(format!("bad recovery byte {parity}"))
    })?;

    let key = VerifyingKey::recover_from_digest(personal_digest(message), &sig, recovery_id)
        .map_err(|e| AuthError::InvalidSignature(e.to_string()))?;

    EthAddress::from_encoded_point(key.to_encoded_point(false).as_bytes())
        .ok_or_else(|| AuthError::InvalidSignature("unrecoverable public key".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use k256::ecdsa::SigningKey;

    fn test_key(fill: u8) -> SigningKey {
        SigningKey::from_slice(&[fill; 32]).unwrap()
    }

    fn address_of(key: &SigningKey) -> EthAddress {
        EthAddress::from_encoded_point(key.verifying_key().to_encoded_point(false).as_bytes())
            .unwrap()
    }

    fn sign(key: &SigningKey, message: &str, v_offset: u8) -> String {
        let (sig, recid) = key.sign_digest_recoverable(personal_digest(message)).unwrap();
        let mut bytes = sig.to_bytes().to_vec();
        bytes.push(recid.to_byte() + v_offset);
        hex::encode(bytes)
    }

    #[test]
    fn recovers_signer() {
        let key = test_key(0x42);
        let sig = sign(&key, "Kovan-abc123", 27);
        assert_eq!(recover_signer("Kovan-abc123", &sig).unwrap(), address_of(&key));
    }

    #[test]
    fn accepts_raw_parity_and_0x_prefix() {
        let key = test_key(0x42);
        let sig = sign(&key, "hello", 0);
        let expected = address_of(&key);
        assert_eq!(recover_signer("hello", &sig).unwrap(), expected);
        assert_eq!(
            recover_signer("hello", &format!("0x{sig}")).unwrap(),
            expected
        );
    }

    #[test]
    fn recovery_is_deterministic() {
        let key = test_key(0x07);
        let sig = sign(&key, "Goerli-zzz", 27);
        let a = recover_signer("Goerli-zzz", &sig).unwrap();
        let b = recover_signer("Goerli-zzz", &sig).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_message_recovers_different_address() {
        let key = test_key(0x42);
        let sig = sign(&key, "Kovan-abc123", 27);
        match recover_signer("Kovan-abc124", &sig) {
            Ok(addr) => assert_ne!(addr, address_of(&key)),
            Err(AuthError::InvalidSignature(_)) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn mutated_signature_does_not_recover_signer() {
        let key = test_key(0x42);
        let sig = sign(&key, "Kovan-abc123", 27);
        let mut bytes = hex::decode(&sig).unwrap();
        bytes[10] ^= 0x01;
        match recover_signer("Kovan-abc123", &hex::encode(bytes)) {
            Ok(addr) => assert_ne!(addr, address_of(&key)),
            Err(AuthError::InvalidSignature(_)) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(
            recover_signer("msg", "zz-not-hex"),
            Err(AuthError::InvalidSignature(_))
        ));
        assert!(matches!(
            recover_signer("msg", "deadbeef"),
            Err(AuthError::InvalidSignature(_))
        ));
        // 65 bytes but a nonsense recovery byte
        let mut bytes = vec![1u8; 65];
        bytes[64] = 9;
        assert!(matches!(
            recover_signer("msg", &hex::encode(bytes)),
            Err(AuthError::InvalidSignature(_))
        ));
    }
}
