//! Signing and signer recovery with secp256k1.

use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use k256::ecdsa::{
    signature::hazmat::PrehashSigner, RecoveryId, Signature as EcdsaSignature, SigningKey,
    VerifyingKey,
};

use super::{
    serialize::encode_with, serialize_transaction, validate_transaction, Signature,
    TransactionError, TransactionSerializable,
};

/// Hash that gets signed: keccak256 of the unsigned serialization.
///
/// For legacy transactions with a chain id this is the EIP-155 payload.
pub fn signing_hash(tx: &TransactionSerializable) -> Result<B256, TransactionError> {
    validate_transaction(tx)?;
    let mut buf = Vec::with_capacity(256);
    encode_with(tx, None, &mut buf);
    Ok(keccak256(&buf))
}

/// Hash of a serialized (signed) transaction.
#[inline]
pub fn transaction_hash(serialized: &[u8]) -> B256 {
    keccak256(serialized)
}

/// Sign a 32-byte prehash.
pub fn sign_hash(hash: &B256, key: &SigningKey) -> Result<Signature, TransactionError> {
    let (signature, recovery_id): (EcdsaSignature, RecoveryId) = key
        .sign_prehash(hash.as_slice())
        .map_err(|e| TransactionError::Signature(e.to_string()))?;

    let bytes = signature.to_bytes();
    let (r, s) = bytes.split_at(32);
    let (r, s) = (U256::from_be_slice(r), U256::from_be_slice(s));
    Ok(Signature::new(r, s, recovery_id.is_y_odd()))
}

/// Sign `tx` and return the signed serialization.
pub fn sign_transaction(
    tx: &TransactionSerializable,
    key: &SigningKey,
) -> Result<Bytes, TransactionError> {
    let hash = signing_hash(tx)?;
    let signature = sign_hash(&hash, key)?;
    tracing::debug!(tx_type = tx.tx_type().as_str(), %hash, "signed transaction");
    serialize_transaction(tx, Some(&signature))
}

/// Recover the sender of a signed transaction.
pub fn recover_signer(tx: &TransactionSerializable) -> Result<Address, TransactionError> {
    let signature = tx.signature().ok_or(TransactionError::MissingSignature)?;
    let hash = signing_hash(tx)?;

    let mut raw = [0u8; 64];
    raw[..32].copy_from_slice(&signature.r.to_be_bytes::<32>());
    raw[32..].copy_from_slice(&signature.s.to_be_bytes::<32>());
    let ecdsa = EcdsaSignature::from_slice(&raw)
        .map_err(|e| TransactionError::Signature(e.to_string()))?;

    let recovery_id = RecoveryId::new(signature.y_parity, false);
    let key = VerifyingKey::recover_from_prehash(hash.as_slice(), &ecdsa, recovery_id)
        .map_err(|e| TransactionError::Signature(e.to_string()))?;
    Ok(public_key_to_address(&key))
}

/// Ethereum address of a public key: the last 20 bytes of keccak256 of the
/// uncompressed point without its `0x04` tag.
pub fn public_key_to_address(key: &VerifyingKey) -> Address {
    let public_key = key.to_encoded_point(false);
    let hash = keccak256(&public_key.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}
