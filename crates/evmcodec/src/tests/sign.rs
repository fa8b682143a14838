use crate::transaction::{
    parse_transaction, public_key_to_address, recover_signer, sign_transaction, signing_hash,
    transaction_hash, TransactionError, TransactionSerializable, TxEip1559, TxLegacy,
};
use alloy_primitives::{address, b256, hex, U256};
use k256::ecdsa::SigningKey;

const SIGNED_EIP155: &str = "0xf86c098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a76400008025a028ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276a067cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83";

fn eip155_tx() -> TransactionSerializable {
    TxLegacy {
        chain_id: Some(1),
        nonce: 9,
        gas_price: U256::from(20_000_000_000u64),
        gas: U256::from(21_000),
        to: Some(address!("3535353535353535353535353535353535353535")),
        value: U256::from(1_000_000_000_000_000_000u64),
        ..Default::default()
    }
    .into()
}

fn key() -> SigningKey {
    SigningKey::from_slice(&[0x46; 32]).unwrap()
}

#[test]
fn test_eip155_signing_hash() {
    assert_eq!(
        signing_hash(&eip155_tx()).unwrap(),
        b256!("daf5a779ae972f972197303d7b574746c7ef83eadac0f2791ad23db92e4c8e53")
    );
}

#[test]
fn test_sign_eip155_vector() {
    let signed = sign_transaction(&eip155_tx(), &key()).unwrap();
    assert_eq!(hex::encode_prefixed(&signed), SIGNED_EIP155);
}

#[test]
fn test_recover_from_signed_vector() {
    let tx = parse_transaction(&hex::decode(SIGNED_EIP155).unwrap()).unwrap();
    assert_eq!(tx.chain_id(), Some(1));
    assert_eq!(recover_signer(&tx).unwrap(), address!("9d8A62f656a8d1615C1294fd71e9CFb3E4855A4F"));
}

#[test]
fn test_sign_then_recover_typed() {
    let tx: TransactionSerializable = TxEip1559 {
        chain_id: 10,
        nonce: 1,
        max_priority_fee_per_gas: U256::from(1),
        max_fee_per_gas: U256::from(100),
        gas: U256::from(21_000),
        to: Some(address!("70997970c51812dc3a010c7d01b50e0d17dc79c8")),
        value: U256::from(5),
        ..Default::default()
    }
    .into();

    let key = key();
    let signed = sign_transaction(&tx, &key).unwrap();
    let parsed = parse_transaction(&signed).unwrap();

    assert_eq!(recover_signer(&parsed).unwrap(), public_key_to_address(key.verifying_key()));
    assert_ne!(transaction_hash(&signed), signing_hash(&tx).unwrap());
}

#[test]
fn test_recover_requires_signature() {
    assert_eq!(recover_signer(&eip155_tx()).unwrap_err(), TransactionError::MissingSignature);
}
