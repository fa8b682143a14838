mod abi_decode;
mod abi_encode;
mod packed;
mod sign;
mod signature;
mod transaction;
