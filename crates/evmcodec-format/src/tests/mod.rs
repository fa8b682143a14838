mod abi_json;
mod formatter;
