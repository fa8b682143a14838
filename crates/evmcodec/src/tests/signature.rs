use crate::abi::{
    event_selector, format_abi_item, function_selector, item_selector, normalize_signature,
    parse_abi, parse_abi_item, AbiError, Param, ParamType,
};
use alloy_primitives::{b256, hex};
use evmcodec_types::{AbiItem, AbiParameter, StateMutability};

#[test]
fn test_known_function_selectors() {
    assert_eq!(function_selector("transfer(address,uint256)").unwrap(), hex!("a9059cbb"));
    assert_eq!(function_selector("balanceOf(address)").unwrap(), hex!("70a08231"));
    assert_eq!(function_selector("approve(address,uint256)").unwrap(), hex!("095ea7b3"));
    assert_eq!(
        function_selector("f(uint256,uint32[],bytes10,bytes)").unwrap(),
        hex!("8be65246")
    );
    assert_eq!(function_selector("g(uint256[][],string[])").unwrap(), hex!("2289b18c"));
}

#[test]
fn test_selector_normalizes_human_readable_input() {
    assert_eq!(
        function_selector("function transfer(address to, uint256 amount) external returns (bool)")
            .unwrap(),
        hex!("a9059cbb")
    );
    assert_eq!(
        event_selector("event Transfer(address indexed from, address indexed to, uint256 value)")
            .unwrap(),
        b256!("ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef")
    );
}

#[test]
fn test_normalize_signature() {
    assert_eq!(
        normalize_signature("function transfer(address to, uint256 amount)").unwrap(),
        "transfer(address,uint256)"
    );
    assert_eq!(
        normalize_signature("function foo(uint a, (bool x, string[] y)[2] memory z)").unwrap(),
        "foo(uint256,(bool,string[])[2])"
    );
    assert_eq!(
        normalize_signature("error Unauthorized(address caller)").unwrap(),
        "Unauthorized(address)"
    );
    assert_eq!(
        normalize_signature("function bar(tuple(address,uint8)[] items)").unwrap(),
        "bar((address,uint8)[])"
    );
}

#[test]
fn test_parse_function_item() {
    let item = parse_abi_item(
        "function balanceOf(address owner) external view returns (uint256 balance)",
    )
    .unwrap();
    let AbiItem::Function(function) = item else { panic!("expected function") };

    assert_eq!(function.name, "balanceOf");
    assert_eq!(function.inputs, vec![AbiParameter::named("owner", "address")]);
    assert_eq!(function.outputs, vec![AbiParameter::named("balance", "uint256")]);
    assert_eq!(function.state_mutability, StateMutability::View);
}

#[test]
fn test_parse_event_and_tuple_components() {
    let item =
        parse_abi_item("event Swap(address indexed sender, (uint256 a, int24 b) info) anonymous")
            .unwrap();
    let AbiItem::Event(event) = item else { panic!("expected event") };

    assert!(event.anonymous);
    assert!(event.inputs[0].indexed);
    assert_eq!(event.inputs[1].ty, "tuple");
    assert_eq!(
        event.inputs[1].components,
        vec![AbiParameter::named("a", "uint256"), AbiParameter::named("b", "int24")]
    );
}

#[test]
fn test_parse_abi_and_definition_types() {
    let abi = parse_abi(&[
        "constructor(string name) payable",
        "",
        "fallback() external",
        "receive() external payable",
        "function set(uint256 value)",
    ])
    .unwrap();

    assert_eq!(abi.len(), 4);
    assert_eq!(abi[0].kind(), "constructor");
    assert_eq!(
        format_abi_item(&abi[0]).unwrap_err(),
        AbiError::InvalidDefinitionType("constructor")
    );
    assert_eq!(item_selector(&abi[3]).unwrap(), function_selector("set(uint256)").unwrap());
}

#[test]
fn test_param_type_validation() {
    assert_eq!(ParamType::parse("uint").unwrap(), ParamType::Uint(256));
    assert_eq!(ParamType::parse("int").unwrap(), ParamType::Int(256));
    assert_eq!(ParamType::parse("bytes32").unwrap(), ParamType::FixedBytes(32));
    for bad in ["uint7", "uint264", "int0", "bytes0", "bytes33", "strin", "uint08", "(uint8"] {
        assert!(ParamType::parse(bad).is_err(), "{bad} should be rejected");
    }

    let nested = ParamType::parse("uint8[2][]").unwrap();
    let ParamType::Array { len: None, inner } = &nested else { panic!("expected dynamic array") };
    assert_eq!(**inner, ParamType::Array { len: Some(2), inner: Box::new(ParamType::Uint(8)) });
    assert_eq!(nested.canonical(), "uint8[2][]");
}

#[test]
fn test_json_tuple_array_suffixes() {
    let param = AbiParameter::tuple(
        "tuple[3][]",
        vec![AbiParameter::named("x", "bool"), AbiParameter::named("y", "bytes")],
    );
    let resolved = Param::try_from(&param).unwrap();
    assert_eq!(resolved.kind.canonical(), "(bool,bytes)[3][]");
    assert!(resolved.kind.is_dynamic());

    // and back to JSON
    assert_eq!(resolved.to_abi().ty, "tuple[3][]");
    assert_eq!(resolved.to_abi().components.len(), 2);
}

#[test]
fn test_invalid_signatures() {
    assert!(matches!(parse_abi_item("transfer"), Err(AbiError::InvalidSignature { .. })));
    assert!(matches!(
        parse_abi_item("function f(uint256"),
        Err(AbiError::InvalidSignature { .. })
    ));
    assert!(matches!(parse_abi_item("function f(foo)"), Err(AbiError::InvalidAbiType(_))));
}
