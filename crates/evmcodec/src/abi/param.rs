use evmcodec_types::AbiParameter;

use super::AbiError;

/// A resolved ABI type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    Address,
    Bool,
    /// `uintN`, with N in bits.
    Uint(usize),
    /// `intN`, with N in bits.
    Int(usize),
    /// `bytesN`, with N in bytes.
    FixedBytes(usize),
    Bytes,
    String,
    Tuple(Vec<Param>),
    /// `T[]` when `len` is `None`, `T[N]` otherwise.
    Array { len: Option<usize>, inner: Box<ParamType> },
}

/// A typed, optionally named parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: Option<String>,
    pub kind: ParamType,
    pub indexed: bool,
}

impl Param {
    pub const fn new(kind: ParamType) -> Self {
        Self { name: None, kind, indexed: false }
    }

    pub fn named(name: impl Into<String>, kind: ParamType) -> Self {
        Self { name: Some(name.into()), kind, indexed: false }
    }

    /// Parse one human-readable parameter: `type [indexed] [location] [name]`.
    ///
    /// Tuple types may be written as `(...)` or `tuple(...)` and carry array suffixes.
    pub fn parse(source: &str) -> Result<Self, AbiError> {
        let source = source.trim();
        let type_end = type_token_end(source)?;
        let kind = ParamType::parse(&source[..type_end])?;

        let mut param = Self::new(kind);
        for word in source[type_end..].split_whitespace() {
            match word {
                "indexed" => param.indexed = true,
                "memory" | "calldata" | "storage" | "payable" => {}
                name if param.name.is_none() && is_identifier(name) => {
                    param.name = Some(name.to_string())
                }
                _ => {
                    return Err(AbiError::InvalidSignature {
                        signature: source.to_string(),
                        reason: "unexpected token in parameter",
                    })
                }
            }
        }
        Ok(param)
    }

    /// Parse a comma separated parameter list such as `uint256 a, (bool,string)[] b`.
    pub fn parse_list(source: &str) -> Result<Vec<Self>, AbiError> {
        split_top_level(source)?.into_iter().map(Self::parse).collect()
    }

    /// JSON ABI form of this parameter.
    pub fn to_abi(&self) -> AbiParameter {
        let mut suffix = String::new();
        let mut base = &self.kind;
        while let ParamType::Array { len, inner } = base {
            suffix.insert_str(0, &array_suffix(*len));
            base = inner;
        }

        let mut out = match base {
            ParamType::Tuple(components) => AbiParameter::tuple(
                format!("tuple{suffix}"),
                components.iter().map(Self::to_abi).collect(),
            ),
            _ => AbiParameter::new(self.kind.canonical()),
        };
        out.name = self.name.clone().unwrap_or_default();
        out.indexed = self.indexed;
        out
    }
}

impl TryFrom<&AbiParameter> for Param {
    type Error = AbiError;

    fn try_from(param: &AbiParameter) -> Result<Self, Self::Error> {
        let kind = match param.ty.strip_prefix("tuple") {
            Some(suffix) if suffix.is_empty() || suffix.starts_with('[') => {
                let components = params_from_abi(&param.components)?;
                apply_array_suffixes(ParamType::Tuple(components), suffix, &param.ty)?
            }
            _ => ParamType::parse(&param.ty)?,
        };
        let name = (!param.name.is_empty()).then(|| param.name.clone());
        Ok(Self { name, kind, indexed: param.indexed })
    }
}

/// Resolve a list of JSON ABI parameters.
pub fn params_from_abi(params: &[AbiParameter]) -> Result<Vec<Param>, AbiError> {
    params.iter().map(Param::try_from).collect()
}

impl ParamType {
    /// Parse a bare type string (`uint256`, `bytes32[2][]`, `(address,uint8)[]`).
    pub fn parse(ty: &str) -> Result<Self, AbiError> {
        let ty = ty.trim();
        let invalid = || AbiError::InvalidAbiType(ty.to_string());

        if ty.ends_with(']') {
            let open = ty.rfind('[').ok_or_else(invalid)?;
            let inner = Self::parse(&ty[..open])?;
            let len = match &ty[open + 1..ty.len() - 1] {
                "" => None,
                digits => Some(digits.parse::<usize>().map_err(|_| invalid())?),
            };
            return Ok(Self::Array { len, inner: Box::new(inner) });
        }

        if let Some(body) = ty.strip_prefix("tuple").filter(|rest| rest.starts_with('(')).or(
            ty.starts_with('(').then_some(ty),
        ) {
            if !body.ends_with(')') || matching_paren(body, 0) != Some(body.len() - 1) {
                return Err(invalid());
            }
            return Ok(Self::Tuple(Param::parse_list(&body[1..body.len() - 1])?));
        }

        match ty {
            "address" => Ok(Self::Address),
            "bool" => Ok(Self::Bool),
            "string" => Ok(Self::String),
            "bytes" => Ok(Self::Bytes),
            "uint" => Ok(Self::Uint(256)),
            "int" => Ok(Self::Int(256)),
            _ => {
                if let Some(bits) = ty.strip_prefix("uint") {
                    parse_int_bits(bits).map(Self::Uint).ok_or_else(invalid)
                } else if let Some(bits) = ty.strip_prefix("int") {
                    parse_int_bits(bits).map(Self::Int).ok_or_else(invalid)
                } else if let Some(size) = ty.strip_prefix("bytes") {
                    match size.parse::<usize>() {
                        Ok(n) if (1..=32).contains(&n) && !size.starts_with('0') => {
                            Ok(Self::FixedBytes(n))
                        }
                        _ => Err(invalid()),
                    }
                } else {
                    Err(invalid())
                }
            }
        }
    }

    /// Whether values of this type live in the tail of an encoding.
    pub fn is_dynamic(&self) -> bool {
        match self {
            Self::Bytes | Self::String | Self::Array { len: None, .. } => true,
            Self::Array { len: Some(_), inner } => inner.is_dynamic(),
            Self::Tuple(components) => components.iter().any(|p| p.kind.is_dynamic()),
            _ => false,
        }
    }

    /// Bytes this type occupies in the head of its enclosing region, saturating at
    /// `usize::MAX` for fixed arrays too large to address.
    pub fn head_size(&self) -> usize {
        if self.is_dynamic() {
            return 32;
        }
        match self {
            Self::Tuple(components) => components
                .iter()
                .fold(0usize, |acc, p| acc.saturating_add(p.kind.head_size())),
            Self::Array { len: Some(len), inner } => len.saturating_mul(inner.head_size()),
            _ => 32,
        }
    }

    /// Canonical type string as used in signatures; tuples render as `(a,b)`.
    pub fn canonical(&self) -> String {
        match self {
            Self::Address => "address".to_string(),
            Self::Bool => "bool".to_string(),
            Self::Uint(bits) => format!("uint{bits}"),
            Self::Int(bits) => format!("int{bits}"),
            Self::FixedBytes(size) => format!("bytes{size}"),
            Self::Bytes => "bytes".to_string(),
            Self::String => "string".to_string(),
            Self::Tuple(components) => {
                let inner: Vec<String> = components.iter().map(|p| p.kind.canonical()).collect();
                format!("({})", inner.join(","))
            }
            Self::Array { len, inner } => format!("{}{}", inner.canonical(), array_suffix(*len)),
        }
    }
}

fn array_suffix(len: Option<usize>) -> String {
    match len {
        Some(len) => format!("[{len}]"),
        None => "[]".to_string(),
    }
}

fn apply_array_suffixes(mut kind: ParamType, suffix: &str, ty: &str) -> Result<ParamType, AbiError> {
    let mut rest = suffix;
    while !rest.is_empty() {
        let close = match rest.strip_prefix('[').and_then(|r| r.find(']')) {
            Some(close) => close + 1,
            None => return Err(AbiError::InvalidAbiType(ty.to_string())),
        };
        let len = match &rest[1..close] {
            "" => None,
            digits => Some(
                digits.parse::<usize>().map_err(|_| AbiError::InvalidAbiType(ty.to_string()))?,
            ),
        };
        kind = ParamType::Array { len, inner: Box::new(kind) };
        rest = &rest[close + 1..];
    }
    Ok(kind)
}

fn parse_int_bits(bits: &str) -> Option<usize> {
    if bits.starts_with('0') {
        return None;
    }
    bits.parse::<usize>().ok().filter(|n| n % 8 == 0 && (8..=256).contains(n))
}

fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// End (exclusive) of the type token at the start of a parameter.
fn type_token_end(source: &str) -> Result<usize, AbiError> {
    let unbalanced = || AbiError::InvalidSignature {
        signature: source.to_string(),
        reason: "unbalanced parentheses",
    };

    let open = if source.starts_with('(') {
        Some(0)
    } else if source.starts_with("tuple(") {
        Some(5)
    } else {
        None
    };

    let mut end = match open {
        Some(open) => matching_paren(source, open).ok_or_else(unbalanced)? + 1,
        None => source.find(|c: char| c.is_whitespace() || c == '[').unwrap_or(source.len()),
    };

    while source[end..].starts_with('[') {
        end += source[end..].find(']').ok_or_else(unbalanced)? + 1;
    }
    Ok(end)
}

/// Index of the `)` closing the `(` at `open`.
pub(super) fn matching_paren(source: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, byte) in source.bytes().enumerate().skip(open) {
        match byte {
            b'(' => depth += 1,
            b')' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split on commas that are not nested inside parentheses. Empty input yields no parts.
pub(super) fn split_top_level(source: &str) -> Result<Vec<&str>, AbiError> {
    if source.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, byte) in source.bytes().enumerate() {
        match byte {
            b'(' => depth += 1,
            b')' => {
                depth = depth.checked_sub(1).ok_or_else(|| AbiError::InvalidSignature {
                    signature: source.to_string(),
                    reason: "unbalanced parentheses",
                })?
            }
            b',' if depth == 0 => {
                parts.push(source[start..idx].trim());
                start = idx + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(AbiError::InvalidSignature {
            signature: source.to_string(),
            reason: "unbalanced parentheses",
        });
    }
    parts.push(source[start..].trim());
    Ok(parts)
}
