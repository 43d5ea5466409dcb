//! Typed call arguments and their canonical encoding.
//!
//! An [`Arg`] is a `(name, value)` pair; [`RuntimeArgs`] is the ordered list
//! passed to session or payment code. Every [`ArgValue`] is written as a
//! one-byte type tag followed by its payload, so the node's decoder can
//! recover the variant without any out-of-band schema.
//!
//! Validation happens at encode time: a value whose runtime shape does not
//! match its declared type (a negative number tagged as unsigned, a big
//! integer wider than its declared width, a list mixing element types) is an
//! [`EncodingError`], never a silently truncated value.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::codec::{hex_array, hex_bytes, write_len, write_string, EncodingError, Reader, ToBytes};

// ---------------------------------------------------------------------------
// Type tags
// ---------------------------------------------------------------------------

pub const TAG_BOOL: u8 = 0;
pub const TAG_I32: u8 = 1;
pub const TAG_I64: u8 = 2;
pub const TAG_U8: u8 = 3;
pub const TAG_U32: u8 = 4;
pub const TAG_U64: u8 = 5;
pub const TAG_U128: u8 = 6;
pub const TAG_U256: u8 = 7;
pub const TAG_U512: u8 = 8;
pub const TAG_STRING: u8 = 10;
pub const TAG_KEY: u8 = 11;
pub const TAG_OPTION: u8 = 13;
pub const TAG_LIST: u8 = 14;
pub const TAG_BYTES: u8 = 15;

const KEY_TAG_ACCOUNT: u8 = 0;
const KEY_TAG_HASH: u8 = 1;
const KEY_TAG_UREF: u8 = 2;

/// Highest valid URef access-rights value (`READ | WRITE | ADD`).
pub const ACCESS_RIGHTS_MAX: u8 = 0b111;

/// Maximum depth of nested options and lists, on both encode and decode.
const MAX_NESTING: usize = 32;

// ---------------------------------------------------------------------------
// BigUintWidth
// ---------------------------------------------------------------------------

/// Declared width of an arbitrary-precision unsigned integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BigUintWidth {
    U128,
    U256,
    U512,
}

impl BigUintWidth {
    pub fn bits(self) -> usize {
        match self {
            Self::U128 => 128,
            Self::U256 => 256,
            Self::U512 => 512,
        }
    }

    fn tag(self) -> u8 {
        match self {
            Self::U128 => TAG_U128,
            Self::U256 => TAG_U256,
            Self::U512 => TAG_U512,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::U128 => "U128",
            Self::U256 => "U256",
            Self::U512 => "U512",
        }
    }
}

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// A reference to something in global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    /// An account, by account hash.
    Account(#[serde(with = "hex_array")] [u8; 32]),
    /// A stored contract or other hash-addressed value.
    Hash(#[serde(with = "hex_array")] [u8; 32]),
    /// An unforgeable reference with its access rights bit set.
    URef {
        #[serde(with = "hex_array")]
        address: [u8; 32],
        access_rights: u8,
    },
}

impl Key {
    fn write(&self, buf: &mut Vec<u8>) -> Result<(), EncodingError> {
        match self {
            Self::Account(hash) => {
                buf.push(KEY_TAG_ACCOUNT);
                buf.extend_from_slice(hash);
            }
            Self::Hash(hash) => {
                buf.push(KEY_TAG_HASH);
                buf.extend_from_slice(hash);
            }
            Self::URef {
                address,
                access_rights,
            } => {
                if *access_rights > ACCESS_RIGHTS_MAX {
                    return Err(EncodingError::InvalidAccessRights(*access_rights));
                }
                buf.push(KEY_TAG_UREF);
                buf.extend_from_slice(address);
                buf.push(*access_rights);
            }
        }
        Ok(())
    }

    fn read(reader: &mut Reader<'_>) -> Result<Self, EncodingError> {
        match reader.read_u8()? {
            KEY_TAG_ACCOUNT => Ok(Self::Account(reader.read_array()?)),
            KEY_TAG_HASH => Ok(Self::Hash(reader.read_array()?)),
            KEY_TAG_UREF => {
                let address = reader.read_array()?;
                let access_rights = reader.read_u8()?;
                if access_rights > ACCESS_RIGHTS_MAX {
                    return Err(EncodingError::InvalidAccessRights(access_rights));
                }
                Ok(Self::URef {
                    address,
                    access_rights,
                })
            }
            other => Err(EncodingError::UnknownTag(other)),
        }
    }
}

// ---------------------------------------------------------------------------
// ArgValue
// ---------------------------------------------------------------------------

/// A typed argument value. One variant per supported wire type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ArgValue {
    Bool(bool),
    I32(i32),
    I64(i64),
    U8(u8),
    U32(u32),
    U64(u64),
    /// Unsigned integer of a declared width, given in decimal.
    BigUint { width: BigUintWidth, value: String },
    Bytes(#[serde(with = "hex_bytes")] Vec<u8>),
    String(String),
    Option(Option<Box<ArgValue>>),
    /// Homogeneous list: every element must have the same type, down to
    /// nested options and lists. `None` and empty lists fit any inner type.
    List(Vec<ArgValue>),
    Key(Key),
}

impl ArgValue {
    /// A `U512` value, the width the network uses for token amounts.
    pub fn u512(value: impl Into<u128>) -> Self {
        Self::BigUint {
            width: BigUintWidth::U512,
            value: value.into().to_string(),
        }
    }

    /// A big unsigned integer given as a decimal string. Checked at encode time.
    pub fn big_uint(width: BigUintWidth, decimal: impl Into<String>) -> Self {
        Self::BigUint {
            width,
            value: decimal.into(),
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    pub fn some(value: ArgValue) -> Self {
        Self::Option(Some(Box::new(value)))
    }

    /// The type tag this value is written with.
    pub fn tag(&self) -> u8 {
        match self {
            Self::Bool(_) => TAG_BOOL,
            Self::I32(_) => TAG_I32,
            Self::I64(_) => TAG_I64,
            Self::U8(_) => TAG_U8,
            Self::U32(_) => TAG_U32,
            Self::U64(_) => TAG_U64,
            Self::BigUint { width, .. } => width.tag(),
            Self::Bytes(_) => TAG_BYTES,
            Self::String(_) => TAG_STRING,
            Self::Option(_) => TAG_OPTION,
            Self::List(_) => TAG_LIST,
            Self::Key(_) => TAG_KEY,
        }
    }

    /// Decodes exactly one tagged value, rejecting trailing bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EncodingError> {
        let mut reader = Reader::new(bytes);
        let value = Self::read(&mut reader, 0)?;
        reader.finish()?;
        Ok(value)
    }

    fn read(reader: &mut Reader<'_>, depth: usize) -> Result<Self, EncodingError> {
        check_depth(depth)?;
        let value = match reader.read_u8()? {
            TAG_BOOL => match reader.read_u8()? {
                0 => Self::Bool(false),
                1 => Self::Bool(true),
                other => return Err(EncodingError::InvalidFlag(other)),
            },
            TAG_I32 => Self::I32(reader.read_i32()?),
            TAG_I64 => Self::I64(reader.read_i64()?),
            TAG_U8 => Self::U8(reader.read_u8()?),
            TAG_U32 => Self::U32(reader.read_u32()?),
            TAG_U64 => Self::U64(reader.read_u64()?),
            TAG_U128 => read_big_uint(reader, BigUintWidth::U128)?,
            TAG_U256 => read_big_uint(reader, BigUintWidth::U256)?,
            TAG_U512 => read_big_uint(reader, BigUintWidth::U512)?,
            TAG_BYTES => Self::Bytes(reader.read_bytes()?),
            TAG_STRING => Self::String(reader.read_string()?),
            TAG_OPTION => match reader.read_u8()? {
                0 => Self::Option(None),
                1 => Self::some(Self::read(reader, depth + 1)?),
                other => return Err(EncodingError::InvalidFlag(other)),
            },
            TAG_LIST => {
                let count = reader.read_len()?;
                let mut items = Vec::new();
                for _ in 0..count {
                    items.push(Self::read(reader, depth + 1)?);
                }
                element_shape(&items, depth + 1)?;
                Self::List(items)
            }
            TAG_KEY => Self::Key(Key::read(reader)?),
            other => return Err(EncodingError::UnknownTag(other)),
        };
        Ok(value)
    }

    fn write(&self, buf: &mut Vec<u8>, depth: usize) -> Result<(), EncodingError> {
        check_depth(depth)?;
        buf.push(self.tag());
        match self {
            Self::Bool(b) => buf.push(u8::from(*b)),
            Self::I32(v) => buf.extend_from_slice(&v.to_le_bytes()),
            Self::I64(v) => buf.extend_from_slice(&v.to_le_bytes()),
            Self::U8(v) => buf.push(*v),
            Self::U32(v) => buf.extend_from_slice(&v.to_le_bytes()),
            Self::U64(v) => buf.extend_from_slice(&v.to_le_bytes()),
            Self::BigUint { width, value } => {
                let magnitude = parse_decimal(*width, value)?;
                // Bounded by 64 bytes (U512), so the length fits in one byte.
                buf.push(magnitude.len() as u8);
                buf.extend_from_slice(&magnitude);
            }
            Self::Bytes(bytes) => super::codec::write_bytes(buf, bytes)?,
            Self::String(s) => write_string(buf, s)?,
            Self::Option(None) => buf.push(0),
            Self::Option(Some(inner)) => {
                buf.push(1);
                inner.write(buf, depth + 1)?;
            }
            Self::List(items) => {
                element_shape(items, depth + 1)?;
                write_len(buf, items.len())?;
                for item in items {
                    item.write(buf, depth + 1)?;
                }
            }
            Self::Key(key) => key.write(buf)?,
        }
        Ok(())
    }

    fn shape(&self, depth: usize) -> Result<Shape, EncodingError> {
        check_depth(depth)?;
        Ok(match self {
            Self::Option(None) => Shape::Option(None),
            Self::Option(Some(inner)) => Shape::Option(Some(Box::new(inner.shape(depth + 1)?))),
            Self::List(items) => Shape::List(element_shape(items, depth + 1)?.map(Box::new)),
            other => Shape::Leaf(other.tag()),
        })
    }
}

impl ToBytes for ArgValue {
    fn write_bytes(&self, buf: &mut Vec<u8>) -> Result<(), EncodingError> {
        self.write(buf, 0)
    }
}

fn check_depth(depth: usize) -> Result<(), EncodingError> {
    if depth > MAX_NESTING {
        return Err(EncodingError::NestingTooDeep(MAX_NESTING));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// List element types
// ---------------------------------------------------------------------------

/// Structural type of a value. An inner `None` means "not pinned down yet",
/// as for `Option(None)` or an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Shape {
    Leaf(u8),
    Option(Option<Box<Shape>>),
    List(Option<Box<Shape>>),
}

impl Shape {
    fn tag(&self) -> u8 {
        match self {
            Self::Leaf(tag) => *tag,
            Self::Option(_) => TAG_OPTION,
            Self::List(_) => TAG_LIST,
        }
    }
}

/// The single type shared by every element, or `None` for a list that does
/// not pin one down. Mismatches report the tags where the types diverge.
fn element_shape(items: &[ArgValue], depth: usize) -> Result<Option<Shape>, EncodingError> {
    let mut common: Option<Shape> = None;
    for item in items {
        let shape = item.shape(depth)?;
        common = Some(match common {
            None => shape,
            Some(known) => unify(known, shape)?,
        });
    }
    Ok(common)
}

fn unify(known: Shape, found: Shape) -> Result<Shape, EncodingError> {
    match (known, found) {
        (Shape::Leaf(a), Shape::Leaf(b)) if a == b => Ok(Shape::Leaf(a)),
        (Shape::Option(a), Shape::Option(b)) => Ok(Shape::Option(unify_inner(a, b)?)),
        (Shape::List(a), Shape::List(b)) => Ok(Shape::List(unify_inner(a, b)?)),
        (known, found) => Err(EncodingError::HeterogeneousList {
            expected: known.tag(),
            found: found.tag(),
        }),
    }
}

fn unify_inner(
    known: Option<Box<Shape>>,
    found: Option<Box<Shape>>,
) -> Result<Option<Box<Shape>>, EncodingError> {
    match (known, found) {
        (Some(a), Some(b)) => Ok(Some(Box::new(unify(*a, *b)?))),
        (shape, None) | (None, shape) => Ok(shape),
    }
}

/// Parses a decimal string into its minimal little-endian magnitude.
///
/// Leading zeros are accepted and do not affect the output, so logically
/// equal values always encode identically.
fn parse_decimal(width: BigUintWidth, value: &str) -> Result<Vec<u8>, EncodingError> {
    if value.starts_with('-') {
        return Err(EncodingError::NegativeUnsigned {
            width: width.name(),
            value: value.to_string(),
        });
    }
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EncodingError::InvalidDecimal {
            width: width.name(),
            value: value.to_string(),
        });
    }

    let max_len = width.bits() / 8;
    let mut magnitude: Vec<u8> = Vec::with_capacity(max_len);
    for digit in value.bytes().map(|b| b - b'0') {
        let mut carry = u16::from(digit);
        for byte in magnitude.iter_mut() {
            let v = u16::from(*byte) * 10 + carry;
            *byte = (v & 0xff) as u8;
            carry = v >> 8;
        }
        if carry > 0 {
            magnitude.push(carry as u8);
        }
        if magnitude.len() > max_len {
            return Err(EncodingError::Overflow {
                width: width.name(),
                value: value.to_string(),
                bits: width.bits(),
            });
        }
    }
    Ok(magnitude)
}

fn read_big_uint(reader: &mut Reader<'_>, width: BigUintWidth) -> Result<ArgValue, EncodingError> {
    let len = usize::from(reader.read_u8()?);
    if len > width.bits() / 8 {
        return Err(EncodingError::Overflow {
            width: width.name(),
            value: format!("<{len} bytes>"),
            bits: width.bits(),
        });
    }
    let magnitude = reader.read_slice(len)?;
    if magnitude.last() == Some(&0) {
        return Err(EncodingError::NonCanonicalInteger);
    }
    Ok(ArgValue::BigUint {
        width,
        value: to_decimal(magnitude),
    })
}

/// Renders a little-endian magnitude as a decimal string.
fn to_decimal(magnitude: &[u8]) -> String {
    let mut limbs: Vec<u8> = magnitude.iter().rev().copied().collect();
    let mut digits = Vec::new();
    while limbs.iter().any(|b| *b != 0) {
        let mut remainder = 0u16;
        for limb in limbs.iter_mut() {
            let v = (remainder << 8) | u16::from(*limb);
            *limb = (v / 10) as u8;
            remainder = v % 10;
        }
        digits.push(b'0' + remainder as u8);
    }
    if digits.is_empty() {
        return "0".to_string();
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Arg / RuntimeArgs
// ---------------------------------------------------------------------------

/// A single named argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arg {
    pub name: String,
    pub value: ArgValue,
}

impl Arg {
    pub fn new(name: impl Into<String>, value: ArgValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Encodes an ordered argument list.
///
/// Layout: `u32` count, then for each argument its length-prefixed name and
/// its tagged value. Names must be non-empty and unique. Pure: the same list
/// always yields the same bytes.
pub fn encode_args(args: &[Arg]) -> Result<Vec<u8>, EncodingError> {
    let mut buf = Vec::with_capacity(16 * args.len() + 4);
    write_args(&mut buf, args)?;
    Ok(buf)
}

fn write_args(buf: &mut Vec<u8>, args: &[Arg]) -> Result<(), EncodingError> {
    let mut seen = HashSet::with_capacity(args.len());
    write_len(buf, args.len())?;
    for arg in args {
        if arg.name.is_empty() {
            return Err(EncodingError::EmptyArgName);
        }
        if !seen.insert(arg.name.as_str()) {
            return Err(EncodingError::DuplicateArgName(arg.name.clone()));
        }
        write_string(buf, &arg.name)?;
        arg.value.write_bytes(buf)?;
    }
    Ok(())
}

/// Decodes an argument list produced by [`encode_args`].
pub fn decode_args(bytes: &[u8]) -> Result<RuntimeArgs, EncodingError> {
    let mut reader = Reader::new(bytes);
    let args = RuntimeArgs::read(&mut reader)?;
    reader.finish()?;
    Ok(args)
}

/// Ordered argument list passed to session or payment code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuntimeArgs(Vec<Arg>);

impl RuntimeArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an argument, builder style.
    pub fn with(mut self, name: impl Into<String>, value: ArgValue) -> Self {
        self.0.push(Arg::new(name, value));
        self
    }

    pub fn push(&mut self, arg: Arg) {
        self.0.push(arg);
    }

    /// Looks up an argument by name.
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.0.iter().find(|arg| arg.name == name).map(|arg| &arg.value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arg> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Arg] {
        &self.0
    }

    /// Checks every argument encodes, without keeping the bytes.
    pub fn validate(&self) -> Result<(), EncodingError> {
        encode_args(&self.0).map(|_| ())
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> Result<Self, EncodingError> {
        let count = reader.read_len()?;
        let mut args = Vec::new();
        let mut seen = HashSet::new();
        for _ in 0..count {
            let name = reader.read_string()?;
            if name.is_empty() {
                return Err(EncodingError::EmptyArgName);
            }
            if !seen.insert(name.clone()) {
                return Err(EncodingError::DuplicateArgName(name));
            }
            let value = ArgValue::read(reader, 0)?;
            args.push(Arg { name, value });
        }
        Ok(Self(args))
    }
}

impl ToBytes for RuntimeArgs {
    fn write_bytes(&self, buf: &mut Vec<u8>) -> Result<(), EncodingError> {
        write_args(buf, &self.0)
    }
}

impl From<Vec<Arg>> for RuntimeArgs {
    fn from(args: Vec<Arg>) -> Self {
        Self(args)
    }
}

impl FromIterator<Arg> for RuntimeArgs {
    fn from_iter<I: IntoIterator<Item = Arg>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RuntimeArgs {
    type Item = &'a Arg;
    type IntoIter = std::slice::Iter<'a, Arg>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const U128_MAX: &str = "340282366920938463463374607431768211455";
    const U128_MAX_PLUS_ONE: &str = "340282366920938463463374607431768211456";

    #[test]
    fn encode_is_deterministic() {
        let args = vec![
            Arg::new("purse_name", ArgValue::string("my_purse")),
            Arg::new("amount", ArgValue::u512(10_000u64)),
        ];
        assert_eq!(encode_args(&args).unwrap(), encode_args(&args).unwrap());
    }

    #[test]
    fn string_arg_exact_bytes() {
        let bytes = encode_args(&[Arg::new("n", ArgValue::string("ab"))]).unwrap();
        assert_eq!(
            bytes,
            vec![1, 0, 0, 0, 1, 0, 0, 0, b'n', TAG_STRING, 2, 0, 0, 0, b'a', b'b']
        );
    }

    #[test]
    fn u512_amount_exact_bytes() {
        // 10_000 = 0x2710, minimal little-endian magnitude [0x10, 0x27].
        let bytes = ArgValue::u512(10_000u64).to_bytes().unwrap();
        assert_eq!(bytes, vec![TAG_U512, 2, 0x10, 0x27]);
    }

    #[test]
    fn zero_big_uint_has_empty_magnitude() {
        let bytes = ArgValue::u512(0u64).to_bytes().unwrap();
        assert_eq!(bytes, vec![TAG_U512, 0]);
    }

    #[test]
    fn leading_zeros_do_not_change_encoding() {
        let a = ArgValue::big_uint(BigUintWidth::U256, "0042").to_bytes().unwrap();
        let b = ArgValue::big_uint(BigUintWidth::U256, "42").to_bytes().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn negative_unsigned_is_rejected() {
        let err = ArgValue::big_uint(BigUintWidth::U512, "-5").to_bytes().unwrap_err();
        assert!(matches!(err, EncodingError::NegativeUnsigned { .. }));
    }

    #[test]
    fn non_decimal_is_rejected() {
        for bad in ["", "12a", "+7", "1.5", " 1"] {
            let err = ArgValue::big_uint(BigUintWidth::U128, bad).to_bytes().unwrap_err();
            assert!(
                matches!(err, EncodingError::InvalidDecimal { .. }),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn width_boundary_is_enforced() {
        let max = ArgValue::big_uint(BigUintWidth::U128, U128_MAX).to_bytes().unwrap();
        assert_eq!(max[1], 16);
        assert!(max[2..].iter().all(|b| *b == 0xff));

        let err = ArgValue::big_uint(BigUintWidth::U128, U128_MAX_PLUS_ONE)
            .to_bytes()
            .unwrap_err();
        assert!(matches!(err, EncodingError::Overflow { bits: 128, .. }));

        // The same value is fine once the declared width allows it.
        assert!(ArgValue::big_uint(BigUintWidth::U256, U128_MAX_PLUS_ONE)
            .to_bytes()
            .is_ok());
    }

    #[test]
    fn heterogeneous_list_is_rejected() {
        let list = ArgValue::List(vec![ArgValue::U32(1), ArgValue::U64(2)]);
        assert_eq!(
            list.to_bytes().unwrap_err(),
            EncodingError::HeterogeneousList {
                expected: TAG_U32,
                found: TAG_U64
            }
        );
    }

    #[test]
    fn nested_element_types_must_match() {
        let options = ArgValue::List(vec![
            ArgValue::some(ArgValue::U8(1)),
            ArgValue::some(ArgValue::string("x")),
        ]);
        assert_eq!(
            options.to_bytes().unwrap_err(),
            EncodingError::HeterogeneousList {
                expected: TAG_U8,
                found: TAG_STRING
            }
        );

        let lists = ArgValue::List(vec![
            ArgValue::List(vec![ArgValue::U8(1)]),
            ArgValue::List(vec![ArgValue::string("x")]),
        ]);
        assert_eq!(
            lists.to_bytes().unwrap_err(),
            EncodingError::HeterogeneousList {
                expected: TAG_U8,
                found: TAG_STRING
            }
        );
    }

    #[test]
    fn none_and_empty_list_fit_any_element_type() {
        let options = ArgValue::List(vec![
            ArgValue::Option(None),
            ArgValue::some(ArgValue::U64(1)),
            ArgValue::Option(None),
        ]);
        let bytes = options.to_bytes().unwrap();
        assert_eq!(ArgValue::from_bytes(&bytes).unwrap(), options);

        let lists = ArgValue::List(vec![
            ArgValue::List(Vec::new()),
            ArgValue::List(vec![ArgValue::Bool(true)]),
        ]);
        assert!(lists.to_bytes().is_ok());

        // A `None` in between does not hide a later mismatch.
        let mixed = ArgValue::List(vec![
            ArgValue::some(ArgValue::U8(1)),
            ArgValue::Option(None),
            ArgValue::some(ArgValue::U32(2)),
        ]);
        assert_eq!(
            mixed.to_bytes().unwrap_err(),
            EncodingError::HeterogeneousList {
                expected: TAG_U8,
                found: TAG_U32
            }
        );
    }

    #[test]
    fn decode_rejects_nested_mixed_list() {
        // List of two options: Some(U8 1), Some(String "x").
        let bytes = vec![
            TAG_LIST, 2, 0, 0, 0,
            TAG_OPTION, 1, TAG_U8, 1,
            TAG_OPTION, 1, TAG_STRING, 1, 0, 0, 0, b'x',
        ];
        assert_eq!(
            ArgValue::from_bytes(&bytes).unwrap_err(),
            EncodingError::HeterogeneousList {
                expected: TAG_U8,
                found: TAG_STRING
            }
        );
    }

    #[test]
    fn invalid_access_rights_are_rejected() {
        let key = ArgValue::Key(Key::URef {
            address: [1; 32],
            access_rights: 0b1000,
        });
        assert_eq!(
            key.to_bytes().unwrap_err(),
            EncodingError::InvalidAccessRights(0b1000)
        );
    }

    #[test]
    fn duplicate_and_empty_names_are_rejected() {
        let dup = vec![
            Arg::new("amount", ArgValue::U64(1)),
            Arg::new("amount", ArgValue::U64(2)),
        ];
        assert_eq!(
            encode_args(&dup).unwrap_err(),
            EncodingError::DuplicateArgName("amount".into())
        );
        assert_eq!(
            encode_args(&[Arg::new("", ArgValue::Bool(true))]).unwrap_err(),
            EncodingError::EmptyArgName
        );
    }

    #[test]
    fn decode_recovers_every_variant() {
        let args = RuntimeArgs::new()
            .with("flag", ArgValue::Bool(true))
            .with("delta", ArgValue::I32(-7))
            .with("big_delta", ArgValue::I64(i64::MIN))
            .with("byte", ArgValue::U8(255))
            .with("count", ArgValue::U32(42))
            .with("nonce", ArgValue::U64(u64::MAX))
            .with("amount", ArgValue::big_uint(BigUintWidth::U512, U128_MAX_PLUS_ONE))
            .with("wasm", ArgValue::Bytes(vec![0, 97, 115, 109]))
            .with("purse_name", ArgValue::string("my_purse"))
            .with("maybe", ArgValue::some(ArgValue::U64(5)))
            .with("nothing", ArgValue::Option(None))
            .with(
                "targets",
                ArgValue::List(vec![
                    ArgValue::Key(Key::Account([2; 32])),
                    ArgValue::Key(Key::URef {
                        address: [3; 32],
                        access_rights: 7,
                    }),
                ]),
            );
        let bytes = args.to_bytes().unwrap();
        assert_eq!(decode_args(&bytes).unwrap(), args);
    }

    #[test]
    fn decode_rejects_unknown_tag() {
        // One arg named "x" with tag 9 (unassigned).
        let bytes = vec![1, 0, 0, 0, 1, 0, 0, 0, b'x', 9];
        assert_eq!(decode_args(&bytes).unwrap_err(), EncodingError::UnknownTag(9));
    }

    #[test]
    fn decode_rejects_trailing_bytes() {
        let mut bytes = encode_args(&[Arg::new("x", ArgValue::U8(1))]).unwrap();
        bytes.push(0);
        assert_eq!(decode_args(&bytes).unwrap_err(), EncodingError::TrailingBytes(1));
    }

    #[test]
    fn decode_rejects_non_minimal_big_uint() {
        assert_eq!(
            ArgValue::from_bytes(&[TAG_U512, 2, 0x10, 0x00]).unwrap_err(),
            EncodingError::NonCanonicalInteger
        );
    }

    #[test]
    fn decode_limits_nesting() {
        let mut bytes = Vec::new();
        for _ in 0..=MAX_NESTING + 1 {
            bytes.extend_from_slice(&[TAG_OPTION, 1]);
        }
        bytes.extend_from_slice(&[TAG_U8, 0]);
        assert_eq!(
            ArgValue::from_bytes(&bytes).unwrap_err(),
            EncodingError::NestingTooDeep(MAX_NESTING)
        );
    }

    fn nested_options(depth: usize) -> ArgValue {
        (0..depth).fold(ArgValue::U8(0), |inner, _| ArgValue::some(inner))
    }

    #[test]
    fn encode_and_decode_share_nesting_limit() {
        let deepest = nested_options(MAX_NESTING);
        let bytes = deepest.to_bytes().unwrap();
        assert_eq!(ArgValue::from_bytes(&bytes).unwrap(), deepest);

        assert_eq!(
            nested_options(MAX_NESTING + 1).to_bytes().unwrap_err(),
            EncodingError::NestingTooDeep(MAX_NESTING)
        );
        assert_eq!(
            encode_args(&[Arg::new("deep", nested_options(MAX_NESTING + 1))]).unwrap_err(),
            EncodingError::NestingTooDeep(MAX_NESTING)
        );
    }

    #[test]
    fn deep_lists_are_limited_too() {
        let deep = (0..=MAX_NESTING).fold(ArgValue::U8(0), |inner, _| ArgValue::List(vec![inner]));
        assert_eq!(
            deep.to_bytes().unwrap_err(),
            EncodingError::NestingTooDeep(MAX_NESTING)
        );
    }

    #[test]
    fn json_shape_is_tagged() {
        let json = serde_json::to_value(ArgValue::u512(10_000u64)).unwrap();
        assert_eq!(json["type"], "big_uint");
        assert_eq!(json["value"]["width"], "u512");
        assert_eq!(json["value"]["value"], "10000");
    }
}
