//! Parsing of `--session-arg name:type='value'` flags into typed arguments.
//!
//! Supported types: `bool`, `i32`, `i64`, `u8`, `u32`, `u64`, `u128`,
//! `u256`, `u512`, `string`, `bytes` (hex), `account_key` and `hash_key`
//! (hex, 32 bytes). Prefix a type with `opt_` for an optional value; the
//! value `null` then means "none".

use anyhow::{anyhow, bail, Context, Result};

use casperlabs_deploy::deploy::{Arg, ArgValue, BigUintWidth, Key, RuntimeArgs};

/// Parses every flag, keeping the order they were given in.
pub fn parse_session_args(raw: &[String]) -> Result<RuntimeArgs> {
    raw.iter()
        .map(|s| parse_arg(s).with_context(|| format!("invalid session argument {s:?}")))
        .collect()
}

/// Parses a single `name:type='value'`.
pub fn parse_arg(raw: &str) -> Result<Arg> {
    let (name, rest) = raw
        .split_once(':')
        .ok_or_else(|| anyhow!("expected name:type='value'"))?;
    let (ty, quoted) = rest
        .split_once('=')
        .ok_or_else(|| anyhow!("expected name:type='value'"))?;
    let value = quoted
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
        .ok_or_else(|| anyhow!("value must be wrapped in single quotes"))?;

    let name = name.trim();
    if name.is_empty() {
        bail!("argument name is empty");
    }
    Ok(Arg::new(name, parse_value(ty.trim(), value)?))
}

fn parse_value(ty: &str, value: &str) -> Result<ArgValue> {
    if let Some(inner) = ty.strip_prefix("opt_") {
        return Ok(match value {
            "null" => ArgValue::Option(None),
            v => ArgValue::some(parse_value(inner, v)?),
        });
    }

    let parsed = match ty {
        "bool" => ArgValue::Bool(value.parse().context("expected true or false")?),
        "i32" => ArgValue::I32(value.parse().context("expected an i32")?),
        "i64" => ArgValue::I64(value.parse().context("expected an i64")?),
        "u8" => ArgValue::U8(value.parse().context("expected a u8")?),
        "u32" => ArgValue::U32(value.parse().context("expected a u32")?),
        "u64" => ArgValue::U64(value.parse().context("expected a u64")?),
        // Range checks for big integers happen at encode time.
        "u128" => ArgValue::big_uint(BigUintWidth::U128, value),
        "u256" => ArgValue::big_uint(BigUintWidth::U256, value),
        "u512" => ArgValue::big_uint(BigUintWidth::U512, value),
        "string" => ArgValue::string(value),
        "bytes" => ArgValue::Bytes(hex::decode(value).context("expected hex bytes")?),
        "account_key" => ArgValue::Key(Key::Account(parse_hash(value)?)),
        "hash_key" => ArgValue::Key(Key::Hash(parse_hash(value)?)),
        other => bail!("unknown argument type {other:?}"),
    };
    Ok(parsed)
}

fn parse_hash(value: &str) -> Result<[u8; 32]> {
    let mut out = [0u8; 32];
    hex::decode_to_slice(value, &mut out).context("expected 32 hex-encoded bytes")?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_string_arg() {
        let arg = parse_arg("purse_name:string='my_purse'").unwrap();
        assert_eq!(arg.name, "purse_name");
        assert_eq!(arg.value, ArgValue::string("my_purse"));
    }

    #[test]
    fn value_may_contain_separators() {
        let arg = parse_arg("memo:string='a:b=c'").unwrap();
        assert_eq!(arg.value, ArgValue::string("a:b=c"));
    }

    #[test]
    fn parses_numbers_and_keys() {
        assert_eq!(parse_arg("n:u64='7'").unwrap().value, ArgValue::U64(7));
        assert_eq!(parse_arg("n:i32='-7'").unwrap().value, ArgValue::I32(-7));
        assert_eq!(
            parse_arg("amount:u512='10000'").unwrap().value,
            ArgValue::u512(10_000u64)
        );
        let hex32 = "11".repeat(32);
        assert_eq!(
            parse_arg(&format!("target:account_key='{hex32}'")).unwrap().value,
            ArgValue::Key(Key::Account([0x11; 32]))
        );
    }

    #[test]
    fn parses_optional_values() {
        assert_eq!(
            parse_arg("amount:opt_u512='null'").unwrap().value,
            ArgValue::Option(None)
        );
        assert_eq!(
            parse_arg("amount:opt_u512='5'").unwrap().value,
            ArgValue::some(ArgValue::u512(5u64))
        );
    }

    #[test]
    fn rejects_malformed_flags() {
        assert!(parse_arg("no_type").is_err());
        assert!(parse_arg("n:u64=7").is_err());
        assert!(parse_arg(":u64='7'").is_err());
        assert!(parse_arg("n:float='1.0'").is_err());
        assert!(parse_arg("n:u8='256'").is_err());
        assert!(parse_arg("k:hash_key='abcd'").is_err());
    }

    #[test]
    fn keeps_flag_order() {
        let raw = vec!["b:u8='1'".to_string(), "a:u8='2'".to_string()];
        let args = parse_session_args(&raw).unwrap();
        let names: Vec<_> = args.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
