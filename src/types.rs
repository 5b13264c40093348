/*!
The UPnP wire-type codec (component A): convert between UPnP datatype
strings (`ui1`..`ui8`, `i1`..`i8`, `int`, `r4`/`r8`/`float`/`number`,
`boolean`, `string`, `bin.base64`, `bin.hex`, `uri`, `date`/`dateTime`/
`time`, all optionally suffixed `.tz`) and in-memory values, and validate
a value against a state variable's `allowedValueList`/`allowedValueRange`.

Validation never performs network I/O; callers are expected to call
[`validate`] before marshalling a value onto the wire.
*/

use crate::error::{self, Error};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

/// A decoded UPnP argument/state-variable value. One variant per family of
/// wire datatype; `Temporal` covers `date`/`dateTime`/`time` and their
/// `.tz` variants, stored in ISO-8601 canonical form.
#[derive(Clone, Debug, PartialEq)]
pub enum ArgValue {
    UInt(u64),
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Bytes(Vec<u8>),
    Uri(String),
    Temporal(String),
}

/// `<allowedValueRange>`: numeric bounds (and optional step) a value must
/// satisfy.
#[derive(Clone, Debug)]
pub struct AllowedValueRange {
    pub minimum: String,
    pub maximum: String,
    pub step: Option<String>,
}

// ------------------------------------------------------------------------------------------------
// Public Functions
// ------------------------------------------------------------------------------------------------

/// Decode a wire-format string into an [`ArgValue`] according to `datatype`.
pub fn decode(datatype: &str, wire: &str) -> Result<ArgValue, Error> {
    let wire = wire.trim();
    match datatype {
        "ui1" => decode_uint(wire, 0, u8::MAX as u64),
        "ui2" => decode_uint(wire, 0, u16::MAX as u64),
        "ui4" => decode_uint(wire, 0, u32::MAX as u64),
        "ui8" => decode_uint(wire, 0, u64::MAX),
        "i1" => decode_int(wire, i8::MIN as i64, i8::MAX as i64),
        "i2" => decode_int(wire, i16::MIN as i64, i16::MAX as i64),
        "i4" | "int" => decode_int(wire, i32::MIN as i64, i32::MAX as i64),
        "i8" => decode_int(wire, i64::MIN, i64::MAX),
        "r4" => decode_float(wire),
        "r8" | "float" | "number" => decode_float(wire),
        "boolean" => decode_bool(wire),
        "string" => Ok(ArgValue::Text(wire.to_string())),
        "bin.base64" => decode_base64(wire),
        "bin.hex" => decode_hex(wire),
        "uri" => decode_uri(wire),
        "date" | "dateTime" | "time" => decode_temporal(datatype, wire, false),
        "date.tz" | "dateTime.tz" | "time.tz" => decode_temporal(&datatype[..datatype.len() - 3], wire, true),
        other => Err(error::validation(other, "unsupported UPnP datatype")),
    }
}

/// Encode an [`ArgValue`] to its wire-format string for `datatype`, after
/// range/shape validation for the type itself (not `allowedValues`).
pub fn encode(datatype: &str, value: &ArgValue) -> Result<String, Error> {
    // round-tripping through decode both validates shape/range and produces
    // the canonical wire text.
    match value {
        ArgValue::UInt(v) => Ok(v.to_string()),
        ArgValue::Int(v) => Ok(v.to_string()),
        ArgValue::Float(v) => Ok(format_float(*v)),
        ArgValue::Bool(v) => Ok(if *v { "1".to_string() } else { "0".to_string() }),
        ArgValue::Text(s) => Ok(s.clone()),
        ArgValue::Bytes(b) => match datatype {
            "bin.base64" => Ok(base64::encode(b)),
            "bin.hex" => Ok(b.iter().map(|byte| format!("{:02x}", byte)).collect()),
            other => Err(error::validation(other, "bytes value used with non-binary datatype")),
        },
        ArgValue::Uri(s) => Ok(s.clone()),
        ArgValue::Temporal(s) => Ok(s.clone()),
    }
    .and_then(|wire| {
        // validate shape/range by decoding what we just produced
        decode(datatype, &wire)?;
        Ok(wire)
    })
}

/// Validate `value` (already decoded/constructed for `datatype`) against an
/// optional allowed-value set and/or allowed-value range. Must be called,
/// and must succeed, before any network I/O for the owning argument.
pub fn validate(
    datatype: &str,
    value: &ArgValue,
    allowed_values: &BTreeSet<String>,
    allowed_range: Option<&AllowedValueRange>,
) -> Result<(), Error> {
    let wire = encode(datatype, value)?;

    if !allowed_values.is_empty() && !allowed_values.contains(&wire) {
        return Err(error::validation(
            datatype,
            format!("value `{}` is not one of the allowed values", wire),
        ));
    }

    if let Some(range) = allowed_range {
        validate_range(datatype, &wire, range)?;
    }

    Ok(())
}

// ------------------------------------------------------------------------------------------------
// Private Functions
// ------------------------------------------------------------------------------------------------

fn decode_uint(wire: &str, min: u64, max: u64) -> Result<ArgValue, Error> {
    let v: u64 = wire
        .parse()
        .map_err(|_| error::validation("integer", format!("`{}` is not a valid unsigned integer", wire)))?;
    if v < min || v > max {
        return Err(error::validation(
            "integer",
            format!("`{}` is out of range [{}, {}]", v, min, max),
        ));
    }
    Ok(ArgValue::UInt(v))
}

fn decode_int(wire: &str, min: i64, max: i64) -> Result<ArgValue, Error> {
    let v: i64 = wire
        .parse()
        .map_err(|_| error::validation("integer", format!("`{}` is not a valid integer", wire)))?;
    if v < min || v > max {
        return Err(error::validation(
            "integer",
            format!("`{}` is out of range [{}, {}]", v, min, max),
        ));
    }
    Ok(ArgValue::Int(v))
}

fn decode_float(wire: &str) -> Result<ArgValue, Error> {
    wire.parse::<f64>()
        .map(ArgValue::Float)
        .map_err(|_| error::validation("float", format!("`{}` is not a valid number", wire)))
}

fn format_float(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{:.0}", v)
    } else {
        format!("{}", v)
    }
}

fn decode_bool(wire: &str) -> Result<ArgValue, Error> {
    match wire.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(ArgValue::Bool(true)),
        "0" | "false" | "no" => Ok(ArgValue::Bool(false)),
        other => Err(error::validation("boolean", format!("`{}` is not a valid boolean", other))),
    }
}

fn decode_base64(wire: &str) -> Result<ArgValue, Error> {
    base64::decode(wire)
        .map(ArgValue::Bytes)
        .map_err(|e| error::validation("bin.base64", e))
}

fn decode_hex(wire: &str) -> Result<ArgValue, Error> {
    if wire.len() % 2 != 0 {
        return Err(error::validation("bin.hex", "odd number of hex digits"));
    }
    let mut bytes = Vec::with_capacity(wire.len() / 2);
    let chars: Vec<char> = wire.chars().collect();
    for pair in chars.chunks(2) {
        let byte = u8::from_str_radix(&pair.iter().collect::<String>(), 16)
            .map_err(|_| error::validation("bin.hex", format!("`{}` is not valid hex", wire)))?;
        bytes.push(byte);
    }
    Ok(ArgValue::Bytes(bytes))
}

fn decode_uri(wire: &str) -> Result<ArgValue, Error> {
    reqwest::Url::parse(wire)
        .map(|_| ArgValue::Uri(wire.to_string()))
        .map_err(|e| error::validation("uri", e))
}

lazy_static! {
    static ref TZ_OFFSET: Regex = Regex::new(r"^(Z|[+-]\d{2}:\d{2})$").unwrap();
}

fn decode_temporal(kind: &str, wire: &str, with_tz: bool) -> Result<ArgValue, Error> {
    let (base, offset) = if with_tz {
        split_offset(wire)?
    } else {
        (wire, "")
    };

    match kind {
        "date" => {
            NaiveDate::parse_from_str(base, "%Y-%m-%d")
                .map_err(|_| error::validation("date", format!("`{}` is not a valid date", base)))?;
        }
        "dateTime" => {
            NaiveDateTime::parse_from_str(base, "%Y-%m-%dT%H:%M:%S")
                .map_err(|_| error::validation("dateTime", format!("`{}` is not a valid dateTime", base)))?;
        }
        "time" => {
            NaiveTime::parse_from_str(base, "%H:%M:%S")
                .map_err(|_| error::validation("time", format!("`{}` is not a valid time", base)))?;
        }
        other => return Err(error::validation(other, "unsupported temporal datatype")),
    }

    Ok(ArgValue::Temporal(format!("{}{}", base, offset)))
}

fn split_offset(wire: &str) -> Result<(&str, &str), Error> {
    if let Some(stripped) = wire.strip_suffix('Z') {
        return Ok((stripped, "Z"));
    }
    if wire.len() > 6 {
        let (base, tail) = wire.split_at(wire.len() - 6);
        if TZ_OFFSET.is_match(tail) {
            return Ok((base, tail));
        }
    }
    Err(error::validation(
        "temporal",
        format!("`{}` is missing a required timezone offset", wire),
    ))
}

fn validate_range(datatype: &str, wire: &str, range: &AllowedValueRange) -> Result<(), Error> {
    let is_float = matches!(datatype, "r4" | "r8" | "float" | "number");

    if is_float {
        let v: f64 = wire.parse().map_err(|_| error::validation(datatype, "not numeric"))?;
        let min: f64 = range.minimum.parse().map_err(|_| error::validation(datatype, "bad range minimum"))?;
        let max: f64 = range.maximum.parse().map_err(|_| error::validation(datatype, "bad range maximum"))?;
        if v < min || v > max {
            return Err(error::validation(datatype, format!("{} is outside [{}, {}]", v, min, max)));
        }
        if let Some(step) = &range.step {
            let step: f64 = step.parse().map_err(|_| error::validation(datatype, "bad range step"))?;
            if step != 0.0 && ((v - min) / step).fract().abs() > f64::EPSILON {
                return Err(error::validation(datatype, format!("{} does not satisfy step {}", v, step)));
            }
        }
    } else {
        let v: i128 = wire.parse().map_err(|_| error::validation(datatype, "not integral"))?;
        let min: i128 = range.minimum.parse().map_err(|_| error::validation(datatype, "bad range minimum"))?;
        let max: i128 = range.maximum.parse().map_err(|_| error::validation(datatype, "bad range maximum"))?;
        if v < min || v > max {
            return Err(error::validation(datatype, format!("{} is outside [{}, {}]", v, min, max)));
        }
        if let Some(step) = &range.step {
            let step: i128 = step.parse().map_err(|_| error::validation(datatype, "bad range step"))?;
            if step != 0 && (v - min) % step != 0 {
                return Err(error::validation(datatype, format!("{} does not satisfy step {}", v, step)));
            }
        }
    }
    Ok(())
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ui1_boundaries() {
        assert_eq!(decode("ui1", "0").unwrap(), ArgValue::UInt(0));
        assert_eq!(decode("ui1", "255").unwrap(), ArgValue::UInt(255));
        assert!(decode("ui1", "-1").is_err());
        assert!(decode("ui1", "256").is_err());
    }

    #[test]
    fn boolean_forms() {
        for s in ["true", "TRUE", "1", "yes", "Yes"] {
            assert_eq!(decode("boolean", s).unwrap(), ArgValue::Bool(true));
        }
        for s in ["false", "0", "no", "No"] {
            assert_eq!(decode("boolean", s).unwrap(), ArgValue::Bool(false));
        }
        assert_eq!(encode("boolean", &ArgValue::Bool(true)).unwrap(), "1");
        assert_eq!(encode("boolean", &ArgValue::Bool(false)).unwrap(), "0");
    }

    #[test]
    fn allowed_values_membership() {
        let allowed: BTreeSet<String> = ["TCP", "UDP"].iter().map(|s| s.to_string()).collect();
        assert!(validate("string", &ArgValue::Text("TCP".to_string()), &allowed, None).is_ok());
        assert!(validate("string", &ArgValue::Text("tcp".to_string()), &allowed, None).is_err());
    }

    #[test]
    fn base64_round_trip() {
        let bytes = ArgValue::Bytes(vec![0xDE, 0xAD, 0xBE, 0xEF]);
        let wire = encode("bin.base64", &bytes).unwrap();
        assert_eq!(decode("bin.base64", &wire).unwrap(), bytes);
    }

    #[test]
    fn hex_round_trip() {
        let bytes = ArgValue::Bytes(vec![0x00, 0xff, 0x10]);
        let wire = encode("bin.hex", &bytes).unwrap();
        assert_eq!(wire, "00ff10");
        assert_eq!(decode("bin.hex", &wire).unwrap(), bytes);
    }

    #[test]
    fn ui2_range_validation() {
        let range = AllowedValueRange {
            minimum: "1024".to_string(),
            maximum: "65535".to_string(),
            step: None,
        };
        assert!(validate("ui2", &ArgValue::UInt(12345), &BTreeSet::new(), Some(&range)).is_ok());
        assert!(validate("ui2", &ArgValue::UInt(80), &BTreeSet::new(), Some(&range)).is_err());
    }

    #[test]
    fn date_requires_tz_for_tz_variant() {
        assert!(decode("date", "2024-01-02").is_ok());
        assert!(decode("date.tz", "2024-01-02").is_err());
        assert!(decode("date.tz", "2024-01-02+00:00").is_ok());
        assert!(decode("date.tz", "2024-01-02Z").is_ok());
    }
}
