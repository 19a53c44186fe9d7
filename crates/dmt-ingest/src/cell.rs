//! Cell value to string conversion for CSV frames and workbook ranges.

use calamine::Data;
use polars::prelude::AnyValue;

use dmt_model::format_bool;

/// Converts a Polars `AnyValue` to its string form.
///
/// Returns an empty string for `Null`; numeric types are formatted without
/// unnecessary trailing zeros.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => format_bool(b),
        other => {
            let s = other.to_string();
            if s.starts_with('"') && s.ends_with('"') && s.len() >= 2 {
                s[1..s.len() - 1].to_string()
            } else {
                s
            }
        }
    }
}

/// Converts a workbook cell to its string form. Empty and error cells become `""`.
pub fn data_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => format_numeric(*f),
        Data::Bool(b) => format_bool(*b),
        Data::DateTime(dt) => dt.to_string(),
    }
}

/// Formats a float without trailing zeros after the decimal point.
///
/// Part numbers stored as numbers in a spreadsheet come back as floats;
/// `100.0` must stay `"100"`.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_to_string_null() {
        assert_eq!(any_to_string(AnyValue::Null), "");
    }

    #[test]
    fn test_any_to_string_numbers() {
        assert_eq!(any_to_string(AnyValue::Int64(100)), "100");
        assert_eq!(any_to_string(AnyValue::Float64(100.0)), "100");
        assert_eq!(any_to_string(AnyValue::Float64(1.5)), "1.5");
    }

    #[test]
    fn test_any_to_string_strings() {
        assert_eq!(any_to_string(AnyValue::String("P100")), "P100");
    }

    #[test]
    fn test_data_to_string() {
        assert_eq!(data_to_string(&Data::Empty), "");
        assert_eq!(data_to_string(&Data::Float(4200.0)), "4200");
        assert_eq!(data_to_string(&Data::Int(7)), "7");
        assert_eq!(data_to_string(&Data::String("Red".to_string())), "Red");
        assert_eq!(data_to_string(&Data::Bool(true)), "True");
    }

    #[test]
    fn test_format_numeric() {
        assert_eq!(format_numeric(1.0), "1");
        assert_eq!(format_numeric(0.0), "0");
        assert_eq!(format_numeric(40.0), "40");
        assert_eq!(format_numeric(10.5), "10.5");
    }
}
