/// JSON bodies in the layout the tracker integration has always sent:
/// `", "` and `": "` separators, non-ASCII escaped as `\uXXXX`.
pub mod json {
    use serde::Serialize;
    use serde_json::ser::Formatter;
    use serde_json::Serializer;
    use std::io;

    #[derive(Debug, Default, Clone, Copy)]
    pub struct SpacedAsciiFormatter;

    impl Formatter for SpacedAsciiFormatter {
        fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
        where
            W: ?Sized + io::Write,
        {
            if first {
                Ok(())
            } else {
                writer.write_all(b", ")
            }
        }

        fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
        where
            W: ?Sized + io::Write,
        {
            if first {
                Ok(())
            } else {
                writer.write_all(b", ")
            }
        }

        fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
        where
            W: ?Sized + io::Write,
        {
            writer.write_all(b": ")
        }

        fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
        where
            W: ?Sized + io::Write,
        {
            let mut start = 0;
            for (index, ch) in fragment.char_indices() {
                if ch.is_ascii() && ch != '\x7f' {
                    continue;
                }
                writer.write_all(fragment[start..index].as_bytes())?;
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
                start = index + ch.len_utf8();
            }
            writer.write_all(fragment[start..].as_bytes())
        }
    }

    pub fn to_vec<T>(value: &T) -> Result<Vec<u8>, serde_json::Error>
    where
        T: ?Sized + Serialize,
    {
        let mut buffer = Vec::with_capacity(128);
        let mut serializer = Serializer::with_formatter(&mut buffer, SpacedAsciiFormatter);
        value.serialize(&mut serializer)?;
        Ok(buffer)
    }
}

/// Plain-text rendering of values, matching how the test runner prints them.
pub mod text {
    use serde_json::Value;

    /// Shortest round-trip digits, always with a fractional part or an
    /// exponent. Exponents have a sign and at least two digits (`5e-05`).
    pub fn float(value: f64) -> String {
        if value.is_nan() {
            return "nan".to_owned();
        }
        if value.is_infinite() {
            return if value > 0.0 { "inf" } else { "-inf" }.to_owned();
        }
        let scientific = format!("{:e}", value);
        let (mantissa, exponent) = match scientific.split_once('e') {
            Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
            None => (scientific.as_str(), 0),
        };
        if value != 0.0 && (exponent < -4 || exponent >= 16) {
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exponent.abs())
        } else {
            let plain = value.to_string();
            if plain.contains('.') {
                plain
            } else {
                format!("{}.0", plain)
            }
        }
    }

    /// Text of a parametrization value. Strings come out bare, everything
    /// else in its literal form (`2`, `True`, `None`, `['a', 1]`).
    pub fn param(value: &Value) -> String {
        match value {
            Value::String(text) => text.clone(),
            other => literal(other),
        }
    }

    fn literal(value: &Value) -> String {
        match value {
            Value::Null => "None".to_owned(),
            Value::Bool(true) => "True".to_owned(),
            Value::Bool(false) => "False".to_owned(),
            Value::Number(number) => match number.as_f64() {
                Some(float_value) if !(number.is_i64() || number.is_u64()) => float(float_value),
                _ => number.to_string(),
            },
            Value::String(text) => quoted(text),
            Value::Array(values) => {
                let values: Vec<String> = values.iter().map(literal).collect();
                format!("[{}]", values.join(", "))
            }
            Value::Object(members) => {
                let members: Vec<String> = members
                    .iter()
                    .map(|(key, value)| format!("{}: {}", quoted(key), literal(value)))
                    .collect();
                format!("{{{}}}", members.join(", "))
            }
        }
    }

    fn quoted(text: &str) -> String {
        let quote = if text.contains('\'') && !text.contains('"') {
            '"'
        } else {
            '\''
        };
        let mut out = String::with_capacity(text.len() + 2);
        out.push(quote);
        for ch in text.chars() {
            match ch {
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if c == quote => {
                    out.push('\\');
                    out.push(c);
                }
                c => out.push(c),
            }
        }
        out.push(quote);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::{json, text};
    use serde_json::json as value;

    #[test]
    fn test_json_separators() {
        let bytes = json::to_vec(&value!({"transition": {"id": "31"}})).unwrap();
        assert_eq!(bytes, br#"{"transition": {"id": "31"}}"#.to_vec());

        let bytes = json::to_vec(&value!([1, "two", null])).unwrap();
        assert_eq!(bytes, br#"[1, "two", null]"#.to_vec());
    }

    #[test]
    fn test_json_escapes_non_ascii() {
        let bytes = json::to_vec(&value!({"body": "caf\u{e9} \u{1f600}\n\"ok\""})).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"body": "caf\u00e9 \ud83d\ude00\n\"ok\""}"#
        );
    }

    #[test]
    fn test_float_text() {
        assert_eq!(text::float(1.0), "1.0");
        assert_eq!(text::float(0.25), "0.25");
        assert_eq!(text::float(0.0), "0.0");
        assert_eq!(text::float(0.0001), "0.0001");
        assert_eq!(text::float(0.00005), "5e-05");
        assert_eq!(text::float(0.000015), "1.5e-05");
        assert_eq!(text::float(1e15), "1000000000000000.0");
        assert_eq!(text::float(1e16), "1e+16");
        assert_eq!(text::float(1.5e300), "1.5e+300");
    }

    #[test]
    fn test_param_text() {
        assert_eq!(text::param(&value!("TP-1")), "TP-1");
        assert_eq!(text::param(&value!(42)), "42");
        assert_eq!(text::param(&value!(-3)), "-3");
        assert_eq!(text::param(&value!(2.5)), "2.5");
        assert_eq!(text::param(&value!(true)), "True");
        assert_eq!(text::param(&value!(null)), "None");
        assert_eq!(text::param(&value!(["a", 1, false])), "['a', 1, False]");
    }
}
