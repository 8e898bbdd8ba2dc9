//! printf-style axis label formatting.
//!
//! Value axes carry format strings such as `"%.2f m"` or `"%d units"`. One
//! conversion per format is supported (`d i u o x X f F e E g G`) with the
//! `+`, space and `0` flags, a width and a precision; `%%` is a literal percent.
//! Strings without a recognized conversion are returned verbatim.

/// Formats `value` with `format`; an empty format uses the shortest display form.
#[must_use]
pub fn format_axis_label(format: &str, value: f64) -> String {
    if format.is_empty() {
        return shortest(value);
    }

    let Some(conversion) = find_conversion(format) else {
        return unescape_percent(format);
    };

    let mut out = unescape_percent(&format[..conversion.start]);
    out.push_str(&conversion.render(value));
    out.push_str(&unescape_percent(&format[conversion.end..]));
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Conversion {
    start: usize,
    end: usize,
    plus: bool,
    space: bool,
    zero_pad: bool,
    width: usize,
    precision: Option<usize>,
    specifier: u8,
}

impl Conversion {
    fn render(self, value: f64) -> String {
        let body = match self.specifier {
            b'd' | b'i' | b'u' => format!("{}", value.round() as i64),
            b'o' => format!("{:o}", value.round() as i64),
            b'x' => format!("{:x}", value.round() as i64),
            b'X' => format!("{:X}", value.round() as i64),
            b'f' | b'F' => format!("{:.*}", self.precision.unwrap_or(6), value),
            b'e' => exponent(value, self.precision.unwrap_or(6), false),
            b'E' => exponent(value, self.precision.unwrap_or(6), true),
            b'g' | b'G' => match self.precision {
                Some(precision) => general(value, precision.max(1)),
                None => shortest(value),
            },
            _ => String::new(),
        };

        let signed = if body.starts_with('-') {
            body
        } else if self.plus {
            format!("+{body}")
        } else if self.space {
            format!(" {body}")
        } else {
            body
        };

        pad(signed, self.width, self.zero_pad)
    }
}

fn find_conversion(format: &str) -> Option<Conversion> {
    let bytes = format.as_bytes();
    let mut index = 0;
    while index < bytes.len() {
        if bytes[index] != b'%' {
            index += 1;
            continue;
        }
        if bytes.get(index + 1) == Some(&b'%') {
            index += 2;
            continue;
        }

        let start = index;
        let mut cursor = index + 1;
        let mut conversion = Conversion {
            start,
            end: start,
            plus: false,
            space: false,
            zero_pad: false,
            width: 0,
            precision: None,
            specifier: 0,
        };

        while let Some(&flag) = bytes.get(cursor) {
            match flag {
                b'+' => conversion.plus = true,
                b' ' => conversion.space = true,
                b'0' => conversion.zero_pad = true,
                b'-' | b'#' => {}
                _ => break,
            }
            cursor += 1;
        }

        let (width, next) = read_number(bytes, cursor);
        conversion.width = width.unwrap_or(0);
        cursor = next;

        if bytes.get(cursor) == Some(&b'.') {
            let (precision, next) = read_number(bytes, cursor + 1);
            conversion.precision = Some(precision.unwrap_or(0));
            cursor = next;
        }

        while matches!(bytes.get(cursor), Some(b'l' | b'h' | b'L' | b'q')) {
            cursor += 1;
        }

        let specifier = *bytes.get(cursor)?;
        if !b"diuoxXfFeEgG".contains(&specifier) {
            return None;
        }
        conversion.specifier = specifier;
        conversion.end = cursor + 1;
        return Some(conversion);
    }
    None
}

fn read_number(bytes: &[u8], mut cursor: usize) -> (Option<usize>, usize) {
    let mut value: Option<usize> = None;
    while let Some(digit) = bytes.get(cursor).filter(|byte| byte.is_ascii_digit()) {
        let digit = usize::from(digit - b'0');
        value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(digit));
        cursor += 1;
    }
    (value, cursor)
}

fn unescape_percent(text: &str) -> String {
    text.replace("%%", "%")
}

fn shortest(value: f64) -> String {
    if value == value.trunc() && value.abs() < 1.0e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

fn general(value: f64, significant: usize) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (significant as i32 - 1 - magnitude).max(0) as usize;
    let fixed = format!("{value:.decimals$}");
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_owned()
    } else {
        fixed
    }
}

fn exponent(value: f64, precision: usize, upper: bool) -> String {
    let raw = format!("{value:.precision$e}");
    let (mantissa, exp) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
    let (sign, digits) = match exp.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exp),
    };
    let marker = if upper { 'E' } else { 'e' };
    format!("{mantissa}{marker}{sign}{digits:0>2}")
}

fn pad(text: String, width: usize, zero_pad: bool) -> String {
    let len = text.chars().count();
    if len >= width {
        return text;
    }
    let fill = width - len;
    if zero_pad {
        let (sign, digits) = match text.chars().next() {
            Some(first @ ('-' | '+' | ' ')) => (first.to_string(), &text[1..]),
            _ => (String::new(), text.as_str()),
        };
        format!("{sign}{}{digits}", "0".repeat(fill))
    } else {
        format!("{}{text}", " ".repeat(fill))
    }
}

#[cfg(test)]
mod tests {
    use super::format_axis_label;

    #[test]
    fn fixed_precision_with_suffix() {
        assert_eq!(format_axis_label("%.2f m", 3.14159), "3.14 m");
        assert_eq!(format_axis_label("%.0f", 2.4), "2");
    }

    #[test]
    fn integer_conversions_round_value() {
        assert_eq!(format_axis_label("%d units", 41.6), "42 units");
        assert_eq!(format_axis_label("%x", 255.0), "ff");
    }

    #[test]
    fn empty_format_uses_shortest_form() {
        assert_eq!(format_axis_label("", 5.0), "5");
        assert_eq!(format_axis_label("", 2.5), "2.5");
    }

    #[test]
    fn percent_escape_and_flags() {
        assert_eq!(format_axis_label("%d%%", 50.0), "50%");
        assert_eq!(format_axis_label("%+.1f", 1.3), "+1.3");
        assert_eq!(format_axis_label("%05.1f", -1.5), "-01.5");
    }

    #[test]
    fn exponent_uses_two_digit_signed_exponent() {
        assert_eq!(format_axis_label("%.2e", 1500.0), "1.50e+03");
        assert_eq!(format_axis_label("%.1E", 0.05), "5.0E-02");
    }

    #[test]
    fn general_trims_trailing_zeros() {
        assert_eq!(format_axis_label("%.3g", 12.5), "12.5");
        assert_eq!(format_axis_label("%.3g", 0.1), "0.1");
    }

    #[test]
    fn unknown_conversion_returns_text_verbatim() {
        assert_eq!(format_axis_label("value %s", 1.0), "value %s");
    }
}
