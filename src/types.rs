use std::fmt;

#[derive(Clone, Debug)]
pub enum JsValue {
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    String(JsString),
    Object(JsObject),
}

// UTF-16 code unit string (ECMA-262 §6.1.4)
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct JsString {
    pub code_units: Vec<u16>,
}

impl JsString {
    pub fn from_str(s: &str) -> Self {
        Self {
            code_units: s.encode_utf16().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.code_units.is_empty()
    }

    pub fn len(&self) -> usize {
        self.code_units.len()
    }

    pub fn to_rust_string(&self) -> String {
        String::from_utf16_lossy(&self.code_units)
    }

    pub fn slice_utf16(&self, start: usize, end: usize) -> JsString {
        let s = start.min(self.code_units.len());
        let e = end.min(self.code_units.len());
        if s >= e {
            return JsString { code_units: vec![] };
        }
        JsString {
            code_units: self.code_units[s..e].to_vec(),
        }
    }
}

impl fmt::Display for JsString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_rust_string())
    }
}

/// Handle into the interpreter's object arena. Two handles are the same
/// object exactly when their ids match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct JsObject {
    pub id: u64,
}

impl JsValue {
    pub fn is_undefined(&self) -> bool {
        matches!(self, JsValue::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsValue::Null)
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, JsValue::Boolean(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, JsValue::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, JsValue::String(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, JsValue::Object(_))
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, JsValue::Undefined | JsValue::Null)
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, JsValue::Number(n) if n.is_nan())
    }

    pub fn as_object(&self) -> Option<JsObject> {
        match self {
            JsValue::Object(o) => Some(*o),
            _ => None,
        }
    }

    pub fn string(s: &str) -> Self {
        JsValue::String(JsString::from_str(s))
    }
}

// SameValue: NaN equals itself and the two zeros differ. Objects compare by
// identity.
impl PartialEq for JsValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (JsValue::Undefined, JsValue::Undefined) | (JsValue::Null, JsValue::Null) => true,
            (JsValue::Boolean(a), JsValue::Boolean(b)) => a == b,
            (JsValue::Number(a), JsValue::Number(b)) => number_ops::same_value(*a, *b),
            (JsValue::String(a), JsValue::String(b)) => a == b,
            (JsValue::Object(a), JsValue::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl From<f64> for JsValue {
    fn from(n: f64) -> Self {
        JsValue::Number(n)
    }
}

impl From<bool> for JsValue {
    fn from(b: bool) -> Self {
        JsValue::Boolean(b)
    }
}

impl From<&str> for JsValue {
    fn from(s: &str) -> Self {
        JsValue::string(s)
    }
}

impl From<JsObject> for JsValue {
    fn from(o: JsObject) -> Self {
        JsValue::Object(o)
    }
}

// §6.1.6.1 Number type operations, plus the Number.prototype formatting
// algorithms (§15.7.4.2, §15.7.4.5-7 of ES5.1).
pub mod number_ops {
    use num_bigint::BigUint;

    pub const MAX_FRACTION_DIGITS: f64 = 20.0;
    pub const MAX_PRECISION: f64 = 21.0;

    // 2^53: the first double whose ulp exceeds 1.
    const TWO_POW_53: f64 = 9007199254740992.0;

    /// A digit-count argument outside the range a formatting method accepts.
    /// Surfaced to script as a RangeError.
    #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
    #[error("{method}() argument must be between {min} and {max}")]
    pub struct DigitsOutOfRange {
        pub method: &'static str,
        pub min: u32,
        pub max: u32,
    }

    pub fn unary_minus(x: f64) -> f64 {
        if x.is_nan() { f64::NAN } else { -x }
    }

    pub fn equal(x: f64, y: f64) -> bool {
        if x.is_nan() || y.is_nan() {
            return false;
        }
        x == y
    }

    pub fn same_value(x: f64, y: f64) -> bool {
        if x.is_nan() && y.is_nan() {
            return true;
        }
        if x == 0.0 && y == 0.0 {
            return x.is_sign_positive() == y.is_sign_positive();
        }
        x == y
    }

    pub fn same_value_zero(x: f64, y: f64) -> bool {
        if x.is_nan() && y.is_nan() {
            return true;
        }
        x == y
    }

    // §9.8.1 ToString applied to the Number type
    pub fn to_string(x: f64) -> String {
        if x.is_nan() {
            return "NaN".to_string();
        }
        if x == 0.0 {
            return "0".to_string();
        }
        if x.is_infinite() {
            return if x > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
        }
        if x < 0.0 {
            return format!("-{}", to_string(-x));
        }
        // ryu-js already applies the ECMAScript exponent thresholds
        let mut buf = ryu_js::Buffer::new();
        buf.format(x).to_string()
    }

    /// Number.prototype.toString with a radix other than 10. Emits the
    /// shortest digit string in `radix` that still identifies `x` uniquely.
    /// The caller validates `radix` against [2, 36].
    pub fn to_string_radix(x: f64, radix: u32) -> String {
        if radix == 10 || !x.is_finite() || x == 0.0 {
            return to_string(x);
        }
        if x < 0.0 {
            return format!("-{}", to_string_radix(-x, radix));
        }
        let radix_f = f64::from(radix);
        let mut integer = x.floor();
        let mut fraction = x - integer;
        // Half the distance to the next double: digits below this are noise.
        let mut delta = (0.5 * (next_up(x) - x)).max(next_up(0.0));

        let mut fraction_digits: Vec<u32> = Vec::new();
        if fraction >= delta {
            loop {
                fraction *= radix_f;
                delta *= radix_f;
                let digit = fraction as u32;
                fraction_digits.push(digit);
                fraction -= f64::from(digit);
                if (fraction > 0.5 || (fraction == 0.5 && digit & 1 == 1))
                    && fraction + delta > 1.0
                {
                    // Round up; the carry may run back into the integer part.
                    loop {
                        match fraction_digits.pop() {
                            None => {
                                integer += 1.0;
                                break;
                            }
                            Some(d) if d + 1 < radix => {
                                fraction_digits.push(d + 1);
                                break;
                            }
                            Some(_) => {}
                        }
                    }
                    break;
                }
                if fraction < delta {
                    break;
                }
            }
        }

        let mut integer_digits: Vec<u32> = Vec::new();
        // Digits below the precision of the double are zero.
        while integer / radix_f >= TWO_POW_53 {
            integer /= radix_f;
            integer_digits.push(0);
        }
        loop {
            let remainder = integer % radix_f;
            integer_digits.push(remainder as u32);
            integer = (integer - remainder) / radix_f;
            if integer <= 0.0 {
                break;
            }
        }

        let mut out = String::with_capacity(integer_digits.len() + fraction_digits.len() + 1);
        out.extend(integer_digits.iter().rev().map(|&d| radix_digit(d, radix)));
        if !fraction_digits.is_empty() {
            out.push('.');
            out.extend(fraction_digits.iter().map(|&d| radix_digit(d, radix)));
        }
        out
    }

    // §15.7.4.5 Number.prototype.toFixed
    //
    // `fraction_digits` is the already ToInteger-converted argument; it is
    // range checked before `x` is looked at.
    pub fn to_fixed(x: f64, fraction_digits: f64) -> Result<String, DigitsOutOfRange> {
        if !(0.0..=MAX_FRACTION_DIGITS).contains(&fraction_digits) {
            return Err(DigitsOutOfRange {
                method: "toFixed",
                min: 0,
                max: MAX_FRACTION_DIGITS as u32,
            });
        }
        let f = fraction_digits as u32;
        if x.is_nan() {
            return Ok("NaN".to_string());
        }
        if x.abs() >= 1e21 {
            return Ok(to_string(x));
        }
        let (sign, x) = if x < 0.0 { ("-", -x) } else { ("", x) };

        // n = round(x * 10^f), ties toward the larger n.
        let (digits, exponent) = exact_decimal(x);
        let shift = exponent + f as i32;
        let n = if shift >= 0 {
            digits * pow10(shift as u32)
        } else {
            div_round_half_up(&digits, &pow10(shift.unsigned_abs()))
        };

        let mut m = n.to_string();
        if f > 0 {
            let f = f as usize;
            if m.len() <= f {
                m = format!("{}{m}", "0".repeat(f + 1 - m.len()));
            }
            let (int_part, frac_part) = m.split_at(m.len() - f);
            m = format!("{int_part}.{frac_part}");
        }
        Ok(format!("{sign}{m}"))
    }

    // §15.7.4.6 Number.prototype.toExponential
    pub fn to_exponential(
        x: f64,
        fraction_digits: Option<f64>,
    ) -> Result<String, DigitsOutOfRange> {
        if x.is_nan() {
            return Ok("NaN".to_string());
        }
        let (sign, x) = if x < 0.0 { ("-", -x) } else { ("", x) };
        if x.is_infinite() {
            return Ok(format!("{sign}Infinity"));
        }
        if fraction_digits.is_some_and(|f| !(0.0..=MAX_FRACTION_DIGITS).contains(&f)) {
            return Err(DigitsOutOfRange {
                method: "toExponential",
                min: 0,
                max: MAX_FRACTION_DIGITS as u32,
            });
        }

        let (digits, e) = if x == 0.0 {
            let f = fraction_digits.unwrap_or(0.0) as usize;
            ("0".repeat(f + 1), 0)
        } else {
            match fraction_digits {
                Some(f) => round_to_significant(x, f as u32 + 1),
                None => shortest_decimal(x),
            }
        };

        let mantissa = split_after_first(&digits);
        Ok(format!("{sign}{mantissa}e{}", exponent_suffix(e)))
    }

    // §15.7.4.7 Number.prototype.toPrecision
    pub fn to_precision(x: f64, precision: Option<f64>) -> Result<String, DigitsOutOfRange> {
        let Some(p) = precision else {
            return Ok(to_string(x));
        };
        if x.is_nan() {
            return Ok("NaN".to_string());
        }
        let (sign, x) = if x < 0.0 { ("-", -x) } else { ("", x) };
        if x.is_infinite() {
            return Ok(format!("{sign}Infinity"));
        }
        if !(1.0..=MAX_PRECISION).contains(&p) {
            return Err(DigitsOutOfRange {
                method: "toPrecision",
                min: 1,
                max: MAX_PRECISION as u32,
            });
        }
        let p = p as u32;

        let (digits, e) = if x == 0.0 {
            ("0".repeat(p as usize), 0)
        } else {
            round_to_significant(x, p)
        };

        if e < -6 || e >= p as i32 {
            let mantissa = split_after_first(&digits);
            return Ok(format!("{sign}{mantissa}e{}", exponent_suffix(e)));
        }
        if e == p as i32 - 1 {
            return Ok(format!("{sign}{digits}"));
        }
        if e >= 0 {
            let (int_part, frac_part) = digits.split_at(e as usize + 1);
            return Ok(format!("{sign}{int_part}.{frac_part}"));
        }
        let zeros = "0".repeat((-(e + 1)) as usize);
        Ok(format!("{sign}0.{zeros}{digits}"))
    }

    /// The exact decimal expansion of a finite, non-negative double:
    /// `x == digits * 10^exponent`.
    fn exact_decimal(x: f64) -> (BigUint, i32) {
        if x == 0.0 {
            return (BigUint::from(0u32), 0);
        }
        let bits = x.to_bits();
        let biased = ((bits >> 52) & 0x7ff) as i32;
        let fraction = bits & 0x000f_ffff_ffff_ffff;
        let (mantissa, exponent) = if biased == 0 {
            (fraction, -1074)
        } else {
            (fraction | (1u64 << 52), biased - 1075)
        };
        if exponent >= 0 {
            (BigUint::from(mantissa) << exponent as usize, 0)
        } else {
            // m * 2^-k == m * 5^k * 10^-k
            let k = exponent.unsigned_abs();
            (BigUint::from(mantissa) * BigUint::from(5u32).pow(k), exponent)
        }
    }

    /// Rounds a positive finite `x` to `significant` digits. Returns the
    /// digit string (exactly `significant` long) and the decimal exponent of
    /// its leading digit.
    fn round_to_significant(x: f64, significant: u32) -> (String, i32) {
        let (digits, exponent) = exact_decimal(x);
        let len = digits.to_string().len() as i32;
        let e = len - 1 + exponent;
        let excess = len - significant as i32;
        let n = if excess <= 0 {
            digits * pow10(excess.unsigned_abs())
        } else {
            div_round_half_up(&digits, &pow10(excess as u32))
        };
        let mut s = n.to_string();
        if s.len() > significant as usize {
            // 99..9 rounded up to 100..0
            s.truncate(significant as usize);
            return (s, e + 1);
        }
        (s, e)
    }

    /// Shortest round-tripping digits of a positive finite `x`, with the
    /// decimal exponent of the leading digit.
    fn shortest_decimal(x: f64) -> (String, i32) {
        let mut buf = ryu_js::Buffer::new();
        let formatted = buf.format(x);
        let (mantissa, exp10) = match formatted.split_once('e') {
            Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
            None => (formatted, 0),
        };
        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        let all: String = int_part.chars().chain(frac_part.chars()).collect();
        let significant = all.trim_start_matches('0');
        let leading_zeros = all.len() - significant.len();
        let e = int_part.len() as i32 - leading_zeros as i32 - 1 + exp10;
        (significant.trim_end_matches('0').to_string(), e)
    }

    fn split_after_first(digits: &str) -> String {
        match digits.split_at_checked(1) {
            Some((a, b)) if !b.is_empty() => format!("{a}.{b}"),
            _ => digits.to_string(),
        }
    }

    fn exponent_suffix(e: i32) -> String {
        if e >= 0 { format!("+{e}") } else { format!("-{}", -e) }
    }

    fn pow10(n: u32) -> BigUint {
        BigUint::from(10u32).pow(n)
    }

    fn div_round_half_up(n: &BigUint, d: &BigUint) -> BigUint {
        let q = n / d;
        let r = n % d;
        if r * 2u32 >= *d { q + 1u32 } else { q }
    }

    fn next_up(x: f64) -> f64 {
        f64::from_bits(x.to_bits() + 1)
    }

    fn radix_digit(d: u32, radix: u32) -> char {
        char::from_digit(d, radix).unwrap_or('0')
    }
}

impl fmt::Display for JsValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsValue::Undefined => write!(f, "undefined"),
            JsValue::Null => write!(f, "null"),
            JsValue::Boolean(b) => write!(f, "{b}"),
            JsValue::Number(n) => write!(f, "{}", number_ops::to_string(*n)),
            JsValue::String(s) => write!(f, "{s}"),
            JsValue::Object(_) => write!(f, "[object Object]"),
        }
    }
}
