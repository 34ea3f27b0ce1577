use serde::{Deserialize, Serialize};

const DISPLAY_PRECISION: usize = 6;
const MAX_RAW_DISPLAY_LEN: usize = 6;

/// Keypad labels in display order. The first slot is swapped between "AC" and "C".
pub const KEY_LABELS: [&str; 19] = [
    "AC", "+/-", "%", "÷", "7", "8", "9", "×", "4", "5", "6", "-", "1", "2", "3", "+", "0", ".",
    "=",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Negate,
    Percent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalcKey {
    Digit(char),
    Decimal,
    Binary(BinaryOp),
    Unary(UnaryOp),
    Clear,
    AllClear,
    Equals,
}

impl CalcKey {
    /// Maps a keypad label to a key. Unknown labels map to `None` and are ignored by
    /// [`CalculatorState::press`].
    pub fn from_label(label: &str) -> Option<Self> {
        let key = match label {
            "." => Self::Decimal,
            "+" => Self::Binary(BinaryOp::Add),
            "-" => Self::Binary(BinaryOp::Subtract),
            "×" => Self::Binary(BinaryOp::Multiply),
            "÷" => Self::Binary(BinaryOp::Divide),
            "+/-" => Self::Unary(UnaryOp::Negate),
            "%" => Self::Unary(UnaryOp::Percent),
            "C" => Self::Clear,
            "AC" => Self::AllClear,
            "=" => Self::Equals,
            _ => {
                let mut chars = label.chars();
                match (chars.next(), chars.next()) {
                    (Some(digit @ '0'..='9'), None) => Self::Digit(digit),
                    _ => return None,
                }
            }
        };
        Some(key)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Operand {
    First,
    Second,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalculatorState {
    operand1: String,
    operand2: String,
    operator: Option<BinaryOp>,
    result: String,
    clear_shows_c: bool,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            operand1: String::new(),
            operand2: String::new(),
            operator: None,
            result: "0".to_string(),
            clear_shows_c: false,
        }
    }
}

impl CalculatorState {
    /// Applies a keypad label. Labels outside [`KEY_LABELS`] (plus "C") leave the state as is.
    pub fn press(&mut self, label: &str) {
        if let Some(key) = CalcKey::from_label(label) {
            self.apply(key);
        }
    }

    pub fn apply(&mut self, key: CalcKey) {
        match key {
            CalcKey::Digit(digit) => self.input(digit),
            CalcKey::Decimal => self.input('.'),
            CalcKey::Binary(op) => self.set_operator(op),
            CalcKey::Unary(op) => self.apply_unary(op),
            CalcKey::Clear => self.clear(),
            CalcKey::AllClear => self.all_clear(),
            CalcKey::Equals => self.equals(),
        }
    }

    pub fn display_text(&self) -> &str {
        &self.result
    }

    pub fn operand1(&self) -> &str {
        &self.operand1
    }

    pub fn operand2(&self) -> &str {
        &self.operand2
    }

    pub fn operator(&self) -> Option<BinaryOp> {
        self.operator
    }

    pub fn clear_label(&self) -> &'static str {
        if self.clear_shows_c {
            "C"
        } else {
            "AC"
        }
    }

    /// Visible keypad labels with the clear key resolved.
    pub fn keys(&self) -> [&'static str; 19] {
        let mut keys = KEY_LABELS;
        keys[0] = self.clear_label();
        keys
    }

    fn active_operand(&self) -> Operand {
        if self.operator.is_some() {
            Operand::Second
        } else {
            Operand::First
        }
    }

    fn buffer_mut(&mut self, operand: Operand) -> &mut String {
        match operand {
            Operand::First => &mut self.operand1,
            Operand::Second => &mut self.operand2,
        }
    }

    fn input(&mut self, token: char) {
        self.clear_shows_c = true;
        let target = self.active_operand();
        let buffer = self.buffer_mut(target);
        if buffer.as_str() == "0" && token != '.' {
            buffer.clear();
        }
        buffer.push(token);

        let shown = if buffer.chars().count() > MAX_RAW_DISPLAY_LEN {
            format_number(parse_float(buffer))
        } else {
            buffer.clone()
        };
        self.result = shown;
    }

    fn set_operator(&mut self, op: BinaryOp) {
        if self.operand1.is_empty() {
            self.operand1 = self.result.clone();
        }
        self.operator = Some(op);
    }

    fn apply_unary(&mut self, op: UnaryOp) {
        let has_first = !self.operand1.is_empty();
        let has_second = !self.operand2.is_empty();

        match (self.operator.is_some(), has_first, has_second) {
            (false, _, _) => {
                let value = unary_value(op, &self.operand1, &self.operand2);
                self.operand1 = format_number(value);
                self.result = self.operand1.clone();
            }
            (true, true, true) => {
                let value = unary_value(op, "", &self.operand2);
                self.operand2 = format_number(value);
                self.result = self.operand2.clone();
            }
            (true, true, false) => {
                let value = unary_value(op, &self.operand1, "");
                self.operand2 = format_number(value);
                self.result = self.operand2.clone();
            }
            (true, false, _) => {}
        }
    }

    fn clear(&mut self) {
        if self.operator.is_none() && !self.operand1.is_empty() {
            self.operand1.clear();
            self.result = "0".to_string();
        } else if self.operator.is_some() && self.operand2.is_empty() {
            self.operator = None;
        } else if !self.operand2.is_empty() {
            self.operand2.clear();
            self.result = "0".to_string();
        }

        self.clear_shows_c =
            !(self.operand1.is_empty() && self.operand2.is_empty() && self.operator.is_none());
    }

    fn all_clear(&mut self) {
        *self = Self::default();
    }

    fn equals(&mut self) {
        let Some(op) = self.operator else {
            return;
        };
        if self.operand1.is_empty() {
            return;
        }

        let lhs = parse_float(&self.operand1);
        let rhs = if self.operand2.is_empty() {
            lhs
        } else {
            parse_float(&self.operand2)
        };

        self.result = match apply_binary(lhs, op, rhs) {
            Some(value) => format_number(value),
            None => "NaN".to_string(),
        };
        self.operand1.clear();
        self.operand2.clear();
        self.operator = None;
    }
}

/// Returns `None` for division by zero.
fn apply_binary(lhs: f64, op: BinaryOp, rhs: f64) -> Option<f64> {
    let value = match op {
        BinaryOp::Add => lhs + rhs,
        BinaryOp::Subtract => lhs - rhs,
        BinaryOp::Multiply => lhs * rhs,
        BinaryOp::Divide => {
            if rhs == 0.0 {
                return None;
            }
            lhs / rhs
        }
    };
    Some(value)
}

/// Unary ops read whichever operand holds a non-zero number, falling back to 0.
fn unary_value(op: UnaryOp, first: &str, second: &str) -> f64 {
    let operand = [parse_float(first), parse_float(second)]
        .into_iter()
        .find(|value| *value != 0.0 && !value.is_nan())
        .unwrap_or(0.0);
    let value = match op {
        UnaryOp::Negate => -operand,
        UnaryOp::Percent => operand / 100.0,
    };
    if value == 0.0 || value.is_nan() {
        0.0
    } else {
        value
    }
}

/// Rounds to six significant digits and normalizes the text for the display.
pub fn format_number(value: f64) -> String {
    normalize_scientific(&to_precision(value, DISPLAY_PRECISION))
}

/// Enough fraction digits to expand any finite `f64` exactly in exponent form.
const EXACT_EXPANSION_DIGITS: usize = 800;

/// Renders `value` with `digits` significant digits, switching to exponent form when the
/// decimal exponent is below -6 or at least `digits`.
///
/// Rounding works on the exact decimal expansion of `value`; an exact tie rounds away from
/// zero, so `12345.25` keeps six digits as `12345.3`.
pub fn to_precision(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let digits = digits.max(1);
    let (mut kept, exponent) = round_significant(value.abs(), digits);
    // -0 renders as 0
    let sign = if value < 0.0 { "-" } else { "" };

    if exponent < -6 || exponent >= digits as i32 {
        let exponent_sign = if exponent < 0 { '-' } else { '+' };
        if kept.len() > 1 {
            kept.insert(1, '.');
        }
        format!("{sign}{kept}e{exponent_sign}{}", exponent.unsigned_abs())
    } else if exponent < 0 {
        let leading_zeros = "0".repeat(exponent.unsigned_abs() as usize - 1);
        format!("{sign}0.{leading_zeros}{kept}")
    } else {
        let integer_len = exponent as usize + 1;
        if integer_len < kept.len() {
            kept.insert(integer_len, '.');
        }
        format!("{sign}{kept}")
    }
}

/// First `digits` significant digits of a non-negative `value`, rounded half up, together with
/// the decimal exponent of the leading digit.
fn round_significant(value: f64, digits: usize) -> (String, i32) {
    let expansion = format!("{:.*e}", EXACT_EXPANSION_DIGITS, value);
    let (mantissa, exponent) = expansion
        .split_once('e')
        .unwrap_or((expansion.as_str(), "0"));
    let mut exponent: i32 = exponent.parse().unwrap_or(0);
    let mut all_digits = mantissa.bytes().filter(u8::is_ascii_digit);

    let mut kept: Vec<u8> = all_digits.by_ref().take(digits).collect();
    let round_up = all_digits.next().is_some_and(|next| next >= b'5');
    if round_up {
        let carried = kept.iter_mut().rev().all(|digit| {
            if *digit == b'9' {
                *digit = b'0';
                true
            } else {
                *digit += 1;
                false
            }
        });
        if carried {
            kept.insert(0, b'1');
            kept.pop();
            exponent += 1;
        }
    }

    (kept.into_iter().map(char::from).collect(), exponent)
}

/// Strips trailing fractional zeros, a zero-only fraction before an exponent marker, zeros
/// directly before the exponent marker, and a dangling decimal point.
pub fn normalize_scientific(text: &str) -> String {
    let mut text = text.to_string();

    if let Some(dot) = text.rfind('.') {
        let fraction = &text[dot + 1..];
        if fraction.len() >= 2
            && fraction.chars().all(|c| c.is_ascii_digit())
            && fraction.ends_with('0')
        {
            let trimmed = text.trim_end_matches('0').len();
            text.truncate(trimmed);
        }
    }

    if let Some(dot) = text.rfind('.') {
        let fraction = &text[dot + 1..];
        if !fraction.is_empty() && fraction.chars().all(|c| c == '0') {
            text.truncate(dot);
        }
    }

    if let Some(marker) = text.find('e') {
        let mantissa = &text[..marker];
        if let Some(dot) = mantissa.rfind('.') {
            let fraction = &mantissa[dot + 1..];
            if !fraction.is_empty() && fraction.chars().all(|c| c == '0') {
                text.replace_range(dot..marker, "");
            }
        }
    }

    if let Some(marker) = text.find('e') {
        let zeros_start = text[..marker].trim_end_matches('0').len();
        if zeros_start < marker {
            text.replace_range(zeros_start..marker, "");
        }
    }

    if text.ends_with('.') {
        text.pop();
    }
    text
}

/// Parses the longest numeric prefix of `text`, yielding NaN when there is none.
pub fn parse_float(text: &str) -> f64 {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if text[end..].starts_with("Infinity") {
        return if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digit_count = end - digits_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let fraction_start = end + 1;
        let mut fraction_end = fraction_start;
        while fraction_end < bytes.len() && bytes[fraction_end].is_ascii_digit() {
            fraction_end += 1;
        }
        digit_count += fraction_end - fraction_start;
        end = fraction_end;
    }
    if digit_count == 0 {
        return f64::NAN;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+' | b'-')) {
            exponent_end += 1;
        }
        let exponent_digits_start = exponent_end;
        while exponent_end < bytes.len() && bytes[exponent_end].is_ascii_digit() {
            exponent_end += 1;
        }
        if exponent_end > exponent_digits_start {
            end = exponent_end;
        }
    }

    text[..end]
        .trim_end_matches('.')
        .parse::<f64>()
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn press_all(state: &mut CalculatorState, labels: &[&str]) {
        for label in labels {
            state.press(label);
        }
    }

    #[test]
    fn default_state_shows_zero_and_all_clear() {
        let state = CalculatorState::default();
        assert_eq!(state.display_text(), "0");
        assert_eq!(state.clear_label(), "AC");
        assert_eq!(state.keys(), KEY_LABELS);
        assert!(state.operator().is_none());
    }

    #[test]
    fn addition_normalizes_trailing_zeros() {
        let mut state = CalculatorState::default();
        press_all(&mut state, &["5", "+", "3", "="]);
        assert_eq!(state.display_text(), "8");
        assert_eq!(state.operand1(), "");
        assert_eq!(state.operand2(), "");
        assert!(state.operator().is_none());
    }

    #[test]
    fn division_by_zero_shows_nan() {
        let mut state = CalculatorState::default();
        press_all(&mut state, &["7", "÷", "0", "="]);
        assert_eq!(state.display_text(), "NaN");
    }

    #[test]
    fn equals_without_second_operand_reuses_first() {
        let mut state = CalculatorState::default();
        press_all(&mut state, &["5", "÷", "="]);
        assert_eq!(state.display_text(), "1");

        press_all(&mut state, &["6", "×", "="]);
        assert_eq!(state.display_text(), "36");
    }

    #[test]
    fn second_equals_is_a_no_op() {
        let mut state = CalculatorState::default();
        press_all(&mut state, &["9", "-", "4", "="]);
        let after_first = state.clone();
        state.press("=");
        assert_eq!(state, after_first);
        assert_eq!(state.display_text(), "5");
    }

    #[test]
    fn operator_seeds_first_operand_from_result() {
        let mut state = CalculatorState::default();
        press_all(&mut state, &["2", "+", "3", "="]);
        press_all(&mut state, &["×", "4", "="]);
        assert_eq!(state.display_text(), "20");
    }

    #[test]
    fn leading_zero_is_replaced_but_decimal_point_may_follow() {
        let mut state = CalculatorState::default();
        press_all(&mut state, &["0", "5"]);
        assert_eq!(state.operand1(), "5");

        state.press("AC");
        press_all(&mut state, &["0", ".", "5"]);
        assert_eq!(state.operand1(), "0.5");
        assert_eq!(state.display_text(), "0.5");
    }

    #[test]
    fn digits_target_second_operand_once_operator_is_set() {
        let mut state = CalculatorState::default();
        press_all(&mut state, &["1", "2", "-", "7"]);
        assert_eq!(state.operand1(), "12");
        assert_eq!(state.operand2(), "7");
        assert_eq!(state.operator(), Some(BinaryOp::Subtract));
        assert_eq!(state.display_text(), "7");
    }

    #[test]
    fn long_entries_are_shown_in_scientific_form() {
        let mut state = CalculatorState::default();
        press_all(&mut state, &["7", "0", "0", "0", "0", "0", "0", "0"]);
        assert_eq!(state.operand1(), "70000000");
        assert_eq!(state.display_text(), "7e+7");

        state.press("AC");
        press_all(&mut state, &["1", "2", "3", "4", "5", "6", "7"]);
        assert_eq!(state.display_text(), "1.23457e+6");

        state.press("AC");
        press_all(&mut state, &["0", ".", "0", "0", "0", "0", "1"]);
        assert_eq!(state.display_text(), "0.00001");
    }

    #[test]
    fn first_key_toggles_between_all_clear_and_clear() {
        let mut state = CalculatorState::default();
        state.press("4");
        assert_eq!(state.clear_label(), "C");
        assert_eq!(state.keys()[0], "C");

        state.press("C");
        assert_eq!(state.operand1(), "");
        assert_eq!(state.display_text(), "0");
        assert_eq!(state.clear_label(), "AC");
    }

    #[test]
    fn clear_is_context_sensitive() {
        let mut state = CalculatorState::default();
        press_all(&mut state, &["8", "+", "2"]);

        state.press("C");
        assert_eq!(state.operand2(), "");
        assert_eq!(state.operator(), Some(BinaryOp::Add));
        assert_eq!(state.display_text(), "0");
        assert_eq!(state.clear_label(), "C");

        state.press("C");
        assert!(state.operator().is_none());
        assert_eq!(state.operand1(), "8");
        assert_eq!(state.clear_label(), "C");

        state.press("C");
        assert_eq!(state.operand1(), "");
        assert_eq!(state.clear_label(), "AC");
    }

    #[test]
    fn all_clear_resets_from_any_state() {
        let mut state = CalculatorState::default();
        press_all(&mut state, &["4", "÷", "0", "=", "×", "3"]);
        state.press("AC");
        assert_eq!(state, CalculatorState::default());
        assert_eq!(state.display_text(), "0");
        assert!(state.operator().is_none());
    }

    #[test]
    fn unary_ops_without_operator_store_into_first_operand() {
        let mut state = CalculatorState::default();
        press_all(&mut state, &["5", "0", "%"]);
        assert_eq!(state.operand1(), "0.5");
        assert_eq!(state.display_text(), "0.5");

        state.press("+/-");
        assert_eq!(state.operand1(), "-0.5");

        state.press("AC");
        state.press("+/-");
        assert_eq!(state.operand1(), "0");
        assert_eq!(state.display_text(), "0");
    }

    #[test]
    fn unary_ops_with_both_operands_touch_only_the_second() {
        let mut state = CalculatorState::default();
        press_all(&mut state, &["2", "0", "0", "+", "1", "0", "%"]);
        assert_eq!(state.operand1(), "200");
        assert_eq!(state.operand2(), "0.1");
        state.press("=");
        assert_eq!(state.display_text(), "200.1");
    }

    #[test]
    fn unary_ops_with_empty_second_operand_copy_from_first() {
        let mut state = CalculatorState::default();
        press_all(&mut state, &["6", "×", "+/-"]);
        assert_eq!(state.operand1(), "6");
        assert_eq!(state.operand2(), "-6");
        state.press("=");
        assert_eq!(state.display_text(), "-36");
    }

    #[test]
    fn results_round_to_six_significant_digits() {
        let mut state = CalculatorState::default();
        press_all(&mut state, &["1", "÷", "3", "="]);
        assert_eq!(state.display_text(), "0.333333");

        press_all(&mut state, &["2", "÷", "3", "="]);
        assert_eq!(state.display_text(), "0.666667");
    }

    #[test]
    fn unknown_labels_are_ignored() {
        let mut state = CalculatorState::default();
        state.press("3");
        let before = state.clone();
        for label in ["sqrt", "", "12", "x", "Enter"] {
            state.press(label);
        }
        assert_eq!(state, before);
    }

    #[test]
    fn scientific_notation_formatting() {
        assert_eq!(format_number(70_000_000.0), "7e+7");
        assert_eq!(format_number(0.000_000_7), "7e-7");
        assert_eq!(format_number(15_000_000.0), "1.5e+7");
        assert_eq!(format_number(8.0), "8");
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn to_precision_matches_display_rules() {
        assert_eq!(to_precision(8.0, 6), "8.00000");
        assert_eq!(to_precision(70_000_000.0, 6), "7.00000e+7");
        assert_eq!(to_precision(0.000_000_7, 6), "7.00000e-7");
        assert_eq!(to_precision(0.000_001, 6), "0.00000100000");
        assert_eq!(to_precision(999_999.7, 6), "1.00000e+6");
        assert_eq!(to_precision(0.0, 6), "0.00000");
        assert_eq!(to_precision(-0.0, 6), "0.00000");
        assert_eq!(to_precision(-2.5, 6), "-2.50000");
        assert_eq!(to_precision(7.0, 1), "7");
        assert_eq!(to_precision(123.456, 3), "123");
    }

    #[test]
    fn to_precision_rounds_exact_ties_up() {
        assert_eq!(to_precision(12_345.25, 6), "12345.3");
        assert_eq!(to_precision(1_234_565.0, 6), "1.23457e+6");
        assert_eq!(to_precision(123_456.5, 6), "123457");
        assert_eq!(to_precision(-12_345.25, 6), "-12345.3");
        assert_eq!(to_precision(0.125, 2), "0.13");
        // 1.005 is stored just below the tie
        assert_eq!(to_precision(1.005, 3), "1.00");
    }

    #[test]
    fn tie_results_and_long_entries_round_up() {
        let mut state = CalculatorState::default();
        press_all(&mut state, &["1", "2", "3", "4", "5", "6", "+", "0", ".", "5", "="]);
        assert_eq!(state.display_text(), "123457");

        let mut state = CalculatorState::default();
        press_all(&mut state, &["1", "2", "3", "4", "5", ".", "2", "5"]);
        assert_eq!(state.display_text(), "12345.3");
    }

    #[test]
    fn normalize_scientific_cleans_mantissa() {
        assert_eq!(normalize_scientific("8.00000"), "8");
        assert_eq!(normalize_scientific("8.0"), "8");
        assert_eq!(normalize_scientific("12.5000"), "12.5");
        assert_eq!(normalize_scientific("7.00000e+7"), "7e+7");
        assert_eq!(normalize_scientific("1.23400e-9"), "1.234e-9");
        assert_eq!(normalize_scientific("42."), "42");
        assert_eq!(normalize_scientific("NaN"), "NaN");
    }

    #[test]
    fn parse_float_reads_longest_numeric_prefix() {
        assert_eq!(parse_float("12.5"), 12.5);
        assert_eq!(parse_float("5."), 5.0);
        assert_eq!(parse_float("1.2.3"), 1.2);
        assert_eq!(parse_float("7e+7"), 70_000_000.0);
        assert_eq!(parse_float("-3"), -3.0);
        assert_eq!(parse_float("-Infinity"), f64::NEG_INFINITY);
        assert!(parse_float("").is_nan());
        assert!(parse_float(".").is_nan());
        assert!(parse_float("NaN").is_nan());
    }
}
