//! Display helpers for values collected by the form.

/// Render a Brazilian mobile number as `(XX) XXXXX-XXXX`.
///
/// Non-digits are stripped first. Inputs that do not have exactly 11 digits
/// are returned as bare digits.
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() != 11 {
        return digits;
    }
    format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..])
}

/// Lowercase the name, then uppercase the first letter of each word.
pub fn capitalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;
    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.push(c);
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
