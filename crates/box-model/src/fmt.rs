const INDENT: &str = "  ";

pub(crate) fn new_line_and_indent(s: &mut String, indent_num: usize) {
    if indent_num > 0 {
        s.push('\n');
    }
    for _ in 0..indent_num {
        s.push_str(INDENT);
    }
}

/// Round to three decimals, the precision at which box trees are compared.
#[inline]
pub(crate) fn round_em(value: f64) -> f64 {
    let rounded = (value * 1000.0).round() / 1000.0;
    // Avoid printing "-0".
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Append `value`, rounded to three decimals, without a trailing `.0`.
pub(crate) fn push_em(s: &mut String, value: f64) {
    let mut buffer = dtoa::Buffer::new();
    let printed = buffer.format(round_em(value));
    s.push_str(printed.strip_suffix(".0").unwrap_or(printed));
}
