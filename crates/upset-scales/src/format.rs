/// Integer with thousands separators, e.g. `12,345`.
pub fn format_count(value: f64) -> String {
    group_thousands(&format!("{:.0}", value.round()))
}

/// Two decimal places, used for risk ratios and their bounds.
pub fn format_ratio(value: f64) -> String {
    format!("{value:.2}")
}

/// Axis label for `value` on an axis whose ticks are `step` apart. Uses just
/// enough decimals to tell neighbouring ticks apart.
pub fn format_tick(value: f64, step: f64) -> String {
    let precision = precision_for_step(step);
    group_thousands(&format!("{value:.precision$}"))
}

fn precision_for_step(step: f64) -> usize {
    let step = step.abs();
    if !step.is_finite() || step == 0.0 {
        return 0;
    }
    let exponent = step.log10().floor();
    if exponent >= 0.0 { 0 } else { (-exponent) as usize }
}

fn group_thousands(formatted: &str) -> String {
    let (sign, rest) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (int_part, frac_part) = match rest.find('.') {
        Some(dot) => rest.split_at(dot),
        None => (rest, ""),
    };

    let digits = int_part.len();
    let mut out = String::with_capacity(formatted.len() + digits / 3);
    // "-0" reads oddly on an axis
    if int_part.chars().any(|c| c != '0')
        || frac_part.chars().any(|c| c.is_ascii_digit() && c != '0')
    {
        out.push_str(sign);
    }
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push_str(frac_part);
    out
}
