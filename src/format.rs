//! Input masks and value formatting for the intake form
//!
//! Every formatter is a pure function from raw input text to the canonical
//! display pattern. All of them strip non-digits first, so re-applying a
//! formatter to its own output never corrupts it.

/// Masks applicable to plain text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mask {
    /// Postal code, `00000-000`.
    Cep,
    /// Phone number, `(00) 00000-0000`.
    Phone,
    /// Property registration number (inscrição imobiliária), `0000.0000.000.0000`.
    PropertyRegistration,
}

/// Apply a text mask to raw input.
pub fn apply(mask: Mask, input: &str) -> String {
    match mask {
        Mask::Cep => format_cep(input),
        Mask::Phone => format_phone(input),
        Mask::PropertyRegistration => format_property_registration(input),
    }
}

/// Keep only ASCII digits, capped at `max` characters.
fn digits(input: &str, max: usize) -> String {
    input.chars().filter(char::is_ascii_digit).take(max).collect()
}

/// Postal-code mask: 8 digits, dash after the 5th.
pub fn format_cep(input: &str) -> String {
    let d = digits(input, 8);
    if d.len() > 5 {
        format!("{}-{}", &d[..5], &d[5..])
    } else {
        d
    }
}

/// Phone mask: `(AA) NNNNN-NNNN`, partial groups rendered as they fill in.
pub fn format_phone(input: &str) -> String {
    let d = digits(input, 11);
    match d.len() {
        0..=2 => d,
        3..=7 => format!("({}) {}", &d[..2], &d[2..]),
        _ => format!("({}) {}-{}", &d[..2], &d[2..7], &d[7..]),
    }
}

/// Property-registration mask: 15 digits grouped 4-4-3-4 with dots.
pub fn format_property_registration(input: &str) -> String {
    let d = digits(input, 15);
    let mut out = String::with_capacity(18);
    for (i, c) in d.chars().enumerate() {
        if i == 4 || i == 8 || i == 11 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// A currency amount split into its display text and the canonical decimal
/// string persisted for the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyValue {
    /// What the user sees, e.g. `R$ 1.000,00`.
    pub display: String,
    /// What the backend receives, e.g. `1000.00`.
    pub stored: String,
}

/// Currency mask: every digit typed accumulates into an integer-cents value.
///
/// Empty input is a zero amount, never an empty string. Idempotent because
/// the display text round-trips through its own digits.
pub fn format_currency(input: &str) -> CurrencyValue {
    let d = digits(input, 15);
    let cents: u64 = d.trim_start_matches('0').parse().unwrap_or(0);
    CurrencyValue {
        display: format!("R$ {},{:02}", group_thousands(cents / 100), cents % 100),
        stored: format!("{}.{:02}", cents / 100, cents % 100),
    }
}

/// Re-render a canonical decimal string (`1000.00`) as BRL display text.
///
/// Values that do not parse pass through verbatim.
pub fn format_brl_display(stored: &str) -> String {
    let (reais, cents) = match stored.split_once('.') {
        Some((r, c)) if c.len() == 2 => (r, c),
        _ => (stored, "00"),
    };
    match (reais.parse::<u64>(), cents.parse::<u64>()) {
        (Ok(r), Ok(c)) => format!("R$ {},{:02}", group_thousands(r), c),
        _ => stored.to_string(),
    }
}

/// Group an integer with dot thousands separators, pt-BR style.
fn group_thousands(value: u64) -> String {
    let raw = value.to_string();
    let mut out = String::with_capacity(raw.len() + raw.len() / 3);
    for (i, c) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    mod cep {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_inserts_dash_after_fifth_digit() {
            assert_eq!(format_cep("01310100"), "01310-100");
        }

        #[test]
        fn test_short_input_stays_bare() {
            assert_eq!(format_cep("01310"), "01310");
            assert_eq!(format_cep("013"), "013");
        }

        #[test]
        fn test_caps_at_eight_digits() {
            assert_eq!(format_cep("0131010099"), "01310-100");
        }

        #[test]
        fn test_strips_non_digits() {
            assert_eq!(format_cep("01.310-100"), "01310-100");
        }

        #[test]
        fn test_idempotent() {
            let once = format_cep("01310100");
            assert_eq!(format_cep(&once), once);
        }
    }

    mod phone {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_full_number() {
            assert_eq!(format_phone("11987654321"), "(11) 98765-4321");
        }

        #[test]
        fn test_area_code_only_stays_bare() {
            assert_eq!(format_phone("11"), "11");
        }

        #[test]
        fn test_partial_prefix() {
            assert_eq!(format_phone("11987"), "(11) 987");
        }

        #[test]
        fn test_idempotent() {
            let once = format_phone("11987654321");
            assert_eq!(format_phone(&once), once);
        }
    }

    mod property_registration {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_groups_four_four_three_four() {
            assert_eq!(
                format_property_registration("123456789012345"),
                "1234.5678.901.2345"
            );
        }

        #[test]
        fn test_partial_input() {
            assert_eq!(format_property_registration("123456"), "1234.56");
            assert_eq!(format_property_registration("123456789"), "1234.5678.9");
        }

        #[test]
        fn test_caps_at_fifteen_digits() {
            assert_eq!(
                format_property_registration("12345678901234599"),
                "1234.5678.901.2345"
            );
        }

        #[test]
        fn test_idempotent() {
            let once = format_property_registration("123456789012345");
            assert_eq!(format_property_registration(&once), once);
        }
    }

    mod currency {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_digits_accumulate_as_cents() {
            let v = format_currency("100000");
            assert_eq!(v.display, "R$ 1.000,00");
            assert_eq!(v.stored, "1000.00");
        }

        #[test]
        fn test_empty_input_is_zero_amount() {
            let v = format_currency("");
            assert_eq!(v.display, "R$ 0,00");
            assert_eq!(v.stored, "0.00");
        }

        #[test]
        fn test_leading_zeros_stripped() {
            let v = format_currency("000505");
            assert_eq!(v.display, "R$ 5,05");
            assert_eq!(v.stored, "5.05");
        }

        #[test]
        fn test_sub_real_amount() {
            let v = format_currency("7");
            assert_eq!(v.display, "R$ 0,07");
            assert_eq!(v.stored, "0.07");
        }

        #[test]
        fn test_idempotent_on_own_display() {
            let once = format_currency("100000");
            let twice = format_currency(&once.display);
            assert_eq!(twice, once);
        }

        #[test]
        fn test_brl_display_from_stored() {
            assert_eq!(format_brl_display("1234567.89"), "R$ 1.234.567,89");
            assert_eq!(format_brl_display("0.00"), "R$ 0,00");
        }

        #[test]
        fn test_brl_display_passes_junk_through() {
            assert_eq!(format_brl_display("não numérico"), "não numérico");
        }
    }
}
