/// An 8-bit RGB triple.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
}

/// Parses a hex color string in `#RGB` or `#RRGGBB` form.
///
/// Shorthand nibbles are duplicated, so `"#abc"` parses as `Rgb(0xaa, 0xbb, 0xcc)`.
/// Any other string length parses to black, and invalid hex digits read as zero;
/// callers feed user-supplied color lists straight through, so this stays lossy
/// rather than erroring.
pub fn parse_hex(hex: &str) -> Rgb {
    let b = hex.as_bytes();
    match b.len() {
        4 => Rgb(nibble_pair(b[1]), nibble_pair(b[2]), nibble_pair(b[3])),
        7 => Rgb(byte(b[1], b[2]), byte(b[3], b[4]), byte(b[5], b[6])),
        _ => Rgb::BLACK,
    }
}

fn hex_digit(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => 0,
    }
}

fn nibble_pair(b: u8) -> u8 {
    hex_digit(b) * 0x11
}

fn byte(hi: u8, lo: u8) -> u8 {
    hex_digit(hi) * 16 + hex_digit(lo)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_full_form() {
        assert_eq!(parse_hex("#ff0000"), Rgb(255, 0, 0));
        assert_eq!(parse_hex("#00ff00"), Rgb(0, 255, 0));
        assert_eq!(parse_hex("#0000ff"), Rgb(0, 0, 255));
        assert_eq!(parse_hex("#8ec5fc"), Rgb(0x8e, 0xc5, 0xfc));
        assert_eq!(parse_hex("#AbCdEf"), Rgb(0xab, 0xcd, 0xef));
    }

    #[test]
    fn test_shorthand_form() {
        assert_eq!(parse_hex("#f00"), Rgb(255, 0, 0));
        assert_eq!(parse_hex("#abc"), Rgb(0xaa, 0xbb, 0xcc));
    }

    #[test]
    fn test_shorthand_agrees_with_full() {
        for (short, full) in [
            ("#000", "#000000"),
            ("#fff", "#ffffff"),
            ("#18f", "#1188ff"),
        ] {
            assert_eq!(parse_hex(short), parse_hex(full), "{} vs {}", short, full);
        }
    }

    #[test]
    fn test_unrecognized_length_is_black() {
        assert_eq!(parse_hex(""), Rgb::BLACK);
        assert_eq!(parse_hex("#"), Rgb::BLACK);
        assert_eq!(parse_hex("#ff00"), Rgb::BLACK);
        assert_eq!(parse_hex("#ff000000"), Rgb::BLACK);
        assert_eq!(parse_hex("ff0000"), Rgb::BLACK);
    }

    #[test]
    fn test_invalid_digits_read_as_zero() {
        assert_eq!(parse_hex("#zzzzzz"), Rgb::BLACK);
        assert_eq!(parse_hex("#ffzz00"), Rgb(255, 0, 0));
    }
}
