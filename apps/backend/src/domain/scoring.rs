//! Deterministic derivation of score, name and visual from a scanned payload.
//!
//! Every value here is a pure function of the content hash, so two devices
//! scanning the same code always agree on what it is worth.

/// Lowercase hex digest of the raw scanned payload.
pub fn content_hash(payload: &[u8]) -> String {
    blake3::hash(payload).to_hex().to_string()
}

/// Score a hash by its runs of repeated hex digits.
///
/// A maximal run of length `n >= 2` of digit `d` is worth `d^(n-1)`, with
/// `0` counting as 20. Characters that are not hex digits are skipped.
pub fn score_for_hash(hash: &str) -> i64 {
    let digits: Vec<u32> = hash.chars().filter_map(|c| c.to_digit(16)).collect();

    let mut total: i64 = 0;
    let mut start = 0;
    while start < digits.len() {
        let digit = digits[start];
        let mut end = start + 1;
        while end < digits.len() && digits[end] == digit {
            end += 1;
        }

        let run = end - start;
        if run >= 2 {
            let base: i64 = if digit == 0 { 20 } else { i64::from(digit) };
            let exp = u32::try_from(run - 1).unwrap_or(u32::MAX);
            total = total.saturating_add(base.saturating_pow(exp));
        }
        start = end;
    }
    total
}

const NAME_PARTS: [(&str, &str); 6] = [
    ("cool ", "hot "),
    ("Fro", "Glo"),
    ("Mo", "Lo"),
    ("Mega", "Ultra"),
    ("Spectral", "Sonic"),
    ("Crab", "Shark"),
];

/// Human-friendly name picked from the leading six bits of the hash.
pub fn name_for_hash(hash: &str) -> String {
    let bits = leading_bits(hash);
    NAME_PARTS
        .iter()
        .enumerate()
        .map(|(i, (off, on))| if bits[i] { *on } else { *off })
        .collect()
}

/// Small ASCII face used as the code's rendering hint.
pub fn visual_for_hash(hash: &str) -> String {
    let bits = leading_bits(hash);
    let pick = |i: usize, off: &'static str, on: &'static str| if bits[i] { on } else { off };

    [
        pick(0, "  _____  ", "  #####  "),
        pick(1, " | o o | ", " | O O | "),
        pick(2, " |  >  | ", " |  v  | "),
        pick(3, " |  -  | ", " | \\_/ | "),
        pick(4, " |_____| ", " |_[_]_| "),
        pick(5, "   | |   ", "  /| |\\  "),
    ]
    .join("\n")
}

/// Most-significant-first bits of the first byte of the hash.
fn leading_bits(hash: &str) -> [bool; 8] {
    let byte = hash
        .get(..2)
        .and_then(|prefix| u8::from_str_radix(prefix, 16).ok())
        .unwrap_or(0);

    let mut bits = [false; 8];
    for (i, bit) in bits.iter_mut().enumerate() {
        *bit = (byte >> (7 - i)) & 1 == 1;
    }
    bits
}
