//! Checksum and sanity checks for pattern matches
//!
//! Every function takes the raw matched slice (separators included) and
//! looks only at the characters it cares about.

use std::net::{Ipv4Addr, Ipv6Addr};

fn digits(s: &str) -> Vec<u32> {
    s.chars().filter_map(|c| c.to_digit(10)).collect()
}

/// Luhn (mod 10) check used by payment cards.
pub fn luhn(s: &str) -> bool {
    let digits = digits(s);
    if !(12..=19).contains(&digits.len()) {
        return false;
    }

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}

/// ISO 13616 mod-97 check.
pub fn iban(s: &str) -> bool {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if !(15..=34).contains(&compact.len()) || !compact.is_ascii() {
        return false;
    }

    let (head, tail) = compact.split_at(4);
    let mut remainder: u32 = 0;
    for c in tail.chars().chain(head.chars()) {
        let value = match c.to_digit(36) {
            Some(v) => v,
            None => return false,
        };
        remainder = if value >= 10 {
            (remainder * 100 + value) % 97
        } else {
            (remainder * 10 + value) % 97
        };
    }

    remainder == 1
}

/// Rejects SSNs the SSA never issues.
pub fn us_ssn(s: &str) -> bool {
    let digits = digits(s);
    if digits.len() != 9 {
        return false;
    }
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    let area = digits[0] * 100 + digits[1] * 10 + digits[2];
    let group = digits[3] * 10 + digits[4];
    let serial = digits[5] * 1000 + digits[6] * 100 + digits[7] * 10 + digits[8];

    area != 0 && area != 666 && area < 900 && group != 0 && serial != 0
}

/// DEA registration number check digit.
pub fn us_dea(s: &str) -> bool {
    let digits = digits(s);
    // The second character may itself be a digit (the `9` prefix form).
    let d = &digits[digits.len().saturating_sub(7)..];
    if d.len() != 7 {
        return false;
    }

    let sum = d[0] + d[2] + d[4] + 2 * (d[1] + d[3] + d[5]);
    sum % 10 == d[6]
}

/// NHS number mod-11 check.
pub fn uk_nhs(s: &str) -> bool {
    let digits = digits(s);
    if digits.len() != 10 {
        return false;
    }

    let total: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| d * (10 - i as u32))
        .sum();

    total % 11 == 0
}

/// Australian Business Number mod-89 check.
pub fn au_abn(s: &str) -> bool {
    const WEIGHTS: [u32; 11] = [10, 1, 3, 5, 7, 9, 11, 13, 15, 17, 19];

    let mut digits = digits(s);
    if digits.len() != 11 || digits[0] == 0 {
        return false;
    }
    digits[0] -= 1;

    let total: u32 = digits.iter().zip(WEIGHTS).map(|(d, w)| d * w).sum();
    total % 89 == 0
}

/// Australian Company Number complement check.
pub fn au_acn(s: &str) -> bool {
    let digits = digits(s);
    if digits.len() != 9 {
        return false;
    }

    let total: u32 = digits[..8]
        .iter()
        .zip((1..=8u32).rev())
        .map(|(d, w)| d * w)
        .sum();

    (10 - total % 10) % 10 == digits[8]
}

/// Australian Tax File Number mod-11 check.
pub fn au_tfn(s: &str) -> bool {
    const WEIGHTS: [u32; 9] = [1, 4, 3, 7, 5, 8, 6, 9, 10];

    let digits = digits(s);
    if digits.len() != 9 {
        return false;
    }

    let total: u32 = digits.iter().zip(WEIGHTS).map(|(d, w)| d * w).sum();
    total % 11 == 0
}

/// Medicare card number: 8 weighted digits, then the check digit, then the
/// issue number.
pub fn au_medicare(s: &str) -> bool {
    const WEIGHTS: [u32; 8] = [1, 3, 7, 9, 1, 3, 7, 9];

    let digits = digits(s);
    if digits.len() != 10 {
        return false;
    }

    let total: u32 = digits[..8].iter().zip(WEIGHTS).map(|(d, w)| d * w).sum();
    total % 10 == digits[8]
}

const VERHOEFF_D: [[u8; 10]; 10] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 2, 3, 4, 0, 6, 7, 8, 9, 5],
    [2, 3, 4, 0, 1, 7, 8, 9, 5, 6],
    [3, 4, 0, 1, 2, 8, 9, 5, 6, 7],
    [4, 0, 1, 2, 3, 9, 5, 6, 7, 8],
    [5, 9, 8, 7, 6, 0, 4, 3, 2, 1],
    [6, 5, 9, 8, 7, 1, 0, 4, 3, 2],
    [7, 6, 5, 9, 8, 2, 1, 0, 4, 3],
    [8, 7, 6, 5, 9, 3, 2, 1, 0, 4],
    [9, 8, 7, 6, 5, 4, 3, 2, 1, 0],
];

const VERHOEFF_P: [[u8; 10]; 8] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 5, 7, 6, 2, 8, 3, 0, 9, 4],
    [5, 8, 0, 3, 7, 9, 6, 1, 4, 2],
    [8, 9, 1, 6, 0, 4, 3, 5, 2, 7],
    [9, 4, 5, 3, 1, 2, 6, 8, 7, 0],
    [4, 2, 8, 6, 5, 7, 3, 9, 0, 1],
    [2, 7, 9, 3, 8, 0, 6, 4, 1, 5],
    [7, 0, 4, 6, 9, 1, 3, 2, 5, 8],
];

pub fn verhoeff(s: &str) -> bool {
    let digits = digits(s);
    if digits.is_empty() {
        return false;
    }

    let mut c = 0usize;
    for (i, &d) in digits.iter().rev().enumerate() {
        c = VERHOEFF_D[c][VERHOEFF_P[i % 8][d as usize] as usize] as usize;
    }
    c == 0
}

/// Aadhaar: Verhoeff-valid and not a palindrome.
pub fn in_aadhaar(s: &str) -> bool {
    let digits = digits(s);
    if digits.len() != 12 {
        return false;
    }
    let reversed: Vec<u32> = digits.iter().rev().copied().collect();
    digits != reversed && verhoeff(s)
}

pub fn ip_address(s: &str) -> bool {
    s.parse::<Ipv4Addr>().is_ok() || ipv6_address(s)
}

/// Parses as IPv6 and carries at least one decimal digit, so hex-only words
/// joined by `::` are not taken for addresses.
pub fn ipv6_address(s: &str) -> bool {
    s.parse::<Ipv6Addr>().is_ok() && has_digit(s)
}

pub fn has_digit(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
}
