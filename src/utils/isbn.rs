// Catalog code validation: ISBN-10 and ISBN-13 by checksum, plus generic
// 6-20 character alphanumeric product codes. Stateless collaborator of the
// catalog; the engine consults it when admitting a new book.

fn clean(code: &str) -> String {
    code.chars()
        .filter(|c| *c != '-' && *c != ' ')
        .collect::<String>()
        .to_uppercase()
}

fn is_isbn10_shape(chars: &[char]) -> bool {
    chars[..9].iter().all(|c| c.is_ascii_digit())
        && (chars[9].is_ascii_digit() || chars[9] == 'X')
}

fn isbn10_checksum(code: &str) -> bool {
    let mut checksum = 0u32;
    let mut position = 10u32;
    for c in code.chars() {
        let digit = if c == 'X' { 10 } else { c.to_digit(10).unwrap_or(0) };
        checksum += digit * position;
        position -= 1;
    }
    checksum % 11 == 0
}

fn isbn13_checksum(code: &str) -> bool {
    let total: u32 = code.chars().enumerate()
        .map(|(index, c)| {
            let digit = c.to_digit(10).unwrap_or(0);
            let weight = if index % 2 == 0 { 1 } else { 3 };
            digit * weight
        })
        .sum();
    total % 10 == 0
}

/// Returns true when `code` is a valid ISBN-10, a valid ISBN-13, or a
/// generic alphanumeric code of 6 to 20 characters. Dashes and spaces are
/// ignored; letters are folded to uppercase. A 10-character code that is
/// not ISBN-shaped is rejected outright.
pub fn is_valid_catalog_code(code: &str) -> bool {
    let cleaned = clean(code);
    // lengths are character counts, not byte counts, so multibyte input
    // lands in the right arm instead of slicing past a char boundary
    let chars: Vec<char> = cleaned.chars().collect();
    match chars.len() {
        10 => is_isbn10_shape(&chars) && isbn10_checksum(&cleaned),
        13 if chars.iter().all(|c| c.is_ascii_digit()) => isbn13_checksum(&cleaned),
        6..=20 => chars.iter().all(|c| c.is_ascii_alphanumeric()),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use crate::utils::isbn::is_valid_catalog_code;

    #[tokio::test]
    async fn test_should_accept_valid_isbn10() {
        assert!(is_valid_catalog_code("0-306-40615-2"));
        assert!(is_valid_catalog_code("0306406152"));
        // X check digit
        assert!(is_valid_catalog_code("097522980X"));
    }

    #[tokio::test]
    async fn test_should_reject_invalid_isbn10() {
        assert!(!is_valid_catalog_code("0306406153"));
        // ISBN-shaped but letters in the body never reach the checksum
        assert!(!is_valid_catalog_code("03064O6152"));
    }

    #[tokio::test]
    async fn test_should_accept_valid_isbn13() {
        assert!(is_valid_catalog_code("9780306406157"));
        assert!(is_valid_catalog_code("978-0-306-40615-7"));
    }

    #[tokio::test]
    async fn test_should_reject_invalid_isbn13() {
        assert!(!is_valid_catalog_code("9780306406158"));
    }

    #[tokio::test]
    async fn test_should_accept_generic_alphanumeric_codes() {
        assert!(is_valid_catalog_code("BK0001"));
        assert!(is_valid_catalog_code("abc123xyz"));
        // 13 characters with letters falls back to the generic rule
        assert!(is_valid_catalog_code("ABC1234567890"));
    }

    #[tokio::test]
    async fn test_should_reject_out_of_range_codes() {
        assert!(!is_valid_catalog_code("12345"));
        assert!(!is_valid_catalog_code("123456789012345678901"));
        assert!(!is_valid_catalog_code("short!"));
    }

    #[tokio::test]
    async fn test_should_reject_multibyte_codes_without_panicking() {
        // five chars but ten bytes; must not be treated as ISBN-shaped
        assert!(!is_valid_catalog_code("ééééé"));
        // ten chars of multibyte text takes the ISBN-10 arm and fails shape
        assert!(!is_valid_catalog_code("éééééééééé"));
        // in-range length but not alphanumeric ascii
        assert!(!is_valid_catalog_code("livré-0001"));
    }
}
