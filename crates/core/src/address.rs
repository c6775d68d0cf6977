//! Spreadsheet-style column labels and A1 cell addresses.
//!
//! Columns are labelled `A..Z, AA..AZ, BA..ZZ, AAA..` (bijective base-26).
//! Rows are 1-based in addresses, 0-based everywhere else.

/// Convert a 0-based column index to its letter label: 0=A, 25=Z, 26=AA.
pub fn col_label(col: usize) -> String {
    let mut result = String::new();
    let mut n = col;
    loop {
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        // The -1 keeps the mapping bijective ("A" vs "AA")
        n = n / 26 - 1;
    }
    result
}

/// Inverse of [`col_label`]. Only uppercase ASCII letters are accepted.
pub fn col_index(label: &str) -> Option<usize> {
    if label.is_empty() {
        return None;
    }
    let mut n: usize = 0;
    for b in label.bytes() {
        if !b.is_ascii_uppercase() {
            return None;
        }
        let digit = (b - b'A') as usize + 1;
        n = n.checked_mul(26)?.checked_add(digit)?;
    }
    Some(n - 1)
}

/// Render a cell address such as `A1` from 0-based coordinates.
pub fn cell_address(row: usize, col: usize) -> String {
    format!("{}{}", col_label(col), row + 1)
}

/// Parse an address such as `B12` back into 0-based `(row, col)`.
///
/// Lowercase letters are accepted here since addresses are typed by users.
pub fn parse_cell_address(text: &str) -> Option<(usize, usize)> {
    let text = text.trim();
    let split = text.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = text.split_at(split);
    let col = col_index(&letters.to_ascii_uppercase())?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let row: usize = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some((row - 1, col))
}
