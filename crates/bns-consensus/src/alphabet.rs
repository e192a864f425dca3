/// The 40 characters admissible in names and namespace IDs, in code order.
pub const B40_CHARS: &str = "0123456789abcdefghijklmnopqrstuvwxyz-_.+";

/// Vowels that disqualify a name from the no-vowel discount.
pub(crate) const VOWELS: [char; 6] = ['a', 'e', 'i', 'o', 'u', 'y'];

/// Characters that qualify a name for the non-alpha discount.
pub(crate) const NONALPHA: [char; 12] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '-', '_'];

/// Returns true if every character of `s` belongs to the b40 alphabet.
///
/// The empty string is trivially b40; length limits are enforced by callers.
pub fn is_b40(s: &str) -> bool {
    s.chars().all(is_b40_char)
}

/// Returns true if `c` belongs to the b40 alphabet.
pub fn is_b40_char(c: char) -> bool {
    matches!(c, '0'..='9' | 'a'..='z' | '-' | '_' | '.' | '+')
}
