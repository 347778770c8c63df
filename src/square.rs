use crate::error::RulesError;

pub type Square = usize;

pub fn rank_of(sq: Square) -> usize {
    sq / 8
}
pub fn file_of(sq: Square) -> usize {
    sq % 8
}

/// Builds a square from signed rank/file coordinates, if they are on the
/// board. Move geometry walks squares with signed offsets and relies on this
/// for bounds checking.
pub fn square_at(rank: i8, file: i8) -> Option<Square> {
    if (0..8).contains(&rank) && (0..8).contains(&file) {
        Some(rank as usize * 8 + file as usize)
    } else {
        None
    }
}

/// Parses a coordinate such as `"e4"` (file letter a-h, rank digit 1-8)
/// ```
/// use arbiter::square::parse_square;
/// assert_eq!(parse_square("e4"), Ok(28));
/// assert_eq!(parse_square("a1"), Ok(0));
/// assert!(parse_square("k9").is_err());
/// assert!(parse_square("e44").is_err());
/// ```
pub fn parse_square(s: &str) -> Result<Square, RulesError> {
    let mut chars = s.chars();
    let file = match chars.next() {
        Some(c @ 'a'..='h') => c as usize - 'a' as usize,
        _ => return Err(RulesError::InvalidPosition(s.to_string())),
    };
    let rank = match chars.next().and_then(|c| c.to_digit(10)) {
        Some(d) if (1..=8).contains(&d) => d as usize - 1,
        _ => return Err(RulesError::InvalidPosition(s.to_string())),
    };
    if chars.next().is_some() {
        return Err(RulesError::InvalidPosition(s.to_string()));
    }
    Ok(rank * 8 + file)
}

/// Returns the string representation of a square
/// ```
/// use arbiter::square::square_representation;
/// assert_eq!(square_representation(28), Some(String::from("e4")));
/// assert_eq!(square_representation(65), None);
/// ```
pub fn square_representation(sq: Square) -> Option<String> {
    let rank = ('1'..='8').nth(rank_of(sq))?;
    let file = ('a'..='h').nth(file_of(sq))?;
    let mut repr = file.to_string();
    repr.push(rank);
    Some(repr)
}
