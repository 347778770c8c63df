/// Caller-facing failure taxonomy. Every legality problem is a value of this
/// enum, never a panic; callers should treat `IllegalMove` and friends as
/// expected, user-reportable outcomes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    #[error("invalid square notation: {0}")]
    InvalidPosition(String),

    #[error("no piece at starting position")]
    NoPieceAtSource,

    #[error("cannot capture your own piece")]
    IllegalCapture,

    #[error("illegal move")]
    IllegalMove,

    #[error("piece belongs to the side not to move")]
    WrongTurn,

    #[error("invalid position string: {0}")]
    InvalidPositionString(String),
}
