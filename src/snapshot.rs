use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::piece::{InvalidPieceCode, Piece};

/// The serialized board format handed to the view and the only form in
/// which a position is ever transmitted: ranks 8 down to 1 joined by `--`,
/// each rank listing files a through h as two-character piece codes with
/// `00` marking an empty square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Snapshot(pub [[Option<Piece>; 8]; 8]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseSnapshotError {
    WrongRankCount(usize),
    WrongRankLength { rank: u8, length: usize },
    InvalidPieceCode(InvalidPieceCode),
}
impl From<InvalidPieceCode> for ParseSnapshotError {
    fn from(value: InvalidPieceCode) -> Self {
        ParseSnapshotError::InvalidPieceCode(value)
    }
}
impl Display for ParseSnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseSnapshotError::WrongRankCount(count) => {
                write!(f, "found {count} ranks, 8 were expected")?;
            }
            ParseSnapshotError::WrongRankLength { rank, length } => write!(
                f,
                "rank {rank} has {length} characters, 16 were expected"
            )?,
            ParseSnapshotError::InvalidPieceCode(err) => write!(f, "{err}")?,
        }
        Ok(())
    }
}
impl Error for ParseSnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseSnapshotError::InvalidPieceCode(err) => Some(err),
            _ => None,
        }
    }
}

impl Display for Snapshot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, rank) in (0..8).rev().enumerate() {
            if i != 0 {
                write!(f, "--")?;
            }
            for file in 0..8 {
                match self.0[rank][file] {
                    Some(piece) => write!(f, "{}{}", piece.color.code(), piece.kind.code())?,
                    None => write!(f, "00")?,
                }
            }
        }
        Ok(())
    }
}
impl FromStr for Snapshot {
    type Err = ParseSnapshotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut squares = [[None; 8]; 8];
        let ranks: Vec<_> = s.split("--").collect();
        if ranks.len() != 8 {
            return Err(ParseSnapshotError::WrongRankCount(ranks.len()));
        }
        for (i, codes) in ranks.iter().enumerate() {
            let rank = 7 - i;
            let chars: Vec<_> = codes.chars().collect();
            if chars.len() != 16 {
                return Err(ParseSnapshotError::WrongRankLength {
                    rank: u8::try_from(rank).unwrap() + 1,
                    length: chars.len(),
                });
            }
            for file in 0..8 {
                let (color, kind) = (chars[file * 2], chars[file * 2 + 1]);
                squares[rank][file] = if (color, kind) == ('0', '0') {
                    None
                } else {
                    Some(Piece::from_code(color, kind)?)
                };
            }
        }
        Ok(Snapshot(squares))
    }
}

#[cfg(test)]
mod test {
    use crate::{board::Board, snapshot::Snapshot};

    const STARTING: &str = "brbnbbbqbkbbbnbr--bpbpbpbpbpbpbpbp--0000000000000000--\
                            0000000000000000--0000000000000000--0000000000000000--\
                            wpwpwpwpwpwpwpwp--wrwnwbwqwkwbwnwr";

    #[test]
    fn starting_position_matches_the_canonical_string() {
        assert_eq!(Board::starting_position().snapshot().to_string(), STARTING);
    }

    #[test]
    fn round_trips_exactly() {
        let snapshot: Snapshot = STARTING.parse().unwrap();
        assert_eq!(snapshot.to_string(), STARTING);
        assert_eq!(snapshot, Board::starting_position().snapshot());
    }

    #[test]
    fn malformed_snapshots_are_rejected() {
        assert!("brbnbb".parse::<Snapshot>().is_err());
        assert!(
            STARTING
                .replacen("bpbpbpbpbpbpbpbp", "bpbpbpbpbpbpbp", 1)
                .parse::<Snapshot>()
                .is_err()
        );
        assert!(
            STARTING
                .replacen("wq", "xq", 1)
                .parse::<Snapshot>()
                .is_err()
        );
    }
}
