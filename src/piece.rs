/*
  Fiddler, a UCI-compatible chess engine.
  Copyright (C) 2022 The Fiddler Authors (see AUTHORS.md file)

  Fiddler is free software: you can redistribute it and/or modify
  it under the terms of the GNU General Public License as published by
  the Free Software Foundation, either version 3 of the License, or
  (at your option) any later version.

  Fiddler is distributed in the hope that it will be useful,
  but WITHOUT ANY WARRANTY; without even the implied warranty of
  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
  GNU General Public License for more details.

  You should have received a copy of the GNU General Public License
  along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/

//! Piece kinds, which contain no information about their color or current
//! square, and the combined `Piece` type used on a mailbox board.

use crate::Color;
use std::fmt::{Display, Formatter, Result};

#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
/// The type of a piece. This contains no information about the location of a
/// piece, or of its color.
///
/// The ordering of elements of this enumeration is highly intentional. The
/// first four pieces (knight, bishop, rook, and queen) are generally
/// well-behaved and subject to the same rules, and are all valid promotion
/// types. However, pawns and kings have no such obligations. Having the
/// well-behaved types as the lower integers allows them to be more efficiently
/// packed as promotion types and generally reduces hassle.
pub enum PieceKind {
    Knight = 0,
    Bishop,
    Rook,
    Queen,
    Pawn,
    King,
}

impl PieceKind {
    /// Total number of piece kinds.
    pub const NUM_TYPES: usize = 6;

    /// Array containing all piece kinds.
    pub const ALL_TYPES: [PieceKind; PieceKind::NUM_TYPES] = [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::Pawn,
        PieceKind::King,
    ];

    /// Array containing piece kinds which are not pawns.
    pub const NON_PAWN_TYPES: [PieceKind; PieceKind::NUM_TYPES - 1] = [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Array containing piece kinds which are not kings.
    pub const NON_KING_TYPES: [PieceKind; PieceKind::NUM_TYPES - 1] = [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::Pawn,
    ];

    /// Get the FEN code of this piece kind as an uppercase string.
    pub const fn code(self) -> &'static str {
        match self {
            PieceKind::Knight => "N",
            PieceKind::Bishop => "B",
            PieceKind::Rook => "R",
            PieceKind::Queen => "Q",
            PieceKind::Pawn => "P",
            PieceKind::King => "K",
        }
    }

    /// Given a FEN character, convert it to a piece kind. Must be uppercase.
    pub const fn from_code(c: char) -> Option<PieceKind> {
        match c {
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'P' => Some(PieceKind::Pawn),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
/// A piece occupying a square on a mailbox board, carrying both its kind and
/// its color, or no piece at all.
pub enum Piece {
    Empty,
    WhiteKnight,
    WhiteBishop,
    WhiteRook,
    WhiteQueen,
    WhitePawn,
    WhiteKing,
    BlackKnight,
    BlackBishop,
    BlackRook,
    BlackQueen,
    BlackPawn,
    BlackKing,
}

impl Piece {
    /// Construct a `Piece` from a piece kind and the color of its owner.
    #[must_use]
    pub const fn new(color: Color, kind: PieceKind) -> Piece {
        match (color, kind) {
            (Color::White, PieceKind::Knight) => Piece::WhiteKnight,
            (Color::White, PieceKind::Bishop) => Piece::WhiteBishop,
            (Color::White, PieceKind::Rook) => Piece::WhiteRook,
            (Color::White, PieceKind::Queen) => Piece::WhiteQueen,
            (Color::White, PieceKind::Pawn) => Piece::WhitePawn,
            (Color::White, PieceKind::King) => Piece::WhiteKing,
            (Color::Black, PieceKind::Knight) => Piece::BlackKnight,
            (Color::Black, PieceKind::Bishop) => Piece::BlackBishop,
            (Color::Black, PieceKind::Rook) => Piece::BlackRook,
            (Color::Black, PieceKind::Queen) => Piece::BlackQueen,
            (Color::Black, PieceKind::Pawn) => Piece::BlackPawn,
            (Color::Black, PieceKind::King) => Piece::BlackKing,
        }
    }

    /// Split this piece into its color and kind, or `None` if the square is
    /// empty.
    #[must_use]
    pub const fn color_and_kind(self) -> Option<(Color, PieceKind)> {
        match self {
            Piece::Empty => None,
            Piece::WhiteKnight => Some((Color::White, PieceKind::Knight)),
            Piece::WhiteBishop => Some((Color::White, PieceKind::Bishop)),
            Piece::WhiteRook => Some((Color::White, PieceKind::Rook)),
            Piece::WhiteQueen => Some((Color::White, PieceKind::Queen)),
            Piece::WhitePawn => Some((Color::White, PieceKind::Pawn)),
            Piece::WhiteKing => Some((Color::White, PieceKind::King)),
            Piece::BlackKnight => Some((Color::Black, PieceKind::Knight)),
            Piece::BlackBishop => Some((Color::Black, PieceKind::Bishop)),
            Piece::BlackRook => Some((Color::Black, PieceKind::Rook)),
            Piece::BlackQueen => Some((Color::Black, PieceKind::Queen)),
            Piece::BlackPawn => Some((Color::Black, PieceKind::Pawn)),
            Piece::BlackKing => Some((Color::Black, PieceKind::King)),
        }
    }

    /// Get the kind of this piece, discarding color information.
    #[must_use]
    pub const fn kind(self) -> Option<PieceKind> {
        match self.color_and_kind() {
            Some((_, kind)) => Some(kind),
            None => None,
        }
    }

    /// Get the color of this piece, or `None` if the square is empty.
    #[must_use]
    pub const fn color(self) -> Option<Color> {
        match self.color_and_kind() {
            Some((color, _)) => Some(color),
            None => None,
        }
    }

    /// Get the FEN character for this piece: uppercase for White, lowercase
    /// for Black, and `'.'` for an empty square.
    #[must_use]
    pub fn code(self) -> char {
        match self.color_and_kind() {
            None => '.',
            Some((Color::White, kind)) => kind.code().chars().next().unwrap(),
            Some((Color::Black, kind)) => {
                kind.code().chars().next().unwrap().to_ascii_lowercase()
            }
        }
    }
}

impl Default for Piece {
    fn default() -> Self {
        Piece::Empty
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_roundtrip() {
        let p = Piece::new(Color::Black, PieceKind::Knight);
        assert_eq!(p, Piece::BlackKnight);
        assert_eq!(p.color_and_kind(), Some((Color::Black, PieceKind::Knight)));
        assert_eq!(p.code(), 'n');
    }

    #[test]
    fn empty_piece_has_no_kind_or_color() {
        assert_eq!(Piece::Empty.kind(), None);
        assert_eq!(Piece::Empty.color(), None);
        assert_eq!(Piece::Empty.code(), '.');
    }

    #[test]
    fn piece_kind_from_fen_code() {
        assert_eq!(PieceKind::from_code('Q'), Some(PieceKind::Queen));
        assert_eq!(PieceKind::from_code('q'), None);
    }
}
