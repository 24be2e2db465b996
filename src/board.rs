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

//! State representations of boards, derived from FEN strings. Holds piece
//! positions in both bitboard and mailbox form, plus the FEN metadata fields
//! (side to move, castling rights, en passant target, and the two move
//! clocks).

use super::{Bitboard, CastleRights, Color, Error, Piece, PieceKind, Square};

use std::{
    convert::TryFrom,
    default::Default,
    fmt::{Display, Formatter},
};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
/// A position, derived entirely from a FEN string. Carries no history and no
/// notion of move legality; it only knows where pieces are and what the FEN
/// metadata fields say.
pub struct Board {
    /// The squares occupied by White and Black, respectively.
    sides: [Bitboard; 2],
    /// The squares occupied by each piece kind, indexed by `PieceKind as usize`.
    pieces: [Bitboard; PieceKind::NUM_TYPES],
    /// A mailbox view of the board: one `Piece` per square, indexed by
    /// `Square as usize`. Kept in sync with `sides`/`pieces`.
    mailbox: [Piece; 64],
    /// The color of the player to move.
    pub player: Color,
    /// The square which can be moved to by a pawn in en passant. `None` when
    /// the FEN did not specify one.
    pub en_passant_square: Option<Square>,
    /// The rights each side retains for castling.
    pub castle_rights: CastleRights,
    /// The number of halfmoves since the last capture or pawn advance, used
    /// for the fifty-move rule.
    pub halfmove_clock: u32,
    /// The number of the full move, starting at 1 and incremented after
    /// Black moves.
    pub fullmove_number: u32,
}

impl Board {
    /// Construct a `Board` from the standard chess starting position.
    #[must_use]
    pub fn new() -> Board {
        // The starting position FEN always parses.
        Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap()
    }

    /// Create a `Board` from a FEN string.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `fen` does not have six whitespace-separated fields,
    /// or if any field's contents are malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use chess_movecore::Board;
    ///
    /// let default_board = Board::new();
    /// let fen_board = Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
    /// assert_eq!(default_board, fen_board);
    /// ```
    pub fn from_fen(fen: &str) -> Result<Board, Error> {
        let mut fields = fen.split_whitespace();

        let placement = fields.next().ok_or(Error::InvalidFen)?;
        let side_to_move = fields.next().ok_or(Error::InvalidFen)?;
        let castling = fields.next().ok_or(Error::InvalidFen)?;
        let en_passant = fields.next().ok_or(Error::InvalidFen)?;
        let halfmove = fields.next().unwrap_or("0");
        let fullmove = fields.next().unwrap_or("1");
        if fields.next().is_some() {
            return Err(Error::InvalidFen);
        }

        let mut board = Board {
            sides: [Bitboard::EMPTY; 2],
            pieces: [Bitboard::EMPTY; PieceKind::NUM_TYPES],
            mailbox: [Piece::Empty; 64],
            en_passant_square: None,
            player: Color::White,
            castle_rights: CastleRights::NO_RIGHTS,
            halfmove_clock: 0,
            fullmove_number: 1,
        };

        let mut rows = placement.split('/');
        for r in (0..8).rev() {
            let row = rows.next().ok_or(Error::InvalidFen)?;
            let mut c = 0usize;
            for chr in row.chars() {
                if let Some(num_blanks) = chr.to_digit(10) {
                    c += num_blanks as usize;
                } else {
                    let color = if chr.is_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let kind =
                        PieceKind::from_code(chr.to_ascii_uppercase()).ok_or(Error::InvalidFen)?;
                    if c >= 8 {
                        return Err(Error::InvalidFen);
                    }
                    let sq = Square::new(r, c).ok_or(Error::InvalidFen)?;
                    board.add_piece(sq, kind, color);
                    c += 1;
                }
            }
            if c != 8 {
                return Err(Error::InvalidFen);
            }
        }
        if rows.next().is_some() {
            return Err(Error::InvalidFen);
        }

        board.player = match side_to_move {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(Error::InvalidFen),
        };

        if castling != "-" {
            for c in castling.chars() {
                board.castle_rights |= match c {
                    'K' => CastleRights::king_castle(Color::White),
                    'Q' => CastleRights::queen_castle(Color::White),
                    'k' => CastleRights::king_castle(Color::Black),
                    'q' => CastleRights::queen_castle(Color::Black),
                    _ => return Err(Error::InvalidFen),
                };
            }
        }

        if en_passant != "-" {
            board.en_passant_square =
                Some(Square::from_algebraic(en_passant).map_err(|_| Error::InvalidFen)?);
        }

        board.halfmove_clock = halfmove.parse().map_err(|_| Error::InvalidFen)?;
        board.fullmove_number = fullmove.parse().map_err(|_| Error::InvalidFen)?;

        if !board.is_valid() {
            return Err(Error::InvalidFen);
        }

        Ok(board)
    }

    /// Render this board back out as a FEN string.
    ///
    /// # Examples
    ///
    /// ```
    /// use chess_movecore::Board;
    ///
    /// let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
    /// assert_eq!(Board::from_fen(fen).unwrap().to_fen(), fen);
    /// ```
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut s = String::new();
        for r in (0..8).rev() {
            let mut blanks = 0u32;
            for c in 0..8 {
                let sq = Square::new(r, c).unwrap();
                match self.mailbox[sq as usize] {
                    Piece::Empty => blanks += 1,
                    p => {
                        if blanks > 0 {
                            s.push_str(&blanks.to_string());
                            blanks = 0;
                        }
                        s.push(p.code());
                    }
                }
            }
            if blanks > 0 {
                s.push_str(&blanks.to_string());
            }
            if r > 0 {
                s.push('/');
            }
        }

        s.push(' ');
        s.push(match self.player {
            Color::White => 'w',
            Color::Black => 'b',
        });

        s.push(' ');
        if self.castle_rights == CastleRights::NO_RIGHTS {
            s.push('-');
        } else {
            for (flag, chr) in [
                (CastleRights::king_castle(Color::White), 'K'),
                (CastleRights::queen_castle(Color::White), 'Q'),
                (CastleRights::king_castle(Color::Black), 'k'),
                (CastleRights::queen_castle(Color::Black), 'q'),
            ] {
                if self.castle_rights & flag != CastleRights::NO_RIGHTS {
                    s.push(chr);
                }
            }
        }

        s.push(' ');
        match self.en_passant_square {
            Some(sq) => s.push_str(&sq.to_string()),
            None => s.push('-'),
        }

        s.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));

        s
    }

    #[inline(always)]
    /// Get the squares occupied by each side.
    ///
    /// # Examples
    ///
    /// ```
    /// use chess_movecore::{Board, Bitboard};
    ///
    /// let board = Board::new();
    /// assert_eq!(board.occupancy(), Bitboard::new(0xFFFF00000000FFFF));
    /// ```
    pub fn occupancy(&self) -> Bitboard {
        self.sides[Color::White as usize] | self.sides[Color::Black as usize]
    }

    #[inline(always)]
    /// Get the squares occupied by the pieces of one color.
    pub fn side_occupancy(&self, color: Color) -> Bitboard {
        self.sides[color as usize]
    }

    #[inline(always)]
    /// Get the squares occupied by pieces of the given kind, regardless of
    /// color.
    pub fn kind_occupancy(&self, kind: PieceKind) -> Bitboard {
        self.pieces[kind as usize]
    }

    #[inline(always)]
    /// Get the type of the piece occupying a given square.
    /// Returns `None` if there are no pieces occupying the square.
    ///
    /// # Examples
    ///
    /// ```
    /// use chess_movecore::{Board, PieceKind, Square};
    ///
    /// let board = Board::new();
    /// assert_eq!(board.type_at_square(Square::E1), Some(PieceKind::King));
    /// assert_eq!(board.type_at_square(Square::E4), None)
    /// ```
    pub fn type_at_square(&self, sq: Square) -> Option<PieceKind> {
        self.mailbox[sq as usize].kind()
    }

    #[inline(always)]
    /// Get the color of a piece occupying a current square.
    /// Returns `None` if there are no pieces occupying the square.
    ///
    /// # Examples
    ///
    /// ```
    /// use chess_movecore::{Board, Color, Square};
    ///
    /// let board = Board::new();
    /// assert_eq!(board.color_at_square(Square::E1), Some(Color::White));
    /// assert_eq!(board.color_at_square(Square::E4), None)
    /// ```
    pub fn color_at_square(&self, sq: Square) -> Option<Color> {
        self.mailbox[sq as usize].color()
    }

    #[inline(always)]
    /// Get the piece (possibly `Piece::Empty`) occupying a given square.
    pub fn piece_at_square(&self, sq: Square) -> Piece {
        self.mailbox[sq as usize]
    }

    /// Check if the state of this board is self-consistent: the bitboard
    /// layers agree with each other and with the mailbox. This is a purely
    /// structural check; positions with zero, one, or several kings per
    /// side are accepted here, since legality is a downstream concern.
    fn is_valid(&self) -> bool {
        let mut sides_checksum = Bitboard::EMPTY;
        let mut sides_checkor = Bitboard::EMPTY;
        let mut pieces_checksum = Bitboard::EMPTY;
        let mut pieces_checkor = Bitboard::EMPTY;
        for bb in self.sides {
            sides_checksum += bb;
            sides_checkor |= bb;
        }
        for bb in self.pieces {
            pieces_checksum += bb;
            pieces_checkor |= bb;
        }
        if sides_checksum != sides_checkor
            || pieces_checksum != pieces_checkor
            || sides_checksum != pieces_checksum
        {
            return false;
        }

        if self.kind_occupancy(PieceKind::King) & self.side_occupancy(Color::White)
            != self
                .mailbox_bitboard(Piece::WhiteKing)
        {
            return false;
        }
        if self.kind_occupancy(PieceKind::King) & self.side_occupancy(Color::Black)
            != self.mailbox_bitboard(Piece::BlackKing)
        {
            return false;
        }

        true
    }

    /// Reconstruct a bitboard of every square carrying exactly `piece` from
    /// the mailbox. Used only for cross-checking `is_valid`.
    fn mailbox_bitboard(&self, piece: Piece) -> Bitboard {
        let mut bb = Bitboard::EMPTY;
        for i in 0..64 {
            if self.mailbox[i] == piece {
                bb |= Bitboard::from(Square::try_from(i as u8).unwrap());
            }
        }
        bb
    }

    #[inline(always)]
    /// Add a piece to the board at a given square. Should only be called
    /// when the square is currently empty.
    fn add_piece(&mut self, sq: Square, kind: PieceKind, color: Color) {
        let mask = Bitboard::from(sq);
        self.pieces[kind as usize] |= mask;
        self.sides[color as usize] |= mask;
        self.mailbox[sq as usize] = Piece::new(color, kind);
    }

}

impl Display for Board {
    /// Display this board in a console-ready format. Expresses as a series of
    /// 8 lines, where the topmost line is the 8th rank and the bottommost is
    /// the 1st. White pieces are represented with capital letters, while
    /// black pieces have lowercase.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for r in (0..8).rev() {
            for c in 0..8 {
                let sq = Square::new(r, c).unwrap();
                write!(f, "{} ", self.mailbox[sq as usize])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_two_kings_fen() {
        let board = Board::from_fen("7k/8/8/8/8/8/8/K7 w - - 0 1").unwrap();
        assert_eq!(board.type_at_square(Square::A1), Some(PieceKind::King));
        assert_eq!(board.type_at_square(Square::H8), Some(PieceKind::King));
        assert_eq!(board.occupancy().len(), 2);
    }

    #[test]
    fn start_fen() {
        let result =
            Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        assert_eq!(result, Board::default());
    }

    #[test]
    fn load_en_passant() {
        let b = Board::from_fen("rnbqkb1r/ppppp1pp/7n/4Pp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3")
            .unwrap();
        assert_eq!(b.en_passant_square, Some(Square::F6));
    }

    #[test]
    fn parses_move_clocks() {
        let b = Board::from_fen("8/8/8/8/8/8/8/K6k w - - 12 34").unwrap();
        assert_eq!(b.halfmove_clock, 12);
        assert_eq!(b.fullmove_number, 34);
    }

    #[test]
    fn roundtrips_through_fen() {
        let fens = [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1",
            "r1bqk1nr/pppp1ppp/2n5/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
            "rnbqkb1r/ppppp1pp/7n/4Pp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
        ];
        for fen in fens {
            let board = Board::from_fen(fen).unwrap();
            assert_eq!(board.to_fen(), fen);
        }
    }

    #[test]
    fn rejects_missing_fields() {
        assert!(Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq").is_err());
    }

    #[test]
    fn rejects_malformed_placement() {
        assert!(Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKB w KQkq - 0 1").is_err());
    }

    #[test]
    fn accepts_missing_king() {
        // no kings at all: still structurally consistent, so accepted here.
        let board = Board::from_fen("8/8/8/8/8/8/8/8 w - - 0 1").unwrap();
        assert_eq!(board.kind_occupancy(PieceKind::King), Bitboard::EMPTY);
    }

    #[test]
    fn accepts_duplicate_king() {
        // two white kings and none for black: illegal to play, but the
        // parser does not reject it; legality is a downstream concern.
        let board = Board::from_fen("8/8/8/8/8/8/8/K6K w - - 0 1").unwrap();
        assert_eq!(board.kind_occupancy(PieceKind::King).len(), 2);
        assert_eq!(board.side_occupancy(Color::Black).len(), 0);
    }
}
