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

//! Move-generation core: bitboards, board state derived from FEN, leaper and
//! slider attack tables, and a board-agnostic move-token parser.

// Many module elements are re-exported to make names more ergonomic to access.

pub mod attacks;

mod bitboard;
pub use crate::bitboard::Bitboard;

mod board;
pub use board::Board;

mod castling;
pub use castling::CastleRights;

mod color;
pub use color::Color;

mod direction;
use direction::Direction;

mod error;
pub use error::Error;

mod magic;

pub mod move_token;
pub use move_token::MoveToken;

mod piece;
pub use piece::{Piece, PieceKind};

mod square;
pub use square::Square;

/// Parse a FEN record into a board state.
///
/// # Errors
///
/// Returns `Error::InvalidFen` if `fen` is malformed.
pub fn parse_fen(fen: &str) -> Result<Board, Error> {
    Board::from_fen(fen)
}

/// Parse a move token (SAN, UCI, or long algebraic, with annotations) into a
/// move descriptor. This never consults a board: validity is purely
/// syntactic, and is encoded in the returned descriptor's `invalid` field.
#[must_use]
pub fn parse_move(token: &str) -> MoveToken {
    MoveToken::parse(token)
}
