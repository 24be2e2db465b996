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

//! Errors produced while loading positions, parsing move tokens, or
//! constructing attack tables.

use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// An error produced somewhere in this crate.
pub enum Error {
    /// A FEN string did not have the expected six whitespace-separated
    /// fields, or one of its fields was malformed.
    InvalidFen,
    /// A square name was not two characters naming a file `a`-`h` and a rank
    /// `1`-`8`.
    InvalidSquare,
    /// The randomized search for a slider's magic number did not find a
    /// collision-free multiplier within the configured number of tries.
    MagicSearchExhausted,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let msg = match self {
            Error::InvalidFen => "invalid FEN string",
            Error::InvalidSquare => "invalid square name",
            Error::MagicSearchExhausted => "magic number search exhausted its try budget",
        };
        write!(f, "{msg}")
    }
}

impl std::error::Error for Error {}

impl From<&'static str> for Error {
    fn from(_: &'static str) -> Self {
        Error::InvalidSquare
    }
}
