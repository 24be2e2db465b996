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

//! Parsing of user-supplied move tokens (SAN, UCI, and long algebraic forms)
//! into a structured descriptor. This parser never looks at a board: it only
//! inspects the shape of the token string.

use crate::PieceKind;

/// Null-move tokens recognized regardless of surrounding case.
const NULL_TOKENS: [&str; 11] = [
    "(null)", "00-00", "null", "0000", "pass", "@@@@", "any", "z0", "<>", "--", "$0",
];

/// Evaluation annotations stripped from a token, longest first so that e.g.
/// `!!!` is not mistaken for `!` with leftover `!!`.
const EVAL_SYMBOLS: [&str; 15] = [
    "!!!", "???", "(!)", "(?)", "+/-", "+/=", "-/+", "=/+", "!!", "??", "!?", "?!", "tn", "!", "?",
];

/// End-of-game indicators, stripped with no effect on any flag.
const GAME_RESULT_TOKENS: [&str; 4] = ["1-0", "0-1", "white resigns", "black resigns"];

/// Check suffixes, tried before checkmate suffixes per the stripping order.
const CHECK_SUFFIXES: [&str; 6] = ["dbl. ch.", "dis. ch.", "ch.", "++", "ch", "+"];

/// Checkmate suffixes.
const CHECKMATE_SUFFIXES: [&str; 2] = ["mate", "#"];

/// En passant suffixes.
const EP_SUFFIXES: [&str; 3] = ["e.p.", "ep.", "ep"];

#[derive(Clone, Debug, PartialEq, Eq)]
/// The structured result of parsing a move token. Produced purely from the
/// shape of the input string; no board is consulted.
pub struct MoveToken {
    /// The original, unmodified text that was parsed.
    pub original: String,
    /// The kind of piece making the move, if one could be determined.
    pub piece_kind: Option<PieceKind>,
    /// The piece kind promoted to, if this move is a promotion.
    pub promotion: Option<PieceKind>,
    /// The origin file (0 = a .. 7 = h), if specified by the token.
    pub from_file: Option<u8>,
    /// The origin rank (0 = rank 1 .. 7 = rank 8), if specified by the token.
    pub from_rank: Option<u8>,
    /// The destination file, if a destination square could be extracted.
    pub to_file: Option<u8>,
    /// The destination rank, if a destination square could be extracted.
    pub to_rank: Option<u8>,
    /// Whether this token represents castling kingside.
    pub kingside_castle: bool,
    /// Whether this token represents castling queenside.
    pub queenside_castle: bool,
    /// Whether this token represents a null move.
    pub null: bool,
    /// Whether this token failed to parse. When `true`, no other field is
    /// guaranteed to carry meaningful information.
    pub invalid: bool,
    /// Whether the token carried a `(=)` draw-offer annotation.
    pub draw_offered: bool,
    /// Whether the token was marked as an en passant capture.
    pub en_passant: bool,
    /// Whether the token denotes a capture.
    pub capture: bool,
    /// Whether the token was annotated as giving check.
    pub check: bool,
    /// Whether the token was annotated as giving checkmate.
    pub checkmate: bool,
}

impl MoveToken {
    /// The descriptor produced by a token that fails to parse.
    fn invalid(original: &str) -> MoveToken {
        MoveToken {
            original: original.to_owned(),
            piece_kind: None,
            promotion: None,
            from_file: None,
            from_rank: None,
            to_file: None,
            to_rank: None,
            kingside_castle: false,
            queenside_castle: false,
            null: false,
            invalid: true,
            draw_offered: false,
            en_passant: false,
            capture: false,
            check: false,
            checkmate: false,
        }
    }

    /// The descriptor produced by a recognized null move.
    fn null_move(original: &str) -> MoveToken {
        MoveToken {
            null: true,
            ..MoveToken::invalid(original)
        }
        .with_valid()
    }

    /// Clear the `invalid` flag. Used once a descriptor is known to be sound.
    fn with_valid(mut self) -> MoveToken {
        self.invalid = false;
        self
    }

    /// Parse a move token into a structured descriptor.
    ///
    /// # Examples
    ///
    /// ```
    /// use chess_movecore::{move_token::MoveToken, PieceKind};
    ///
    /// let tok = MoveToken::parse("Nf3");
    /// assert_eq!(tok.piece_kind, Some(PieceKind::Knight));
    /// assert_eq!(tok.to_file, Some(5));
    /// assert_eq!(tok.to_rank, Some(2));
    /// ```
    #[must_use]
    pub fn parse(token: &str) -> MoveToken {
        let trimmed = token.trim();
        let lower = trimmed.to_ascii_lowercase();
        if NULL_TOKENS.contains(&lower.as_str()) {
            return MoveToken::null_move(trimmed);
        }

        let mut desc = MoveToken::invalid(trimmed);
        let mut residual = trimmed.to_owned();

        strip_annotations(&mut residual, &mut desc);

        if strip_castle(&mut residual, &mut desc) {
            if !residual.is_empty() {
                return MoveToken::invalid(trimmed);
            }
            return desc.with_valid();
        }

        strip_promotion(&mut residual, &mut desc);
        strip_en_passant(&mut residual, &mut desc);

        if !is_valid_residual(&residual) {
            return MoveToken::invalid(trimmed);
        }

        if classify_shape(&residual, &mut desc) {
            desc.with_valid()
        } else {
            MoveToken::invalid(trimmed)
        }
    }
}

/// Strip a known annotation suffix from the end of `s`, mutating `desc`'s
/// flags to match. Runs until no further annotation can be stripped.
fn strip_annotations(s: &mut String, desc: &mut MoveToken) {
    loop {
        let lower = s.to_ascii_lowercase();

        if let Some(sym) = EVAL_SYMBOLS.iter().find(|sym| lower.ends_with(*sym)) {
            truncate_end(s, sym.len());
            continue;
        }

        if lower.ends_with('=') && !lower.ends_with("(=)") {
            truncate_end(s, 1);
            continue;
        }

        if let Some(tok) = GAME_RESULT_TOKENS
            .iter()
            .find(|tok| lower.ends_with(*tok))
        {
            truncate_end(s, tok.len());
            continue;
        }

        if lower.ends_with("(=)") {
            truncate_end(s, 3);
            desc.draw_offered = true;
            continue;
        }

        if let Some(sym) = CHECK_SUFFIXES.iter().find(|sym| lower.ends_with(*sym)) {
            truncate_end(s, sym.len());
            desc.check = true;
            continue;
        }

        if let Some(sym) = CHECKMATE_SUFFIXES.iter().find(|sym| lower.ends_with(*sym)) {
            truncate_end(s, sym.len());
            desc.checkmate = true;
            continue;
        }

        break;
    }
}

/// Remove `n` bytes from the end of `s`. `s` is always ASCII, so byte and
/// character boundaries coincide.
fn truncate_end(s: &mut String, n: usize) {
    let new_len = s.len().saturating_sub(n);
    s.truncate(new_len);
}

/// Detect and strip castling notation. Queenside is tested before kingside so
/// that its pattern is not shadowed by a kingside prefix match.
fn strip_castle(s: &mut String, desc: &mut MoveToken) -> bool {
    let lower = s.to_ascii_lowercase();
    if lower == "0-0-0" || lower == "o-o-o" {
        s.clear();
        desc.queenside_castle = true;
        desc.piece_kind = Some(PieceKind::King);
        true
    } else if lower == "0-0" || lower == "o-o" {
        s.clear();
        desc.kingside_castle = true;
        desc.piece_kind = Some(PieceKind::King);
        true
    } else {
        false
    }
}

/// Detect and strip a trailing promotion marker of the form
/// `<square>[=|(|/]?<piece>`, where the square lies on rank 1 or rank 8.
fn strip_promotion(s: &mut String, desc: &mut MoveToken) {
    let bytes: Vec<char> = s.chars().collect();
    if bytes.len() < 3 {
        return;
    }
    let last = *bytes.last().unwrap();
    let Some(kind) = PieceKind::from_code(last.to_ascii_uppercase()) else {
        return;
    };
    if matches!(kind, PieceKind::King | PieceKind::Pawn) {
        return;
    }

    // `b` as a promotion piece is only accepted when it is the very last
    // character with no separator, since a bare `b` elsewhere denotes a file.
    let mut idx = bytes.len() - 1;
    let had_separator = matches!(bytes[idx - 1], '=' | '(' | '/');
    if had_separator {
        idx -= 1;
    }
    if idx < 2 {
        return;
    }
    let rank_char = bytes[idx - 1];
    let file_char = bytes[idx - 2];
    let Some(rank) = rank_char.to_digit(10) else {
        return;
    };
    if !(('a'..='h').contains(&file_char) && (rank == 1 || rank == 8)) {
        return;
    }

    desc.promotion = Some(kind);
    desc.piece_kind = Some(PieceKind::Pawn);
    desc.to_file = Some(file_char as u8 - b'a');
    desc.to_rank = Some(rank as u8 - 1);

    let new_len: usize = bytes[..=idx].iter().map(|c| c.len_utf8()).sum::<usize>()
        - bytes[idx].len_utf8();
    s.truncate(new_len);
}

/// Strip a trailing en passant marker and set `desc.en_passant`.
fn strip_en_passant(s: &mut String, desc: &mut MoveToken) {
    let lower = s.to_ascii_lowercase();
    if let Some(suffix) = EP_SUFFIXES.iter().find(|suf| lower.ends_with(*suf)) {
        truncate_end(s, suffix.len());
        desc.en_passant = true;
    }
}

/// Validate that only characters from the accepted alphabet remain, and that
/// there is at most one moving-piece letter and at most one capture marker.
fn is_valid_residual(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    let mut piece_letters = 0;
    let mut captures = 0;
    for c in s.chars() {
        match c {
            'K' | 'Q' | 'B' | 'N' | 'R' => piece_letters += 1,
            'x' | 'X' => captures += 1,
            'a'..='h' | '1'..='8' | '-' => {}
            _ => return false,
        }
    }
    piece_letters <= 1 && captures <= 1
}

/// Parse the already-stripped residual into the `from`/`to`/piece fields of
/// `desc`. Returns `false` if the residual does not match any accepted
/// shape.
fn classify_shape(residual: &str, desc: &mut MoveToken) -> bool {
    let cleaned: String = residual.chars().filter(|&c| c != '-').collect();

    if let Some(pos) = cleaned.find(['x', 'X']) {
        desc.capture = true;
        let (left, right) = (&cleaned[..pos], &cleaned[pos + 1..]);
        return classify_capture(left, right, desc);
    }

    let chars: Vec<char> = cleaned.chars().collect();
    match chars.len() {
        4 if is_uci_shape(&chars) => {
            desc.piece_kind = Some(PieceKind::Pawn);
            desc.from_file = file_of(chars[0]);
            desc.from_rank = rank_of(chars[1]);
            desc.to_file = file_of(chars[2]);
            desc.to_rank = rank_of(chars[3]);
            desc.from_file.is_some()
                && desc.from_rank.is_some()
                && desc.to_file.is_some()
                && desc.to_rank.is_some()
        }
        2 => {
            desc.piece_kind = Some(PieceKind::Pawn);
            desc.to_file = file_of(chars[0]);
            desc.to_rank = rank_of(chars[1]);
            desc.to_file.is_some() && desc.to_rank.is_some()
        }
        3 => {
            desc.piece_kind = PieceKind::from_code(chars[0]);
            desc.to_file = file_of(chars[1]);
            desc.to_rank = rank_of(chars[2]);
            desc.piece_kind.is_some() && desc.to_file.is_some() && desc.to_rank.is_some()
        }
        4 => {
            desc.piece_kind = PieceKind::from_code(chars[0]);
            if !apply_disambiguator(chars[1], desc) {
                return false;
            }
            desc.to_file = file_of(chars[2]);
            desc.to_rank = rank_of(chars[3]);
            desc.piece_kind.is_some() && desc.to_file.is_some() && desc.to_rank.is_some()
        }
        5 => {
            desc.piece_kind = PieceKind::from_code(chars[0]);
            desc.from_file = file_of(chars[1]);
            desc.from_rank = rank_of(chars[2]);
            desc.to_file = file_of(chars[3]);
            desc.to_rank = rank_of(chars[4]);
            desc.piece_kind.is_some()
                && desc.from_file.is_some()
                && desc.from_rank.is_some()
                && desc.to_file.is_some()
                && desc.to_rank.is_some()
        }
        _ => false,
    }
}

/// Classify a SAN capture's two halves: the moving-piece side and the
/// destination side.
fn classify_capture(left: &str, right: &str, desc: &mut MoveToken) -> bool {
    let left: Vec<char> = left.chars().filter(|&c| c != '-').collect();
    let right: Vec<char> = right.chars().filter(|&c| c != '-').collect();

    let left_ok = match left.len() {
        1 => {
            desc.piece_kind = Some(PieceKind::Pawn);
            desc.from_file = file_of(left[0]);
            desc.from_file.is_some()
        }
        2 => {
            desc.piece_kind = PieceKind::from_code(left[0]);
            let ok = apply_disambiguator(left[1], desc);
            desc.piece_kind.is_some() && ok
        }
        3 => {
            desc.piece_kind = PieceKind::from_code(left[0]);
            desc.from_file = file_of(left[1]);
            desc.from_rank = rank_of(left[2]);
            desc.piece_kind.is_some() && desc.from_file.is_some() && desc.from_rank.is_some()
        }
        _ => false,
    };
    if !left_ok {
        return false;
    }

    match right.len() {
        1 => {
            desc.to_file = file_of(right[0]);
            desc.to_file.is_some()
        }
        2 => {
            desc.to_file = file_of(right[0]);
            desc.to_rank = rank_of(right[1]);
            desc.to_file.is_some() && desc.to_rank.is_some()
        }
        _ => false,
    }
}

/// Apply a single-character disambiguator, which names either a source file
/// or a source rank depending on which alphabet it falls in.
fn apply_disambiguator(c: char, desc: &mut MoveToken) -> bool {
    if let Some(f) = file_of(c) {
        desc.from_file = Some(f);
        true
    } else if let Some(r) = rank_of(c) {
        desc.from_rank = Some(r);
        true
    } else {
        false
    }
}

/// Whether `chars` (already length-4) matches the UCI `<file><rank><file><rank>`
/// shape.
fn is_uci_shape(chars: &[char]) -> bool {
    file_of(chars[0]).is_some()
        && rank_of(chars[1]).is_some()
        && file_of(chars[2]).is_some()
        && rank_of(chars[3]).is_some()
}

/// Convert `'a'..='h'` to a 0-based file index.
fn file_of(c: char) -> Option<u8> {
    match c {
        'a'..='h' => Some(c as u8 - b'a'),
        _ => None,
    }
}

/// Convert `'1'..='8'` to a 0-based rank index.
fn rank_of(c: char) -> Option<u8> {
    match c {
        '1'..='8' => Some(c as u8 - b'1'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_knight_development() {
        let tok = MoveToken::parse("Nf3");
        assert_eq!(tok.piece_kind, Some(PieceKind::Knight));
        assert_eq!(tok.to_file, Some(5));
        assert_eq!(tok.to_rank, Some(2));
        assert!(!tok.invalid);
        assert!(!tok.capture);
    }

    #[test]
    fn parses_pawn_capture() {
        let tok = MoveToken::parse("exd5");
        assert_eq!(tok.piece_kind, Some(PieceKind::Pawn));
        assert_eq!(tok.from_file, Some(4));
        assert_eq!(tok.to_file, Some(3));
        assert_eq!(tok.to_rank, Some(4));
        assert!(tok.capture);
    }

    #[test]
    fn parses_queenside_castle_with_check() {
        let tok = MoveToken::parse("O-O-O+");
        assert!(tok.queenside_castle);
        assert!(!tok.kingside_castle);
        assert_eq!(tok.piece_kind, Some(PieceKind::King));
        assert!(tok.check);
    }

    #[test]
    fn parses_promotion_with_checkmate() {
        let tok = MoveToken::parse("e8=Q#");
        assert_eq!(tok.piece_kind, Some(PieceKind::Pawn));
        assert_eq!(tok.promotion, Some(PieceKind::Queen));
        assert_eq!(tok.to_file, Some(4));
        assert_eq!(tok.to_rank, Some(7));
        assert!(tok.checkmate);
    }

    #[test]
    fn parses_uci_pawn_push() {
        let tok = MoveToken::parse("e2e4");
        assert_eq!(tok.piece_kind, Some(PieceKind::Pawn));
        assert_eq!(tok.from_file, Some(4));
        assert_eq!(tok.from_rank, Some(1));
        assert_eq!(tok.to_file, Some(4));
        assert_eq!(tok.to_rank, Some(3));
    }

    #[test]
    fn parses_null_moves() {
        assert!(MoveToken::parse("0000").null);
        assert!(MoveToken::parse("--").null);
        assert!(MoveToken::parse("pass").null);
    }

    #[test]
    fn parses_disambiguated_rook_move() {
        let tok = MoveToken::parse("Rdf8");
        assert_eq!(tok.piece_kind, Some(PieceKind::Rook));
        assert_eq!(tok.from_file, Some(3));
        assert_eq!(tok.to_file, Some(5));
        assert_eq!(tok.to_rank, Some(7));
    }

    #[test]
    fn rejects_garbage() {
        assert!(MoveToken::parse("???garbage???").invalid);
    }

    #[test]
    fn strips_uci_style_promotion() {
        let tok = MoveToken::parse("a7a8q");
        assert_eq!(tok.promotion, Some(PieceKind::Queen));
        assert_eq!(tok.from_file, Some(0));
        assert_eq!(tok.from_rank, Some(6));
        assert_eq!(tok.to_file, Some(0));
        assert_eq!(tok.to_rank, Some(7));
    }
}
