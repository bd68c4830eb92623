//! Immutable board snapshots.

use arbiter_core::{Alliance, PieceKind, Square};
use thiserror::Error;

use crate::mov::Move;
use crate::movegen;
use crate::piece::Piece;
use crate::player::Player;

/// Errors that can occur when deriving a board from a layout.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("no {0} king on the board")]
    MissingKing(Alliance),

    #[error("more than one {0} king on the board")]
    TooManyKings(Alliance),
}

/// One of the 64 board squares: empty or occupied by a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Occupied(Piece),
}

impl Tile {
    #[inline]
    pub const fn is_occupied(&self) -> bool {
        matches!(self, Tile::Occupied(_))
    }

    /// Returns the occupant, or `None` for an empty tile. There is no
    /// panicking accessor; absence is an ordinary value.
    #[inline]
    pub const fn piece(&self) -> Option<&Piece> {
        match self {
            Tile::Empty => None,
            Tile::Occupied(piece) => Some(piece),
        }
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tile::Empty => write!(f, "-"),
            Tile::Occupied(piece) => write!(f, "{}", piece),
        }
    }
}

/// A read-only view of a tile array mid-construction.
///
/// Move generation runs against this view before the final [`Board`] value
/// is assembled, so no partially built board is ever observed by its own
/// derived computations.
pub(crate) struct Layout<'a> {
    tiles: &'a [Tile; 64],
    en_passant_pawn: Option<&'a Piece>,
}

impl<'a> Layout<'a> {
    pub(crate) fn new(tiles: &'a [Tile; 64], en_passant_pawn: Option<&'a Piece>) -> Self {
        Layout {
            tiles,
            en_passant_pawn,
        }
    }

    #[inline]
    pub(crate) fn tile(&self, square: Square) -> &'a Tile {
        &self.tiles[square.index() as usize]
    }

    /// The pawn eligible for en-passant capture, if the last move was a jump.
    #[inline]
    pub(crate) fn en_passant_pawn(&self) -> Option<&'a Piece> {
        self.en_passant_pawn
    }
}

/// An immutable board snapshot.
///
/// Holds the 64 tiles, the derived active-piece collections and players for
/// both sides, the pawn eligible for en-passant capture (if any), and the
/// side to move. Fully determined by the inputs given to its builder;
/// executing a move never alters the board it came from.
#[derive(Debug, Clone)]
pub struct Board {
    tiles: [Tile; 64],
    white_pieces: Vec<Piece>,
    black_pieces: Vec<Piece>,
    white_player: Player,
    black_player: Player,
    en_passant_pawn: Option<Piece>,
    to_move: Alliance,
}

impl Board {
    /// Returns the board for the standard starting position, White to move.
    pub fn standard() -> Board {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let mut builder = BoardBuilder::new();
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            let black_home = Square::from_index(file as u8).expect("back-rank index is on the board");
            let white_home =
                Square::from_index(56 + file as u8).expect("back-rank index is on the board");
            let black_pawn =
                Square::from_index(8 + file as u8).expect("pawn-rank index is on the board");
            let white_pawn =
                Square::from_index(48 + file as u8).expect("pawn-rank index is on the board");
            builder.place(Piece::new(kind, black_home, Alliance::Black));
            builder.place(Piece::new(PieceKind::Pawn, black_pawn, Alliance::Black));
            builder.place(Piece::new(kind, white_home, Alliance::White));
            builder.place(Piece::new(PieceKind::Pawn, white_pawn, Alliance::White));
        }
        builder.set_mover(Alliance::White);
        builder.build().expect("standard layout has one king per side")
    }

    /// Returns the tile at the given square.
    #[inline]
    pub fn tile(&self, square: Square) -> &Tile {
        &self.tiles[square.index() as usize]
    }

    /// Returns the piece at the given square, if any.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.tile(square).piece()
    }

    pub fn white_pieces(&self) -> &[Piece] {
        &self.white_pieces
    }

    pub fn black_pieces(&self) -> &[Piece] {
        &self.black_pieces
    }

    /// Returns the active pieces of the given alliance.
    pub fn pieces(&self, alliance: Alliance) -> &[Piece] {
        match alliance {
            Alliance::White => &self.white_pieces,
            Alliance::Black => &self.black_pieces,
        }
    }

    /// Returns the pawn that just advanced two squares, if any.
    pub fn en_passant_pawn(&self) -> Option<&Piece> {
        self.en_passant_pawn.as_ref()
    }

    /// Returns the side to move.
    #[inline]
    pub fn to_move(&self) -> Alliance {
        self.to_move
    }

    /// Returns the player of the given alliance.
    pub fn player(&self, alliance: Alliance) -> &Player {
        match alliance {
            Alliance::White => &self.white_player,
            Alliance::Black => &self.black_player,
        }
    }

    /// Returns the player whose turn it is.
    pub fn current_player(&self) -> &Player {
        self.player(self.to_move)
    }

    /// Returns the player waiting to move.
    pub fn opponent_player(&self) -> &Player {
        self.player(self.to_move.opposite())
    }

    /// Returns the union of both sides' legal moves, castles included.
    ///
    /// Used for coordinate-pair lookup via [`Move::find`]; callers must
    /// still enforce turn ownership before acting on a match.
    pub fn all_legal_moves(&self) -> impl Iterator<Item = &Move> {
        self.white_player
            .legal_moves()
            .iter()
            .chain(self.black_player.legal_moves().iter())
    }

    pub(crate) fn layout(&self) -> Layout<'_> {
        Layout::new(&self.tiles, self.en_passant_pawn.as_ref())
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, tile) in self.tiles.iter().enumerate() {
            write!(f, "{:>3}", tile.to_string())?;
            if (index + 1) % 8 == 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Accumulates a square-to-piece layout, the next mover, and an optional
/// en-passant pawn; [`build`](BoardBuilder::build) is the sole construction
/// point for [`Board`].
#[derive(Debug)]
pub struct BoardBuilder {
    placements: [Option<Piece>; 64],
    to_move: Alliance,
    en_passant_pawn: Option<Piece>,
}

impl BoardBuilder {
    pub fn new() -> Self {
        BoardBuilder {
            placements: [None; 64],
            to_move: Alliance::White,
            en_passant_pawn: None,
        }
    }

    /// Places a piece on its own square. Placing another piece on the same
    /// square later overwrites the first; promotion relies on this.
    pub fn place(&mut self, piece: Piece) -> &mut Self {
        self.placements[piece.square().index() as usize] = Some(piece);
        self
    }

    /// Sets the side to move on the built board.
    pub fn set_mover(&mut self, alliance: Alliance) -> &mut Self {
        self.to_move = alliance;
        self
    }

    /// Records a pawn as the en-passant target for the built board.
    pub fn set_en_passant_pawn(&mut self, pawn: Piece) -> &mut Self {
        self.en_passant_pawn = Some(pawn);
        self
    }

    /// Derives the full board: tile array, active piece collections, each
    /// side's raw legal moves against the frozen tiles, and finally the two
    /// players (which add castles and compute check status).
    pub fn build(self) -> Result<Board, BoardError> {
        let mut tiles = [Tile::Empty; 64];
        for piece in self.placements.into_iter().flatten() {
            tiles[piece.square().index() as usize] = Tile::Occupied(piece);
        }

        let white_pieces = active_pieces(&tiles, Alliance::White);
        let black_pieces = active_pieces(&tiles, Alliance::Black);

        let layout = Layout::new(&tiles, self.en_passant_pawn.as_ref());
        let white_moves = raw_legal_moves(&white_pieces, &layout);
        let black_moves = raw_legal_moves(&black_pieces, &layout);

        let white_player = Player::build(
            Alliance::White,
            &layout,
            &white_pieces,
            white_moves.clone(),
            &black_moves,
        )?;
        let black_player = Player::build(
            Alliance::Black,
            &layout,
            &black_pieces,
            black_moves,
            &white_moves,
        )?;

        Ok(Board {
            tiles,
            white_pieces,
            black_pieces,
            white_player,
            black_player,
            en_passant_pawn: self.en_passant_pawn,
            to_move: self.to_move,
        })
    }
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn active_pieces(tiles: &[Tile; 64], alliance: Alliance) -> Vec<Piece> {
    tiles
        .iter()
        .filter_map(Tile::piece)
        .filter(|piece| piece.alliance() == alliance)
        .copied()
        .collect()
}

fn raw_legal_moves(pieces: &[Piece], layout: &Layout<'_>) -> Vec<Move> {
    pieces
        .iter()
        .flat_map(|piece| movegen::piece_moves(piece, layout))
        .collect()
}
