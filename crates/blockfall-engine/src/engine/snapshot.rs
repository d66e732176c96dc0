use serde::Serialize;

use crate::core::{Board, Piece};

/// The observable state of a session at one point in time.
///
/// Renderers read one snapshot per frame; the `simulate` command writes one
/// as JSON. Board cells serialize as `null` or a color name, and the piece's
/// shape as a list of row strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub board: Board,
    pub piece: Piece,
    pub score: usize,
    pub level: usize,
    pub lines: usize,
    pub fall_interval_ms: u64,
    pub game_over: bool,
}

#[cfg(test)]
mod tests {
    use crate::{Command, Piece, Session, SessionConfig, ShapeKind};

    #[test]
    fn test_snapshot_json_layout() {
        let mut session = Session::from_board(
            crate::Board::EMPTY,
            Piece::spawn(ShapeKind::S),
            SessionConfig::default(),
        );
        session.apply(Command::MoveLeft).unwrap();

        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["board"].as_array().unwrap().len(), 20);
        assert_eq!(json["board"][0].as_array().unwrap().len(), 10);
        assert!(json["board"][19][0].is_null());
        assert_eq!(json["piece"]["kind"], "S");
        assert_eq!(json["piece"]["shape"], serde_json::json!(["##.", ".##"]));
        assert_eq!(json["piece"]["color"], "green");
        assert_eq!(json["piece"]["x"], 3);
        assert_eq!(json["piece"]["y"], 0);
        assert_eq!(json["score"], 0);
        assert_eq!(json["level"], 1);
        assert_eq!(json["fall_interval_ms"], 500);
        assert_eq!(json["game_over"], false);
    }
}
