use crate::r#move::Move;
use crate::square::Square;
use arrayvec::ArrayVec;

pub const MAX_MOVELIST_CAPACITY: usize = 256;

/// An ordered, fixed capacity list of moves
#[derive(Clone, Debug)]
pub struct MoveList(ArrayVec<Move, MAX_MOVELIST_CAPACITY>);

impl Default for MoveList {
    fn default() -> Self {
        MoveList(ArrayVec::new())
    }
}

impl MoveList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn push(&mut self, m: Move) {
        self.0.push(m)
    }
    pub fn get(&self, i: usize) -> Option<&Move> {
        self.0.get(i)
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.0.iter()
    }

    /// Looks a move up by its endpoints, which is how a caller turns two
    /// selected squares into one of the generated moves
    pub fn find(&self, origin: Square, target: Square) -> Option<&Move> {
        self.0
            .iter()
            .find(|m| m.origin() == origin && m.target() == target)
    }

    /// Target squares of the moves starting on `origin`
    pub fn targets_from(&self, origin: Square) -> impl Iterator<Item = Square> + '_ {
        self.0
            .iter()
            .filter(move |m| m.origin() == origin)
            .map(|m| m.target())
    }
}

impl std::fmt::Display for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        let mut s = String::new();
        for m in self.0.iter() {
            s.push_str(&format!("{} ", m))
        }
        write!(f, "{}", s.trim())
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Color::White;
    use crate::piece::Piece;
    use crate::piece::PieceType::Knight;

    #[test]
    fn finds_moves_by_endpoints() {
        let knight = Piece::new(White, Knight);
        let g1 = Square::parse("g1").unwrap();
        let mut list = MoveList::default();
        list.push(Move::new(g1, Square::parse("f3").unwrap(), knight, None));
        list.push(Move::new(g1, Square::parse("h3").unwrap(), knight, None));

        assert_eq!(list.len(), 2);
        assert!(list.find(g1, Square::parse("h3").unwrap()).is_some());
        assert!(list.find(g1, Square::parse("e2").unwrap()).is_none());
        assert_eq!(list.targets_from(g1).count(), 2);
        assert_eq!(list.to_string(), "g1f3 g1h3");
    }
}
