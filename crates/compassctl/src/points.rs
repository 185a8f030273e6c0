//! Point store: the ordered collection of plotted results.

use compass_common::Point;
use uuid::Uuid;

/// Insertion-ordered store. Default display follows insertion order; the
/// summary sidebar walks it newest first.
#[derive(Debug, Default)]
pub struct PointStore {
    points: Vec<Point>,
}

impl PointStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn remove(&mut self, id: Uuid) -> Option<Point> {
        let index = self.points.iter().position(|p| p.id == id)?;
        Some(self.points.remove(index))
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Flip a point's uncertainty-display flag. Returns the new flag value,
    /// or None when no point carries the id.
    pub fn toggle_uncertainty(&mut self, id: Uuid) -> Option<bool> {
        let point = self.points.iter_mut().find(|p| p.id == id)?;
        point.show_uncertainty = !point.show_uncertainty;
        Some(point.show_uncertainty)
    }

    pub fn get(&self, id: Uuid) -> Option<&Point> {
        self.points.iter().find(|p| p.id == id)
    }

    /// Insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    /// Most recent first, for summary listings.
    pub fn recent(&self) -> impl Iterator<Item = &Point> {
        self.points.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass_common::{Mode, Verdict};

    fn sample(action: &str) -> Point {
        Point::from_verdict(
            action,
            "because",
            Mode::Duty,
            Verdict {
                x: 0.1,
                y: 0.2,
                x_range: None,
                y_range: Some((0.1, 0.3)),
            },
        )
    }

    #[test]
    fn test_push_keeps_insertion_order() {
        let mut store = PointStore::new();
        store.push(sample("first"));
        store.push(sample("second"));
        store.push(sample("third"));

        let actions: Vec<_> = store.iter().map(|p| p.action.as_str()).collect();
        assert_eq!(actions, ["first", "second", "third"]);
    }

    #[test]
    fn test_recent_walks_newest_first() {
        let mut store = PointStore::new();
        store.push(sample("old"));
        store.push(sample("new"));

        let actions: Vec<_> = store.recent().map(|p| p.action.as_str()).collect();
        assert_eq!(actions, ["new", "old"]);
    }

    #[test]
    fn test_remove_leaves_other_points() {
        let mut store = PointStore::new();
        let keep = sample("keep");
        let drop = sample("drop");
        let keep_id = keep.id;
        let drop_id = drop.id;
        store.push(keep);
        store.push(drop);

        let removed = store.remove(drop_id).unwrap();
        assert_eq!(removed.action, "drop");
        assert_eq!(store.len(), 1);
        assert!(store.get(keep_id).is_some());
        assert!(store.remove(drop_id).is_none());
    }

    #[test]
    fn test_toggle_twice_restores_flag_and_coordinates() {
        let mut store = PointStore::new();
        let point = sample("waver");
        let id = point.id;
        let (x, y) = (point.x, point.y);
        let initial = point.show_uncertainty;
        store.push(point);

        assert_eq!(store.toggle_uncertainty(id), Some(!initial));
        assert_eq!(store.toggle_uncertainty(id), Some(initial));

        let point = store.get(id).unwrap();
        assert_eq!(point.show_uncertainty, initial);
        assert_eq!((point.x, point.y), (x, y));
    }

    #[test]
    fn test_toggle_unknown_id_is_none() {
        let mut store = PointStore::new();
        store.push(sample("only"));
        assert_eq!(store.toggle_uncertainty(Uuid::new_v4()), None);
    }

    #[test]
    fn test_clear_empties_store() {
        let mut store = PointStore::new();
        store.push(sample("a"));
        store.push(sample("b"));
        store.clear();
        assert!(store.is_empty());
    }
}
