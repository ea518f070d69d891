//! Active touch points and the math done over them.

use crate::vector::Vector2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Identifier reported for mouse and pen input, which only ever has one
/// contact.
pub const MOUSE_TOUCH_ID: i64 = 0;

/// One finger (or the mouse) at a point in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub id: i64,
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub const fn new(id: i64, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// A synthetic touch for mouse-like input.
    pub const fn mouse(x: f64, y: f64) -> Self {
        Self::new(MOUSE_TOUCH_ID, x, y)
    }

    pub fn position(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }
}

/// Ordered set of active touches with unique ids.
///
/// Insertion order is kept so that pointer updates replace entries in place.
/// Most gestures use one or two fingers, so the points live inline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TouchSet {
    points: SmallVec<[TouchPoint; 4]>,
}

impl TouchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from points, keeping the last entry when an id repeats.
    pub fn from_points(points: impl IntoIterator<Item = TouchPoint>) -> Self {
        let mut set = Self::new();
        for point in points {
            set.upsert(point);
        }
        set
    }

    pub fn single(point: TouchPoint) -> Self {
        let mut set = Self::new();
        set.points.push(point);
        set
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TouchPoint> {
        self.points.iter()
    }

    pub fn get(&self, id: i64) -> Option<&TouchPoint> {
        self.points.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.get(id).is_some()
    }

    /// Replace the entry with the same id, or append a new one.
    /// Returns `true` when the point was newly added.
    pub fn upsert(&mut self, point: TouchPoint) -> bool {
        match self.points.iter_mut().find(|p| p.id == point.id) {
            Some(existing) => {
                *existing = point;
                false
            }
            None => {
                self.points.push(point);
                true
            }
        }
    }

    /// Update an existing entry in place. Unknown ids are ignored.
    pub fn update(&mut self, point: TouchPoint) -> bool {
        match self.points.iter_mut().find(|p| p.id == point.id) {
            Some(existing) => {
                *existing = point;
                true
            }
            None => false,
        }
    }

    /// Remove the entry with `id`, returning it if it was present.
    pub fn remove(&mut self, id: i64) -> Option<TouchPoint> {
        let index = self.points.iter().position(|p| p.id == id)?;
        Some(self.points.remove(index))
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Arithmetic mean of all touch positions; zero for an empty set.
    pub fn centroid(&self) -> Vector2 {
        let mut sum = Vector2::ZERO;
        for point in &self.points {
            sum += point.position();
        }
        *sum.divide(self.points.len() as f64)
    }

    /// Sum of each touch's distance to `center` (the pinch spread).
    pub fn spread(&self, center: Vector2) -> f64 {
        self.points
            .iter()
            .map(|p| (center - p.position()).magnitude())
            .sum()
    }
}

impl FromIterator<TouchPoint> for TouchSet {
    fn from_iter<I: IntoIterator<Item = TouchPoint>>(iter: I) -> Self {
        Self::from_points(iter)
    }
}

impl<'a> IntoIterator for &'a TouchSet {
    type Item = &'a TouchPoint;
    type IntoIter = std::slice::Iter<'a, TouchPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
