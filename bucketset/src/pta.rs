//! Point arrays
//!
//! [`Pta`] is an ordered list of 2D points with single precision
//! coordinates, typically pixel locations. Besides joining and sorting, it
//! wraps the set operations of both engines for point data.
//!
//! Both set engines treat a point as the pixel it rounds to. Points within
//! the same pixel are one value, and whichever comes first is the one kept,
//! with its original coordinates. The engines give the same results for
//! points within ordinary image sizes, so each can check the other.

use std::ops::{Bound, RangeBounds};

use serde::{Deserialize, Serialize};

use crate::err::{Error, Operation};
use crate::key::{HashKey, SetKey};
use crate::lookup::HashIndex;
use crate::ops::Dedup;
use crate::{tree, HashSetBuilder};

/// One 2D point
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize, bytemuck::Pod, bytemuck::Zeroable,
)]
#[repr(C)]
#[allow(clippy::exhaustive_structs)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f32,
    /// Vertical coordinate
    pub y: f32,
}

impl Point {
    /// Make a point from its coordinates.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The integer pixel this point rounds to.
    ///
    /// Rounding is symmetric about zero: halfway cases round away from zero,
    /// so `-1.4` is pixel `-1`, not `0` as with adding one half and
    /// truncating. Out of range coordinates saturate, and NaN becomes zero.
    pub fn ipt(&self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }

    /// Coordinate selected by `by`
    pub fn coord(&self, by: SortBy) -> f32 {
        match by {
            SortBy::X => self.x,
            SortBy::Y => self.y,
        }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        // Pixel coordinates beyond 2^24 lose precision here.
        Self {
            x: x as f32,
            y: y as f32,
        }
    }
}

impl HashKey for Point {
    fn bucket_key(&self, nbuckets: u32) -> u64 {
        let (x, y) = self.ipt();
        keyhash::point_key_fast(nbuckets, x, y)
    }

    /// Points are equal when they round to the same pixel.
    fn exact_eq(&self, other: &Self) -> bool {
        self.ipt() == other.ipt()
    }
}

impl SetKey for Point {
    fn set_key(&self) -> u64 {
        let (x, y) = self.ipt();
        keyhash::point_key(x, y)
    }
}

/// Which coordinate to sort points by
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum SortBy {
    /// Horizontal coordinate
    X,
    /// Vertical coordinate
    Y,
}

/// Direction to sort points in
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum SortOrder {
    /// Smallest first
    Increasing,
    /// Largest first
    Decreasing,
}

/// An ordered array of points
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pta {
    /// The points, in order
    points: Vec<Point>,
}

impl Pta {
    /// Make an empty point array.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make an empty point array with room for `capacity` points.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Append a point.
    pub fn push(&mut self, x: f32, y: f32) {
        self.points.push(Point::new(x, y));
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if there are no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get the point at `index`.
    pub fn get(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    /// Get the pixel the point at `index` rounds to.
    pub fn get_ipt(&self, index: usize) -> Option<(i32, i32)> {
        self.get(index).map(|pt| pt.ipt())
    }

    /// The points, in order
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Coordinates as a flat `[x0, y0, x1, y1, ...]` slice
    pub fn coords(&self) -> &[f32] {
        bytemuck::cast_slice(&self.points)
    }

    /// Iterate over the points.
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Append the points of `other` that fall in `range`.
    ///
    /// Fails with [`Error::InvalidArgument`] if the range doesn't fit within
    /// `other`, leaving `self` unchanged.
    pub fn join<R: RangeBounds<usize>>(&mut self, other: &Pta, range: R) -> Result<(), Error> {
        let bounds: (Bound<usize>, Bound<usize>) =
            (range.start_bound().cloned(), range.end_bound().cloned());
        let slice = other
            .points
            .get(bounds)
            .ok_or_else(|| Error::invalid(Operation::Join, "range outside source points"))?;
        self.points.extend_from_slice(slice);
        Ok(())
    }

    /// Positions of the points in sorted order.
    ///
    /// The sort is stable, so points with equal coordinates keep their
    /// relative order in either direction. Coordinates are compared with
    /// [`f32::total_cmp()`].
    pub fn sort_index(&self, by: SortBy, order: SortOrder) -> Vec<usize> {
        let mut index: Vec<usize> = (0..self.points.len()).collect();
        index.sort_by(|&i, &j| {
            let a = self.points[i].coord(by);
            let b = self.points[j].coord(by);
            match order {
                SortOrder::Increasing => a.total_cmp(&b),
                SortOrder::Decreasing => b.total_cmp(&a),
            }
        });
        index
    }

    /// Rearrange points: the result's `i`-th point is `self[index[i]]`.
    ///
    /// Fails with [`Error::InvalidArgument`] if any position is out of range.
    pub fn sort_by_index(&self, index: &[usize]) -> Result<Pta, Error> {
        let points = index
            .iter()
            .map(|&i| {
                self.get(i).ok_or_else(|| {
                    Error::invalid(Operation::SortByIndex, "sort index outside point array")
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Pta { points })
    }

    /// Sort the points, returning the sorted copy and the sort index.
    pub fn sort(&self, by: SortBy, order: SortOrder) -> (Pta, Vec<usize>) {
        let index = self.sort_index(by, order);
        let points = index.iter().map(|&i| self.points[i]).collect();
        (Pta { points }, index)
    }

    /// Index the points for repeated lookups.
    ///
    /// [`HashIndex::find()`] then gives the position of the first point
    /// that rounds to the same pixel as a candidate.
    pub fn hash_index(&self) -> Result<HashIndex<'_, Point>, Error> {
        HashIndex::new(&self.points)
    }

    /// Remove points that round to an already seen pixel, keeping first
    /// occurrences in order.
    ///
    /// The returned [`Dedup`] can answer membership queries.
    pub fn remove_dups_by_hash(&self) -> Result<Dedup<Point>, Error> {
        HashSetBuilder::new().dedup(&self.points)
    }

    /// Distinct pixels of `self` followed by `other`.
    pub fn union_by_hash(&self, other: &Pta) -> Result<Pta, Error> {
        HashSetBuilder::new()
            .union(&self.points, &other.points)
            .map(Pta::from)
    }

    /// Pixels present in both arrays, each once, in the order of the
    /// smaller one.
    pub fn intersection_by_hash(&self, other: &Pta) -> Result<Pta, Error> {
        HashSetBuilder::new()
            .intersection(&self.points, &other.points)
            .map(Pta::from)
    }

    /// Remove points that round to an already seen pixel.
    pub fn remove_dups_by_tree(&self) -> Pta {
        tree::dedup_by_tree(&self.points).into()
    }

    /// Distinct pixels of `self` followed by `other`.
    pub fn union_by_tree(&self, other: &Pta) -> Pta {
        tree::union_by_tree(&self.points, &other.points).into()
    }

    /// Pixels present in both arrays, each once.
    pub fn intersection_by_tree(&self, other: &Pta) -> Pta {
        tree::intersection_by_tree(&self.points, &other.points).into()
    }
}

impl From<Vec<Point>> for Pta {
    fn from(points: Vec<Point>) -> Self {
        Self { points }
    }
}

impl From<Pta> for Vec<Point> {
    fn from(pta: Pta) -> Self {
        pta.points
    }
}

impl<P: Into<Point>> FromIterator<P> for Pta {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<P: Into<Point>> Extend<P> for Pta {
    fn extend<I: IntoIterator<Item = P>>(&mut self, iter: I) {
        self.points.extend(iter.into_iter().map(Into::into));
    }
}

impl<'a> IntoIterator for &'a Pta {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl IntoIterator for Pta {
    type Item = Point;
    type IntoIter = std::vec::IntoIter<Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}
