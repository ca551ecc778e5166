use crate::config::SortOrder;
use crate::parser::{DataPoint, Variant};
use crate::unit::TimeUnit;

/// The points of one variant in a chart, ordered along the x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Series<'a> {
    pub variant: Variant,
    pub points: Vec<&'a DataPoint>,
}

impl<'a> Series<'a> {
    pub fn xs(&self) -> Vec<u64> {
        self.points.iter().map(|point| point.x).collect()
    }

    /// Times of all points, converted to `unit`.
    pub fn ys(&self, unit: TimeUnit) -> Vec<f64> {
        self.points
            .iter()
            .map(|point| unit.from_nanos(point.time))
            .collect()
    }
}

/// Partitions `points` by variant and sorts each partition by `x`. Series are
/// returned in the order in which their variant first appears in `points`.
/// Points with the same `x` keep their relative order.
pub fn group_and_order(
    points: &[DataPoint],
    order: SortOrder,
) -> Vec<Series<'_>> {
    let mut series: Vec<Series<'_>> = Vec::new();
    for point in points {
        match series.iter_mut().find(|s| s.variant == point.variant) {
            Some(s) => s.points.push(point),
            None => series.push(Series {
                variant: point.variant,
                points: vec![point],
            }),
        }
    }

    // `sort_by` is stable
    for s in series.iter_mut() {
        match order {
            SortOrder::Ascending => s.points.sort_by(|a, b| a.x.cmp(&b.x)),
            SortOrder::Descending => s.points.sort_by(|a, b| b.x.cmp(&a.x)),
        }
    }
    series
}
