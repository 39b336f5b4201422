use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::domain::Point;
use crate::error::DataError;

/// A contiguous run of points sharing one set number. `start..=end` indexes
/// into both the point slice and its `MomentumSeries`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetSegment {
    pub set_number: u32,
    pub start: usize,
    pub end: usize,
}

impl SetSegment {
    pub fn range(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSegment {
    pub set_number: u32,
    pub game_number: u32,
    pub start: usize,
    pub end: usize,
}

/// Groups points into sets. Set numbers must never go down.
pub fn segment_sets(points: &[Point]) -> Result<Vec<SetSegment>, DataError> {
    if let Some((index, pair)) = points
        .windows(2)
        .enumerate()
        .find(|(_, pair)| pair[1].set_no < pair[0].set_no)
    {
        return Err(DataError::SetOrder {
            index: index + 1,
            previous: pair[0].set_no,
            found: pair[1].set_no,
        });
    }

    let segments = points
        .iter()
        .enumerate()
        .chunk_by(|(_, p)| p.set_no)
        .into_iter()
        .filter_map(|(set_number, mut group)| {
            let (start, _) = group.next()?;
            let end = group.last().map_or(start, |(i, _)| i);
            Some(SetSegment {
                set_number,
                start,
                end,
            })
        })
        .collect();

    Ok(segments)
}

/// Groups points into games. Within a set, game numbers must never go down.
pub fn segment_games(points: &[Point]) -> Result<Vec<GameSegment>, DataError> {
    for (index, pair) in points.windows(2).enumerate() {
        let (prev, next) = (&pair[0], &pair[1]);
        if next.set_no < prev.set_no {
            return Err(DataError::SetOrder {
                index: index + 1,
                previous: prev.set_no,
                found: next.set_no,
            });
        }
        if next.set_no == prev.set_no && next.game_no < prev.game_no {
            return Err(DataError::GameOrder {
                index: index + 1,
                set_number: next.set_no,
                previous: prev.game_no,
                found: next.game_no,
            });
        }
    }

    let segments = points
        .iter()
        .enumerate()
        .chunk_by(|(_, p)| (p.set_no, p.game_no))
        .into_iter()
        .filter_map(|((set_number, game_number), mut group)| {
            let (start, _) = group.next()?;
            let end = group.last().map_or(start, |(i, _)| i);
            Some(GameSegment {
                set_number,
                game_number,
                start,
                end,
            })
        })
        .collect();

    Ok(segments)
}

/// The set segment holding point `index`, if any.
pub fn set_for_index(segments: &[SetSegment], index: usize) -> Option<&SetSegment> {
    segments.iter().find(|s| s.contains(index))
}
