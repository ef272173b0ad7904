//! Crop anchor geometry for screenshots
//!
//! Anchors are percentage offsets into a screenshot marking where the
//! zoomed viewport is centered. They are generated once when a game is
//! ingested and stored with the record.

use crate::sequencer::{draw_index, RandomSource, SequencerResult};
use serde::{Deserialize, Serialize};

/// Number of crop anchors stored per game (one per screenshot)
pub const CROP_POSITION_COUNT: usize = 5;

/// Exclusive upper bound for a crop coordinate
pub const CROP_COORDINATE_RANGE: u8 = 100;

/// A percentage-based (x, y) anchor, each coordinate in [0, 99]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CropPosition {
    pub x: u8,
    pub y: u8,
}

impl CropPosition {
    fn random<S>(source: &mut S) -> SequencerResult<Self>
    where
        S: RandomSource + ?Sized,
    {
        let range = usize::from(CROP_COORDINATE_RANGE);
        let x = draw_index(source, range)? as u8;
        let y = draw_index(source, range)? as u8;
        Ok(Self { x, y })
    }
}

/// Generate `count` independent crop positions. Overlaps are allowed.
pub fn generate_crop_positions<S>(
    count: usize,
    source: &mut S,
) -> SequencerResult<Vec<CropPosition>>
where
    S: RandomSource + ?Sized,
{
    (0..count)
        .map(|_| CropPosition::random(&mut *source))
        .collect()
}

/// Generate the fixed set of anchors stored on a game record
pub fn generate_crop_anchors<S>(
    source: &mut S,
) -> SequencerResult<[CropPosition; CROP_POSITION_COUNT]>
where
    S: RandomSource + ?Sized,
{
    let mut anchors = [CropPosition::default(); CROP_POSITION_COUNT];
    for anchor in anchors.iter_mut() {
        *anchor = CropPosition::random(source)?;
    }
    Ok(anchors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencer::{RandomSourceError, RngSource, ScriptedSource};

    #[test]
    fn test_generate_five_positions_in_range() {
        let mut source = RngSource::seeded(5);
        let positions = generate_crop_positions(5, &mut source).unwrap();
        assert_eq!(positions.len(), 5);
        for pos in positions {
            assert!(pos.x < CROP_COORDINATE_RANGE);
            assert!(pos.y < CROP_COORDINATE_RANGE);
        }
    }

    #[test]
    fn test_zero_count() {
        let mut source = ScriptedSource::default();
        assert!(generate_crop_positions(0, &mut source).unwrap().is_empty());
    }

    #[test]
    fn test_coordinates_follow_draws() {
        let mut source = ScriptedSource::new([0.0, 0.999, 0.5, 0.255]);
        let positions = generate_crop_positions(2, &mut source).unwrap();
        assert_eq!(
            positions,
            vec![CropPosition { x: 0, y: 99 }, CropPosition { x: 50, y: 25 }]
        );
    }

    #[test]
    fn test_duplicates_allowed() {
        let mut source = ScriptedSource::new([0.1; 10]);
        let anchors = generate_crop_anchors(&mut source).unwrap();
        assert!(anchors.iter().all(|a| *a == CropPosition { x: 10, y: 10 }));
    }

    #[test]
    fn test_fault_propagates() {
        let mut source = ScriptedSource::new([0.2, 0.3, 0.4]);
        assert_eq!(
            generate_crop_anchors(&mut source),
            Err(RandomSourceError::Exhausted)
        );
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&CropPosition { x: 12, y: 80 }).unwrap();
        assert_eq!(json, r#"{"x":12,"y":80}"#);
    }
}
