//! Built-in campaign maps.
//!
//! Three maps with hand-authored paths, ordered by length and wave count.
//! Adapters that ship their own map data implement [`MapCatalog`] instead.

use station_defence_core::{MapCatalog, MapIndex, MapLayout, WorldPoint};

/// The stock three-map campaign.
pub struct CampaignCatalog {
    maps: Vec<MapLayout>,
}

impl CampaignCatalog {
    /// Builds the stock campaign.
    #[must_use]
    pub fn new() -> Self {
        Self {
            maps: vec![perimeter_road(), switchback_gorge(), reactor_spiral()],
        }
    }
}

impl Default for CampaignCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MapCatalog for CampaignCatalog {
    fn layout(&self, map: MapIndex) -> Option<&MapLayout> {
        self.maps.get((map.get() as usize).checked_sub(1)?)
    }

    fn map_count(&self) -> u32 {
        self.maps.len() as u32
    }
}

/// A single straight approach with one bend. Five waves.
fn perimeter_road() -> MapLayout {
    MapLayout::new(
        vec![
            WorldPoint::new(0.0, 240.0),
            WorldPoint::new(360.0, 240.0),
            WorldPoint::new(360.0, 480.0),
            WorldPoint::new(720.0, 480.0),
        ],
        vec![WorldPoint::new(0.0, 240.0)],
        5,
    )
}

/// A folded path that doubles back twice. Six waves.
fn switchback_gorge() -> MapLayout {
    MapLayout::new(
        vec![
            WorldPoint::new(0.0, 120.0),
            WorldPoint::new(560.0, 120.0),
            WorldPoint::new(560.0, 300.0),
            WorldPoint::new(120.0, 300.0),
            WorldPoint::new(120.0, 480.0),
            WorldPoint::new(720.0, 480.0),
        ],
        vec![WorldPoint::new(0.0, 120.0), WorldPoint::new(0.0, 160.0)],
        6,
    )
}

/// A long inward spiral around the station. Seven waves.
fn reactor_spiral() -> MapLayout {
    MapLayout::new(
        vec![
            WorldPoint::new(0.0, 40.0),
            WorldPoint::new(680.0, 40.0),
            WorldPoint::new(680.0, 520.0),
            WorldPoint::new(80.0, 520.0),
            WorldPoint::new(80.0, 160.0),
            WorldPoint::new(540.0, 160.0),
            WorldPoint::new(540.0, 400.0),
            WorldPoint::new(320.0, 400.0),
            WorldPoint::new(320.0, 280.0),
        ],
        vec![WorldPoint::new(0.0, 40.0), WorldPoint::new(0.0, 80.0)],
        7,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_campaign_runs_three_maps() {
        let catalog = CampaignCatalog::new();
        assert_eq!(catalog.map_count(), 3);
        assert!(catalog.layout(MapIndex::FIRST).is_some());
        assert!(catalog.layout(MapIndex::new(3)).is_some());
        assert!(catalog.layout(MapIndex::new(4)).is_none());
    }

    #[test]
    fn wave_counts_rise_with_the_map_index() {
        let catalog = CampaignCatalog::new();
        let waves: Vec<u32> = (1..=3)
            .filter_map(|index| catalog.layout(MapIndex::new(index)))
            .map(MapLayout::waves)
            .collect();
        assert_eq!(waves, vec![5, 6, 7]);
    }

    #[test]
    fn every_map_spawns_on_its_path_origin() {
        let catalog = CampaignCatalog::new();
        for index in 1..=3 {
            let layout = catalog.layout(MapIndex::new(index)).unwrap();
            assert!(!layout.spawn_points().is_empty());
            assert!(layout.total_length() > 0.0);
        }
    }
}
