use crate::catalog::{Album, Artist, Catalog, Credit};
use serde_json::{Map, Value};
use tracing::debug;

const ROLES: [&str; 6] = ["piano", "bass", "drums", "saxophone", "guitar", "composer"];
const SERIES: [&str; 3] = ["ECM", "ECM New Series", "JAPO"];

#[derive(Debug, Clone)]
pub struct SynthParams {
    pub albums: usize,
    pub artists: usize,
    pub first_year: i32,
    pub last_year: i32,
    /// Share of albums generated without a release year.
    pub unknown_rate: f32,
    pub seed: u64,
}

impl Default for SynthParams {
    fn default() -> Self {
        Self {
            albums: 1_500,
            artists: 300,
            first_year: 1969,
            last_year: 2024,
            unknown_rate: 0.03,
            seed: 1064,
        }
    }
}

/// Builds a reproducible fake catalog: the same params always give the same
/// albums, years and credits.
pub fn generate(params: &SynthParams) -> Catalog {
    let mut rng = fastrand::Rng::with_seed(params.seed);
    let (first, last) = if params.first_year <= params.last_year {
        (params.first_year, params.last_year)
    } else {
        (params.last_year, params.first_year)
    };
    let artist_count = params.artists.max(1);

    let artists: Vec<Artist> = (0..artist_count)
        .map(|i| Artist {
            id: format!("artist-{}", i + 1),
            name: format!("Artist {}", i + 1),
            extra: Map::new(),
        })
        .collect();

    let mut albums = Vec::with_capacity(params.albums);
    let mut credits = Vec::new();

    for n in 0..params.albums {
        let number = 1001 + n;
        let id = format!("ecm-{}", number);
        let leader = rng.usize(..artist_count);

        let year = if rng.f32() < params.unknown_rate {
            None
        } else {
            Some(rng.i32(first..=last))
        };

        let mut extra = Map::new();
        extra.insert(
            "localThumb".to_string(),
            Value::String(format!("/thumbs/{}.webp", id)),
        );

        albums.push(Album {
            id: id.clone(),
            catalog_number: format!("ECM {}", number),
            series: Some(SERIES[rng.usize(..SERIES.len())].to_string()),
            artist: artists[leader].name.clone(),
            title: format!("Session {}", number),
            year,
            extra,
        });

        credits.push(Credit {
            album_id: id.clone(),
            artist_id: artists[leader].id.clone(),
            role: Some("leader".to_string()),
        });
        for _ in 0..rng.usize(0..3) {
            let sideman = rng.usize(..artist_count);
            credits.push(Credit {
                album_id: id.clone(),
                artist_id: artists[sideman].id.clone(),
                role: Some(ROLES[rng.usize(..ROLES.len())].to_string()),
            });
        }
    }

    debug!(
        "Synthesized {} albums, {} artists, {} credits (seed {})",
        albums.len(),
        artists.len(),
        credits.len(),
        params.seed
    );

    Catalog {
        albums,
        credits,
        artists,
    }
}
