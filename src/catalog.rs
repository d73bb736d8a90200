use crate::error::{GridError, GridResult};
use crate::layout::Tile;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Year label of a section: a release year or the catch-all "Unknown".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YearKey {
    Year(i32),
    Unknown,
}

impl YearKey {
    /// A missing or zero year files the album under "Unknown".
    pub fn from_album_year(year: Option<i32>) -> Self {
        match year {
            Some(y) if y != 0 => YearKey::Year(y),
            _ => YearKey::Unknown,
        }
    }

    pub fn year(&self) -> Option<i32> {
        match self {
            YearKey::Year(y) => Some(*y),
            YearKey::Unknown => None,
        }
    }
}

impl From<i32> for YearKey {
    fn from(year: i32) -> Self {
        YearKey::from_album_year(Some(year))
    }
}

impl fmt::Display for YearKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearKey::Year(y) => write!(f, "{}", y),
            YearKey::Unknown => write!(f, "Unknown"),
        }
    }
}

impl Serialize for YearKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            YearKey::Year(y) => serializer.serialize_i32(*y),
            YearKey::Unknown => serializer.serialize_str("Unknown"),
        }
    }
}

impl<'de> Deserialize<'de> for YearKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawYear {
            Int(i64),
            Float(f64),
            Text(String),
            Null(()),
        }

        let key = match RawYear::deserialize(deserializer)? {
            RawYear::Int(n) => YearKey::from_album_year(i32::try_from(n).ok()),
            RawYear::Float(f) if f.fract() == 0.0 && f.abs() <= f64::from(i32::MAX) => {
                YearKey::from_album_year(Some(f as i32))
            }
            RawYear::Float(_) | RawYear::Null(()) => YearKey::Unknown,
            RawYear::Text(s) => YearKey::from_album_year(s.trim().parse().ok()),
        };
        Ok(key)
    }
}

/// Accepts any JSON scalar as an id. Absent or null ids become the empty
/// string so that malformed records still lay out.
fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) => s,
        None | Some(Value::Null) => String::new(),
        Some(other) => other.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default)]
    pub catalog_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,

    /// Fields the grid never reads (thumbnails, links, genres...), passed
    /// through untouched to whoever renders the cell.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Album {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn year_key(&self) -> YearKey {
        YearKey::from_album_year(self.year)
    }
}

impl Tile for Album {
    fn tile_id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credit {
    pub album_id: String,
    pub artist_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One section of the grid: a year label followed by its albums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearGroup<A> {
    pub year: YearKey,
    pub albums: Vec<A>,
}

impl<A> YearGroup<A> {
    pub fn new(year: impl Into<YearKey>, albums: Vec<A>) -> Self {
        Self {
            year: year.into(),
            albums,
        }
    }
}

impl YearGroup<&Album> {
    pub fn to_owned_albums(&self) -> YearGroup<Album> {
        YearGroup {
            year: self.year,
            albums: self.albums.iter().map(|a| (*a).clone()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub albums: Vec<Album>,
    pub credits: Vec<Credit>,
    pub artists: Vec<Artist>,
}

impl Catalog {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> GridResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> GridResult<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Rejects credits that point at no album or no artist.
    pub fn validate(&self) -> GridResult<()> {
        if let Some(c) = self
            .credits
            .iter()
            .find(|c| c.album_id.is_empty() || c.artist_id.is_empty())
        {
            return Err(GridError::Validation(format!(
                "credit with empty album or artist id: {:?}",
                c
            )));
        }
        Ok(())
    }

    /// Albums credited to `artist_id`, in catalog order.
    pub fn albums_for_artist(&self, artist_id: &str) -> Vec<&Album> {
        let album_ids: HashSet<&str> = self
            .credits
            .iter()
            .filter(|c| c.artist_id == artist_id)
            .map(|c| c.album_id.as_str())
            .collect();

        self.albums
            .iter()
            .filter(|a| album_ids.contains(a.id.as_str()))
            .collect()
    }

    /// Grid input for the whole catalog, or for one artist's discography.
    pub fn year_groups(&self, artist: Option<&str>) -> Vec<YearGroup<&Album>> {
        match artist {
            Some(id) => {
                let albums = self.albums_for_artist(id);
                debug!("Artist {} filters catalog to {} albums", id, albums.len());
                group_by_year(albums)
            }
            None => group_by_year(&self.albums),
        }
    }

    /// Album counts per known year, newest first. Ignores any artist filter.
    pub fn year_histogram(&self) -> Vec<(i32, usize)> {
        let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
        for album in &self.albums {
            if let YearKey::Year(y) = album.year_key() {
                *counts.entry(y).or_insert(0) += 1;
            }
        }
        counts.into_iter().rev().collect()
    }

    /// Artists with at least one credited album, most prolific first.
    /// Several roles on the same album count once.
    pub fn artists_by_album_count(&self) -> Vec<(&Artist, usize)> {
        let mut albums_per_artist: HashMap<&str, HashSet<&str>> = HashMap::new();
        for credit in &self.credits {
            albums_per_artist
                .entry(credit.artist_id.as_str())
                .or_default()
                .insert(credit.album_id.as_str());
        }

        let mut ranked: Vec<(&Artist, usize)> = self
            .artists
            .iter()
            .map(|a| {
                let count = albums_per_artist.get(a.id.as_str()).map_or(0, |s| s.len());
                (a, count)
            })
            .filter(|(_, count)| *count > 0)
            .collect();

        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

/// Groups albums into year sections: newest year first, "Unknown" last,
/// albums inside a year ordered by catalog number.
pub fn group_by_year<'a, I>(albums: I) -> Vec<YearGroup<&'a Album>>
where
    I: IntoIterator<Item = &'a Album>,
{
    let mut by_year: HashMap<YearKey, Vec<&'a Album>> = HashMap::new();
    for album in albums {
        by_year.entry(album.year_key()).or_default().push(album);
    }

    let mut groups: Vec<YearGroup<&'a Album>> = by_year
        .into_iter()
        .map(|(year, mut albums)| {
            albums.sort_by(|a, b| compare_catalog_numbers(&a.catalog_number, &b.catalog_number));
            YearGroup { year, albums }
        })
        .collect();

    groups.sort_by(|a, b| match (a.year, b.year) {
        (YearKey::Unknown, YearKey::Unknown) => std::cmp::Ordering::Equal,
        (YearKey::Unknown, _) => std::cmp::Ordering::Greater,
        (_, YearKey::Unknown) => std::cmp::Ordering::Less,
        (YearKey::Year(ya), YearKey::Year(yb)) => yb.cmp(&ya),
    });
    groups
}

fn compare_catalog_numbers(a: &str, b: &str) -> std::cmp::Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
