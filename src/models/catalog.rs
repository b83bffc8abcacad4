//! Mod catalog search results.
//!
//! The two catalog sources return hits with different field names. Each
//! source has its own variant, and [`CatalogHit::into_entry`] maps both into
//! the one [`CatalogEntry`] shape the rest of the crate uses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::deserialize_id;

/// Remote mod catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    #[default]
    Modrinth,
    #[serde(alias = "curse_forge")]
    CurseForge,
}

impl CatalogSource {
    /// Value sent as `source`.
    pub fn as_str(self) -> &'static str {
        match self {
            CatalogSource::Modrinth => "modrinth",
            CatalogSource::CurseForge => "curseforge",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CatalogSource::Modrinth => "Modrinth",
            CatalogSource::CurseForge => "CurseForge",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            CatalogSource::Modrinth => CatalogSource::CurseForge,
            CatalogSource::CurseForge => CatalogSource::Modrinth,
        }
    }
}

/// A Modrinth search hit.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModrinthHit {
    #[serde(alias = "project_id")]
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub icon_url: Option<String>,
}

/// CurseForge logo block.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurseForgeLogo {
    #[serde(default, alias = "thumbnailUrl")]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// A CurseForge search hit.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurseForgeHit {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default, alias = "downloadCount")]
    pub download_count: u64,
    #[serde(default)]
    pub logo: Option<CurseForgeLogo>,
}

/// One hit from either source.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogHit {
    Modrinth(ModrinthHit),
    CurseForge(CurseForgeHit),
}

impl CatalogHit {
    pub fn into_entry(self) -> CatalogEntry {
        match self {
            CatalogHit::Modrinth(hit) => CatalogEntry {
                id: hit.slug,
                title: hit.title,
                description: hit.description,
                icon_url: hit.icon_url,
                downloads: hit.downloads,
                source: CatalogSource::Modrinth,
            },
            CatalogHit::CurseForge(hit) => CatalogEntry {
                id: hit.id,
                title: hit.name,
                description: hit.summary,
                icon_url: hit
                    .logo
                    .and_then(|logo| logo.thumbnail_url.or(logo.url)),
                downloads: hit.download_count,
                source: CatalogSource::CurseForge,
            },
        }
    }
}

/// Source-independent catalog entry. `id` is what `install_mod` takes as
/// its `slug` argument.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon_url: Option<String>,
    pub downloads: u64,
    pub source: CatalogSource,
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    pub entries: Vec<CatalogEntry>,
    pub total: u64,
}

#[derive(Deserialize)]
struct ModrinthResponse {
    hits: Vec<ModrinthHit>,
    #[serde(default, alias = "totalHits")]
    total_hits: Option<u64>,
}

#[derive(Deserialize)]
struct CurseForgePagination {
    #[serde(default, alias = "totalCount")]
    total_count: Option<u64>,
}

#[derive(Deserialize)]
struct CurseForgeResponse {
    data: Vec<CurseForgeHit>,
    #[serde(default)]
    pagination: Option<CurseForgePagination>,
}

/// Decode a `search_mods` result for `source`.
///
/// Accepts the source's envelope (`{hits, total_hits}` for Modrinth,
/// `{data, pagination}` for CurseForge) or a bare array of hits. A missing
/// total falls back to the number of hits.
pub fn decode_search_response(
    source: CatalogSource,
    value: Value,
) -> Result<SearchPage, serde_json::Error> {
    let (hits, total) = match source {
        CatalogSource::Modrinth => {
            let (hits, total) = if value.is_array() {
                (serde_json::from_value::<Vec<ModrinthHit>>(value)?, None)
            } else {
                let resp: ModrinthResponse = serde_json::from_value(value)?;
                (resp.hits, resp.total_hits)
            };
            let hits: Vec<CatalogHit> = hits.into_iter().map(CatalogHit::Modrinth).collect();
            (hits, total)
        }
        CatalogSource::CurseForge => {
            let (hits, total) = if value.is_array() {
                (serde_json::from_value::<Vec<CurseForgeHit>>(value)?, None)
            } else {
                let resp: CurseForgeResponse = serde_json::from_value(value)?;
                (resp.data, resp.pagination.and_then(|p| p.total_count))
            };
            let hits: Vec<CatalogHit> = hits.into_iter().map(CatalogHit::CurseForge).collect();
            (hits, total)
        }
    };

    let entries: Vec<CatalogEntry> = hits.into_iter().map(CatalogHit::into_entry).collect();
    let total = total.unwrap_or(entries.len() as u64);
    Ok(SearchPage { entries, total })
}

/// Compact download count: `950`, `12.3K`, `4.1M`.
pub fn format_downloads(count: u64) -> String {
    match count {
        0..=999 => count.to_string(),
        1_000..=999_999 => format!("{:.1}K", count as f64 / 1_000.0),
        1_000_000..=999_999_999 => format!("{:.1}M", count as f64 / 1_000_000.0),
        _ => format!("{:.1}B", count as f64 / 1_000_000_000.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_modrinth_envelope() {
        let value = json!({
            "hits": [{
                "slug": "sodium",
                "title": "Sodium",
                "description": "Rendering engine",
                "downloads": 52000000,
                "icon_url": "https://cdn/sodium.png"
            }],
            "total_hits": 120
        });
        let page = decode_search_response(CatalogSource::Modrinth, value).unwrap();
        assert_eq!(page.total, 120);
        assert_eq!(page.entries[0].id, "sodium");
        assert_eq!(page.entries[0].source, CatalogSource::Modrinth);
        assert_eq!(page.entries[0].icon_url.as_deref(), Some("https://cdn/sodium.png"));
    }

    #[test]
    fn test_curseforge_envelope() {
        let value = json!({
            "data": [{
                "id": 238222,
                "name": "Just Enough Items",
                "summary": "View items and recipes",
                "downloadCount": 300,
                "logo": {"thumbnailUrl": "https://cdn/jei-thumb.png", "url": "https://cdn/jei.png"}
            }],
            "pagination": {"totalCount": 1}
        });
        let page = decode_search_response(CatalogSource::CurseForge, value).unwrap();
        let entry = &page.entries[0];
        assert_eq!(entry.id, "238222");
        assert_eq!(entry.title, "Just Enough Items");
        assert_eq!(entry.description, "View items and recipes");
        assert_eq!(entry.downloads, 300);
        assert_eq!(entry.icon_url.as_deref(), Some("https://cdn/jei-thumb.png"));
        assert_eq!(page.total, 1);
    }

    #[test]
    fn test_bare_array_uses_hit_count_as_total() {
        let value = json!([
            {"slug": "a", "title": "A"},
            {"slug": "b", "title": "B"}
        ]);
        let page = decode_search_response(CatalogSource::Modrinth, value).unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.entries[1].downloads, 0);
    }

    #[test]
    fn test_wrong_shape_is_error() {
        let value = json!({"unexpected": true});
        assert!(decode_search_response(CatalogSource::CurseForge, value).is_err());
    }

    #[test]
    fn test_format_downloads() {
        assert_eq!(format_downloads(950), "950");
        assert_eq!(format_downloads(12_300), "12.3K");
        assert_eq!(format_downloads(4_100_000), "4.1M");
        assert_eq!(format_downloads(2_000_000_000), "2.0B");
    }
}
