//! The fixed set of API references this tool can download.

/// How an artifact's freshness is tracked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VersionKind {
    /// No version id exists for this artifact; downloads always overwrite.
    None,
    /// Versioned by the game client build number.
    Build,
    /// Versioned by the wiki page's last-modified time, as a unix timestamp.
    Timestamp,
}

/// Where an artifact's content comes from.
#[derive(Clone, Copy, Debug)]
pub enum ArtifactSource {
    /// Raw files served from the FrameXML export of a game build.
    FrameXml {
        /// Server paths below the build directory, one output file each.
        paths: &'static [&'static str],
        /// Locale segment appended to each path, when the export is localized.
        language: Option<&'static str>,
        /// Read the build id from the artifact's own listing row instead of
        /// the page heading. Some files lag behind the live build.
        row_build: bool,
    },
    /// A wiki listing page rendered into a Lua function index.
    WikiListing {
        page: &'static str,
        file_name: &'static str,
    },
}

/// One downloadable artifact: a title for the UI, a versioning scheme, and a
/// content source.
#[derive(Clone, Copy, Debug)]
pub struct ArtifactSpec {
    pub title: &'static str,
    pub kind: VersionKind,
    pub source: ArtifactSource,
}

impl ArtifactSpec {
    /// Output file names, in download order.
    #[must_use]
    pub fn file_names(&self) -> Vec<&'static str> {
        match self.source {
            ArtifactSource::FrameXml { paths, .. } => paths
                .iter()
                .filter_map(|path| path.rsplit('/').next())
                .collect(),
            ArtifactSource::WikiListing { file_name, .. } => vec![file_name],
        }
    }
}

pub static CATALOG: [ArtifactSpec; 5] = [
    ArtifactSpec {
        title: "WoW API",
        kind: VersionKind::Timestamp,
        source: ArtifactSource::WikiListing {
            page: "World_of_Warcraft_API",
            file_name: "WowApi.lua",
        },
    },
    ArtifactSpec {
        title: "Widget API",
        kind: VersionKind::Timestamp,
        source: ArtifactSource::WikiListing {
            page: "Widget_API",
            file_name: "WidgetApi.lua",
        },
    },
    ArtifactSpec {
        title: "Lua API",
        kind: VersionKind::None,
        source: ArtifactSource::WikiListing {
            page: "Lua_functions",
            file_name: "LuaApi.lua",
        },
    },
    ArtifactSpec {
        title: "Global Strings",
        kind: VersionKind::Build,
        source: ArtifactSource::FrameXml {
            paths: &["/GlobalStrings.lua"],
            language: Some("enUS"),
            row_build: true,
        },
    },
    ArtifactSpec {
        title: "API Docs",
        kind: VersionKind::Build,
        source: ArtifactSource::FrameXml {
            paths: &[
                "/Blizzard_APIDocumentationGenerated/ChatInfoDocumentation.lua",
                "/Blizzard_APIDocumentationGenerated/ItemDocumentation.lua",
                "/Blizzard_APIDocumentationGenerated/UnitDocumentation.lua",
            ],
            language: None,
            row_build: false,
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_come_from_path_tails() {
        let docs = &CATALOG[4];
        assert_eq!(
            docs.file_names(),
            vec![
                "ChatInfoDocumentation.lua",
                "ItemDocumentation.lua",
                "UnitDocumentation.lua"
            ]
        );
    }

    #[test]
    fn wiki_artifacts_have_a_single_file() {
        let wow_api = &CATALOG[0];
        assert_eq!(wow_api.file_names(), vec!["WowApi.lua"]);
    }

    #[test]
    fn catalog_titles_are_unique() {
        let mut titles: Vec<_> = CATALOG.iter().map(|spec| spec.title).collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), CATALOG.len());
    }

    #[test]
    fn unversioned_artifacts_never_use_framexml() {
        for spec in &CATALOG {
            if spec.kind == VersionKind::None {
                assert!(matches!(spec.source, ArtifactSource::WikiListing { .. }));
            }
        }
    }
}
