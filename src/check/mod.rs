//! Local/remote version comparison for one artifact.
//!
//! The local side is classified first and entirely offline. Only a complete,
//! internally consistent set of files is worth comparing against the remote
//! version, so missing or disagreeing files short-circuit before any request
//! goes out.

use std::path::Path;

use log::warn;

use crate::catalog::{ArtifactSource, ArtifactSpec, VersionKind};
use crate::error::FetchError;
use crate::scrape::SiteClient;
use crate::stamp::read_stamp;

/// What the output directory holds for an artifact, before asking the site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LocalState {
    /// One or more files are absent; `names` lists them in catalog order.
    Missing { names: Vec<String> },
    /// All files exist but their stamps disagree.
    Inconsistent,
    /// All files exist and agree on a stamp. `None` means unversioned files,
    /// either by artifact kind or because the stamps were stripped.
    Present { stamp: Option<i64> },
}

/// Outcome of a full update check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArtifactStatus {
    Missing { names: Vec<String> },
    Inconsistent,
    /// Up to date; carries the remote version when one was fetched.
    Current { version: Option<i64> },
    UpdateAvailable { version: i64 },
    /// The remote side could not be read; carries the URL that failed.
    CheckFailed { url: String },
}

#[must_use]
pub fn classify_local(spec: &ArtifactSpec, dir: &Path) -> LocalState {
    let names = spec.file_names();

    let missing: Vec<String> = names
        .iter()
        .filter(|name| !dir.join(name).is_file())
        .map(|name| (*name).to_owned())
        .collect();
    if !missing.is_empty() {
        return LocalState::Missing { names: missing };
    }

    let mut stamps = names.iter().map(|name| read_stamp(&dir.join(name)));
    let reference = stamps.next().flatten();
    for stamp in stamps {
        if stamp != reference {
            return LocalState::Inconsistent;
        }
    }
    LocalState::Present { stamp: reference }
}

/// Fetches the version id the remote side currently advertises.
pub async fn remote_version(
    spec: &ArtifactSpec,
    site: &SiteClient,
) -> Result<i64, FetchError> {
    match spec.source {
        ArtifactSource::FrameXml {
            paths,
            row_build: true,
            ..
        } => {
            let file_name = paths[0].rsplit('/').next().unwrap_or(paths[0]);
            site.file_row_build(file_name).await
        }
        ArtifactSource::FrameXml {
            row_build: false, ..
        } => Ok(site.live_builds().await?.file_build),
        ArtifactSource::WikiListing { page, .. } => site.page_last_modified(page).await,
    }
}

/// Runs a full update check: local classification, then the remote fetch when
/// the local side is comparable.
///
/// A local stamp ahead of the remote one still counts as current; the site
/// occasionally rolls its advertised build back.
pub async fn classify(spec: &ArtifactSpec, dir: &Path, site: &SiteClient) -> ArtifactStatus {
    match classify_local(spec, dir) {
        LocalState::Missing { names } => ArtifactStatus::Missing { names },
        LocalState::Inconsistent => ArtifactStatus::Inconsistent,
        LocalState::Present { stamp } => {
            if spec.kind == VersionKind::None {
                return ArtifactStatus::Current { version: None };
            }
            match remote_version(spec, site).await {
                Ok(remote) => match stamp {
                    Some(local) if local >= remote => ArtifactStatus::Current {
                        version: Some(remote),
                    },
                    _ => ArtifactStatus::UpdateAvailable { version: remote },
                },
                Err(err) => {
                    warn!("update check for {} failed: {err}", spec.title);
                    ArtifactStatus::CheckFailed {
                        url: err.origin_url().unwrap_or_default().to_owned(),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CATALOG;
    use crate::stamp::write_stamped;

    static API_DOCS: &ArtifactSpec = &CATALOG[4];
    static LUA_API: &ArtifactSpec = &CATALOG[2];
    static GLOBAL_STRINGS: &ArtifactSpec = &CATALOG[3];

    #[test]
    fn lists_every_absent_file() {
        let dir = tempfile::tempdir().unwrap();
        write_stamped(&dir.path().join("ItemDocumentation.lua"), Some(100), "x").unwrap();
        assert_eq!(
            classify_local(API_DOCS, dir.path()),
            LocalState::Missing {
                names: vec![
                    "ChatInfoDocumentation.lua".to_owned(),
                    "UnitDocumentation.lua".to_owned(),
                ],
            }
        );
    }

    #[test]
    fn disagreeing_stamps_are_inconsistent() {
        let dir = tempfile::tempdir().unwrap();
        write_stamped(&dir.path().join("ChatInfoDocumentation.lua"), Some(100), "x").unwrap();
        write_stamped(&dir.path().join("ItemDocumentation.lua"), Some(100), "x").unwrap();
        write_stamped(&dir.path().join("UnitDocumentation.lua"), Some(101), "x").unwrap();
        assert_eq!(classify_local(API_DOCS, dir.path()), LocalState::Inconsistent);
    }

    #[test]
    fn agreeing_stamps_are_present() {
        let dir = tempfile::tempdir().unwrap();
        for name in API_DOCS.file_names() {
            write_stamped(&dir.path().join(name), Some(55123), "x").unwrap();
        }
        assert_eq!(
            classify_local(API_DOCS, dir.path()),
            LocalState::Present { stamp: Some(55123) }
        );
    }

    #[test]
    fn stamped_next_to_unstamped_is_inconsistent() {
        let dir = tempfile::tempdir().unwrap();
        write_stamped(&dir.path().join("ChatInfoDocumentation.lua"), Some(100), "x").unwrap();
        write_stamped(&dir.path().join("ItemDocumentation.lua"), None, "x").unwrap();
        write_stamped(&dir.path().join("UnitDocumentation.lua"), Some(100), "x").unwrap();
        assert_eq!(classify_local(API_DOCS, dir.path()), LocalState::Inconsistent);
    }

    #[test]
    fn uniformly_unstamped_files_are_present_without_a_version() {
        let dir = tempfile::tempdir().unwrap();
        for name in API_DOCS.file_names() {
            write_stamped(&dir.path().join(name), None, "x").unwrap();
        }
        assert_eq!(
            classify_local(API_DOCS, dir.path()),
            LocalState::Present { stamp: None }
        );
    }

    #[test]
    fn single_file_artifact_reports_its_own_stamp() {
        let dir = tempfile::tempdir().unwrap();
        write_stamped(&dir.path().join("GlobalStrings.lua"), Some(55061), "x").unwrap();
        assert_eq!(
            classify_local(GLOBAL_STRINGS, dir.path()),
            LocalState::Present { stamp: Some(55061) }
        );
    }

    #[tokio::test]
    async fn unversioned_artifacts_skip_the_remote_side() {
        let dir = tempfile::tempdir().unwrap();
        write_stamped(&dir.path().join("LuaApi.lua"), None, "x").unwrap();
        // Port 9 never serves anything; a remote fetch would fail the check.
        let site = SiteClient::with_bases("http://127.0.0.1:9", "http://127.0.0.1:9");
        assert_eq!(
            classify(LUA_API, dir.path(), &site).await,
            ArtifactStatus::Current { version: None }
        );
    }
}
