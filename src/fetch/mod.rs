//! Streaming downloads for both artifact sources.
//!
//! A download owns its output files for the whole session: content is
//! buffered in memory, line by line with cancellation checked between lines,
//! and only written out once complete. Progress is reported per line against
//! the advertised content length, folded into one overall fraction for
//! multi-file artifacts.

use std::path::Path;
use std::sync::atomic::AtomicBool;

use futures_util::TryStreamExt;
use tokio::io::AsyncBufReadExt;
use tokio_util::io::StreamReader;

use crate::catalog::{ArtifactSource, ArtifactSpec, VersionKind};
use crate::check::remote_version;
use crate::error::FetchError;
use crate::render::render_entries;
use crate::scrape::SiteClient;
use crate::stamp::write_stamped;
use crate::util::{cancel_requested, progress_fraction};

/// Milestones a running download reports back to the UI.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransferEvent {
    /// The first connection is open and content is about to stream.
    Connected,
    /// Overall completion fraction in `[0, 1]`.
    Progress(f32),
}

/// Downloads every file of `spec` into `dir`.
///
/// Reports milestones through `events`; the callback must not block. The
/// cancel flag is polled once per processed line, so a cancel request can
/// trail by at most one line. Cancellation leaves files from earlier in the
/// session in place and the in-flight one untouched.
pub async fn download_artifact(
    spec: &ArtifactSpec,
    dir: &Path,
    site: &SiteClient,
    cancel: &AtomicBool,
    mut events: impl FnMut(TransferEvent) + Send,
) -> Result<(), FetchError> {
    if cancel_requested(cancel) {
        return Err(FetchError::Cancelled);
    }
    match spec.source {
        ArtifactSource::FrameXml {
            paths, language, ..
        } => download_framexml(spec, paths, language, dir, site, cancel, &mut events).await,
        ArtifactSource::WikiListing { page, file_name } => {
            download_wiki_listing(spec, page, file_name, dir, site, cancel, &mut events).await
        }
    }
}

async fn download_framexml<F>(
    spec: &ArtifactSpec,
    paths: &[&str],
    language: Option<&str>,
    dir: &Path,
    site: &SiteClient,
    cancel: &AtomicBool,
    events: &mut F,
) -> Result<(), FetchError>
where
    F: FnMut(TransferEvent) + Send,
{
    let build = site.live_builds().await?.file_build;
    let version = if spec.kind == VersionKind::None {
        None
    } else {
        Some(remote_version(spec, site).await?)
    };
    let referer = site.build_referer(build);
    let file_count = paths.len() as f32;

    for (index, path) in paths.iter().copied().enumerate() {
        let url = site.file_url(build, path, language);
        let response = site.open_download(&url, &referer).await?;
        if index == 0 {
            events(TransferEvent::Connected);
        }

        let total = response.content_length();
        let stream = response.bytes_stream().map_err(std::io::Error::other);
        let mut lines = StreamReader::new(stream).lines();
        let mut body = String::new();
        let mut received: u64 = 0;
        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|err| FetchError::connect(&url, &err))?
        {
            if cancel_requested(cancel) {
                return Err(FetchError::Cancelled);
            }
            body.push_str(&line);
            body.push('\n');
            received += line.len() as u64;
            let within_file = progress_fraction(received, total);
            events(TransferEvent::Progress(
                (index as f32 + within_file) / file_count,
            ));
        }

        let name = path.rsplit('/').next().unwrap_or(path);
        write_stamped(&dir.join(name), version, &body)
            .map_err(|err| FetchError::connect(&url, &err))?;
    }
    Ok(())
}

async fn download_wiki_listing<F>(
    spec: &ArtifactSpec,
    page: &str,
    file_name: &str,
    dir: &Path,
    site: &SiteClient,
    cancel: &AtomicBool,
    events: &mut F,
) -> Result<(), FetchError>
where
    F: FnMut(TransferEvent) + Send,
{
    let version = if spec.kind == VersionKind::None {
        None
    } else {
        Some(site.page_last_modified(page).await?)
    };
    let url = site.wiki_page_url(page);
    let html = site.fetch_page(&url).await?;
    events(TransferEvent::Connected);

    let blocks = render_entries(&html, site.wiki_base())
        .map_err(|reason| FetchError::parse(&url, reason))?;
    let entry_count = blocks.len() as f32;
    let mut body = String::new();
    for (index, block) in blocks.iter().enumerate() {
        if cancel_requested(cancel) {
            return Err(FetchError::Cancelled);
        }
        body.push_str(block);
        events(TransferEvent::Progress((index + 1) as f32 / entry_count));
    }

    write_stamped(&dir.join(file_name), version, &body)
        .map_err(|err| FetchError::connect(&url, &err))?;
    Ok(())
}
