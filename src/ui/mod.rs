use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{Local, TimeZone};
use eframe::egui::{
    self, Align, Color32, CornerRadius, FontData, FontDefinitions, FontFamily, Frame, Layout,
    Margin, RichText, Stroke, Vec2, epaint::Shadow,
};
use log::{error, warn};
use tokio::runtime::{Builder, Runtime};
use tokio::sync::mpsc;

use crate::catalog::{ArtifactSpec, CATALOG, VersionKind};
use crate::check::{self, ArtifactStatus, LocalState};
use crate::env;
use crate::error::FetchError;
use crate::fetch::{self, TransferEvent};
use crate::scrape::{FXML_BASE, SiteClient, WIKI_BASE};
use crate::storage::Settings;

mod i18n;
use self::i18n::{I18n, Language};

const CJK_FONT_ID: &str = "system_cjk";

/// Common system fonts with Simplified Chinese coverage, tried in order.
const CJK_FONT_CANDIDATES: [&str; 7] = [
    "C:\\Windows\\Fonts\\msyh.ttc",
    "C:\\Windows\\Fonts\\simhei.ttf",
    "/System/Library/Fonts/PingFang.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/usr/share/fonts/wqy-microhei/wqy-microhei.ttc",
];

#[derive(Debug, Clone, Copy)]
struct ThemePalette {
    bg: Color32,
    panel: Color32,
    surface: Color32,
    surface_elev: Color32,
    border: Color32,
    border_strong: Color32,
    text_primary: Color32,
    text_muted: Color32,
    accent: Color32,
    accent_soft: Color32,
    accent_glow: Color32,
    info: Color32,
    success: Color32,
    danger: Color32,
}

impl ThemePalette {
    const fn dark() -> Self {
        Self {
            bg: Color32::from_rgb(16, 18, 24),
            panel: Color32::from_rgb(22, 25, 33),
            surface: Color32::from_rgb(29, 33, 43),
            surface_elev: Color32::from_rgb(36, 41, 53),
            border: Color32::from_rgb(52, 59, 75),
            border_strong: Color32::from_rgb(72, 81, 101),
            text_primary: Color32::from_rgb(230, 233, 240),
            text_muted: Color32::from_rgb(162, 172, 190),
            accent: Color32::from_rgb(226, 178, 62),
            accent_soft: Color32::from_rgb(128, 99, 36),
            accent_glow: Color32::from_rgb(246, 208, 110),
            info: Color32::from_rgb(118, 170, 245),
            success: Color32::from_rgb(116, 205, 129),
            danger: Color32::from_rgb(235, 113, 104),
        }
    }
}

fn tint(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_premultiplied(color.r(), color.g(), color.b(), alpha)
}

const LOCALE_LANGUAGE_CODES: [(&[&str], Language); 2] = [
    (&["zh", "zho", "chi"], Language::Chinese),
    (&["en", "eng"], Language::English),
];

fn parse_locale_token(token: &str) -> Option<Language> {
    let normalized = token
        .split(|c| matches!(c, '.' | '@'))
        .next()
        .unwrap_or(token)
        .replace('-', "_")
        .to_ascii_lowercase();
    let language_code = normalized.split('_').next().unwrap_or(&normalized);

    LOCALE_LANGUAGE_CODES.iter().find_map(|(codes, language)| {
        codes
            .iter()
            .any(|code| *code == language_code)
            .then_some(*language)
    })
}

fn detect_system_language() -> Language {
    for var in ["LC_ALL", "LANGUAGE", "LANG"] {
        if let Ok(value) = std::env::var(var) {
            for token in value.split(':') {
                if let Some(language) = parse_locale_token(token) {
                    return language;
                }
            }
        }
    }

    Language::English
}

/// Version label text for a stamped artifact: the raw build number, or a
/// local date for timestamp-versioned ones.
fn format_version(kind: VersionKind, stamp: Option<i64>) -> String {
    match (kind, stamp) {
        (_, None) => String::new(),
        (VersionKind::Timestamp, Some(epoch)) => Local
            .timestamp_opt(epoch, 0)
            .earliest()
            .map(|moment| moment.format("%Y/%-m/%-d %H:%M").to_string())
            .unwrap_or_else(|| epoch.to_string()),
        (_, Some(build)) => build.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{Language, VersionKind, format_version, parse_locale_token};

    #[test]
    fn parses_supported_languages_from_locale_tokens() {
        let samples = [
            ("en_US.UTF-8", Language::English),
            ("eng_US", Language::English),
            ("zh_CN.UTF-8", Language::Chinese),
            ("zh-Hans", Language::Chinese),
            ("zho_TW", Language::Chinese),
        ];

        for (token, expected) in samples {
            assert_eq!(parse_locale_token(token), Some(expected));
        }
    }

    #[test]
    fn ignores_unknown_language_tokens() {
        assert_eq!(parse_locale_token("uk_UA.UTF-8"), None);
    }

    #[test]
    fn formats_build_versions_as_plain_numbers() {
        assert_eq!(format_version(VersionKind::Build, Some(55123)), "55123");
        assert_eq!(format_version(VersionKind::Build, None), "");
    }

    #[test]
    fn formats_timestamp_versions_as_local_dates() {
        let formatted = format_version(VersionKind::Timestamp, Some(1_577_934_245));
        assert!(formatted.contains('/'));
        assert!(formatted.contains(':'));
    }
}

fn section_frame(colors: &ThemePalette) -> Frame {
    Frame::new()
        .fill(colors.surface)
        .stroke(Stroke::new(1.0, colors.border))
        .corner_radius(CornerRadius::same(12))
        .inner_margin(Margin::symmetric(14, 12))
}

fn badge_frame(color: Color32) -> Frame {
    Frame::new()
        .fill(tint(color, 32))
        .stroke(Stroke::new(1.0, color))
        .corner_radius(CornerRadius::same(128))
        .inner_margin(Margin::symmetric(10, 4))
}

fn primary_button(label: impl Into<egui::WidgetText>, colors: &ThemePalette) -> egui::Button<'_> {
    egui::Button::new(label)
        .fill(colors.accent_soft)
        .stroke(Stroke::new(1.0, colors.accent))
        .min_size(Vec2::new(126.0, 30.0))
}

fn secondary_button(label: impl Into<egui::WidgetText>, colors: &ThemePalette) -> egui::Button<'_> {
    egui::Button::new(label)
        .fill(colors.surface_elev)
        .stroke(Stroke::new(1.0, colors.border_strong))
        .min_size(Vec2::new(126.0, 30.0))
}

fn build_runtime() -> Arc<Runtime> {
    match Runtime::new() {
        Ok(rt) => Arc::new(rt),
        Err(err) => {
            warn!(
                "ui: failed to create multithreaded runtime ({}); trying single-threaded runtime",
                err
            );
            match Builder::new_current_thread().enable_all().build() {
                Ok(rt) => Arc::new(rt),
                Err(fallback_err) => {
                    error!(
                        "ui: failed to create any Tokio runtime ({}); terminating downloader",
                        fallback_err
                    );
                    std::process::exit(1);
                }
            }
        }
    }
}

fn setup_custom_fonts(ctx: &egui::Context) {
    let mut fonts = FontDefinitions::default();
    match load_system_cjk_font() {
        Some(bytes) => {
            fonts
                .font_data
                .insert(CJK_FONT_ID.to_owned(), Arc::new(FontData::from_owned(bytes)));
            // Appended as a fallback so Latin glyphs keep the default face.
            for family in [FontFamily::Proportional, FontFamily::Monospace] {
                fonts
                    .families
                    .entry(family)
                    .or_default()
                    .push(CJK_FONT_ID.to_owned());
            }
        }
        None => {
            warn!("ui: no CJK font found on this system; Chinese labels may not render");
        }
    }
    ctx.set_fonts(fonts);
}

fn load_system_cjk_font() -> Option<Vec<u8>> {
    CJK_FONT_CANDIDATES
        .iter()
        .find_map(|path| std::fs::read(path).ok())
}

fn apply_theme(ctx: &egui::Context, colors: &ThemePalette) {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = colors.bg;
    visuals.window_fill = colors.panel;
    visuals.override_text_color = Some(colors.text_primary);
    visuals.hyperlink_color = colors.accent_glow;
    visuals.widgets.noninteractive.corner_radius = CornerRadius::same(10);
    visuals.widgets.inactive.corner_radius = CornerRadius::same(10);
    visuals.widgets.hovered.corner_radius = CornerRadius::same(10);
    visuals.widgets.active.corner_radius = CornerRadius::same(10);
    visuals.widgets.noninteractive.bg_fill = colors.surface;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, colors.border);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, colors.text_muted);
    visuals.widgets.inactive.bg_fill = colors.surface_elev;
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, colors.border_strong);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, colors.text_muted);
    visuals.widgets.hovered.bg_fill = colors.accent_soft;
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.3, colors.accent);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, colors.text_primary);
    visuals.widgets.active.bg_fill = colors.accent;
    visuals.widgets.active.bg_stroke = Stroke::new(1.5, colors.accent_glow);
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, colors.text_primary);
    visuals.selection.bg_fill = colors.accent;
    visuals.selection.stroke = Stroke::new(1.0, colors.accent_glow);
    visuals.faint_bg_color = colors.surface;
    visuals.extreme_bg_color = colors.bg;
    visuals.window_corner_radius = CornerRadius::same(14);
    visuals.window_shadow = Shadow {
        offset: [0, 6],
        blur: 18,
        spread: 0,
        color: Color32::from_black_alpha(100),
    };
    visuals.popup_shadow = visuals.window_shadow;
    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = Vec2::new(10.0, 8.0);
    style.spacing.button_padding = Vec2::new(14.0, 8.0);
    ctx.set_style(style);
}

/// Presentation state of one artifact row.
#[derive(Debug, Clone, PartialEq)]
enum PaneStatus {
    Idle,
    Connecting,
    Downloading { progress: f32 },
    Completed,
    Cancelled,
    DownloadFailed,
    Checking,
    CheckFailed,
    UpToDate { version: Option<i64> },
    UpdateAvailable,
}

struct PaneState {
    spec: &'static ArtifactSpec,
    local: LocalState,
    status: PaneStatus,
    /// URL offered for a browser retry after a failure.
    link: Option<String>,
    checking: bool,
    /// Cancel flag of the in-flight download; `Some` marks the pane busy.
    cancel: Option<Arc<AtomicBool>>,
}

#[derive(Debug)]
enum PaneUpdate {
    Connected {
        index: usize,
    },
    Progress {
        index: usize,
        fraction: f32,
    },
    Completed {
        index: usize,
        local: LocalState,
    },
    Cancelled {
        index: usize,
        local: LocalState,
    },
    Failed {
        index: usize,
        url: String,
        local: LocalState,
    },
    CheckDone {
        index: usize,
        status: ArtifactStatus,
    },
}

pub struct DownloaderApp {
    runtime: Arc<Runtime>,
    site: SiteClient,
    panes: Vec<PaneState>,
    updates_rx: mpsc::UnboundedReceiver<PaneUpdate>,
    updates_tx: mpsc::UnboundedSender<PaneUpdate>,
    language: Language,
    output_dir: PathBuf,
    app_version: &'static str,
}

impl DownloaderApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let runtime = build_runtime();
        let settings = Settings::load();
        let language = settings
            .language
            .as_deref()
            .and_then(Language::from_code)
            .unwrap_or_else(detect_system_language);
        let output_dir = settings
            .output_dir
            .clone()
            .unwrap_or_else(env::default_output_dir);
        if let Err(err) = env::ensure_base_dirs() {
            warn!("ui: unable to prepare app directories: {err}");
        }
        if let Err(err) = std::fs::create_dir_all(&output_dir) {
            warn!(
                "ui: unable to create output directory {}: {err}",
                output_dir.display()
            );
        }
        setup_custom_fonts(&cc.egui_ctx);

        let (tx, rx) = mpsc::unbounded_channel();
        let panes = CATALOG
            .iter()
            .map(|spec| PaneState {
                spec,
                local: check::classify_local(spec, &output_dir),
                status: PaneStatus::Idle,
                link: None,
                checking: false,
                cancel: None,
            })
            .collect();

        Self {
            runtime,
            site: SiteClient::new(),
            panes,
            updates_rx: rx,
            updates_tx: tx,
            language,
            output_dir,
            app_version: env!("CARGO_PKG_VERSION"),
        }
    }

    fn colors(&self) -> ThemePalette {
        ThemePalette::dark()
    }

    fn i18n(&self) -> I18n {
        I18n::new(self.language)
    }

    fn persist_settings(&self) {
        let settings = Settings {
            language: Some(self.language.code().to_owned()),
            output_dir: Some(self.output_dir.clone()),
        };
        if let Err(err) = settings.save() {
            warn!("ui: unable to save settings: {err}");
        }
    }

    fn refresh_local_states(&mut self) {
        for pane in &mut self.panes {
            if pane.cancel.is_none() && !pane.checking {
                pane.local = check::classify_local(pane.spec, &self.output_dir);
                pane.status = PaneStatus::Idle;
                pane.link = None;
            }
        }
    }

    fn start_download(&mut self, index: usize) {
        if let Some(flag) = &self.panes[index].cancel {
            // Same button while running: ask the active download to stop.
            flag.store(true, Ordering::SeqCst);
            return;
        }

        let flag = Arc::new(AtomicBool::new(false));
        let pane = &mut self.panes[index];
        pane.cancel = Some(flag.clone());
        pane.status = PaneStatus::Connecting;
        pane.link = None;

        let spec = pane.spec;
        let dir = self.output_dir.clone();
        let site = self.site.clone();
        let tx = self.updates_tx.clone();
        self.runtime.spawn(async move {
            let events_tx = tx.clone();
            let result = fetch::download_artifact(spec, &dir, &site, &flag, move |event| {
                let update = match event {
                    TransferEvent::Connected => PaneUpdate::Connected { index },
                    TransferEvent::Progress(fraction) => PaneUpdate::Progress { index, fraction },
                };
                let _ = events_tx.send(update);
            })
            .await;

            let local = check::classify_local(spec, &dir);
            let update = match result {
                Ok(()) => PaneUpdate::Completed { index, local },
                Err(FetchError::Cancelled) => PaneUpdate::Cancelled { index, local },
                Err(err) => PaneUpdate::Failed {
                    index,
                    url: err.origin_url().unwrap_or_default().to_owned(),
                    local,
                },
            };
            let _ = tx.send(update);
        });
    }

    fn start_check(&mut self, index: usize) {
        let pane = &mut self.panes[index];
        if pane.checking || pane.cancel.is_some() {
            return;
        }
        pane.checking = true;
        pane.status = PaneStatus::Checking;
        pane.link = None;

        let spec = pane.spec;
        let dir = self.output_dir.clone();
        let site = self.site.clone();
        let tx = self.updates_tx.clone();
        self.runtime.spawn(async move {
            let status = check::classify(spec, &dir, &site).await;
            let _ = tx.send(PaneUpdate::CheckDone { index, status });
        });
    }

    fn sync_pane_updates(&mut self) {
        while let Ok(update) = self.updates_rx.try_recv() {
            match update {
                PaneUpdate::Connected { index } => {
                    let pane = &mut self.panes[index];
                    if pane.cancel.is_some() {
                        pane.status = PaneStatus::Downloading { progress: 0.0 };
                    }
                }
                PaneUpdate::Progress { index, fraction } => {
                    let pane = &mut self.panes[index];
                    if pane.cancel.is_some() {
                        pane.status = PaneStatus::Downloading { progress: fraction };
                    }
                }
                PaneUpdate::Completed { index, local } => {
                    let pane = &mut self.panes[index];
                    pane.cancel = None;
                    pane.local = local;
                    pane.status = PaneStatus::Completed;
                }
                PaneUpdate::Cancelled { index, local } => {
                    let pane = &mut self.panes[index];
                    pane.cancel = None;
                    pane.local = local;
                    pane.status = PaneStatus::Cancelled;
                }
                PaneUpdate::Failed { index, url, local } => {
                    let pane = &mut self.panes[index];
                    pane.cancel = None;
                    pane.local = local;
                    pane.status = PaneStatus::DownloadFailed;
                    pane.link = (!url.is_empty()).then_some(url);
                }
                PaneUpdate::CheckDone { index, status } => {
                    let pane = &mut self.panes[index];
                    pane.checking = false;
                    match status {
                        ArtifactStatus::Missing { names } => {
                            pane.local = LocalState::Missing { names };
                            pane.status = PaneStatus::UpdateAvailable;
                        }
                        ArtifactStatus::Inconsistent => {
                            pane.local = LocalState::Inconsistent;
                            pane.status = PaneStatus::UpdateAvailable;
                        }
                        ArtifactStatus::Current { version } => {
                            pane.status = PaneStatus::UpToDate { version };
                        }
                        ArtifactStatus::UpdateAvailable { .. } => {
                            pane.status = PaneStatus::UpdateAvailable;
                        }
                        ArtifactStatus::CheckFailed { url } => {
                            pane.status = PaneStatus::CheckFailed;
                            pane.link = (!url.is_empty()).then_some(url);
                        }
                    }
                }
            }
        }
    }

    fn render_pane(&mut self, ui: &mut egui::Ui, index: usize, colors: &ThemePalette, i18n: I18n) {
        let pane = &self.panes[index];
        let spec = pane.spec;
        let local = pane.local.clone();
        let status = pane.status.clone();
        let link = pane.link.clone();
        let checking = pane.checking;
        let busy = pane.cancel.is_some();

        let mut download_clicked = false;
        let mut check_clicked = false;

        section_frame(colors).show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(spec.title)
                        .color(colors.text_primary)
                        .strong()
                        .size(16.0),
                );
                match &local {
                    LocalState::Missing { names } => {
                        ui.colored_label(colors.danger, i18n.missing_files(names));
                    }
                    LocalState::Inconsistent => {
                        ui.colored_label(colors.danger, i18n.version_mismatch());
                    }
                    LocalState::Present { stamp } => {
                        if spec.kind != VersionKind::None {
                            let version = format_version(spec.kind, *stamp);
                            ui.label(
                                RichText::new(i18n.current_version(&version))
                                    .color(colors.text_muted),
                            );
                        }
                    }
                }

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    // The download button doubles as the cancel button, but
                    // only once the transfer is past the connection phase.
                    let connected = matches!(status, PaneStatus::Downloading { .. });
                    let (download_label, download_enabled) = if busy {
                        if connected {
                            (i18n.cancel_button(), true)
                        } else {
                            (i18n.download_button(), false)
                        }
                    } else {
                        (i18n.download_button(), !checking)
                    };
                    let download_btn = primary_button(
                        RichText::new(download_label)
                            .color(colors.text_primary)
                            .strong(),
                        colors,
                    );
                    if ui.add_enabled(download_enabled, download_btn).clicked() {
                        download_clicked = true;
                    }

                    if spec.kind != VersionKind::None {
                        let check_btn = secondary_button(i18n.check_button(), colors);
                        if ui.add_enabled(!busy && !checking, check_btn).clicked() {
                            check_clicked = true;
                        }
                    }
                });
            });

            let status_line = match &status {
                PaneStatus::Idle => None,
                PaneStatus::Connecting => Some((i18n.connecting().to_owned(), colors.info)),
                PaneStatus::Downloading { progress } => {
                    Some((i18n.downloading(*progress), colors.info))
                }
                PaneStatus::Completed => Some((i18n.download_complete().to_owned(), colors.success)),
                PaneStatus::Cancelled => Some((i18n.download_cancelled().to_owned(), colors.danger)),
                PaneStatus::DownloadFailed => {
                    Some((i18n.download_failed().to_owned(), colors.danger))
                }
                PaneStatus::Checking => Some((i18n.checking().to_owned(), colors.info)),
                PaneStatus::CheckFailed => Some((i18n.check_failed().to_owned(), colors.danger)),
                PaneStatus::UpToDate { version } => {
                    Some((i18n.up_to_date(*version), colors.success))
                }
                PaneStatus::UpdateAvailable => {
                    Some((i18n.update_available().to_owned(), colors.danger))
                }
            };
            if status_line.is_some() || link.is_some() {
                ui.horizontal(|ui| {
                    if checking {
                        ui.add(egui::Spinner::new());
                    }
                    if let Some((text, color)) = &status_line {
                        ui.colored_label(*color, text);
                    }
                    if let Some(url) = &link {
                        ui.hyperlink(url);
                    }
                });
            }

            if busy {
                let fraction = match &status {
                    PaneStatus::Downloading { progress } => *progress,
                    _ => 0.0,
                };
                ui.add(
                    egui::ProgressBar::new(fraction)
                        .fill(colors.accent)
                        .corner_radius(CornerRadius::same(8))
                        .desired_height(18.0)
                        .text(RichText::new(format!("{:.1}%", fraction * 100.0)).small()),
                );
            }
        });

        if download_clicked {
            self.start_download(index);
        }
        if check_clicked {
            self.start_check(index);
        }
    }
}

impl eframe::App for DownloaderApp {
    fn update(&mut self, ctx: &eframe::egui::Context, _frame: &mut eframe::Frame) {
        self.sync_pane_updates();
        let colors = self.colors();
        apply_theme(ctx, &colors);
        let i18n = self.i18n();

        let previous_language = self.language;
        let mut picked_dir: Option<PathBuf> = None;

        egui::TopBottomPanel::top("top_bar")
            .frame(
                Frame::new()
                    .fill(colors.panel)
                    .stroke(Stroke::new(1.0, colors.border))
                    .inner_margin(Margin::symmetric(16, 12)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.heading(RichText::new(i18n.heading()).color(colors.accent));
                        ui.label(RichText::new(i18n.tagline()).color(colors.text_muted));
                    });
                    ui.allocate_ui_with_layout(
                        ui.available_size_before_wrap(),
                        Layout::right_to_left(Align::Center),
                        |ui| {
                            ui.scope(|ui| {
                                ui.set_height(34.0);
                                egui::ComboBox::from_id_salt("language_combo")
                                    .selected_text(self.language.display_name())
                                    .show_ui(ui, |ui| {
                                        ui.selectable_value(
                                            &mut self.language,
                                            Language::English,
                                            Language::English.display_name(),
                                        );
                                        ui.selectable_value(
                                            &mut self.language,
                                            Language::Chinese,
                                            Language::Chinese.display_name(),
                                        );
                                    });
                            });
                            ui.add_space(6.0);
                            ui.label(RichText::new(i18n.language_label()).color(colors.text_muted));
                        },
                    );
                });
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    ui.label(RichText::new(i18n.output_dir_label()).color(colors.text_muted));
                    ui.label(
                        RichText::new(self.output_dir.display().to_string())
                            .color(colors.text_primary),
                    );
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.button(i18n.open_button()).clicked() {
                            if let Err(err) = open::that(&self.output_dir) {
                                warn!(
                                    "ui: unable to open {}: {err}",
                                    self.output_dir.display()
                                );
                            }
                        }
                        if ui.button(i18n.browse_button()).clicked() {
                            picked_dir = rfd::FileDialog::new()
                                .set_directory(&self.output_dir)
                                .pick_folder();
                        }
                    });
                });
            });

        egui::TopBottomPanel::bottom("bottom_bar")
            .frame(
                Frame::new()
                    .fill(colors.panel)
                    .stroke(Stroke::new(1.0, colors.border))
                    .inner_margin(Margin::symmetric(16, 10)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.hyperlink_to("townlong-yak.com", format!("{FXML_BASE}/live"));
                    ui.hyperlink_to("warcraft.wiki.gg", WIKI_BASE);
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        badge_frame(colors.border_strong).show(ui, |ui| {
                            ui.label(
                                RichText::new(format!("v{}", self.app_version))
                                    .color(colors.text_primary)
                                    .small(),
                            );
                        });
                    });
                });
            });

        egui::CentralPanel::default()
            .frame(
                Frame::new()
                    .fill(colors.bg)
                    .inner_margin(Margin::symmetric(14, 12)),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    for index in 0..self.panes.len() {
                        self.render_pane(ui, index, &colors, i18n);
                        ui.add_space(8.0);
                    }
                });
            });

        if self.language != previous_language {
            self.persist_settings();
        }
        if let Some(dir) = picked_dir {
            if dir != self.output_dir {
                self.output_dir = dir;
                if let Err(err) = std::fs::create_dir_all(&self.output_dir) {
                    warn!(
                        "ui: unable to create output directory {}: {err}",
                        self.output_dir.display()
                    );
                }
                self.persist_settings();
                self.refresh_local_states();
            }
        }

        let transferring = self
            .panes
            .iter()
            .any(|pane| pane.cancel.is_some() || pane.checking);
        if transferring {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
