//! UI strings in English and Simplified Chinese.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Chinese,
}

impl Language {
    pub const fn display_name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Chinese => "简体中文",
        }
    }

    /// Stable identifier stored in the settings file.
    pub const fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Chinese => "zh",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Language::English),
            "zh" => Some(Language::Chinese),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct I18n {
    language: Language,
}

impl I18n {
    #[must_use]
    pub const fn new(language: Language) -> Self {
        Self { language }
    }

    fn pick<'a>(self, english: &'a str, chinese: &'a str) -> &'a str {
        match self.language {
            Language::English => english,
            Language::Chinese => chinese,
        }
    }

    pub fn heading(self) -> &'static str {
        "WowAPI Downloader"
    }

    pub fn tagline(self) -> &'static str {
        self.pick(
            "Keeps local World of Warcraft API references in step with the game",
            "下载魔兽世界 API 参考文件，与游戏版本保持同步",
        )
    }

    pub fn download_button(self) -> &'static str {
        self.pick("Download", "下载")
    }

    pub fn cancel_button(self) -> &'static str {
        self.pick("Cancel download", "取消下载")
    }

    pub fn check_button(self) -> &'static str {
        self.pick("Check for updates", "检查更新")
    }

    pub fn connecting(self) -> &'static str {
        self.pick("Connecting...", "正在连接……")
    }

    pub fn downloading(self, fraction: f32) -> String {
        format!(
            "{} {:.1}%",
            self.pick("Downloading...", "下载中……"),
            fraction * 100.0
        )
    }

    pub fn download_complete(self) -> &'static str {
        self.pick("Download complete", "下载完成")
    }

    pub fn download_cancelled(self) -> &'static str {
        self.pick("Download cancelled", "已取消下载")
    }

    pub fn download_failed(self) -> &'static str {
        self.pick("Download failed! Unable to reach", "下载失败！无法连接到")
    }

    pub fn checking(self) -> &'static str {
        self.pick("Checking for updates...", "检查更新中……")
    }

    pub fn check_failed(self) -> &'static str {
        self.pick("Check failed! Unable to reach", "检查更新失败！无法连接到")
    }

    pub fn up_to_date(self, version: Option<i64>) -> String {
        let base = self.pick("Up to date", "已是最新版本");
        match version {
            Some(build) => format!("{base}  build: {build}"),
            None => base.to_owned(),
        }
    }

    pub fn update_available(self) -> &'static str {
        self.pick("A new version is available", "有新版本可下载")
    }

    pub fn current_version(self, version: &str) -> String {
        format!("{}{version}", self.pick("Current version: ", "当前版本："))
    }

    pub fn missing_files(self, names: &[String]) -> String {
        format!(
            "{}{}",
            self.pick("Missing files: ", "文件不存在！"),
            names.join(" ")
        )
    }

    pub fn version_mismatch(self) -> &'static str {
        self.pick("Versions differ between files", "版本不一致")
    }

    pub fn language_label(self) -> &'static str {
        self.pick("Language", "语言")
    }

    pub fn output_dir_label(self) -> &'static str {
        self.pick("Output folder", "输出目录")
    }

    pub fn browse_button(self) -> &'static str {
        self.pick("Browse...", "浏览……")
    }

    pub fn open_button(self) -> &'static str {
        self.pick("Open", "打开")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for language in [Language::English, Language::Chinese] {
            assert_eq!(Language::from_code(language.code()), Some(language));
        }
        assert_eq!(Language::from_code("uk"), None);
    }

    #[test]
    fn picks_strings_by_language() {
        assert_eq!(I18n::new(Language::English).download_button(), "Download");
        assert_eq!(I18n::new(Language::Chinese).download_button(), "下载");
    }

    #[test]
    fn formats_download_percentage() {
        let i18n = I18n::new(Language::Chinese);
        assert_eq!(i18n.downloading(0.123), "下载中…… 12.3%");
    }
}
