use serde::Deserialize;

/// Flattened viewer configuration; built from the TOML tables in `tables.rs`.
#[derive(Debug, Clone, PartialEq, Deserialize, serde::Serialize)]
pub struct ViewerConfig {
    /// Directory or `http(s)://` base URL that holds the manifest and chapters.
    #[serde(default = "crate::config::defaults::default_docs_root")]
    pub docs_root: String,
    #[serde(default = "crate::config::defaults::default_manifest_file")]
    pub manifest_file: String,
    #[serde(default = "crate::config::defaults::default_page_height_px")]
    pub page_height_px: f32,
    /// Padding applied to both the top and the bottom of a paged container.
    #[serde(default = "crate::config::defaults::default_page_padding_vertical_px")]
    pub page_padding_vertical_px: f32,
    #[serde(default = "crate::config::defaults::default_content_width_px")]
    pub content_width_px: f32,
    #[serde(default = "crate::config::defaults::default_font_size_px")]
    pub font_size_px: f32,
    #[serde(default = "crate::config::defaults::default_line_height")]
    pub line_height: f32,
    #[serde(default = "crate::config::defaults::default_block_spacing_px")]
    pub block_spacing_px: f32,
    #[serde(default = "crate::config::defaults::default_image_height_px")]
    pub image_height_px: f32,
    #[serde(default = "crate::config::defaults::default_header_height_px")]
    pub header_height_px: f32,
    #[serde(default = "crate::config::defaults::default_anchor_margin_px")]
    pub anchor_margin_px: f32,
    #[serde(default = "crate::config::defaults::default_fragment_key")]
    pub fragment_key: String,
    #[serde(default = "crate::config::defaults::default_log_level")]
    pub log_level: LogLevel,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        ViewerConfig {
            docs_root: crate::config::defaults::default_docs_root(),
            manifest_file: crate::config::defaults::default_manifest_file(),
            page_height_px: crate::config::defaults::default_page_height_px(),
            page_padding_vertical_px: crate::config::defaults::default_page_padding_vertical_px(),
            content_width_px: crate::config::defaults::default_content_width_px(),
            font_size_px: crate::config::defaults::default_font_size_px(),
            line_height: crate::config::defaults::default_line_height(),
            block_spacing_px: crate::config::defaults::default_block_spacing_px(),
            image_height_px: crate::config::defaults::default_image_height_px(),
            header_height_px: crate::config::defaults::default_header_height_px(),
            anchor_margin_px: crate::config::defaults::default_anchor_margin_px(),
            fragment_key: crate::config::defaults::default_fragment_key(),
            log_level: crate::config::defaults::default_log_level(),
        }
    }
}

impl ViewerConfig {
    /// Height available to content inside one paged container.
    pub fn page_content_budget(&self) -> f32 {
        self.page_height_px - self.page_padding_vertical_px * 2.0
    }

    /// Vertical position of the scroll-spy anchor line, relative to the viewport.
    pub fn anchor_line_offset(&self) -> f32 {
        self.header_height_px + self.anchor_margin_px
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Default, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
