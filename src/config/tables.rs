use super::defaults;
use super::models::{LogLevel, ViewerConfig};
use serde::Deserialize;

/// Top-level table names recognized in `viewer.toml`.
pub(super) const TABLE_NAMES: [&str; 5] = ["source", "page", "typography", "navigation", "logging"];

#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    source: SourceConfig,
    #[serde(default)]
    page: PageConfig,
    #[serde(default)]
    typography: TypographyConfig,
    #[serde(default)]
    navigation: NavigationConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

impl From<ConfigTables> for ViewerConfig {
    fn from(tables: ConfigTables) -> Self {
        ViewerConfig {
            docs_root: tables.source.docs_root,
            manifest_file: tables.source.manifest_file,
            page_height_px: tables.page.height_px,
            page_padding_vertical_px: tables.page.padding_vertical_px,
            content_width_px: tables.page.content_width_px,
            font_size_px: tables.typography.font_size_px,
            line_height: tables.typography.line_height,
            block_spacing_px: tables.typography.block_spacing_px,
            image_height_px: tables.typography.image_height_px,
            header_height_px: tables.navigation.header_height_px,
            anchor_margin_px: tables.navigation.anchor_margin_px,
            fragment_key: tables.navigation.fragment_key,
            log_level: tables.logging.log_level,
        }
    }
}

impl From<&ViewerConfig> for ConfigTables {
    fn from(config: &ViewerConfig) -> Self {
        ConfigTables {
            source: SourceConfig {
                docs_root: config.docs_root.clone(),
                manifest_file: config.manifest_file.clone(),
            },
            page: PageConfig {
                height_px: config.page_height_px,
                padding_vertical_px: config.page_padding_vertical_px,
                content_width_px: config.content_width_px,
            },
            typography: TypographyConfig {
                font_size_px: config.font_size_px,
                line_height: config.line_height,
                block_spacing_px: config.block_spacing_px,
                image_height_px: config.image_height_px,
            },
            navigation: NavigationConfig {
                header_height_px: config.header_height_px,
                anchor_margin_px: config.anchor_margin_px,
                fragment_key: config.fragment_key.clone(),
            },
            logging: LoggingConfig {
                log_level: config.log_level,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct SourceConfig {
    #[serde(default = "defaults::default_docs_root")]
    docs_root: String,
    #[serde(default = "defaults::default_manifest_file")]
    manifest_file: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            docs_root: defaults::default_docs_root(),
            manifest_file: defaults::default_manifest_file(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct PageConfig {
    #[serde(default = "defaults::default_page_height_px")]
    height_px: f32,
    #[serde(default = "defaults::default_page_padding_vertical_px")]
    padding_vertical_px: f32,
    #[serde(default = "defaults::default_content_width_px")]
    content_width_px: f32,
}

impl Default for PageConfig {
    fn default() -> Self {
        PageConfig {
            height_px: defaults::default_page_height_px(),
            padding_vertical_px: defaults::default_page_padding_vertical_px(),
            content_width_px: defaults::default_content_width_px(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct TypographyConfig {
    #[serde(default = "defaults::default_font_size_px")]
    font_size_px: f32,
    #[serde(default = "defaults::default_line_height")]
    line_height: f32,
    #[serde(default = "defaults::default_block_spacing_px")]
    block_spacing_px: f32,
    #[serde(default = "defaults::default_image_height_px")]
    image_height_px: f32,
}

impl Default for TypographyConfig {
    fn default() -> Self {
        TypographyConfig {
            font_size_px: defaults::default_font_size_px(),
            line_height: defaults::default_line_height(),
            block_spacing_px: defaults::default_block_spacing_px(),
            image_height_px: defaults::default_image_height_px(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct NavigationConfig {
    #[serde(default = "defaults::default_header_height_px")]
    header_height_px: f32,
    #[serde(default = "defaults::default_anchor_margin_px")]
    anchor_margin_px: f32,
    #[serde(default = "defaults::default_fragment_key")]
    fragment_key: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        NavigationConfig {
            header_height_px: defaults::default_header_height_px(),
            anchor_margin_px: defaults::default_anchor_margin_px(),
            fragment_key: defaults::default_fragment_key(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}
