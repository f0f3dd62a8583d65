pub(crate) fn default_docs_root() -> String {
    "docs".to_string()
}

pub(crate) fn default_manifest_file() -> String {
    "doc_manifest.json".to_string()
}

/// A4 at 96 dpi.
pub(crate) fn default_page_height_px() -> f32 {
    1123.0
}

pub(crate) fn default_page_padding_vertical_px() -> f32 {
    76.0
}

pub(crate) fn default_content_width_px() -> f32 {
    642.0
}

pub(crate) fn default_font_size_px() -> f32 {
    16.0
}

pub(crate) fn default_line_height() -> f32 {
    1.5
}

pub(crate) fn default_block_spacing_px() -> f32 {
    16.0
}

pub(crate) fn default_image_height_px() -> f32 {
    320.0
}

pub(crate) fn default_header_height_px() -> f32 {
    64.0
}

pub(crate) fn default_anchor_margin_px() -> f32 {
    24.0
}

pub(crate) fn default_fragment_key() -> String {
    "chapter".to_string()
}

pub(crate) fn default_log_level() -> crate::config::LogLevel {
    crate::config::LogLevel::Info
}
