use crate::foundation::core::Canvas;

pub const UNSUPPORTED_TITLE: &str = "Unsupported Title";
pub const UNKNOWN_VIEWS: &str = "Unknown Views";
pub const UNKNOWN_DURATION: &str = "Unknown Mins";

/// Duration markers (compared case-insensitively after trimming) that mean a live broadcast.
pub const LIVE_MARKERS: [&str; 3] = ["", "live", "live now"];

/// Track metadata as delivered by the metadata source. Read-only for a render.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Track {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub thumbnail: String,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub view_count: Option<String>,
}

/// Right-hand label under the progress bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EndLabel {
    Live,
    Duration(String),
}

impl EndLabel {
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live)
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Live => "Live",
            Self::Duration(d) => d.as_str(),
        }
    }
}

pub fn classify_duration(duration: Option<&str>) -> EndLabel {
    let Some(raw) = duration else {
        return EndLabel::Live;
    };
    let trimmed = raw.trim();
    let lowered = trimmed.to_lowercase();
    if LIVE_MARKERS.contains(&lowered.as_str()) {
        return EndLabel::Live;
    }
    if !trimmed.chars().any(|c| c.is_ascii_digit()) {
        return EndLabel::Duration(UNKNOWN_DURATION.to_string());
    }
    EndLabel::Duration(trimmed.to_string())
}

/// Collapse runs of non-word characters into one space and title-case the result.
///
/// Word characters are Unicode alphanumerics; `_` is treated as a separator. A letter is
/// upper-cased when the preceding character is not a letter and lower-cased otherwise.
pub fn normalize_title(title: Option<&str>) -> String {
    let Some(raw) = title else {
        return UNSUPPORTED_TITLE.to_string();
    };

    let mut collapsed = String::with_capacity(raw.len());
    let mut in_gap = false;
    for c in raw.chars() {
        if c.is_alphanumeric() {
            if in_gap && !collapsed.is_empty() {
                collapsed.push(' ');
            }
            in_gap = false;
            collapsed.push(c);
        } else {
            in_gap = true;
        }
    }

    let mut out = String::with_capacity(collapsed.len());
    let mut prev_alpha = false;
    for c in collapsed.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }

    if out.is_empty() {
        return UNSUPPORTED_TITLE.to_string();
    }
    out
}

/// Everything the compositor needs to draw one track, derived once per invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderRequest {
    pub title: String,
    pub end_label: EndLabel,
    pub views: String,
    pub canvas: Canvas,
}

impl RenderRequest {
    pub fn from_track(track: &Track, canvas: Canvas) -> Self {
        let views = track
            .view_count
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(UNKNOWN_VIEWS)
            .to_string();
        Self {
            title: normalize_title(track.title.as_deref()),
            end_label: classify_duration(track.duration.as_deref()),
            views,
            canvas,
        }
    }

    /// Metadata line under the title, e.g. `"YouTube | 1.2M views"`.
    pub fn meta_line(&self, source_label: &str) -> String {
        format!("{source_label} | {}", self.views)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/track.rs"]
mod tests;
