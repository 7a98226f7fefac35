use super::{Scene, UNTITLED_SCENE};

/// Token that opens every scene block in a breakdown completion.
pub const SCENE_DELIMITER: &str = "### Scene";
pub const DESCRIPTION_MARKER: &str = "**Description:**";
pub const STORYTELLING_MARKER: &str = "**Storytelling for Creative Images:**";

/// Horizontal rule the model tends to leave between scenes.
const RULE_TOKEN: &str = "---";

/// Scan mode for the lines after a block's title.
///
/// Only the storytelling marker moves the scan into `CapturingStorytelling`,
/// and nothing moves it back. Unmarked lines seen while `Scanning` are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureState {
    Scanning,
    CapturingStorytelling,
}

/// Recovers scenes from a free-text breakdown.
///
/// Text ahead of the first delimiter is preamble and never forms a scene, so
/// input without any delimiter yields no scenes. Never fails: every block with
/// at least one non-blank line becomes a scene, titled `Untitled Scene` when
/// its title line is empty.
pub fn parse_scenes(text: &str) -> Vec<Scene> {
    text.split(SCENE_DELIMITER)
        .skip(1)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .filter_map(parse_block)
        .collect()
}

fn parse_block(block: &str) -> Option<Scene> {
    let mut lines = block.lines().map(str::trim).filter(|line| !line.is_empty());

    let title = extract_title(lines.next()?);
    let title = if title.is_empty() {
        UNTITLED_SCENE.to_string()
    } else {
        title
    };

    let mut description = String::new();
    let mut storytelling = String::new();
    let mut state = CaptureState::Scanning;

    for line in lines {
        if let Some(rest) = line.strip_prefix(DESCRIPTION_MARKER) {
            description = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix(STORYTELLING_MARKER) {
            storytelling = rest.trim().to_string();
            state = CaptureState::CapturingStorytelling;
        } else if state == CaptureState::CapturingStorytelling {
            storytelling.push(' ');
            storytelling.push_str(line);
        }
    }

    let storytelling = storytelling.replace(RULE_TOKEN, "").trim().to_string();

    Some(Scene::new(title, description, storytelling))
}

fn extract_title(line: &str) -> String {
    match line.split_once(':') {
        Some((_, title)) => title.trim().to_string(),
        None => line.trim().to_string(),
    }
}
