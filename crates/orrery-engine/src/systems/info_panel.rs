// systems/info_panel.rs
//
// Info panel content for the selected planet, rendered as an HTML fragment
// the host drops into its panel element. The host only rewrites the DOM when
// `take_dirty` reports a change.

use super::orbit::OrbitalState;

pub const PLACEHOLDER_TEXT: &str = "Hover over or click on a planet to see information.";

#[derive(Debug, Clone, PartialEq)]
pub enum PanelContent {
    Placeholder,
    Body {
        name: String,
        /// CSS color of the title, `#rrggbb`.
        color: String,
        distance: f32,
        /// Relative orbital speed, two decimals.
        speed: String,
        description: String,
    },
}

#[derive(Debug, Clone)]
pub struct InfoPanel {
    content: PanelContent,
    dirty: bool,
}

impl InfoPanel {
    pub fn new() -> Self {
        Self {
            content: PanelContent::Placeholder,
            dirty: true,
        }
    }

    /// Show the given planet.
    pub fn present(&mut self, state: &OrbitalState) {
        self.set(PanelContent::Body {
            name: state.name.to_string(),
            color: state.color.css(),
            distance: state.orbital_distance,
            speed: orbital_speed_display(state.angular_speed),
            description: state.description.to_string(),
        });
    }

    /// Back to the placeholder prompt.
    pub fn clear(&mut self) {
        self.set(PanelContent::Placeholder);
    }

    pub fn content(&self) -> &PanelContent {
        &self.content
    }

    /// Whether the content changed since the last call. Resets the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub fn to_html(&self) -> String {
        match &self.content {
            PanelContent::Placeholder => {
                format!(r#"<p class="text-sm">{}</p>"#, PLACEHOLDER_TEXT)
            }
            PanelContent::Body { name, color, distance, speed, description } => {
                format!(
                    concat!(
                        r#"<h2 class="text-xl font-bold mb-2" style="color: {}">{}</h2>"#,
                        r#"<p class="text-sm mb-2">Distance from Sun: {} million km</p>"#,
                        r#"<p class="text-sm mb-2">Orbital Speed: {} (relative)</p>"#,
                        r#"<p class="text-sm">{}</p>"#,
                    ),
                    escape(color),
                    escape(name),
                    distance,
                    speed,
                    escape(description)
                )
            }
        }
    }

    fn set(&mut self, content: PanelContent) {
        if self.content != content {
            self.content = content;
            self.dirty = true;
        }
    }
}

impl Default for InfoPanel {
    fn default() -> Self {
        Self::new()
    }
}

/// Angular speed as shown in the panel: scaled by 100, two decimals.
pub fn orbital_speed_display(angular_speed: f64) -> String {
    format!("{:.2}", angular_speed * 100.0)
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::NodeId;
    use crate::assets::bodies::PLANETS;

    #[test]
    fn starts_with_placeholder() {
        let mut panel = InfoPanel::new();
        assert_eq!(
            panel.to_html(),
            r#"<p class="text-sm">Hover over or click on a planet to see information.</p>"#
        );
        assert!(panel.take_dirty());
        assert!(!panel.take_dirty());
    }

    #[test]
    fn presents_earth() {
        let mut panel = InfoPanel::new();
        panel.present(&OrbitalState::new(NodeId(1), &PLANETS[2], 0.0));
        let html = panel.to_html();
        assert!(html.starts_with(r#"<h2 class="text-xl font-bold mb-2" style="color: #3498db">Earth</h2>"#));
        assert!(html.contains("Distance from Sun: 62 million km"));
        assert!(html.contains("Orbital Speed: 1.00 (relative)"));
        assert!(html.contains("confirmed to host life."));
    }

    #[test]
    fn speed_display_rounds_to_two_decimals() {
        assert_eq!(orbital_speed_display(0.04), "4.00");
        assert_eq!(orbital_speed_display(0.0009), "0.09");
        assert_eq!(orbital_speed_display(0.0001), "0.01");
    }

    #[test]
    fn same_content_is_not_dirty() {
        let mut panel = InfoPanel::new();
        let mars = OrbitalState::new(NodeId(4), &PLANETS[3], 0.0);
        panel.present(&mars);
        panel.take_dirty();
        panel.present(&mars);
        assert!(!panel.take_dirty());
        panel.clear();
        assert!(panel.take_dirty());
        assert_eq!(panel.content(), &PanelContent::Placeholder);
    }

    #[test]
    fn markup_in_text_is_escaped() {
        assert_eq!(escape("<b>\"x\" & y</b>"), "&lt;b&gt;&quot;x&quot; &amp; y&lt;/b&gt;");
    }

    #[test]
    fn body_html_sections_in_order() {
        let mut panel = InfoPanel::new();
        panel.present(&OrbitalState::new(NodeId(1), &PLANETS[5], 0.0));
        let html = panel.to_html();
        let title = html.find("</h2>").unwrap();
        let distance = html.find("Distance from Sun").unwrap();
        let speed = html.find("Orbital Speed").unwrap();
        assert!(title < distance && distance < speed);
        assert_eq!(html.matches("<p ").count(), 3);
        assert!(html.ends_with("</p>"));
    }
}
