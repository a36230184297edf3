use chatavel_core::Feature;

pub struct TableFormatter {
    id_width: usize,
    title_width: usize,
    icon_width: usize,
    description_width: usize,
}

impl TableFormatter {
    pub fn new(features: &[Feature]) -> Self {
        let title_width = features
            .iter()
            .map(|f| f.title().chars().count())
            .max()
            .unwrap_or(8)
            .clamp(5, 30); // Between "Title" header min and reasonable terminal width max

        Self {
            id_width: 7,
            title_width,
            icon_width: 14,
            description_width: 40,
        }
    }

    pub fn print_table(&self, features: &[Feature]) {
        for line in self.lines(features) {
            println!("{}", line);
        }
    }

    fn lines(&self, features: &[Feature]) -> Vec<String> {
        let mut lines = vec![self.top_border(), self.header_row(), self.separator()];
        lines.extend(features.iter().map(|f| self.row(f)));
        lines.push(self.bottom_border());
        lines
    }

    fn row(&self, feature: &Feature) -> String {
        format!(
            "│ {:<width_id$} │ {:<width_title$} │ {:<width_icon$} │ {:<width_desc$} │",
            truncate(feature.as_str(), self.id_width),
            truncate(feature.title(), self.title_width),
            truncate(feature.icon(), self.icon_width),
            truncate(feature.description(), self.description_width),
            width_id = self.id_width,
            width_title = self.title_width,
            width_icon = self.icon_width,
            width_desc = self.description_width,
        )
    }

    fn top_border(&self) -> String {
        self.border('┌', '┬', '┐')
    }

    fn separator(&self) -> String {
        self.border('├', '┼', '┤')
    }

    fn bottom_border(&self) -> String {
        self.border('└', '┴', '┘')
    }

    fn border(&self, left: char, mid: char, right: char) -> String {
        format!(
            "{left}{}{mid}{}{mid}{}{mid}{}{right}",
            "─".repeat(self.id_width + 2),
            "─".repeat(self.title_width + 2),
            "─".repeat(self.icon_width + 2),
            "─".repeat(self.description_width + 2),
        )
    }

    fn header_row(&self) -> String {
        format!(
            "│ {:<width_id$} │ {:<width_title$} │ {:<width_icon$} │ {:<width_desc$} │",
            "Id",
            "Title",
            "Icon",
            "Description",
            width_id = self.id_width,
            width_title = self.title_width,
            width_icon = self.icon_width,
            width_desc = self.description_width,
        )
    }
}

/// Truncate a string to a maximum display width, adding "..." if truncated.
///
/// Uses character count (not byte count) to safely handle UTF-8 strings
/// including emoji and multi-byte characters.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        format!("{:<width$}", s, width = max_len)
    } else {
        // Safely truncate at character boundaries, not byte boundaries
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_len)
    }
}
