use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the sift UI
#[derive(Clone, Debug)]
pub struct Theme {
    /// Foreground (text) color for the status bar
    pub status_bar_fg: Color,

    /// Background color for the status bar
    pub status_bar_bg: Color,

    /// Color for the current file name in the status bar
    pub filename_color: Color,

    /// Foreground color for sentences in the match list
    pub match_fg: Color,

    /// Background color for sentences in the match list
    pub match_bg: Color,

    /// Foreground color for the sentence open for editing
    pub current_fg: Color,

    /// Background color for the sentence open for editing
    pub current_bg: Color,

    /// Foreground color for the selected row of the match list
    pub list_selected_fg: Color,

    /// Background color for the selected row of the match list
    pub list_selected_bg: Color,

    /// Border color of the focused pane
    pub focused_border: Color,

    /// Border color of unfocused panes
    pub unfocused_border: Color,

    /// Foreground color for error messages in the status bar
    pub error_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            status_bar_fg: Color::White,
            status_bar_bg: Color::Blue,
            filename_color: Color::LightYellow,
            match_fg: Color::Black,
            match_bg: Color::Yellow,
            current_fg: Color::Black,
            current_bg: Color::LightGreen,
            list_selected_fg: Color::White,
            list_selected_bg: Color::LightBlue,
            focused_border: Color::LightCyan,
            unfocused_border: Color::DarkGray,
            error_fg: Color::LightRed,
        }
    }
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status_bar_style(&self) -> Style {
        Style::default()
            .fg(self.status_bar_fg)
            .bg(self.status_bar_bg)
    }

    pub fn filename_style(&self) -> Style {
        self.status_bar_style().fg(self.filename_color)
    }

    pub fn error_style(&self) -> Style {
        self.status_bar_style()
            .fg(self.error_fg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for every sentence in the match list
    pub fn match_style(&self) -> Style {
        Style::default().fg(self.match_fg).bg(self.match_bg)
    }

    /// Style for the sentence under the cursor; drawn over the match style
    pub fn current_style(&self) -> Style {
        Style::default().fg(self.current_fg).bg(self.current_bg)
    }

    pub fn list_selected_style(&self) -> Style {
        Style::default()
            .fg(self.list_selected_fg)
            .bg(self.list_selected_bg)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        let color = if focused {
            self.focused_border
        } else {
            self.unfocused_border
        };
        Style::default().fg(color)
    }
}
