use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Keybinding reference shown by the help overlay.
const HELP_TEXT: &str = "\
Navigation
  j / Down       move down
  k / Up         move up
  Enter          open category / read article
  Tab            switch navbar <-> tiles
  g / G          jump to top / bottom

History
  [ / Backspace / Esc   back
  ]                     forward

Reader
  j / k          scroll
  Ctrl+d / u     page down / up

Other
  r              reload manifest
  t              toggle theme
  ?              this help
  q              quit";

/// Render the help overlay centered on screen.
pub fn render(f: &mut Frame, app: &App) {
    let area = f.area();

    let width = 46u16.min(area.width.saturating_sub(4));
    let height = (HELP_TEXT.lines().count() as u16 + 2).min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let overlay = Rect::new(x, y, width, height);

    if overlay.width < 20 || overlay.height < 5 {
        return;
    }

    f.render_widget(Clear, overlay);

    let paragraph = Paragraph::new(HELP_TEXT)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border_focused"))
                .title(" Help "),
        )
        .alignment(Alignment::Left)
        .style(app.style("detail_body"));

    f.render_widget(paragraph, overlay);
}
