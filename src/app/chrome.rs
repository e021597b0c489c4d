//! Window chrome: toolbar (window dots, tab, zoom, theme) and footer
//! (mode toggle, export, status, hints).
//!
//! Painting returns the clickable areas so mouse clicks can be mapped back
//! to actions.

use super::keymap::{Action, HINTS};
use crate::mode::{Mode, ZoomLevel};
use crate::render::{Grid, Pen, Rect};
use crate::style::{Modifiers, Rgb, Theme};
use unicode_width::UnicodeWidthStr;

/// Name shown on the editor tab.
pub const TAB_TITLE: &str = "code.tsx";

/// A clickable area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotspot {
    /// Screen area.
    pub area: Rect,
    /// Action triggered by a click.
    pub action: Action,
}

/// Screen split into the three chrome regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromeLayout {
    /// Top row.
    pub toolbar: Rect,
    /// The code pane between the bars.
    pub pane: Rect,
    /// Bottom row.
    pub footer: Rect,
}

impl ChromeLayout {
    /// Split `screen` into toolbar, pane and footer.
    pub fn new(screen: Rect) -> Self {
        let (toolbar, rest) = screen.take_top(1);
        let (pane, footer) = rest.take_bottom(1);
        Self { toolbar, pane, footer }
    }
}

/// What the chrome displays.
#[derive(Debug, Clone, Copy)]
pub struct ChromeState<'a> {
    /// Active theme.
    pub theme: Theme,
    /// Active zoom.
    pub zoom: ZoomLevel,
    /// Active mode.
    pub mode: Mode,
    /// Status line text.
    pub status: &'a str,
}

struct Palette {
    bar: Pen,
    dim: Pen,
    active: Pen,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        let table = theme.style_table();
        let bar_bg = table.foreground.over(table.background, 0.08);
        Self {
            bar: Pen::new(table.foreground, bar_bg),
            dim: Pen::new(table.foreground.over(bar_bg, 0.55), bar_bg),
            active: Pen::new(table.background, table.foreground).with(Modifiers::BOLD),
        }
    }
}

/// Paint toolbar and footer into `grid`.
pub fn paint(grid: &mut Grid, layout: &ChromeLayout, state: &ChromeState<'_>) -> Vec<Hotspot> {
    let palette = Palette::for_theme(state.theme);
    let mut hotspots = Vec::new();
    paint_toolbar(grid, layout.toolbar, state, &palette, &mut hotspots);
    paint_footer(grid, layout.footer, state, &palette, &mut hotspots);
    hotspots
}

fn paint_toolbar(grid: &mut Grid, area: Rect, state: &ChromeState<'_>, palette: &Palette, hotspots: &mut Vec<Hotspot>) {
    if area.is_empty() {
        return;
    }
    grid.fill_rect(area, &crate::render::Cell::blank(palette.bar.bg));
    let y = area.y;
    let limit = area.right();

    let mut x = area.x + 1;
    for dot in [Rgb::new(255, 95, 86), Rgb::new(255, 189, 46), Rgb::new(39, 201, 63)] {
        x = grid.put_str(x, y, "● ", Pen::new(dot, palette.bar.bg), limit);
    }
    x = grid.put_str(x + 1, y, TAB_TITLE, palette.bar, limit);

    // Right-aligned: zoom buttons, then the theme selector.
    let theme_label = format!("◂ {} ▸", state.theme.name());
    let zoom_labels = [(ZoomLevel::X1, " 1x "), (ZoomLevel::X2, " 2x ")];
    let needed = zoom_labels.iter().map(|(_, l)| l.width()).sum::<usize>() + 2 + theme_label.width() + 1;
    let Some(start) = usize::from(limit).checked_sub(needed) else {
        return;
    };
    let mut rx = u16::try_from(start).unwrap_or(limit).max(x + 1);

    for (zoom, label) in zoom_labels {
        let pen = if zoom == state.zoom { palette.active } else { palette.dim };
        rx = button(grid, rx, y, label, pen, limit, Action::SetZoom(zoom), hotspots);
    }
    button(grid, rx + 2, y, &theme_label, palette.bar, limit, Action::CycleTheme, hotspots);
}

fn paint_footer(grid: &mut Grid, area: Rect, state: &ChromeState<'_>, palette: &Palette, hotspots: &mut Vec<Hotspot>) {
    if area.is_empty() {
        return;
    }
    grid.fill_rect(area, &crate::render::Cell::blank(palette.bar.bg));
    let y = area.y;
    let limit = area.right();

    let toggle = match state.mode {
        Mode::Editing => " ▶ Preview ",
        Mode::Previewing => " ✎ Edit ",
    };
    let mut x = button(grid, area.x + 1, y, toggle, palette.active, limit, Action::ToggleMode, hotspots);
    x = button(grid, x + 1, y, " Export ", palette.dim, limit, Action::Export, hotspots);
    x = grid.put_str(x + 2, y, state.status, palette.bar, limit);

    let hints_x = usize::from(limit).saturating_sub(HINTS.width() + 1);
    if let Ok(hints_x) = u16::try_from(hints_x) {
        if hints_x > x + 2 {
            grid.put_str(hints_x, y, HINTS, palette.dim, limit);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn button(
    grid: &mut Grid,
    x: u16,
    y: u16,
    label: &str,
    pen: Pen,
    limit: u16,
    action: Action,
    hotspots: &mut Vec<Hotspot>,
) -> u16 {
    let end = grid.put_str(x, y, label, pen, limit);
    if end > x {
        hotspots.push(Hotspot {
            area: Rect::new(x, y, end - x, 1),
            action,
        });
    }
    end
}

/// The action under (x, y), if any.
pub fn hit(hotspots: &[Hotspot], x: u16, y: u16) -> Option<&Action> {
    hotspots.iter().find(|h| h.area.contains(x, y)).map(|h| &h.action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paint_default(mode: Mode) -> (Grid, Vec<Hotspot>) {
        let mut grid = Grid::new(120, 10);
        let layout = ChromeLayout::new(grid.area());
        let state = ChromeState {
            theme: Theme::NightOwl,
            zoom: ZoomLevel::X1,
            mode,
            status: "ready",
        };
        let hotspots = paint(&mut grid, &layout, &state);
        (grid, hotspots)
    }

    #[test]
    fn test_layout_splits_bars() {
        let layout = ChromeLayout::new(Rect::from_size(80, 24));
        assert_eq!(layout.toolbar, Rect::new(0, 0, 80, 1));
        assert_eq!(layout.pane, Rect::new(0, 1, 80, 22));
        assert_eq!(layout.footer, Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn test_toolbar_shows_tab_and_theme() {
        let (grid, hotspots) = paint_default(Mode::Editing);
        let top = grid.row_text(0);
        assert!(top.contains(TAB_TITLE));
        assert!(top.contains("Night Owl"));
        assert!(hotspots.iter().any(|h| h.action == Action::SetZoom(ZoomLevel::X2)));
        assert!(hotspots.iter().any(|h| h.action == Action::CycleTheme));
    }

    #[test]
    fn test_footer_toggle_label_follows_mode() {
        let (grid, _) = paint_default(Mode::Editing);
        assert!(grid.row_text(9).contains("Preview"));
        let (grid, hotspots) = paint_default(Mode::Previewing);
        assert!(grid.row_text(9).contains("Edit"));
        assert!(grid.row_text(9).contains("ready"));
        assert_eq!(hit(&hotspots, 2, 9), Some(&Action::ToggleMode));
        assert_eq!(hit(&hotspots, 2, 5), None);
    }
}
