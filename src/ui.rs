//! Layout and drawing: playfield, sidebar (next piece, palette, stats), pause and game-over popups.

use crate::grid::Cell;
use crate::session::{Phase, Session};
use crate::shape::Piece;
use crate::theme::Theme;
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

const SIDEBAR_WIDTH: u16 = 24;
/// Each preview block is two terminal columns by one row.
const PREVIEW_CELL_W: u16 = 2;

/// Everything one frame needs.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    pub session: &'a Session,
    pub theme: &'a Theme,
    pub best: u32,
}

/// Terminal size (border included) for a grid of `width x height` grains.
/// Two grains stack in one terminal row.
fn playfield_term_size(width: usize, height: usize) -> (u16, u16) {
    (width as u16 + 2, height.div_ceil(2) as u16 + 2)
}

/// Largest grid `(width, height)` in grains that fits the terminal next to the sidebar.
pub fn max_grid_for_terminal(term_cols: u16, term_rows: u16) -> (usize, usize) {
    let w = term_cols.saturating_sub(2).saturating_sub(SIDEBAR_WIDTH);
    let h = term_rows.saturating_sub(2) as usize * 2;
    (w as usize, h)
}

pub fn draw(frame: &mut Frame, view: View<'_>) {
    let area = frame.area();
    let grid = view.session.grid();
    let (pw, ph) = playfield_term_size(grid.width(), grid.height());

    let horiz = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(pw + SIDEBAR_WIDTH),
            Constraint::Fill(1),
        ])
        .split(area);
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(ph), Constraint::Fill(1)])
        .split(horiz[1]);
    let inner = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(pw), Constraint::Length(SIDEBAR_WIDTH)])
        .split(vert[1]);

    draw_playfield(frame.buffer_mut(), view, inner[0]);
    draw_sidebar(frame.buffer_mut(), view, inner[1]);

    match view.session.phase() {
        Phase::Playing => {}
        Phase::Paused => draw_popup(
            frame.buffer_mut(),
            view.theme,
            inner[0],
            " Paused ",
            &["P  Resume", "N  New game", "Q  Quit"],
        ),
        Phase::GameOver => {
            let score = format!("Score {}", view.session.score());
            let best = format!("Best  {}", view.best.max(view.session.score()));
            draw_popup(
                frame.buffer_mut(),
                view.theme,
                inner[0],
                " Game over ",
                &[&score, &best, "", "N  New game", "Q  Quit"],
            );
        }
    }
}

fn draw_playfield(buf: &mut Buffer, view: View<'_>, area: Rect) {
    let theme = view.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.div_line).bg(theme.bg))
        .title(Span::styled(" Sandtrix ", Style::default().fg(theme.title)));
    let board = block.inner(area);
    block.render(area, buf);

    let grid = view.session.grid();
    let piece = view.session.active();
    let show_piece = view.session.phase() != Phase::GameOver;
    let grain = |x: usize, y: usize| -> Color {
        if show_piece && piece.covers(x as i32, y as i32) {
            return theme.sand_color(piece.color);
        }
        match grid.get(x, y) {
            Some(Cell::Sand(tag)) => theme.sand_color(tag),
            _ => theme.bg,
        }
    };

    for y in (0..grid.height()).step_by(2) {
        let ry = board.y + (y / 2) as u16;
        if ry >= board.bottom() {
            break;
        }
        for x in 0..grid.width() {
            let rx = board.x + x as u16;
            if rx >= board.right() {
                break;
            }
            buf[(rx, ry)]
                .set_symbol("▀")
                .set_style(Style::default().fg(grain(x, y)).bg(grain(x, y + 1)));
        }
    }
}

fn draw_sidebar(buf: &mut Buffer, view: View<'_>, area: Rect) {
    let theme = view.theme;
    let border_style = Style::default().fg(theme.div_line).bg(theme.bg);
    let title_style = Style::default().fg(theme.title);
    let fg_style = Style::default().fg(theme.main_fg);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // next
            Constraint::Length(3), // colours
            Constraint::Length(8), // stats
            Constraint::Fill(1),   // keys
        ])
        .split(area);

    let next_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(" Next ", title_style));
    let next_inner = next_block.inner(chunks[0]);
    next_block.render(chunks[0], buf);
    draw_preview(buf, theme, view.session.next(), next_inner);

    let colours_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(" Colours ", title_style));
    let colours_inner = colours_block.inner(chunks[1]);
    colours_block.render(chunks[1], buf);
    for tag in 0..view.session.config().palette_size {
        let x = colours_inner.x + u16::from(tag) * 3;
        if x + 2 > colours_inner.right() {
            break;
        }
        let c = theme.sand_color(tag);
        buf.set_string(x, colours_inner.y, "██", Style::default().fg(c).bg(c));
    }

    let snap = view.session.snapshot();
    let stat = |label: &'static str, value: String| {
        Line::from(vec![Span::styled(label, title_style), Span::styled(value, fg_style)])
    };
    let stats = vec![
        stat("Score   ", snap.score.to_string()),
        stat("Best    ", view.best.max(snap.score).to_string()),
        stat("Cleared ", snap.cells_cleared.to_string()),
        stat("Pieces  ", snap.pieces_locked.to_string()),
        stat("Gravity ", format!("{} ms", snap.gravity_interval.as_millis())),
        stat("State   ", phase_label(snap.phase).to_string()),
    ];
    Paragraph::new(stats)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(Span::styled(" Stats ", title_style)),
        )
        .render(chunks[2], buf);

    let help_style = Style::default().fg(theme.inactive_fg);
    let keys = vec![
        Line::from(Span::styled("←/→ h/l  move", help_style)),
        Line::from(Span::styled("↑ k      rotate", help_style)),
        Line::from(Span::styled("↓ j      soft drop", help_style)),
        Line::from(Span::styled("space    hard drop", help_style)),
        Line::from(Span::styled("p pause  n new  q quit", help_style)),
    ];
    Paragraph::new(keys).render(chunks[3], buf);
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Playing => "playing",
        Phase::Paused => "paused",
        Phase::GameOver => "game over",
    }
}

/// Draws the canonical (unscaled) outline of `piece`, centred in `area`.
fn draw_preview(buf: &mut Buffer, theme: &Theme, piece: &Piece, area: Rect) {
    let cells: Vec<(usize, usize)> = piece.kind.canonical().filled().collect();
    let r0 = cells.iter().map(|c| c.0).min().unwrap_or(0);
    let r1 = cells.iter().map(|c| c.0).max().unwrap_or(0);
    let c0 = cells.iter().map(|c| c.1).min().unwrap_or(0);
    let c1 = cells.iter().map(|c| c.1).max().unwrap_or(0);
    let bw = (c1 - c0 + 1) as u16 * PREVIEW_CELL_W;
    let bh = (r1 - r0 + 1) as u16;
    let off_x = area.width.saturating_sub(bw) / 2;
    let off_y = area.height.saturating_sub(bh) / 2;
    let color = theme.sand_color(piece.color);
    for (r, c) in cells {
        let x = area.x + off_x + (c - c0) as u16 * PREVIEW_CELL_W;
        let y = area.y + off_y + (r - r0) as u16;
        if x + PREVIEW_CELL_W <= area.right() && y < area.bottom() {
            buf.set_string(x, y, "██", Style::default().fg(color).bg(color));
        }
    }
}

fn draw_popup(buf: &mut Buffer, theme: &Theme, over: Rect, title: &str, lines: &[&str]) {
    let w = 24u16.min(over.width);
    let h = (lines.len() as u16 + 2).min(over.height);
    let popup = Rect {
        x: over.x + over.width.saturating_sub(w) / 2,
        y: over.y + over.height.saturating_sub(h) / 2,
        width: w,
        height: h,
    };
    Clear.render(popup, buf);
    let text: Vec<Line> = lines
        .iter()
        .map(|l| Line::from(Span::styled(*l, Style::default().fg(theme.main_fg))))
        .collect();
    Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().bg(theme.bg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.title).bg(theme.bg))
                .title(Span::styled(
                    title,
                    Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
                )),
        )
        .render(popup, buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_fit_leaves_room_for_sidebar_and_border() {
        let (w, h) = max_grid_for_terminal(100, 40);
        assert_eq!(w, 100 - 2 - SIDEBAR_WIDTH as usize);
        assert_eq!(h, 76);
        let (pw, ph) = playfield_term_size(w, h);
        assert_eq!(pw + SIDEBAR_WIDTH, 100);
        assert_eq!(ph, 40);
    }

    #[test]
    fn odd_height_rounds_up_a_row() {
        assert_eq!(playfield_term_size(10, 7), (12, 6));
    }
}
