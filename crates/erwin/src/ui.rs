//! Rendering.
//!
//! Reads the session and paints it; only the viewport size flows back into the editor.

use crate::app::App;
use erwin_core::viewport::display_width;
use erwin_core::{Editor, Highlight};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

const NAME_WIDTH: usize = 20;

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // text
            Constraint::Length(1), // status bar
            Constraint::Length(1), // message bar
        ])
        .split(frame.area());
    let text_area = chunks[0];

    app.editor_mut()
        .set_viewport_size(usize::from(text_area.height), usize::from(text_area.width));

    let editor = app.editor();
    render_text(frame, editor, text_area);
    render_status_bar(frame, editor, chunks[1]);
    render_clock(frame, text_area);

    let prompt = app.prompt_line();
    let message = prompt
        .as_deref()
        .or_else(|| editor.status().visible())
        .unwrap_or_default();
    frame.render_widget(Paragraph::new(truncate(message, chunks[2].width)), chunks[2]);

    if prompt.is_some() {
        let x = clamp_to(message.len(), chunks[2].width);
        frame.set_cursor_position((chunks[2].x + x, chunks[2].y));
    } else {
        let viewport = editor.viewport();
        let x = editor.render_x().saturating_sub(viewport.col_offset);
        let y = editor.cursor().row.saturating_sub(viewport.row_offset);
        frame.set_cursor_position((
            text_area.x + clamp_to(x, text_area.width),
            text_area.y + clamp_to(y, text_area.height),
        ));
    }
}

pub fn highlight_style(highlight: Highlight) -> Style {
    match highlight {
        Highlight::Normal => Style::default(),
        Highlight::Comment => Style::default().fg(Color::Cyan),
        Highlight::Keyword1 => Style::default().fg(Color::Yellow),
        Highlight::Keyword2 => Style::default().fg(Color::Green),
        Highlight::String => Style::default().fg(Color::Magenta),
        Highlight::Number => Style::default().fg(Color::Red),
        Highlight::Match => Style::default().fg(Color::Black).bg(Color::Yellow),
        Highlight::Preproc => Style::default().fg(Color::Blue),
    }
}

fn render_text(frame: &mut Frame, editor: &Editor, area: Rect) {
    let viewport = editor.viewport();
    let tab_stop = editor.options().tab_stop;
    let lines: Vec<Line> = editor
        .document()
        .lines()
        .iter()
        .skip(viewport.row_offset)
        .take(usize::from(area.height))
        .map(|line| styled_row(line, viewport.col_offset, usize::from(area.width), tab_stop))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

/// Cells `col_offset..col_offset + width` of `line`, tabs expanded.
fn styled_row(
    line: &erwin_core::Line,
    col_offset: usize,
    width: usize,
    tab_stop: usize,
) -> Line<'static> {
    let end = col_offset + width;
    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_style = Style::default();
    let mut x = 0;

    for (&byte, &highlight) in line.text().iter().zip(line.highlight()) {
        if x >= end {
            break;
        }
        let cells = display_width(byte, x, tab_stop);
        let style = highlight_style(highlight);
        let glyph = match byte {
            b'\t' => ' ',
            32..=126 => char::from(byte),
            _ => '?',
        };
        for cell in x..x + cells {
            if cell < col_offset || cell >= end {
                continue;
            }
            if style != run_style && !run.is_empty() {
                spans.push(Span::styled(std::mem::take(&mut run), run_style));
            }
            run_style = style;
            run.push(glyph);
        }
        x += cells;
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }
    Line::from(spans)
}

fn render_status_bar(frame: &mut Frame, editor: &Editor, area: Rect) {
    let name: String = editor
        .file_name()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "[No Name]".to_string())
        .chars()
        .take(NAME_WIDTH)
        .collect();
    let line_count = editor.document().line_count();
    let modified = if editor.is_dirty() { "(modified)" } else { "" };

    let left = format!("{name} - {line_count} lines {modified}");
    let right = format!("{}/{}", editor.cursor().row + 1, line_count);
    let width = usize::from(area.width);
    let text = if left.len() + right.len() < width {
        format!("{left:<pad$}{right}", pad = width - right.len())
    } else {
        left
    };

    let bar = Paragraph::new(truncate(&text, area.width))
        .style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_widget(bar, area);
}

fn render_clock(frame: &mut Frame, area: Rect) {
    let clock = chrono::Local::now().format("%H:%M").to_string();
    let Ok(width) = u16::try_from(clock.len()) else {
        return;
    };
    if area.width < width || area.height == 0 {
        return;
    }
    let rect = Rect {
        x: area.right() - width,
        y: area.y,
        width,
        height: 1,
    };
    frame.render_widget(Paragraph::new(clock), rect);
}

/// `offset` as a cell index inside a span of `len` cells.
fn clamp_to(offset: usize, len: u16) -> u16 {
    u16::try_from(offset)
        .unwrap_or(u16::MAX)
        .min(len.saturating_sub(1))
}

fn truncate(text: &str, width: u16) -> String {
    text.chars().take(usize::from(width)).collect()
}
