use crate::session::Phase;
use crate::tui::app::App;
use crate::tui::colors;
use crate::tui::grid::{CARD_HEIGHT, CARD_MIN_WIDTH};
use crate::view::{backend_hint, CardView, StatusBanner};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const SEARCH_PREFIX: &str = " > ";

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let banner = app.controller.banner();
    let error_height = match &banner {
        Some(b) if b.is_error() => 4,
        _ => 0,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),            // Title
            Constraint::Length(3),            // Search bar
            Constraint::Length(error_height), // Error banner
            Constraint::Min(CARD_HEIGHT),     // Card grid
            Constraint::Length(1),            // Status message
            Constraint::Length(1),            // Status bar
        ])
        .split(area);

    draw_title(frame, chunks[0]);
    draw_search_bar(frame, app, chunks[1]);
    if let Some(b) = banner.as_ref().filter(|b| b.is_error()) {
        draw_error_banner(frame, app, b, chunks[2]);
    }
    draw_grid(frame, app, chunks[3]);
    draw_status_message(frame, banner.as_ref().filter(|b| !b.is_error()), chunks[4]);
    draw_status_bar(frame, app, chunks[5]);

    if app.search.focused {
        let typed = UnicodeWidthStr::width(app.search.before_cursor()) as u16;
        let cursor_x = chunks[1].x + 1 + SEARCH_PREFIX.len() as u16 + typed;
        let cursor_y = chunks[1].y + 1;
        frame.set_cursor_position(Position::new(
            cursor_x.min(chunks[1].right().saturating_sub(2)),
            cursor_y,
        ));
    }
}

fn draw_title(frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(" Search ", Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        Span::styled(format!("catsearch {}", crate::VERSION), Style::default().fg(colors::MUTED)),
    ]);
    frame.render_widget(
        Paragraph::new(title).style(Style::default().bg(colors::BAR_BG)),
        area,
    );
}

fn draw_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.search.focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Search for products ");

    let text = if app.search.query.is_empty() && !app.search.focused {
        Line::from(Span::styled(
            format!("{}Search for products...", SEARCH_PREFIX),
            Style::default().fg(colors::MUTED),
        ))
    } else {
        Line::from(format!("{}{}", SEARCH_PREFIX, app.search.query))
    };

    let paragraph = Paragraph::new(text)
        .block(block)
        .style(Style::default().fg(Color::White));
    frame.render_widget(paragraph, area);
}

fn draw_error_banner(frame: &mut Frame, app: &App, banner: &StatusBanner, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::ERROR_FG));
    let lines = vec![
        Line::from(Span::styled(
            banner.text(),
            Style::default().fg(colors::ERROR_FG).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{}  (F5 to retry)", backend_hint(&app.controller.config().base_url)),
            Style::default().fg(colors::MUTED),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_grid(frame: &mut Frame, app: &mut App, area: Rect) {
    let items = app.controller.session().items();
    let total = items.len();
    app.grid.resize(area.width, area.height, total);
    app.viewport = app.grid.viewport(area.height);

    if total == 0 {
        return;
    }

    let columns = app.grid.columns;
    let card_width = (area.width / columns as u16).max(CARD_MIN_WIDTH.min(area.width));
    let first = app.grid.scroll_row * columns;

    for (index, product) in items.iter().enumerate().skip(first) {
        let row = (index / columns - app.grid.scroll_row) as u16;
        let col = (index % columns) as u16;
        let y = area.y + row * CARD_HEIGHT;
        if y >= area.bottom() {
            break;
        }
        let rect = Rect {
            x: area.x + col * card_width,
            y,
            width: card_width.min(area.right().saturating_sub(area.x + col * card_width)),
            height: CARD_HEIGHT.min(area.bottom() - y),
        };
        let card = CardView::from_product(product);
        draw_card(frame, &card, app.grid.selected == Some(index), rect);
    }
}

fn draw_card(frame: &mut Frame, card: &CardView, selected: bool, area: Rect) {
    let border_style = if selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let inner_width = area.width.saturating_sub(4) as usize;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {} ", truncate(&card.title, inner_width)));

    let stock = card.stock.label();
    let gap = inner_width.saturating_sub(card.price.width() + stock.width()).max(1);
    let lines = vec![
        Line::from(Span::styled(
            truncate(&card.category, inner_width),
            Style::default().fg(colors::MUTED),
        )),
        Line::from(vec![
            Span::styled(
                card.price.clone(),
                Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" ".repeat(gap)),
            Span::styled(stock, Style::default().fg(colors::stock_color(card.stock))),
        ]),
        Line::from(Span::styled(card.image.caption(), Style::default().fg(Color::DarkGray))),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_status_message(frame: &mut Frame, banner: Option<&StatusBanner>, area: Rect) {
    let Some(banner) = banner else {
        return;
    };
    let style = match banner {
        StatusBanner::LoadingMore => Style::default().fg(colors::ACCENT),
        _ => Style::default().fg(Color::Gray),
    };
    frame.render_widget(
        Paragraph::new(banner.text()).style(style).alignment(Alignment::Center),
        area,
    );
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let session = app.controller.session();
    let left_text = match session.phase() {
        Phase::Idle => " Ready".to_string(),
        Phase::Loading(page) => format!(" \u{23F3} Loading page {}...", page),
        Phase::Error(_) => " Search failed".to_string(),
        Phase::Loaded { .. } => format!(
            " {} of {} products | page {} of {}",
            session.items().len(),
            session.total_found(),
            session.page(),
            page_count(session.total_found(), session.page_size()).max(1)
        ),
    };
    let left_text = if app.controller.is_typing() {
        format!("{} | typing...", left_text)
    } else {
        left_text
    };

    let right_text = " Tab:Search  \u{2191}\u{2193}\u{2190}\u{2192}:Move  PgUp/PgDn  F5:Reload  Ctrl+Q:Quit ";

    let available_width = area.width as usize;
    let left_len = left_text.width();
    let right_len = right_text.width();

    let status_str = if left_len + right_len < available_width {
        let padding = available_width - left_len - right_len;
        format!("{}{:padding$}{}", left_text, "", right_text, padding = padding)
    } else {
        left_text
    };

    let status = Paragraph::new(status_str)
        .style(Style::default().fg(Color::White).bg(Color::Rgb(0, 95, 135)));
    frame.render_widget(status, area);
}

/// Pages needed to show `total` results
fn page_count(total: u64, page_size: u32) -> u64 {
    total.div_ceil(u64::from(page_size.max(1)))
}

/// Cut `text` to at most `max` display columns, marking the cut with an ellipsis
fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('\u{2026}');
    out
}
