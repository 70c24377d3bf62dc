//! Deck screen rendering
//!
//! Layout, top to bottom: header, card area, optional error toast, help
//! line. The top card is drawn in full; the cards behind it are drawn as
//! one-line summaries underneath, dimmer with depth.

use crate::view_models::{
    BodyViewModel, CardViewModel, HeaderViewModel, ReviewCardViewModel, ScreenViewModel,
    FILLER_FOOTER, FILLER_HEADLINE, FILLER_LABEL,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const MERGE_COLOR: Color = Color::Green;
const CLOSE_COLOR: Color = Color::Red;
const ACCENT_COLOR: Color = Color::Magenta;

pub fn render(vm: &ScreenViewModel, area: Rect, f: &mut Frame) {
    let toast_height = if vm.error.is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(toast_height),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(&vm.header, chunks[0], f);
    render_body(&vm.body, chunks[1], f);
    if let Some(message) = &vm.error {
        render_error(message, chunks[2], f);
    }
    f.render_widget(
        Paragraph::new(vm.help.as_str())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        chunks[3],
    );
}

fn render_header(header: &HeaderViewModel, area: Rect, f: &mut Frame) {
    let line = Line::from(vec![
        Span::styled("pr-swipe", Style::default().fg(ACCENT_COLOR).bold()),
        Span::raw(format!("  {}  ", header.source)),
        Span::styled(format!("@{}", header.user), Style::default().fg(Color::Cyan)),
        Span::raw(format!("   reviewed {}", header.progress)),
        Span::styled(
            format!("   merged {}", header.merged),
            Style::default().fg(MERGE_COLOR),
        ),
        Span::styled(
            format!("   closed {}", header.closed),
            Style::default().fg(CLOSE_COLOR),
        ),
    ]);

    f.render_widget(
        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        ),
        area,
    );
}

fn render_body(body: &BodyViewModel, area: Rect, f: &mut Frame) {
    match body {
        BodyViewModel::Loading => render_message("Loading pull requests…", area, f),
        BodyViewModel::Empty => {
            render_message("No open pull requests to review. Press r to reload.", area, f)
        }
        BodyViewModel::LoadFailed => {
            render_message("Could not load pull requests. Press r to retry.", area, f)
        }
        BodyViewModel::CaughtUp { merged, closed } => render_message(
            &format!(
                "All caught up! {} merged, {} closed. Press r to look for more.",
                merged, closed
            ),
            area,
            f,
        ),
        BodyViewModel::Cards(cards) => render_cards(cards, area, f),
    }
}

fn render_message(message: &str, area: Rect, f: &mut Frame) {
    let inner = centered(area, 70, 3);
    f.render_widget(
        Paragraph::new(message)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}

fn render_cards(cards: &[CardViewModel], area: Rect, f: &mut Frame) {
    let behind = cards.len().saturating_sub(1) as u16;
    let card_area = centered(area, 72, area.height.saturating_sub(1));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(behind)])
        .split(card_area);

    if let Some(top) = cards.first() {
        match top {
            CardViewModel::Review { card, .. } => render_review_card(card, chunks[0], f),
            CardViewModel::Filler { .. } => render_filler_card(chunks[0], f),
        }
    }

    let summaries: Vec<Line> = cards
        .iter()
        .skip(1)
        .map(|card| {
            let style = if card.depth() == 1 {
                Style::default().fg(Color::Gray)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let text = match card {
                CardViewModel::Review { card, .. } => format!("{}  {}", card.reference, card.title),
                CardViewModel::Filler { .. } => FILLER_LABEL.to_string(),
            };
            Line::styled(format!("{}└ {}", " ".repeat(card.depth() * 2), text), style)
        })
        .collect();
    f.render_widget(Paragraph::new(summaries), chunks[1]);
}

fn render_review_card(card: &ReviewCardViewModel, area: Rect, f: &mut Frame) {
    let mut title = vec![Span::styled(
        format!(" {} ", card.reference),
        Style::default().fg(ACCENT_COLOR),
    )];
    if card.draft {
        title.push(Span::styled("draft ", Style::default().fg(Color::Yellow)));
    }

    let mut lines = vec![
        Line::from(Span::styled(
            card.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("by {} · {}", card.author, card.age)),
        Line::default(),
        Line::from(card.stats.clone()),
    ];
    if !card.branches.is_empty() {
        lines.push(Line::styled(card.branches.clone(), Style::default().fg(Color::DarkGray)));
    }
    if let Some(labels) = &card.labels {
        lines.push(Line::styled(labels.clone(), Style::default().fg(Color::Yellow)));
    }
    lines.push(Line::default());
    for bio in &card.bio_lines {
        lines.push(Line::styled(bio.clone(), Style::default().italic()));
    }
    lines.push(Line::default());
    lines.push(compatibility_line(card.compatibility));

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(Line::from(title))
                .title_bottom(Line::from(" ← close   merge → ").centered()),
        ),
        area,
    );
}

fn compatibility_line(score: u8) -> Line<'static> {
    const WIDTH: usize = 20;
    let filled = (score as usize * WIDTH) / 100;
    let color = match score {
        0..=39 => CLOSE_COLOR,
        40..=69 => Color::Yellow,
        _ => MERGE_COLOR,
    };
    Line::from(vec![
        Span::raw("compatibility "),
        Span::styled("█".repeat(filled), Style::default().fg(color)),
        Span::styled("░".repeat(WIDTH - filled), Style::default().fg(Color::DarkGray)),
        Span::raw(format!(" {}%", score)),
    ])
}

fn render_filler_card(area: Rect, f: &mut Frame) {
    let lines = vec![
        Line::styled(FILLER_LABEL.to_uppercase(), Style::default().fg(Color::DarkGray)),
        Line::default(),
        Line::styled(
            FILLER_HEADLINE,
            Style::default().fg(ACCENT_COLOR).add_modifier(Modifier::BOLD),
        ),
        Line::default(),
        Line::from(FILLER_FOOTER),
    ];

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(ACCENT_COLOR)),
        ),
        area,
    );
}

fn render_error(message: &str, area: Rect, f: &mut Frame) {
    f.render_widget(
        Paragraph::new(message)
            .style(Style::default().fg(Color::White).bg(CLOSE_COLOR))
            .block(Block::default().borders(Borders::ALL).title(" Error (Esc) ")),
        area,
    );
}

/// Center a box of at most `width` x `height` inside `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
