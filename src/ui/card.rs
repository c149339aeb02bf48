//! Full-screen listing card widget.
//!
//! One listing fills the frame, shorts-style: a clip placeholder on top,
//! the listing facts below it, an action rail down the right edge, and a
//! looping progress bar for the active clip.

use crate::app::App;
use crate::listings::Listing;
use crate::theme::ColorPalette;
use crate::util::{format_count, format_price, posted_ago, truncate_to_width};
use chrono::Utc;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Width of the action rail column.
const RAIL_WIDTH: u16 = 12;

/// Width of the position indicator column.
const POSITION_RAIL_WIDTH: u16 = 3;

/// Render the listing card for the active feed index.
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    let Some(listing) = app.current_listing() else {
        render_empty(f, app, area);
        return;
    };

    let position = match (app.controller.active_index(), app.controller.item_count()) {
        (Some(idx), count) => format!(" reel  {}/{} ", idx + 1, count),
        _ => " reel ".to_string(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.palette.card_border)
        .title(position);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width < 8 || inner.height < 8 {
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(POSITION_RAIL_WIDTH),
            Constraint::Min(0),
            Constraint::Length(RAIL_WIDTH),
        ])
        .split(inner);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Clip placeholder
            Constraint::Length(1), // Progress bar
            Constraint::Length(6), // Listing facts
        ])
        .split(columns[1]);

    render_position_rail(f, app, columns[0]);
    render_clip(f, app, listing, rows[0]);
    render_progress(f, app, rows[1]);
    render_facts(f, app, listing, rows[2]);
    render_rail(f, app, listing, columns[2]);
}

/// Per-item indicator column down the left edge: a prev arrow, one marker
/// per listing with the active position highlighted, and a next arrow.
fn render_position_rail(f: &mut Frame, app: &App, area: Rect) {
    let Some(active) = app.controller.active_index() else {
        return;
    };
    let lines = position_rail_lines(
        &app.palette,
        active,
        app.controller.item_count(),
        area.height as usize,
    );
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Build the position rail lines. Arrows at a feed edge are dimmed; when
/// the feed has more items than the column has rows, the markers window
/// around the active index.
fn position_rail_lines(
    palette: &ColorPalette,
    active: usize,
    count: usize,
    height: usize,
) -> Vec<Line<'static>> {
    if count == 0 || height < 3 {
        return Vec::new();
    }

    let edge_dim = palette.hint_text.add_modifier(Modifier::DIM);
    let prev_style = if active == 0 {
        edge_dim
    } else {
        palette.rail_icon
    };
    let next_style = if active + 1 == count {
        edge_dim
    } else {
        palette.rail_icon
    };

    // Arrows take the end rows
    let marker_rows = height - 2;
    let start = if count <= marker_rows {
        0
    } else {
        active
            .saturating_sub(marker_rows / 2)
            .min(count - marker_rows)
    };
    let end = (start + marker_rows).min(count);

    let mut lines = Vec::with_capacity(end - start + 2);
    lines.push(Line::from(Span::styled("▲", prev_style)));
    for idx in start..end {
        let (glyph, style) = if idx == active {
            ("●", palette.position_indicator)
        } else {
            ("·", palette.hint_text)
        };
        lines.push(Line::from(Span::styled(glyph, style)));
    }
    lines.push(Line::from(Span::styled("▼", next_style)));
    lines
}

/// Placeholder shown when the feed is empty.
fn render_empty(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.palette.card_border)
        .title(" reel ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let text = if app.loading {
        vec![Line::from("Loading listings...")]
    } else if app.filters.is_empty() {
        vec![
            Line::from("No listings available"),
            Line::from(""),
            Line::from(Span::styled("[r] reload", app.palette.hint_text)),
        ]
    } else {
        vec![
            Line::from("No listings match your filters"),
            Line::from(""),
            Line::from(Span::styled(
                "[f] adjust filters   [x] clear filters",
                app.palette.hint_text,
            )),
        ]
    };

    let vertical_pad = inner.height.saturating_sub(text.len() as u16) / 2;
    let msg_area = Rect {
        x: inner.x,
        y: inner.y + vertical_pad,
        width: inner.width,
        height: inner.height.saturating_sub(vertical_pad),
    };
    f.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(app.palette.card_placeholder),
        msg_area,
    );
}

/// The "video" area. A terminal cannot decode the clip, so this renders a
/// placeholder with the play/mute state of the underlying playback slot.
fn render_clip(f: &mut Frame, app: &App, listing: &Listing, area: Rect) {
    let clip = app.deck.active_clip();

    let mut lines = vec![Line::from("")];
    let symbol = match clip {
        Some(c) if c.is_playing() => "▶",
        _ => "⏸",
    };
    lines.push(Line::from(Span::styled(
        format!("{}  {}", symbol, listing.kind.label()),
        app.palette.card_placeholder,
    )));

    if listing.video_url.is_none() {
        lines.push(Line::from(Span::styled(
            "no clip for this listing",
            app.palette.card_placeholder,
        )));
    }

    if clip.is_some_and(|c| c.is_muted()) {
        lines.push(Line::from(Span::styled("[muted]", app.palette.muted_badge)));
    }

    let vertical_pad = area.height.saturating_sub(lines.len() as u16) / 2;
    let clip_area = Rect {
        x: area.x,
        y: area.y + vertical_pad,
        width: area.width,
        height: area.height.saturating_sub(vertical_pad),
    };
    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        clip_area,
    );
}

/// Looping clip progress bar.
fn render_progress(f: &mut Frame, app: &App, area: Rect) {
    let progress = app.deck.active_clip().map(|c| c.progress()).unwrap_or(0.0);
    let width = area.width as usize;
    let filled = ((width as f64) * progress).round() as usize;
    let filled = filled.min(width);

    let line = Line::from(vec![
        Span::styled("━".repeat(filled), app.palette.progress_filled),
        Span::styled("─".repeat(width - filled), app.palette.progress_empty),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// The listing facts block under the clip.
fn render_facts(f: &mut Frame, app: &App, listing: &Listing, area: Rect) {
    let width = area.width.saturating_sub(1) as usize;

    let price = format!(
        "{} / month",
        format_price(listing.price, listing.currency.as_deref())
    );
    let specs = format!(
        "{} bd · {} ba · {} sqft · {}",
        listing.bedrooms,
        listing.bathrooms,
        listing.size_sqft,
        listing.kind.label()
    );

    let mut broker_spans = vec![Span::styled(
        listing.broker.name.clone(),
        app.palette.broker_name,
    )];
    if listing.broker.verified {
        broker_spans.push(Span::styled(" ✓", app.palette.broker_verified));
    }
    broker_spans.push(Span::styled(
        format!("  {}", listing.broker.handle()),
        app.palette.card_specs,
    ));
    if app.is_following(listing) {
        broker_spans.push(Span::styled("  [following]", app.palette.broker_following));
    } else {
        broker_spans.push(Span::styled("  [F] follow", app.palette.broker_follow));
    }

    let lines = vec![
        Line::from(Span::styled(
            truncate_to_width(&listing.title, width),
            app.palette.card_title,
        )),
        Line::from(Span::styled(price, app.palette.card_price)),
        Line::from(Span::styled(
            truncate_to_width(
                &format!("{}, {}", listing.location, listing.city),
                width,
            ),
            app.palette.card_location,
        )),
        Line::from(Span::styled(specs, app.palette.card_specs)),
        Line::from(broker_spans),
        Line::from(Span::styled(
            format!("posted {}", posted_ago(listing.posted_at, Utc::now())),
            app.palette.card_specs,
        )),
    ];

    f.render_widget(Paragraph::new(lines), area);
}

/// Action rail down the right edge: like, save, mute, contact.
fn render_rail(f: &mut Frame, app: &App, listing: &Listing, area: Rect) {
    let like_style = if app.is_liked(listing) {
        app.palette.rail_active
    } else {
        app.palette.rail_icon
    };
    let save_style = if app.is_saved(listing) {
        app.palette.rail_active
    } else {
        app.palette.rail_icon
    };

    let muted = app.deck.active_clip().is_some_and(|c| c.is_muted());

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("♥ ", like_style),
            Span::styled(format_count(app.like_count(listing)), app.palette.rail_count),
        ]),
        Line::from(Span::styled("  like [l]", app.palette.hint_text)),
        Line::from(""),
        Line::from(Span::styled(
            if app.is_saved(listing) { "⚑ saved" } else { "⚑" },
            save_style,
        )),
        Line::from(Span::styled("  save [s]", app.palette.hint_text)),
        Line::from(""),
        Line::from(Span::styled(
            if muted { "🔇" } else { "🔊" },
            app.palette.rail_icon,
        )),
        Line::from(Span::styled("  mute [m]", app.palette.hint_text)),
        Line::from(""),
        Line::from(Span::styled("✆", app.palette.rail_icon)),
        Line::from(Span::styled("  call [c]", app.palette.hint_text)),
    ];

    f.render_widget(Paragraph::new(lines), area);
}

// ============================================================================
// Tests
// ============================================================================
