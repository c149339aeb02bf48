//! Modal overlays: filter panel, contact sheet, details, download prompt.

use crate::app::{App, FilterDraft, FilterField, Overlay};
use crate::listings::{Listing, ListingKind};
use crate::theme::ColorPalette;
use crate::util::{format_count, format_price, posted_ago};
use chrono::Utc;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the active overlay on top of the card.
pub(super) fn render(f: &mut Frame, app: &App) {
    match &app.overlay {
        Some(Overlay::Filters(draft)) => render_filters(f, app, draft),
        Some(Overlay::Contact) => {
            if let Some(listing) = app.current_listing() {
                render_contact(f, app, listing);
            }
        }
        Some(Overlay::Details) => {
            if let Some(listing) = app.current_listing() {
                render_details(f, app, listing);
            }
        }
        Some(Overlay::DownloadPrompt) => render_download_prompt(f, app),
        _ => {}
    }
}

/// Compute a centered rect occupying the given percentages of `r`.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn overlay_block<'a>(app: &App, title: &'a str) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(app.palette.overlay_border)
        .title(title)
}

/// Filter panel with the editable draft.
fn render_filters(f: &mut Frame, app: &App, draft: &FilterDraft) {
    let area = centered_rect(60, 50, f.area());
    if area.width < 24 || area.height < 8 {
        return;
    }
    f.render_widget(Clear, area);

    let field_line = |field: FilterField, value: String| {
        let marker = if draft.field == field { "▸ " } else { "  " };
        let style = if draft.field == field {
            app.palette.overlay_accent
        } else {
            app.palette.overlay_body
        };
        Line::from(vec![
            Span::styled(marker, app.palette.overlay_accent),
            Span::styled(format!("{:<10}", field.label()), app.palette.overlay_body),
            Span::styled(value, style),
        ])
    };

    let kind_value = draft
        .kind
        .map(|i| ListingKind::ALL[i].label().to_string())
        .unwrap_or_else(|| "Any".to_string());

    let or_any = |s: &str| {
        if s.is_empty() {
            "—".to_string()
        } else {
            s.to_string()
        }
    };

    let lines = vec![
        Line::from(""),
        field_line(FilterField::City, or_any(&draft.city)),
        field_line(FilterField::MinPrice, or_any(&draft.min_price)),
        field_line(FilterField::MaxPrice, or_any(&draft.max_price)),
        field_line(FilterField::Kind, kind_value),
        Line::from(""),
        Line::from(Span::styled(
            "Tab: next field   Space: cycle type",
            app.palette.overlay_dim,
        )),
        Line::from(Span::styled(
            "Enter: apply   Esc: cancel",
            app.palette.overlay_dim,
        )),
    ];

    f.render_widget(
        Paragraph::new(lines).block(overlay_block(app, " Filters ")),
        area,
    );
}

/// Broker contact sheet for the active listing.
fn render_contact(f: &mut Frame, app: &App, listing: &Listing) {
    let area = centered_rect(60, 45, f.area());
    if area.width < 24 || area.height < 8 {
        return;
    }
    f.render_widget(Clear, area);

    let broker = &listing.broker;
    let mut name_spans = vec![Span::styled(broker.name.clone(), app.palette.overlay_title)];
    if broker.verified {
        name_spans.push(Span::styled("  ✓ verified", app.palette.broker_verified));
    }

    let phone_line = match &broker.phone {
        Some(phone) => Line::from(vec![
            Span::styled("Phone     ", app.palette.overlay_dim),
            Span::styled(phone.clone(), app.palette.overlay_body),
        ]),
        None => Line::from(Span::styled(
            "No phone number on record",
            app.palette.overlay_dim,
        )),
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(name_spans),
        Line::from(Span::styled(broker.handle(), app.palette.overlay_dim)),
        Line::from(""),
        phone_line,
        Line::from(vec![
            Span::styled("About     ", app.palette.overlay_dim),
            Span::styled(listing.title.clone(), app.palette.overlay_body),
        ]),
        Line::from(""),
    ];
    if broker.whatsapp_url().is_some() {
        lines.push(Line::from(Span::styled(
            "Enter: chat on WhatsApp   Esc: close",
            app.palette.overlay_dim,
        )));
    } else {
        lines.push(Line::from(Span::styled("Esc: close", app.palette.overlay_dim)));
    }

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(overlay_block(app, " Contact Broker ")),
        area,
    );
}

/// Full listing details.
fn render_details(f: &mut Frame, app: &App, listing: &Listing) {
    let area = centered_rect(70, 70, f.area());
    if area.width < 30 || area.height < 10 {
        return;
    }
    f.render_widget(Clear, area);

    let row = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:<12}", label), app.palette.overlay_dim),
            Span::styled(value, app.palette.overlay_body),
        ])
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(listing.title.clone(), app.palette.overlay_title)),
        Line::from(""),
        row(
            "Price",
            format!(
                "{} / month",
                format_price(listing.price, listing.currency.as_deref())
            ),
        ),
        row("Type", listing.kind.label().to_string()),
        row("Location", format!("{}, {}", listing.location, listing.city)),
        row("Bedrooms", listing.bedrooms.to_string()),
        row("Bathrooms", listing.bathrooms.to_string()),
        row("Size", format!("{} sqft", listing.size_sqft)),
        row("Likes", format_count(app.like_count(listing))),
        row("Posted", posted_ago(listing.posted_at, Utc::now())),
        row("Broker", listing.broker.name.clone()),
        row(
            "Clip",
            listing
                .video_url
                .clone()
                .unwrap_or_else(|| "none".to_string()),
        ),
    ];

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(overlay_block(app, " Listing Details ")),
        area,
    );
}

/// Store pages offered by the download prompt.
pub(super) const APP_STORE_URL: &str = "https://apps.apple.com/app/reel/id6744996246";
pub(super) const PLAY_STORE_URL: &str =
    "https://play.google.com/store/apps/details?id=com.reel.app";

/// One-shot "get the app" prompt.
fn render_download_prompt(f: &mut Frame, app: &App) {
    let area = centered_rect(55, 40, f.area());
    if area.width < 24 || area.height < 9 {
        return;
    }
    f.render_widget(Clear, area);

    f.render_widget(
        Paragraph::new(download_prompt_lines(&app.palette))
            .alignment(Alignment::Center)
            .block(overlay_block(app, " Get the App ")),
        area,
    );
}

fn download_prompt_lines(palette: &ColorPalette) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(Span::styled("Enjoying the feed?", palette.overlay_title)),
        Line::from(""),
        Line::from("Get the app for HD video tours, instant"),
        Line::from("alerts and synced saved listings."),
        Line::from(""),
        Line::from(vec![
            Span::styled("[a] App Store   ", palette.overlay_accent),
            Span::styled("apps.apple.com/app/reel", palette.overlay_dim),
        ]),
        Line::from(vec![
            Span::styled("[g] Google Play ", palette.overlay_accent),
            Span::styled("play.google.com/store/apps", palette.overlay_dim),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Enter: maybe later   Esc: close",
            palette.overlay_dim,
        )),
    ]
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeVariant;
    use crate::util::validate_url_for_open;

    #[test]
    fn test_store_links_pass_url_validation() {
        assert!(validate_url_for_open(APP_STORE_URL).is_ok());
        assert!(validate_url_for_open(PLAY_STORE_URL).is_ok());
    }

    #[test]
    fn test_download_prompt_offers_both_stores() {
        let palette = ThemeVariant::Dark.palette();
        let text: String = download_prompt_lines(&palette)
            .iter()
            .flat_map(|l| l.spans.iter())
            .map(|s| s.content.as_ref())
            .collect();

        assert!(text.contains("App Store"));
        assert!(text.contains("Google Play"));
    }
}
