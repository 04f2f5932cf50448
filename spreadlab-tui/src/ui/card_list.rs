//! Product cards — collapsed rows plus the expanded swap form.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        format!(
            "Treasury {}  from {}",
            short_address(&app.context.address),
            app.context.start_date_iso()
        ),
        theme::muted(),
    )));
    lines.push(Line::from(Span::styled(
        "[j/k]move [Enter]toggle [r]run [x]dismiss [e]errors [q]quit",
        theme::muted(),
    )));
    lines.push(Line::from(""));

    for (idx, product) in app.products.iter().enumerate() {
        let is_cursor = idx == app.cursor;
        let is_opened = app.opened == Some(idx);

        let arrow = if is_opened { "▾" } else { "▸" };
        let name_style = if is_cursor {
            theme::accent().add_modifier(Modifier::REVERSED)
        } else if is_opened {
            theme::accent_bold()
        } else {
            theme::neutral()
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{arrow} {} ", product.logo), theme::muted()),
            Span::styled(product.name.as_str(), name_style),
        ]));

        // Provider · description, then token badges in given order.
        lines.push(Line::from(vec![
            Span::raw("    "),
            Span::styled(product.provider.to_uppercase(), theme::muted()),
            Span::styled(" · ", theme::muted()),
            Span::styled(product.description.as_str(), theme::muted()),
        ]));

        let mut badges = vec![Span::raw("    ")];
        for token in &product.tokens {
            badges.push(Span::styled(format!("({token})"), theme::neutral()));
            badges.push(Span::raw(" "));
        }
        lines.push(Line::from(badges));

        if is_opened {
            render_swap_form(&mut lines, app, idx);
        }
        lines.push(Line::from(""));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn render_swap_form(lines: &mut Vec<Line>, app: &AppState, idx: usize) {
    let card = &app.cards[idx];
    let field_valid = card.param_input.parse::<u8>().map(|v| v <= 100).unwrap_or(false);

    lines.push(Line::from(Span::styled("    You swap", theme::accent_bold())));
    lines.push(Line::from(vec![
        Span::styled("      ASSET %  ", theme::muted()),
        Span::styled(
            format!("[{:>3}]", card.param_input),
            if field_valid {
                theme::accent()
            } else {
                theme::negative()
            },
        ),
        Span::styled("  type digits, Backspace to edit", theme::muted()),
    ]));

    let run_hint = if app.in_flight {
        Span::styled("      ⟳ running...  [Esc]cancel", theme::warning())
    } else {
        Span::styled("      [r] Run preview   [x] dismiss", theme::positive())
    };
    lines.push(Line::from(run_hint));
}

fn short_address(address: &str) -> String {
    // Config files can hold arbitrary text, so slice on chars, not bytes.
    let count = address.chars().count();
    if count > 12 {
        let head: String = address.chars().take(6).collect();
        let tail: String = address.chars().skip(count - 4).collect();
        format!("{head}…{tail}")
    } else {
        address.to_string()
    }
}
