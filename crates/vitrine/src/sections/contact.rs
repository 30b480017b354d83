use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Widget},
};
use vitrine_config::Profile;

use super::{View, title, wrap};
use crate::contact::{Field, SubmissionStatus};
use crate::theme::{Element, Interaction};

const FORM_WIDTH: u16 = 60;
const MESSAGE_ROWS: u16 = 4;
const SUBTITLE: &str = "Have a project in mind or just want to say hi? Send a message.";

pub fn height(profile: &Profile) -> u16 {
    let details = [&profile.contact.email, &profile.contact.location, &profile.contact.phone]
        .iter()
        .filter(|s| !s.is_empty())
        .count() as u16;
    // title, subtitle + gap, details + gap, name, email, message box,
    // button, error, gap, footer
    3 + 2 + details + 1 + 3 + 3 + (MESSAGE_ROWS + 2) + 1 + 1 + 1 + 1
}

fn field_box(view: &View<'_>, field: Field, area: Rect, buf: &mut Buffer) {
    let form = view.contact.form();
    let focused = form.focus == field;
    let style = view
        .theme
        .style_for(Element::Input, Interaction::from_flags(false, focused, false));
    let border = view.theme.style_for(
        Element::Card,
        Interaction::from_flags(false, focused, false),
    );
    let block = Block::bordered()
        .title(field.label())
        .border_style(border)
        .style(style);
    let inner = block.inner(area);
    block.render(area, buf);

    let mut rows = wrap(form.value(field), inner.width.saturating_sub(1));
    if focused && let Some(last) = rows.last_mut() {
        last.push('▏');
    }
    // Keep the cursor row in view.
    let skip = rows.len().saturating_sub(usize::from(inner.height));
    for (i, row) in rows.into_iter().skip(skip).enumerate() {
        Line::raw(row).render(Rect::new(inner.x, inner.y + i as u16, inner.width, 1), buf);
    }
}

pub fn render(view: &View<'_>, area: Rect, buf: &mut Buffer) {
    let theme = view.theme;
    let profile = view.profile;
    let mut y = area.y + title(view, "Get In Touch", area, buf);
    let width = area.width.min(FORM_WIDTH);
    let x = area.x + (area.width - width) / 2;
    let row = |y: u16, h: u16| Rect::new(x, y, width, h).intersection(area);

    Line::styled(SUBTITLE, theme.muted())
        .centered()
        .render(Rect::new(area.x, y, area.width, 1).intersection(area), buf);
    y += 2;

    for (label, value) in [
        ("Email", &profile.contact.email),
        ("Location", &profile.contact.location),
        ("Phone", &profile.contact.phone),
    ] {
        if value.is_empty() {
            continue;
        }
        Line::from(vec![
            Span::styled(format!("{label:<9}"), theme.muted()),
            Span::styled(value.clone(), theme.body().add_modifier(Modifier::BOLD)),
        ])
        .render(row(y, 1), buf);
        y += 1;
    }
    y += 1;

    field_box(view, Field::Name, row(y, 3), buf);
    y += 3;
    field_box(view, Field::Email, row(y, 3), buf);
    y += 3;
    field_box(view, Field::Message, row(y, MESSAGE_ROWS + 2), buf);
    y += MESSAGE_ROWS + 2;

    let submitting = view.contact.is_submitting();
    let (label, interaction) = if submitting {
        (" Sending... ", Interaction::Active)
    } else {
        (" Send Message  (Enter) ", Interaction::Idle)
    };
    Line::styled(label, theme.style_for(Element::Button, interaction))
        .centered()
        .render(row(y, 1), buf);
    y += 1;

    if let Some(error) = view.contact_error
        && view.contact.status() == SubmissionStatus::Idle
    {
        Line::styled(error.to_string(), theme.accent())
            .centered()
            .render(row(y, 1), buf);
    }
    y += 2;

    Line::styled(
        format!("© {} {}. Built for the terminal.", view.year, profile.name),
        theme.muted(),
    )
    .centered()
    .render(Rect::new(area.x, y, area.width, 1).intersection(area), buf);
}
