use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};

use crate::schema::model::display_value;
use crate::view::tree::{Control, DropdownItem, EntryView, FieldView, FormView};

/// Render a view tree as HTML markup.
///
/// Output is structural only: no styles beyond inline swatch colours, no scripts, no icons.
pub fn to_html(view: &FormView) -> String {
    Html(view).to_string()
}

struct Html<'a>(&'a FormView);

impl Display for Html<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let view = self.0;
        writeln!(
            f,
            r#"<form class="schemaform" data-submitting="{}">"#,
            view.submitting
        )?;
        for field in &view.fields {
            write_field(f, field)?;
        }
        writeln!(f, r#"<section class="dynamic-forms">"#)?;
        for entry in &view.entries {
            write_entry(f, entry)?;
        }
        writeln!(f, "</section>")?;
        writeln!(f, r#"<button type="submit">Submit</button>"#)?;
        writeln!(f, "</form>")
    }
}

fn attr(s: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(s)
}

fn text(s: &str) -> Cow<'_, str> {
    html_escape::encode_text(s)
}

fn write_field(f: &mut Formatter<'_>, field: &FieldView) -> fmt::Result {
    write!(
        f,
        r#"<div class="field" data-name="{}" data-format="{}">"#,
        attr(&field.name),
        field.format.as_str(),
    )?;
    if let Some(label) = &field.label {
        write!(f, r#"<label for="{}">{}</label>"#, attr(&field.name), text(label))?;
    }
    write_control(f, &field.name, &field.control)?;
    writeln!(f, "</div>")
}

fn write_control(f: &mut Formatter<'_>, name: &str, control: &Control) -> fmt::Result {
    match control {
        Control::Text {
            value,
            class,
            placeholder,
        } => {
            write!(
                f,
                r#"<input type="text" id="{0}" name="{0}" value="{1}""#,
                attr(name),
                attr(value)
            )?;
            if !class.is_empty() {
                write!(f, r#" class="{}""#, attr(class))?;
            }
            if let Some(p) = placeholder {
                write!(f, r#" placeholder="{}""#, attr(p))?;
            }
            f.write_str(">")
        }
        Control::Color {
            title,
            value,
            swatch,
            picker_open,
        } => {
            write!(
                f,
                r#"<div class="color-field"><span class="color-title">{}</span>"#,
                text(title)
            )?;
            match swatch {
                Some(c) => write!(
                    f,
                    r#"<button type="button" class="swatch" style="background:{c}"></button>"#
                )?,
                None => f.write_str(r#"<button type="button" class="swatch"></button>"#)?,
            }
            if *picker_open {
                write!(
                    f,
                    r#"<div class="picker-backdrop"></div><div class="picker" data-color="{}"></div>"#,
                    attr(value)
                )?;
            }
            write!(
                f,
                r#"<input type="text" id="{0}" name="{0}" value="{1}"></div>"#,
                attr(name),
                attr(value)
            )
        }
        Control::Slider {
            value,
            min,
            max,
            step,
        } => write!(
            f,
            r#"<input type="range" id="{}" name="{}" min="{min}" max="{max}" step="{step}" value="{value}">"#,
            attr(name),
            attr(name)
        ),
        Control::Toggle { options } => {
            f.write_str(r#"<div class="toggle" role="group">"#)?;
            for option in options {
                write!(
                    f,
                    r#"<button type="button" class="toggle-option{}" aria-pressed="{}" data-value="{}">{}</button>"#,
                    if option.selected { " selected" } else { "" },
                    option.selected,
                    attr(&display_value(&option.value)),
                    text(&option.label)
                )?;
            }
            f.write_str("</div>")
        }
        Control::Tags {
            tags,
            placeholder,
            single_value,
            dropdown,
        } => {
            write!(f, r#"<div class="tags" data-single="{single_value}">"#)?;
            for tag in tags {
                write!(f, r#"<span class="tag" data-value="{}""#, attr(&display_value(&tag.value)))?;
                if let Some(bg) = tag.background {
                    write!(f, r#" style="background:{bg}""#)?;
                }
                write!(f, ">{}</span>", text(&tag.text))?;
            }
            write!(
                f,
                r#"<input type="text" id="{}" name="{}" placeholder="{}">"#,
                attr(name),
                attr(name),
                attr(placeholder)
            )?;
            if let Some(items) = dropdown {
                write_dropdown(f, items)?;
            }
            f.write_str("</div>")
        }
    }
}

fn write_dropdown(f: &mut Formatter<'_>, items: &[DropdownItem]) -> fmt::Result {
    f.write_str(r#"<ul class="tag-dropdown">"#)?;
    for item in items {
        write!(
            f,
            r#"<li data-value="{}"><span class="item-text">{}</span>"#,
            attr(&display_value(&item.value)),
            text(&item.text)
        )?;
        if let Some(strip) = &item.preview {
            f.write_str(r#"<span class="color-bar">"#)?;
            for c in strip {
                write!(f, r#"<span style="background:{c}"></span>"#)?;
            }
            f.write_str("</span>")?;
        }
        f.write_str("</li>")?;
    }
    f.write_str("</ul>")
}

fn write_entry(f: &mut Formatter<'_>, entry: &EntryView) -> fmt::Result {
    writeln!(
        f,
        r#"<fieldset class="entry" data-entry="{}" data-index="{}">"#,
        entry.id, entry.index
    )?;
    writeln!(
        f,
        r#"<legend><button type="button" class="entry-toggle" aria-expanded="{}">{}</button></legend>"#,
        entry.expanded,
        text(&entry.title)
    )?;
    if let Some(title) = &entry.title_input {
        write_field(f, title)?;
    }
    for field in &entry.fields {
        write_field(f, field)?;
    }
    if entry.can_remove || entry.can_add {
        f.write_str(r#"<div class="entry-actions">"#)?;
        if entry.can_remove {
            write!(
                f,
                r#"<button type="button" class="entry-remove" data-index="{}">Remove</button>"#,
                entry.index
            )?;
        }
        if entry.can_add {
            f.write_str(r#"<button type="button" class="entry-add">Add</button>"#)?;
        }
        writeln!(f, "</div>")?;
    }
    writeln!(f, "</fieldset>")
}

#[cfg(test)]
#[path = "../../tests/unit/view/html.rs"]
mod tests;
