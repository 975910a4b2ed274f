// ── Voucher template domain types ──
//
// A template is a styling/content configuration for printed vouchers.
// Edits are expressed as `TemplateEdit` values so a draft can be updated
// one field at a time and the preview re-rendered after every change.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::entity_id::EntityId;
use crate::error::CoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherTemplate {
    pub id: EntityId,
    pub name: String,
    pub header_text: String,
    pub footer_text: String,
    /// Hex color string (`#rgb` or `#rrggbb`).
    pub background_color: String,
    pub text_color: String,
    pub accent_color: String,
    pub show_logo: bool,
    pub show_qr: bool,
}

/// Addressable template fields, in editor order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum TemplateField {
    #[strum(to_string = "Template Name")]
    Name,
    #[strum(to_string = "Header Text")]
    HeaderText,
    #[strum(to_string = "Footer Text")]
    FooterText,
    #[strum(to_string = "Background Color")]
    BackgroundColor,
    #[strum(to_string = "Text Color")]
    TextColor,
    #[strum(to_string = "Accent Color")]
    AccentColor,
    #[strum(to_string = "Show Logo")]
    ShowLogo,
    #[strum(to_string = "Show QR Code")]
    ShowQr,
}

impl TemplateField {
    /// Whether the field holds a boolean flag rather than text.
    pub fn is_flag(self) -> bool {
        matches!(self, Self::ShowLogo | Self::ShowQr)
    }

    /// Build a text edit for this field. `None` for flag fields.
    pub fn text_edit(self, value: String) -> Option<TemplateEdit> {
        match self {
            Self::Name => Some(TemplateEdit::Name(value)),
            Self::HeaderText => Some(TemplateEdit::HeaderText(value)),
            Self::FooterText => Some(TemplateEdit::FooterText(value)),
            Self::BackgroundColor => Some(TemplateEdit::BackgroundColor(value)),
            Self::TextColor => Some(TemplateEdit::TextColor(value)),
            Self::AccentColor => Some(TemplateEdit::AccentColor(value)),
            Self::ShowLogo | Self::ShowQr => None,
        }
    }

    /// Build a flag edit for this field. `None` for text fields.
    pub fn flag_edit(self, value: bool) -> Option<TemplateEdit> {
        match self {
            Self::ShowLogo => Some(TemplateEdit::ShowLogo(value)),
            Self::ShowQr => Some(TemplateEdit::ShowQr(value)),
            _ => None,
        }
    }
}

/// A single-field change merged into a template draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateEdit {
    Name(String),
    HeaderText(String),
    FooterText(String),
    BackgroundColor(String),
    TextColor(String),
    AccentColor(String),
    ShowLogo(bool),
    ShowQr(bool),
}

impl VoucherTemplate {
    /// Merge one edit into this template.
    pub fn apply(&mut self, edit: TemplateEdit) {
        match edit {
            TemplateEdit::Name(v) => self.name = v,
            TemplateEdit::HeaderText(v) => self.header_text = v,
            TemplateEdit::FooterText(v) => self.footer_text = v,
            TemplateEdit::BackgroundColor(v) => self.background_color = v,
            TemplateEdit::TextColor(v) => self.text_color = v,
            TemplateEdit::AccentColor(v) => self.accent_color = v,
            TemplateEdit::ShowLogo(v) => self.show_logo = v,
            TemplateEdit::ShowQr(v) => self.show_qr = v,
        }
    }

    /// Current text value of a text field. `None` for flag fields.
    pub fn text(&self, field: TemplateField) -> Option<&str> {
        match field {
            TemplateField::Name => Some(&self.name),
            TemplateField::HeaderText => Some(&self.header_text),
            TemplateField::FooterText => Some(&self.footer_text),
            TemplateField::BackgroundColor => Some(&self.background_color),
            TemplateField::TextColor => Some(&self.text_color),
            TemplateField::AccentColor => Some(&self.accent_color),
            TemplateField::ShowLogo | TemplateField::ShowQr => None,
        }
    }

    /// Current value of a flag field. `None` for text fields.
    pub fn flag(&self, field: TemplateField) -> Option<bool> {
        match field {
            TemplateField::ShowLogo => Some(self.show_logo),
            TemplateField::ShowQr => Some(self.show_qr),
            _ => None,
        }
    }

    /// Reject templates that cannot be rendered: an empty name or any
    /// color that is not a hex literal.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::validation("template name", "cannot be empty"));
        }
        for (field, value) in [
            ("background color", &self.background_color),
            ("text color", &self.text_color),
            ("accent color", &self.accent_color),
        ] {
            if parse_hex_color(value).is_none() {
                return Err(CoreError::validation(
                    field,
                    format!("'{value}' is not a #rgb or #rrggbb color"),
                ));
            }
        }
        Ok(())
    }
}

/// Parse `#rgb` / `#rrggbb` into RGB components.
pub fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let mut digits = hex.chars().filter_map(|c| c.to_digit(16));
            let mut expand = || {
                digits
                    .next()
                    .and_then(|d| u8::try_from(d * 17).ok())
            };
            Some((expand()?, expand()?, expand()?))
        }
        6 => {
            let channel = |range: std::ops::Range<usize>| {
                hex.get(range).and_then(|s| u8::from_str_radix(s, 16).ok())
            };
            Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> VoucherTemplate {
        VoucherTemplate {
            id: EntityId::from("1"),
            name: "Default Template".into(),
            header_text: "WiFi Hotspot Voucher".into(),
            footer_text: "Thank you for using our service!".into(),
            background_color: "#1a1f2e".into(),
            text_color: "#ffffff".into(),
            accent_color: "#22d3ee".into(),
            show_logo: true,
            show_qr: true,
        }
    }

    #[test]
    fn parse_hex_color_accepts_long_and_short_forms() {
        assert_eq!(parse_hex_color("#1a1f2e"), Some((0x1a, 0x1f, 0x2e)));
        assert_eq!(parse_hex_color("#fff"), Some((255, 255, 255)));
        assert_eq!(parse_hex_color("#0a0"), Some((0, 170, 0)));
    }

    #[test]
    fn parse_hex_color_rejects_malformed_values() {
        assert_eq!(parse_hex_color("1a1f2e"), None);
        assert_eq!(parse_hex_color("#1a1f2"), None);
        assert_eq!(parse_hex_color("#gggggg"), None);
        assert_eq!(parse_hex_color("red"), None);
        assert_eq!(parse_hex_color(""), None);
    }

    #[test]
    fn apply_touches_only_the_named_field() {
        let mut t = sample();
        t.apply(TemplateEdit::HeaderText("Guest Access".into()));
        t.apply(TemplateEdit::ShowQr(false));

        let mut expected = sample();
        expected.header_text = "Guest Access".into();
        expected.show_qr = false;
        assert_eq!(t, expected);
    }

    #[test]
    fn field_edits_match_field_kind() {
        assert!(TemplateField::Name.text_edit("x".into()).is_some());
        assert!(TemplateField::Name.flag_edit(true).is_none());
        assert!(TemplateField::ShowLogo.flag_edit(true).is_some());
        assert!(TemplateField::ShowLogo.text_edit("x".into()).is_none());
    }

    #[test]
    fn validate_flags_empty_name_and_bad_colors() {
        assert!(sample().validate().is_ok());

        let mut t = sample();
        t.name = "   ".into();
        assert!(matches!(
            t.validate(),
            Err(CoreError::Validation { field: "template name", .. })
        ));

        let mut t = sample();
        t.accent_color = "cyan".into();
        assert!(matches!(
            t.validate(),
            Err(CoreError::Validation { field: "accent color", .. })
        ));
    }
}
