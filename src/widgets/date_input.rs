use askama::Template;
use chrono::NaiveDate;

const DISPLAY_FORMAT: &str = "%Y/%m/%d";
const ISO_FORMAT: &str = "%Y-%m-%d";

/// Controlled date input: a text control plus a calendar icon that focuses it.
///
/// The widget holds a copy of the bound value for rendering only; changes are
/// posted to `on_change` and flow back through the form controller.
#[derive(Debug, Clone, PartialEq, Eq, Template)]
#[template(path = "widgets/date_input.html")]
pub struct DateInput {
    pub id: String,
    pub name: String,
    pub value: Option<NaiveDate>,
    pub placeholder: String,
    pub on_change: Option<String>,
}

impl DateInput {
    pub fn new(name: &str, value: Option<NaiveDate>) -> Self {
        Self {
            id: name.to_string(),
            name: name.to_string(),
            value,
            placeholder: "Select a date".to_string(),
            on_change: None,
        }
    }

    /// Post the surrounding form to `url` whenever the value changes.
    pub fn on_change(mut self, url: impl Into<String>) -> Self {
        self.on_change = Some(url.into());
        self
    }

    /// The bound value as `YYYY/MM/DD`, or empty when absent.
    pub fn display_value(&self) -> String {
        self.value.map(format_date).unwrap_or_default()
    }

    /// Script for the icon's click handler.
    pub fn focus_script(&self) -> String {
        format!("document.getElementById('{}').focus()", self.id)
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Parse user input in display or ISO form. Blank input is `Ok(None)`.
pub fn parse_date(input: &str) -> Result<Option<NaiveDate>, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(input, DISPLAY_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(input, ISO_FORMAT))
        .map(Some)
        .map_err(|e| format!("Invalid date '{input}': {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn displays_zero_padded_slash_separated() {
        let input = DateInput::new("joiningDate", Some(date(2024, 1, 5)));
        assert_eq!(input.display_value(), "2024/01/05");
    }

    #[test]
    fn absent_value_displays_empty() {
        let input = DateInput::new("joiningDate", None);
        assert_eq!(input.display_value(), "");
        assert_eq!(input.placeholder, "Select a date");
    }

    #[test]
    fn focus_script_targets_the_control() {
        let input = DateInput::new("joiningDate", None);
        assert_eq!(
            input.focus_script(),
            "document.getElementById('joiningDate').focus()"
        );
    }

    #[test]
    fn renders_control_and_icon() {
        let html = DateInput::new("joiningDate", Some(date(2024, 1, 5)))
            .on_change("/htmx/users/new/1/fields")
            .render()
            .unwrap();
        assert!(html.contains("id=\"joiningDate\""));
        assert!(html.contains("2024"));
        assert!(html.contains("placeholder=\"Select a date\""));
        assert!(html.contains("hx-post="));
        assert!(html.contains("onclick="));
    }

    #[test]
    fn renders_without_change_target() {
        let html = DateInput::new("joiningDate", None).render().unwrap();
        assert!(!html.contains("hx-post"));
    }

    #[test]
    fn parses_both_separators() {
        assert_eq!(parse_date("2024/01/05"), Ok(Some(date(2024, 1, 5))));
        assert_eq!(parse_date("2024-01-05"), Ok(Some(date(2024, 1, 5))));
        assert_eq!(parse_date("  "), Ok(None));
        assert!(parse_date("05/01/2024").is_err());
        assert!(parse_date("2024/02/30").is_err());
    }
}
