use askama::Template;
use skycast_core::Rendered;

#[derive(Template)]
#[template(path = "landing.html")]
pub struct LandingPage;

#[derive(Template)]
#[template(path = "weather.html")]
pub struct WeatherPage {
    title: String,
    /// Empty when the view only has a status message.
    heading: String,
    lines: Vec<String>,
    message: &'static str,
}

impl From<Rendered> for WeatherPage {
    fn from(rendered: Rendered) -> Self {
        match rendered {
            Rendered::Message(message) => Self {
                title: "SkyCast".to_string(),
                heading: String::new(),
                lines: Vec::new(),
                message,
            },
            Rendered::Summary { heading, lines } => Self {
                title: format!("{heading} - SkyCast"),
                heading,
                lines,
                message: "",
            },
        }
    }
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundPage {
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landing_has_city_form() {
        let html = LandingPage.render().unwrap();
        assert!(html.contains(r#"action="/weather""#));
        assert!(html.contains(r#"name="city""#));
    }

    #[test]
    fn message_page_shows_message_only() {
        let html = WeatherPage::from(Rendered::Message("Weather data not found.")).render().unwrap();
        assert!(html.contains("<p>Weather data not found.</p>"));
        assert!(!html.contains("<h2>"));
    }

    #[test]
    fn summary_is_escaped() {
        let page = WeatherPage::from(Rendered::Summary {
            heading: "Weather in <script>".into(),
            lines: vec!["Condition: a & b".into()],
        });
        let html = page.render().unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a &amp; b"));
    }
}
