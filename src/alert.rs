//! Alerts for telling the user that something worked or went wrong.
//!
//! Alerts are swapped into the `#alert-container` element of the page
//! out-of-band, so they can accompany any HTMX response.

use maud::{Markup, html};

/// A message shown to the user in a dismissable box.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    Success { message: String, details: String },
    Error { message: String, details: String },
}

impl Alert {
    pub fn into_html(self) -> Markup {
        let (message, details, style) = match self {
            Alert::Success { message, details } => (
                message,
                details,
                "text-green-800 border-green-300 bg-green-50 \
                dark:text-green-400 dark:bg-gray-800 dark:border-green-800",
            ),
            Alert::Error { message, details } => (
                message,
                details,
                "text-red-800 border-red-300 bg-red-50 \
                dark:text-red-400 dark:bg-gray-800 dark:border-red-800",
            ),
        };

        html! {
            div id="alert-container" hx-swap-oob="true" class="w-full max-w-md px-4"
            {
                div role="alert" class={ "p-4 mb-4 text-sm rounded-lg border " (style) }
                {
                    div class="flex items-start justify-between gap-4"
                    {
                        div
                        {
                            p class="font-medium" { (message) }

                            @if !details.is_empty() {
                                p class="mt-1" { (details) }
                            }
                        }

                        button
                            type="button"
                            aria-label="Dismiss"
                            onclick="this.closest('[role=alert]').remove()"
                        {
                            "✕"
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::Alert;

    #[test]
    fn error_alert_contains_message_and_details() {
        let alert = Alert::Error {
            message: "Invalid amount".to_owned(),
            details: "Try again".to_owned(),
        };

        let html = Html::parse_fragment(&alert.into_html().into_string());

        let container = html
            .select(&Selector::parse("#alert-container").unwrap())
            .next()
            .expect("could not find alert container");
        assert_eq!(container.value().attr("hx-swap-oob"), Some("true"));
        let text = container.text().collect::<String>();
        assert!(text.contains("Invalid amount"), "got {text:?}");
        assert!(text.contains("Try again"), "got {text:?}");
    }

    #[test]
    fn success_alert_omits_empty_details() {
        let alert = Alert::Success {
            message: "Saved".to_owned(),
            details: String::new(),
        };

        let html = Html::parse_fragment(&alert.into_html().into_string());

        let paragraphs = html.select(&Selector::parse("p").unwrap()).count();
        assert_eq!(paragraphs, 1);
    }
}
