use maud::{DOCTYPE, Markup, html};

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "w-full px-4 py-2 bg-blue-500 \
    dark:bg-blue-600 disabled:bg-blue-700 hover:enabled:bg-blue-600 \
    hover:enabled:dark:bg-blue-700 text-white rounded";

pub const LINK_BUTTON_STYLE: &str = "inline-block w-full py-2.5 px-5 mb-2 text-center \
    text-sm font-medium text-gray-900 bg-white rounded border border-gray-200 \
    hover:bg-gray-100 hover:text-blue-700 dark:bg-gray-800 \
    dark:text-gray-400 dark:border-gray-600 dark:hover:text-white \
    dark:hover:bg-gray-700";

// Form styles
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white disabled:text-gray-500 bg-gray-50 \
    dark:bg-gray-700 border border-gray-300 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:ring-blue-600 focus:border-blue-600 \
    focus:dark:border-blue-500 focus:dark:ring-blue-500";

// Card container for each section of the dashboard
pub const CARD_STYLE: &str = "w-full p-4 mb-4 bg-white rounded-lg shadow \
    dark:bg-gray-800 dark:border dark:border-gray-700";

// Page container
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col items-center px-6 py-8 mx-auto lg:py-5 max-w-screen-xl text-gray-900 dark:text-white";

// Vendored scripts, served from the static directory but not part of the offline cache.
pub const HTMX_SCRIPT: &str = "/htmx-2.0.8-min.js";
pub const HTMX_RESPONSE_TARGETS_SCRIPT: &str = "/htmx-ext-response-targets-2.0.4.js";
pub const ECHARTS_SCRIPT: &str = "/echarts.6.0.0.min.js";

pub enum HeadElement {
    /// The file path or URL to a JavaScript script.
    ScriptLink(String),
}

pub fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="theme-color" content="#2563eb";
                title { (title) " - Budget Buddy" }
                link rel="manifest" href="/manifest.json";
                link rel="icon" type="image/png" href="/icon-192.png" sizes="192x192";
                link rel="apple-touch-icon" href="/icon-192.png";
                link href="/style.css" rel="stylesheet";

                script src=(HTMX_SCRIPT) {}
                script src=(HTMX_RESPONSE_TARGETS_SCRIPT) {}

                @for element in head_elements
                {
                    @match element
                    {
                        HeadElement::ScriptLink(path) => script src=(path) {}
                    }
                }

                script src="/app.js" defer {}
            }

            body
                hx-ext="response-targets"
                class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)

                // Alert container for out-of-band swaps
                div
                    id="alert-container"
                    class="hidden w-full max-w-md px-4"
                    style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
                {}
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    let content = html!(
        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-blue-600 dark:text-blue-500"
                    {
                        (header)
                    }

                    p
                        class="mb-4 text-3xl md:text-4xl tracking-tight
                            font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p
                        class="mb-4 text-1xl md:text-2xl tracking-tight
                            text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a
                        href="/"
                        class="inline-flex text-white bg-blue-600
                            hover:bg-blue-800 focus:ring-4 focus:outline-hidden
                            focus:ring-blue-300 font-medium rounded text-sm px-5
                            py-2.5 text-center dark:focus:ring-blue-900 my-4"
                    {
                        "Back to Homepage"
                    }
                }
            }
        }
    );

    base(title, &[], &content)
}

#[cfg(test)]
mod tests {
    use maud::html;
    use scraper::{Html, Selector};

    use super::{HeadElement, base};

    #[test]
    fn base_links_manifest_and_app_script() {
        let page = base("Test", &[], &html!(p { "hello" })).into_string();
        let document = Html::parse_document(&page);

        let manifest = Selector::parse("link[rel=manifest]").unwrap();
        assert_eq!(
            document
                .select(&manifest)
                .next()
                .and_then(|link| link.value().attr("href")),
            Some("/manifest.json")
        );

        let app_script = Selector::parse("script[src='/app.js']").unwrap();
        assert!(document.select(&app_script).next().is_some());

        let title = Selector::parse("title").unwrap();
        let title = document.select(&title).next().unwrap().text().collect::<String>();
        assert_eq!(title, "Test - Budget Buddy");
    }

    #[test]
    fn base_includes_head_elements() {
        let page = base(
            "Test",
            &[
                HeadElement::ScriptLink("/lib.js".to_owned()),
                HeadElement::ScriptLink("/other.js".to_owned()),
            ],
            &html!(),
        )
        .into_string();

        assert!(page.contains(r#"<script src="/lib.js"></script>"#));
        assert!(page.contains(r#"<script src="/other.js"></script>"#));
    }
}
