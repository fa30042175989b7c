use maud::{html, Markup, DOCTYPE};

use crate::messages::SITE_TITLE;

pub fn page_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " | " (SITE_TITLE) }
            }
            body {
                header {
                    a href="/" { (SITE_TITLE) }
                    nav {
                        ul {
                            li { a href="/" { "Home" } }
                            li { a href="/search" { "Search" } }
                        }
                    }
                }
                main { (content) }
            }
        }
    }
}
