use maud::{html, Markup};

use crate::catalog::{Category, City};
use crate::inventory::{InventoryPage, ListingSource};
use crate::listing::{Availability, ListingRecord, Price, UNKNOWN};
use crate::messages::{
    inventory_title, not_found_text, FALLBACK_BANNER, NOT_FOUND_TITLE, SEARCH_PROMPT,
    SITE_TAGLINE, SITE_TITLE,
};
use crate::templates::page_layout;

pub fn home_page() -> Markup {
    page_layout(
        "Home",
        html! {
            h1 { (SITE_TITLE) }
            p { (SITE_TAGLINE) }
            @for city in City::ALL {
                section class="city" {
                    h2 { (city.display_name()) }
                    ul {
                        @for category in Category::ALL {
                            li {
                                a href={ "/" (city.slug()) "/" (category.slug()) } { (category.label()) }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn search_page() -> Markup {
    page_layout(
        "Search",
        html! {
            h1 { "Search" }
            p { (SEARCH_PROMPT) }
            form method="post" action="/search" {
                label for="city" { "City" }
                select id="city" name="city" {
                    @for city in City::ALL {
                        option value=(city.slug()) { (city.display_name()) }
                    }
                }
                label for="category" { "Product" }
                select id="category" name="category" {
                    @for category in Category::ALL {
                        option value=(category.slug()) { (category.label()) }
                    }
                }
                button type="submit" { "Find it" }
            }
        },
    )
}

pub fn inventory_page(page: &InventoryPage) -> Markup {
    let title = inventory_title(&page.city, &page.category);
    page_layout(
        &title,
        html! {
            h1 { (title) }
            p class="intro" { (page.intro) }
            @if page.source == ListingSource::Fallback {
                p class="notice" { (FALLBACK_BANNER) }
            }
            table class="listings" {
                thead {
                    tr {
                        th { "Store" }
                        th { "Address" }
                        th { "Availability" }
                        th { "Quality" }
                        th { "Notes" }
                        th { "Last checked" }
                    }
                }
                tbody {
                    @for record in &page.listings {
                        (listing_row(record))
                    }
                }
            }
        },
    )
}

fn listing_row(record: &ListingRecord) -> Markup {
    html! {
        tr {
            td { (record.store) }
            td { (record.address) }
            td { (availability_text(&record.availability)) }
            td { (record.quality.map_or(UNKNOWN, |q| q.as_str())) }
            td { (record.notes) }
            td { (record.last_checked.format("%Y-%m-%d %H:%M").to_string()) }
        }
    }
}

fn availability_text(availability: &Availability) -> String {
    match availability {
        Availability::Status { status } => status.clone(),
        Availability::Priced { price, quantity } => {
            let price = match price {
                Price::Amount(v) => format!("${v:.2}"),
                Price::Unknown => UNKNOWN.to_string(),
            };
            format!("{price} (qty: {quantity})")
        }
    }
}

pub fn not_found_page(city: &str, category: &str) -> Markup {
    page_layout(
        NOT_FOUND_TITLE,
        html! {
            h1 { (NOT_FOUND_TITLE) }
            p { (not_found_text(city, category)) }
            p { a href="/" { "Back to all cities" } }
        },
    )
}
