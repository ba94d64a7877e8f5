use chrono::{DateTime, Utc};
use maud::{html, Markup};

use crate::db::genres::Genres;
use crate::handlers::forms::{GENRES, STATES};
use crate::services::{ArtistShow, EntitySummary, ShowListing, VenueShow};

/// One-shot message shown after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

pub fn notice_banner(notice: &Notice) -> Markup {
    let (class, text) = match notice {
        Notice::Success(msg) => ("bg-green-100 text-green-800 border-green-300", msg),
        Notice::Error(msg) => ("bg-red-100 text-red-800 border-red-300", msg),
    };

    html! {
        div class=(format!("notice border rounded-md px-4 py-3 mb-6 {}", class)) role="alert" {
            (text)
        }
    }
}

pub fn maybe_notice(notice: Option<&Notice>) -> Markup {
    html! {
        @if let Some(notice) = notice {
            (notice_banner(notice))
        }
    }
}

/// `medium`: "Tue 05, 21, 2019 09:30PM"; `full`: "Tuesday May, 21, 2019 at 9:30PM".
pub fn format_datetime(value: &DateTime<Utc>, full: bool) -> String {
    if full {
        value.format("%A %B, %-d, %Y at %-I:%M%p").to_string()
    } else {
        value.format("%a %m, %d, %Y %I:%M%p").to_string()
    }
}

pub fn search_bar(action: &str, placeholder: &str, term: &str) -> Markup {
    html! {
        form method="post" action=(action) class="flex space-x-2 mb-6" {
            input
                type="search"
                name="search_term"
                value=(term)
                placeholder=(placeholder)
                class="flex-1 px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-primary";
            button type="submit" class="px-4 py-2 bg-primary text-white rounded-md" {
                "Search"
            }
        }
    }
}

pub fn entity_row(entity: &EntitySummary, href_prefix: &str) -> Markup {
    html! {
        li class="py-2 flex justify-between items-center" {
            a href=(format!("{}/{}", href_prefix, entity.id)) class="text-gray-900 hover:text-primary font-medium" {
                (entity.name)
            }
            span class="text-xs text-gray-500" {
                (entity.num_upcoming_shows) " upcoming"
            }
        }
    }
}

pub fn genre_tags(genres: &Genres) -> Markup {
    html! {
        div class="flex flex-wrap gap-2 my-3" {
            @for genre in genres {
                span class="px-2 py-1 text-xs font-semibold bg-gray-200 text-gray-700 rounded-full" {
                    (genre)
                }
            }
        }
    }
}

fn image_or_placeholder(link: Option<&str>) -> &str {
    link.unwrap_or("https://via.placeholder.com/300x300/1a1a1a/ffffff?text=No+Image")
}

pub fn artist_show_card(show: &ArtistShow) -> Markup {
    html! {
        div class="show-card bg-white rounded-lg shadow-md overflow-hidden" {
            img
                src=(image_or_placeholder(show.artist_image_link.as_deref()))
                alt=(show.artist_name)
                class="w-full aspect-square object-cover"
                loading="lazy";
            div class="p-4" {
                a href=(format!("/artists/{}", show.artist_id)) class="font-semibold text-gray-900 hover:text-primary" {
                    (show.artist_name)
                }
                p class="text-sm text-gray-600" { (format_datetime(&show.start_time, false)) }
            }
        }
    }
}

pub fn venue_show_card(show: &VenueShow) -> Markup {
    html! {
        div class="show-card bg-white rounded-lg shadow-md overflow-hidden" {
            img
                src=(image_or_placeholder(show.venue_image_link.as_deref()))
                alt=(show.venue_name)
                class="w-full aspect-square object-cover"
                loading="lazy";
            div class="p-4" {
                a href=(format!("/venues/{}", show.venue_id)) class="font-semibold text-gray-900 hover:text-primary" {
                    (show.venue_name)
                }
                p class="text-sm text-gray-600" { (format_datetime(&show.start_time, false)) }
            }
        }
    }
}

pub fn show_listing_card(show: &ShowListing) -> Markup {
    html! {
        div class="show-card bg-white rounded-lg shadow-md overflow-hidden" {
            img
                src=(image_or_placeholder(show.artist_image_link.as_deref()))
                alt=(show.artist_name)
                class="w-full aspect-square object-cover"
                loading="lazy";
            div class="p-4" {
                p class="text-sm text-gray-600" { (format_datetime(&show.start_time, true)) }
                a href=(format!("/artists/{}", show.artist_id)) class="block font-semibold text-gray-900 hover:text-primary" {
                    (show.artist_name)
                }
                p class="text-sm text-gray-600" {
                    "playing at "
                    a href=(format!("/venues/{}", show.venue_id)) class="hover:text-primary" {
                        (show.venue_name)
                    }
                }
            }
        }
    }
}

/// Grid of show cards under a heading with its count.
pub fn show_section(heading: &str, count: usize, cards: Vec<Markup>) -> Markup {
    html! {
        section class="mt-8" {
            h2 class="text-xl font-semibold text-gray-900 mb-4" {
                (count) " " (heading) " " @if count == 1 { "Show" } @else { "Shows" }
            }
            @if cards.is_empty() {
                p class="text-gray-500" { "Nothing here yet." }
            } @else {
                div class="grid grid-cols-2 md:grid-cols-4 gap-6" {
                    @for card in cards {
                        (card)
                    }
                }
            }
        }
    }
}

pub fn delete_button(url: &str, label: &str) -> Markup {
    html! {
        button
            class="px-3 py-2 text-sm bg-red-600 text-white rounded-md"
            hx-delete=(url)
            hx-confirm="Are you sure? This also removes every show booked here." {
            (label)
        }
    }
}

pub fn link_row(label: &str, link: Option<&str>) -> Markup {
    html! {
        @if let Some(link) = link {
            p class="text-sm text-gray-600" {
                (label) ": "
                a href=(link) class="text-primary hover:underline" target="_blank" { (link) }
            }
        }
    }
}

// Form fields

pub fn text_input(name: &str, label: &str, value: Option<&str>, required: bool) -> Markup {
    html! {
        div class="mb-4" {
            label for=(name) class="block text-sm font-medium text-gray-700 mb-1" { (label) }
            input
                type="text"
                id=(name)
                name=(name)
                value=(value.unwrap_or_default())
                required[required]
                class="w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-primary";
        }
    }
}

pub fn textarea(name: &str, label: &str, value: Option<&str>) -> Markup {
    html! {
        div class="mb-4" {
            label for=(name) class="block text-sm font-medium text-gray-700 mb-1" { (label) }
            textarea
                id=(name)
                name=(name)
                rows="3"
                class="w-full px-3 py-2 border border-gray-300 rounded-md" {
                (value.unwrap_or_default())
            }
        }
    }
}

pub fn checkbox(name: &str, label: &str, checked: bool) -> Markup {
    html! {
        div class="mb-4 flex items-center space-x-2" {
            input type="checkbox" id=(name) name=(name) value="y" checked[checked];
            label for=(name) class="text-sm text-gray-700" { (label) }
        }
    }
}

pub fn state_select(selected: &str) -> Markup {
    html! {
        div class="mb-4" {
            label for="state" class="block text-sm font-medium text-gray-700 mb-1" { "State" }
            select id="state" name="state" required class="w-full px-3 py-2 border border-gray-300 rounded-md" {
                @for state in STATES {
                    option value=(state) selected[*state == selected] { (state) }
                }
            }
        }
    }
}

pub fn genres_select(selected: &[String]) -> Markup {
    html! {
        div class="mb-4" {
            label for="genres" class="block text-sm font-medium text-gray-700 mb-1" { "Genres" }
            select id="genres" name="genres" multiple required class="w-full px-3 py-2 border border-gray-300 rounded-md" {
                @for genre in GENRES {
                    option value=(genre) selected[selected.iter().any(|g| g == genre)] { (genre) }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_datetime() {
        let at = Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).unwrap();
        assert_eq!(format_datetime(&at, false), "Tue 05, 21, 2019 09:30PM");
        assert_eq!(format_datetime(&at, true), "Tuesday May, 21, 2019 at 9:30PM");
    }

    #[test]
    fn test_notice_banner_escapes_message() {
        let markup = notice_banner(&Notice::Error("<b>oops</b>".to_string())).into_string();
        assert!(markup.contains("&lt;b&gt;oops&lt;/b&gt;"));
        assert!(markup.contains("bg-red-100"));
    }

    #[test]
    fn test_genres_select_marks_selected() {
        let markup = genres_select(&["Jazz".to_string()]).into_string();
        assert!(markup.contains(r#"<option value="Jazz" selected>Jazz</option>"#));
        assert!(markup.contains(r#"<option value="Blues">Blues</option>"#));
    }
}
