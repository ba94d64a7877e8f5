use maud::{html, Markup};

use super::components::{
    artist_show_card, checkbox, delete_button, entity_row, genre_tags, genres_select, link_row,
    maybe_notice, search_bar, show_listing_card, show_section, state_select, text_input,
    textarea, venue_show_card, Notice,
};
use super::layout::base_layout;
use crate::handlers::forms::{ArtistForm, ShowForm, VenueForm};
use crate::services::{
    AreaSummary, ArtistDetail, EntitySummary, SearchResults, ShowListing, VenueDetail,
};

const VENUE_SEEKING_TEXT: &str =
    "We are on the lookout for a local artist to play every two weeks. Please call us.";
const ARTIST_SEEKING_TEXT: &str = "Looking for venue to play in.";

pub fn home_page(notice: Option<&Notice>) -> Markup {
    base_layout(
        "Home",
        html! {
            (maybe_notice(notice))

            div class="text-center py-12" {
                h1 class="text-4xl font-bold text-gray-900 mb-4" { "Fyyur" }
                p class="text-gray-600 mb-8" { "Find a venue. Book a band. Hear some music." }
                div class="flex justify-center space-x-4" {
                    a href="/venues/create" class="px-4 py-2 bg-primary text-white rounded-md" { "Post a venue" }
                    a href="/artists/create" class="px-4 py-2 bg-primary text-white rounded-md" { "Post an artist" }
                    a href="/shows/create" class="px-4 py-2 bg-primary text-white rounded-md" { "Post a show" }
                }
            }
        },
    )
}

pub fn venues_page(areas: &[AreaSummary]) -> Markup {
    base_layout(
        "Venues",
        html! {
            (search_bar("/venues/search", "Find a venue", ""))

            @if areas.is_empty() {
                p class="text-gray-500" { "No venues have been listed yet." }
            }
            @for area in areas {
                section class="bg-white rounded-lg shadow-sm p-4 mb-6" {
                    h2 class="text-lg font-semibold text-gray-900" {
                        (area.city) ", " (area.state)
                    }
                    ul class="divide-y divide-gray-100" {
                        @for venue in &area.venues {
                            (entity_row(venue, "/venues"))
                        }
                    }
                }
            }
        },
    )
}

pub fn artists_page(artists: &[EntitySummary]) -> Markup {
    base_layout(
        "Artists",
        html! {
            (search_bar("/artists/search", "Find an artist", ""))

            @if artists.is_empty() {
                p class="text-gray-500" { "No artists have been listed yet." }
            } @else {
                ul class="bg-white rounded-lg shadow-sm p-4 divide-y divide-gray-100" {
                    @for artist in artists {
                        (entity_row(artist, "/artists"))
                    }
                }
            }
        },
    )
}

/// Search results for venues (`href_prefix` "/venues") or artists.
pub fn search_page(
    title: &str,
    action: &str,
    href_prefix: &str,
    results: &SearchResults,
    term: &str,
) -> Markup {
    base_layout(
        title,
        html! {
            (search_bar(action, title, term))

            h2 class="text-lg text-gray-700 mb-4" {
                "Number of search results for \"" (term) "\": " (results.count)
            }
            ul class="bg-white rounded-lg shadow-sm p-4 divide-y divide-gray-100" {
                @for item in &results.items {
                    (entity_row(item, href_prefix))
                }
            }
        },
    )
}

pub fn venue_detail_page(detail: &VenueDetail) -> Markup {
    let venue = &detail.venue;
    let past: Vec<Markup> = detail.past_shows.iter().map(artist_show_card).collect();
    let upcoming: Vec<Markup> = detail.upcoming_shows.iter().map(artist_show_card).collect();

    base_layout(
        &venue.name,
        html! {
            div class="flex justify-between items-start" {
                div {
                    p class="text-sm text-gray-500" { "ID: " (venue.id) }
                    h1 class="text-3xl font-bold text-gray-900" { (venue.name) }
                    (genre_tags(&venue.genres))
                    p class="text-gray-700" { (venue.address) }
                    p class="text-gray-700" { (venue.city) ", " (venue.state) }
                    @if let Some(phone) = &venue.phone {
                        p class="text-gray-700" { (phone) }
                    }
                    (link_row("Website", venue.website.as_deref()))
                    (link_row("Facebook", venue.facebook_link.as_deref()))

                    @if venue.seeking_talent {
                        div class="mt-4 p-3 bg-yellow-50 rounded-md" {
                            p class="font-semibold" { (VENUE_SEEKING_TEXT) }
                            @if let Some(description) = &venue.seeking_description {
                                p class="text-sm text-gray-700" { (description) }
                            }
                        }
                    } @else {
                        p class="mt-4 text-sm text-gray-500" { "Not currently seeking talent" }
                    }
                }
                div class="flex flex-col items-end space-y-2" {
                    @if let Some(image) = &venue.image_link {
                        img src=(image) alt=(venue.name) class="w-48 rounded-lg shadow";
                    }
                    a href=(format!("/venues/{}/edit", venue.id)) class="px-3 py-2 text-sm bg-gray-200 rounded-md" { "Edit" }
                    (delete_button(&format!("/venues/{}", venue.id), "Delete venue"))
                }
            }

            (show_section("Upcoming", detail.upcoming_shows_count, upcoming))
            (show_section("Past", detail.past_shows_count, past))
        },
    )
}

pub fn artist_detail_page(detail: &ArtistDetail) -> Markup {
    let artist = &detail.artist;
    let past: Vec<Markup> = detail.past_shows.iter().map(venue_show_card).collect();
    let upcoming: Vec<Markup> = detail.upcoming_shows.iter().map(venue_show_card).collect();

    base_layout(
        &artist.name,
        html! {
            div class="flex justify-between items-start" {
                div {
                    p class="text-sm text-gray-500" { "ID: " (artist.id) }
                    h1 class="text-3xl font-bold text-gray-900" { (artist.name) }
                    (genre_tags(&artist.genres))
                    p class="text-gray-700" { (artist.city) ", " (artist.state) }
                    @if let Some(phone) = &artist.phone {
                        p class="text-gray-700" { (phone) }
                    }
                    (link_row("Website", artist.website.as_deref()))
                    (link_row("Facebook", artist.facebook_link.as_deref()))

                    @if artist.seeking_venue {
                        div class="mt-4 p-3 bg-yellow-50 rounded-md" {
                            p class="font-semibold" { (ARTIST_SEEKING_TEXT) }
                            @if let Some(description) = &artist.seeking_description {
                                p class="text-sm text-gray-700" { (description) }
                            }
                        }
                    } @else {
                        p class="mt-4 text-sm text-gray-500" { "Not currently seeking performance venues" }
                    }
                }
                div class="flex flex-col items-end space-y-2" {
                    @if let Some(image) = &artist.image_link {
                        img src=(image) alt=(artist.name) class="w-48 rounded-lg shadow";
                    }
                    a href=(format!("/artists/{}/edit", artist.id)) class="px-3 py-2 text-sm bg-gray-200 rounded-md" { "Edit" }
                    (delete_button(&format!("/artists/{}", artist.id), "Delete artist"))
                }
            }

            (show_section("Upcoming", detail.upcoming_shows_count, upcoming))
            (show_section("Past", detail.past_shows_count, past))
        },
    )
}

pub fn shows_page(shows: &[ShowListing]) -> Markup {
    base_layout(
        "Shows",
        html! {
            div class="flex justify-between items-center mb-6" {
                h1 class="text-2xl font-bold text-gray-900" { "Shows" }
                a href="/shows/create" class="px-4 py-2 bg-primary text-white rounded-md" { "Post a show" }
            }
            @if shows.is_empty() {
                p class="text-gray-500" { "No shows have been booked yet." }
            } @else {
                div class="grid grid-cols-2 md:grid-cols-4 gap-6" {
                    @for show in shows {
                        (show_listing_card(show))
                    }
                }
            }
        },
    )
}

/// Create (`action` "/venues/create") or edit form for a venue.
pub fn venue_form_page(
    title: &str,
    action: &str,
    form: &VenueForm,
    notice: Option<&Notice>,
) -> Markup {
    base_layout(
        title,
        html! {
            h1 class="text-2xl font-bold text-gray-900 mb-6" { (title) }
            (maybe_notice(notice))
            form method="post" action=(action) class="bg-white rounded-lg shadow-sm p-6 max-w-xl" {
                (text_input("name", "Name", Some(form.name.as_str()), true))
                (text_input("city", "City", Some(form.city.as_str()), true))
                (state_select(&form.state))
                (text_input("address", "Address", Some(form.address.as_str()), true))
                (text_input("phone", "Phone", form.phone.as_deref(), false))
                (genres_select(&form.genres))
                (text_input("image_link", "Image Link", form.image_link.as_deref(), false))
                (text_input("facebook_link", "Facebook Link", form.facebook_link.as_deref(), false))
                (text_input("website", "Website", form.website.as_deref(), false))
                (checkbox("seeking_talent", "Looking for talent", form.seeking_talent))
                (textarea("seeking_description", "Seeking Description", form.seeking_description.as_deref()))
                button type="submit" class="px-4 py-2 bg-primary text-white rounded-md" { "Save venue" }
            }
        },
    )
}

pub fn artist_form_page(
    title: &str,
    action: &str,
    form: &ArtistForm,
    notice: Option<&Notice>,
) -> Markup {
    base_layout(
        title,
        html! {
            h1 class="text-2xl font-bold text-gray-900 mb-6" { (title) }
            (maybe_notice(notice))
            form method="post" action=(action) class="bg-white rounded-lg shadow-sm p-6 max-w-xl" {
                (text_input("name", "Name", Some(form.name.as_str()), true))
                (text_input("city", "City", Some(form.city.as_str()), true))
                (state_select(&form.state))
                (text_input("phone", "Phone", form.phone.as_deref(), false))
                (genres_select(&form.genres))
                (text_input("image_link", "Image Link", form.image_link.as_deref(), false))
                (text_input("facebook_link", "Facebook Link", form.facebook_link.as_deref(), false))
                (text_input("website", "Website", form.website.as_deref(), false))
                (checkbox("seeking_venue", "Looking for venues", form.seeking_venue))
                (textarea("seeking_description", "Seeking Description", form.seeking_description.as_deref()))
                button type="submit" class="px-4 py-2 bg-primary text-white rounded-md" { "Save artist" }
            }
        },
    )
}

pub fn show_form_page(form: &ShowForm, notice: Option<&Notice>) -> Markup {
    base_layout(
        "List a new show",
        html! {
            h1 class="text-2xl font-bold text-gray-900 mb-6" { "List a new show" }
            (maybe_notice(notice))
            form method="post" action="/shows/create" class="bg-white rounded-lg shadow-sm p-6 max-w-xl" {
                (text_input("artist_id", "Artist ID", Some(form.artist_id.as_str()), true))
                (text_input("venue_id", "Venue ID", Some(form.venue_id.as_str()), true))
                div class="mb-4" {
                    label for="start_time" class="block text-sm font-medium text-gray-700 mb-1" { "Start Time" }
                    input
                        type="datetime-local"
                        id="start_time"
                        name="start_time"
                        value=(form.start_time)
                        required
                        class="w-full px-3 py-2 border border-gray-300 rounded-md";
                }
                button type="submit" class="px-4 py-2 bg-primary text-white rounded-md" { "Create show" }
            }
        },
    )
}

pub fn error_page(status: u16, message: &str) -> Markup {
    let heading = if status == 404 {
        "Not Found"
    } else {
        "Something went wrong"
    };

    base_layout(
        heading,
        html! {
            div class="text-center py-12" {
                p class="text-6xl font-bold text-gray-300" { (status) }
                h1 class="text-2xl font-semibold text-gray-900 mt-4" { (heading) }
                p class="text-gray-600 mt-2" { (message) }
                a href="/" class="inline-block mt-6 text-primary hover:underline" { "Back home" }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::join::tests::{at, venue};
    use crate::services::ArtistShow;

    #[test]
    fn test_seeking_text_only_when_seeking() {
        let mut hop = venue(1, "The Musical Hop");
        hop.seeking_description = Some("Weekly jazz nights".to_string());
        let detail = VenueDetail {
            venue: hop.clone(),
            past_shows: vec![],
            upcoming_shows: vec![ArtistShow {
                show_id: 1,
                start_time: at(24),
                artist_id: 4,
                artist_name: "Guns N Petals".to_string(),
                artist_image_link: None,
            }],
            past_shows_count: 0,
            upcoming_shows_count: 1,
        };

        let markup = venue_detail_page(&detail).into_string();
        assert!(markup.contains(VENUE_SEEKING_TEXT));
        assert!(markup.contains("Weekly jazz nights"));
        assert!(markup.contains("1 Upcoming Show"));
        assert!(markup.contains("Guns N Petals"));

        hop.seeking_talent = false;
        let markup = venue_detail_page(&VenueDetail { venue: hop, ..detail }).into_string();
        assert!(!markup.contains(VENUE_SEEKING_TEXT));
    }

    #[test]
    fn test_error_page_shows_status() {
        let markup = error_page(404, "Venue 9 not found").into_string();
        assert!(markup.contains("Not Found"));
        assert!(markup.contains("Venue 9 not found"));
    }
}
