//! Submission forms for venues, artists and shows.
//!
//! Forms arrive as urlencoded pairs so that a multi-select `genres` field can
//! repeat its key. Validation turns a form into a store request or a
//! `Validation` error naming the first bad field.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use url::Url;

use crate::db::entities::{artists, venues};
use crate::db::genres::Genres;
use crate::db::repositories::{ArtistUpdate, NewArtist, NewShow, NewVenue, VenueUpdate};
use crate::error::{AppError, Result};

pub const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

pub const STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

/// Raw urlencoded pairs with lookup helpers.
#[derive(Debug, Clone, Default)]
pub struct FormData(Vec<(String, String)>);

impl FormData {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    /// First value for `key`, trimmed. Blank values count as absent.
    pub fn get(&self, key: &str) -> Option<String> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    pub fn get_all(&self, key: &str) -> Vec<String> {
        self.0
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect()
    }

    /// Checkbox semantics: present with a truthy value.
    pub fn flag(&self, key: &str) -> bool {
        matches!(
            self.get(key).as_deref(),
            Some("y" | "on" | "true" | "1" | "yes")
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueForm {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let form = FormData::new(pairs);
        Self {
            name: form.get("name").unwrap_or_default(),
            city: form.get("city").unwrap_or_default(),
            state: form.get("state").unwrap_or_default(),
            address: form.get("address").unwrap_or_default(),
            phone: form.get("phone"),
            image_link: form.get("image_link"),
            facebook_link: form.get("facebook_link"),
            website: form.get("website"),
            genres: form.get_all("genres"),
            seeking_talent: form.flag("seeking_talent"),
            seeking_description: form.get("seeking_description"),
        }
    }

    pub fn from_model(venue: &venues::Model) -> Self {
        Self {
            name: venue.name.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            address: venue.address.clone(),
            phone: venue.phone.clone(),
            image_link: venue.image_link.clone(),
            facebook_link: venue.facebook_link.clone(),
            website: venue.website.clone(),
            genres: venue.genres.iter().cloned().collect(),
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description.clone(),
        }
    }

    pub fn validate(&self) -> Result<NewVenue> {
        required("Name", &self.name)?;
        required("City", &self.city)?;
        valid_state(&self.state)?;
        required("Address", &self.address)?;
        let genres = valid_genres(&self.genres)?;
        optional_phone(self.phone.as_deref())?;
        optional_link("Image link", self.image_link.as_deref())?;
        optional_link("Facebook link", self.facebook_link.as_deref())?;
        optional_link("Website", self.website.as_deref())?;

        Ok(NewVenue {
            name: self.name.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            address: self.address.clone(),
            phone: self.phone.clone(),
            image_link: self.image_link.clone(),
            facebook_link: self.facebook_link.clone(),
            website: self.website.clone(),
            genres,
            seeking_talent: self.seeking_talent,
            seeking_description: self.seeking_description.clone(),
        })
    }

    /// Validated full overwrite of every editable field.
    pub fn to_update(&self) -> Result<VenueUpdate> {
        let new = self.validate()?;
        Ok(VenueUpdate {
            name: Some(new.name),
            city: Some(new.city),
            state: Some(new.state),
            address: Some(new.address),
            phone: Some(new.phone),
            image_link: Some(new.image_link),
            facebook_link: Some(new.facebook_link),
            website: Some(new.website),
            genres: Some(new.genres),
            seeking_talent: Some(new.seeking_talent),
            seeking_description: Some(new.seeking_description),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistForm {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let form = FormData::new(pairs);
        Self {
            name: form.get("name").unwrap_or_default(),
            city: form.get("city").unwrap_or_default(),
            state: form.get("state").unwrap_or_default(),
            phone: form.get("phone"),
            genres: form.get_all("genres"),
            image_link: form.get("image_link"),
            facebook_link: form.get("facebook_link"),
            website: form.get("website"),
            seeking_venue: form.flag("seeking_venue"),
            seeking_description: form.get("seeking_description"),
        }
    }

    pub fn from_model(artist: &artists::Model) -> Self {
        Self {
            name: artist.name.clone(),
            city: artist.city.clone(),
            state: artist.state.clone(),
            phone: artist.phone.clone(),
            genres: artist.genres.iter().cloned().collect(),
            image_link: artist.image_link.clone(),
            facebook_link: artist.facebook_link.clone(),
            website: artist.website.clone(),
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description.clone(),
        }
    }

    pub fn validate(&self) -> Result<NewArtist> {
        required("Name", &self.name)?;
        required("City", &self.city)?;
        valid_state(&self.state)?;
        let genres = valid_genres(&self.genres)?;
        optional_phone(self.phone.as_deref())?;
        optional_link("Image link", self.image_link.as_deref())?;
        optional_link("Facebook link", self.facebook_link.as_deref())?;
        optional_link("Website", self.website.as_deref())?;

        Ok(NewArtist {
            name: self.name.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            phone: self.phone.clone(),
            genres,
            image_link: self.image_link.clone(),
            facebook_link: self.facebook_link.clone(),
            website: self.website.clone(),
            seeking_venue: self.seeking_venue,
            seeking_description: self.seeking_description.clone(),
        })
    }

    pub fn to_update(&self) -> Result<ArtistUpdate> {
        let new = self.validate()?;
        Ok(ArtistUpdate {
            name: Some(new.name),
            city: Some(new.city),
            state: Some(new.state),
            phone: Some(new.phone),
            genres: Some(new.genres),
            image_link: Some(new.image_link),
            facebook_link: Some(new.facebook_link),
            website: Some(new.website),
            seeking_venue: Some(new.seeking_venue),
            seeking_description: Some(new.seeking_description),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShowForm {
    pub venue_id: String,
    pub artist_id: String,
    pub start_time: String,
}

impl ShowForm {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let form = FormData::new(pairs);
        Self {
            venue_id: form.get("venue_id").unwrap_or_default(),
            artist_id: form.get("artist_id").unwrap_or_default(),
            start_time: form.get("start_time").unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<NewShow> {
        let venue_id = positive_id("Venue ID", &self.venue_id)?;
        let artist_id = positive_id("Artist ID", &self.artist_id)?;
        new_show(venue_id, artist_id, &self.start_time)
    }
}

/// Booking request from already-typed ids and a submitted start time.
pub fn new_show(venue_id: i32, artist_id: i32, start_time: &str) -> Result<NewShow> {
    let venue_id = positive("Venue ID", venue_id)?;
    let artist_id = positive("Artist ID", artist_id)?;
    required("Start time", start_time)?;
    let parsed = parse_timestamp(start_time).ok_or_else(|| {
        AppError::Validation(format!("Start time '{}' is not a valid date", start_time))
    })?;

    Ok(NewShow {
        venue_id,
        artist_id,
        start_time: parsed,
    })
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM[:SS]` and HTML `datetime-local`
/// values. Times without an offset are UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn required(label: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", label)));
    }
    Ok(())
}

fn valid_state(state: &str) -> Result<()> {
    required("State", state)?;
    if !STATES.contains(&state) {
        return Err(AppError::Validation(format!("'{}' is not a valid state", state)));
    }
    Ok(())
}

fn valid_genres(genres: &[String]) -> Result<Genres> {
    if genres.is_empty() {
        return Err(AppError::Validation("At least one genre is required".to_string()));
    }
    if let Some(unknown) = genres.iter().find(|g| !GENRES.contains(&g.as_str())) {
        return Err(AppError::Validation(format!("'{}' is not a valid genre", unknown)));
    }
    Ok(Genres::new(genres.iter().cloned()))
}

/// US-style `xxx-xxx-xxxx` numbers.
const PHONE_PATTERN: &str = r"^[0-9]{3}-[0-9]{3}-[0-9]{4}$";

fn optional_phone(phone: Option<&str>) -> Result<()> {
    let Some(phone) = phone else {
        return Ok(());
    };

    let pattern = Regex::new(PHONE_PATTERN)
        .map_err(|e| AppError::Internal(format!("invalid phone pattern: {}", e)))?;
    if !pattern.is_match(phone) {
        return Err(AppError::Validation(format!(
            "'{}' is not a valid phone number, use xxx-xxx-xxxx",
            phone
        )));
    }
    Ok(())
}

fn optional_link(label: &str, link: Option<&str>) -> Result<()> {
    let Some(link) = link else {
        return Ok(());
    };

    let invalid = || AppError::Validation(format!("{} must be an http(s) URL", label));
    let parsed = Url::parse(link).map_err(|_| invalid())?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid());
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(invalid());
    }
    // The parser repairs `http:///host` and `https:host`; require the literal authority.
    let has_authority = link
        .split_once("://")
        .is_some_and(|(_, rest)| !rest.starts_with('/'));
    if !has_authority || link.contains(char::is_whitespace) {
        return Err(invalid());
    }
    Ok(())
}

fn positive_id(label: &str, value: &str) -> Result<i32> {
    required(label, value)?;
    let id = value
        .trim()
        .parse::<i32>()
        .map_err(|_| AppError::Validation(format!("{} must be a positive number", label)))?;
    positive(label, id)
}

fn positive(label: &str, id: i32) -> Result<i32> {
    if id <= 0 {
        return Err(AppError::Validation(format!("{} must be a positive number", label)));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn venue_pairs() -> Vec<(String, String)> {
        pairs(&[
            ("name", "The Musical Hop"),
            ("city", "San Francisco"),
            ("state", "CA"),
            ("address", "1015 Folsom Street"),
            ("phone", "123-123-1234"),
            ("genres", "Jazz"),
            ("genres", "Reggae"),
            ("genres", "Jazz"),
            ("facebook_link", "https://www.facebook.com/TheMusicalHop"),
            ("website", ""),
            ("seeking_talent", "y"),
        ])
    }

    #[test]
    fn test_venue_form_collects_repeated_genres() {
        let form = VenueForm::from_pairs(venue_pairs());
        assert_eq!(form.genres, vec!["Jazz", "Reggae", "Jazz"]);
        assert!(form.seeking_talent);
        assert_eq!(form.website, None);

        let new = form.validate().unwrap();
        assert_eq!(new.genres.as_slice(), &["Jazz", "Reggae"]);
        assert_eq!(new.name, "The Musical Hop");
    }

    #[test]
    fn test_venue_form_requires_name() {
        let mut items = venue_pairs();
        items.retain(|(k, _)| k != "name");
        let err = VenueForm::from_pairs(items).validate().unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "Name is required"));
    }

    #[test]
    fn test_venue_form_rejects_unknown_state_and_genre() {
        let mut form = VenueForm::from_pairs(venue_pairs());
        form.state = "ZZ".to_string();
        assert!(form.validate().is_err());

        let mut form = VenueForm::from_pairs(venue_pairs());
        form.genres = vec!["Polka".to_string()];
        assert!(form.validate().is_err());

        let mut form = VenueForm::from_pairs(venue_pairs());
        form.genres.clear();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_venue_update_overwrites_every_field() {
        let update = VenueForm::from_pairs(venue_pairs()).to_update().unwrap();
        assert_eq!(update.name.as_deref(), Some("The Musical Hop"));
        assert_eq!(update.website, Some(None));
        assert_eq!(update.seeking_talent, Some(true));
        assert_eq!(update.seeking_description, Some(None));
    }

    #[test]
    fn test_artist_form_validates_links_and_phone() {
        let base = pairs(&[
            ("name", "Guns N Petals"),
            ("city", "San Francisco"),
            ("state", "CA"),
            ("genres", "Rock n Roll"),
        ]);
        assert!(ArtistForm::from_pairs(base.clone()).validate().is_ok());

        let mut bad_link = ArtistForm::from_pairs(base.clone());
        bad_link.website = Some("gunsnpetals.com".to_string());
        assert!(bad_link.validate().is_err());

        let mut bad_phone = ArtistForm::from_pairs(base);
        bad_phone.phone = Some("call me".to_string());
        assert!(bad_phone.validate().is_err());
    }

    #[test]
    fn test_artist_form_round_trips_model_fields() {
        let artist = crate::services::join::tests::artist(4, "Guns N Petals");
        let form = ArtistForm::from_model(&artist);
        assert_eq!(form.name, "Guns N Petals");
        assert_eq!(form.genres, vec!["Rock n Roll"]);
        assert_eq!(form.image_link.as_deref(), Some("https://img.example/4"));
    }

    #[test]
    fn test_show_form() {
        let form = ShowForm::from_pairs(pairs(&[
            ("venue_id", "1"),
            ("artist_id", "4"),
            ("start_time", "2035-04-01 20:00:00"),
        ]));
        let new = form.validate().unwrap();
        assert_eq!(new.venue_id, 1);
        assert_eq!(new.artist_id, 4);
        assert_eq!(new.start_time, Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap());
    }

    #[test]
    fn test_show_form_rejects_bad_ids_and_dates() {
        let bad_id = ShowForm {
            venue_id: "zero".to_string(),
            artist_id: "4".to_string(),
            start_time: "2035-04-01 20:00".to_string(),
        };
        assert!(bad_id.validate().is_err());

        let negative = ShowForm {
            venue_id: "-1".to_string(),
            ..bad_id.clone()
        };
        assert!(negative.validate().is_err());

        let bad_date = ShowForm {
            venue_id: "1".to_string(),
            start_time: "next tuesday".to_string(),
            ..bad_id
        };
        assert!(bad_date.validate().is_err());
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2019-05-21T21:30:00.000Z"), Some(expected));
        assert_eq!(parse_timestamp("2019-05-21T23:30:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2019-05-21 21:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2019-05-21T21:30"), Some(expected));
        assert_eq!(parse_timestamp("21/05/2019"), None);
    }

    #[test]
    fn test_links_must_be_real_urls() {
        for link in [
            "https://www.themusicalhop.com",
            "http://example.com/path?q=1",
            "https://www.facebook.com/TheMusicalHop",
        ] {
            assert!(optional_link("Website", Some(link)).is_ok(), "{}", link);
        }

        for link in [
            "https://[::1",
            "http:///no-host",
            "https://%%%",
            "https://:80",
            "https:example.com",
            "ftp://example.com",
            "themusicalhop.com",
            "https://example .com",
        ] {
            assert!(
                matches!(optional_link("Website", Some(link)), Err(AppError::Validation(_))),
                "{} should be rejected",
                link
            );
        }
        assert!(optional_link("Website", None).is_ok());
    }

    #[test]
    fn test_phone_must_be_dashed_us_format() {
        assert!(optional_phone(Some("123-123-1234")).is_ok());
        assert!(optional_phone(Some("914-003-1132")).is_ok());
        assert!(optional_phone(None).is_ok());

        for phone in [
            "1-2-3-4-5-6-7",
            "1234567",
            "1231231234",
            "+1 (555) 123.4567",
            "123-123-12345",
            "12-1234-1234",
            "call me",
        ] {
            assert!(
                matches!(optional_phone(Some(phone)), Err(AppError::Validation(_))),
                "{} should be rejected",
                phone
            );
        }
    }

    #[test]
    fn test_new_show_from_typed_ids() {
        let new = new_show(3, 6, "2035-04-01T20:00:00Z").unwrap();
        assert_eq!(new.venue_id, 3);
        assert_eq!(new.artist_id, 6);
        assert_eq!(new.start_time, Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap());

        assert!(matches!(new_show(0, 6, "2035-04-01T20:00:00Z"), Err(AppError::Validation(_))));
        assert!(matches!(new_show(3, -2, "2035-04-01T20:00:00Z"), Err(AppError::Validation(_))));
        assert!(matches!(new_show(3, 6, "  "), Err(AppError::Validation(_))));
    }
}
