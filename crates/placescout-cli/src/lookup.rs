//! Read-only lookups: location lists, place details and the bundled catalog.

use anyhow::Context;
use placescout_core::{AppConfig, CredentialStore};
use placescout_places::{normalize_place, LocationClient, PlacesClient};

pub(crate) async fn run_states(config: &AppConfig, country: &str) -> anyhow::Result<()> {
    let client = location_client(config)?;
    let states = client.fetch_states(country).await?;
    print_list(&states, &format!("no states found for {country}"));
    Ok(())
}

pub(crate) async fn run_cities(config: &AppConfig, country: &str, state: &str) -> anyhow::Result<()> {
    let client = location_client(config)?;
    let cities = client.fetch_cities(country, state).await?;
    print_list(&cities, &format!("no cities found for {state}, {country}"));
    Ok(())
}

/// Fetch a single place and print its normalized fields.
///
/// # Errors
///
/// Returns an error if no API key is saved, the request fails, or the
/// response cannot be normalized.
pub(crate) async fn run_details(
    config: &AppConfig,
    credentials: &impl CredentialStore,
    place_id: &str,
) -> anyhow::Result<()> {
    let credential = credentials
        .get()?
        .context("no API key set; run `placescout key set <KEY>`")?;
    let client = PlacesClient::with_base_url(
        config.request_timeout_secs,
        &config.user_agent,
        &config.places_base_url,
    )?;

    let place = client.get_place_details(place_id, &credential).await?;
    let business = normalize_place(place)?;

    let dash = "\u{2014}";
    println!("Name:    {}", business.name);
    println!("Address: {}", business.address);
    println!("Phone:   {}", business.phone.as_deref().unwrap_or(dash));
    println!("Website: {}", business.website.as_deref().unwrap_or(dash));
    println!("Email:   {}", business.email.as_deref().unwrap_or(dash));
    println!(
        "Rating:  {}",
        business
            .rating
            .map_or_else(|| dash.to_owned(), |r| format!("{r:.1}"))
    );
    if let Some(level) = business.price_level {
        println!("Price:   {}", "$".repeat(usize::from(level)));
    }
    if !business.types.is_empty() {
        println!("Types:   {}", business.types.join(", "));
    }
    Ok(())
}

pub(crate) fn run_catalog_types(config: &AppConfig) -> anyhow::Result<()> {
    let catalog = load_catalog(config)?;
    print_list(&catalog.business_types, "catalog has no business types");
    Ok(())
}

pub(crate) fn run_catalog_countries(config: &AppConfig) -> anyhow::Result<()> {
    let catalog = load_catalog(config)?;
    print_list(&catalog.countries, "catalog has no countries");
    Ok(())
}

pub(crate) fn load_catalog(config: &AppConfig) -> anyhow::Result<placescout_core::Catalog> {
    placescout_core::load_catalog(&config.catalog_path).with_context(|| {
        format!(
            "failed to load catalog from {}",
            config.catalog_path.display()
        )
    })
}

fn location_client(config: &AppConfig) -> anyhow::Result<LocationClient> {
    Ok(LocationClient::with_base_url(
        config.request_timeout_secs,
        &config.user_agent,
        &config.location_base_url,
    )?)
}

fn print_list(items: &[String], empty_message: &str) {
    if items.is_empty() {
        println!("{empty_message}");
        return;
    }
    for item in items {
        println!("{item}");
    }
}
