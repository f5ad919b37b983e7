use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use placescout_core::{AppConfig, FileCredentialStore, KeyedFileStore};
use placescout_places::PlacesClient;

use super::controller::{SearchController, SearchState};
use super::SearchForm;
use crate::table::ResultsTable;

/// Run a search and print the results, optionally exporting them as CSV.
///
/// When `dry_run` is `true` the resolved query is printed and nothing is
/// sent to the provider.
///
/// # Errors
///
/// Returns an error if the form is incomplete, no API key is saved, the
/// provider request fails, or the export cannot be written.
pub(crate) async fn run_search(
    config: &AppConfig,
    mut form: SearchForm,
    filter: Option<&str>,
    export_dir: Option<&Path>,
    dry_run: bool,
) -> anyhow::Result<()> {
    match_catalog_spelling(config, &mut form);

    if dry_run {
        let params = form.resolve()?;
        println!("[dry-run] would search: {}", params.text_query());
        if form.custom_query.trim().is_empty() {
            println!("[dry-run] equivalent --query: {}", form.suggested_query());
        }
        return Ok(());
    }

    let directory = PlacesClient::with_base_url(
        config.request_timeout_secs,
        &config.user_agent,
        &config.places_base_url,
    )?
    .with_page_delay(Duration::from_millis(config.page_delay_ms));
    let credentials = FileCredentialStore::new(KeyedFileStore::new(&config.store_path));
    let mut controller = SearchController::new(directory, credentials);

    println!("Searching multiple pages for comprehensive results... This may take a moment.");
    if let SearchState::Failed(failure) = controller.submit(&form).await {
        return Err(failure.clone().into());
    }

    let businesses = controller.results().to_vec();
    let total = businesses.len();
    if total == 0 {
        println!("No businesses found");
        return Ok(());
    }

    let mut table = ResultsTable::new(businesses);
    if let Some(filter) = filter {
        table.set_filter(filter);
    }
    print!("{}", table.render());
    println!("Found {total} businesses across multiple pages");
    if let Some(filter) = filter {
        println!("{} match \"{filter}\"", table.filtered().len());
    }

    if let Some(dir) = export_dir {
        let path = table.export_to(dir, Utc::now().date_naive())?;
        println!("Exported {} rows to {}", table.filtered().len(), path.display());
    }

    Ok(())
}

/// Swaps the business type and country for their catalog spelling when they
/// match case-insensitively. Unknown values are searched as entered.
fn match_catalog_spelling(config: &AppConfig, form: &mut SearchForm) {
    let catalog = match crate::lookup::load_catalog(config) {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "catalog unavailable; using fields as entered");
            return;
        }
    };

    if !form.business_type.trim().is_empty() {
        match catalog.find_business_type(&form.business_type) {
            Some(known) => form.business_type = known.to_owned(),
            None => tracing::warn!(
                business_type = %form.business_type,
                "business type not in catalog; searching anyway"
            ),
        }
    }
    if !form.country.trim().is_empty() {
        match catalog.find_country(&form.country) {
            Some(known) => form.country = known.to_owned(),
            None => tracing::warn!(country = %form.country, "country not in catalog"),
        }
    }
}
