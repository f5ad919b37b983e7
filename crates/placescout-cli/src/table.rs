//! Filterable view over search results, with CSV export.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use placescout_core::Business;

const EXPORT_HEADER: [&str; 7] = [
    "Business Name",
    "Phone",
    "Website",
    "Email",
    "Address",
    "Rating",
    "Types",
];

pub(crate) struct ResultsTable {
    businesses: Vec<Business>,
    filter: String,
}

impl ResultsTable {
    pub(crate) fn new(businesses: Vec<Business>) -> Self {
        Self {
            businesses,
            filter: String::new(),
        }
    }

    pub(crate) fn set_filter(&mut self, filter: &str) {
        self.filter = filter.to_owned();
    }

    /// Rows whose name or address contains the filter (case-insensitive),
    /// or whose phone contains it verbatim.
    pub(crate) fn filtered(&self) -> Vec<&Business> {
        if self.filter.is_empty() {
            return self.businesses.iter().collect();
        }
        let needle = self.filter.to_lowercase();
        self.businesses
            .iter()
            .filter(|b| {
                b.name.to_lowercase().contains(&needle)
                    || b.address.to_lowercase().contains(&needle)
                    || b.phone.as_deref().is_some_and(|p| p.contains(&self.filter))
            })
            .collect()
    }

    /// Filtered rows as CSV, every cell quoted, rows joined by `\n`.
    ///
    /// # Errors
    ///
    /// Returns an error if the CSV writer fails.
    pub(crate) fn to_csv(&self) -> anyhow::Result<String> {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(EXPORT_HEADER)?;
        for business in self.filtered() {
            let rating = business.rating.map(|r| r.to_string()).unwrap_or_default();
            let types = business.types.join(", ");
            writer.write_record([
                business.name.as_str(),
                business.phone.as_deref().unwrap_or_default(),
                business.website.as_deref().unwrap_or_default(),
                business.email.as_deref().unwrap_or_default(),
                business.address.as_str(),
                rating.as_str(),
                types.as_str(),
            ])?;
        }

        let bytes = writer.into_inner().map_err(|e| e.into_error())?;
        let mut csv = String::from_utf8(bytes)?;
        if csv.ends_with('\n') {
            csv.pop();
        }
        Ok(csv)
    }

    /// Writes the filtered rows to `dir` and returns the file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the CSV cannot be built or the file written.
    pub(crate) fn export_to(&self, dir: &Path, date: NaiveDate) -> anyhow::Result<PathBuf> {
        let path = dir.join(export_filename(date));
        std::fs::write(&path, self.to_csv()?)?;
        tracing::info!(path = %path.display(), rows = self.filtered().len(), "results exported");
        Ok(path)
    }

    /// Fixed-width text rendering of the filtered rows.
    pub(crate) fn render(&self) -> String {
        let rows = self.filtered();
        let mut out = format!(
            "{:<32}{:<18}{:<8}ADDRESS\n",
            "NAME", "PHONE", "RATING"
        );
        for business in &rows {
            let rating = business
                .rating
                .map(|r| format!("{r:.1}"))
                .unwrap_or_else(|| "\u{2014}".to_owned());
            out.push_str(&format!(
                "{:<32}{:<18}{:<8}{}\n",
                truncate(&business.name, 30),
                business.phone.as_deref().unwrap_or("\u{2014}"),
                rating,
                truncate(&business.address, 60),
            ));
        }
        out
    }
}

pub(crate) fn export_filename(date: NaiveDate) -> String {
    format!("california-businesses-{}.csv", date.format("%Y-%m-%d"))
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() > max {
        format!("{}...", value.chars().take(max - 3).collect::<String>())
    } else {
        value.to_owned()
    }
}
